//! Modal dialog for renaming one file while its extension stays fixed.

use dioxus::prelude::*;
use wasm_bindgen::JsCast;

/// Props for the [`RenameDialog`] component.
#[derive(Props, Clone, PartialEq)]
pub struct RenameDialogProps {
    /// Current edit-field text.
    draft: String,
    /// Read-only extension label next to the edit field.
    extension_label: String,
    /// Inline validation message from the last submit.
    error: Option<String>,
    /// CSS colour for the confirm button's border and background.
    confirm_color: String,
    /// Called with the edit-field text on every keystroke.
    on_input: EventHandler<String>,
    /// Called on Enter or when Save is clicked.
    on_submit: EventHandler<()>,
    /// Called on Escape, Cancel, or a click on the backdrop.
    on_cancel: EventHandler<()>,
}

/// Rename dialog over a dimmed backdrop.
///
/// The owning component mounts this only while a rename is in progress;
/// closing it is a matter of no longer rendering it.
#[component]
pub fn RenameDialog(props: RenameDialogProps) -> Element {
    let on_input = props.on_input;
    let on_submit = props.on_submit;
    let on_cancel = props.on_cancel;
    let color = props.confirm_color;

    rsx! {
        div {
            class: "fd-backdrop",
            onclick: move |_| on_cancel.call(()),

            div {
                class: "fd-dialog",
                role: "dialog",
                aria_modal: "true",
                aria_label: "Rename file",
                onclick: move |evt| evt.stop_propagation(),

                div { class: "fd-dialog-title", "Rename file" }

                div { class: "fd-dialog-row",
                    input {
                        r#type: "text",
                        class: "fd-dialog-input",
                        value: "{props.draft}",
                        onmounted: move |evt| focus_and_select(&evt),
                        oninput: move |evt| on_input.call(evt.value()),
                        onkeydown: move |evt| match evt.key() {
                            Key::Enter => {
                                evt.prevent_default();
                                on_submit.call(());
                            }
                            Key::Escape => {
                                evt.prevent_default();
                                on_cancel.call(());
                            }
                            _ => {}
                        },
                    }
                    span { class: "fd-dialog-ext", "{props.extension_label}" }
                }

                if let Some(ref err) = props.error {
                    div { class: "fd-dialog-error", role: "alert", "{err}" }
                }

                div { class: "fd-dialog-actions",
                    button {
                        r#type: "button",
                        class: "fd-button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        r#type: "button",
                        class: "fd-button fd-button--primary",
                        border: "1px solid {color}",
                        background: "{color}",
                        onclick: move |_| on_submit.call(()),
                        "Save"
                    }
                }
            }
        }
    }
}

/// Focus the edit field and select its text so typing replaces the name.
fn focus_and_select(evt: &MountedEvent) {
    let data = evt.data();
    let Some(element) = data.downcast::<web_sys::Element>() else {
        return;
    };
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        if let Err(e) = input.focus() {
            tracing::warn!(error = ?e, "could not focus rename field");
        }
        input.select();
    }
}
