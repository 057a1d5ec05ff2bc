//! The embeddable drop-zone widget.
//!
//! [`FileDropZone`] owns one [`Widget`] for its whole lifetime and maps
//! every DOM event onto the matching `Widget` method. The host passes
//! parameters in as props (one update cycle per prop change) and receives
//! fresh outputs through `on_output_changed` after every list mutation.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use filedrop_core::{BANNER_TIMEOUT, HostParameters, Outputs, Widget};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;

use super::file_list::FileList;
use super::rename_dialog::RenameDialog;
use super::status::{ErrorBanner, ProgressBar};
use crate::file_source::BrowserFile;

/// Props for the [`FileDropZone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileDropZoneProps {
    /// Raw host parameters. Re-applied whenever they change.
    parameters: HostParameters,
    /// Called with the serialized file list after every change to it.
    on_output_changed: EventHandler<Outputs>,
}

/// A drag-and-drop target with file picker, progress bar, error banner,
/// editable file list, and rename dialog.
#[component]
#[allow(clippy::too_many_lines)]
pub fn FileDropZone(props: FileDropZoneProps) -> Element {
    // Bumped by the widget on every list change; an effect forwards it.
    let mut revision = use_signal(|| 0_u64);
    let mut widget = use_signal(move || Widget::new(move || revision += 1));
    let mut dragging = use_signal(|| false);
    let mut picker = use_signal(|| Option::<web_sys::HtmlInputElement>::None);

    // --- Host update cycle ---
    use_effect(use_reactive((&props.parameters,), move |(parameters,)| {
        widget.write().update_view(&parameters);
    }));

    // --- Output notification ---
    let on_output_changed = props.on_output_changed;
    use_effect(move || {
        if revision() == 0 {
            return;
        }
        let outputs = widget.peek().outputs();
        on_output_changed.call(outputs);
    });

    // --- Banner expiry ---
    // Keyed on the banner generation so each new message gets its own
    // timer and a superseded message's timer does nothing.
    let banner_shown = use_memo(move || widget.read().banner().shown());
    use_effect(move || {
        if let Some(generation) = banner_shown() {
            spawn(async move {
                let millis = u32::try_from(BANNER_TIMEOUT.as_millis()).unwrap_or(u32::MAX);
                TimeoutFuture::new(millis).await;
                widget.write().expire_banner(generation);
            });
        }
    });

    // --- Disposal ---
    use_drop(move || {
        if let Ok(mut w) = widget.try_write() {
            w.dispose();
        }
    });

    // Filter, admit, read, and append one selection.
    //
    // Shared by the file-picker (`handle_files`) and drag-and-drop
    // (`handle_drop`) paths.
    let process_files = move |files: Vec<FileData>| async move {
        let incoming: Vec<BrowserFile> = files.into_iter().map(BrowserFile::from).collect();
        tracing::debug!(count = incoming.len(), "files selected");

        let pending = widget.write().begin_batch(incoming);

        // Let the picker fire `change` again for the same file.
        if let Some(input) = picker.peek().as_ref() {
            input.set_value("");
        }

        let Some(batch) = pending else {
            return;
        };
        let done = batch.read().await;
        widget.write().complete_batch(done);
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    // --- Snapshot for rendering ---
    let state = widget.read();
    let config = state.config();
    let drop_text = config.drop_text.clone();
    let accept = config.accept().to_owned();
    let confirm_color = config.save_button_color.clone();
    let width = config.width.map(|w| format!("{w}px"));
    let height = config.height.map(|h| format!("{h}px"));
    let loading = state.is_loading();
    let banner = state.banner().message().map(str::to_owned);
    let names: Vec<String> = state.files().files().iter().map(|f| f.name.clone()).collect();
    let rename = state.rename_session().map(|session| {
        (
            session.draft().to_owned(),
            session.extension_label().to_owned(),
            session.error().map(ToString::to_string),
        )
    });
    drop(state);

    let target_class = if dragging() {
        "fd-target fd-target--dragging"
    } else {
        "fd-target"
    };

    rsx! {
        style { dangerous_inner_html: include_str!("filedrop.css") }

        div {
            class: "fd-root",
            width: width,
            height: height,

            label {
                class: "{target_class}",
                ondragover: move |evt| {
                    evt.prevent_default();
                    dragging.set(true);
                },
                ondragleave: move |_| {
                    dragging.set(false);
                },
                ondrop: handle_drop,

                div { class: "fd-target-label", "{drop_text}" }

                input {
                    r#type: "file",
                    multiple: true,
                    accept: "{accept}",
                    display: "none",
                    onmounted: move |evt| {
                        let input = evt
                            .data()
                            .downcast::<web_sys::Element>()
                            .and_then(|el| el.dyn_ref::<web_sys::HtmlInputElement>())
                            .cloned();
                        picker.set(input);
                    },
                    onchange: handle_files,
                }
            }

            ProgressBar { visible: loading }
            ErrorBanner { message: banner }

            FileList {
                names: names,
                on_rename: move |index| widget.write().open_rename(index),
                on_remove: move |index| widget.write().remove(index),
            }
        }

        if let Some((draft, extension_label, error)) = rename {
            RenameDialog {
                draft: draft,
                extension_label: extension_label,
                error: error,
                confirm_color: confirm_color,
                on_input: move |text: String| widget.write().set_rename_draft(text),
                on_submit: move |()| {
                    widget.write().submit_rename();
                },
                on_cancel: move |()| widget.write().cancel_rename(),
            }
        }
    }
}
