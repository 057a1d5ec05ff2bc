//! The accepted-file list with per-row rename and remove controls.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdPencil, LdX};
use filedrop_core::selection_summary;

/// Props for the [`FileList`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileListProps {
    /// Current file names, in list order.
    names: Vec<String>,
    /// Called with the row index when its rename control is clicked.
    on_rename: EventHandler<usize>,
    /// Called with the row index when its remove control is clicked.
    on_remove: EventHandler<usize>,
}

/// Summary header followed by one row per file.
///
/// The whole list re-renders whenever the names change.
#[component]
pub fn FileList(props: FileListProps) -> Element {
    let summary = selection_summary(props.names.len());

    rsx! {
        div { class: "fd-list",
            div { class: "fd-list-header", "{summary}" }

            for (index, name) in props.names.iter().enumerate() {
                {render_row(index, name, props.on_rename, props.on_remove)}
            }
        }
    }
}

/// Render one file row.
fn render_row(
    index: usize,
    name: &str,
    on_rename: EventHandler<usize>,
    on_remove: EventHandler<usize>,
) -> Element {
    rsx! {
        div { key: "{index}-{name}", class: "fd-row",
            span { class: "fd-row-name", title: "{name}", "{name}" }

            div { class: "fd-row-actions",
                button {
                    r#type: "button",
                    class: "fd-icon-button",
                    title: "Rename",
                    aria_label: "Rename {name}",
                    onclick: move |_| on_rename.call(index),
                    Icon { width: 18, height: 18, icon: LdPencil }
                }
                button {
                    r#type: "button",
                    class: "fd-icon-button",
                    title: "Remove",
                    aria_label: "Remove {name}",
                    onclick: move |_| on_remove.call(index),
                    Icon { width: 18, height: 18, icon: LdX }
                }
            }
        }
    }
}
