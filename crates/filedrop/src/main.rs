use dioxus::prelude::*;
use filedrop_core::{FileDescriptor, HostParameters, Outputs};
use filedrop_io::{FileDropZone, clipboard, download};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Plays the part of the low-code host: owns the parameters the widget is
/// configured with, bumps the reset counter, and keeps the latest
/// `filesJson` output on display with copy and download actions.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Host parameters ---
    let mut drop_text = use_signal(String::new);
    let mut max_files = use_signal(|| String::from("10"));
    let mut allowed_formats = use_signal(String::new);
    let mut save_button_color = use_signal(String::new);
    let mut reset = use_signal(|| 0_i64);

    // --- Host-side state ---
    let mut files_json = use_signal(|| String::from("[]"));
    let mut host_error = use_signal(|| Option::<String>::None);
    let mut host_status = use_signal(|| Option::<String>::None);

    let parameters = HostParameters {
        drop_text: Some(drop_text()),
        max_files: Some(serde_json::Value::String(max_files())),
        allowed_formats: Some(allowed_formats()),
        reset: Some(reset().into()),
        save_button_color: Some(save_button_color()),
        allocated_width: None,
        allocated_height: Some(360.0),
    };

    // --- Output handler ---
    let on_output_changed = move |outputs: Outputs| {
        tracing::debug!(bytes = outputs.files_json.len(), "host received outputs");
        files_json.set(outputs.files_json);
    };

    let copy_click = move |_| async move {
        let json = files_json.peek().clone();
        match clipboard::copy_files_json(&json).await {
            Ok(()) => {
                host_error.set(None);
                host_status.set(Some("Copied filesJson to the clipboard".to_owned()));
            }
            Err(e) => host_error.set(Some(format!("Copy failed: {e}"))),
        }
    };

    let download_click = move |_| {
        if let Err(e) = download::save_files_json(&files_json.peek()) {
            host_error.set(Some(format!("Download failed: {e}")));
        } else {
            host_error.set(None);
        }
    };

    let received: Vec<FileDescriptor> = match serde_json::from_str(&files_json()) {
        Ok(files) => files,
        Err(e) => {
            tracing::error!(error = %e, "filesJson did not parse");
            Vec::new()
        }
    };
    let received_count = received.len();

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("host.css") }

        div { class: "host",
            header { class: "host-header",
                h1 { "filedrop" }
                p { class: "host-muted",
                    "Drag-and-drop file upload widget, hosted with live parameters"
                }
            }

            div { class: "host-columns",
                // Left column: parameters
                section { class: "host-panel",
                    h2 { "Parameters" }

                    label { class: "host-field",
                        span { "Drop text" }
                        input {
                            r#type: "text",
                            placeholder: "Drag and drop files, or click to upload",
                            value: "{drop_text}",
                            oninput: move |e| drop_text.set(e.value()),
                        }
                    }
                    label { class: "host-field",
                        span { "Max files" }
                        input {
                            r#type: "number",
                            value: "{max_files}",
                            oninput: move |e| max_files.set(e.value()),
                        }
                    }
                    label { class: "host-field",
                        span { "Allowed formats" }
                        input {
                            r#type: "text",
                            placeholder: ".pdf, image/*, text/plain",
                            value: "{allowed_formats}",
                            oninput: move |e| allowed_formats.set(e.value()),
                        }
                    }
                    label { class: "host-field",
                        span { "Save button colour" }
                        input {
                            r#type: "text",
                            placeholder: "#0078d4",
                            value: "{save_button_color}",
                            oninput: move |e| save_button_color.set(e.value()),
                        }
                    }
                    div { class: "host-field",
                        span { "Reset counter: {reset}" }
                        button {
                            class: "host-button",
                            onclick: move |_| reset += 1,
                            "Reset files"
                        }
                    }
                }

                // Middle column: the widget
                section { class: "host-panel host-widget",
                    FileDropZone {
                        parameters: parameters,
                        on_output_changed: on_output_changed,
                    }
                }

                // Right column: outputs
                section { class: "host-panel",
                    h2 { "Output ({received_count})" }

                    if let Some(ref err) = host_error() {
                        p { class: "host-error", "{err}" }
                    } else if let Some(ref status) = host_status() {
                        p { class: "host-muted", "{status}" }
                    }

                    div { class: "host-actions",
                        button { class: "host-button", onclick: copy_click, "Copy filesJson" }
                        button { class: "host-button", onclick: download_click, "Download filesJson" }
                    }

                    ul { class: "host-files",
                        for file in received {
                            {render_received(file, host_error)}
                        }
                    }
                }
            }
        }
    }
}

/// One row of the host's view of `filesJson`.
fn render_received(file: FileDescriptor, mut host_error: Signal<Option<String>>) -> Element {
    let label = format!(
        "{} ({}, {} bytes)",
        file.name,
        if file.mime_type.is_empty() {
            "unknown type"
        } else {
            file.mime_type.as_str()
        },
        file.size
    );

    rsx! {
        li { class: "host-file",
            span { "{label}" }
            button {
                class: "host-button host-button--small",
                onclick: move |_| {
                    if let Err(e) = download::save_file(&file) {
                        host_error.set(Some(format!("Download failed: {e}")));
                    }
                },
                "Save"
            }
        }
    }
}
