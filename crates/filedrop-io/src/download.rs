//! Saving widget output and accepted files via Blob URLs.
//!
//! Dioxus has no built-in file download API. Downloads are triggered by
//! building a `Blob`, generating an object URL, and clicking a temporary
//! `<a download>` element.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use filedrop_core::FileDescriptor;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Name used when saving the `filesJson` output.
pub const FILES_JSON_NAME: &str = "files.json";

/// Errors that can occur when triggering a download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),

    /// A stored file's content was not valid base64.
    #[error("stored content of {name} is not valid base64: {source}")]
    Content {
        /// File whose content failed to decode.
        name: String,
        /// Decoder error.
        source: base64::DecodeError,
    },
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Download the serialized file list as `files.json`.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if any browser API call fails.
pub fn save_files_json(files_json: &str) -> Result<(), DownloadError> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(files_json));

    let opts = BlobPropertyBag::new();
    opts.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &opts)?;

    click_download(&blob, FILES_JSON_NAME)
}

/// Download one accepted file with its current (possibly renamed) name.
///
/// The stored base64 content is decoded back into the original bytes.
///
/// # Errors
///
/// Returns [`DownloadError::Content`] if the content does not decode, or
/// [`DownloadError::JsError`] if any browser API call fails.
pub fn save_file(file: &FileDescriptor) -> Result<(), DownloadError> {
    let bytes = STANDARD
        .decode(&file.content)
        .map_err(|source| DownloadError::Content {
            name: file.name.clone(),
            source,
        })?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes.as_slice()));

    let opts = BlobPropertyBag::new();
    if !file.mime_type.is_empty() {
        opts.set_type(&file.mime_type);
    }
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    click_download(&blob, &file.name)
}

/// Point a temporary `<a download>` at `blob` and click it.
///
/// The object URL is revoked after the click.
fn click_download(blob: &web_sys::Blob, filename: &str) -> Result<(), DownloadError> {
    let window =
        web_sys::window().ok_or_else(|| DownloadError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::JsError("no document".into()))?;

    let url = web_sys::Url::create_object_url_with_blob(blob)?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| DownloadError::JsError(format!("failed to cast element: {e:?}")))?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;
    body.append_child(&anchor)?;
    anchor.click();

    // The download has already started; cleanup failures are not errors.
    let _ = body.remove_child(&anchor);
    let _ = web_sys::Url::revoke_object_url(&url);

    tracing::debug!(filename, "download triggered");
    Ok(())
}
