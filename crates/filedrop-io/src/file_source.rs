//! [`FileSource`] over the files Dioxus hands to drop and change events.

use dioxus::html::FileData;
use filedrop_core::{FilePayload, FileSource};

/// A file from a drop or picker event.
///
/// `FileData` exposes the raw bytes, so reads produce
/// [`FilePayload::Bytes`] and never go through a data URL.
pub struct BrowserFile(FileData);

impl From<FileData> for BrowserFile {
    fn from(file: FileData) -> Self {
        Self(file)
    }
}

impl FileSource for BrowserFile {
    type Error = String;

    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size()
    }

    fn mime_type(&self) -> String {
        self.0.content_type().unwrap_or_default()
    }

    fn last_modified(&self) -> u64 {
        self.0.last_modified()
    }

    async fn read(&self) -> Result<FilePayload, String> {
        self.0
            .read_bytes()
            .await
            .map(|bytes| FilePayload::Bytes(bytes.to_vec()))
            .map_err(|e| e.to_string())
    }
}
