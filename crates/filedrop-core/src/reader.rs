//! Turning raw file handles into [`FileDescriptor`]s.
//!
//! The browser side implements [`FileSource`] for whatever handle it gets
//! from a drop or picker event. Reads for one user action run concurrently
//! via [`join_all`], which yields results in request order, so the list
//! receives files in the order the user selected them regardless of which
//! read finishes first. A failed read only drops its own file.
//!
//! Contents arrive as a [`FilePayload`]. Sources with direct byte access,
//! like the Dioxus `FileData` adapter in `filedrop-io`, hand over
//! [`FilePayload::Bytes`]. Hosts that only get a `data:` URL from a
//! `FileReader` hand over [`FilePayload::DataUrl`] instead; its payload is
//! taken from after the first comma, and a URL with no comma gives empty
//! content rather than a read failure.

use std::fmt::Display;
use std::future::Future;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::join_all;

use crate::types::{FileDescriptor, WidgetError};

/// File contents as delivered by a [`FileSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePayload {
    /// Raw bytes, to be base64-encoded.
    Bytes(Vec<u8>),
    /// A `data:` URL whose payload after the first comma is already base64.
    DataUrl(String),
}

impl FilePayload {
    /// The base64 text stored in [`FileDescriptor::content`].
    #[must_use]
    pub fn into_base64(self) -> String {
        match self {
            Self::Bytes(bytes) => STANDARD.encode(bytes),
            Self::DataUrl(url) => payload_from_data_url(&url).to_owned(),
        }
    }
}

/// Everything after the first comma of a `data:` URL.
///
/// A URL without a comma yields an empty payload rather than an error.
#[must_use]
pub fn payload_from_data_url(url: &str) -> &str {
    url.split_once(',').map_or("", |(_, payload)| payload)
}

/// A file handle that can be described and read asynchronously.
pub trait FileSource {
    /// Error produced when the contents cannot be read.
    type Error: Display;

    /// File name as reported by the browser.
    fn name(&self) -> String;

    /// Size in bytes.
    fn size(&self) -> u64;

    /// Declared MIME type, or `""` when unknown.
    fn mime_type(&self) -> String;

    /// Last modification time in milliseconds since the Unix epoch.
    fn last_modified(&self) -> u64;

    /// Read the full contents.
    fn read(&self) -> impl Future<Output = Result<FilePayload, Self::Error>>;
}

/// Read one file into a descriptor.
///
/// # Errors
///
/// Returns [`WidgetError::ReadFailure`] carrying the underlying error text
/// when the read does not complete.
#[allow(clippy::future_not_send)] // WASM is single-threaded; file handles are !Send
pub async fn read_descriptor<S: FileSource>(source: &S) -> Result<FileDescriptor, WidgetError> {
    let name = source.name();
    tracing::debug!(
        name = %name,
        size = source.size(),
        mime_type = %source.mime_type(),
        "reading file"
    );

    let payload = source.read().await.map_err(|e| WidgetError::ReadFailure {
        name: name.clone(),
        reason: e.to_string(),
    })?;

    Ok(FileDescriptor {
        size: source.size(),
        mime_type: source.mime_type(),
        last_modified: source.last_modified(),
        content: payload.into_base64(),
        name,
    })
}

/// Files admitted for one user action, waiting to be read.
///
/// Produced by [`Widget::begin_batch`](crate::Widget::begin_batch). The
/// epoch ties the batch to the list state it was admitted against.
#[derive(Debug)]
pub struct PendingBatch<S> {
    pub(crate) epoch: u64,
    files: Vec<S>,
}

impl<S: FileSource> PendingBatch<S> {
    pub(crate) fn new(epoch: u64, files: Vec<S>) -> Self {
        Self { epoch, files }
    }

    /// Number of files to read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if there is nothing to read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Read every file concurrently and wait for all of them to settle.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; file handles are !Send
    pub async fn read(self) -> CompletedBatch {
        let results = join_all(self.files.iter().map(read_descriptor)).await;
        CompletedBatch {
            epoch: self.epoch,
            results,
        }
    }
}

/// Settled reads for one batch, in the original selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedBatch {
    pub(crate) epoch: u64,
    results: Vec<Result<FileDescriptor, WidgetError>>,
}

impl CompletedBatch {
    /// Per-file outcomes, in selection order.
    #[must_use]
    pub fn results(&self) -> &[Result<FileDescriptor, WidgetError>] {
        &self.results
    }

    pub(crate) fn into_results(self) -> Vec<Result<FileDescriptor, WidgetError>> {
        self.results
    }
}
