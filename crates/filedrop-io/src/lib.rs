//! filedrop-io: Browser I/O and Dioxus component library.
//!
//! Adapts Dioxus file events to `filedrop-core`, renders the drop-zone
//! widget, and provides clipboard and Blob-download helpers for hosts
//! that want to hand the output on.

pub mod clipboard;
pub mod components;
pub mod download;
pub mod file_source;

pub use components::{ErrorBanner, FileDropZone, FileList, ProgressBar, RenameDialog};
pub use file_source::BrowserFile;
