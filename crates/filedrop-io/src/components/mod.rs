//! Dioxus UI components for filedrop.
//!
//! Provides the drop-zone widget and the pieces it is built from: the
//! progress bar and error banner, the file list with per-row controls,
//! and the rename dialog.

mod drop_zone;
mod file_list;
mod rename_dialog;
mod status;

pub use drop_zone::FileDropZone;
pub use file_list::FileList;
pub use rename_dialog::RenameDialog;
pub use status::{ErrorBanner, ProgressBar};
