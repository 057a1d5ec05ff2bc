//! filedrop-core: State and rules for the drop-zone widget (sans-IO).
//!
//! Everything the widget decides lives here:
//! allow-list matching -> max-count admission -> concurrent reads ->
//! the ordered file list -> rename -> serialization for the host.
//!
//! This crate has **no browser dependencies** -- file handles arrive
//! through the [`FileSource`] trait and the host is told about changes
//! through a plain callback. All DOM and event wiring lives in
//! `filedrop-io`.

pub mod admission;
pub mod banner;
pub mod config;
pub mod formats;
pub mod reader;
pub mod rename;
pub mod store;
pub mod types;
pub mod widget;

pub use admission::{Admission, admit};
pub use banner::{BANNER_TIMEOUT, Banner};
pub use config::{HostParameters, ResetToken, WidgetConfig};
pub use formats::is_allowed;
pub use reader::{CompletedBatch, FilePayload, FileSource, PendingBatch};
pub use rename::{RenameSession, SubmitOutcome};
pub use store::FileList;
pub use types::{FileDescriptor, Outputs, WidgetError};
pub use widget::{Widget, selection_summary};
