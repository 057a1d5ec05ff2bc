//! Shared types for the filedrop widget.

use serde::{Deserialize, Serialize};

/// One accepted file, self-contained and ready to hand to the host.
///
/// Serializes with exactly the fields the host expects:
/// `name`, `size`, `type`, `lastModified`, `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    /// File name including its extension. Only renames mutate this.
    pub name: String,
    /// Size of the original file in bytes.
    pub size: u64,
    /// Declared MIME type. Empty when the browser could not determine one.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Last modification time in milliseconds since the Unix epoch.
    pub last_modified: u64,
    /// Standard base64 encoding of the file bytes.
    pub content: String,
}

/// Values the widget reports back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outputs {
    /// JSON array of [`FileDescriptor`] objects.
    pub files_json: String,
}

/// Every recoverable condition the widget can surface to the user.
///
/// The `Display` text is the message shown in the error banner (or
/// inline in the rename dialog for [`EmptyName`](Self::EmptyName)).
/// None of these ever propagate to the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    /// Files in a batch failed the allow-list.
    #[error("{} not uploaded. Allowed formats: {allowed}.", subject(.count))]
    FormatRejected {
        /// How many files in the batch were rejected.
        count: usize,
        /// The configured allow-list, or `"any"` when unset.
        allowed: String,
    },

    /// The list was already full when a batch arrived.
    #[error("No more files can be added. Maximum number of files is {max}.")]
    NoCapacity {
        /// The configured ceiling.
        max: i64,
    },

    /// Only the leading part of a batch fit under the ceiling.
    #[error("Some files were not uploaded. Maximum number of files is {max}.")]
    CapacityExceeded {
        /// The configured ceiling.
        max: i64,
    },

    /// A file's content could not be read.
    #[error("Failed to read {name}: {reason}")]
    ReadFailure {
        /// Name of the file that failed.
        name: String,
        /// Underlying I/O error text.
        reason: String,
    },

    /// A rename was submitted with nothing left of the base name.
    #[error("Enter a file name.")]
    EmptyName,
}

/// Sentence subject for a rejection count.
#[allow(clippy::trivially_copy_pass_by_ref)]
const fn subject(count: &usize) -> &'static str {
    if *count == 1 {
        "A file was"
    } else {
        "Some files were"
    }
}
