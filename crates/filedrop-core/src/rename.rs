//! Rename flow: edit a file's base name while its extension stays fixed.
//!
//! A [`RenameSession`] exists only while the rename dialog is open. It
//! remembers which list entry is being edited, the extension captured when
//! the dialog opened, the current draft text, and any inline validation
//! message. Closing the dialog drops the session and discards the draft.

use crate::store::FileList;
use crate::types::WidgetError;

/// Label shown in place of the extension when a name has none.
pub const NO_EXTENSION_LABEL: &str = "(no extension)";

/// Byte index of the extension dot, if the name has a real extension.
///
/// A dot at position 0 (`.bashrc`) is part of the base name.
fn extension_dot(name: &str) -> Option<usize> {
    name.rfind('.').filter(|&dot| dot > 0)
}

/// Extension of `name`, including the leading dot, or `""`.
///
/// ```
/// use filedrop_core::rename::extension_of;
///
/// assert_eq!(extension_of("report.v2.pdf"), ".pdf");
/// assert_eq!(extension_of(".bashrc"), "");
/// assert_eq!(extension_of("README"), "");
/// ```
#[must_use]
pub fn extension_of(name: &str) -> &str {
    let name = name.trim();
    extension_dot(name).map_or("", |dot| &name[dot..])
}

/// Base name of `name`: everything before the extension dot.
#[must_use]
pub fn base_of(name: &str) -> &str {
    let name = name.trim();
    extension_dot(name).map_or(name, |dot| &name[..dot])
}

/// Reduce the user's draft to the base name that will be stored.
///
/// When the file has an extension, a trailing `.fragment` the user typed is
/// stripped (they cannot change the extension here), followed by any
/// trailing dots and whitespace. Without an extension the draft is only
/// trimmed.
#[must_use]
pub fn normalize_draft<'a>(draft: &'a str, extension: &str) -> &'a str {
    let raw = draft.trim();
    if extension.is_empty() {
        return raw;
    }
    let without_fragment = extension_dot(raw).map_or(raw, |dot| &raw[..dot]);
    without_fragment
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .trim()
}

/// What happened when a rename was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The entry was renamed. The session should close.
    Renamed {
        /// Name before the rename.
        from: String,
        /// Name after the rename.
        to: String,
    },
    /// Validation failed. The session stays open with an inline message.
    Invalid,
    /// The entry no longer exists (e.g. the list was reset). The session
    /// should close.
    Vanished,
}

/// Transient edit state for one list entry's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameSession {
    index: usize,
    extension: String,
    draft: String,
    error: Option<WidgetError>,
}

impl RenameSession {
    /// Start editing `name`, which lives at `index` in the list.
    ///
    /// The draft is seeded with the base name.
    #[must_use]
    pub fn open(index: usize, name: &str) -> Self {
        Self {
            index,
            extension: extension_of(name).to_owned(),
            draft: base_of(name).to_owned(),
            error: None,
        }
    }

    /// List position being edited.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Captured extension including its dot, or `""`.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Text for the read-only extension label.
    #[must_use]
    pub fn extension_label(&self) -> &str {
        if self.extension.is_empty() {
            NO_EXTENSION_LABEL
        } else {
            &self.extension
        }
    }

    /// Current contents of the edit field.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft with what the user has typed.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Inline validation message from the last submit, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&WidgetError> {
        self.error.as_ref()
    }

    /// Validate the draft and write it into `files`.
    pub fn submit(&mut self, files: &mut FileList) -> SubmitOutcome {
        if files.get(self.index).is_none() {
            return SubmitOutcome::Vanished;
        }

        let base = normalize_draft(&self.draft, &self.extension);
        match files.rename_at(self.index, base) {
            Ok(Some(from)) => {
                self.error = None;
                let to = files
                    .get(self.index)
                    .map(|f| f.name.clone())
                    .unwrap_or_default();
                SubmitOutcome::Renamed { from, to }
            }
            Ok(None) => SubmitOutcome::Vanished,
            Err(e) => {
                self.error = Some(e);
                SubmitOutcome::Invalid
            }
        }
    }
}
