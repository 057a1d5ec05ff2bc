//! The ordered in-memory list of accepted files.

use crate::rename;
use crate::types::{FileDescriptor, WidgetError};

/// Authoritative ordered collection of accepted files.
///
/// Insertion order is preserved and duplicate names are allowed. The
/// list itself does not enforce the max-count ceiling; callers run
/// [`admission::admit`](crate::admission::admit) before appending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    files: Vec<FileDescriptor>,
}

impl FileList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Number of files in the list.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the list holds no files.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns the file at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FileDescriptor> {
        self.files.get(index)
    }

    /// All files in list order.
    #[must_use]
    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    /// Append files to the end, keeping their order.
    pub fn append(&mut self, files: impl IntoIterator<Item = FileDescriptor>) {
        self.files.extend(files);
    }

    /// Remove and return the file at `index`.
    ///
    /// Out-of-range indices are a no-op and return `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<FileDescriptor> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    /// Replace the base name of the file at `index`, keeping its extension.
    ///
    /// Returns the previous name, or `Ok(None)` when `index` is out of
    /// range.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::EmptyName`] if `new_base` is empty after
    /// trimming. The list is left unchanged.
    pub fn rename_at(
        &mut self,
        index: usize,
        new_base: &str,
    ) -> Result<Option<String>, WidgetError> {
        let new_base = new_base.trim();
        if new_base.is_empty() {
            return Err(WidgetError::EmptyName);
        }
        let Some(file) = self.files.get_mut(index) else {
            return Ok(None);
        };

        let next = format!("{new_base}{}", rename::extension_of(&file.name));
        Ok(Some(std::mem::replace(&mut file.name, next)))
    }

    /// Remove every file.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Serialize the list as the host's JSON array.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.files)
    }
}
