//! The widget instance: all state for one embedded drop zone.
//!
//! [`Widget`] is what the host binds to. It is created once when the host
//! initializes the control, receives [`HostParameters`] on every update
//! cycle, answers output queries with the serialized file list, and is
//! disposed when the host tears the control down.
//!
//! Every user action maps to one method here. Methods that change the
//! file list call the notifier the host passed to [`Widget::new`] so the
//! host knows to query [`Widget::outputs`] again.
//!
//! Reading file contents is the only asynchronous step. It is split into
//! [`begin_batch`](Widget::begin_batch), which filters and admits files and
//! hands back a [`PendingBatch`], and [`complete_batch`](Widget::complete_batch),
//! which appends whatever was read. The widget is never borrowed across the
//! read itself.

use crate::admission;
use crate::banner::Banner;
use crate::config::{HostParameters, ResetToken, WidgetConfig};
use crate::formats;
use crate::reader::{CompletedBatch, FileSource, PendingBatch};
use crate::rename::{RenameSession, SubmitOutcome};
use crate::store::FileList;
use crate::types::{Outputs, WidgetError};

/// Header text above the file list.
#[must_use]
pub fn selection_summary(count: usize) -> String {
    match count {
        0 => "No files selected".to_owned(),
        1 => "1 file selected".to_owned(),
        n => format!("{n} files selected"),
    }
}

/// State for one widget instance.
pub struct Widget {
    config: WidgetConfig,
    files: FileList,
    rename: Option<RenameSession>,
    reset: ResetToken,
    banner: Banner,
    /// Read batches started but not yet completed.
    in_flight: usize,
    /// Advanced on every clear; batches from an older epoch are dropped.
    epoch: u64,
    notify: Box<dyn FnMut()>,
}

impl Widget {
    /// Create a widget with default configuration.
    ///
    /// `notify` is called after every change to the file list.
    #[must_use]
    pub fn new(notify: impl FnMut() + 'static) -> Self {
        tracing::info!("widget init");
        Self {
            config: WidgetConfig::default(),
            files: FileList::new(),
            rename: None,
            reset: ResetToken::default(),
            banner: Banner::default(),
            in_flight: 0,
            epoch: 0,
            notify: Box::new(notify),
        }
    }

    /// Current resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// The accepted files.
    #[must_use]
    pub const fn files(&self) -> &FileList {
        &self.files
    }

    /// The open rename session, if the dialog is showing.
    #[must_use]
    pub const fn rename_session(&self) -> Option<&RenameSession> {
        self.rename.as_ref()
    }

    /// Error banner state.
    #[must_use]
    pub const fn banner(&self) -> &Banner {
        &self.banner
    }

    /// Whether any read batch is still in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Header text for the current list.
    #[must_use]
    pub fn summary(&self) -> String {
        selection_summary(self.files.len())
    }

    fn notify(&mut self) {
        (self.notify)();
    }

    /// Apply a fresh set of host parameters.
    ///
    /// A changed, non-null reset counter clears a non-empty list.
    pub fn update_view(&mut self, params: &HostParameters) {
        self.config = WidgetConfig::resolve(params);

        let previous = self.reset.last();
        let counter = params.reset_counter();
        if self.reset.observe(counter) {
            tracing::info!(from = ?previous, to = ?counter, "reset token changed");
            if !self.files.is_empty() {
                self.clear();
            }
        }

        tracing::debug!(
            max_files = self.config.max_files,
            allowed_formats = ?self.config.allowed_formats,
            width = ?self.config.width,
            height = ?self.config.height,
            "update view"
        );
    }

    /// Serialize the current list for the host.
    #[must_use]
    pub fn outputs(&self) -> Outputs {
        tracing::debug!(length = self.files.len(), "outputs queried");
        let files_json = self.files.to_json().unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to serialize file list");
            String::from("[]")
        });
        Outputs { files_json }
    }

    /// Remove every file and dismiss the banner.
    ///
    /// Reads still in flight from before the clear are discarded when they
    /// complete.
    pub fn clear(&mut self) {
        tracing::info!(length = self.files.len(), "clear files");
        self.files.clear();
        self.rename = None;
        self.epoch += 1;
        self.banner.dismiss();
        self.notify();
    }

    /// Filter the files from one drop or picker selection.
    ///
    /// Dismisses any current banner and drops files that fail the
    /// allow-list. A list that is already full refuses the whole batch up
    /// front; otherwise every allowed file is read, and the ceiling is
    /// applied to the successful reads in
    /// [`complete_batch`](Self::complete_batch), so a failed read never
    /// takes a slot. Returns `None` when nothing is left to read.
    pub fn begin_batch<S: FileSource>(&mut self, incoming: Vec<S>) -> Option<PendingBatch<S>> {
        tracing::debug!(count = incoming.len(), "batch start");
        self.banner.dismiss();

        let allowed = self.config.allowed_formats.as_deref();
        let (accepted, rejected): (Vec<S>, Vec<S>) = incoming
            .into_iter()
            .partition(|f| formats::is_allowed(&f.mime_type(), &f.name(), allowed));
        if !rejected.is_empty() {
            tracing::debug!(rejected = rejected.len(), "files failed allow-list");
            self.show_error(&WidgetError::FormatRejected {
                count: rejected.len(),
                allowed: self.config.allowed_formats_label().to_owned(),
            });
        }

        if accepted.is_empty() {
            tracing::warn!("nothing left to read after filtering");
            return None;
        }

        if let Some(refusal) = admission::admit(self.files.len(), 0, self.config.max_files).refusal {
            tracing::warn!(
                max_files = self.config.max_files,
                existing = self.files.len(),
                "list already full"
            );
            self.show_error(&refusal);
            return None;
        }

        self.in_flight += 1;
        Some(PendingBatch::new(self.epoch, accepted))
    }

    /// Append the files read by a batch from [`begin_batch`](Self::begin_batch).
    ///
    /// Failed reads are logged and the latest failure is shown in the
    /// banner. The successful reads are then admitted against the list as
    /// it is now, since other batches may have completed in the meantime:
    /// the leading ones that fit are appended in selection order and an
    /// overflow message replaces any read-failure message.
    pub fn complete_batch(&mut self, batch: CompletedBatch) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if batch.epoch != self.epoch {
            tracing::info!(
                batch_epoch = batch.epoch,
                epoch = self.epoch,
                "discarding batch started before a clear"
            );
            return;
        }

        let mut descriptors = Vec::new();
        for result in batch.into_results() {
            match result {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(e) => {
                    tracing::error!(error = %e, "file read failed");
                    self.show_error(&e);
                }
            }
        }

        let decision = admission::admit(self.files.len(), descriptors.len(), self.config.max_files);
        tracing::debug!(
            max_files = self.config.max_files,
            existing = self.files.len(),
            read = descriptors.len(),
            admitted = decision.admitted,
            "admission"
        );
        if let Some(refusal) = &decision.refusal
            && !descriptors.is_empty()
        {
            tracing::warn!(%refusal, "batch exceeds capacity");
            self.show_error(refusal);
        }
        descriptors.truncate(decision.admitted);

        tracing::debug!(appended = descriptors.len(), "batch end");
        if !descriptors.is_empty() {
            self.files.append(descriptors);
            self.notify();
        }
    }

    /// Remove the file at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if let Some(removed) = self.files.remove_at(index) {
            tracing::info!(index, name = %removed.name, "remove file");
            self.notify();
        }
    }

    /// Open the rename dialog for the file at `index`.
    pub fn open_rename(&mut self, index: usize) {
        if let Some(file) = self.files.get(index) {
            tracing::debug!(index, name = %file.name, "open rename");
            self.rename = Some(RenameSession::open(index, &file.name));
        }
    }

    /// Update the rename dialog's edit field.
    pub fn set_rename_draft(&mut self, draft: impl Into<String>) {
        if let Some(session) = &mut self.rename {
            session.set_draft(draft);
        }
    }

    /// Close the rename dialog without applying the draft.
    pub fn cancel_rename(&mut self) {
        self.rename = None;
    }

    /// Validate and apply the rename draft.
    ///
    /// On success the dialog closes. On a validation failure it stays open
    /// with an inline message. Returns `None` if no dialog was open.
    pub fn submit_rename(&mut self) -> Option<SubmitOutcome> {
        let session = self.rename.as_mut()?;
        let outcome = session.submit(&mut self.files);
        match &outcome {
            SubmitOutcome::Renamed { from, to } => {
                tracing::info!(index = session.index(), %from, %to, "rename file");
                self.rename = None;
                self.notify();
            }
            SubmitOutcome::Invalid => {
                tracing::debug!(index = session.index(), "rename rejected");
            }
            SubmitOutcome::Vanished => {
                tracing::debug!(index = session.index(), "rename target gone");
                self.rename = None;
            }
        }
        Some(outcome)
    }

    /// Clear the banner if `generation` is still the one on display.
    pub fn expire_banner(&mut self, generation: u64) {
        self.banner.expire(generation);
    }

    /// Tear down transient state when the host destroys the control.
    ///
    /// Closes the rename dialog, hides the banner, and drops any reads
    /// still in flight. The file list itself is left for a final output
    /// query.
    pub fn dispose(&mut self) {
        tracing::info!("widget dispose");
        self.rename = None;
        self.banner.dismiss();
        self.epoch += 1;
    }

    fn show_error(&mut self, error: &WidgetError) {
        self.banner.show(error.to_string());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::reader::testing::MemoryFile;
    use crate::types::FileDescriptor;

    fn counted_widget() -> (Widget, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let widget = Widget::new(move || seen.set(seen.get() + 1));
        (widget, count)
    }

    fn params(max_files: i64, allowed: Option<&str>) -> HostParameters {
        HostParameters {
            max_files: Some(max_files.into()),
            allowed_formats: allowed.map(str::to_owned),
            ..HostParameters::default()
        }
    }

    fn text(name: &str) -> MemoryFile {
        MemoryFile::new(name, "text/plain", name.as_bytes())
    }

    fn names(widget: &Widget) -> Vec<String> {
        widget.files().files().iter().map(|f| f.name.clone()).collect()
    }

    async fn drop_files(widget: &mut Widget, files: Vec<MemoryFile>) {
        if let Some(batch) = widget.begin_batch(files) {
            assert!(widget.is_loading());
            let done = batch.read().await;
            widget.complete_batch(done);
        }
        assert!(!widget.is_loading());
    }

    #[tokio::test]
    async fn dropped_files_append_in_order_and_notify() {
        let (mut widget, notified) = counted_widget();
        drop_files(&mut widget, vec![text("a.txt"), text("b.txt")]).await;

        assert_eq!(names(&widget), ["a.txt", "b.txt"]);
        assert_eq!(notified.get(), 1);
        assert_eq!(widget.summary(), "2 files selected");
        assert_eq!(widget.banner().message(), None);
    }

    #[tokio::test]
    async fn overflow_admits_leading_files() {
        let (mut widget, _) = counted_widget();
        widget.update_view(&params(10, None));
        drop_files(&mut widget, (0..8).map(|i| text(&format!("{i}.txt"))).collect()).await;

        let batch: Vec<_> = ["v", "w", "x", "y", "z"].iter().map(|n| text(n)).collect();
        drop_files(&mut widget, batch).await;

        assert_eq!(widget.files().len(), 10);
        assert_eq!(names(&widget)[8..], ["v", "w"]);
        assert_eq!(
            widget.banner().message(),
            Some("Some files were not uploaded. Maximum number of files is 10.")
        );
    }

    #[tokio::test]
    async fn full_list_refuses_batch() {
        let (mut widget, notified) = counted_widget();
        widget.update_view(&params(1, None));
        drop_files(&mut widget, vec![text("one")]).await;

        assert!(widget.begin_batch(vec![text("two")]).is_none());
        assert_eq!(names(&widget), ["one"]);
        assert_eq!(notified.get(), 1);
        assert_eq!(
            widget.banner().message(),
            Some("No more files can be added. Maximum number of files is 1.")
        );
        assert!(!widget.is_loading());
    }

    #[tokio::test]
    async fn disallowed_files_are_filtered_with_message() {
        let (mut widget, _) = counted_widget();
        widget.update_view(&params(10, Some(".pdf")));
        drop_files(
            &mut widget,
            vec![
                MemoryFile::new("scan.pdf", "application/pdf", b"%PDF"),
                text("notes.txt"),
            ],
        )
        .await;

        assert_eq!(names(&widget), ["scan.pdf"]);
        assert_eq!(
            widget.banner().message(),
            Some("A file was not uploaded. Allowed formats: .pdf.")
        );
    }

    #[tokio::test]
    async fn capacity_message_supersedes_format_message() {
        let (mut widget, _) = counted_widget();
        widget.update_view(&params(1, Some("text/plain")));
        drop_files(
            &mut widget,
            vec![text("a"), MemoryFile::new("b.png", "image/png", b""), text("c")],
        )
        .await;

        assert_eq!(names(&widget), ["a"]);
        assert_eq!(
            widget.banner().message(),
            Some("Some files were not uploaded. Maximum number of files is 1.")
        );
    }

    #[tokio::test]
    async fn failed_read_skips_only_that_file() {
        let (mut widget, notified) = counted_widget();
        drop_files(
            &mut widget,
            vec![text("ok-1"), text("bad").failing(), text("ok-2")],
        )
        .await;

        assert_eq!(names(&widget), ["ok-1", "ok-2"]);
        assert_eq!(notified.get(), 1);
        assert_eq!(
            widget.banner().message(),
            Some("Failed to read bad: permission denied")
        );
    }

    #[tokio::test]
    async fn failed_read_does_not_take_a_slot() {
        let (mut widget, _) = counted_widget();
        widget.update_view(&params(2, None));

        let batch = widget
            .begin_batch(vec![text("bad").failing(), text("b"), text("c")])
            .unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(widget.banner().message(), None);

        widget.complete_batch(batch.read().await);
        assert_eq!(names(&widget), ["b", "c"]);
        assert_eq!(
            widget.banner().message(),
            Some("Failed to read bad: permission denied")
        );
    }

    #[tokio::test]
    async fn overflow_is_counted_after_failed_reads() {
        let (mut widget, _) = counted_widget();
        widget.update_view(&params(2, None));
        drop_files(
            &mut widget,
            vec![text("bad").failing(), text("a"), text("b"), text("c")],
        )
        .await;

        assert_eq!(names(&widget), ["a", "b"]);
        assert_eq!(
            widget.banner().message(),
            Some("Some files were not uploaded. Maximum number of files is 2.")
        );
    }

    #[tokio::test]
    async fn new_batch_dismisses_old_banner() {
        let (mut widget, _) = counted_widget();
        widget.update_view(&params(10, Some(".pdf")));
        drop_files(&mut widget, vec![text("x.txt")]).await;
        assert!(widget.banner().message().is_some());

        drop_files(
            &mut widget,
            vec![MemoryFile::new("y.pdf", "application/pdf", b"")],
        )
        .await;
        assert_eq!(widget.banner().message(), None);
    }

    #[tokio::test]
    async fn overlapping_batches_never_exceed_ceiling() {
        let (mut widget, _) = counted_widget();
        widget.update_view(&params(3, None));

        let first = widget.begin_batch(vec![text("a"), text("b")]).unwrap();
        let second = widget.begin_batch(vec![text("c"), text("d")]).unwrap();
        assert_eq!(second.len(), 2);

        let first = first.read().await;
        let second = second.read().await;
        widget.complete_batch(second);
        widget.complete_batch(first);

        assert_eq!(names(&widget), ["c", "d", "a"]);
        assert!(!widget.is_loading());
    }

    #[tokio::test]
    async fn batch_started_before_clear_is_discarded() {
        let (mut widget, notified) = counted_widget();
        drop_files(&mut widget, vec![text("old")]).await;

        let batch = widget.begin_batch(vec![text("late")]).unwrap();
        widget.clear();
        widget.complete_batch(batch.read().await);

        assert!(widget.files().is_empty());
        assert_eq!(notified.get(), 2);
        assert!(!widget.is_loading());
    }

    #[tokio::test]
    async fn reset_token_change_clears_and_notifies() {
        let (mut widget, notified) = counted_widget();
        let mut host = params(10, None);
        host.reset = Some(3.into());
        widget.update_view(&host);
        drop_files(&mut widget, vec![text("a"), text("b")]).await;
        assert_eq!(notified.get(), 1);

        widget.update_view(&host);
        assert_eq!(widget.files().len(), 2, "unchanged token must not clear");

        host.reset = Some(4.into());
        widget.update_view(&host);
        assert!(widget.files().is_empty());
        assert_eq!(notified.get(), 2);
        assert_eq!(widget.outputs().files_json, "[]");
    }

    #[test]
    fn reset_token_change_on_empty_list_is_silent() {
        let (mut widget, notified) = counted_widget();
        let mut host = HostParameters {
            reset: Some(1.into()),
            ..HostParameters::default()
        };
        widget.update_view(&host);
        host.reset = Some(2.into());
        widget.update_view(&host);
        assert_eq!(notified.get(), 0);
    }

    #[tokio::test]
    async fn remove_notifies_only_when_something_changed() {
        let (mut widget, notified) = counted_widget();
        drop_files(&mut widget, vec![text("a"), text("b"), text("c")]).await;

        widget.remove(7);
        assert_eq!(notified.get(), 1);

        widget.remove(1);
        assert_eq!(names(&widget), ["a", "c"]);
        assert_eq!(notified.get(), 2);
    }

    #[tokio::test]
    async fn rename_flow_round_trip() {
        let (mut widget, notified) = counted_widget();
        drop_files(
            &mut widget,
            vec![MemoryFile::new("report.v2.pdf", "application/pdf", b"")],
        )
        .await;

        widget.open_rename(0);
        let session = widget.rename_session().unwrap();
        assert_eq!(session.draft(), "report.v2");
        assert_eq!(session.extension(), ".pdf");

        widget.set_rename_draft("  ");
        assert_eq!(widget.submit_rename(), Some(SubmitOutcome::Invalid));
        assert_eq!(
            widget.rename_session().and_then(RenameSession::error),
            Some(&WidgetError::EmptyName)
        );
        assert_eq!(names(&widget), ["report.v2.pdf"]);

        widget.set_rename_draft("final report");
        assert!(matches!(
            widget.submit_rename(),
            Some(SubmitOutcome::Renamed { .. })
        ));
        assert!(widget.rename_session().is_none());
        assert_eq!(names(&widget), ["final report.pdf"]);
        assert_eq!(notified.get(), 2);
    }

    #[tokio::test]
    async fn cancel_discards_draft() {
        let (mut widget, _) = counted_widget();
        drop_files(&mut widget, vec![text("keep.txt")]).await;

        widget.open_rename(0);
        widget.set_rename_draft("changed");
        widget.cancel_rename();

        assert!(widget.rename_session().is_none());
        assert_eq!(widget.submit_rename(), None);
        assert_eq!(names(&widget), ["keep.txt"]);
    }

    #[test]
    fn open_rename_out_of_range_is_noop() {
        let (mut widget, _) = counted_widget();
        widget.open_rename(0);
        assert!(widget.rename_session().is_none());
    }

    #[tokio::test]
    async fn outputs_mirror_the_list() {
        let (mut widget, _) = counted_widget();
        drop_files(&mut widget, vec![text("a"), text("b")]).await;
        widget.remove(0);

        let parsed: Vec<FileDescriptor> =
            serde_json::from_str(&widget.outputs().files_json).unwrap();
        assert_eq!(parsed, widget.files().files());
    }

    #[tokio::test]
    async fn banner_expires_by_generation() {
        let (mut widget, _) = counted_widget();
        widget.update_view(&params(0, None));
        assert!(widget.begin_batch(vec![text("a")]).is_none());
        assert!(widget.banner().message().is_some());

        // Stale generations are ignored.
        widget.expire_banner(0);
        assert!(widget.banner().message().is_some());

        let current = widget.banner().generation();
        widget.expire_banner(current);
        assert!(widget.banner().message().is_none());
    }

    #[tokio::test]
    async fn dispose_closes_dialog_and_drops_in_flight_reads() {
        let (mut widget, _) = counted_widget();
        drop_files(&mut widget, vec![text("a.txt")]).await;
        widget.open_rename(0);

        let batch = widget.begin_batch(vec![text("b.txt")]).unwrap();
        widget.dispose();
        widget.complete_batch(batch.read().await);

        assert!(widget.rename_session().is_none());
        assert_eq!(widget.banner().message(), None);
        assert_eq!(names(&widget), ["a.txt"]);
    }

    #[test]
    fn summary_pluralizes() {
        assert_eq!(selection_summary(0), "No files selected");
        assert_eq!(selection_summary(1), "1 file selected");
        assert_eq!(selection_summary(12), "12 files selected");
    }
}
