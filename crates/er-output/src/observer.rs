//! `RecordObserver<W>` — bridges `DispatchObserver` to an `OutputWriter`.

use er_dispatch::{AssignmentRecord, DispatchObserver, RunStats};

use crate::writer::OutputWriter;
use crate::{AssignmentRow, OutputError, OutputResult};

/// A [`DispatchObserver`] that streams every record to an [`OutputWriter`]
/// as it is produced, and finishes the writer when the run ends.
///
/// Observer methods cannot return errors, so the first write error is
/// stored; check [`take_error`][Self::take_error] after the run.
pub struct RecordObserver<W: OutputWriter> {
    writer:     W,
    rows:       usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RecordObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows handed to the writer so far.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> DispatchObserver for RecordObserver<W> {
    fn on_record(&mut self, record: &AssignmentRecord) {
        let row = AssignmentRow::from(record);
        let result = self.writer.write_assignments(std::slice::from_ref(&row));
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn on_run_end(&mut self, _stats: &RunStats) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
