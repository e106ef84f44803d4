//! `OutputWriter` trait — backend-agnostic interface for tabular output.

use crate::{AssignmentRow, OutputResult};

/// A sink for assignment rows.
///
/// Implementors are driven by [`RecordObserver`][crate::RecordObserver] as
/// records are produced, or fed a finished run in one call.
pub trait OutputWriter {
    fn write_assignments(&mut self, rows: &[AssignmentRow]) -> OutputResult<()>;

    /// Flush buffers.  Called once after the last row; further calls are
    /// no-ops.
    fn finish(&mut self) -> OutputResult<()>;
}
