//! CSV output backend.
//!
//! Creates `assignments.csv` in the configured output directory, one row per
//! assignment record.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AssignmentRow, OutputResult};

pub const ASSIGNMENTS_FILE: &str = "assignments.csv";

/// Writes assignment records to `assignments.csv`.
pub struct CsvWriter {
    assignments: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Create `assignments.csv` in `dir` and write its header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut assignments = Writer::from_path(dir.join(ASSIGNMENTS_FILE))?;
        assignments.write_record([
            "disaster_id",
            "disaster_node",
            "urgency",
            "disaster_kind",
            "team_kind",
            "status",
            "team",
            "team_home",
            "travel_time",
            "rerouted",
            "path",
        ])?;
        Ok(Self { assignments, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_assignments(&mut self, rows: &[AssignmentRow]) -> OutputResult<()> {
        for row in rows {
            // Header already written; serialize would emit it a second time.
            self.assignments.write_record(&[
                row.disaster_id.to_string(),
                row.disaster_node.to_string(),
                row.urgency.to_string(),
                row.disaster_kind.to_owned(),
                row.team_kind.to_owned(),
                row.status.to_owned(),
                row.team.clone(),
                row.team_home.map(|h| h.to_string()).unwrap_or_default(),
                row.travel_time.map(|t| t.to_string()).unwrap_or_default(),
                (row.rerouted as u8).to_string(),
                row.path.clone(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.assignments.flush()?;
        Ok(())
    }
}
