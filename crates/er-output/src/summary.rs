//! `RunSummary` — the end-of-run report.
//!
//! The plain-text form (via `Display`):
//!
//! ```text
//! === DISASTER RESPONSE REPORT ===
//! Total disasters handled: 1
//! Unreachable locations: 1
//! Blocked roads: 1
//!
//! Average response time: 5.00
//!
//! Detailed Assignments:
//! [1] Node 1 | Type: TRANSPORT_ACCIDENT | Team: NONE (POLICE) -> UNREACHABLE
//! [2] Node 1 | Type: TRANSPORT_ACCIDENT | Team: A3 (AMBULANCE) | Time: 5 | Path: 3 1 [REROUTED]
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use er_dispatch::{AssignmentRecord, DispatchEngine, RunStats};
use er_network::Router;

use crate::row::join_path;
use crate::OutputResult;

pub const REPORT_FILE:  &str = "report.txt";
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Successful assignments.
    pub handled:             usize,
    pub unreachable:         usize,
    pub blocked_roads:       usize,
    pub average_travel_time: f64,
    pub records:             Vec<AssignmentRecord>,
}

impl RunSummary {
    pub fn new(records: &[AssignmentRecord], stats: &RunStats) -> Self {
        Self {
            handled:             stats.handled,
            unreachable:         stats.unreachable,
            blocked_roads:       stats.blocked_roads,
            average_travel_time: stats.average_travel_time(),
            records:             records.to_vec(),
        }
    }

    pub fn from_engine<R: Router>(engine: &DispatchEngine<R>) -> Self {
        Self::new(engine.records(), engine.stats())
    }

    /// Write the plain-text report to `path`.
    pub fn write_report(&self, path: &Path) -> OutputResult<()> {
        let mut out = BufWriter::new(File::create(path)?);
        write!(out, "{self}")?;
        out.flush()?;
        Ok(())
    }

    /// Write the summary, records included, as pretty JSON to `path`.
    pub fn write_summary_json(&self, path: &Path) -> OutputResult<()> {
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut out, self)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== DISASTER RESPONSE REPORT ===")?;
        writeln!(f, "Total disasters handled: {}", self.handled)?;
        writeln!(f, "Unreachable locations: {}", self.unreachable)?;
        writeln!(f, "Blocked roads: {}", self.blocked_roads)?;
        writeln!(f)?;
        writeln!(f, "Average response time: {:.2}", self.average_travel_time)?;
        writeln!(f)?;
        writeln!(f, "Detailed Assignments:")?;

        for (i, record) in self.records.iter().enumerate() {
            write!(
                f,
                "[{}] Node {} | Type: {} | Team: {} ({})",
                i + 1,
                record.disaster_node,
                record.disaster_kind,
                record.team_name(),
                record.team_kind,
            )?;
            match record.assignment() {
                None => writeln!(f, " -> UNREACHABLE")?,
                Some(a) => {
                    write!(f, " | Time: {} | Path: {}", a.travel_time, join_path(&a.path))?;
                    if a.rerouted {
                        write!(f, " [REROUTED]")?;
                    }
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}
