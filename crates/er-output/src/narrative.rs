//! `NarrativeLog<W>` — human-readable live log of a run.
//!
//! ```text
//! [Warning] Road Blocked: 1-2
//!
//! Handling Disaster ID 1 | Node 1 | Type TRANSPORT_ACCIDENT | Urgency 5
//! No available team of type POLICE found for this disaster.
//! Team Assigned: A3 (AMBULANCE) from 3 | Path: 3 1 | Time: 5 [REROUTED]
//! ```

use std::io::Write;

use er_core::NodeId;
use er_dispatch::{AssignmentRecord, Disaster, DispatchObserver, RunStats};

use crate::row::join_path;
use crate::OutputError;

/// A [`DispatchObserver`] writing one line per event to any `Write`.
///
/// The first I/O error is kept and later events are dropped; collect it
/// with [`take_error`][Self::take_error].
pub struct NarrativeLog<W: Write> {
    out:        W,
    last_error: Option<OutputError>,
}

impl<W: Write> NarrativeLog<W> {
    pub fn new(out: W) -> Self {
        Self { out, last_error: None }
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: std::fmt::Arguments<'_>) {
        if self.last_error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(line) {
            self.last_error = Some(OutputError::Io(e));
        }
    }
}

impl<W: Write> DispatchObserver for NarrativeLog<W> {
    fn on_disaster_start(&mut self, d: &Disaster) {
        self.emit(format_args!(
            "\nHandling Disaster ID {} | Node {} | Type {} | Urgency {}\n",
            d.id, d.node, d.kind, d.urgency
        ));
    }

    fn on_record(&mut self, record: &AssignmentRecord) {
        match record.assignment() {
            None => self.emit(format_args!(
                "No available team of type {} found for this disaster.\n",
                record.team_kind
            )),
            Some(a) => {
                let rerouted = if a.rerouted { " [REROUTED]" } else { "" };
                self.emit(format_args!(
                    "Team Assigned: {} ({}) from {} | Path: {} | Time: {}{}\n",
                    a.team_name,
                    record.team_kind,
                    a.team_home,
                    join_path(&a.path),
                    a.travel_time,
                    rerouted
                ));
            }
        }
    }

    fn on_road_blocked(&mut self, u: NodeId, v: NodeId, _found: bool) {
        self.emit(format_args!("[Warning] Road Blocked: {u}-{v}\n"));
    }

    fn on_road_unblocked(&mut self, u: NodeId, v: NodeId, _found: bool) {
        self.emit(format_args!("Road Restored: {u}-{v}\n"));
    }

    fn on_run_end(&mut self, _stats: &RunStats) {
        if let Err(e) = self.out.flush() {
            self.last_error.get_or_insert(OutputError::Io(e));
        }
    }
}
