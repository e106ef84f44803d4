//! `er-output` — report and data output for dispatch runs.
//!
//! | Output           | Produced by                               | File             |
//! |------------------|-------------------------------------------|------------------|
//! | Text report      | [`RunSummary`] (`Display`)                | `report.txt`     |
//! | JSON summary     | [`RunSummary::write_summary_json`]        | `summary.json`   |
//! | Assignment table | [`CsvWriter`] via [`RecordObserver`]      | `assignments.csv`|
//! | Live log         | [`NarrativeLog`]                          | caller's choice  |
//!
//! # Usage
//!
//! ```rust,ignore
//! use er_output::{CsvWriter, RecordObserver, RunSummary};
//!
//! let mut obs = RecordObserver::new(CsvWriter::new(out_dir)?);
//! engine.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! RunSummary::from_engine(&engine).write_report(&out_dir.join("report.txt"))?;
//! ```
//!
//! A pair `(a, b)` of observers is itself an observer, so one run can feed
//! several sinks.

pub mod csv;
pub mod error;
pub mod narrative;
pub mod observer;
pub mod row;
pub mod summary;
pub mod writer;


pub use self::csv::{ASSIGNMENTS_FILE, CsvWriter};
pub use error::{OutputError, OutputResult};
pub use narrative::NarrativeLog;
pub use observer::RecordObserver;
pub use row::AssignmentRow;
pub use summary::{REPORT_FILE, RunSummary, SUMMARY_FILE};
pub use writer::OutputWriter;
