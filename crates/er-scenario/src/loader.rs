//! CSV scenario loaders.
//!
//! # File formats
//!
//! ```csv
//! # edges.csv          teams.csv              disasters.csv
//! u,v,weight           name,kind,home         node,urgency,id,kind
//! 1,2,1                Medic-A,AMBULANCE,3    1,9,1,FIRE_ACCIDENT
//! 2,4,1                Unit-7,POLICE,2        4,5,,TRANSPORT_ACCIDENT
//! ```
//!
//! ```csv
//! # road_events.csv (optional)
//! after,action,u,v
//! 0,block,1,2
//! 3,unblock,1,2
//! ```
//!
//! Kind names are matched case-insensitively; anything unrecognised loads as
//! the `Unknown` kind rather than failing.  A blank disaster `id` means "next
//! free id" and is resolved when the engine is built.  Negative weights are
//! rejected.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use er_core::{Cost, DisasterId, DisasterKind, NodeId, TeamKind};
use er_dispatch::{RoadEvent, Team};

use crate::{ScenarioError, ScenarioResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
pub(crate) struct EdgeRecord {
    pub u:      u32,
    pub v:      u32,
    pub weight: i64,
}

#[derive(Serialize, Deserialize)]
pub(crate) struct TeamRecord {
    pub name: String,
    pub kind: TeamKind,
    pub home: u32,
}

/// One row of `disasters.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisasterRow {
    pub node:    NodeId,
    pub urgency: i32,
    /// `None` → the engine assigns the next free id.
    pub id:      Option<DisasterId>,
    pub kind:    DisasterKind,
}

/// An undirected road as loaded: `(u, v, weight)`.
pub type Road = (NodeId, NodeId, Cost);

// ── Public API ────────────────────────────────────────────────────────────────

pub fn load_edges_csv(path: &Path) -> ScenarioResult<Vec<Road>> {
    load_edges_reader(File::open(path)?)
}

/// Like [`load_edges_csv`] but accepts any `Read` source.
pub fn load_edges_reader<R: Read>(reader: R) -> ScenarioResult<Vec<Road>> {
    let mut rdr = csv_reader(reader);
    let mut roads = Vec::new();

    for (row, result) in rdr.deserialize::<EdgeRecord>().enumerate() {
        let rec = result?;
        let weight = Cost::try_from(rec.weight).map_err(|_| {
            ScenarioError::Parse(format!(
                "edge {}-{} on data row {}: negative weight {}",
                rec.u,
                rec.v,
                row + 1,
                rec.weight
            ))
        })?;
        roads.push((NodeId(rec.u), NodeId(rec.v), weight));
    }
    Ok(roads)
}

pub fn load_teams_csv(path: &Path) -> ScenarioResult<Vec<Team>> {
    load_teams_reader(File::open(path)?)
}

/// Like [`load_teams_csv`] but accepts any `Read` source.  Rows keep file
/// order, which is the dispatch tie-break order.
pub fn load_teams_reader<R: Read>(reader: R) -> ScenarioResult<Vec<Team>> {
    let mut rdr = csv_reader(reader);
    rdr
        .deserialize::<TeamRecord>()
        .map(|result| {
            let rec = result?;
            let name = rec.name.trim();
            if name.is_empty() {
                return Err(ScenarioError::Parse("team with an empty name".into()));
            }
            Ok(Team::new(name, rec.kind, NodeId(rec.home)))
        })
        .collect()
}

pub fn load_disasters_csv(path: &Path) -> ScenarioResult<Vec<DisasterRow>> {
    load_disasters_reader(File::open(path)?)
}

/// Like [`load_disasters_csv`] but accepts any `Read` source.
pub fn load_disasters_reader<R: Read>(reader: R) -> ScenarioResult<Vec<DisasterRow>> {
    let mut rdr = csv_reader(reader);
    let rows = rdr
        .deserialize::<DisasterRow>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn load_road_events_csv(path: &Path) -> ScenarioResult<Vec<RoadEvent>> {
    load_road_events_reader(File::open(path)?)
}

/// Like [`load_road_events_csv`] but accepts any `Read` source.
pub fn load_road_events_reader<R: Read>(reader: R) -> ScenarioResult<Vec<RoadEvent>> {
    let mut rdr = csv_reader(reader);
    let events = rdr
        .deserialize::<RoadEvent>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(events)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Headers required; whitespace around fields is ignored.
fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader)
}
