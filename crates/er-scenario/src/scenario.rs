//! `Scenario` — everything one dispatch run needs, before it becomes an
//! engine.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use er_core::DispatchConfig;
use er_dispatch::{BatchJob, Disaster, DispatchEngine, RoadEvent, Team};
use er_network::{DijkstraRouter, RoadNetworkBuilder};

use crate::loader::{
    DisasterRow, EdgeRecord, Road, TeamRecord, load_disasters_csv, load_edges_csv,
    load_road_events_csv, load_teams_csv,
};
use crate::{ScenarioError, ScenarioResult};

pub const EDGES_FILE:       &str = "edges.csv";
pub const TEAMS_FILE:       &str = "teams.csv";
pub const DISASTERS_FILE:   &str = "disasters.csv";
pub const ROAD_EVENTS_FILE: &str = "road_events.csv";

/// Largest node count [`Scenario::into_engine`] will infer from the input.
/// Larger networks need an explicit `node_count` in the config.
pub const MAX_INFERRED_NODES: u32 = 1_000_000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    pub roads:     Vec<Road>,
    /// Registration order is the dispatch tie-break order.
    pub teams:     Vec<Team>,
    pub disasters: Vec<DisasterRow>,
    pub events:    Vec<RoadEvent>,
}

impl Scenario {
    /// Load `edges.csv`, `teams.csv`, `disasters.csv` and, if present,
    /// `road_events.csv` from `dir`.
    pub fn load_dir(dir: &Path) -> ScenarioResult<Self> {
        let roads = load_edges_csv(&dir.join(EDGES_FILE))?;
        let teams = load_teams_csv(&dir.join(TEAMS_FILE))?;
        let disasters = load_disasters_csv(&dir.join(DISASTERS_FILE))?;

        let events_path = dir.join(ROAD_EVENTS_FILE);
        let events = if events_path.exists() {
            load_road_events_csv(&events_path)?
        } else {
            Vec::new()
        };

        tracing::info!(
            dir = %dir.display(),
            roads = roads.len(),
            teams = teams.len(),
            disasters = disasters.len(),
            events = events.len(),
            "scenario loaded",
        );
        Ok(Self { roads, teams, disasters, events })
    }

    /// Write the scenario as CSVs into `dir` (created if missing).
    /// `road_events.csv` is only written when there are events.
    pub fn write_dir(&self, dir: &Path) -> ScenarioResult<()> {
        std::fs::create_dir_all(dir)?;

        write_rows(
            &dir.join(EDGES_FILE),
            self.roads.iter().map(|&(u, v, w)| EdgeRecord {
                u:      u.0,
                v:      v.0,
                weight: i64::try_from(w).unwrap_or(i64::MAX),
            }),
        )?;
        write_rows(
            &dir.join(TEAMS_FILE),
            self.teams.iter().map(|t| TeamRecord { name: t.name.clone(), kind: t.kind, home: t.home.0 }),
        )?;
        write_rows(&dir.join(DISASTERS_FILE), self.disasters.iter())?;
        if !self.events.is_empty() {
            write_rows(&dir.join(ROAD_EVENTS_FILE), self.events.iter())?;
        }
        Ok(())
    }

    /// Largest node id mentioned by any road, team home or disaster site.
    pub fn max_node(&self) -> u32 {
        let roads = self.roads.iter().flat_map(|&(u, v, _)| [u, v]);
        let homes = self.teams.iter().map(|t| t.home);
        let sites = self.disasters.iter().map(|d| d.node);
        roads
            .chain(homes)
            .chain(sites)
            .filter(|n| n.is_valid())
            .map(|n| n.0)
            .max()
            .unwrap_or(0)
    }

    /// Build a ready-to-run engine and hand back the road-event schedule.
    ///
    /// The node count is `config.node_count` if set, otherwise
    /// [`max_node`](Self::max_node), which must not exceed
    /// [`MAX_INFERRED_NODES`].  Disasters with an explicit id are queued
    /// first; the rest get fresh ids above them, in file order.
    pub fn into_engine(self, config: DispatchConfig) -> ScenarioResult<(DispatchEngine, Vec<RoadEvent>)> {
        let node_count = match config.node_count {
            Some(n) => n,
            None => {
                let max = self.max_node();
                if max > MAX_INFERRED_NODES {
                    return Err(ScenarioError::Parse(format!(
                        "node id {max} exceeds {MAX_INFERRED_NODES}; set node_count in the config for larger networks"
                    )));
                }
                max
            }
        };
        let network = RoadNetworkBuilder::new(node_count)
            .validation(config.validation)
            .roads(self.roads)
            .build()?;
        if network.dropped_edges() > 0 {
            tracing::warn!(dropped = network.dropped_edges(), node_count, "roads outside the network were ignored");
        }

        let mut engine = DispatchEngine::new(config, network);
        for team in self.teams {
            engine.add_team(team)?;
        }

        let (with_id, without_id): (Vec<_>, Vec<_>) =
            self.disasters.into_iter().partition(|d| d.id.is_some());
        for row in with_id {
            if let Some(id) = row.id {
                engine.push_disaster(Disaster::new(id, row.node, row.urgency, row.kind))?;
            }
        }
        for row in without_id {
            engine.submit(row.node, row.urgency, row.kind)?;
        }

        Ok((engine, self.events))
    }

    /// [`into_engine`](Self::into_engine) packaged for
    /// [`er_dispatch::run_jobs`].
    pub fn into_job(self, config: DispatchConfig) -> ScenarioResult<BatchJob<DijkstraRouter>> {
        let (engine, events) = self.into_engine(config)?;
        Ok(BatchJob { engine, events })
    }
}

fn write_rows<T: Serialize>(path: &Path, rows: impl IntoIterator<Item = T>) -> ScenarioResult<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
