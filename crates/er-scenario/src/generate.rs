//! Seeded random scenarios for stress tests and the `generate` subcommand.
//!
//! The network is a ring `1 → 2 → … → N → 1` (so it starts connected) plus
//! random chords.  Each part draws from its own [`ScenarioRng::child`]
//! stream, so asking for more disasters does not change the network or the
//! teams.

use er_core::{Cost, DisasterId, DisasterKind, NodeId, ScenarioRng, TeamKind};
use er_dispatch::{RoadEvent, Team};

use crate::{DisasterRow, Road, Scenario};

const NETWORK_STREAM:   u64 = 1;
const TEAM_STREAM:      u64 = 2;
const DISASTER_STREAM:  u64 = 3;
const EVENT_STREAM:     u64 = 4;

/// Team kinds a generated scenario staffs.
const STAFFED: [TeamKind; 5] = [
    TeamKind::Police,
    TeamKind::Ambulance,
    TeamKind::FireTruck,
    TeamKind::FoodTruck,
    TeamKind::Ndrf,
];

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorParams {
    pub nodes:          u32,
    /// Extra random roads on top of the ring.
    pub chords:         usize,
    /// Road weights are drawn from `1..=max_weight`.
    pub max_weight:     Cost,
    pub teams_per_kind: usize,
    pub disasters:      usize,
    /// Urgencies are drawn from `1..=max_urgency`.
    pub max_urgency:    i32,
    /// Number of roads that get blocked during the run.
    pub blocked_roads:  usize,
    /// Chance that a blocked road is restored later in the run.
    pub repair_chance:  f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            nodes:          50,
            chords:         75,
            max_weight:     20,
            teams_per_kind: 3,
            disasters:      25,
            max_urgency:    10,
            blocked_roads:  5,
            repair_chance:  0.5,
        }
    }
}

/// Build a reproducible random scenario.  Same `params` and `seed`, same
/// scenario.
pub fn random_scenario(params: &GeneratorParams, seed: u64) -> Scenario {
    let mut root = ScenarioRng::new(seed);
    let mut net_rng = root.child(NETWORK_STREAM);
    let mut team_rng = root.child(TEAM_STREAM);
    let mut disaster_rng = root.child(DISASTER_STREAM);
    let mut event_rng = root.child(EVENT_STREAM);

    let n = params.nodes;
    let max_weight = params.max_weight.max(1);

    // ── Roads ─────────────────────────────────────────────────────────────
    let mut roads: Vec<Road> = Vec::with_capacity(n as usize + params.chords);
    if n >= 2 {
        for u in 1..=n {
            let v = u % n + 1;
            roads.push((NodeId(u), NodeId(v), net_rng.gen_range(1..=max_weight)));
        }
        for _ in 0..params.chords {
            let u = net_rng.gen_range(1..=n);
            let v = net_rng.gen_range(1..=n);
            if u != v {
                roads.push((NodeId(u), NodeId(v), net_rng.gen_range(1..=max_weight)));
            }
        }
    }

    let random_node = |rng: &mut ScenarioRng| NodeId(rng.gen_range(1..=n.max(1)));

    // ── Teams ─────────────────────────────────────────────────────────────
    let mut teams = Vec::with_capacity(STAFFED.len() * params.teams_per_kind);
    for kind in STAFFED {
        for i in 1..=params.teams_per_kind {
            teams.push(Team::new(format!("{kind}-{i}"), kind, random_node(&mut team_rng)));
        }
    }

    // ── Disasters ─────────────────────────────────────────────────────────
    let max_urgency = params.max_urgency.max(1);
    let disasters = (1..=params.disasters)
        .map(|i| DisasterRow {
            node:    random_node(&mut disaster_rng),
            urgency: disaster_rng.gen_range(1..=max_urgency),
            id:      Some(DisasterId(i as u32)),
            kind:    *disaster_rng.choose(&DisasterKind::ALL).unwrap_or(&DisasterKind::Unknown),
        })
        .collect();

    // ── Road events ───────────────────────────────────────────────────────
    let mut events = Vec::new();
    for _ in 0..params.blocked_roads {
        let Some(&(u, v, _)) = event_rng.choose(&roads) else {
            break;
        };
        let after = event_rng.gen_range(0..=params.disasters);
        events.push(RoadEvent::block(after, u, v));
        if event_rng.gen_bool(params.repair_chance) {
            let repaired = event_rng.gen_range(after..=params.disasters + 1);
            events.push(RoadEvent::unblock(repaired, u, v));
        }
    }
    events.sort_by_key(|e| e.after);

    tracing::debug!(
        seed,
        roads = roads.len(),
        teams = teams.len(),
        events = events.len(),
        "generated scenario",
    );
    Scenario { roads, teams, disasters, events }
}
