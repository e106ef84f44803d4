//! Assignment records and run-level counters.

use serde::Serialize;

use er_core::{Cost, DisasterId, DisasterKind, NodeId, TeamKind};

use crate::Disaster;

/// A successful match of one team to one requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub team_name:   String,
    pub team_home:   NodeId,
    pub travel_time: Cost,
    /// Live-network route, team home first, disaster site last.
    pub path:        Vec<NodeId>,
    /// The live route differs from the route the undamaged network would give.
    pub rerouted:    bool,
}

/// Result of trying to satisfy one required team kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Assigned(Assignment),
    /// No available team of the kind exists, or none is reachable.
    Unreachable,
}

/// Immutable log entry for one (disaster, required team kind) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentRecord {
    pub disaster_id:   DisasterId,
    pub disaster_node: NodeId,
    pub urgency:       i32,
    pub disaster_kind: DisasterKind,
    pub team_kind:     TeamKind,
    pub outcome:       Outcome,
}

impl AssignmentRecord {
    pub(crate) fn new(disaster: &Disaster, team_kind: TeamKind, outcome: Outcome) -> Self {
        Self {
            disaster_id:   disaster.id,
            disaster_node: disaster.node,
            urgency:       disaster.urgency,
            disaster_kind: disaster.kind,
            team_kind,
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Assigned(_))
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match &self.outcome {
            Outcome::Assigned(a) => Some(a),
            Outcome::Unreachable => None,
        }
    }

    /// Chosen team's name, or `"NONE"` when unreachable.
    pub fn team_name(&self) -> &str {
        self.assignment().map_or("NONE", |a| a.team_name.as_str())
    }

    pub fn is_rerouted(&self) -> bool {
        self.assignment().is_some_and(|a| a.rerouted)
    }
}

/// Counters owned by one engine for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Successful assignments.
    pub handled:       usize,
    /// "No team reachable" outcomes.
    pub unreachable:   usize,
    /// Block requests applied to the network (including ones that matched
    /// no road).
    pub blocked_roads: usize,
    /// Travel time of every successful assignment, in record order.
    pub travel_times:  Vec<Cost>,
}

impl RunStats {
    /// Mean travel time over successful assignments; `0.0` if there were none.
    pub fn average_travel_time(&self) -> f64 {
        if self.travel_times.is_empty() {
            return 0.0;
        }
        let sum: u128 = self.travel_times.iter().map(|&t| t as u128).sum();
        sum as f64 / self.travel_times.len() as f64
    }
}
