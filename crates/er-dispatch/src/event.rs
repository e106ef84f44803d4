//! Scheduled road damage and repair.

use serde::{Deserialize, Serialize};

use er_core::NodeId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadAction {
    Block,
    Unblock,
}

/// A block or unblock that fires once `after` disasters have been fully
/// processed.  `after = 0` fires before the first disaster.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadEvent {
    pub after:  usize,
    pub action: RoadAction,
    pub u:      NodeId,
    pub v:      NodeId,
}

impl RoadEvent {
    pub fn block(after: usize, u: NodeId, v: NodeId) -> Self {
        Self { after, action: RoadAction::Block, u, v }
    }

    pub fn unblock(after: usize, u: NodeId, v: NodeId) -> Self {
        Self { after, action: RoadAction::Unblock, u, v }
    }
}
