//! Flat row type for tabular output.

use er_dispatch::AssignmentRecord;

/// One assignment record, flattened for CSV.
///
/// Unreachable rows carry team `"NONE"`, an empty `team_home`, an empty
/// `travel_time`, and an empty `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRow {
    pub disaster_id:   u32,
    pub disaster_node: u32,
    pub urgency:       i32,
    pub disaster_kind: &'static str,
    pub team_kind:     &'static str,
    pub status:        &'static str,
    pub team:          String,
    pub team_home:     Option<u32>,
    pub travel_time:   Option<u64>,
    pub rerouted:      bool,
    /// Space-separated node ids, team home first.
    pub path:          String,
}

impl From<&AssignmentRecord> for AssignmentRow {
    fn from(record: &AssignmentRecord) -> Self {
        let assignment = record.assignment();
        Self {
            disaster_id:   record.disaster_id.0,
            disaster_node: record.disaster_node.0,
            urgency:       record.urgency,
            disaster_kind: record.disaster_kind.as_str(),
            team_kind:     record.team_kind.as_str(),
            status:        if assignment.is_some() { "assigned" } else { "unreachable" },
            team:          record.team_name().to_owned(),
            team_home:     assignment.map(|a| a.team_home.0),
            travel_time:   assignment.map(|a| a.travel_time),
            rerouted:      record.is_rerouted(),
            path:          assignment.map(|a| join_path(&a.path)).unwrap_or_default(),
        }
    }
}

pub(crate) fn join_path(path: &[er_core::NodeId]) -> String {
    path.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}
