//! Unit tests for er-dispatch.
//!
//! Most engine tests run on the four-node diamond:
//!
//! ```text
//!   1 ──1── 2
//!   │       │
//!   5       1
//!   │       │
//!   3 ──1── 4
//! ```
//!
//! Intact, from node 1: d(2)=1, d(4)=2, d(3)=3 (via 2→4).
//! With 1–2 blocked:    d(3)=5 (direct), d(4)=6 (via 3).

#[cfg(test)]
mod helpers {
    use er_core::{DispatchConfig, DisasterId, DisasterKind, NodeId, TeamKind};
    use er_network::{RoadNetwork, RoadNetworkBuilder};

    use crate::{Disaster, DispatchEngine, Team};

    pub fn n(id: u32) -> NodeId {
        NodeId(id)
    }

    pub fn diamond() -> RoadNetwork {
        RoadNetworkBuilder::new(4)
            .road(n(1), n(2), 1)
            .road(n(2), n(4), 1)
            .road(n(1), n(3), 5)
            .road(n(3), n(4), 1)
            .build()
            .unwrap()
    }

    pub fn disaster(id: u32, node: u32, urgency: i32, kind: DisasterKind) -> Disaster {
        Disaster::new(DisasterId(id), n(node), urgency, kind)
    }

    pub fn team(name: &str, kind: TeamKind, home: u32) -> Team {
        Team::new(name, kind, n(home))
    }

    /// Diamond engine with ambulances at node 3 ("A3") then node 4 ("A4").
    pub fn two_ambulances() -> DispatchEngine {
        let mut engine = DispatchEngine::new(DispatchConfig::default(), diamond());
        engine.add_team(team("A3", TeamKind::Ambulance, 3)).unwrap();
        engine.add_team(team("A4", TeamKind::Ambulance, 4)).unwrap();
        engine
    }

    pub fn path(ids: &[u32]) -> Vec<NodeId> {
        ids.iter().map(|&i| NodeId(i)).collect()
    }
}

// ── DisasterQueue ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use er_core::{DisasterId, DisasterKind};

    use super::helpers::{disaster, n};
    use crate::DisasterQueue;

    #[test]
    fn urgency_desc_then_id_asc() {
        let mut q = DisasterQueue::new();
        for (id, urgency) in [(1, 5), (2, 9), (3, 9), (4, 3)] {
            q.push(disaster(id, 1, urgency, DisasterKind::FireAccident));
        }
        let order: Vec<u32> = std::iter::from_fn(|| q.pop()).map(|d| d.id.0).collect();
        assert_eq!(order, vec![2, 3, 1, 4]);
    }

    #[test]
    fn empty_pop_is_none() {
        let mut q = DisasterQueue::new();
        assert!(q.is_empty());
        assert!(q.pop().is_none());
        assert!(q.peek().is_none());
    }

    #[test]
    fn submit_hands_out_ids_above_pushed_ones() {
        let mut q = DisasterQueue::new();
        let first = q.submit(n(1), 1, DisasterKind::Unknown);
        assert_eq!(first, DisasterId(1));
        q.push(disaster(10, 1, 1, DisasterKind::Unknown));
        let next = q.submit(n(1), 1, DisasterKind::Unknown);
        assert_eq!(next, DisasterId(11));
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn negative_urgency_is_served_last() {
        let mut q = DisasterQueue::new();
        q.push(disaster(1, 1, -3, DisasterKind::Unknown));
        q.push(disaster(2, 1, 0, DisasterKind::Unknown));
        assert_eq!(q.peek().unwrap().id, DisasterId(2));
    }
}

// ── TeamRegistry ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use er_core::TeamKind;

    use super::helpers::{n, team};
    use crate::TeamRegistry;

    #[test]
    fn keeps_insertion_order() {
        let mut reg = TeamRegistry::new();
        reg.add(team("b", TeamKind::Police, 1));
        reg.add(team("a", TeamKind::Police, 2));
        let names: Vec<&str> = reg.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(reg.position("a"), Some(1));
    }

    #[test]
    fn re_adding_a_name_replaces_in_place() {
        let mut reg = TeamRegistry::new();
        reg.add(team("x", TeamKind::Police, 1));
        reg.add(team("y", TeamKind::Police, 2));
        let old = reg.add(team("x", TeamKind::Ambulance, 3)).unwrap();
        assert_eq!(old.home, n(1));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.position("x"), Some(0));
        assert_eq!(reg.get("x").unwrap().kind, TeamKind::Ambulance);
    }

    #[test]
    fn set_available_by_name() {
        let mut reg = TeamRegistry::new();
        reg.add(team("x", TeamKind::Police, 1));
        assert!(reg.set_available("x", false));
        assert!(!reg.set_available("nobody", false));
        assert_eq!(reg.availability(), vec![false]);
    }
}

// ── Matching ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod matching {
    use er_core::{DispatchConfig, DisasterKind, TeamKind};

    use super::helpers::{diamond, disaster, n, path, team, two_ambulances};
    use crate::{DispatchEngine, DispatchPhase, NoopObserver, Outcome};

    #[test]
    fn nearer_team_wins_over_registry_order() {
        let mut engine = two_ambulances();
        engine.push_disaster(disaster(1, 1, 5, DisasterKind::TransportAccident)).unwrap();
        engine.run(&mut NoopObserver);

        let records = engine.records();
        assert_eq!(records.len(), 2);

        // Police first, and there is none.
        assert_eq!(records[0].team_kind, TeamKind::Police);
        assert_eq!(records[0].outcome, Outcome::Unreachable);
        assert_eq!(records[0].team_name(), "NONE");

        let a = records[1].assignment().unwrap();
        assert_eq!(records[1].team_kind, TeamKind::Ambulance);
        assert_eq!(a.team_name, "A4");
        assert_eq!(a.travel_time, 2);
        assert_eq!(a.path, path(&[4, 2, 1]));
        assert!(!a.rerouted);

        let stats = engine.stats();
        assert_eq!(stats.handled, 1);
        assert_eq!(stats.unreachable, 1);
        assert_eq!(engine.phase(), DispatchPhase::Idle);
    }

    #[test]
    fn block_moves_choice_and_flags_reroute() {
        let mut engine = two_ambulances();
        assert!(engine.block_edge(n(1), n(2)));
        engine.push_disaster(disaster(1, 1, 5, DisasterKind::TransportAccident)).unwrap();
        engine.run(&mut NoopObserver);

        let a = engine.records()[1].assignment().unwrap();
        assert_eq!(a.team_name, "A3");
        assert_eq!(a.travel_time, 5);
        assert_eq!(a.path, path(&[3, 1]));
        // Undamaged route from 3 was 3→4→2→1.
        assert!(a.rerouted);
        assert_eq!(engine.stats().blocked_roads, 1);
    }

    #[test]
    fn detour_through_block_is_rerouted() {
        let mut engine = DispatchEngine::new(DispatchConfig::default(), diamond());
        engine.add_team(team("A4", TeamKind::Ambulance, 4)).unwrap();
        engine.block_edge(n(1), n(2));
        engine.push_disaster(disaster(1, 1, 5, DisasterKind::Unknown)).unwrap();
        engine.run(&mut NoopObserver);

        let a = engine.records()[0].assignment().unwrap();
        assert_eq!(a.travel_time, 6);
        assert_eq!(a.path, path(&[4, 3, 1]));
        assert!(a.rerouted);
    }

    #[test]
    fn reroute_detection_can_be_disabled() {
        let config = DispatchConfig { detect_reroutes: false, ..DispatchConfig::default() };
        let mut engine = DispatchEngine::new(config, diamond());
        engine.add_team(team("A4", TeamKind::Ambulance, 4)).unwrap();
        engine.block_edge(n(1), n(2));
        engine.push_disaster(disaster(1, 1, 5, DisasterKind::Unknown)).unwrap();
        engine.run(&mut NoopObserver);

        assert!(!engine.records()[0].is_rerouted());
    }

    #[test]
    fn equal_distance_goes_to_first_registered() {
        // Both homes are 1 away from node 2.
        let mut engine = DispatchEngine::new(DispatchConfig::default(), diamond());
        engine.add_team(team("first", TeamKind::Ambulance, 4)).unwrap();
        engine.add_team(team("second", TeamKind::Ambulance, 1)).unwrap();
        engine.push_disaster(disaster(1, 2, 5, DisasterKind::Unknown)).unwrap();
        engine.run(&mut NoopObserver);

        assert_eq!(engine.records()[0].team_name(), "first");
    }

    #[test]
    fn team_at_the_site_travels_zero() {
        let mut engine = DispatchEngine::new(DispatchConfig::default(), diamond());
        engine.add_team(team("here", TeamKind::Ambulance, 1)).unwrap();
        engine.push_disaster(disaster(1, 1, 5, DisasterKind::Unknown)).unwrap();
        engine.run(&mut NoopObserver);

        let a = engine.records()[0].assignment().unwrap();
        assert_eq!(a.travel_time, 0);
        assert_eq!(a.path, path(&[1]));
    }

    #[test]
    fn isolated_team_is_unreachable() {
        let mut engine = DispatchEngine::new(DispatchConfig::default(), diamond());
        engine.block_edge(n(1), n(2));
        engine.block_edge(n(1), n(3));
        engine.add_team(team("A4", TeamKind::Ambulance, 4)).unwrap();
        engine.push_disaster(disaster(1, 1, 5, DisasterKind::Unknown)).unwrap();
        engine.run(&mut NoopObserver);

        assert_eq!(engine.records()[0].outcome, Outcome::Unreachable);
        assert_eq!(engine.stats().unreachable, 1);
        assert_eq!(engine.stats().blocked_roads, 2);
    }

    #[test]
    fn blocking_a_non_road_still_counts() {
        let mut engine = two_ambulances();
        assert!(!engine.block_edge(n(1), n(4)));
        assert_eq!(engine.stats().blocked_roads, 1);
    }

    #[test]
    fn unavailable_team_is_skipped() {
        let mut engine = DispatchEngine::new(DispatchConfig::default(), diamond());
        let mut busy = team("busy", TeamKind::Ambulance, 2);
        busy.available = false;
        engine.add_team(busy).unwrap();
        engine.add_team(team("far", TeamKind::Ambulance, 3)).unwrap();
        engine.push_disaster(disaster(1, 1, 5, DisasterKind::Unknown)).unwrap();
        engine.run(&mut NoopObserver);

        assert_eq!(engine.records()[0].team_name(), "far");
    }

    #[test]
    fn one_record_per_required_kind_in_table_order() {
        let mut engine = two_ambulances();
        engine.push_disaster(disaster(1, 1, 5, DisasterKind::BuildingCollapse)).unwrap();
        engine.run(&mut NoopObserver);

        let kinds: Vec<TeamKind> = engine.records().iter().map(|r| r.team_kind).collect();
        assert_eq!(kinds, vec![TeamKind::Ndrf, TeamKind::Ambulance, TeamKind::FoodTruck]);
    }

    #[test]
    fn same_team_serves_consecutive_disasters() {
        let mut engine = DispatchEngine::new(DispatchConfig::default(), diamond());
        engine.add_team(team("solo", TeamKind::Ambulance, 2)).unwrap();
        engine.push_disaster(disaster(1, 1, 9, DisasterKind::Unknown)).unwrap();
        engine.push_disaster(disaster(2, 4, 1, DisasterKind::Unknown)).unwrap();
        engine.run(&mut NoopObserver);

        let names: Vec<&str> = engine.records().iter().map(|r| r.team_name()).collect();
        assert_eq!(names, vec!["solo", "solo"]);
        assert_eq!(engine.teams().availability(), vec![true]);
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_loop {
    use er_core::{DisasterId, DisasterKind, NodeId};

    use super::helpers::{disaster, n, two_ambulances};
    use crate::{
        AssignmentRecord, Disaster, DispatchObserver, NoopObserver, RoadEvent, RunStats,
    };

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl DispatchObserver for Trace {
        fn on_disaster_start(&mut self, d: &Disaster) {
            self.0.push(format!("start {}", d.id));
        }
        fn on_record(&mut self, r: &AssignmentRecord) {
            self.0.push(format!("record {} {}", r.team_kind, r.team_name()));
        }
        fn on_disaster_end(&mut self, d: &Disaster) {
            self.0.push(format!("end {}", d.id));
        }
        fn on_road_blocked(&mut self, u: NodeId, v: NodeId, found: bool) {
            self.0.push(format!("block {u}-{v} {found}"));
        }
        fn on_road_unblocked(&mut self, u: NodeId, v: NodeId, found: bool) {
            self.0.push(format!("unblock {u}-{v} {found}"));
        }
        fn on_run_end(&mut self, stats: &RunStats) {
            self.0.push(format!("done {}", stats.handled));
        }
    }

    #[test]
    fn step_processes_one_disaster() {
        let mut engine = two_ambulances();
        engine.push_disaster(disaster(1, 1, 1, DisasterKind::Unknown)).unwrap();
        engine.push_disaster(disaster(2, 1, 7, DisasterKind::Unknown)).unwrap();

        assert_eq!(engine.step(&mut NoopObserver), Some(DisasterId(2)));
        assert_eq!(engine.processed(), 1);
        assert_eq!(engine.pending(), 1);
        assert_eq!(engine.step(&mut NoopObserver), Some(DisasterId(1)));
        assert_eq!(engine.step(&mut NoopObserver), None);
    }

    #[test]
    fn observer_sees_hooks_in_order() {
        let mut engine = two_ambulances();
        engine.push_disaster(disaster(1, 1, 1, DisasterKind::Unknown)).unwrap();
        let mut trace = Trace::default();
        engine.run(&mut trace);

        assert_eq!(trace.0, vec!["start 1", "record AMBULANCE A4", "end 1", "done 1"]);
    }

    #[test]
    fn events_fire_between_disasters() {
        let mut engine = two_ambulances();
        engine.push_disaster(disaster(1, 1, 9, DisasterKind::Unknown)).unwrap();
        engine.push_disaster(disaster(2, 1, 5, DisasterKind::Unknown)).unwrap();
        let events = [
            RoadEvent::unblock(5, n(1), n(2)),
            RoadEvent::block(1, n(1), n(2)),
        ];
        let mut trace = Trace::default();
        engine.run_with_events(&events, &mut trace);

        assert_eq!(
            trace.0,
            vec![
                "start 1",
                "record AMBULANCE A4",
                "end 1",
                "block 1-2 true",
                "start 2",
                "record AMBULANCE A3",
                "end 2",
                "unblock 1-2 true",
                "done 2",
            ]
        );
        assert!(!engine.records()[0].is_rerouted());
        assert!(engine.records()[1].is_rerouted());
        assert!(!engine.network().is_blocked(n(1), n(2)));
    }

    #[test]
    fn after_zero_fires_before_the_first_disaster() {
        let mut engine = two_ambulances();
        engine.push_disaster(disaster(1, 1, 9, DisasterKind::Unknown)).unwrap();
        engine.run_with_events(&[RoadEvent::block(0, n(1), n(2))], &mut NoopObserver);

        assert_eq!(engine.records()[0].team_name(), "A3");
    }

    #[test]
    fn average_travel_time_over_successes_only() {
        let mut engine = two_ambulances();
        // Ambulance from A4 at distance 2, police unreachable.
        engine.push_disaster(disaster(1, 1, 9, DisasterKind::TransportAccident)).unwrap();
        // Ambulance from A3 at distance 0.
        engine.push_disaster(disaster(2, 3, 1, DisasterKind::Unknown)).unwrap();
        engine.run(&mut NoopObserver);

        let (records, stats) = engine.into_results();
        assert_eq!(records.len(), 3);
        assert_eq!(stats.travel_times, vec![2, 0]);
        assert!((stats.average_travel_time() - 1.0).abs() < 1e-9);
        assert_eq!(RunStats::default().average_travel_time(), 0.0);
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use er_core::{DispatchConfig, DisasterKind, TeamKind};

    use super::helpers::{diamond, disaster, n, team};
    use crate::{DispatchEngine, DispatchEngineBuilder, DispatchError, NoopObserver, Outcome};

    #[test]
    fn strict_rejects_out_of_range_team() {
        let mut engine = DispatchEngine::new(DispatchConfig::strict(), diamond());
        let err = engine.add_team(team("lost", TeamKind::Police, 9)).unwrap_err();
        assert!(matches!(err, DispatchError::NodeOutOfRange { node, .. } if node == n(9)));
    }

    #[test]
    fn strict_rejects_out_of_range_disaster() {
        let result = DispatchEngineBuilder::new(diamond())
            .config(DispatchConfig::strict())
            .disaster(disaster(1, 0, 5, DisasterKind::Unknown))
            .build();
        assert!(result.is_err());

        let mut engine = DispatchEngine::new(DispatchConfig::strict(), diamond());
        assert!(engine.submit(n(5), 1, DisasterKind::Unknown).is_err());
        assert!(engine.submit(n(4), 1, DisasterKind::Unknown).is_ok());
    }

    #[test]
    fn permissive_treats_out_of_range_as_unreachable() {
        let mut engine = DispatchEngineBuilder::new(diamond())
            .team(team("lost", TeamKind::Ambulance, 9))
            .disaster(disaster(1, 1, 5, DisasterKind::Unknown))
            .disaster(disaster(2, 42, 5, DisasterKind::Unknown))
            .build()
            .unwrap();
        engine.run(&mut NoopObserver);

        assert!(engine.records().iter().all(|r| r.outcome == Outcome::Unreachable));
        assert_eq!(engine.stats().unreachable, 2);
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch {
    use er_core::DisasterKind;

    use super::helpers::{disaster, n, two_ambulances};
    use crate::{BatchJob, RoadEvent, run_batch, run_jobs};

    #[test]
    fn batch_runs_engines_independently() {
        let mut a = two_ambulances();
        a.push_disaster(disaster(1, 1, 1, DisasterKind::Unknown)).unwrap();
        let mut b = two_ambulances();
        b.push_disaster(disaster(1, 3, 1, DisasterKind::Unknown)).unwrap();
        b.push_disaster(disaster(2, 4, 1, DisasterKind::Unknown)).unwrap();

        let done = run_batch(vec![a, b]);
        assert_eq!(done.len(), 2);
        assert_eq!(done[0].records().len(), 1);
        assert_eq!(done[1].records().len(), 2);
        assert!(done.iter().all(|e| e.pending() == 0));
    }

    #[test]
    fn jobs_apply_their_own_events() {
        let mut engine = two_ambulances();
        engine.push_disaster(disaster(1, 1, 1, DisasterKind::Unknown)).unwrap();
        let job = BatchJob { engine, events: vec![RoadEvent::block(0, n(1), n(2))] };

        let done = run_jobs(vec![job]);
        assert_eq!(done[0].records()[0].team_name(), "A3");
        assert_eq!(done[0].stats().blocked_roads, 1);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use er_core::{DispatchConfig, DisasterKind, NodeId, TeamKind};
    use er_network::{RoadNetworkBuilder, View};

    use crate::{DispatchEngine, Team};

    const KINDS: [DisasterKind; 5] = [
        DisasterKind::IndustrialAccident,
        DisasterKind::TransportAccident,
        DisasterKind::BuildingCollapse,
        DisasterKind::FireAccident,
        DisasterKind::Unknown,
    ];

    fn scenario() -> impl Strategy<
        Value = (u32, Vec<(u32, u32, u64)>, Vec<(usize, u32, bool)>, Vec<(u32, i32, usize)>),
    > {
        (2u32..8).prop_flat_map(|nodes| {
            (
                Just(nodes),
                prop::collection::vec((1..=nodes, 1..=nodes, 1u64..20), 0..16),
                prop::collection::vec((0usize..TeamKind::ALL.len(), 1..=nodes, any::<bool>()), 0..8),
                prop::collection::vec((1..=nodes, -5i32..10, 0usize..KINDS.len()), 0..8),
            )
        })
    }

    proptest! {
        #[test]
        fn records_match_requirements_and_availability_is_restored(
            (nodes, roads, teams, disasters) in scenario()
        ) {
            let network = RoadNetworkBuilder::new(nodes)
                .roads(roads.iter().map(|&(u, v, w)| (NodeId(u), NodeId(v), w)))
                .build()
                .unwrap();
            let mut engine = DispatchEngine::new(DispatchConfig::default(), network);
            for (i, &(kind, home, available)) in teams.iter().enumerate() {
                let mut team = Team::new(format!("t{i}"), TeamKind::ALL[kind], NodeId(home));
                team.available = available;
                engine.add_team(team).unwrap();
            }
            let before = engine.teams().availability();
            let mut expected = 0;
            for &(node, urgency, kind) in &disasters {
                expected += KINDS[kind].required_teams().len();
                engine.submit(NodeId(node), urgency, KINDS[kind]).unwrap();
            }
            engine.run_silent();

            let stats = engine.stats();
            prop_assert_eq!(engine.records().len(), expected);
            prop_assert_eq!(stats.handled + stats.unreachable, expected);
            prop_assert_eq!(engine.teams().availability(), before);

            for record in engine.records() {
                if let Some(a) = record.assignment() {
                    let team = engine.teams().get(&a.team_name).unwrap();
                    prop_assert!(team.available, "busy team {} dispatched", a.team_name);
                    prop_assert_eq!(a.path.first().copied(), Some(a.team_home));
                    prop_assert_eq!(a.path.last().copied(), Some(record.disaster_node));
                    let cost: u64 = a
                        .path
                        .windows(2)
                        .map(|w| {
                            // Parallel roads: Dijkstra takes the cheapest.
                            engine
                                .network()
                                .links(w[0], View::Live)
                                .iter()
                                .filter(|l| l.to == w[1])
                                .map(|l| l.weight)
                                .min()
                                .unwrap()
                        })
                        .sum();
                    prop_assert_eq!(cost, a.travel_time);
                    prop_assert!(!a.rerouted);
                }
            }
        }
    }
}
