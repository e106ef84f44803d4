//! The `DispatchEngine` and its per-disaster loop.

use er_core::{Cost, DispatchConfig, DisasterId, DisasterKind, NodeId, TeamKind, is_unreachable};
use er_network::{DijkstraRouter, RoadNetwork, Router, ShortestPaths, View};

use crate::{
    Assignment, AssignmentRecord, Disaster, DisasterQueue, DispatchError, DispatchObserver,
    DispatchResult, NoopObserver, Outcome, RoadAction, RoadEvent, RunStats, Team, TeamRegistry,
};

// ── DispatchPhase ─────────────────────────────────────────────────────────────

/// Where the engine is in its state machine.
///
/// ```text
/// Idle → ProcessingDisaster → MatchingTeamType → Assigned | Unreachable
///                                   ↑                      │
///                                   └── next team kind ────┘
///                              (after the last kind) → Idle
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DispatchPhase {
    #[default]
    Idle,
    ProcessingDisaster,
    MatchingTeamType,
    Assigned,
    Unreachable,
}

// ── DispatchEngine ────────────────────────────────────────────────────────────

/// Sequential dispatch of queued disasters to the nearest available teams.
///
/// One engine is one run: its records and counters only ever grow, and a
/// fresh run needs a fresh engine.
///
/// Per popped disaster, for each required team kind in table order:
///
/// 1. Dijkstra from the disaster site over the live network (recomputed per
///    kind).
/// 2. Scan teams in registry order; keep the available team of that kind
///    with the strictly smallest distance (first seen wins ties).
/// 3. No candidate, or best distance at the sentinel → `Unreachable` record.
/// 4. Otherwise rebuild the live route, compare it with the route on the
///    original network (`rerouted`), hold the team busy while the record is
///    written, then release it.
///
/// Create via [`DispatchEngineBuilder`][crate::DispatchEngineBuilder] or
/// [`DispatchEngine::new`].
pub struct DispatchEngine<R: Router = DijkstraRouter> {
    pub config: DispatchConfig,
    network:    RoadNetwork,
    teams:      TeamRegistry,
    queue:      DisasterQueue,
    router:     R,
    records:    Vec<AssignmentRecord>,
    stats:      RunStats,
    phase:      DispatchPhase,
    processed:  usize,
}

impl DispatchEngine<DijkstraRouter> {
    /// Engine over `network` with no teams and no disasters, routing with
    /// [`DijkstraRouter`].
    pub fn new(config: DispatchConfig, network: RoadNetwork) -> Self {
        Self::with_router(config, network, DijkstraRouter)
    }
}

impl<R: Router> DispatchEngine<R> {
    pub fn with_router(config: DispatchConfig, network: RoadNetwork, router: R) -> Self {
        Self {
            config,
            network,
            teams:     TeamRegistry::new(),
            queue:     DisasterQueue::new(),
            router,
            records:   Vec::new(),
            stats:     RunStats::default(),
            phase:     DispatchPhase::Idle,
            processed: 0,
        }
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Register a team.  Under the strict policy its home must be a node of
    /// the network.
    pub fn add_team(&mut self, team: Team) -> DispatchResult<()> {
        self.check_node("team", &team.name, team.home)?;
        self.teams.add(team);
        Ok(())
    }

    /// Queue a disaster with its own id.  Under the strict policy its site
    /// must be a node of the network.
    pub fn push_disaster(&mut self, disaster: Disaster) -> DispatchResult<()> {
        self.check_node("disaster", &disaster.id.to_string(), disaster.node)?;
        self.queue.push(disaster);
        Ok(())
    }

    /// Queue a disaster under the next free id.
    pub fn submit(&mut self, node: NodeId, urgency: i32, kind: DisasterKind) -> DispatchResult<DisasterId> {
        if self.config.validation.is_strict() && !self.network.contains(node) {
            return Err(self.out_of_range("disaster", "<new>".into(), node));
        }
        Ok(self.queue.submit(node, urgency, kind))
    }

    fn check_node(&self, what: &'static str, label: &str, node: NodeId) -> DispatchResult<()> {
        if self.config.validation.is_strict() && !self.network.contains(node) {
            return Err(self.out_of_range(what, label.to_owned(), node));
        }
        Ok(())
    }

    fn out_of_range(&self, what: &'static str, label: String, node: NodeId) -> DispatchError {
        DispatchError::NodeOutOfRange { what, label, node, node_count: self.network.node_count() }
    }

    // ── Road damage ───────────────────────────────────────────────────────

    /// Block road `u`–`v` on the live network.  Counts as a blocking event
    /// even if `u`–`v` is not a road.  Affects only routes computed later.
    pub fn block_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let found = self.network.block_edge(u, v);
        self.stats.blocked_roads += 1;
        tracing::info!(%u, %v, found, "road blocked");
        found
    }

    /// Restore road `u`–`v` to its original weight.
    pub fn unblock_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let found = self.network.unblock_edge(u, v);
        tracing::info!(%u, %v, found, "road restored");
        found
    }

    /// Apply one road event now, reporting it to `observer`.
    pub fn apply_road_event<O: DispatchObserver>(&mut self, event: &RoadEvent, observer: &mut O) {
        match event.action {
            RoadAction::Block => {
                let found = self.block_edge(event.u, event.v);
                observer.on_road_blocked(event.u, event.v, found);
            }
            RoadAction::Unblock => {
                let found = self.unblock_edge(event.u, event.v);
                observer.on_road_unblocked(event.u, event.v, found);
            }
        }
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Pop and fully process the most urgent disaster.
    ///
    /// Returns its id, or `None` if the queue was empty.
    pub fn step<O: DispatchObserver>(&mut self, observer: &mut O) -> Option<DisasterId> {
        let disaster = self.queue.pop()?;
        self.process_disaster(&disaster, observer);
        self.processed += 1;
        Some(disaster.id)
    }

    /// Drain the queue.
    pub fn run<O: DispatchObserver>(&mut self, observer: &mut O) {
        while self.step(observer).is_some() {}
        observer.on_run_end(&self.stats);
    }

    /// Drain the queue with no observer.
    pub fn run_silent(&mut self) {
        self.run(&mut NoopObserver);
    }

    /// Drain the queue, firing each road event once `event.after` disasters
    /// have been processed.  Events with the same `after` fire in input
    /// order; events scheduled past the last disaster fire before the run
    /// ends.
    pub fn run_with_events<O: DispatchObserver>(&mut self, events: &[RoadEvent], observer: &mut O) {
        let mut pending: Vec<&RoadEvent> = events.iter().collect();
        pending.sort_by_key(|e| e.after);
        let mut pending = pending.into_iter().peekable();

        loop {
            while let Some(event) = pending.next_if(|e| e.after <= self.processed) {
                self.apply_road_event(event, observer);
            }
            if self.step(observer).is_none() {
                break;
            }
        }
        for event in pending {
            self.apply_road_event(event, observer);
        }
        observer.on_run_end(&self.stats);
    }

    // ── Core per-disaster processing ──────────────────────────────────────

    fn process_disaster<O: DispatchObserver>(&mut self, disaster: &Disaster, observer: &mut O) {
        self.phase = DispatchPhase::ProcessingDisaster;
        let _span = tracing::debug_span!(
            "disaster",
            id = %disaster.id,
            node = %disaster.node,
            kind = %disaster.kind,
            urgency = disaster.urgency,
        )
        .entered();
        observer.on_disaster_start(disaster);

        for &team_kind in disaster.kind.required_teams() {
            self.phase = DispatchPhase::MatchingTeamType;
            let _kind = tracing::debug_span!("requirement", %team_kind).entered();
            tracing::debug!("matching");

            // Recomputed per kind: assignments never change the graph, but
            // road events may land between steps and the cost is one search.
            let live = self.router.shortest_paths(&self.network, disaster.node, View::Live);

            let outcome = match self.nearest_available(team_kind, &live) {
                None => {
                    self.phase = DispatchPhase::Unreachable;
                    self.stats.unreachable += 1;
                    tracing::warn!(%team_kind, "no available team reachable");
                    Outcome::Unreachable
                }
                Some((slot, travel_time)) => {
                    self.phase = DispatchPhase::Assigned;
                    Outcome::Assigned(self.assign(disaster, slot, travel_time, &live))
                }
            };

            self.records.push(AssignmentRecord::new(disaster, team_kind, outcome));
            if let Some(record) = self.records.last() {
                observer.on_record(record);
            }
        }

        observer.on_disaster_end(disaster);
        self.phase = DispatchPhase::Idle;
    }

    /// Registry slot and distance of the closest available team of `kind`.
    ///
    /// Strict `<` against a running best that starts at the sentinel: the
    /// earliest-registered team wins exact ties, and nothing at or beyond
    /// the sentinel is ever chosen.
    fn nearest_available(&self, kind: TeamKind, paths: &ShortestPaths) -> Option<(usize, Cost)> {
        let mut best: Option<(usize, Cost)> = None;
        let mut best_dist = er_core::INFINITY;

        for (slot, team) in self.teams.iter().enumerate() {
            if !team.available || team.kind != kind {
                continue;
            }
            let d = paths.distance_to(team.home);
            if d < best_dist {
                best_dist = d;
                best = Some((slot, d));
            }
        }

        best.filter(|&(_, d)| !is_unreachable(d))
    }

    fn assign(
        &mut self,
        disaster:    &Disaster,
        slot:        usize,
        travel_time: Cost,
        live:        &ShortestPaths,
    ) -> Assignment {
        let team = self.teams.at(slot);
        let (team_name, team_home) = (team.name.clone(), team.home);

        let path = live.path_from(team_home);
        let rerouted = self.config.detect_reroutes && {
            let baseline = self.router.shortest_paths(&self.network, disaster.node, View::Original);
            baseline.path_from(team_home) != path
        };

        self.teams.set_available_at(slot, false);
        self.stats.handled += 1;
        self.stats.travel_times.push(travel_time);
        tracing::info!(team = %team_name, from = %team_home, travel_time, rerouted, "team assigned");
        // Instant release: a team is only held for the duration of its own
        // assignment step.
        self.teams.set_available_at(slot, true);

        Assignment { team_name, team_home, travel_time, path, rerouted }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    pub fn records(&self) -> &[AssignmentRecord] {
        &self.records
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn phase(&self) -> DispatchPhase {
        self.phase
    }

    /// Disasters still queued.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Disasters fully processed so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Consume the engine, keeping its records and counters.
    pub fn into_results(self) -> (Vec<AssignmentRecord>, RunStats) {
        (self.records, self.stats)
    }
}
