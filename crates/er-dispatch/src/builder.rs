//! Fluent builder for constructing a [`DispatchEngine`].

use er_core::DispatchConfig;
use er_network::{DijkstraRouter, RoadNetwork, Router};

use crate::{Disaster, DispatchEngine, DispatchResult, Team};

/// Fluent builder for [`DispatchEngine<R>`].
///
/// | Method              | Default                       |
/// |---------------------|-------------------------------|
/// | `.config(c)`        | `DispatchConfig::default()`   |
/// | `.team(t)`          | no teams                      |
/// | `.disaster(d)`      | empty queue                   |
/// | `.router(r)`        | [`DijkstraRouter`]            |
///
/// Validation happens in [`build`](Self::build), so a strict config rejects
/// out-of-range homes and sites no matter in which order the calls were made.
///
/// ```rust,ignore
/// let mut engine = DispatchEngineBuilder::new(network)
///     .config(DispatchConfig::strict())
///     .team(Team::new("Medic-A", TeamKind::Ambulance, NodeId(3)))
///     .disaster(Disaster::new(DisasterId(1), NodeId(1), 9, DisasterKind::FireAccident))
///     .build()?;
/// engine.run(&mut NoopObserver);
/// ```
pub struct DispatchEngineBuilder<R: Router = DijkstraRouter> {
    network:   RoadNetwork,
    config:    DispatchConfig,
    teams:     Vec<Team>,
    disasters: Vec<Disaster>,
    router:    R,
}

impl DispatchEngineBuilder<DijkstraRouter> {
    pub fn new(network: RoadNetwork) -> Self {
        Self {
            network,
            config:    DispatchConfig::default(),
            teams:     Vec::new(),
            disasters: Vec::new(),
            router:    DijkstraRouter,
        }
    }
}

impl<R: Router> DispatchEngineBuilder<R> {
    pub fn config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Register one team.  Registration order is the tie-break order.
    pub fn team(mut self, team: Team) -> Self {
        self.teams.push(team);
        self
    }

    pub fn teams(mut self, teams: impl IntoIterator<Item = Team>) -> Self {
        self.teams.extend(teams);
        self
    }

    pub fn disaster(mut self, disaster: Disaster) -> Self {
        self.disasters.push(disaster);
        self
    }

    pub fn disasters(mut self, disasters: impl IntoIterator<Item = Disaster>) -> Self {
        self.disasters.extend(disasters);
        self
    }

    /// Swap the routing algorithm.
    pub fn router<R2: Router>(self, router: R2) -> DispatchEngineBuilder<R2> {
        DispatchEngineBuilder {
            network:   self.network,
            config:    self.config,
            teams:     self.teams,
            disasters: self.disasters,
            router,
        }
    }

    pub fn build(self) -> DispatchResult<DispatchEngine<R>> {
        let mut engine = DispatchEngine::with_router(self.config, self.network, self.router);
        for team in self.teams {
            engine.add_team(team)?;
        }
        for disaster in self.disasters {
            engine.push_disaster(disaster)?;
        }
        Ok(engine)
    }
}
