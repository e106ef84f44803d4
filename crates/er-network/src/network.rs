//! Road network representation and builder.
//!
//! # Data layout
//!
//! Two parallel adjacency arenas indexed by `NodeId` (row 0 unused, nodes are
//! `1..=N`):
//!
//! ```text
//! live[n]     = [Link { to, weight }, ...]   // mutated by block/unblock
//! original[n] = [Link { to, weight }, ...]   // never mutated
//! ```
//!
//! `add_edge` pushes the same link onto both arenas, in both directions, so
//! position `i` of `live[n]` always describes the same road as position `i`
//! of `original[n]`.  Unblocking exploits this: the weight is restored from
//! the same slot of the original row, no lookup table or undo log needed.
//!
//! # Duplicate roads
//!
//! Parallel roads between the same pair are kept.  Blocking and unblocking
//! only touch the *first* matching link in each direction, so a duplicate
//! stays usable while its sibling is blocked.

use std::collections::VecDeque;

use er_core::{Cost, INFINITY, NodeId, ValidationPolicy, is_unreachable};

use crate::{NetworkError, NetworkResult};

// ── Link ──────────────────────────────────────────────────────────────────────

/// One direction of a road as seen from its source node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub to:     NodeId,
    pub weight: Cost,
}

/// Which weight view a query runs against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum View {
    /// Current weights, blocked roads at [`INFINITY`].
    #[default]
    Live,
    /// Weights as inserted, ignoring every block.
    Original,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Undirected weighted road graph with a live and a pristine weight view.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    node_count:    u32,
    validation:    ValidationPolicy,
    live:          Vec<Vec<Link>>,
    original:      Vec<Vec<Link>>,
    dropped_edges: usize,
}

impl RoadNetwork {
    /// Create a network with nodes `1..=node_count` and no roads.
    pub fn new(node_count: u32, validation: ValidationPolicy) -> Self {
        let rows = node_count as usize + 1;
        Self {
            node_count,
            validation,
            live:          vec![Vec::new(); rows],
            original:      vec![Vec::new(); rows],
            dropped_edges: 0,
        }
    }

    /// A network with no nodes.  Every node is out of range, every route
    /// unreachable.
    pub fn empty() -> Self {
        Self::new(0, ValidationPolicy::Permissive)
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    /// Number of undirected roads (each stored as two links).
    pub fn edge_count(&self) -> usize {
        self.original.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Roads silently discarded by [`add_edge`](Self::add_edge) under the
    /// permissive policy.
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    pub fn validation(&self) -> ValidationPolicy {
        self.validation
    }

    /// `true` if `node` lies in `1..=N`.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.0 >= 1 && node.0 <= self.node_count
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Add an undirected road `u`–`v` of weight `w` to both views.
    ///
    /// Returns `Ok(true)` if the road was stored and `Ok(false)` if it was
    /// dropped because an endpoint is out of range (permissive policy).
    /// Under the strict policy an out-of-range endpoint is an error.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, w: Cost) -> NetworkResult<bool> {
        if !self.contains(u) || !self.contains(v) {
            if self.validation.is_strict() {
                return Err(NetworkError::EdgeOutOfRange { u, v, node_count: self.node_count });
            }
            tracing::warn!(%u, %v, node_count = self.node_count, "dropping out-of-range road");
            self.dropped_edges += 1;
            return Ok(false);
        }

        self.live[u.index()].push(Link { to: v, weight: w });
        self.live[v.index()].push(Link { to: u, weight: w });
        self.original[u.index()].push(Link { to: v, weight: w });
        self.original[v.index()].push(Link { to: u, weight: w });
        Ok(true)
    }

    /// Block road `u`–`v`: set the live weight of the first matching link in
    /// each direction to [`INFINITY`].  The original view is untouched.
    ///
    /// Returns `true` if at least one link was found.  Blocking a pair that
    /// is not a road is a no-op.
    pub fn block_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let forward = self.block_first(u, v);
        let backward = self.block_first(v, u);
        tracing::debug!(%u, %v, found = forward || backward, "road blocked");
        forward || backward
    }

    /// Restore road `u`–`v` to its original weight.
    ///
    /// Returns `true` if the pair is a road.  Unblocking a pair that was
    /// never a road is a no-op; unblocking an open road is harmless.
    pub fn unblock_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let forward = self.restore_first(u, v);
        let backward = self.restore_first(v, u);
        tracing::debug!(%u, %v, found = forward || backward, "road restored");
        forward || backward
    }

    fn block_first(&mut self, from: NodeId, to: NodeId) -> bool {
        if !self.contains(from) {
            return false;
        }
        match self.live[from.index()].iter_mut().find(|l| l.to == to) {
            Some(link) => {
                link.weight = INFINITY;
                true
            }
            None => false,
        }
    }

    fn restore_first(&mut self, from: NodeId, to: NodeId) -> bool {
        if !self.contains(from) {
            return false;
        }
        let row = from.index();
        match self.original[row].iter().position(|l| l.to == to) {
            Some(slot) => {
                self.live[row][slot].weight = self.original[row][slot].weight;
                true
            }
            None => false,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Outgoing links of `node` in the given view.  Empty for out-of-range
    /// nodes.
    #[inline]
    pub fn links(&self, node: NodeId, view: View) -> &[Link] {
        if !self.contains(node) {
            return &[];
        }
        match view {
            View::Live => &self.live[node.index()],
            View::Original => &self.original[node.index()],
        }
    }

    /// Weight of the first `u`→`v` link in the given view.
    pub fn weight(&self, u: NodeId, v: NodeId, view: View) -> Option<Cost> {
        self.links(u, view).iter().find(|l| l.to == v).map(|l| l.weight)
    }

    /// `true` if the first live `u`→`v` link is at the infinite sentinel.
    pub fn is_blocked(&self, u: NodeId, v: NodeId) -> bool {
        self.weight(u, v, View::Live).is_some_and(is_unreachable)
    }

    /// Breadth-first reachability over the live adjacency.  Blocking leaves
    /// a link in place, so blocked roads still connect their endpoints; use
    /// [`reachable_open`](Self::reachable_open) for the block-aware query.
    ///
    /// A node always reaches itself, even outside `1..=N`.
    pub fn reachable(&self, s: NodeId, t: NodeId) -> bool {
        self.bfs(s, t, |_| true)
    }

    /// Like [`reachable`](Self::reachable) but blocked links are impassable,
    /// so it agrees with Dijkstra over [`View::Live`].
    pub fn reachable_open(&self, s: NodeId, t: NodeId) -> bool {
        self.bfs(s, t, |link| !is_unreachable(link.weight))
    }

    fn bfs(&self, s: NodeId, t: NodeId, passable: impl Fn(&Link) -> bool) -> bool {
        if s == t {
            return true;
        }
        if !self.contains(s) || !self.contains(t) {
            return false;
        }

        let mut seen = vec![false; self.node_count as usize + 1];
        let mut queue = VecDeque::new();
        seen[s.index()] = true;
        queue.push_back(s);

        while let Some(node) = queue.pop_front() {
            for link in &self.live[node.index()] {
                if seen[link.to.index()] || !passable(link) {
                    continue;
                }
                if link.to == t {
                    return true;
                }
                seen[link.to.index()] = true;
                queue.push_back(link.to);
            }
        }
        false
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Collect roads, then validate and construct a [`RoadNetwork`] in one go.
///
/// # Example
///
/// ```
/// use er_core::{NodeId, ValidationPolicy};
/// use er_network::RoadNetworkBuilder;
///
/// let net = RoadNetworkBuilder::new(3)
///     .road(NodeId(1), NodeId(2), 4)
///     .road(NodeId(2), NodeId(3), 1)
///     .road(NodeId(3), NodeId(9), 1) // out of range, dropped
///     .build()
///     .unwrap();
/// assert_eq!(net.edge_count(), 2);
/// assert_eq!(net.dropped_edges(), 1);
///
/// let strict = RoadNetworkBuilder::new(3)
///     .validation(ValidationPolicy::Strict)
///     .road(NodeId(3), NodeId(9), 1)
///     .build();
/// assert!(strict.is_err());
/// ```
pub struct RoadNetworkBuilder {
    node_count: u32,
    validation: ValidationPolicy,
    roads:      Vec<(NodeId, NodeId, Cost)>,
}

impl RoadNetworkBuilder {
    pub fn new(node_count: u32) -> Self {
        Self { node_count, validation: ValidationPolicy::default(), roads: Vec::new() }
    }

    pub fn validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// Queue an undirected road.
    pub fn road(mut self, u: NodeId, v: NodeId, w: Cost) -> Self {
        self.roads.push((u, v, w));
        self
    }

    /// Queue many undirected roads.
    pub fn roads(mut self, roads: impl IntoIterator<Item = (NodeId, NodeId, Cost)>) -> Self {
        self.roads.extend(roads);
        self
    }

    /// Insert every queued road in order.  Stops at the first validation
    /// error under the strict policy.
    pub fn build(self) -> NetworkResult<RoadNetwork> {
        let mut net = RoadNetwork::new(self.node_count, self.validation);
        for (u, v, w) in self.roads {
            net.add_edge(u, v, w)?;
        }
        Ok(net)
    }
}
