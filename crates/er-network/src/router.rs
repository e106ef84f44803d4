//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `er-dispatch` calls routing through the [`Router`] trait, so a caller can
//! swap in another single-source algorithm without touching the engine.
//! The default [`DijkstraRouter`] is what the dispatch policy is specified
//! against.
//!
//! # Output
//!
//! A [`ShortestPaths`] holds the full distance and predecessor vectors for one
//! source, indexed by `NodeId`.  Unreachable nodes have distance
//! [`INFINITY`] and predecessor `NodeId::INVALID`; so does the source's
//! predecessor.  Paths are rebuilt on demand with [`reconstruct_path`].

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use er_core::{Cost, INFINITY, NodeId, is_unreachable};

use crate::network::{RoadNetwork, View};

// ── ShortestPaths ─────────────────────────────────────────────────────────────

/// Single-source shortest-path tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    pub source:      NodeId,
    /// `distance[n]` for node `n`; `INFINITY` if unreachable.
    pub distance:    Vec<Cost>,
    /// `predecessor[n]` on the best path from `source`; `NodeId::INVALID`
    /// for the source itself and for unreached nodes.
    pub predecessor: Vec<NodeId>,
}

impl ShortestPaths {
    /// Distance to `node`.  Out-of-range nodes are unreachable.
    #[inline]
    pub fn distance_to(&self, node: NodeId) -> Cost {
        self.distance.get(node.index()).copied().unwrap_or(INFINITY)
    }

    #[inline]
    pub fn is_reachable(&self, node: NodeId) -> bool {
        !is_unreachable(self.distance_to(node))
    }

    /// Path from `target` back to the source; empty if unreachable.
    ///
    /// Because roads are undirected, when the search is rooted at a disaster
    /// site this is also the forward route from `target` to the site.
    pub fn path_from(&self, target: NodeId) -> Vec<NodeId> {
        reconstruct_path(target, self.source, &self.predecessor)
    }
}

/// Walk predecessor links from `target` until `source` is reached.
///
/// Returns `[target, …, source]`, or an empty vector if the walk falls off
/// the tree (unreached target, out-of-range id) before reaching `source`.
/// Never returns a partial path.
pub fn reconstruct_path(target: NodeId, source: NodeId, predecessor: &[NodeId]) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut cur = target;

    // A well-formed tree needs at most `len` hops; the bound keeps a
    // hand-built cyclic vector from looping forever.
    while cur.is_valid() && cur.index() < predecessor.len() && path.len() < predecessor.len() {
        path.push(cur);
        if cur == source {
            return path;
        }
        cur = predecessor[cur.index()];
    }
    Vec::new()
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable single-source routing engine.
pub trait Router: Send + Sync {
    /// Compute distances and predecessors from `source` over `view`.
    ///
    /// Never fails: an out-of-range source yields an all-unreachable tree.
    fn shortest_paths(&self, network: &RoadNetwork, source: NodeId, view: View) -> ShortestPaths;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Binary-heap Dijkstra with lazy deletion.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn shortest_paths(&self, network: &RoadNetwork, source: NodeId, view: View) -> ShortestPaths {
        dijkstra(network, source, view)
    }
}

fn dijkstra(network: &RoadNetwork, source: NodeId, view: View) -> ShortestPaths {
    let n = network.node_count() as usize + 1;
    let mut distance    = vec![INFINITY; n];
    let mut predecessor = vec![NodeId::INVALID; n];

    if !network.contains(source) {
        return ShortestPaths { source, distance, predecessor };
    }

    distance[source.index()] = 0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as min-heap.
    // Secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, source)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        // Skip stale heap entries.
        if cost > distance[node.index()] {
            continue;
        }

        for link in network.links(node, view) {
            // A blocked link lands at or past INFINITY and never beats the
            // initial distance, so it is never relaxed.
            let new_cost = cost.saturating_add(link.weight);
            if new_cost < distance[link.to.index()] {
                distance[link.to.index()] = new_cost;
                predecessor[link.to.index()] = node;
                heap.push(Reverse((new_cost, link.to)));
            }
        }
    }

    ShortestPaths { source, distance, predecessor }
}

// ── Convenience on RoadNetwork ────────────────────────────────────────────────

impl RoadNetwork {
    /// Dijkstra from `source` over the live view.
    pub fn shortest_paths(&self, source: NodeId) -> ShortestPaths {
        dijkstra(self, source, View::Live)
    }

    /// Dijkstra from `source` over the original (unblocked) view.
    pub fn baseline_paths(&self, source: NodeId) -> ShortestPaths {
        dijkstra(self, source, View::Original)
    }
}
