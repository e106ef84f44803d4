//! `DisasterQueue` — pending disasters ordered for service.
//!
//! Pop order: highest urgency first; among equal urgencies, lowest
//! [`DisasterId`] first (earlier submissions are served first).
//!
//! Ids come either from the caller ([`push`](DisasterQueue::push), e.g. a
//! scenario file) or from the queue itself ([`submit`](DisasterQueue::submit),
//! which hands out the next id above every id seen so far).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use er_core::{DisasterId, DisasterKind, NodeId};

/// A reported disaster.  Immutable once queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disaster {
    pub id:      DisasterId,
    pub node:    NodeId,
    /// Higher is more urgent.
    pub urgency: i32,
    pub kind:    DisasterKind,
}

impl Disaster {
    pub fn new(id: DisasterId, node: NodeId, urgency: i32, kind: DisasterKind) -> Self {
        Self { id, node, urgency, kind }
    }
}

/// Heap entry carrying the service ordering.  `BinaryHeap` is a max-heap, so
/// "greater" means "served sooner".
#[derive(Debug)]
struct Pending(Disaster);

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .urgency
            .cmp(&other.0.urgency)
            .then_with(|| other.0.id.cmp(&self.0.id))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

/// Max-priority queue of disasters.
#[derive(Debug, Default)]
pub struct DisasterQueue {
    heap:    BinaryHeap<Pending>,
    next_id: u32,
}

impl DisasterQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a disaster with a caller-chosen id.
    pub fn push(&mut self, disaster: Disaster) {
        if disaster.id.is_valid() {
            self.next_id = self.next_id.max(disaster.id.0.saturating_add(1));
        }
        self.heap.push(Pending(disaster));
    }

    /// Queue a disaster under the next free id and return that id.
    pub fn submit(&mut self, node: NodeId, urgency: i32, kind: DisasterKind) -> DisasterId {
        let id = DisasterId(self.next_id.max(1));
        self.push(Disaster::new(id, node, urgency, kind));
        id
    }

    /// Remove and return the most urgent disaster.
    pub fn pop(&mut self) -> Option<Disaster> {
        self.heap.pop().map(|p| p.0)
    }

    pub fn peek(&self) -> Option<&Disaster> {
        self.heap.peek().map(|p| &p.0)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
