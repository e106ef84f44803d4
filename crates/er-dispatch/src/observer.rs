//! Dispatch observer trait for live logging and data collection.

use er_core::NodeId;

use crate::{AssignmentRecord, Disaster, RunStats};

/// Callbacks invoked by the engine at key points of the dispatch loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — count rerouted assignments
///
/// ```rust,ignore
/// struct Detours(usize);
///
/// impl DispatchObserver for Detours {
///     fn on_record(&mut self, record: &AssignmentRecord) {
///         if record.is_rerouted() {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait DispatchObserver {
    /// A disaster was popped and is about to be matched.
    fn on_disaster_start(&mut self, _disaster: &Disaster) {}

    /// A record was appended (one per required team kind).
    fn on_record(&mut self, _record: &AssignmentRecord) {}

    /// Every requirement of the disaster has been tried.
    fn on_disaster_end(&mut self, _disaster: &Disaster) {}

    /// A block request was applied.  `found` is `false` if `u`–`v` is not a
    /// road.
    fn on_road_blocked(&mut self, _u: NodeId, _v: NodeId, _found: bool) {}

    /// An unblock request was applied.
    fn on_road_unblocked(&mut self, _u: NodeId, _v: NodeId, _found: bool) {}

    /// The queue is empty and every scheduled road event has fired.
    fn on_run_end(&mut self, _stats: &RunStats) {}
}

/// A [`DispatchObserver`] that does nothing.
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}

/// Fan out to two observers, first `A` then `B`.
impl<A: DispatchObserver, B: DispatchObserver> DispatchObserver for (A, B) {
    fn on_disaster_start(&mut self, disaster: &Disaster) {
        self.0.on_disaster_start(disaster);
        self.1.on_disaster_start(disaster);
    }

    fn on_record(&mut self, record: &AssignmentRecord) {
        self.0.on_record(record);
        self.1.on_record(record);
    }

    fn on_disaster_end(&mut self, disaster: &Disaster) {
        self.0.on_disaster_end(disaster);
        self.1.on_disaster_end(disaster);
    }

    fn on_road_blocked(&mut self, u: NodeId, v: NodeId, found: bool) {
        self.0.on_road_blocked(u, v, found);
        self.1.on_road_blocked(u, v, found);
    }

    fn on_road_unblocked(&mut self, u: NodeId, v: NodeId, found: bool) {
        self.0.on_road_unblocked(u, v, found);
        self.1.on_road_unblocked(u, v, found);
    }

    fn on_run_end(&mut self, stats: &RunStats) {
        self.0.on_run_end(stats);
        self.1.on_run_end(stats);
    }
}

/// Forward through a mutable borrow, so an observer can be lent to a pair
/// and inspected afterwards.
impl<O: DispatchObserver + ?Sized> DispatchObserver for &mut O {
    fn on_disaster_start(&mut self, disaster: &Disaster) {
        (**self).on_disaster_start(disaster);
    }

    fn on_record(&mut self, record: &AssignmentRecord) {
        (**self).on_record(record);
    }

    fn on_disaster_end(&mut self, disaster: &Disaster) {
        (**self).on_disaster_end(disaster);
    }

    fn on_road_blocked(&mut self, u: NodeId, v: NodeId, found: bool) {
        (**self).on_road_blocked(u, v, found);
    }

    fn on_road_unblocked(&mut self, u: NodeId, v: NodeId, found: bool) {
        (**self).on_road_unblocked(u, v, found);
    }

    fn on_run_end(&mut self, stats: &RunStats) {
        (**self).on_run_end(stats);
    }
}
