//! Running many independent engines at once.
//!
//! Engines share nothing, so a batch (e.g. one engine per generated seed)
//! can be spread across threads with the `parallel` feature.  Inside each
//! engine the dispatch loop stays sequential.

use er_network::Router;

use crate::{DispatchEngine, RoadEvent};

/// One engine together with its road-event schedule.
pub struct BatchJob<R: Router> {
    pub engine: DispatchEngine<R>,
    pub events: Vec<RoadEvent>,
}

impl<R: Router> From<DispatchEngine<R>> for BatchJob<R> {
    fn from(engine: DispatchEngine<R>) -> Self {
        Self { engine, events: Vec::new() }
    }
}

/// Drain every engine's queue and hand the engines back in input order.
pub fn run_batch<R: Router>(engines: Vec<DispatchEngine<R>>) -> Vec<DispatchEngine<R>> {
    run_jobs(engines.into_iter().map(BatchJob::from).collect())
}

/// Like [`run_batch`], firing each job's road events during its run.
pub fn run_jobs<R: Router>(jobs: Vec<BatchJob<R>>) -> Vec<DispatchEngine<R>> {
    tracing::debug!(jobs = jobs.len(), "running batch");

    #[cfg(not(feature = "parallel"))]
    {
        jobs.into_iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        jobs.into_par_iter().map(run_one).collect()
    }
}

fn run_one<R: Router>(job: BatchJob<R>) -> DispatchEngine<R> {
    let BatchJob { mut engine, events } = job;
    engine.run_with_events(&events, &mut crate::NoopObserver);
    engine
}
