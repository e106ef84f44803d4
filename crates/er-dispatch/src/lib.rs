//! `er-dispatch` — disaster queue, team registry, and the dispatch engine.
//!
//! # Dispatch loop
//!
//! ```text
//! while let Some(disaster) = queue.pop():          // urgency desc, id asc
//!   for kind in disaster.kind.required_teams():
//!     ① Route    — Dijkstra from the site over the live network.
//!     ② Match    — nearest available team of `kind`, registry order on ties.
//!     ③ Record   — Assigned { team, time, path, rerouted } or Unreachable.
//! ```
//!
//! Road events (block / unblock) scheduled with
//! [`DispatchEngine::run_with_events`] fire between disasters, never inside
//! one.
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`queue`]    | `Disaster`, `DisasterQueue`                            |
//! | [`registry`] | `Team`, `TeamRegistry`                                 |
//! | [`record`]   | `AssignmentRecord`, `Outcome`, `RunStats`              |
//! | [`event`]    | `RoadEvent`, `RoadAction`                              |
//! | [`engine`]   | `DispatchEngine`, `DispatchPhase`                      |
//! | [`builder`]  | `DispatchEngineBuilder`                                |
//! | [`observer`] | `DispatchObserver`, `NoopObserver`                     |
//! | [`batch`]    | `run_batch`, `run_jobs`                                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the engines of a batch on Rayon's thread pool.    |

pub mod batch;
pub mod builder;
pub mod engine;
pub mod error;
pub mod event;
pub mod observer;
pub mod queue;
pub mod record;
pub mod registry;

#[cfg(test)]
mod tests;

pub use batch::{BatchJob, run_batch, run_jobs};
pub use builder::DispatchEngineBuilder;
pub use engine::{DispatchEngine, DispatchPhase};
pub use error::{DispatchError, DispatchResult};
pub use event::{RoadAction, RoadEvent};
pub use observer::{DispatchObserver, NoopObserver};
pub use queue::{Disaster, DisasterQueue};
pub use record::{Assignment, AssignmentRecord, Outcome, RunStats};
pub use registry::{Team, TeamRegistry};
