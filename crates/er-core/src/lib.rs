//! `er-core` — foundational types for the `er` emergency-dispatch workspace.
//!
//! This crate is a dependency of every other `er-*` crate.  It has no `er-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `NodeId`, `DisasterId`, `Cost`, the `INFINITY` sentinel   |
//! | [`kind`]    | `TeamKind`, `DisasterKind`, required-team table           |
//! | [`config`]  | `DispatchConfig`, `ValidationPolicy`                      |
//! | [`rng`]     | `ScenarioRng` (seeded scenario generation)                |
//! | [`error`]   | `ErError`, `ErResult`                                     |

pub mod config;
pub mod error;
pub mod ids;
pub mod kind;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DispatchConfig, ValidationPolicy};
pub use error::{ErError, ErResult};
pub use ids::{Cost, DisasterId, NodeId, INFINITY, is_unreachable};
pub use kind::{DisasterKind, TeamKind};
pub use rng::ScenarioRng;
