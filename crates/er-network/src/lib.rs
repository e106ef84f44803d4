//! `er-network` — blockable road network and shortest-path routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (live + original adjacency), builder, `View`  |
//! | [`router`]  | `Router` trait, `DijkstraRouter`, `ShortestPaths`           |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |
//!
//! # Two views, one graph
//!
//! Every road is stored twice with identical layout: once in the *live*
//! adjacency (weights change as roads are blocked and restored) and once in
//! the *original* adjacency (frozen at insertion).  Routing normally runs on
//! [`View::Live`]; the dispatch engine also routes on [`View::Original`] to
//! get the no-damage baseline used for reroute detection.

pub mod error;
pub mod network;
pub mod router;


pub use error::{NetworkError, NetworkResult};
pub use network::{Link, RoadNetwork, RoadNetworkBuilder, View};
pub use router::{reconstruct_path, DijkstraRouter, Router, ShortestPaths};
