//! `er-scenario` — scenario input for the dispatch engine.
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`loader`]   | CSV loaders for roads, teams, disasters, road events   |
//! | [`scenario`] | `Scenario`: load / write a directory, build an engine  |
//! | [`generate`] | `random_scenario`, `GeneratorParams`                   |
//! | [`error`]    | `ScenarioError`, `ScenarioResult<T>`                   |
//!
//! ```rust,ignore
//! let (mut engine, events) = Scenario::load_dir(dir)?.into_engine(config)?;
//! engine.run_with_events(&events, &mut NoopObserver);
//! ```

pub mod error;
pub mod generate;
pub mod loader;
pub mod scenario;


pub use error::{ScenarioError, ScenarioResult};
pub use generate::{GeneratorParams, random_scenario};
pub use loader::{
    DisasterRow, Road, load_disasters_csv, load_disasters_reader, load_edges_csv,
    load_edges_reader, load_road_events_csv, load_road_events_reader, load_teams_csv,
    load_teams_reader,
};
pub use scenario::{MAX_INFERRED_NODES, Scenario};
