//! Run configuration.
//!
//! Loaded from a JSON file by the application crate (every field optional)
//! and passed to the scenario and dispatch builders.
//!
//! ```json
//! { "validation": "strict", "detect_reroutes": true, "node_count": 40 }
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ErError, ErResult};

// ── ValidationPolicy ──────────────────────────────────────────────────────────

/// How construction input with out-of-range node ids is treated.
///
/// Switching policy changes simulation output (dropped edges vs. a refused
/// run), so the permissive behaviour stays the default.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Out-of-range edges are dropped silently; out-of-range team homes and
    /// disaster sites are accepted and simply never reachable.
    #[default]
    Permissive,
    /// Any out-of-range node id is a validation error.
    Strict,
}

impl ValidationPolicy {
    #[inline]
    pub fn is_strict(self) -> bool {
        matches!(self, ValidationPolicy::Strict)
    }
}

// ── DispatchConfig ────────────────────────────────────────────────────────────

/// Top-level dispatch configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub validation: ValidationPolicy,

    /// Compute the pristine-network baseline for every assignment and flag
    /// detours.  When `false` every record has `rerouted = false` and the
    /// second Dijkstra per assignment is skipped.
    pub detect_reroutes: bool,

    /// Explicit node count `N`.  `None` infers it from the largest node id
    /// present in the scenario.
    pub node_count: Option<u32>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            validation:      ValidationPolicy::Permissive,
            detect_reroutes: true,
            node_count:      None,
        }
    }
}

impl DispatchConfig {
    /// Default configuration with [`ValidationPolicy::Strict`].
    pub fn strict() -> Self {
        Self { validation: ValidationPolicy::Strict, ..Self::default() }
    }

    /// Parse a JSON config from any reader.
    pub fn from_json_reader<R: Read>(reader: R) -> ErResult<Self> {
        serde_json::from_reader(reader).map_err(|e| ErError::Config(e.to_string()))
    }

    /// Parse a JSON config file.
    pub fn from_json_path(path: &Path) -> ErResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }
}
