//! `TeamRegistry` — response teams in insertion order with lookup by name.
//!
//! Insertion order is load-bearing: when two teams of the required kind are
//! equally close, the one registered first is dispatched.  Teams live in a
//! `Vec` (the order) with an `FxHashMap` from name to slot (the lookup).

use rustc_hash::FxHashMap;
use serde::Serialize;

use er_core::{NodeId, TeamKind};

/// A response team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub name:      String,
    pub kind:      TeamKind,
    pub home:      NodeId,
    pub available: bool,
}

impl Team {
    /// A new team, available for dispatch.
    pub fn new(name: impl Into<String>, kind: TeamKind, home: NodeId) -> Self {
        Self { name: name.into(), kind, home, available: true }
    }
}

#[derive(Debug, Default, Clone)]
pub struct TeamRegistry {
    teams:   Vec<Team>,
    by_name: FxHashMap<String, usize>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `team`.
    ///
    /// Re-registering an existing name replaces that team's data in place
    /// (it keeps its original position in the order) and returns the old
    /// entry.
    pub fn add(&mut self, team: Team) -> Option<Team> {
        match self.by_name.get(&team.name) {
            Some(&slot) => Some(std::mem::replace(&mut self.teams[slot], team)),
            None => {
                self.by_name.insert(team.name.clone(), self.teams.len());
                self.teams.push(team);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Team> {
        self.by_name.get(name).map(|&slot| &self.teams[slot])
    }

    /// Position of `name` in insertion order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Teams in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Team> {
        self.teams.iter()
    }

    /// Set the availability flag of `name`.  Returns `false` if unknown.
    pub fn set_available(&mut self, name: &str, available: bool) -> bool {
        match self.by_name.get(name) {
            Some(&slot) => {
                self.teams[slot].available = available;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_available_at(&mut self, slot: usize, available: bool) {
        self.teams[slot].available = available;
    }

    pub(crate) fn at(&self, slot: usize) -> &Team {
        &self.teams[slot]
    }

    /// Availability flags in insertion order.
    pub fn availability(&self) -> Vec<bool> {
        self.teams.iter().map(|t| t.available).collect()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl<'a> IntoIterator for &'a TeamRegistry {
    type Item = &'a Team;
    type IntoIter = std::slice::Iter<'a, Team>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
