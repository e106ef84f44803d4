//! Team and disaster capability enums.
//!
//! Both sets are closed.  Unknown names never fail: they map to the explicit
//! `Unknown` variant, and `Unknown` disasters still get an ambulance.
//!
//! | Disaster            | Required teams (in dispatch order)     |
//! |---------------------|----------------------------------------|
//! | INDUSTRIAL_ACCIDENT | NDRF_TEAM, FIRE_TRUCK, AMBULANCE       |
//! | TRANSPORT_ACCIDENT  | POLICE, AMBULANCE                      |
//! | BUILDING_COLLAPSE   | NDRF_TEAM, AMBULANCE, FOOD_TRUCK       |
//! | FIRE_ACCIDENT       | FIRE_TRUCK, AMBULANCE                  |
//! | UNKNOWN_DISASTER    | AMBULANCE                              |

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── TeamKind ──────────────────────────────────────────────────────────────────

/// What a response team can do.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TeamKind {
    Police,
    Ambulance,
    FireTruck,
    FoodTruck,
    /// National disaster response force.
    Ndrf,
    #[default]
    Unknown,
}

impl TeamKind {
    pub const ALL: [TeamKind; 6] = [
        TeamKind::Police,
        TeamKind::Ambulance,
        TeamKind::FireTruck,
        TeamKind::FoodTruck,
        TeamKind::Ndrf,
        TeamKind::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TeamKind::Police    => "POLICE",
            TeamKind::Ambulance => "AMBULANCE",
            TeamKind::FireTruck => "FIRE_TRUCK",
            TeamKind::FoodTruck => "FOOD_TRUCK",
            TeamKind::Ndrf      => "NDRF_TEAM",
            TeamKind::Unknown   => "UNKNOWN_TEAM",
        }
    }

    /// Total lookup on the exact canonical name: anything else, including a
    /// lowercase spelling, is `Unknown`.
    pub fn from_name(name: &str) -> Self {
        TeamKind::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .unwrap_or(TeamKind::Unknown)
    }

    /// Like [`from_name`](Self::from_name) but ignores surrounding
    /// whitespace and ASCII case.
    pub fn from_name_lenient(name: &str) -> Self {
        let name = name.trim();
        TeamKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(TeamKind::Unknown)
    }
}

impl fmt::Display for TeamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamKind {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TeamKind::from_name(s))
    }
}

impl From<String> for TeamKind {
    fn from(s: String) -> Self {
        TeamKind::from_name(&s)
    }
}

impl From<TeamKind> for String {
    fn from(k: TeamKind) -> String {
        k.as_str().to_owned()
    }
}

// ── DisasterKind ──────────────────────────────────────────────────────────────

/// What happened at a disaster site.  Determines which teams are sent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DisasterKind {
    IndustrialAccident,
    TransportAccident,
    BuildingCollapse,
    FireAccident,
    #[default]
    Unknown,
}

impl DisasterKind {
    pub const ALL: [DisasterKind; 5] = [
        DisasterKind::IndustrialAccident,
        DisasterKind::TransportAccident,
        DisasterKind::BuildingCollapse,
        DisasterKind::FireAccident,
        DisasterKind::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DisasterKind::IndustrialAccident => "INDUSTRIAL_ACCIDENT",
            DisasterKind::TransportAccident  => "TRANSPORT_ACCIDENT",
            DisasterKind::BuildingCollapse   => "BUILDING_COLLAPSE",
            DisasterKind::FireAccident       => "FIRE_ACCIDENT",
            DisasterKind::Unknown            => "UNKNOWN_DISASTER",
        }
    }

    /// Total lookup on the exact canonical name: anything else, including a
    /// lowercase spelling, is `Unknown`.
    pub fn from_name(name: &str) -> Self {
        DisasterKind::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .unwrap_or(DisasterKind::Unknown)
    }

    /// Like [`from_name`](Self::from_name) but ignores surrounding
    /// whitespace and ASCII case.
    pub fn from_name_lenient(name: &str) -> Self {
        let name = name.trim();
        DisasterKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(DisasterKind::Unknown)
    }

    /// Team kinds this disaster needs, in the order they are dispatched.
    ///
    /// Order matters: within one disaster the requirements are matched one
    /// after another against the same registry.
    pub fn required_teams(self) -> &'static [TeamKind] {
        use TeamKind::*;
        match self {
            DisasterKind::IndustrialAccident => &[Ndrf, FireTruck, Ambulance],
            DisasterKind::TransportAccident  => &[Police, Ambulance],
            DisasterKind::BuildingCollapse   => &[Ndrf, Ambulance, FoodTruck],
            DisasterKind::FireAccident       => &[FireTruck, Ambulance],
            DisasterKind::Unknown            => &[Ambulance],
        }
    }
}

impl fmt::Display for DisasterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisasterKind {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DisasterKind::from_name(s))
    }
}

impl From<String> for DisasterKind {
    fn from(s: String) -> Self {
        DisasterKind::from_name(&s)
    }
}

impl From<DisasterKind> for String {
    fn from(k: DisasterKind) -> String {
        k.as_str().to_owned()
    }
}
