//! Strongly typed, zero-cost identifier wrappers and the cost model.
//!
//! Road nodes are numbered `1..=N`; index 0 is never a valid node, so
//! adjacency arrays are allocated with `N + 1` rows and `NodeId::index()`
//! addresses them directly.
//!
//! # Cost model
//!
//! Edge weights and path distances are unsigned [`Cost`] values.  A single
//! sentinel, [`INFINITY`], means both "blocked road" (as a weight) and
//! "unreachable" (as a distance).  There is no separate boolean: any cost
//! `>= INFINITY` is unreachable, and every comparison goes through
//! [`is_unreachable`] so the boundary value itself is treated consistently.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Edge weight / path distance.  Unsigned, so negative weights cannot enter
/// the graph.
pub type Cost = u64;

/// Infinite-distance sentinel.  Also the live weight of a blocked edge.
pub const INFINITY: Cost = 1_000_000_000;

/// `true` if `cost` is at or beyond the infinite sentinel.
#[inline(always)]
pub fn is_unreachable(cost: Cost) -> bool {
    cost >= INFINITY
}

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// A road-network node, numbered from 1.  `NodeId::INVALID` doubles as
    /// the "no predecessor" marker in shortest-path output.
    pub struct NodeId(u32);
}

typed_id! {
    /// Submission id of a disaster.  Lower ids were submitted earlier and win
    /// ties on equal urgency.
    pub struct DisasterId(u32);
}
