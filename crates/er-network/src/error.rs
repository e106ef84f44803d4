//! Network-construction error type.

use thiserror::Error;

use er_core::NodeId;

/// Errors produced by `er-network`.
///
/// Only construction can fail, and only under
/// [`ValidationPolicy::Strict`](er_core::ValidationPolicy::Strict).
/// Blocking, unblocking and routing report missing roads and unreachable
/// nodes as data.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("edge {u}-{v} has an endpoint outside 1..={node_count}")]
    EdgeOutOfRange { u: NodeId, v: NodeId, node_count: u32 },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
