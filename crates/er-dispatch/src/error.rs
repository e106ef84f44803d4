use er_core::NodeId;
use er_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{what} {label:?} is at node {node}, outside 1..={node_count}")]
    NodeOutOfRange {
        what:       &'static str,
        label:      String,
        node:       NodeId,
        node_count: u32,
    },

    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
