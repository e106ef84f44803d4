use er_dispatch::DispatchError;
use er_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
