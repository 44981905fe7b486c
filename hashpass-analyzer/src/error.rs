#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Synth(#[from] hashpass_synth::Error),

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("unsupported analysis '{0}' (try performance, distribution, containers or complete)")]
    UnsupportedAnalysis(String),

    #[error("analysis cancelled")]
    Cancelled,

    #[error("analysis task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
