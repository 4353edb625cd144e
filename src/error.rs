//! Error types for issuance runs.

use crate::domain::models::Stage;
use thiserror::Error;

/// Every failure a stage can hit.
#[derive(Error, Debug)]
pub enum IssuanceError {
    /// The remote endpoint could not be reached or the exchange broke off.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote endpoint answered but reported a logical failure.
    #[error("application error: {payload}")]
    Application {
        status: Option<u16>,
        payload: serde_json::Value,
    },

    /// Upload metadata could not be assembled from the profile.
    #[error("invalid upload metadata: {0}")]
    Metadata(String),

    /// Local file write failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl IssuanceError {
    pub fn kind(&self) -> &'static str {
        match self {
            IssuanceError::Transport(_) => "transport",
            IssuanceError::Application { .. } => "application",
            IssuanceError::Metadata(_) => "metadata",
            IssuanceError::Io(_) => "io",
        }
    }

    /// Remote error payload when present, else the error text.
    pub fn detail(&self) -> serde_json::Value {
        match self {
            IssuanceError::Application { payload, .. } => payload.clone(),
            other => serde_json::Value::String(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for IssuanceError {
    fn from(e: reqwest::Error) -> Self {
        IssuanceError::Transport(e.to_string())
    }
}

impl From<csv::Error> for IssuanceError {
    fn from(e: csv::Error) -> Self {
        IssuanceError::Io(std::io::Error::from(e))
    }
}

/// Terminal outcome of an aborted run.
#[derive(Error, Debug)]
#[error("{stage} failed: {error}")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub error: IssuanceError,
    /// Issuer left registered on the service when a later stage failed.
    pub registered_issuer: Option<String>,
}
