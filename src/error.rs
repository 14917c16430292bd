use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("cannot decode grid locator '{locator}': {reason}")]
    Grid { locator: String, reason: String },
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("unexpected response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cache error at {path}")]
    Cache {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ProgressError {
    /// Process exit status for this failure category.
    pub fn exit_code(&self) -> u8 {
        match self {
            ProgressError::InvalidInput(_) | ProgressError::Grid { .. } => 2,
            ProgressError::Http { .. } | ProgressError::Status { .. } => 3,
            ProgressError::Decode { .. } => 4,
            ProgressError::Cache { .. } => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProgressError>;
