use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("CODEGEN_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("request to agent API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("agent API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode agent API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    /// True for failures detected before any network activity.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DispatchError::MissingApiKey | DispatchError::InvalidBaseUrl(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
