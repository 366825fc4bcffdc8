use thiserror::Error;

/// Errors that can occur while loading, mutating or persisting recipe state
#[derive(Error, Debug)]
pub enum ForkifyError {
    /// Bad user input (empty query, zero servings, malformed ingredient line)
    #[error("{0}")]
    ValidationError(String),

    /// Network failure or timeout talking to the recipe service
    #[error("{0}")]
    TransportError(String),

    /// The recipe service reports no such recipe
    #[error("{0}")]
    NotFoundError(String),

    /// Failed to read or write persisted bookmarks
    #[error("Bookmark storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// The service answered with a payload we could not decode
    #[error("Invalid response payload: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ForkifyError {
    /// Transport failure for a request that lost the race against its timer
    pub fn timeout(seconds: u64) -> Self {
        let unit = if seconds == 1 { "second" } else { "seconds" };
        ForkifyError::TransportError(format!(
            "Request took too long! Timeout after {} {}",
            seconds, unit
        ))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ForkifyError::ValidationError(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ForkifyError::TransportError(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ForkifyError::NotFoundError(_))
    }
}

impl From<reqwest::Error> for ForkifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ForkifyError::TransportError(format!("Request took too long! {}", err))
        } else if err.is_decode() {
            ForkifyError::TransportError(format!("Malformed response: {}", err))
        } else {
            ForkifyError::TransportError(err.to_string())
        }
    }
}
