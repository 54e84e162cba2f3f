use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeckError {
    #[error("API request failed: {status} {reason}")]
    Http { status: u16, reason: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("search cancelled")]
    Cancelled,
    #[error("settings error: {0}")]
    Settings(String),
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("io error: {0}")]
    Io(String),
}

impl DeckError {
    /// User aborts share the failure path but are not faults.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, DeckError::Cancelled)
    }

    /// Text shown to the user for a terminal search attempt.
    pub fn user_message(&self) -> String {
        match self {
            DeckError::Cancelled => "Search cancelled.".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
