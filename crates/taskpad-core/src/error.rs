//! Error taxonomy for taskpad operations.
//!
//! Every failure is reported to whichever operation invoked it; nothing in
//! the core retries automatically.

use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Account creation rejected by the service (e.g. username taken).
    #[error("registration rejected ({status}): {body}")]
    Registration { status: StatusCode, body: String },

    /// Credentials rejected by the service.
    #[error("invalid credentials")]
    Authentication,

    /// A task request failed with a non-success status (including not-found).
    #[error("request failed ({status}): {body}")]
    Request { status: StatusCode, body: String },

    /// A task operation was invoked without an authenticated session.
    #[error("no active session; log in first")]
    InvalidSession,

    /// Task titles must contain at least one non-whitespace character.
    #[error("task title is empty")]
    EmptyTitle,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("credential store i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential store encoding: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Returns true when the failure is the service rejecting credentials.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication)
    }
}
