use thiserror::Error;

/// Errors raised while building metadata documents or talking to a Dataverse instance.
#[derive(Debug, Error)]
pub enum DataverseError {
    /// Caller supplied data that violates a model invariant.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The transport failed or the server answered with a non-success response.
    #[error("Request to '{uri}' failed{}: {message}", status_suffix(.status))]
    Request {
        status: Option<u16>,
        uri: String,
        message: String,
    },

    /// An operation could not even be attempted, e.g. because no address was given.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// A request body could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

impl DataverseError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        DataverseError::Validation(message.into())
    }

    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        DataverseError::Precondition(message.into())
    }

    /// Returns the HTTP status attached to a request error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            DataverseError::Request { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DataverseError>;
