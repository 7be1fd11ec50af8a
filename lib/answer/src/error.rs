//! Error types for the answer crate.
//!
//! Every variant is a backend failure from the conversation's point of view;
//! the variants only exist so logs say which kind.

use std::fmt;

/// Errors from answering backend operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend could not be reached.
    Unreachable { endpoint: String, reason: String },
    /// The backend did not answer in time.
    Timeout { endpoint: String },
    /// The backend answered with a non-success status.
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The response body was not a valid answer payload.
    MalformedResponse { reason: String },
    /// The client could not be configured.
    InvalidConfig { reason: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable { endpoint, reason } => {
                write!(f, "answering backend at '{endpoint}' unreachable: {reason}")
            }
            Self::Timeout { endpoint } => {
                write!(f, "answering backend at '{endpoint}' timed out")
            }
            Self::Status {
                endpoint,
                status,
                body,
            } => {
                write!(
                    f,
                    "answering backend at '{endpoint}' returned HTTP {status}: {body}"
                )
            }
            Self::MalformedResponse { reason } => {
                write!(f, "malformed answer payload: {reason}")
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid answering backend configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for BackendError {}
