//! Domain error types for server operations.
//!
//! Detailed errors are logged on the server; the browser only ever sees the
//! user-safe message from `into_server_error`.

use leptos::server_fn::error::ServerFnError;
use spec_atlas_answer::BackendError;
use std::fmt;

/// Errors from the chat server functions.
#[derive(Debug)]
pub enum ChatError {
    /// Request state was not installed on the router.
    MissingState { what: &'static str },
    /// The answering backend call failed.
    Backend { source: BackendError },
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingState { what } => write!(f, "missing request state: {what}"),
            Self::Backend { source } => write!(f, "answering backend failed: {source}"),
        }
    }
}

impl std::error::Error for ChatError {}

impl From<BackendError> for ChatError {
    fn from(source: BackendError) -> Self {
        Self::Backend { source }
    }
}

impl ChatError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            ChatError::MissingState { .. } => ServerFnError::new("Server misconfigured"),
            ChatError::Backend {
                source: BackendError::Timeout { .. },
            } => ServerFnError::new("Answering backend timed out"),
            ChatError::Backend { .. } => ServerFnError::new("Answering backend unavailable"),
        }
    }
}
