//! Error types for the conversation crate.
//!
//! - `InputRejected`: input the gate refused; callers ignore it silently
//! - `ConversationError`: why the last query did not produce an answer

use spec_atlas_answer::BackendError;
use spec_atlas_core::QueryId;
use std::fmt;

/// Why a piece of input was not dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRejected {
    /// Nothing left after trimming whitespace.
    Empty,
    /// A query is already in flight.
    Pending,
}

impl fmt::Display for InputRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "input is empty"),
            Self::Pending => write!(f, "a query is already in flight"),
        }
    }
}

impl std::error::Error for InputRejected {}

/// Failure of a dispatched query.
///
/// Its display text is what the conversation records as its last error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationError {
    /// The backend call failed.
    QueryFailed {
        query_id: QueryId,
        source: BackendError,
    },
    /// The query was cancelled before the backend answered.
    Cancelled { query_id: QueryId },
}

impl fmt::Display for ConversationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueryFailed { source, .. } => write!(f, "{source}"),
            Self::Cancelled { .. } => write!(f, "query cancelled"),
        }
    }
}

impl std::error::Error for ConversationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::QueryFailed { source, .. } => Some(source),
            Self::Cancelled { .. } => None,
        }
    }
}
