//! Error types for the bridge crate.
//!
//! None of these ever reach the conversation. The bridge logs them and
//! reports an outcome instead.

use std::fmt;

/// Errors from talking to the graph surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The surface document cannot be reached (missing, cross-origin, sandboxed).
    SurfaceInaccessible { reason: String },
    /// A host message could not be encoded.
    EncodeFailed { reason: String },
    /// A surface message could not be decoded.
    DecodeFailed { reason: String },
    /// The surface speaks a different protocol version.
    UnsupportedVersion { version: u64 },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceInaccessible { reason } => {
                write!(f, "graph surface inaccessible: {reason}")
            }
            Self::EncodeFailed { reason } => {
                write!(f, "failed to encode surface message: {reason}")
            }
            Self::DecodeFailed { reason } => {
                write!(f, "failed to decode surface message: {reason}")
            }
            Self::UnsupportedVersion { version } => {
                write!(f, "unsupported surface protocol version {version}")
            }
        }
    }
}

impl std::error::Error for BridgeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inaccessible_display() {
        let err = BridgeError::SurfaceInaccessible {
            reason: "cross-origin frame".to_string(),
        };
        assert!(err.to_string().contains("cross-origin frame"));
    }
}
