//! The embedded graph surface as seen from the host.

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Load status of the graph surface.
///
/// Independent of the conversation: the chat keeps working whatever the
/// surface does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SurfaceStatus {
    /// The surface document is still loading.
    #[default]
    Loading,
    /// The surface has loaded and accepts focus requests.
    Ready,
    /// The surface failed to load. Terminal for this surface instance.
    Failed { reason: String },
}

impl SurfaceStatus {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Transport to the surface document.
///
/// Implementations deliver an encoded protocol message and nothing else; a
/// successful post says nothing about whether the surface acted on it.
pub trait SurfacePort {
    /// Posts an encoded message to the surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be reached.
    fn post(&self, message: &str) -> spec_atlas_core::Result<(), BridgeError>;
}

impl<T: SurfacePort + ?Sized> SurfacePort for Arc<T> {
    fn post(&self, message: &str) -> spec_atlas_core::Result<(), BridgeError> {
        (**self).post(message)
    }
}

/// A port that records posted messages, optionally refusing them.
#[derive(Debug, Default)]
pub struct RecordingPort {
    posted: Mutex<Vec<String>>,
    attempts: AtomicUsize,
    deny: bool,
}

impl RecordingPort {
    /// Creates a port that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a port that refuses every message, like a cross-origin frame.
    #[must_use]
    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::default()
        }
    }

    /// Returns the messages accepted so far.
    #[must_use]
    pub fn posted(&self) -> Vec<String> {
        self.posted
            .lock()
            .map(|posted| posted.clone())
            .unwrap_or_default()
    }

    /// Returns how many times `post` was called, including refused calls.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl SurfacePort for RecordingPort {
    fn post(&self, message: &str) -> spec_atlas_core::Result<(), BridgeError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.deny {
            return Err(BridgeError::SurfaceInaccessible {
                reason: "access denied".to_string(),
            }
            .into());
        }
        if let Ok(mut posted) = self.posted.lock() {
            posted.push(message.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_loading() {
        let status = SurfaceStatus::default();
        assert!(!status.is_ready());
        assert!(!status.is_failed());
    }

    #[test]
    fn denying_port_refuses() {
        let port = RecordingPort::denying();
        assert!(port.post("{}").is_err());
        assert!(port.posted().is_empty());
        assert_eq!(port.attempts(), 1);
    }

    #[test]
    fn recording_port_keeps_messages() {
        let port = RecordingPort::new();
        port.post("one").expect("post");
        port.post("two").expect("post");
        assert_eq!(port.posted(), vec!["one".to_string(), "two".to_string()]);
    }
}
