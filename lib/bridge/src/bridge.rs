//! Projection of highlight sets onto the graph surface.
//!
//! The bridge holds no conversation state. It remembers the last highlight
//! it delivered (to skip repeats) and at most one highlight that arrived
//! before the surface was ready (latest wins).

use crate::protocol::{self, FocusOptions, HostMessage, SurfaceMessage};
use crate::surface::{SurfacePort, SurfaceStatus};
use spec_atlas_core::{FocusRequestId, HighlightSet};
use tracing::{debug, info, trace, warn};

/// What `apply` did with a highlight set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The set was empty; the surface was not touched.
    Empty,
    /// The set equals the one already on screen.
    Redundant,
    /// The surface is still loading; the set is sent once it is ready.
    Deferred,
    /// The surface failed to load; the set was discarded.
    Dropped,
    /// A focus request was posted.
    Sent(FocusRequestId),
    /// The surface refused the request. Logged, otherwise ignored.
    Unreachable,
}

/// Host-side bridge to one graph surface.
#[derive(Debug)]
pub struct GraphBridge<P> {
    port: P,
    status: SurfaceStatus,
    options: FocusOptions,
    last_applied: Option<HighlightSet>,
    deferred: Option<HighlightSet>,
}

impl<P: SurfacePort> GraphBridge<P> {
    /// Creates a bridge for a surface that has not loaded yet.
    #[must_use]
    pub fn new(port: P) -> Self {
        Self {
            port,
            status: SurfaceStatus::Loading,
            options: FocusOptions::default(),
            last_applied: None,
            deferred: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> &SurfaceStatus {
        &self.status
    }

    /// Returns the transport, e.g. to check where a window message came from.
    #[must_use]
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Returns the highlight most recently delivered to the surface.
    #[must_use]
    pub fn last_applied(&self) -> Option<&HighlightSet> {
        self.last_applied.as_ref()
    }

    /// Returns the highlight waiting for the surface to become ready.
    #[must_use]
    pub fn deferred(&self) -> Option<&HighlightSet> {
        self.deferred.as_ref()
    }

    /// Asks the surface to focus the first node of `highlight`.
    ///
    /// Never fails: every problem with the surface is logged and reported
    /// through the returned outcome.
    pub fn apply(&mut self, highlight: &HighlightSet) -> ApplyOutcome {
        if highlight.is_empty() {
            return ApplyOutcome::Empty;
        }

        match &self.status {
            SurfaceStatus::Loading => {
                debug!(
                    nodes = highlight.len(),
                    "Graph surface not ready, deferring highlight"
                );
                self.deferred = Some(highlight.clone());
                ApplyOutcome::Deferred
            }
            SurfaceStatus::Failed { reason } => {
                debug!(%reason, "Graph surface unavailable, dropping highlight");
                ApplyOutcome::Dropped
            }
            SurfaceStatus::Ready => {
                if self.last_applied.as_ref() == Some(highlight) {
                    trace!("Highlight already applied");
                    return ApplyOutcome::Redundant;
                }
                self.send(highlight)
            }
        }
    }

    /// Records that the surface document finished loading.
    ///
    /// Flushes the deferred highlight, if any. Ignored once the surface has
    /// failed.
    pub fn surface_loaded(&mut self) -> Option<ApplyOutcome> {
        match self.status {
            SurfaceStatus::Ready => None,
            SurfaceStatus::Failed { .. } => {
                debug!("Ignoring load signal from failed graph surface");
                None
            }
            SurfaceStatus::Loading => {
                info!("Graph surface ready");
                self.status = SurfaceStatus::Ready;
                self.deferred.take().map(|highlight| self.send(&highlight))
            }
        }
    }

    /// Records that the surface document failed to load.
    pub fn surface_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(%reason, "Graph surface failed to load");
        self.status = SurfaceStatus::Failed { reason };
        self.deferred = None;
    }

    /// Asks a surface that may have loaded unobserved to announce itself.
    ///
    /// The host can start listening after the surface document has already
    /// loaded and sent its `ready`. A loaded surface answers this with a
    /// fresh `ready`; one still loading sends its own once it is done.
    /// Returns true if the request was posted.
    pub fn hello(&mut self) -> bool {
        if !matches!(self.status, SurfaceStatus::Loading) {
            return false;
        }

        let posted = protocol::encode_host_message(&HostMessage::Hello)
            .and_then(|encoded| self.port.post(&encoded));
        match posted {
            Ok(()) => {
                debug!("Asked graph surface to announce itself");
                true
            }
            Err(e) => {
                debug!(error = %e, "Could not reach graph surface");
                false
            }
        }
    }

    /// Handles a raw message received from the surface.
    ///
    /// Messages on other channels are ignored. Malformed messages are logged
    /// and ignored.
    pub fn handle_surface_message(&mut self, raw: &str) -> Option<ApplyOutcome> {
        let message = match protocol::decode_surface_message(raw) {
            Ok(Some(message)) => message,
            Ok(None) => return None,
            Err(e) => {
                debug!(error = %e, "Ignoring malformed graph surface message");
                return None;
            }
        };

        match message {
            SurfaceMessage::Ready => self.surface_loaded(),
            SurfaceMessage::FocusAck { request_id, found } => {
                if found {
                    trace!(%request_id, "Graph surface focused node");
                } else {
                    trace!(%request_id, "Graph surface has no such node");
                }
                None
            }
        }
    }

    fn send(&mut self, highlight: &HighlightSet) -> ApplyOutcome {
        let Some(node) = highlight.primary() else {
            return ApplyOutcome::Empty;
        };

        let request_id = FocusRequestId::new();
        let message = HostMessage::Focus {
            request_id,
            node: node.to_string(),
            highlight: highlight.as_slice().to_vec(),
            scale: self.options.scale,
            animation: self.options.animation,
        };

        let posted = protocol::encode_host_message(&message)
            .and_then(|encoded| self.port.post(&encoded));

        match posted {
            Ok(()) => {
                debug!(%request_id, node, "Posted focus request to graph surface");
                self.last_applied = Some(highlight.clone());
                ApplyOutcome::Sent(request_id)
            }
            Err(e) => {
                debug!(error = %e, node, "Could not reach graph surface");
                ApplyOutcome::Unreachable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::CHANNEL;
    use crate::surface::RecordingPort;
    use serde_json::Value as JsonValue;
    use std::sync::Arc;

    fn ready_bridge() -> (GraphBridge<Arc<RecordingPort>>, Arc<RecordingPort>) {
        let port = Arc::new(RecordingPort::new());
        let mut bridge = GraphBridge::new(port.clone());
        assert_eq!(bridge.surface_loaded(), None);
        (bridge, port)
    }

    fn posted_json(port: &RecordingPort) -> Vec<JsonValue> {
        port.posted()
            .iter()
            .map(|raw| serde_json::from_str(raw).expect("json"))
            .collect()
    }

    fn ready_message() -> String {
        serde_json::json!({"channel": CHANNEL, "version": 1, "type": "ready"}).to_string()
    }

    #[test]
    fn focuses_first_node_with_fixed_options() {
        let (mut bridge, port) = ready_bridge();

        let outcome = bridge.apply(&HighlightSet::new(["n1", "n2"]));

        assert!(matches!(outcome, ApplyOutcome::Sent(_)));
        let posted = posted_json(&port);
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0]["type"], "focus");
        assert_eq!(posted[0]["node"], "n1");
        assert_eq!(posted[0]["highlight"], serde_json::json!(["n1", "n2"]));
        assert_eq!(posted[0]["scale"], 1.2);
        assert_eq!(posted[0]["animation"]["duration_ms"], 1000);
        assert_eq!(posted[0]["animation"]["easing"], "easeInOutQuad");
    }

    #[test]
    fn empty_highlight_never_touches_surface() {
        let port = Arc::new(RecordingPort::denying());
        let mut bridge = GraphBridge::new(port.clone());
        bridge.surface_loaded();

        assert_eq!(bridge.apply(&HighlightSet::empty()), ApplyOutcome::Empty);
        assert_eq!(port.attempts(), 0);
    }

    #[test]
    fn denied_access_is_not_an_error() {
        let port = Arc::new(RecordingPort::denying());
        let mut bridge = GraphBridge::new(port.clone());
        bridge.surface_loaded();

        let outcome = bridge.apply(&HighlightSet::new(["sec5"]));

        assert_eq!(outcome, ApplyOutcome::Unreachable);
        assert_eq!(port.attempts(), 1);
        assert!(bridge.last_applied().is_none());
        assert!(bridge.status().is_ready());
    }

    #[test]
    fn repeated_highlight_is_skipped() {
        let (mut bridge, port) = ready_bridge();
        let highlight = HighlightSet::new(["sec5"]);

        bridge.apply(&highlight);
        assert_eq!(bridge.apply(&highlight), ApplyOutcome::Redundant);
        assert!(matches!(
            bridge.apply(&HighlightSet::new(["sec6"])),
            ApplyOutcome::Sent(_)
        ));
        assert_eq!(port.posted().len(), 2);
    }

    #[test]
    fn highlight_before_ready_is_flushed_on_load() {
        let port = Arc::new(RecordingPort::new());
        let mut bridge = GraphBridge::new(port.clone());

        assert_eq!(
            bridge.apply(&HighlightSet::new(["old"])),
            ApplyOutcome::Deferred
        );
        assert_eq!(
            bridge.apply(&HighlightSet::new(["new"])),
            ApplyOutcome::Deferred
        );
        assert!(port.posted().is_empty());

        let flushed = bridge.handle_surface_message(&ready_message());

        assert!(matches!(flushed, Some(ApplyOutcome::Sent(_))));
        let posted = posted_json(&port);
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0]["node"], "new");
        assert!(bridge.deferred().is_none());
    }

    #[test]
    fn ready_after_late_hello_flushes_deferred_highlight() {
        let port = Arc::new(RecordingPort::new());
        let mut bridge = GraphBridge::new(port.clone());
        assert_eq!(
            bridge.apply(&HighlightSet::new(["sec5"])),
            ApplyOutcome::Deferred
        );

        // The surface's own ready went out before anyone listened.
        assert!(bridge.hello());
        let posted = posted_json(&port);
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0]["type"], "hello");

        let flushed = bridge.handle_surface_message(&ready_message());

        assert!(matches!(flushed, Some(ApplyOutcome::Sent(_))));
        assert!(bridge.status().is_ready());
        let posted = posted_json(&port);
        assert_eq!(posted.len(), 2);
        assert_eq!(posted[1]["type"], "focus");
        assert_eq!(posted[1]["node"], "sec5");
    }

    #[test]
    fn hello_only_while_loading() {
        let (mut bridge, port) = ready_bridge();
        assert!(!bridge.hello());

        let failed = Arc::new(RecordingPort::new());
        let mut failed_bridge = GraphBridge::new(failed.clone());
        failed_bridge.surface_failed("Failed to load graph visualization");
        assert!(!failed_bridge.hello());

        assert_eq!(port.attempts(), 0);
        assert_eq!(failed.attempts(), 0);
    }

    #[test]
    fn unreachable_hello_leaves_surface_loading() {
        let port = Arc::new(RecordingPort::denying());
        let mut bridge = GraphBridge::new(port.clone());

        assert!(!bridge.hello());
        assert_eq!(port.attempts(), 1);
        assert_eq!(bridge.status(), &SurfaceStatus::Loading);
    }

    #[test]
    fn failed_surface_drops_highlights_and_stays_failed() {
        let port = Arc::new(RecordingPort::new());
        let mut bridge = GraphBridge::new(port.clone());
        bridge.apply(&HighlightSet::new(["sec5"]));

        bridge.surface_failed("Failed to load graph visualization");

        assert!(bridge.status().is_failed());
        assert!(bridge.deferred().is_none());
        assert_eq!(
            bridge.apply(&HighlightSet::new(["sec6"])),
            ApplyOutcome::Dropped
        );
        assert_eq!(bridge.surface_loaded(), None);
        assert!(bridge.status().is_failed());
        assert_eq!(port.attempts(), 0);
    }

    #[test]
    fn missing_node_ack_is_silent() {
        let (mut bridge, _port) = ready_bridge();
        let ApplyOutcome::Sent(request_id) = bridge.apply(&HighlightSet::new(["nope"])) else {
            panic!("expected focus request");
        };

        let ack = serde_json::json!({
            "channel": CHANNEL,
            "version": 1,
            "type": "focus_ack",
            "request_id": request_id,
            "found": false,
        })
        .to_string();

        assert_eq!(bridge.handle_surface_message(&ack), None);
        assert!(bridge.status().is_ready());
    }

    #[test]
    fn unrelated_window_messages_are_ignored() {
        let port = Arc::new(RecordingPort::new());
        let mut bridge = GraphBridge::new(port);

        assert_eq!(bridge.handle_surface_message("hello"), None);
        assert_eq!(
            bridge.handle_surface_message(r#"{"channel":"spec-atlas/graph","version":9,"type":"ready"}"#),
            None
        );
        assert_eq!(bridge.status(), &SurfaceStatus::Loading);
    }
}
