//! Host/surface message protocol.
//!
//! Messages travel as JSON strings through `postMessage`. Every message is
//! an object carrying `channel` and `version` next to its `type` tag, so the
//! host can ignore unrelated traffic on the same window.
//!
//! ```json
//! {"channel":"spec-atlas/graph","version":1,"type":"focus","request_id":"01J...",
//!  "node":"sec5","highlight":["sec5","sec4"],"scale":1.2,
//!  "animation":{"duration_ms":1000,"easing":"easeInOutQuad"}}
//! ```

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use spec_atlas_core::FocusRequestId;

/// Channel name shared by host and surface.
pub const CHANNEL: &str = "spec-atlas/graph";

/// Protocol version spoken by this host.
pub const PROTOCOL_VERSION: u64 = 1;

const DEFAULT_FOCUS_SCALE: f64 = 1.2;
const DEFAULT_FOCUS_DURATION_MS: u32 = 1000;

/// Easing curve for the focus animation, named as the graph renderer names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInOutCubic,
}

/// Animation used when moving the viewport to a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Duration in milliseconds.
    pub duration_ms: u32,
    /// Easing curve.
    pub easing: Easing,
}

/// Zoom and animation applied to every focus request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusOptions {
    /// Zoom factor the surface applies around the focused node.
    pub scale: f64,
    /// Viewport transition.
    pub animation: Animation,
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_FOCUS_SCALE,
            animation: Animation {
                duration_ms: DEFAULT_FOCUS_DURATION_MS,
                easing: Easing::EaseInOutQuad,
            },
        }
    }
}

/// Messages the host sends to the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    /// Asks the surface to announce itself. A loaded surface answers with
    /// [`SurfaceMessage::Ready`].
    Hello,
    /// Center the viewport on `node`.
    ///
    /// `highlight` is the full set the node was taken from; the surface may
    /// use the remainder for secondary emphasis.
    Focus {
        request_id: FocusRequestId,
        node: String,
        highlight: Vec<String>,
        scale: f64,
        animation: Animation,
    },
}

/// Messages the surface sends to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceMessage {
    /// The surface's listener is installed and the graph is rendered.
    Ready,
    /// Answer to a focus request. `found` is false when the node does not exist.
    FocusAck {
        request_id: FocusRequestId,
        found: bool,
    },
}

/// Encodes a host message into its wire form.
///
/// # Errors
///
/// Returns an error if the message cannot be serialized.
pub fn encode_host_message(message: &HostMessage) -> spec_atlas_core::Result<String, BridgeError> {
    let mut value = serde_json::to_value(message).map_err(|e| BridgeError::EncodeFailed {
        reason: e.to_string(),
    })?;
    let JsonValue::Object(fields) = &mut value else {
        return Err(BridgeError::EncodeFailed {
            reason: "host message is not an object".to_string(),
        }
        .into());
    };
    fields.insert("channel".to_string(), JsonValue::from(CHANNEL));
    fields.insert("version".to_string(), JsonValue::from(PROTOCOL_VERSION));
    Ok(value.to_string())
}

/// Decodes a message received from the surface.
///
/// Returns `Ok(None)` for messages on another channel, which the host must
/// ignore.
///
/// # Errors
///
/// Returns an error if a message on our channel is malformed or uses a
/// protocol version this host does not speak.
pub fn decode_surface_message(
    raw: &str,
) -> spec_atlas_core::Result<Option<SurfaceMessage>, BridgeError> {
    let Ok(value) = serde_json::from_str::<JsonValue>(raw) else {
        return Ok(None);
    };
    if value.get("channel").and_then(JsonValue::as_str) != Some(CHANNEL) {
        return Ok(None);
    }

    match value.get("version").and_then(JsonValue::as_u64) {
        Some(PROTOCOL_VERSION) => {}
        Some(version) => return Err(BridgeError::UnsupportedVersion { version }.into()),
        None => {
            return Err(BridgeError::DecodeFailed {
                reason: "missing protocol version".to_string(),
            }
            .into());
        }
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| BridgeError::DecodeFailed {
            reason: e.to_string(),
        })
        .map_err(Into::into)
}
