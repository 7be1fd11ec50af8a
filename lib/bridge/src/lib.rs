//! Graph bridge for spec-atlas.
//!
//! The graph is rendered by an independent, sandboxed document. This crate
//! is the host's only way to talk to it:
//!
//! - **Protocol**: typed JSON messages exchanged over `postMessage`
//! - **Surface**: the transport port and the surface's load status
//! - **Bridge**: turns highlight sets into focus requests, tolerating a
//!   surface that is loading, failed, or refuses access

pub mod bridge;
pub mod error;
pub mod protocol;
pub mod surface;

pub use bridge::{ApplyOutcome, GraphBridge};
pub use error::BridgeError;
pub use protocol::{
    Animation, CHANNEL, Easing, FocusOptions, HostMessage, PROTOCOL_VERSION, SurfaceMessage,
};
pub use surface::{RecordingPort, SurfacePort, SurfaceStatus};
