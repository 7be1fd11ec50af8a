//! Conversation layer for spec-atlas.
//!
//! This crate provides:
//!
//! - **Store**: the append-only message log, pending flag and current highlight
//! - **Dispatcher**: the single-flight query/response state machine
//! - **Input**: the gate deciding what may be dispatched, and composer keys
//! - **Render**: assistant markdown to HTML

pub mod dispatch;
pub mod error;
pub mod input;
pub mod message;
pub mod render;
pub mod store;

pub use dispatch::{
    DispatchState, PLACEHOLDER_ANSWER, PendingQuery, QueryDispatcher, Resolution, fallback_text,
};
pub use error::{ConversationError, InputRejected};
pub use input::{InputSizing, KeyAction, Modifiers, gate, key_action};
pub use message::{Message, Sender};
pub use render::{MessageBody, render_markdown, render_message};
pub use store::{ConversationState, ConversationStore};
