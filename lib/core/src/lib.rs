//! Core domain types and utilities for spec-atlas.
//!
//! This crate provides the foundational types shared by the conversation
//! layer and the graph bridge: strongly-typed identifiers, the ordered set
//! of graph nodes an answer points at, and the rootcause-based `Result`.

pub mod error;
pub mod highlight;
pub mod id;

pub use error::Result;
pub use highlight::HighlightSet;
pub use id::{FocusRequestId, MessageId, ParseIdError, QueryId};
