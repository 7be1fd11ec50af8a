//! Answering backend primitives for spec-atlas.
//!
//! The answering backend is the service that turns a question about the
//! document corpus into prose plus the graph nodes the answer relied on.
//! This crate only speaks to it:
//!
//! - **Contract**: [`AnsweringBackend`] with its wire types
//! - **HTTP client**: [`HttpAnsweringBackend`] (feature `http`)

pub mod backend;
pub mod error;
#[cfg(feature = "http")]
pub mod http;

pub use backend::{AnsweringBackend, MockBackend, QueryRequest, QueryResponse};
pub use error::BackendError;
#[cfg(feature = "http")]
pub use http::{HttpAnsweringBackend, HttpBackendConfig};
