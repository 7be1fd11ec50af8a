//! Chat server functions and types.

use leptos::prelude::*;
use spec_atlas_answer::QueryResponse;

/// What the browser needs to know to set up the chat page.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ViewConfig {
    /// URL of the graph document loaded into the frame.
    pub graph_url: String,
    /// Where the answering backend lives, shown in failure messages.
    pub backend_endpoint: String,
}

/// Server function returning the view configuration.
#[server]
pub async fn load_view_config() -> Result<ViewConfig, ServerFnError> {
    use crate::server_helpers::get_view_config;

    get_view_config().await.map_err(|e| e.into_server_error())
}

/// Server function forwarding one question to the answering backend.
#[server]
pub async fn ask(query: String) -> Result<QueryResponse, ServerFnError> {
    use crate::error::ChatError;
    use crate::server_helpers::get_backend;
    use spec_atlas_answer::{AnsweringBackend, QueryRequest};

    let backend = get_backend().await.map_err(|e| e.into_server_error())?;

    backend
        .answer(&QueryRequest::new(query))
        .await
        .map_err(|e| {
            tracing::warn!(
                error = %e,
                endpoint = backend.location(),
                "Answering backend request failed"
            );
            ChatError::from(e).into_server_error()
        })
}
