//! Helper functions for server functions with proper error handling and logging.
//!
//! Request state is installed on the router as axum extensions in `main`.

use crate::error::ChatError;
use crate::pages::chat::ViewConfig;
use axum::Extension;
use spec_atlas_answer::AnsweringBackend;
use std::sync::Arc;

/// Returns the answering backend shared by all requests.
pub async fn get_backend() -> Result<Arc<dyn AnsweringBackend>, ChatError> {
    leptos_axum::extract::<Extension<Arc<dyn AnsweringBackend>>>()
        .await
        .map(|Extension(backend)| backend)
        .map_err(|e| {
            tracing::error!(error = %e, "Answering backend extension not installed");
            ChatError::MissingState {
                what: "answering backend",
            }
        })
}

/// Returns the browser-facing view configuration.
pub async fn get_view_config() -> Result<ViewConfig, ChatError> {
    leptos_axum::extract::<Extension<ViewConfig>>()
        .await
        .map(|Extension(config)| config)
        .map_err(|e| {
            tracing::error!(error = %e, "View config extension not installed");
            ChatError::MissingState {
                what: "view config",
            }
        })
}
