//! HTTP client for the answering backend.
//!
//! Posts `{ "query": ... }` as JSON to a single fixed endpoint and parses the
//! `{ "answer"?, "highlight"? }` reply.

use crate::backend::{AnsweringBackend, QueryRequest, QueryResponse};
use crate::error::BackendError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Configuration for the HTTP answering backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpBackendConfig {
    /// Full URL of the query endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_endpoint() -> String {
    "http://localhost:5000/api/query".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl HttpBackendConfig {
    /// Creates a configuration for the given endpoint with the default timeout.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_seconds = timeout.as_secs().max(1);
        self
    }
}

/// Answering backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAnsweringBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnsweringBackend {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is empty or the client cannot be built.
    pub fn new(config: HttpBackendConfig) -> spec_atlas_core::Result<Self, BackendError> {
        if config.endpoint.trim().is_empty() {
            return Err(BackendError::InvalidConfig {
                reason: "endpoint must not be empty".to_string(),
            }
            .into());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| BackendError::InvalidConfig {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    /// Returns the endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnsweringBackend for HttpAnsweringBackend {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    async fn answer(&self, request: &QueryRequest) -> Result<QueryResponse, BackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach answering backend");
                if e.is_timeout() {
                    BackendError::Timeout {
                        endpoint: self.endpoint.clone(),
                    }
                } else {
                    BackendError::Unreachable {
                        endpoint: self.endpoint.clone(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Answering backend returned error");
            return Err(BackendError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read answering backend response");
            if e.is_timeout() {
                BackendError::Timeout {
                    endpoint: self.endpoint.clone(),
                }
            } else {
                BackendError::MalformedResponse {
                    reason: e.to_string(),
                }
            }
        })?;

        let parsed: QueryResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse answering backend response");
            BackendError::MalformedResponse {
                reason: e.to_string(),
            }
        })?;

        debug!(
            has_answer = parsed.answer_text().is_some(),
            highlight_count = parsed.highlight.as_ref().map_or(0, Vec::len),
            "Received answer"
        );

        Ok(parsed)
    }

    fn location(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{addr}/api/query")
    }

    fn backend(endpoint: String) -> HttpAnsweringBackend {
        HttpAnsweringBackend::new(HttpBackendConfig::new(endpoint)).expect("client")
    }

    #[tokio::test]
    async fn posts_query_and_parses_answer() {
        let router = Router::new().route(
            "/api/query",
            post(|Json(request): Json<QueryRequest>| async move {
                Json(serde_json::json!({
                    "answer": format!("You asked: {}", request.query),
                    "highlight": ["sec5", "sec5.1"],
                }))
            }),
        );
        let endpoint = serve(router).await;

        let response = backend(endpoint)
            .answer(&QueryRequest::new("What changed?"))
            .await
            .expect("answer");

        assert_eq!(response.answer_text(), Some("You asked: What changed?"));
        assert_eq!(
            response.highlight_set().and_then(|s| s.primary().map(str::to_owned)),
            Some("sec5".to_string())
        );
    }

    #[tokio::test]
    async fn error_status_is_failure() {
        let router = Router::new().route(
            "/api/query",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"answer": "Server error occurred.", "highlight": []})),
                )
            }),
        );
        let endpoint = serve(router).await;

        let err = backend(endpoint)
            .answer(&QueryRequest::new("anything"))
            .await
            .expect_err("should fail");

        assert!(matches!(err, BackendError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let router = Router::new().route("/api/query", post(|| async { "<html>oops</html>" }));
        let endpoint = serve(router).await;

        let err = backend(endpoint)
            .answer(&QueryRequest::new("anything"))
            .await
            .expect_err("should fail");

        assert!(matches!(err, BackendError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn connection_refused_is_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let err = backend(format!("http://{addr}/api/query"))
            .answer(&QueryRequest::new("anything"))
            .await
            .expect_err("should fail");

        assert!(matches!(err, BackendError::Unreachable { .. }));
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let router = Router::new().route(
            "/api/query",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(serde_json::json!({"answer": "late"}))
            }),
        );
        let endpoint = serve(router).await;
        let config = HttpBackendConfig::new(endpoint).with_timeout(Duration::from_secs(1));
        let backend = HttpAnsweringBackend::new(config).expect("client");

        let err = backend
            .answer(&QueryRequest::new("anything"))
            .await
            .expect_err("should fail");

        assert!(matches!(err, BackendError::Timeout { .. }));
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let result = HttpAnsweringBackend::new(HttpBackendConfig::new("  "));
        assert!(result.is_err());
    }

    #[test]
    fn config_defaults_point_at_local_backend() {
        let config = HttpBackendConfig::default();
        assert_eq!(config.endpoint, "http://localhost:5000/api/query");
        assert_eq!(config.timeout_seconds, 60);
    }
}
