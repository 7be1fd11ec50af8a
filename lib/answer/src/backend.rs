//! Answering backend abstraction.
//!
//! One request carries the user's question; one response carries the answer
//! text and the graph nodes it was drawn from. Both fields of the response
//! are optional on the wire.

use crate::error::BackendError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use spec_atlas_core::HighlightSet;
use std::sync::Mutex;

/// A question for the answering backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The user's question, already trimmed.
    pub query: String,
}

impl QueryRequest {
    /// Creates a new request.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// The backend's reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Markdown answer text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Node identifiers the answer relates to, most relevant first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Vec<String>>,
}

impl QueryResponse {
    /// Creates a response with an answer and no highlight.
    #[must_use]
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            answer: Some(text.into()),
            highlight: None,
        }
    }

    /// Sets the highlighted nodes.
    #[must_use]
    pub fn with_highlight<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.highlight = Some(nodes.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the answer text, treating an empty answer as absent.
    #[must_use]
    pub fn answer_text(&self) -> Option<&str> {
        self.answer.as_deref().filter(|text| !text.is_empty())
    }

    /// Returns the highlight set, treating an empty list as absent.
    #[must_use]
    pub fn highlight_set(&self) -> Option<HighlightSet> {
        self.highlight
            .as_ref()
            .filter(|nodes| !nodes.is_empty())
            .map(|nodes| HighlightSet::from(nodes.clone()))
    }
}

/// Trait for answering backends.
#[async_trait]
pub trait AnsweringBackend: Send + Sync {
    /// Answers a single question.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable, answers with a
    /// non-success status, or sends a body that is not a [`QueryResponse`].
    async fn answer(&self, request: &QueryRequest) -> Result<QueryResponse, BackendError>;

    /// Returns where the backend lives, for user-facing diagnostics.
    fn location(&self) -> &str;
}

/// A mock backend that can be configured to succeed or fail.
///
/// Records every request it receives.
pub struct MockBackend {
    /// If set, every request fails with this error.
    pub fail_with: Option<BackendError>,
    /// The response returned on success.
    pub response: QueryResponse,
    requests: Mutex<Vec<QueryRequest>>,
}

impl MockBackend {
    /// Creates a mock backend that succeeds with the given response.
    #[must_use]
    pub fn succeeding(response: QueryResponse) -> Self {
        Self {
            fail_with: None,
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock backend that fails with the given error.
    #[must_use]
    pub fn failing(error: BackendError) -> Self {
        Self {
            fail_with: Some(error),
            response: QueryResponse::default(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<QueryRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AnsweringBackend for MockBackend {
    async fn answer(&self, request: &QueryRequest) -> Result<QueryResponse, BackendError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(self.response.clone()),
        }
    }

    fn location(&self) -> &str {
        "mock://answering-backend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_query_field() {
        let json = serde_json::to_value(QueryRequest::new("What changed?")).expect("serialize");
        assert_eq!(json, serde_json::json!({"query": "What changed?"}));
    }

    #[test]
    fn response_fields_are_optional() {
        let parsed: QueryResponse = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(parsed.answer_text(), None);
        assert_eq!(parsed.highlight_set(), None);
    }

    #[test]
    fn empty_answer_counts_as_absent() {
        let parsed: QueryResponse =
            serde_json::from_str(r#"{"answer": "", "highlight": []}"#).expect("deserialize");
        assert_eq!(parsed.answer_text(), None);
        assert_eq!(parsed.highlight_set(), None);
    }

    #[test]
    fn highlight_keeps_backend_order() {
        let parsed: QueryResponse = serde_json::from_str(
            r#"{"answer": "Section 5 was revised.", "highlight": ["sec5", "sec4", "sec6"]}"#,
        )
        .expect("deserialize");
        let set = parsed.highlight_set().expect("highlight");
        assert_eq!(set.primary(), Some("sec5"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn highlight_of_wrong_type_is_malformed() {
        let result = serde_json::from_str::<QueryResponse>(r#"{"highlight": "sec5"}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn mock_backend_records_requests() {
        let backend = MockBackend::succeeding(QueryResponse::answer("ok"));
        let response = backend
            .answer(&QueryRequest::new("hello"))
            .await
            .expect("answer");

        assert_eq!(response.answer_text(), Some("ok"));
        assert_eq!(backend.requests(), vec![QueryRequest::new("hello")]);
    }

    #[tokio::test]
    async fn mock_backend_fails_when_configured() {
        let backend = MockBackend::failing(BackendError::Timeout {
            endpoint: "mock".to_string(),
        });
        let err = backend
            .answer(&QueryRequest::new("hello"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, BackendError::Timeout { .. }));
    }
}
