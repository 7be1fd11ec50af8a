//! Query dispatch.
//!
//! The dispatcher drives one query/response cycle at a time:
//!
//! 1. [`QueryDispatcher::begin`] gates the input, appends the user message
//!    and marks the conversation pending.
//! 2. The caller sends [`PendingQuery::request`] to the answering backend on
//!    whatever runtime it has.
//! 3. [`QueryDispatcher::complete`] records the answer, or the fallback text
//!    on failure, and clears pending.
//!
//! [`QueryDispatcher::dispatch`] runs the whole cycle against an
//! [`AnsweringBackend`] and a [`GraphBridge`].

use crate::error::{ConversationError, InputRejected};
use crate::input;
use crate::message::Message;
use crate::store::{ConversationState, ConversationStore};
use spec_atlas_answer::{AnsweringBackend, BackendError, QueryRequest, QueryResponse};
use spec_atlas_bridge::{GraphBridge, SurfacePort};
use spec_atlas_core::{HighlightSet, QueryId};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Assistant text used when the backend answers without an answer.
pub const PLACEHOLDER_ANSWER: &str =
    "I apologize, but I encountered an error processing your request.";

/// Assistant text used when the backend call fails.
#[must_use]
pub fn fallback_text(backend_location: &str) -> String {
    format!(
        "❌ Sorry, I encountered an error. Please make sure the backend server is running at {backend_location}"
    )
}

/// Whether a query is in flight.
#[derive(Debug, Clone, Default)]
pub enum DispatchState {
    #[default]
    Idle,
    Pending {
        query_id: QueryId,
        cancel: CancellationToken,
    },
}

impl DispatchState {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// A query that has been accepted and is waiting for the backend.
#[derive(Debug, Clone)]
pub struct PendingQuery {
    pub query_id: QueryId,
    /// The request to send, carrying the trimmed query text.
    pub request: QueryRequest,
    /// Cancelled when the query is cancelled or the dispatcher torn down.
    pub cancel: CancellationToken,
}

/// How a query ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The backend answered. `highlight` is set when the answer replaced the
    /// conversation's highlight and should be shown on the graph.
    Answered { highlight: Option<HighlightSet> },
    /// The backend call failed; the fallback text was appended.
    Failed(ConversationError),
    /// The query was cancelled; nothing was appended.
    Cancelled,
    /// The result belonged to a query that is no longer in flight.
    Stale,
}

/// Single-flight query state machine over a [`ConversationStore`].
#[derive(Debug)]
pub struct QueryDispatcher {
    store: ConversationStore,
    state: DispatchState,
    teardown: CancellationToken,
    backend_location: String,
}

impl QueryDispatcher {
    /// Creates a dispatcher for a backend reachable at `backend_location`.
    ///
    /// The location only appears in the fallback text shown on failure.
    #[must_use]
    pub fn new(backend_location: impl Into<String>) -> Self {
        Self {
            store: ConversationStore::new(),
            state: DispatchState::Idle,
            teardown: CancellationToken::new(),
            backend_location: backend_location.into(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ConversationState {
        self.store.state()
    }

    #[must_use]
    pub fn dispatch_state(&self) -> &DispatchState {
        &self.state
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    #[must_use]
    pub fn backend_location(&self) -> &str {
        &self.backend_location
    }

    /// Returns the token whose cancellation cancels every query of this
    /// dispatcher, including one awaited inside [`Self::dispatch`].
    #[must_use]
    pub fn teardown_token(&self) -> CancellationToken {
        self.teardown.clone()
    }

    /// Accepts `raw` as the next query.
    ///
    /// Appends the user message and marks the conversation pending before
    /// returning, so the message is visible before any network traffic.
    ///
    /// # Errors
    ///
    /// Returns [`InputRejected`] for blank input or while a query is in
    /// flight. Nothing is appended in that case.
    pub fn begin(&mut self, raw: &str) -> Result<PendingQuery, InputRejected> {
        let query = input::gate(raw, self.is_pending())?.to_string();

        let query_id = QueryId::new();
        let cancel = self.teardown.child_token();

        self.store.append(Message::user(query.clone()));
        self.store.set_pending(true);
        self.state = DispatchState::Pending {
            query_id,
            cancel: cancel.clone(),
        };

        info!(%query_id, query_len = query.len(), "Dispatching query");

        Ok(PendingQuery {
            query_id,
            request: QueryRequest::new(query),
            cancel,
        })
    }

    /// Resolves the in-flight query with the backend's result.
    ///
    /// Results for any other query are ignored and change nothing.
    pub fn complete(
        &mut self,
        query_id: QueryId,
        result: Result<QueryResponse, BackendError>,
    ) -> Resolution {
        match &self.state {
            DispatchState::Pending { query_id: current, .. } if *current == query_id => {}
            _ => {
                debug!(%query_id, "Ignoring result of stale query");
                return Resolution::Stale;
            }
        }
        self.state = DispatchState::Idle;

        let resolution = match result {
            Ok(response) => {
                let text = response.answer_text().unwrap_or(PLACEHOLDER_ANSWER);
                self.store.append(Message::assistant(text));
                self.store.set_error(None);

                let highlight = response.highlight_set();
                if let Some(highlight) = &highlight {
                    self.store.replace_highlight(highlight.clone());
                }
                info!(
                    %query_id,
                    has_answer = response.answer_text().is_some(),
                    highlight_count = highlight.as_ref().map_or(0, HighlightSet::len),
                    "Query answered"
                );
                Resolution::Answered { highlight }
            }
            Err(source) => {
                warn!(%query_id, error = %source, "Query failed");
                let error = ConversationError::QueryFailed { query_id, source };
                self.store
                    .append(Message::assistant(fallback_text(&self.backend_location)));
                self.store.set_error(Some(error.to_string()));
                Resolution::Failed(error)
            }
        };

        self.store.set_pending(false);
        resolution
    }

    /// Cancels the in-flight query, if any.
    ///
    /// Clears pending without appending a message; a late result for the
    /// cancelled query is stale. Returns false when nothing was in flight.
    pub fn cancel(&mut self) -> bool {
        let DispatchState::Pending { query_id, cancel } = std::mem::take(&mut self.state) else {
            return false;
        };

        cancel.cancel();
        info!(%query_id, "Query cancelled");
        self.store.set_pending(false);
        self.store
            .set_error(Some(ConversationError::Cancelled { query_id }.to_string()));
        true
    }

    /// Runs one full query cycle.
    ///
    /// A highlight carried by the answer is applied to `bridge`. Cancelling
    /// [`Self::teardown_token`] while the backend call is outstanding
    /// resolves the query as cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`InputRejected`] if the input was not accepted; no request
    /// is sent in that case.
    pub async fn dispatch<B, P>(
        &mut self,
        backend: &B,
        bridge: &mut GraphBridge<P>,
        raw: &str,
    ) -> Result<Resolution, InputRejected>
    where
        B: AnsweringBackend + ?Sized,
        P: SurfacePort,
    {
        let pending = self.begin(raw)?;

        let Some(result) = pending
            .cancel
            .run_until_cancelled(backend.answer(&pending.request))
            .await
        else {
            self.cancel();
            return Ok(Resolution::Cancelled);
        };

        let resolution = self.complete(pending.query_id, result);
        if let Resolution::Answered {
            highlight: Some(highlight),
        } = &resolution
        {
            let outcome = bridge.apply(highlight);
            debug!(query_id = %pending.query_id, ?outcome, "Applied highlight");
        }
        Ok(resolution)
    }
}
