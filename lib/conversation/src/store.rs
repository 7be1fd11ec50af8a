//! Conversation state.
//!
//! The store is the single owner of the message log. It validates nothing
//! beyond message shape; ordering and single-flight are the dispatcher's job.

use crate::message::Message;
use spec_atlas_core::HighlightSet;

/// Snapshot of everything a view needs to render the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    /// Append-only log in creation order.
    pub messages: Vec<Message>,
    /// True between dispatch and the resolving assistant message.
    pub pending: bool,
    /// Diagnostic for the most recent failed or cancelled query.
    pub last_error: Option<String>,
    /// Nodes the most recent answer pointed at.
    pub highlight: HighlightSet,
}

/// Owner of the conversation state.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    state: ConversationState,
}

impl ConversationStore {
    /// Creates an empty conversation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the end of the log.
    pub fn append(&mut self, message: Message) {
        self.state.messages.push(message);
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.state.pending = pending;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.state.last_error = error;
    }

    /// Replaces the current highlight set.
    pub fn replace_highlight(&mut self, highlight: HighlightSet) {
        self.state.highlight = highlight;
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &ConversationState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;

    #[test]
    fn new_store_is_idle_and_empty() {
        let store = ConversationStore::new();
        let state = store.state();
        assert!(state.messages.is_empty());
        assert!(!state.pending);
        assert!(state.last_error.is_none());
        assert!(state.highlight.is_empty());
    }

    #[test]
    fn append_keeps_creation_order() {
        let mut store = ConversationStore::new();
        store.append(Message::user("first"));
        store.append(Message::assistant("second"));
        store.append(Message::user("third"));

        let texts: Vec<_> = store.state().messages.iter().map(Message::text).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(
            store.state().messages.last().map(Message::sender),
            Some(Sender::User)
        );
    }

    #[test]
    fn mutations_are_visible_in_state() {
        let mut store = ConversationStore::new();
        store.set_pending(true);
        store.set_error(Some("boom".to_string()));
        store.replace_highlight(HighlightSet::new(["sec5"]));

        let state = store.state();
        assert!(state.pending);
        assert_eq!(state.last_error.as_deref(), Some("boom"));
        assert_eq!(state.highlight.primary(), Some("sec5"));
    }
}
