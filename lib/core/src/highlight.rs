//! The ordered set of graph nodes an answer points at.

use serde::{Deserialize, Serialize};

/// Ordered node identifiers the conversation asks the graph to focus on.
///
/// Duplicates are allowed and order is preserved exactly as the backend sent
/// it. The first element is the primary focus target; the remainder is kept
/// so the surface receives the full set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightSet(Vec<String>);

impl HighlightSet {
    /// Creates an empty highlight set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Creates a highlight set from node identifiers, keeping their order.
    #[must_use]
    pub fn new<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(nodes.into_iter().map(Into::into).collect())
    }

    /// Returns the node the graph should center on, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Returns every node after the primary one.
    #[must_use]
    pub fn rest(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the node identifiers as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for HighlightSet {
    fn from(nodes: Vec<String>) -> Self {
        Self(nodes)
    }
}

impl From<HighlightSet> for Vec<String> {
    fn from(set: HighlightSet) -> Self {
        set.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_is_first_node() {
        let set = HighlightSet::new(["n1", "n2", "n3"]);
        assert_eq!(set.primary(), Some("n1"));
        assert_eq!(set.rest(), ["n2".to_string(), "n3".to_string()]);
    }

    #[test]
    fn empty_set_has_no_primary() {
        let set = HighlightSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.primary(), None);
        assert!(set.rest().is_empty());
    }

    #[test]
    fn duplicates_and_order_are_kept() {
        let set = HighlightSet::new(["b", "a", "b"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["b", "a", "b"]);
    }

    #[test]
    fn deserializes_from_plain_array() {
        let set: HighlightSet = serde_json::from_str(r#"["sec5","sec5.1"]"#).expect("deserialize");
        assert_eq!(set.primary(), Some("sec5"));
    }
}
