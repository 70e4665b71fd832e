//! Suggestion attributes and the markup markers that carry them

use crate::meta::SuggestionAction;
use diff_suggestion_editor::{Attrs, Node};
use serde::{Deserialize, Serialize};

/// Node type name registered with the schema
pub const NODE_NAME: &str = "diffSuggestion";

/// Wrapper marker; its presence (not its value) identifies a suggestion
pub const MARKER_ATTR: &str = "data-diff-suggestion";
pub const ID_ATTR: &str = "data-diff-suggestion-id";
pub const COMMENT_ATTR: &str = "data-diff-suggestion-comment";
pub const OLD_ATTR: &str = "data-diff-suggestion-old";
pub const NEW_ATTR: &str = "data-diff-suggestion-new";

/// Markers binding action-surface elements to accept/reject
pub const ACCEPT_MARKER: &str = "data-diff-suggestion-toolbar-accept";
pub const REJECT_MARKER: &str = "data-diff-suggestion-toolbar-reject";

const KEY_ID: &str = "id";
const KEY_COMMENT: &str = "comment";
const KEY_ORIGINAL: &str = "originalText";
const KEY_SUGGESTED: &str = "suggestedText";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionAttributes {
    /// Caller-assigned identifier, expected to be unique in a document
    pub id: String,
    #[serde(default)]
    pub comment: String,
    /// Text restored on reject
    #[serde(default)]
    pub original_text: String,
    /// Text adopted on accept
    #[serde(default)]
    pub suggested_text: String,
}

impl SuggestionAttributes {
    pub fn new(
        id: impl Into<String>,
        original_text: impl Into<String>,
        suggested_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            comment: String::new(),
            original_text: original_text.into(),
            suggested_text: suggested_text.into(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Read from node attributes; missing keys are empty
    pub fn from_attrs(attrs: &Attrs) -> Self {
        let get = |key: &str| attrs.get(key).cloned().unwrap_or_default();
        Self {
            id: get(KEY_ID),
            comment: get(KEY_COMMENT),
            original_text: get(KEY_ORIGINAL),
            suggested_text: get(KEY_SUGGESTED),
        }
    }

    pub fn to_attrs(&self) -> Attrs {
        Attrs::from([
            (KEY_ID.to_string(), self.id.clone()),
            (KEY_COMMENT.to_string(), self.comment.clone()),
            (KEY_ORIGINAL.to_string(), self.original_text.clone()),
            (KEY_SUGGESTED.to_string(), self.suggested_text.clone()),
        ])
    }

    /// Attributes of a suggestion node; `None` for any other node
    pub fn from_node(node: &Node) -> Option<Self> {
        if node.type_name() != NODE_NAME {
            return None;
        }
        node.attrs().map(Self::from_attrs)
    }

    /// Text that replaces the node for `action`
    pub fn resolution_text(&self, action: SuggestionAction) -> &str {
        match action {
            SuggestionAction::Accept => &self.suggested_text,
            SuggestionAction::Reject => &self.original_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_round_trip() {
        let attrs = SuggestionAttributes::new("s1", "good", "great").with_comment("tone");
        assert_eq!(SuggestionAttributes::from_attrs(&attrs.to_attrs()), attrs);
    }

    #[test]
    fn test_missing_attrs_default_to_empty() {
        let attrs = SuggestionAttributes::from_attrs(&Attrs::from([(
            "id".to_string(),
            "x".to_string(),
        )]));
        assert_eq!(attrs.id, "x");
        assert_eq!(attrs.comment, "");
        assert_eq!(attrs.original_text, "");
        assert_eq!(attrs.suggested_text, "");
    }

    #[test]
    fn test_resolution_text() {
        let attrs = SuggestionAttributes::new("s1", "A", "B");
        assert_eq!(attrs.resolution_text(SuggestionAction::Accept), "B");
        assert_eq!(attrs.resolution_text(SuggestionAction::Reject), "A");
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = r#"{"id":"s1","originalText":"a","suggestedText":"b"}"#;
        let attrs: SuggestionAttributes = serde_json::from_str(json).unwrap();
        assert_eq!(attrs, SuggestionAttributes::new("s1", "a", "b"));
        assert!(serde_json::to_string(&attrs)
            .unwrap()
            .contains(r#""suggestedText":"b""#));
    }
}
