//! Resolution actions, meta snapshots and the override context

use crate::attributes::SuggestionAttributes;
use diff_suggestion_editor::{Dispatch, EditorState, Transaction};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionAction {
    Accept,
    Reject,
}

impl SuggestionAction {
    pub fn is_accept(self) -> bool {
        matches!(self, SuggestionAction::Accept)
    }

    pub fn name(self) -> &'static str {
        match self {
            SuggestionAction::Accept => "accept",
            SuggestionAction::Reject => "reject",
        }
    }
}

impl fmt::Display for SuggestionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A suggestion node found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSuggestion {
    pub pos: usize,
    pub attrs: SuggestionAttributes,
}

/// Snapshot handed to callbacks and custom action menus.
///
/// `pos` is where the node was when the snapshot was taken; resolution
/// removes the node, so it is not valid afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionActionMeta {
    pub id: String,
    pub comment: String,
    pub original_text: String,
    pub suggested_text: String,
    pub pos: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
}

impl SuggestionActionMeta {
    pub fn snapshot(
        attrs: &SuggestionAttributes,
        pos: usize,
        action: Option<SuggestionAction>,
    ) -> Self {
        Self {
            id: attrs.id.clone(),
            comment: attrs.comment.clone(),
            original_text: attrs.original_text.clone(),
            suggested_text: attrs.suggested_text.clone(),
            pos,
            accepted: action.map(SuggestionAction::is_accept),
        }
    }
}

/// Where a resolution was triggered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOrigin {
    Command,
    View,
}

/// Everything a resolution override receives.
///
/// `tr` is a fresh transaction against `state`; the override decides whether
/// to mutate and dispatch anything.
///
/// There is no separate editor view handle. A view click hands over the
/// host's current `state` and its dispatcher, so dispatching here applies
/// to the live view. Commands pass their own state and optional dispatcher.
pub struct ResolveContext<'a> {
    pub state: &'a EditorState,
    pub dispatcher: Option<&'a mut dyn Dispatch>,
    pub tr: Transaction,
    pub action: SuggestionAction,
    pub target: LocatedSuggestion,
    pub origin: ResolveOrigin,
}

impl ResolveContext<'_> {
    pub fn can_dispatch(&self) -> bool {
        self.dispatcher.is_some()
    }

    /// Dispatch `tr`; `false` when no dispatcher was provided
    pub fn dispatch(&mut self, tr: Transaction) -> bool {
        match self.dispatcher.as_mut() {
            Some(dispatcher) => {
                dispatcher.dispatch(tr);
                true
            }
            None => false,
        }
    }

    /// Dispatch the context's own transaction
    pub fn commit(mut self) -> bool {
        let tr = std::mem::replace(&mut self.tr, self.state.tr());
        self.dispatch(tr)
    }
}

impl fmt::Debug for ResolveContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveContext")
            .field("action", &self.action)
            .field("target", &self.target)
            .field("origin", &self.origin)
            .field("can_dispatch", &self.can_dispatch())
            .finish()
    }
}
