//! # Suggestion Commands
//!
//! Insert, resolve one and resolve all. Every command returns `false`
//! without touching the document when its preconditions fail, and
//! dispatches exactly one transaction otherwise.

use crate::attributes::{SuggestionAttributes, NODE_NAME};
use crate::meta::{LocatedSuggestion, ResolveOrigin, SuggestionAction};
use crate::options::SuggestionOptions;
use crate::resolution::resolve_located;
use diff_suggestion_editor::{Command, Dispatch, EditorState, Node};
use std::sync::Arc;
use tracing::{debug, warn};

/// Every suggestion in document order
pub fn collect_suggestions(doc: &Node) -> Vec<LocatedSuggestion> {
    let mut found = Vec::new();
    doc.descendants(|node, pos| {
        if let Some(attrs) = SuggestionAttributes::from_node(node) {
            found.push(LocatedSuggestion { pos, attrs });
        }
        true
    });
    found
}

/// First suggestion whose `id` attribute equals `id`
pub fn find_suggestion_by_id(doc: &Node, id: &str) -> Option<LocatedSuggestion> {
    let mut found = None;
    doc.descendants(|node, pos| {
        if found.is_some() {
            return false;
        }
        if let Some(attrs) = SuggestionAttributes::from_node(node) {
            if attrs.id == id {
                found = Some(LocatedSuggestion { pos, attrs });
            }
        }
        true
    });
    found
}

/// First suggestion whose span `[pos, pos + size]` contains `anchor`
pub fn find_suggestion_at(doc: &Node, anchor: usize) -> Option<LocatedSuggestion> {
    let mut found = None;
    doc.descendants(|node, pos| {
        if found.is_some() {
            return false;
        }
        if pos <= anchor && anchor <= pos + node.node_size() {
            if let Some(attrs) = SuggestionAttributes::from_node(node) {
                found = Some(LocatedSuggestion { pos, attrs });
            }
        }
        true
    });
    found
}

/// Replace the selection with a new suggestion
#[derive(Debug, Clone)]
pub struct InsertSuggestion {
    pub attrs: SuggestionAttributes,
}

impl Command for InsertSuggestion {
    fn execute(&self, state: &EditorState, dispatch: Option<&mut dyn Dispatch>) -> bool {
        let Some(dispatch) = dispatch else {
            return false;
        };

        let node = match state.schema().node(NODE_NAME, self.attrs.to_attrs(), Vec::new()) {
            Ok(node) => node,
            Err(err) => {
                warn!(error = %err, "Cannot insert suggestion");
                return false;
            }
        };

        let mut tr = state.tr();
        if let Err(err) = tr.replace_selection_with(node) {
            warn!(error = %err, id = %self.attrs.id, "Cannot insert suggestion here");
            return false;
        }

        dispatch.dispatch(tr);
        debug!(id = %self.attrs.id, "Inserted suggestion");
        true
    }

    fn name(&self) -> &'static str {
        "insertDiffSuggestion"
    }
}

/// Resolve one suggestion, by id or at the selection anchor
#[derive(Debug, Clone)]
pub struct ResolveSuggestion {
    pub action: SuggestionAction,
    pub id: Option<String>,
    pub options: Arc<SuggestionOptions>,
}

impl ResolveSuggestion {
    fn locate(&self, state: &EditorState) -> Option<LocatedSuggestion> {
        match &self.id {
            Some(id) => find_suggestion_by_id(state.doc(), id),
            None => find_suggestion_at(state.doc(), state.selection().anchor),
        }
    }
}

impl Command for ResolveSuggestion {
    fn execute(&self, state: &EditorState, dispatch: Option<&mut dyn Dispatch>) -> bool {
        let Some(target) = self.locate(state) else {
            debug!(id = ?self.id, action = %self.action, "No suggestion to resolve");
            return false;
        };
        resolve_located(
            &self.options,
            state,
            dispatch,
            target,
            self.action,
            ResolveOrigin::Command,
        )
    }

    fn name(&self) -> &'static str {
        match self.action {
            SuggestionAction::Accept => "acceptDiffSuggestion",
            SuggestionAction::Reject => "rejectDiffSuggestion",
        }
    }
}

/// Resolve every suggestion in one transaction. Fires no callbacks.
#[derive(Debug, Clone, Copy)]
pub struct ResolveAllSuggestions {
    pub action: SuggestionAction,
}

impl Command for ResolveAllSuggestions {
    fn execute(&self, state: &EditorState, dispatch: Option<&mut dyn Dispatch>) -> bool {
        let Some(dispatch) = dispatch else {
            return false;
        };

        let suggestions = collect_suggestions(state.doc());
        if suggestions.is_empty() {
            return false;
        }

        let mut tr = state.tr();
        let mut resolved = 0;
        for suggestion in &suggestions {
            let text = suggestion.attrs.resolution_text(self.action);
            if text.is_empty() {
                continue;
            }
            let Some(pos) = tr.mapping().map_node(suggestion.pos, 1) else {
                continue;
            };
            if let Err(err) = tr.insert_text(text, pos, pos + 1) {
                warn!(error = %err, id = %suggestion.attrs.id, "Skipping suggestion");
                continue;
            }
            resolved += 1;
        }

        if resolved == 0 {
            return false;
        }
        dispatch.dispatch(tr);
        debug!(action = %self.action, resolved, total = suggestions.len(), "Resolved all suggestions");
        true
    }

    fn name(&self) -> &'static str {
        match self.action {
            SuggestionAction::Accept => "acceptAllDiffSuggestions",
            SuggestionAction::Reject => "rejectAllDiffSuggestions",
        }
    }
}

pub fn insert_suggestion(attrs: SuggestionAttributes) -> InsertSuggestion {
    InsertSuggestion { attrs }
}

pub fn accept_suggestion(options: Arc<SuggestionOptions>, id: Option<String>) -> ResolveSuggestion {
    ResolveSuggestion {
        action: SuggestionAction::Accept,
        id,
        options,
    }
}

pub fn reject_suggestion(options: Arc<SuggestionOptions>, id: Option<String>) -> ResolveSuggestion {
    ResolveSuggestion {
        action: SuggestionAction::Reject,
        id,
        options,
    }
}

pub fn accept_all_suggestions() -> ResolveAllSuggestions {
    ResolveAllSuggestions {
        action: SuggestionAction::Accept,
    }
}

pub fn reject_all_suggestions() -> ResolveAllSuggestions {
    ResolveAllSuggestions {
        action: SuggestionAction::Reject,
    }
}
