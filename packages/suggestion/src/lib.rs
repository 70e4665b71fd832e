//! # Diff Suggestion
//!
//! Inline suggestion widget for the headless editor. A suggestion node holds
//! an original and a suggested text; resolving it replaces the node with one
//! of the two.
//!
//! ```text
//! markup ──SuggestionNodeSpec──▶ diffSuggestion node ──SuggestionView──▶ toolbar
//!                                       │
//!                 InsertSuggestion / ResolveSuggestion / ResolveAllSuggestions
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diff_suggestion::{DiffSuggestion, SuggestionOptions};
//! use diff_suggestion_editor::{EditorState, EditorView};
//!
//! let extension = DiffSuggestion::new(SuggestionOptions::default().on_accept(|meta| {
//!     println!("accepted {}", meta.id);
//! }));
//! let state = EditorState::from_markup(extension.schema(), source)?;
//! let mut view = EditorView::new(state);
//! extension.mount(&mut view);
//!
//! view.run(&extension.accept(Some("s1".into())));
//! ```

pub mod attributes;
pub mod commands;
pub mod meta;
pub mod node;
pub mod options;
mod resolution;
pub mod toolbar;
pub mod view;

pub use attributes::*;
pub use commands::{
    accept_all_suggestions, accept_suggestion, collect_suggestions, find_suggestion_at,
    find_suggestion_by_id, insert_suggestion, reject_all_suggestions, reject_suggestion,
    InsertSuggestion, ResolveAllSuggestions, ResolveSuggestion,
};
pub use meta::{
    LocatedSuggestion, ResolveContext, ResolveOrigin, SuggestionAction, SuggestionActionMeta,
};
pub use node::{parse_attributes, render_attributes, SuggestionNodeSpec};
pub use options::{
    ActionCallback, ActionMenuRenderer, ButtonConfig, ButtonLabel, ButtonOptions, ConfigError,
    ResolveHandler, SuggestionOptions, SuggestionTheme, ThemeVariables,
};
pub use view::{suggestion_view_factory, SuggestionView};

use diff_suggestion_editor::{EditorView, NodeViewFactory, Schema};
use std::sync::Arc;

/// The suggestion extension: one options value shared by the node spec,
/// the views and the commands it hands out
#[derive(Debug, Clone, Default)]
pub struct DiffSuggestion {
    options: Arc<SuggestionOptions>,
}

impl DiffSuggestion {
    pub fn new(options: SuggestionOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(SuggestionOptions::from_json(json)?))
    }

    pub fn options(&self) -> &Arc<SuggestionOptions> {
        &self.options
    }

    pub fn node_spec(&self) -> SuggestionNodeSpec {
        SuggestionNodeSpec::new(Arc::clone(&self.options))
    }

    pub fn register(&self, schema: &mut Schema) {
        schema.register(Arc::new(self.node_spec()));
    }

    /// Default schema with the suggestion node registered
    pub fn schema(&self) -> Arc<Schema> {
        let mut schema = Schema::new();
        self.register(&mut schema);
        Arc::new(schema)
    }

    pub fn node_view_factory(&self) -> NodeViewFactory {
        suggestion_view_factory(Arc::clone(&self.options))
    }

    /// Install suggestion views on an editor view
    pub fn mount(&self, view: &mut EditorView) {
        view.register_node_view(NODE_NAME, self.node_view_factory());
    }

    pub fn insert(&self, attrs: SuggestionAttributes) -> InsertSuggestion {
        insert_suggestion(attrs)
    }

    pub fn accept(&self, id: Option<String>) -> ResolveSuggestion {
        accept_suggestion(Arc::clone(&self.options), id)
    }

    pub fn reject(&self, id: Option<String>) -> ResolveSuggestion {
        reject_suggestion(Arc::clone(&self.options), id)
    }

    pub fn accept_all(&self) -> ResolveAllSuggestions {
        accept_all_suggestions()
    }

    pub fn reject_all(&self) -> ResolveAllSuggestions {
        reject_all_suggestions()
    }
}
