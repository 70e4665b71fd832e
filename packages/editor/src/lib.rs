//! # Diff Suggestion Editor
//!
//! Headless rich-text editing engine that hosts the diff suggestion widget.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ markup: HTML text ↔ markup tree             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: schema + document model             │
//! │  - Parse/serialize documents via node specs │
//! │  - Position-based mutations and mapping     │
//! │  - Immutable states, transactions, commands │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ view: node views, events, rendered surface  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diff_suggestion_editor::{EditorState, EditorView, Schema};
//! use std::sync::Arc;
//!
//! let state = EditorState::from_markup(Arc::new(Schema::new()), "<p>Hello</p>")?;
//! let mut view = EditorView::new(state);
//!
//! let mut tr = view.state().tr();
//! tr.insert_text(", world", 6, 6)?;
//! view.dispatch(tr);
//!
//! assert_eq!(view.state().to_markup(), "<p>Hello, world</p>");
//! ```

mod command;
mod document;
mod errors;
mod mapping;
mod model;
mod mutations;
mod node_view;
mod schema;
mod state;
mod transaction;
mod view;

pub use command::{Command, Dispatch};
pub use document::RenderOverride;
pub use errors::EditorError;
pub use mapping::{Assoc, Mapping, StepMap};
pub use model::{normalize_inline, Attrs, Mark, Node, NodeType, ResolvedPos};
pub use mutations::{Mutation, MutationError};
pub use node_view::{NodeView, NodeViewFactory, NodeViewHost, PositionHandle, ViewEvent};
pub use schema::{DocSpec, NodeSpec, ParagraphSpec, Schema, SchemaError};
pub use state::{EditorState, Selection};
pub use transaction::Transaction;
pub use view::EditorView;

// Re-export the markup layer for node specs and views
pub use diff_suggestion_markup as markup;
