//! # Editor State
//!
//! Immutable snapshot of a document, its selection, and the schema it was
//! built with. New states are produced by applying transactions.

use crate::command::{Command, Dispatch};
use crate::errors::EditorError;
use crate::model::Node;
use crate::schema::Schema;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Anchor/head selection; a cursor when both are equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn cursor(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// First position inside the first textblock, or 0
    pub fn at_start(doc: &Node) -> Self {
        let mut found = None;
        doc.descendants(|node, pos| {
            if found.is_some() {
                return false;
            }
            if node.is_textblock() {
                found = Some(pos + 1);
                return false;
            }
            true
        });
        Self::cursor(found.unwrap_or(0))
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn map(&self, f: impl Fn(usize) -> usize) -> Self {
        Self::new(f(self.anchor), f(self.head))
    }

    fn clamp(&self, size: usize) -> Self {
        Self::new(self.anchor.min(size), self.head.min(size))
    }
}

#[derive(Debug, Clone)]
pub struct EditorState {
    schema: Arc<Schema>,
    doc: Arc<Node>,
    selection: Selection,
    version: u64,
}

impl EditorState {
    pub fn create(schema: Arc<Schema>, doc: Node) -> Self {
        let selection = Selection::at_start(&doc);
        Self {
            schema,
            doc: Arc::new(doc),
            selection,
            version: 0,
        }
    }

    /// Parse markup into a new state
    pub fn from_markup(schema: Arc<Schema>, source: &str) -> Result<Self, EditorError> {
        let doc = schema.parse_document(source)?;
        Ok(Self::create(schema, doc))
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn doc(&self) -> &Node {
        &self.doc
    }

    pub(crate) fn doc_arc(&self) -> &Arc<Node> {
        &self.doc
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Incremented by every applied transaction that changed the document
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Start a transaction against this state
    pub fn tr(&self) -> Transaction {
        Transaction::new(self)
    }

    /// Produce the state after `tr`
    pub fn apply(&self, tr: &Transaction) -> Result<EditorState, EditorError> {
        if !Arc::ptr_eq(tr.before_arc(), &self.doc) && tr.before() != self.doc() {
            return Err(EditorError::StaleTransaction);
        }

        let version = if tr.doc_changed() {
            self.version + 1
        } else {
            self.version
        };

        debug!(
            version,
            mutations = tr.mutations().len(),
            "Applying transaction"
        );

        Ok(EditorState {
            schema: Arc::clone(&self.schema),
            doc: Arc::clone(tr.doc_arc()),
            selection: tr.selection().clamp(tr.doc().content_size()),
            version,
        })
    }

    /// Run a command headlessly, applying whatever it dispatches.
    ///
    /// Returns the command's result and the resulting state.
    pub fn run(&self, command: &dyn Command) -> (bool, EditorState) {
        let mut next = self.clone();
        let mut sink = |tr: Transaction| match next.apply(&tr) {
            Ok(state) => next = state,
            Err(err) => warn!(error = %err, "Dropping transaction"),
        };
        let dispatch: &mut dyn Dispatch = &mut sink;
        let handled = command.execute(self, Some(dispatch));
        (handled, next)
    }

    /// Serialize the document to markup
    pub fn to_markup(&self) -> String {
        self.schema.serialize_document(&self.doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Arc<Schema> {
        Arc::new(Schema::new())
    }

    #[test]
    fn test_create_places_cursor_in_first_textblock() {
        let state = EditorState::from_markup(schema(), "<p>abc</p>").unwrap();
        assert_eq!(state.selection(), Selection::cursor(1));
        assert_eq!(state.version(), 0);
    }

    #[test]
    fn test_apply_bumps_version_only_on_change() {
        let state = EditorState::from_markup(schema(), "<p>abc</p>").unwrap();

        let mut tr = state.tr();
        tr.set_selection(Selection::cursor(2));
        let moved = state.apply(&tr).unwrap();
        assert_eq!(moved.version(), 0);
        assert_eq!(moved.selection(), Selection::cursor(2));

        let mut tr = moved.tr();
        tr.insert_text("x", 2, 2).unwrap();
        let edited = moved.apply(&tr).unwrap();
        assert_eq!(edited.version(), 1);
        assert_eq!(edited.doc().text_content(), "axbc");
    }

    #[test]
    fn test_stale_transaction_rejected() {
        let state = EditorState::from_markup(schema(), "<p>abc</p>").unwrap();
        let mut first = state.tr();
        first.insert_text("x", 1, 1).unwrap();
        let next = state.apply(&first).unwrap();

        let mut stale = state.tr();
        stale.delete(1, 2).unwrap();
        assert!(matches!(
            next.apply(&stale),
            Err(EditorError::StaleTransaction)
        ));
    }

    #[test]
    fn test_to_markup() {
        let state = EditorState::from_markup(schema(), "<p>a <strong>b</strong></p>").unwrap();
        assert_eq!(state.to_markup(), "<p>a <strong>b</strong></p>");
    }
}
