//! # Transactions
//!
//! A transaction accumulates mutations against a snapshot of the document.
//! It records the position mapping of every step and carries a selection
//! that is mapped along with them.

use crate::mapping::{Assoc, Mapping};
use crate::model::{Attrs, Node};
use crate::mutations::{Mutation, MutationError};
use crate::state::{EditorState, Selection};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Transaction {
    before: Arc<Node>,
    doc: Arc<Node>,
    mutations: Vec<Mutation>,
    mapping: Mapping,
    selection: Selection,
}

impl Transaction {
    pub fn new(state: &EditorState) -> Self {
        Self {
            before: Arc::clone(state.doc_arc()),
            doc: Arc::clone(state.doc_arc()),
            mutations: Vec::new(),
            mapping: Mapping::new(),
            selection: state.selection(),
        }
    }

    /// Document the transaction started from
    pub fn before(&self) -> &Node {
        &self.before
    }

    pub(crate) fn before_arc(&self) -> &Arc<Node> {
        &self.before
    }

    /// Document after all steps so far
    pub fn doc(&self) -> &Node {
        &self.doc
    }

    pub(crate) fn doc_arc(&self) -> &Arc<Node> {
        &self.doc
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Mapping from positions in [`Self::before`] to positions in [`Self::doc`]
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn doc_changed(&self) -> bool {
        !self.mutations.is_empty()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Apply one mutation to the current document
    pub fn step(&mut self, mutation: Mutation) -> Result<&mut Self, MutationError> {
        let doc = mutation.apply(&self.doc)?;
        let map = mutation.step_map();

        self.doc = Arc::new(doc);
        self.mapping.push(map);
        self.selection = self.selection.map(|pos| map.map(pos, Assoc::After));
        self.mutations.push(mutation);
        Ok(self)
    }

    pub fn replace_with(
        &mut self,
        from: usize,
        to: usize,
        content: Vec<Node>,
    ) -> Result<&mut Self, MutationError> {
        self.step(Mutation::Replace { from, to, content })
    }

    pub fn delete(&mut self, from: usize, to: usize) -> Result<&mut Self, MutationError> {
        self.replace_with(from, to, Vec::new())
    }

    pub fn insert(&mut self, pos: usize, node: Node) -> Result<&mut Self, MutationError> {
        self.replace_with(pos, pos, vec![node])
    }

    /// Replace `from..to` with plain text; empty text deletes the range
    pub fn insert_text(
        &mut self,
        text: &str,
        from: usize,
        to: usize,
    ) -> Result<&mut Self, MutationError> {
        if text.is_empty() {
            return self.delete(from, to);
        }
        self.replace_with(from, to, vec![Node::text(text)])
    }

    /// Replace the selection with `node` and put the cursor after it
    pub fn replace_selection_with(&mut self, node: Node) -> Result<&mut Self, MutationError> {
        let from = self.selection.from();
        let to = self.selection.to();
        let size = node.node_size();

        self.replace_with(from, to, vec![node])?;
        self.selection = Selection::cursor(from + size);
        Ok(self)
    }

    pub fn set_node_attrs(&mut self, pos: usize, attrs: Attrs) -> Result<&mut Self, MutationError> {
        self.step(Mutation::SetNodeAttrs { pos, attrs })
    }

    pub fn set_selection(&mut self, selection: Selection) -> &mut Self {
        self.selection = selection;
        self
    }
}
