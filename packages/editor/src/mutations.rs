//! # Document Mutations
//!
//! Position-based operations on the document tree.
//!
//! ## Mutation Semantics
//!
//! ### Replace
//! - Replaces the range `from..to` with a list of nodes
//! - Both ends must share a parent; text may be split, other nodes may not
//! - Inline parents accept inline content, block parents accept blocks
//! - Adjacent text with equal marks is merged afterwards
//!
//! ### SetNodeAttrs
//! - Replaces the attributes of the element starting at `pos`
//! - Never changes positions

use crate::mapping::StepMap;
use crate::model::{normalize_inline, Attrs, Node};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum Mutation {
    /// Replace a range with new content
    Replace {
        from: usize,
        to: usize,
        content: Vec<Node>,
    },

    /// Replace the attributes of an element
    SetNodeAttrs { pos: usize, attrs: Attrs },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Position {pos} is outside the document (size {size})")]
    PositionOutOfRange { pos: usize, size: usize },

    #[error("Invalid range {from}..{to}")]
    InvalidRange { from: usize, to: usize },

    #[error("Range {from}..{to} crosses a node boundary")]
    CrossesNodeBoundary { from: usize, to: usize },

    #[error("Content does not fit: {0}")]
    ContentMismatch(String),

    #[error("No node at position {0}")]
    NodeNotFound(usize),

    #[error("Node at position {0} is not an element")]
    NotAnElement(usize),
}

impl Mutation {
    /// Apply to a document, returning the new document
    pub fn apply(&self, doc: &Node) -> Result<Node, MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::Replace { from, to, content } => {
                Self::apply_replace(doc, *from, *to, content)
            }
            Mutation::SetNodeAttrs { pos, attrs } => Self::apply_set_attrs(doc, *pos, attrs),
        }
    }

    /// Check that the mutation can be applied without changing anything
    pub fn validate(&self, doc: &Node) -> Result<(), MutationError> {
        match self {
            Mutation::Replace { from, to, content } => {
                if from > to {
                    return Err(MutationError::InvalidRange {
                        from: *from,
                        to: *to,
                    });
                }

                let start = doc.resolve(*from)?;
                let end = doc.resolve(*to)?;
                if !start.same_parent(&end) {
                    return Err(MutationError::CrossesNodeBoundary {
                        from: *from,
                        to: *to,
                    });
                }

                let parent = start.parent(doc);
                let inline_parent = parent.is_textblock();
                if let Some(node) = content.iter().find(|n| n.is_inline() != inline_parent) {
                    return Err(MutationError::ContentMismatch(format!(
                        "{} cannot be placed in {}",
                        node.type_name(),
                        parent.type_name()
                    )));
                }
                Ok(())
            }

            Mutation::SetNodeAttrs { pos, .. } => match doc.node_at(*pos) {
                None => Err(MutationError::NodeNotFound(*pos)),
                Some(node) if node.is_text() => Err(MutationError::NotAnElement(*pos)),
                Some(_) => Ok(()),
            },
        }
    }

    /// Positions replaced by this mutation
    pub fn step_map(&self) -> StepMap {
        match self {
            Mutation::Replace { from, to, content } => {
                StepMap::new(*from, to - from, content.iter().map(Node::node_size).sum())
            }
            Mutation::SetNodeAttrs { .. } => StepMap::empty(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::Replace { .. } => "replace",
            Mutation::SetNodeAttrs { .. } => "set_node_attrs",
        }
    }

    fn apply_replace(
        doc: &Node,
        from: usize,
        to: usize,
        content: &[Node],
    ) -> Result<Node, MutationError> {
        let start = doc.resolve(from)?;
        let end = doc.resolve(to)?;

        update_at_path(doc, &start.path, &mut |parent| {
            let children = splice(
                parent.content(),
                start.parent_offset,
                end.parent_offset,
                content,
            )
            .ok_or(MutationError::CrossesNodeBoundary { from, to })?;
            Ok(parent.with_content(children))
        })
    }

    fn apply_set_attrs(doc: &Node, pos: usize, attrs: &Attrs) -> Result<Node, MutationError> {
        let resolved = doc.resolve(pos)?;
        let index = resolved
            .parent(doc)
            .child_index_at(resolved.parent_offset)
            .ok_or(MutationError::NodeNotFound(pos))?;

        let mut path = resolved.path;
        path.push(index);
        update_at_path(doc, &path, &mut |node| Ok(node.with_attrs(attrs.clone())))
    }
}

/// Rebuild the spine from `node` down to `path`, replacing the target
fn update_at_path(
    node: &Node,
    path: &[usize],
    f: &mut dyn FnMut(&Node) -> Result<Node, MutationError>,
) -> Result<Node, MutationError> {
    match path.split_first() {
        None => f(node),
        Some((&index, rest)) => {
            let child = node.content().get(index).ok_or_else(|| {
                MutationError::ContentMismatch(format!(
                    "missing child {} in {}",
                    index,
                    node.type_name()
                ))
            })?;
            let updated = update_at_path(child, rest, f)?;

            let mut content = node.content().to_vec();
            content[index] = updated;
            Ok(node.with_content(content))
        }
    }
}

/// Replace content offsets `from..to` of `children`. Text nodes may be cut;
/// `None` if either offset falls inside a non-text child.
fn splice(children: &[Node], from: usize, to: usize, insert: &[Node]) -> Option<Vec<Node>> {
    let mut before = Vec::new();
    let mut after = Vec::new();
    let mut offset = 0;

    for child in children {
        let size = child.node_size();
        let end = offset + size;

        if end <= from {
            before.push(child.clone());
        } else if offset >= to {
            after.push(child.clone());
        } else {
            // The child overlaps the replaced range
            if !child.is_text() && (from > offset || to < end) {
                return None;
            }
            if from > offset {
                before.push(child.cut_text(0, from - offset));
            }
            if to < end {
                after.push(child.cut_text(to - offset, size));
            }
        }
        offset = end;
    }

    let mut out = before;
    out.extend_from_slice(insert);
    out.extend(after);
    Some(normalize_inline(out))
}
