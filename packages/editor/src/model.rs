//! # Document Model
//!
//! Immutable document tree addressed by integer positions.
//!
//! ## Positions
//!
//! ```text
//!   0   1 2 3 4   5 6      7   8
//!   <p> a b [S] c </p> <p> </p>
//! ```
//!
//! - A text node is one position per character
//! - An atom (leaf element such as a suggestion) is one position
//! - Any other element spans its content plus one position on each side
//! - The root `doc` node is addressed from 0 at the start of its content

use crate::mutations::MutationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node attributes
pub type Attrs = BTreeMap<String, String>;

/// Inline text formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Strike,
    Code,
}

/// Structural description of an element node, copied from its spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeType {
    pub name: String,
    pub inline: bool,
    pub atom: bool,
    pub inline_content: bool,
}

/// Document node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },

    Element {
        node_type: NodeType,
        #[serde(default)]
        attrs: Attrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
}

/// A position resolved against a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPos {
    /// The resolved position
    pub pos: usize,
    /// Child indices from the root to the parent node
    pub path: Vec<usize>,
    /// Offset of `pos` inside the parent's content
    pub parent_offset: usize,
    /// Absolute position where the parent's content starts
    pub parent_start: usize,
}

impl ResolvedPos {
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// The node whose content contains this position
    pub fn parent<'a>(&self, root: &'a Node) -> &'a Node {
        let mut node = root;
        for &index in &self.path {
            match node.content().get(index) {
                Some(child) => node = child,
                None => break,
            }
        }
        node
    }

    pub fn same_parent(&self, other: &ResolvedPos) -> bool {
        self.path == other.path
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked_text(text: impl Into<String>, mut marks: Vec<Mark>) -> Self {
        marks.sort();
        marks.dedup();
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    pub fn element(node_type: NodeType, attrs: Attrs, content: Vec<Node>) -> Self {
        Node::Element {
            node_type,
            attrs,
            content,
        }
    }

    /// Type name; `"text"` for text nodes
    pub fn type_name(&self) -> &str {
        match self {
            Node::Text { .. } => "text",
            Node::Element { node_type, .. } => &node_type.name,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    pub fn is_inline(&self) -> bool {
        match self {
            Node::Text { .. } => true,
            Node::Element { node_type, .. } => node_type.inline,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Node::Element { node_type, .. } if node_type.atom)
    }

    pub fn is_leaf(&self) -> bool {
        self.is_text() || self.is_atom()
    }

    pub fn is_textblock(&self) -> bool {
        matches!(self, Node::Element { node_type, .. } if node_type.inline_content)
    }

    pub fn attrs(&self) -> Option<&Attrs> {
        match self {
            Node::Element { attrs, .. } => Some(attrs),
            Node::Text { .. } => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs()?.get(name).map(String::as_str)
    }

    pub fn content(&self) -> &[Node] {
        match self {
            Node::Element { content, .. } => content,
            Node::Text { .. } => &[],
        }
    }

    pub fn marks(&self) -> &[Mark] {
        match self {
            Node::Text { marks, .. } => marks,
            Node::Element { .. } => &[],
        }
    }

    /// Number of positions this node occupies in its parent
    pub fn node_size(&self) -> usize {
        match self {
            Node::Text { text, .. } => text.chars().count(),
            Node::Element { node_type, .. } if node_type.atom => 1,
            Node::Element { .. } => self.content_size() + 2,
        }
    }

    pub fn content_size(&self) -> usize {
        self.content().iter().map(Node::node_size).sum()
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        match self {
            Node::Text { text, .. } => text.clone(),
            Node::Element { content, .. } => content.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first walk over all descendants in document order.
    ///
    /// `f` receives each node with its absolute start position; returning
    /// `false` skips that node's children.
    pub fn descendants<F>(&self, mut f: F)
    where
        F: FnMut(&Node, usize) -> bool,
    {
        self.walk_descendants(0, &mut f);
    }

    fn walk_descendants<F>(&self, start: usize, f: &mut F)
    where
        F: FnMut(&Node, usize) -> bool,
    {
        let mut pos = start;
        for child in self.content() {
            if f(child, pos) && !child.content().is_empty() {
                child.walk_descendants(pos + 1, f);
            }
            pos += child.node_size();
        }
    }

    /// Node starting directly at `pos` (at any depth). Inside a text node the
    /// text node itself is returned.
    pub fn node_at(&self, pos: usize) -> Option<&Node> {
        let mut node = self;
        let mut pos = pos;
        loop {
            let (index, offset) = node.find_index(pos)?;
            let child = &node.content()[index];
            if offset == pos || child.is_text() {
                return Some(child);
            }
            pos -= offset + 1;
            node = child;
        }
    }

    /// Index and start offset of the child covering content offset `pos`
    fn find_index(&self, pos: usize) -> Option<(usize, usize)> {
        let mut offset = 0;
        for (index, child) in self.content().iter().enumerate() {
            let end = offset + child.node_size();
            if pos < end {
                return Some((index, offset));
            }
            offset = end;
        }
        None
    }

    /// Index of the child starting exactly at content offset `offset`
    pub fn child_index_at(&self, offset: usize) -> Option<usize> {
        match self.find_index(offset) {
            Some((index, start)) if start == offset => Some(index),
            _ => None,
        }
    }

    /// Resolve a position to its parent node and offset
    pub fn resolve(&self, pos: usize) -> Result<ResolvedPos, MutationError> {
        let size = self.content_size();
        if pos > size {
            return Err(MutationError::PositionOutOfRange { pos, size });
        }

        let mut node = self;
        let mut path = Vec::new();
        let mut start = 0;

        'descend: loop {
            let mut child_start = start;
            for (index, child) in node.content().iter().enumerate() {
                let end = child_start + child.node_size();
                if pos > child_start && pos < end && !child.is_leaf() {
                    path.push(index);
                    start = child_start + 1;
                    node = child;
                    continue 'descend;
                }
                if end > pos {
                    break;
                }
                child_start = end;
            }

            return Ok(ResolvedPos {
                pos,
                path,
                parent_offset: pos - start,
                parent_start: start,
            });
        }
    }

    /// Copy of this element with new content
    pub fn with_content(&self, content: Vec<Node>) -> Node {
        match self {
            Node::Element {
                node_type, attrs, ..
            } => Node::Element {
                node_type: node_type.clone(),
                attrs: attrs.clone(),
                content,
            },
            Node::Text { .. } => self.clone(),
        }
    }

    /// Copy of this element with new attributes
    pub fn with_attrs(&self, attrs: Attrs) -> Node {
        match self {
            Node::Element {
                node_type, content, ..
            } => Node::Element {
                node_type: node_type.clone(),
                attrs,
                content: content.clone(),
            },
            Node::Text { .. } => self.clone(),
        }
    }

    /// Character slice of a text node; elements are returned unchanged
    pub fn cut_text(&self, from: usize, to: usize) -> Node {
        match self {
            Node::Text { text, marks } => Node::Text {
                text: text.chars().skip(from).take(to.saturating_sub(from)).collect(),
                marks: marks.clone(),
            },
            Node::Element { .. } => self.clone(),
        }
    }
}

/// Merge adjacent text nodes with equal marks and drop empty text nodes
pub fn normalize_inline(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let Node::Text { text, marks } = &node {
            if text.is_empty() {
                continue;
            }
            if let Some(Node::Text {
                text: previous,
                marks: previous_marks,
            }) = out.last_mut()
            {
                if previous_marks == marks {
                    previous.push_str(text);
                    continue;
                }
            }
        }
        out.push(node);
    }
    out
}
