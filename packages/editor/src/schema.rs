//! # Schema
//!
//! Registry of node specs. A spec describes one node type: its structure,
//! how to recognize it in markup, and how to render it back.

use crate::model::{Attrs, Node, NodeType};
use diff_suggestion_markup::{Element, Node as MarkupNode};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),
}

/// Definition of a node type
pub trait NodeSpec: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn inline(&self) -> bool {
        false
    }

    /// Atoms occupy a single position and have no editable content
    fn atom(&self) -> bool {
        false
    }

    /// Whether the content is inline (text and inline nodes)
    fn inline_content(&self) -> bool {
        false
    }

    fn default_attrs(&self) -> Attrs {
        Attrs::new()
    }

    /// Recognize a markup element as this node type and read its attributes
    fn parse_markup(&self, element: &Element) -> Option<Attrs>;

    /// Render a node of this type. `children` holds the rendered content.
    fn render_markup(&self, attrs: &Attrs, children: Vec<MarkupNode>) -> Element;

    fn node_type(&self) -> NodeType {
        NodeType {
            name: self.name().to_string(),
            inline: self.inline(),
            atom: self.atom(),
            inline_content: self.inline_content(),
        }
    }
}

/// Root node; never appears in markup
#[derive(Debug)]
pub struct DocSpec;

impl NodeSpec for DocSpec {
    fn name(&self) -> &str {
        "doc"
    }

    fn parse_markup(&self, _element: &Element) -> Option<Attrs> {
        None
    }

    fn render_markup(&self, _attrs: &Attrs, children: Vec<MarkupNode>) -> Element {
        Element::new("div").with_children(children)
    }
}

#[derive(Debug)]
pub struct ParagraphSpec;

impl NodeSpec for ParagraphSpec {
    fn name(&self) -> &str {
        "paragraph"
    }

    fn inline_content(&self) -> bool {
        true
    }

    fn parse_markup(&self, element: &Element) -> Option<Attrs> {
        (element.tag == "p").then(Attrs::new)
    }

    fn render_markup(&self, _attrs: &Attrs, children: Vec<MarkupNode>) -> Element {
        Element::new("p").with_children(children)
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    specs: Vec<Arc<dyn NodeSpec>>,
}

impl Schema {
    /// Schema with the built-in `doc` and `paragraph` nodes
    pub fn new() -> Self {
        Self {
            specs: vec![Arc::new(DocSpec), Arc::new(ParagraphSpec)],
        }
    }

    /// Register a spec, replacing any spec with the same name
    pub fn register(&mut self, spec: Arc<dyn NodeSpec>) -> &mut Self {
        self.specs.retain(|s| s.name() != spec.name());
        self.specs.push(spec);
        self
    }

    pub fn with_spec(mut self, spec: Arc<dyn NodeSpec>) -> Self {
        self.register(spec);
        self
    }

    pub fn spec(&self, name: &str) -> Option<&Arc<dyn NodeSpec>> {
        self.specs.iter().find(|s| s.name() == name)
    }

    /// Specs in matching order, most recently registered first
    pub fn specs(&self) -> impl Iterator<Item = &Arc<dyn NodeSpec>> {
        self.specs.iter().rev()
    }

    pub fn node_type(&self, name: &str) -> Result<NodeType, SchemaError> {
        self.spec(name)
            .map(|s| s.node_type())
            .ok_or_else(|| SchemaError::UnknownNodeType(name.to_string()))
    }

    /// Build an element node; `attrs` are layered over the spec defaults
    pub fn node(&self, name: &str, attrs: Attrs, content: Vec<Node>) -> Result<Node, SchemaError> {
        let spec = self
            .spec(name)
            .ok_or_else(|| SchemaError::UnknownNodeType(name.to_string()))?;

        let mut merged = spec.default_attrs();
        merged.extend(attrs);
        Ok(Node::element(spec.node_type(), merged, content))
    }

    pub fn doc(&self, content: Vec<Node>) -> Node {
        Node::element(DocSpec.node_type(), Attrs::new(), content)
    }

    pub fn paragraph(&self, content: Vec<Node>) -> Node {
        Node::element(ParagraphSpec.node_type(), Attrs::new(), content)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct ChipSpec;

    impl NodeSpec for ChipSpec {
        fn name(&self) -> &str {
            "chip"
        }

        fn inline(&self) -> bool {
            true
        }

        fn atom(&self) -> bool {
            true
        }

        fn default_attrs(&self) -> Attrs {
            Attrs::from([("label".to_string(), String::new())])
        }

        fn parse_markup(&self, element: &Element) -> Option<Attrs> {
            (element.tag == "chip").then(Attrs::new)
        }

        fn render_markup(&self, _attrs: &Attrs, _children: Vec<MarkupNode>) -> Element {
            Element::new("chip")
        }
    }

    #[test]
    fn test_node_merges_default_attrs() {
        let schema = Schema::new().with_spec(Arc::new(ChipSpec));
        let node = schema
            .node(
                "chip",
                Attrs::from([("extra".to_string(), "1".to_string())]),
                vec![],
            )
            .unwrap();

        assert_eq!(node.attr("label"), Some(""));
        assert_eq!(node.attr("extra"), Some("1"));
        assert!(node.is_atom());
        assert_eq!(node.node_size(), 1);
    }

    #[test]
    fn test_unknown_node_type() {
        let err = Schema::new().node("nope", Attrs::new(), vec![]).unwrap_err();
        assert_eq!(err, SchemaError::UnknownNodeType("nope".to_string()));
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut schema = Schema::new();
        schema.register(Arc::new(ChipSpec));
        schema.register(Arc::new(ChipSpec));
        assert_eq!(schema.specs().filter(|s| s.name() == "chip").count(), 1);
        assert_eq!(schema.specs().next().map(|s| s.name().to_string()), Some("chip".into()));
    }
}
