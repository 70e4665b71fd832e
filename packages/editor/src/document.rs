//! # Markup Bridge
//!
//! Converts between markup fragments and documents.
//!
//! ```text
//! markup ─parse─▶ Fragment ─parse_document─▶ doc
//! doc ─render_document─▶ Fragment ─serialize─▶ markup
//! ```
//!
//! Parsing is forgiving: unknown wrapper elements are transparent, inline
//! content found at block level is wrapped in a paragraph, and whitespace
//! between blocks is dropped.

use crate::errors::EditorError;
use crate::model::{normalize_inline, Attrs, Mark, Node};
use crate::schema::{NodeSpec, Schema};
use diff_suggestion_markup::{self as markup, Element, Fragment, Node as MarkupNode};
use std::sync::Arc;

/// Hook consulted for every node while rendering; returning an element
/// replaces the node's default rendering
pub type RenderOverride<'a> = dyn FnMut(&Node, usize) -> Option<Element> + 'a;

fn mark_for_tag(tag: &str) -> Option<Mark> {
    match tag {
        "strong" | "b" => Some(Mark::Bold),
        "em" | "i" => Some(Mark::Italic),
        "s" | "strike" | "del" => Some(Mark::Strike),
        "code" => Some(Mark::Code),
        _ => None,
    }
}

fn tag_for_mark(mark: Mark) -> &'static str {
    match mark {
        Mark::Bold => "strong",
        Mark::Italic => "em",
        Mark::Strike => "s",
        Mark::Code => "code",
    }
}

impl Schema {
    /// Parse markup into a document
    pub fn parse_document(&self, source: &str) -> Result<Node, EditorError> {
        let fragment = markup::parse(source)?;
        Ok(self.parse_fragment(&fragment))
    }

    pub fn parse_fragment(&self, fragment: &Fragment) -> Node {
        let mut blocks = BlockParser::new(self).parse(&fragment.nodes);
        if blocks.is_empty() {
            blocks.push(self.paragraph(Vec::new()));
        }
        self.doc(blocks)
    }

    /// Render the document's content, letting `overlay` replace nodes
    pub fn render_document(&self, doc: &Node, overlay: &mut RenderOverride<'_>) -> Fragment {
        Fragment::from(self.render_content(doc.content(), 0, overlay))
    }

    /// Serialize the document to compact markup
    pub fn serialize_document(&self, doc: &Node) -> String {
        markup::serialize(&self.render_document(doc, &mut |_, _| None))
    }

    fn render_content(
        &self,
        nodes: &[Node],
        start: usize,
        overlay: &mut RenderOverride<'_>,
    ) -> Vec<MarkupNode> {
        let mut out = Vec::with_capacity(nodes.len());
        let mut pos = start;
        for node in nodes {
            out.push(self.render_node(node, pos, overlay));
            pos += node.node_size();
        }
        out
    }

    fn render_node(&self, node: &Node, pos: usize, overlay: &mut RenderOverride<'_>) -> MarkupNode {
        if let Some(element) = overlay(node, pos) {
            return element.into();
        }

        match node {
            Node::Text { text, marks } => {
                // Innermost mark last
                marks
                    .iter()
                    .rev()
                    .fold(MarkupNode::text(text.clone()), |inner, mark| {
                        Element::new(tag_for_mark(*mark)).with_child(inner).into()
                    })
            }
            Node::Element {
                node_type,
                attrs,
                content,
            } => {
                let children = if node_type.atom {
                    Vec::new()
                } else {
                    self.render_content(content, pos + 1, overlay)
                };
                match self.spec(&node_type.name) {
                    Some(spec) => spec.render_markup(attrs, children).into(),
                    None => Element::new("span")
                        .with_attr("data-node-type", node_type.name.clone())
                        .with_children(children)
                        .into(),
                }
            }
        }
    }

    /// First spec that recognizes `element`
    fn match_spec(&self, element: &Element) -> Option<(&Arc<dyn NodeSpec>, Attrs)> {
        self.specs()
            .find_map(|spec| spec.parse_markup(element).map(|attrs| (spec, attrs)))
    }

    fn build(&self, spec: &Arc<dyn NodeSpec>, attrs: Attrs, content: Vec<Node>) -> Node {
        let mut merged = spec.default_attrs();
        merged.extend(attrs);
        Node::element(spec.node_type(), merged, content)
    }
}

/// Collects block nodes, wrapping stray inline runs in paragraphs
struct BlockParser<'a> {
    schema: &'a Schema,
    blocks: Vec<Node>,
    pending: Vec<Node>,
}

impl<'a> BlockParser<'a> {
    fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            blocks: Vec::new(),
            pending: Vec::new(),
        }
    }

    fn parse(mut self, nodes: &[MarkupNode]) -> Vec<Node> {
        self.visit(nodes);
        self.flush();
        self.blocks
    }

    fn visit(&mut self, nodes: &[MarkupNode]) {
        for node in nodes {
            match node {
                MarkupNode::Text { content } => {
                    if self.pending.is_empty() && content.trim().is_empty() {
                        continue;
                    }
                    self.pending.push(Node::text(content.clone()));
                }

                MarkupNode::Comment { .. } => {}

                MarkupNode::Element(element) => self.visit_element(element),
            }
        }
    }

    fn visit_element(&mut self, element: &Element) {
        let schema = self.schema;

        if let Some((spec, attrs)) = schema.match_spec(element) {
            if spec.inline() {
                self.pending
                    .extend(parse_inline_element(schema, spec, attrs, element, &[]));
                return;
            }

            self.flush();
            let content = if spec.atom() {
                Vec::new()
            } else if spec.inline_content() {
                normalize_inline(parse_inline_nodes(schema, &element.children, &[]))
            } else {
                BlockParser::new(schema).parse(&element.children)
            };
            self.blocks.push(schema.build(spec, attrs, content));
            return;
        }

        if let Some(mark) = mark_for_tag(&element.tag) {
            self.pending
                .extend(parse_inline_nodes(schema, &element.children, &[mark]));
            return;
        }

        self.visit(&element.children);
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let content = normalize_inline(std::mem::take(&mut self.pending));
        if content.iter().all(|n| n.is_text() && n.text_content().trim().is_empty()) {
            return;
        }
        self.blocks.push(self.schema.paragraph(content));
    }
}

fn parse_inline_nodes(schema: &Schema, nodes: &[MarkupNode], marks: &[Mark]) -> Vec<Node> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            MarkupNode::Text { content } => {
                out.push(Node::marked_text(content.clone(), marks.to_vec()));
            }

            MarkupNode::Comment { .. } => {}

            MarkupNode::Element(element) => match schema.match_spec(element) {
                Some((spec, attrs)) if spec.inline() => {
                    out.extend(parse_inline_element(schema, spec, attrs, element, marks));
                }
                _ => match mark_for_tag(&element.tag) {
                    Some(mark) => {
                        let mut nested = marks.to_vec();
                        nested.push(mark);
                        out.extend(parse_inline_nodes(schema, &element.children, &nested));
                    }
                    None => out.extend(parse_inline_nodes(schema, &element.children, marks)),
                },
            },
        }
    }
    out
}

fn parse_inline_element(
    schema: &Schema,
    spec: &Arc<dyn NodeSpec>,
    attrs: Attrs,
    element: &Element,
    marks: &[Mark],
) -> Vec<Node> {
    let content = if spec.atom() {
        Vec::new()
    } else {
        normalize_inline(parse_inline_nodes(schema, &element.children, marks))
    };
    vec![schema.build(spec, attrs, content)]
}
