use crate::ast::*;
use crate::entities::{escape_attribute, escape_text};
use crate::parser::is_void_element;

// Output is the exact inverse of [`crate::parse`]: text and attribute values
// are escaped, attributes are always written double-quoted, and no
// whitespace is added.

/// Serialize a fragment
pub fn serialize(fragment: &Fragment) -> String {
    let mut output = String::new();
    for node in &fragment.nodes {
        write_node(node, &mut output);
    }
    output
}

/// Serialize a single element
pub fn serialize_element(element: &Element) -> String {
    let mut output = String::new();
    write_element(element, &mut output);
    output
}

fn write_node(node: &Node, output: &mut String) {
    match node {
        Node::Element(element) => write_element(element, output),
        Node::Text { content } => output.push_str(&escape_text(content)),
        Node::Comment { content } => {
            output.push_str("<!--");
            output.push_str(content);
            output.push_str("-->");
        }
    }
}

fn write_element(element: &Element, output: &mut String) {
    output.push('<');
    output.push_str(&element.tag);
    for attr in &element.attributes {
        output.push(' ');
        output.push_str(&attr.name);
        output.push_str("=\"");
        output.push_str(&escape_attribute(&attr.value));
        output.push('"');
    }
    output.push('>');

    if is_void_element(&element.tag) {
        return;
    }

    for child in &element.children {
        write_node(child, output);
    }
    output.push_str("</");
    output.push_str(&element.tag);
    output.push('>');
}
