use crate::ast::*;
use crate::entities::decode_entities;
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::{split_start_tag, tokenize, CommentState, Token};
use std::ops::Range;

/// Elements that never have content or an end tag
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}

/// Parser for markup fragments
///
/// Parsing is lenient in the way browsers are: unclosed elements are closed
/// at the end of input, an end tag closes any elements still open inside the
/// matching one, and stray `<` characters are text. Only an unterminated
/// comment or an end tag with no matching open element is an error.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: tokenize(source),
            pos: 0,
        }
    }

    /// Parse the whole source as a fragment
    pub fn parse_fragment(&mut self) -> ParseResult<Fragment> {
        let mut roots: Vec<Node> = Vec::new();
        let mut open: Vec<Element> = Vec::new();

        while let Some((token, span)) = self.advance() {
            match token {
                Token::Text(raw) => {
                    let text = decode_entities(raw).into_owned();
                    append(&mut open, &mut roots, Node::text(text));
                }

                Token::Comment(CommentState::Closed) => {
                    let content = &self.source[span.start + 4..span.end - 3];
                    append(
                        &mut open,
                        &mut roots,
                        Node::Comment {
                            content: content.to_string(),
                        },
                    );
                }

                Token::Comment(CommentState::Unclosed) => {
                    return Err(ParseError::unexpected_eof(self.source.len(), "-->"));
                }

                Token::Declaration => {}

                Token::StartTag(raw) => {
                    let raw_tag = split_start_tag(raw);
                    let mut element = Element::new(raw_tag.name.to_ascii_lowercase());
                    for (name, value) in raw_tag.attributes {
                        let name = name.to_ascii_lowercase();
                        // First occurrence wins, as in HTML
                        if !element.has_attr(&name) {
                            element.set_attr(name, decode_entities(value).into_owned());
                        }
                    }

                    if raw_tag.self_closing || is_void_element(&element.tag) {
                        append(&mut open, &mut roots, element.into());
                    } else {
                        open.push(element);
                    }
                }

                Token::EndTag(raw) => {
                    let name = raw[2..raw.len() - 1].trim().to_ascii_lowercase();
                    if is_void_element(&name) {
                        continue;
                    }

                    let Some(index) = open.iter().rposition(|e| e.tag == name) else {
                        return Err(ParseError::unexpected_end_tag(span.start, name));
                    };
                    close_from(&mut open, &mut roots, index);
                }
            }
        }

        close_from(&mut open, &mut roots, 0);
        Ok(Fragment::from(roots))
    }

    fn advance(&mut self) -> Option<(Token<'src>, Range<usize>)> {
        let next = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        next
    }
}

/// Close every open element from `index` up, nesting each into its parent
fn close_from(open: &mut Vec<Element>, roots: &mut Vec<Node>, index: usize) {
    let mut closed = open.split_off(index);
    while let Some(element) = closed.pop() {
        match closed.last_mut() {
            Some(parent) => push_child(&mut parent.children, element.into()),
            None => append(open, roots, element.into()),
        }
    }
}

fn append(open: &mut [Element], roots: &mut Vec<Node>, node: Node) {
    match open.last_mut() {
        Some(parent) => push_child(&mut parent.children, node),
        None => push_child(roots, node),
    }
}

/// Push a child, merging adjacent text nodes
fn push_child(children: &mut Vec<Node>, node: Node) {
    if let Node::Text { content } = &node {
        if let Some(Node::Text { content: previous }) = children.last_mut() {
            previous.push_str(content);
            return;
        }
    }
    children.push(node);
}

/// Parse a markup fragment
pub fn parse(source: &str) -> ParseResult<Fragment> {
    Parser::new(source).parse_fragment()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let fragment = parse(r#"<p>Hello <strong>world</strong>!</p>"#).unwrap();
        assert_eq!(fragment.nodes.len(), 1);

        let p = fragment.first_element().unwrap();
        assert_eq!(p.tag, "p");
        assert_eq!(p.children.len(), 3);
        assert_eq!(p.text_content(), "Hello world!");
    }

    #[test]
    fn test_attribute_values_are_decoded() {
        let fragment = parse(r#"<span title="a &amp; &quot;b&quot;"></span>"#).unwrap();
        let span = fragment.first_element().unwrap();
        assert_eq!(span.attr("title"), Some("a & \"b\""));
    }

    #[test]
    fn test_unclosed_elements_close_at_eof() {
        let fragment = parse("<p><em>open").unwrap();
        let p = fragment.first_element().unwrap();
        let em = p.children[0].as_element().unwrap();
        assert_eq!(em.text_content(), "open");
    }

    #[test]
    fn test_end_tag_closes_inner_elements() {
        let fragment = parse("<p><em>a</p>b").unwrap();
        assert_eq!(fragment.nodes.len(), 2);
        assert_eq!(fragment.nodes[1], Node::text("b"));
    }

    #[test]
    fn test_unmatched_end_tag_is_error() {
        let err = parse("<p>x</em></p>").unwrap_err();
        assert_eq!(err, ParseError::unexpected_end_tag(4, "em"));
    }

    #[test]
    fn test_unterminated_comment_is_error() {
        let err = parse("<p>x<!-- oops").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_void_elements() {
        let fragment = parse("a<br>b<br/>c</br>").unwrap();
        assert_eq!(fragment.nodes.len(), 5);
        assert_eq!(fragment.text_content(), "abc");
    }

    #[test]
    fn test_whitespace_is_preserved() {
        let fragment = parse("<span>  two  spaces\n</span>").unwrap();
        assert_eq!(fragment.text_content(), "  two  spaces\n");
    }

    #[test]
    fn test_doctype_and_comments() {
        let fragment = parse("<!DOCTYPE html><!-- c --><p></p>").unwrap();
        assert_eq!(fragment.nodes.len(), 2);
        assert_eq!(
            fragment.nodes[0],
            Node::Comment {
                content: " c ".to_string()
            }
        );
    }
}
