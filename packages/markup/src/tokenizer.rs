//! Lexer for the HTML subset used by suggestion markup, built on logos
//!
//! Markup is lexed in two passes. The outer lexer splits the source into
//! tags, comments and text runs; start tags are then re-lexed by
//! [`lex_attributes`] to pull out their attribute list.

use logos::{Lexer, Logos};
use std::ops::Range;

/// Whether a comment was closed with `-->` before the end of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentState {
    Closed,
    Unclosed,
}

/// Token types for markup
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token<'src> {
    #[token("<!--", lex_comment)]
    Comment(CommentState),

    // <!DOCTYPE html> and friends, ignored by the parser
    #[regex(r"<![a-zA-Z][^>]*>")]
    Declaration,

    #[regex(r#"<[a-zA-Z][a-zA-Z0-9:_-]*([^<>"']|"[^"]*"|'[^']*')*>"#, |lex| lex.slice())]
    StartTag(&'src str),

    #[regex(r"</[a-zA-Z][a-zA-Z0-9:_-]*[ \t\r\n\f]*>", |lex| lex.slice())]
    EndTag(&'src str),

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),
}

fn lex_comment<'src>(lex: &mut Lexer<'src, Token<'src>>) -> CommentState {
    match lex.remainder().find("-->") {
        Some(end) => {
            lex.bump(end + 3);
            CommentState::Closed
        }
        None => {
            lex.bump(lex.remainder().len());
            CommentState::Unclosed
        }
    }
}

/// Tokenize markup source.
///
/// A `<` that does not open a tag, comment or declaration is returned as
/// literal text, so tokenizing never fails.
pub fn tokenize(source: &str) -> Vec<(Token<'_>, Range<usize>)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let token = result.unwrap_or(Token::Text(lexer.slice()));
        tokens.push((token, lexer.span()));
    }

    tokens
}

/// Attribute tokens inside a start tag
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum AttrToken<'src> {
    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    DoubleQuoted(&'src str),

    #[regex(r"'[^']*'", |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    SingleQuoted(&'src str),

    #[regex(r#"[^ \t\r\n\f"'=<>`]+"#, |lex| lex.slice())]
    Word(&'src str),
}

/// A start tag split into its raw parts (values are not entity-decoded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStartTag<'src> {
    pub name: &'src str,
    pub attributes: Vec<(&'src str, &'src str)>,
    pub self_closing: bool,
}

/// Split a `StartTag` slice such as `<span a="1" b>` into name and attributes
pub fn split_start_tag(raw: &str) -> RawStartTag<'_> {
    let inner = raw
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(raw);

    let name_end = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '-')))
        .unwrap_or(inner.len());
    let name = &inner[..name_end];

    let mut rest = inner[name_end..].trim_end();
    let self_closing = rest.ends_with('/');
    if self_closing {
        rest = &rest[..rest.len() - 1];
    }

    RawStartTag {
        name,
        attributes: lex_attributes(rest),
        self_closing,
    }
}

/// Lex an attribute list. Attributes without a value get an empty string.
pub fn lex_attributes(input: &str) -> Vec<(&str, &str)> {
    let tokens: Vec<AttrToken<'_>> = AttrToken::lexer(input).filter_map(Result::ok).collect();
    let mut attributes = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            AttrToken::Word(name) => {
                if matches!(tokens.get(i + 1), Some(AttrToken::Eq)) {
                    let value = match tokens.get(i + 2) {
                        Some(AttrToken::DoubleQuoted(v))
                        | Some(AttrToken::SingleQuoted(v))
                        | Some(AttrToken::Word(v)) => {
                            i += 3;
                            *v
                        }
                        _ => {
                            i += 2;
                            ""
                        }
                    };
                    attributes.push((name, value));
                } else {
                    attributes.push((name, ""));
                    i += 1;
                }
            }
            // Stray `=` or quoted strings without a name
            _ => i += 1,
        }
    }

    attributes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic_tags() {
        let tokens = tokenize("<p>Hello</p>");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].0, Token::StartTag("<p>"));
        assert_eq!(tokens[1].0, Token::Text("Hello"));
        assert_eq!(tokens[2].0, Token::EndTag("</p>"));
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        let tokens = tokenize("a < b");
        let text: String = tokens
            .iter()
            .map(|(t, _)| match t {
                Token::Text(s) => *s,
                _ => panic!("expected only text, got {:?}", t),
            })
            .collect();
        assert_eq!(text, "a < b");
    }

    #[test]
    fn test_quoted_gt_inside_start_tag() {
        let tokens = tokenize(r#"<span title="a > b">x</span>"#);
        assert_eq!(tokens[0].0, Token::StartTag(r#"<span title="a > b">"#));
    }

    #[test]
    fn test_comment_states() {
        let closed = tokenize("<!-- note -->");
        assert_eq!(closed[0].0, Token::Comment(CommentState::Closed));

        let open = tokenize("<!-- never closed");
        assert_eq!(open[0].0, Token::Comment(CommentState::Unclosed));
        assert_eq!(open[0].1, 0..17);
    }

    #[test]
    fn test_split_start_tag_attributes() {
        let tag = split_start_tag(r#"<span data-diff-suggestion data-id="s1" class='a b' x=y/>"#);
        assert_eq!(tag.name, "span");
        assert!(tag.self_closing);
        assert_eq!(
            tag.attributes,
            vec![
                ("data-diff-suggestion", ""),
                ("data-id", "s1"),
                ("class", "a b"),
                ("x", "y"),
            ]
        );
    }

    #[test]
    fn test_unquoted_value_with_slash() {
        let tag = split_start_tag("<a href=docs/intro>");
        assert!(!tag.self_closing);
        assert_eq!(tag.attributes, vec![("href", "docs/intro")]);
    }
}
