//! # Diff Suggestion Markup
//!
//! Minimal HTML-subset codec used to read and write suggestion markup.
//!
//! ```text
//! source ──tokenize──▶ tokens ──Parser──▶ Fragment ──serialize──▶ source
//! ```
//!
//! Compact serialization is the inverse of parsing: for any tree produced by
//! [`parse`], `parse(&serialize(&tree)) == tree`.

pub mod ast;
pub mod entities;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod tokenizer;


pub use ast::{Attribute, Element, Fragment, Node};
pub use entities::{decode_entities, escape_attribute, escape_text};
pub use error::{ParseError, ParseResult};
pub use parser::{is_void_element, parse, Parser};
pub use serializer::{serialize, serialize_element};
pub use tokenizer::{tokenize, Token};

#[cfg(feature = "pretty-errors")]
pub use error::format_error;
