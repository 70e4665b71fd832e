use std::ops::Range;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected end of input at {pos}: expected {expected}")]
    UnexpectedEof { pos: usize, expected: String },

    #[error("Unexpected end tag </{tag}> at {pos}")]
    UnexpectedEndTag { pos: usize, tag: String },
}

impl ParseError {
    pub fn unexpected_eof(pos: usize, expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            pos,
            expected: expected.into(),
        }
    }

    pub fn unexpected_end_tag(pos: usize, tag: impl Into<String>) -> Self {
        Self::UnexpectedEndTag {
            pos,
            tag: tag.into(),
        }
    }

    /// Byte range in the source the error points at
    pub fn span(&self) -> Range<usize> {
        match self {
            ParseError::UnexpectedEof { pos, .. } => *pos..*pos,
            ParseError::UnexpectedEndTag { pos, tag } => *pos..*pos + tag.len() + 3,
        }
    }
}

/// Pretty-print an error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &ParseError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let mut span = error.span();
    if span.is_empty() {
        span.start = span.start.min(source.len()).saturating_sub(1);
        span.end = span.start + 1;
    }

    let message = match error {
        ParseError::UnexpectedEof { expected, .. } => format!("expected {}", expected),
        ParseError::UnexpectedEndTag { tag, .. } => format!("no open <{}> element", tag),
    };

    let mut output = Vec::new();
    let report = Report::build(ReportKind::Error, filename, span.start)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, span))
                .with_color(Color::Red)
                .with_message(message),
        )
        .finish();

    if report
        .write((filename, Source::from(source)), &mut output)
        .is_err()
    {
        return error.to_string();
    }

    String::from_utf8(output).unwrap_or_else(|_| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_tag_span_covers_tag() {
        let err = ParseError::unexpected_end_tag(4, "em");
        assert_eq!(err.span(), 4..9);
    }

    #[cfg(feature = "pretty-errors")]
    #[test]
    fn test_format_error_mentions_message() {
        let source = "<p>x</em></p>";
        let err = ParseError::unexpected_end_tag(4, "em");
        let report = format_error(source, "fragment.html", &err);
        assert!(report.contains("Unexpected end tag </em>"));
    }
}
