//! # Suggestion Node Definition
//!
//! Atomic inline node carrying an original/suggested text pair.
//!
//! ## Wire format
//!
//! ```text
//! <span data-diff-suggestion="" data-diff-suggestion-id="s1"
//!       data-diff-suggestion-comment="" contenteditable="false"
//!       class="diff-suggestion">
//!   <span data-diff-suggestion-old="">ORIGINAL</span>
//!   <span data-diff-suggestion-new="">SUGGESTED</span>
//! </span>
//! ```

use crate::attributes::*;
use crate::options::SuggestionOptions;
use diff_suggestion_common::query_attr;
use diff_suggestion_editor::markup::{Element, Node as MarkupNode};
use diff_suggestion_editor::{Attrs, NodeSpec};
use std::sync::Arc;

/// Read suggestion attributes from a wrapper element. Missing pieces are
/// empty strings.
pub fn parse_attributes(element: &Element) -> SuggestionAttributes {
    let attr = |name: &str| element.attr(name).unwrap_or_default().to_string();
    let text_of = |marker: &str| {
        query_attr(element, marker)
            .map(Element::text_content)
            .unwrap_or_default()
    };

    SuggestionAttributes {
        id: attr(ID_ATTR),
        comment: attr(COMMENT_ATTR),
        original_text: text_of(OLD_ATTR),
        suggested_text: text_of(NEW_ATTR),
    }
}

/// Wrapper element with its two text regions
pub fn render_attributes(options: &SuggestionOptions, attrs: &SuggestionAttributes) -> Element {
    let mut wrapper = Element::new("span")
        .with_attr(MARKER_ATTR, "")
        .with_attr(ID_ATTR, attrs.id.clone())
        .with_attr(COMMENT_ATTR, attrs.comment.clone())
        .with_attr("contenteditable", "false")
        .with_attr("class", options.class_name.clone());

    for (name, value) in &options.html_attributes {
        if name != MARKER_ATTR {
            wrapper.set_attr(name.clone(), value.clone());
        }
    }

    wrapper
        .with_child(text_region(OLD_ATTR, &attrs.original_text))
        .with_child(text_region(NEW_ATTR, &attrs.suggested_text))
}

fn text_region(marker: &str, text: &str) -> Element {
    let region = Element::new("span").with_attr(marker, "");
    if text.is_empty() {
        region
    } else {
        region.with_text(text)
    }
}

/// Schema entry for `diffSuggestion`
#[derive(Debug, Clone)]
pub struct SuggestionNodeSpec {
    options: Arc<SuggestionOptions>,
}

impl SuggestionNodeSpec {
    pub fn new(options: Arc<SuggestionOptions>) -> Self {
        Self { options }
    }
}

impl NodeSpec for SuggestionNodeSpec {
    fn name(&self) -> &str {
        NODE_NAME
    }

    fn inline(&self) -> bool {
        true
    }

    fn atom(&self) -> bool {
        true
    }

    fn default_attrs(&self) -> Attrs {
        SuggestionAttributes::default().to_attrs()
    }

    fn parse_markup(&self, element: &Element) -> Option<Attrs> {
        if element.tag != "span" || !element.has_attr(MARKER_ATTR) {
            return None;
        }
        Some(parse_attributes(element).to_attrs())
    }

    fn render_markup(&self, attrs: &Attrs, _children: Vec<MarkupNode>) -> Element {
        render_attributes(&self.options, &SuggestionAttributes::from_attrs(attrs))
    }
}
