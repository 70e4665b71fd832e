//! Default accept/reject toolbar

use crate::attributes::{ACCEPT_MARKER, REJECT_MARKER};
use crate::meta::SuggestionAction;
use crate::options::{ButtonLabel, ButtonOptions};
use diff_suggestion_editor::markup::{parse, Element, Node as MarkupNode};

pub const TOOLBAR_CLASS: &str = "diff-actions";

/// `span.diff-actions` holding the accept and reject buttons
pub fn default_toolbar(buttons: &ButtonOptions) -> Element {
    Element::new("span")
        .with_attr("class", TOOLBAR_CLASS)
        .with_child(button(SuggestionAction::Accept, buttons.label(SuggestionAction::Accept)))
        .with_child(button(SuggestionAction::Reject, buttons.label(SuggestionAction::Reject)))
}

fn button(action: SuggestionAction, label: &ButtonLabel) -> Element {
    let (base_class, default_title, marker) = match action {
        SuggestionAction::Accept => ("diff-accept-btn", "Accept suggestion", ACCEPT_MARKER),
        SuggestionAction::Reject => ("diff-reject-btn", "Reject suggestion", REJECT_MARKER),
    };

    let class = match label.class_name() {
        Some(extra) if !extra.is_empty() => format!("{} {}", base_class, extra),
        _ => base_class.to_string(),
    };

    let mut element = Element::new("button")
        .with_attr("type", "button")
        .with_attr("class", class)
        .with_attr("title", label.title().unwrap_or(default_title))
        .with_attr(marker, "")
        .with_children(label_content(label.content()));

    if let Some(style) = label.style() {
        for (property, value) in style {
            element.set_style_property(property, value);
        }
    }
    element
}

/// Label content as markup, or literal text when it does not parse
fn label_content(content: &str) -> Vec<MarkupNode> {
    if content.is_empty() {
        return Vec::new();
    }
    match parse(content) {
        Ok(fragment) => fragment.nodes,
        Err(_) => vec![MarkupNode::text(content)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ButtonConfig;
    use diff_suggestion_editor::markup::serialize_element;
    use std::collections::BTreeMap;

    #[test]
    fn test_default_toolbar_is_empty_labelled() {
        let toolbar = default_toolbar(&ButtonOptions::default());
        assert_eq!(
            serialize_element(&toolbar),
            concat!(
                r#"<span class="diff-actions">"#,
                r#"<button type="button" class="diff-accept-btn" title="Accept suggestion" "#,
                r#"data-diff-suggestion-toolbar-accept=""></button>"#,
                r#"<button type="button" class="diff-reject-btn" title="Reject suggestion" "#,
                r#"data-diff-suggestion-toolbar-reject=""></button></span>"#
            )
        );
    }

    #[test]
    fn test_descriptor_label() {
        let buttons = ButtonOptions {
            accept: "✓".into(),
            reject: ButtonConfig {
                content: "<b>no</b>".to_string(),
                title: Some("Drop it".to_string()),
                class_name: Some("danger".to_string()),
                style: BTreeMap::from([("color".to_string(), "red".to_string())]),
            }
            .into(),
        };
        let toolbar = default_toolbar(&buttons);
        let accept = toolbar.element_at_path(&[0]).unwrap();
        let reject = toolbar.element_at_path(&[1]).unwrap();

        assert_eq!(accept.text_content(), "✓");
        assert_eq!(reject.attr("class"), Some("diff-reject-btn danger"));
        assert_eq!(reject.attr("title"), Some("Drop it"));
        assert_eq!(reject.style_property("color").as_deref(), Some("red"));
        assert_eq!(reject.element_at_path(&[0]).map(|b| b.tag.as_str()), Some("b"));
    }

    #[test]
    fn test_unparseable_content_falls_back_to_text() {
        let nodes = label_content("open</b>");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text_content(), "open</b>");
    }
}
