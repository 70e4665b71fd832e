//! Attribute queries over markup trees

use crate::visitor::{walk_element, NodePath, Visitor};
use diff_suggestion_markup::Element;

/// Collects the paths of elements carrying an attribute
struct AttributeCollector<'a> {
    name: &'a str,
    first_only: bool,
    paths: Vec<NodePath>,
}

impl Visitor for AttributeCollector<'_> {
    fn visit_element(&mut self, element: &Element, path: &[usize]) {
        if self.first_only && !self.paths.is_empty() {
            return;
        }
        if element.has_attr(self.name) {
            self.paths.push(path.to_vec());
        }
        walk_element(self, element, path);
    }
}

/// Paths of every element (root included) that carries `name`, in document order
pub fn find_attr_paths(root: &Element, name: &str) -> Vec<NodePath> {
    let mut collector = AttributeCollector {
        name,
        first_only: false,
        paths: Vec::new(),
    };
    collector.visit_element(root, &[]);
    collector.paths
}

/// First descendant (root excluded) that carries `name`
pub fn query_attr<'a>(root: &'a Element, name: &str) -> Option<&'a Element> {
    let mut collector = AttributeCollector {
        name,
        first_only: true,
        paths: Vec::new(),
    };
    for (index, child) in root.children.iter().enumerate() {
        if let Some(element) = child.as_element() {
            collector.visit_element(element, &[index]);
        }
    }
    let path = collector.paths.into_iter().next()?;
    root.element_at_path(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("span")
            .with_attr("data-mark", "root")
            .with_child(Element::new("span").with_text("plain"))
            .with_child(
                Element::new("div").with_child(
                    Element::new("button")
                        .with_attr("data-mark", "deep")
                        .with_text("x"),
                ),
            )
            .with_child(Element::new("em").with_attr("data-mark", "late"))
    }

    #[test]
    fn test_find_attr_paths_includes_root_and_nested() {
        let paths = find_attr_paths(&sample(), "data-mark");
        assert_eq!(paths, vec![vec![], vec![1, 0], vec![2]]);
    }

    #[test]
    fn test_query_attr_skips_root_and_takes_first() {
        let root = sample();
        let found = query_attr(&root, "data-mark").unwrap();
        assert_eq!(found.attr("data-mark"), Some("deep"));
        assert!(query_attr(&root, "data-missing").is_none());
    }
}
