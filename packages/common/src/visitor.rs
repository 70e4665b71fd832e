use diff_suggestion_markup::{Element, Fragment, Node};

/// Child-index path from a traversal root to a node
pub type NodePath = Vec<usize>;

/// Visitor pattern for traversing markup trees immutably
///
/// Every callback receives the path of the visited node relative to the
/// traversal root. For a fragment the first index selects the top-level
/// node; for an element root the element itself has the empty path.
/// Override specific visit_* methods to act on nodes; the defaults walk the
/// entire tree in document order.
pub trait Visitor: Sized {
    fn visit_fragment(&mut self, fragment: &Fragment) {
        walk_fragment(self, fragment);
    }

    fn visit_element(&mut self, element: &Element, path: &[usize]) {
        walk_element(self, element, path);
    }

    fn visit_text(&mut self, _content: &str, _path: &[usize]) {
        // Leaf node, no children to walk
    }

    fn visit_comment(&mut self, _content: &str, _path: &[usize]) {
        // Leaf node, no children to walk
    }
}

pub fn walk_fragment<V: Visitor>(visitor: &mut V, fragment: &Fragment) {
    for (index, node) in fragment.nodes.iter().enumerate() {
        walk_node(visitor, node, &[index]);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node, path: &[usize]) {
    match node {
        Node::Element(element) => visitor.visit_element(element, path),
        Node::Text { content } => visitor.visit_text(content, path),
        Node::Comment { content } => visitor.visit_comment(content, path),
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element, path: &[usize]) {
    let mut child_path = Vec::with_capacity(path.len() + 1);
    child_path.extend_from_slice(path);
    child_path.push(0);

    for (index, child) in element.children.iter().enumerate() {
        if let Some(last) = child_path.last_mut() {
            *last = index;
        }
        walk_node(visitor, child, &child_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        elements: Vec<(String, NodePath)>,
        texts: Vec<String>,
    }

    impl Visitor for Recorder {
        fn visit_element(&mut self, element: &Element, path: &[usize]) {
            self.elements.push((element.tag.clone(), path.to_vec()));
            walk_element(self, element, path);
        }

        fn visit_text(&mut self, content: &str, _path: &[usize]) {
            self.texts.push(content.to_string());
        }
    }

    #[test]
    fn test_walk_records_document_order_paths() {
        let root = Element::new("div")
            .with_text("a")
            .with_child(Element::new("span").with_child(Element::new("b").with_text("c")))
            .with_child(Element::new("i"));

        let mut recorder = Recorder::default();
        recorder.visit_element(&root, &[]);

        assert_eq!(
            recorder.elements,
            vec![
                ("div".to_string(), vec![]),
                ("span".to_string(), vec![1]),
                ("b".to_string(), vec![1, 0]),
                ("i".to_string(), vec![2]),
            ]
        );
        assert_eq!(recorder.texts, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_walk_fragment_prefixes_top_level_index() {
        let fragment = Fragment::from(vec![
            Node::text("x"),
            Element::new("p").with_child(Element::new("em")).into(),
        ]);

        let mut recorder = Recorder::default();
        recorder.visit_fragment(&fragment);

        assert_eq!(recorder.elements[1], ("em".to_string(), vec![1, 0]));
    }
}
