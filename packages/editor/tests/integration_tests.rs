//! Integration tests for editor crate

use diff_suggestion_editor::markup::{Element, Node as MarkupNode};
use diff_suggestion_editor::{
    Attrs, Dispatch, EditorState, EditorView, Node, NodeSpec, NodeView, NodeViewHost,
    PositionHandle, Schema, ViewEvent,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

#[derive(Debug)]
struct ChipSpec;

impl NodeSpec for ChipSpec {
    fn name(&self) -> &str {
        "chip"
    }

    fn inline(&self) -> bool {
        true
    }

    fn atom(&self) -> bool {
        true
    }

    fn parse_markup(&self, element: &Element) -> Option<Attrs> {
        if element.tag != "span" {
            return None;
        }
        let label = element.attr("data-chip")?;
        Some(Attrs::from([("label".to_string(), label.to_string())]))
    }

    fn render_markup(&self, attrs: &Attrs, _children: Vec<MarkupNode>) -> Element {
        let label = attrs.get("label").cloned().unwrap_or_default();
        Element::new("span").with_attr("data-chip", label)
    }
}

type Log = Rc<RefCell<Vec<String>>>;

/// Node view that removes its chip when clicked and logs its lifecycle
struct ChipView {
    dom: Element,
    handle: PositionHandle,
    log: Log,
}

impl ChipView {
    fn new(node: &Node, handle: PositionHandle, log: Log) -> Self {
        let label = node.attr("label").unwrap_or_default().to_string();
        log.borrow_mut().push(format!("create {}", label));
        Self {
            dom: Element::new("button").with_text(label),
            handle,
            log,
        }
    }
}

impl NodeView for ChipView {
    fn dom(&self) -> &Element {
        &self.dom
    }

    fn update(&mut self, node: &Node) -> bool {
        // Label changes force a fresh view
        let label = node.attr("label").unwrap_or_default();
        let accepted = node.type_name() == "chip" && self.dom.text_content() == label;
        self.log
            .borrow_mut()
            .push(format!("update {} {}", label, accepted));
        accepted
    }

    fn handle_event(&mut self, event: &ViewEvent, host: &mut dyn NodeViewHost) -> bool {
        let ViewEvent::Click { .. } = event else {
            return false;
        };
        let Some(pos) = self.handle.get() else {
            return false;
        };

        let mut tr = host.state().tr();
        if tr.delete(pos, pos + 1).is_err() {
            return false;
        }
        host.dispatcher().dispatch(tr);
        true
    }

    fn destroy(&mut self) {
        self.log
            .borrow_mut()
            .push(format!("destroy {}", self.dom.text_content()));
    }
}

fn setup(source: &str) -> (EditorView, Log) {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let schema = Arc::new(Schema::new().with_spec(Arc::new(ChipSpec)));
    let state = EditorState::from_markup(schema, source).unwrap();
    let mut view = EditorView::new(state);

    let log: Log = Rc::default();
    let factory_log = Rc::clone(&log);
    view.register_node_view(
        "chip",
        Box::new(move |node: &Node, handle: PositionHandle| {
            Box::new(ChipView::new(node, handle, Rc::clone(&factory_log))) as Box<dyn NodeView>
        }),
    );
    (view, log)
}

#[test]
fn test_views_mounted_for_existing_nodes() {
    let (view, log) = setup(r#"<p>a<span data-chip="x"></span>b<span data-chip="y"></span></p>"#);
    assert_eq!(view.mounted_positions(), vec![2, 4]);
    assert_eq!(*log.borrow(), vec!["create x", "create y"]);
}

#[test]
fn test_positions_follow_edits() {
    let (mut view, log) = setup(r#"<p>a<span data-chip="x"></span></p>"#);

    let mut tr = view.state().tr();
    tr.insert_text("123", 1, 1).unwrap();
    view.dispatch(tr);

    assert_eq!(view.mounted_positions(), vec![5]);
    // Unchanged nodes are not offered an update
    assert_eq!(*log.borrow(), vec!["create x"]);
}

#[test]
fn test_removed_node_destroys_view() {
    let (mut view, log) = setup(r#"<p>a<span data-chip="x"></span></p>"#);

    let mut tr = view.state().tr();
    tr.delete(2, 3).unwrap();
    view.dispatch(tr);

    assert!(view.mounted_positions().is_empty());
    assert_eq!(*log.borrow(), vec!["create x", "destroy x"]);
}

#[test]
fn test_declined_update_recreates_view() {
    let (mut view, log) = setup(r#"<p>a<span data-chip="x"></span></p>"#);

    let mut tr = view.state().tr();
    tr.set_node_attrs(2, Attrs::from([("label".to_string(), "z".to_string())]))
        .unwrap();
    view.dispatch(tr);

    assert_eq!(view.mounted_positions(), vec![2]);
    assert_eq!(
        *log.borrow(),
        vec!["create x", "update z false", "destroy x", "create z"]
    );
}

#[test]
fn test_click_dispatches_through_host() {
    let (mut view, log) = setup(r#"<p>a<span data-chip="x"></span>b</p>"#);

    assert!(view.click(2, &[]));
    assert_eq!(view.state().to_markup(), "<p>ab</p>");
    assert_eq!(view.state().version(), 1);
    assert!(view.mounted_positions().is_empty());
    assert_eq!(log.borrow().last().map(String::as_str), Some("destroy x"));

    // Nothing mounted there any more
    assert!(!view.click(2, &[]));
}

#[test]
fn test_render_uses_view_surface() {
    let (view, _log) = setup(r#"<p>a<span data-chip="x"></span></p>"#);
    let rendered = diff_suggestion_editor::markup::serialize(&view.render());
    assert_eq!(rendered, "<p>a<button>x</button></p>");
    assert_eq!(view.state().to_markup(), r#"<p>a<span data-chip="x"></span></p>"#);
}

#[test]
fn test_destroy_is_idempotent() {
    let (mut view, log) = setup(r#"<p><span data-chip="x"></span></p>"#);
    view.destroy();
    view.destroy();
    drop(view);
    assert_eq!(*log.borrow(), vec!["create x", "destroy x"]);
}

#[test]
fn test_stale_transaction_is_dropped() {
    let (mut view, _log) = setup("<p>abc</p>");
    let stale = {
        let mut tr = view.state().tr();
        tr.delete(1, 2).unwrap();
        tr
    };

    let mut tr = view.state().tr();
    tr.insert_text("x", 1, 1).unwrap();
    view.dispatch(tr);
    view.dispatch(stale);

    assert_eq!(view.state().to_markup(), "<p>xabc</p>");
}
