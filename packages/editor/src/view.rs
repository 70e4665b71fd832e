//! # Editor View
//!
//! Headless editor surface. Owns the current state, applies dispatched
//! transactions and keeps mounted node views in sync with the document.
//!
//! ## Node view lifecycle
//!
//! After every applied transaction each mounted view is mapped through the
//! transaction:
//! - node removed → `destroy()`, its position handle detaches
//! - node unchanged → kept as is
//! - node changed → `update(node)`; a declined update destroys the view and
//!   a fresh one is created
//!
//! Nodes of a registered type without a view get one.

use crate::command::{Command, Dispatch};
use crate::mapping::Mapping;
use crate::model::Node;
use crate::node_view::{NodeView, NodeViewFactory, NodeViewHost, PositionHandle, ViewEvent};
use crate::state::{EditorState, Selection};
use crate::transaction::Transaction;
use diff_suggestion_markup::Fragment;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

struct MountedView {
    pos: usize,
    node: Node,
    handle: PositionHandle,
    view: Box<dyn NodeView>,
}

impl MountedView {
    fn destroy(&mut self) {
        self.view.destroy();
        self.handle.set(None);
    }
}

pub struct EditorView {
    state: EditorState,
    factories: HashMap<String, NodeViewFactory>,
    mounted: Vec<MountedView>,
}

impl EditorView {
    pub fn new(state: EditorState) -> Self {
        Self {
            state,
            factories: HashMap::new(),
            mounted: Vec::new(),
        }
    }

    /// Register a node view factory for a node type and mount views for
    /// nodes already in the document
    pub fn register_node_view(&mut self, name: impl Into<String>, factory: NodeViewFactory) {
        let name = name.into();
        debug!(node_type = %name, "Registering node view");
        self.factories.insert(name, factory);
        self.sync_views(&Mapping::new());
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Apply a transaction and reconcile node views
    pub fn dispatch(&mut self, tr: Transaction) {
        match self.state.apply(&tr) {
            Ok(next) => {
                self.state = next;
                self.sync_views(tr.mapping());
            }
            Err(err) => warn!(error = %err, "Dropping transaction"),
        }
    }

    /// Run a command with this view as dispatcher
    pub fn run(&mut self, command: &dyn Command) -> bool {
        let state = self.state.clone();
        let mut sink = |tr: Transaction| self.dispatch(tr);
        let dispatch: &mut dyn Dispatch = &mut sink;
        let handled = command.execute(&state, Some(dispatch));
        debug!(command = command.name(), handled, "Ran command");
        handled
    }

    pub fn set_selection(&mut self, selection: Selection) {
        let mut tr = self.state.tr();
        tr.set_selection(selection);
        self.dispatch(tr);
    }

    /// Click inside the node view mounted at `pos`; `target` is a child-index
    /// path from the view root
    pub fn click(&mut self, pos: usize, target: &[usize]) -> bool {
        self.send_event(
            pos,
            ViewEvent::Click {
                target: target.to_vec(),
            },
        )
    }

    pub fn pointer_enter(&mut self, pos: usize) -> bool {
        self.send_event(pos, ViewEvent::PointerEnter)
    }

    pub fn pointer_leave(&mut self, pos: usize) -> bool {
        self.send_event(pos, ViewEvent::PointerLeave)
    }

    fn send_event(&mut self, pos: usize, event: ViewEvent) -> bool {
        let Some(index) = self.mounted.iter().position(|m| m.pos == pos) else {
            debug!(pos, "No node view at position");
            return false;
        };

        let mut mapping = Mapping::new();
        let mut host = ViewHost {
            state: &mut self.state,
            mapping: &mut mapping,
        };
        let handled = self.mounted[index].view.handle_event(&event, &mut host);

        if !mapping.maps().is_empty() {
            self.sync_views(&mapping);
        }
        handled
    }

    pub fn view_at(&self, pos: usize) -> Option<&dyn NodeView> {
        self.mounted
            .iter()
            .find(|m| m.pos == pos)
            .map(|m| m.view.as_ref())
    }

    /// Positions of mounted node views in document order
    pub fn mounted_positions(&self) -> Vec<usize> {
        self.mounted.iter().map(|m| m.pos).collect()
    }

    /// Render the document with mounted node views in place of their nodes
    pub fn render(&self) -> Fragment {
        let mounted = &self.mounted;
        self.state
            .schema()
            .render_document(self.state.doc(), &mut |node, pos| {
                mounted
                    .iter()
                    .find(|m| m.pos == pos && m.node.type_name() == node.type_name())
                    .map(|m| m.view.dom().clone())
            })
    }

    /// Destroy every mounted node view
    pub fn destroy(&mut self) {
        for mut mounted in self.mounted.drain(..) {
            mounted.destroy();
        }
    }

    fn sync_views(&mut self, mapping: &Mapping) {
        let doc = Arc::clone(self.state.doc_arc());
        let mut kept = Vec::with_capacity(self.mounted.len());

        for mut mounted in std::mem::take(&mut self.mounted) {
            let next = mapping
                .map_node(mounted.pos, mounted.node.node_size())
                .and_then(|pos| doc.node_at(pos).map(|node| (pos, node)));

            match next {
                Some((pos, node)) => {
                    // The view may read its position while updating
                    mounted.handle.set(Some(pos));
                    if *node == mounted.node || mounted.view.update(node) {
                        mounted.pos = pos;
                        mounted.node = node.clone();
                        kept.push(mounted);
                    } else {
                        debug!(pos, "Node view declined update");
                        mounted.destroy();
                    }
                }
                None => {
                    debug!(pos = mounted.pos, "Node removed, destroying view");
                    mounted.destroy();
                }
            }
        }

        let factories = &self.factories;
        let mut created = Vec::new();
        doc.descendants(|node, pos| {
            if let Some(factory) = factories.get(node.type_name()) {
                if !kept.iter().any(|m: &MountedView| m.pos == pos) {
                    let handle = PositionHandle::new(pos);
                    let view = factory(node, handle.clone());
                    created.push(MountedView {
                        pos,
                        node: node.clone(),
                        handle,
                        view,
                    });
                }
            }
            true
        });

        if !created.is_empty() {
            debug!(count = created.len(), "Mounted node views");
        }
        kept.extend(created);
        kept.sort_by_key(|m| m.pos);
        self.mounted = kept;
    }
}

impl Drop for EditorView {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Host handed to node views: applies dispatched transactions immediately
/// and records their mapping for reconciliation afterwards
struct ViewHost<'a> {
    state: &'a mut EditorState,
    mapping: &'a mut Mapping,
}

impl Dispatch for ViewHost<'_> {
    fn dispatch(&mut self, tr: Transaction) {
        match self.state.apply(&tr) {
            Ok(next) => {
                *self.state = next;
                self.mapping.append(tr.mapping());
            }
            Err(err) => warn!(error = %err, "Dropping transaction from node view"),
        }
    }
}

impl NodeViewHost for ViewHost<'_> {
    fn state(&self) -> &EditorState {
        self.state
    }

    fn dispatcher(&mut self) -> &mut dyn Dispatch {
        self
    }
}
