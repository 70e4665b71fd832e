//! # Node Views
//!
//! Custom interactive renderings for individual nodes. The editor view owns
//! mounted node views, keeps their positions current and routes events to
//! them.

use crate::command::Dispatch;
use crate::model::Node;
use crate::state::EditorState;
use diff_suggestion_markup::Element;
use std::cell::Cell;
use std::rc::Rc;

/// Live position of a mounted node. `None` once the node left the document
/// or the view was destroyed.
#[derive(Debug, Clone, Default)]
pub struct PositionHandle(Rc<Cell<Option<usize>>>);

impl PositionHandle {
    pub fn new(pos: usize) -> Self {
        Self(Rc::new(Cell::new(Some(pos))))
    }

    pub fn detached() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<usize> {
        self.0.get()
    }

    pub fn set(&self, pos: Option<usize>) {
        self.0.set(pos);
    }
}

/// User interaction delivered to a node view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Click on the element at `target`, a child-index path from the view root
    Click { target: Vec<usize> },
    PointerEnter,
    PointerLeave,
}

/// What a node view may reach while handling an event
pub trait NodeViewHost {
    /// Current editor state
    fn state(&self) -> &EditorState;

    /// Dispatcher that applies transactions to the editor
    fn dispatcher(&mut self) -> &mut dyn Dispatch;
}

pub trait NodeView {
    /// Root of the rendered surface
    fn dom(&self) -> &Element;

    /// Offered a new node for the same position. Returning `false` makes the
    /// editor destroy this view and create a fresh one.
    fn update(&mut self, node: &Node) -> bool;

    /// Returns `true` when the event was handled
    fn handle_event(&mut self, event: &ViewEvent, host: &mut dyn NodeViewHost) -> bool;

    /// Release the view. Must tolerate repeated calls.
    fn destroy(&mut self);
}

/// Builds a node view for a node and its live position
pub type NodeViewFactory = Box<dyn Fn(&Node, PositionHandle) -> Box<dyn NodeView>>;
