//! # Suggestion View
//!
//! Interactive rendering of one suggestion node: the wrapper with its two
//! text regions plus an action surface (default toolbar or a custom menu).
//! Elements in the surface carrying an accept/reject marker are bound to
//! click handling; a click anywhere inside a bound element resolves the
//! suggestion.
//!
//! Every update rebuilds the whole surface and all bindings.

use crate::attributes::{SuggestionAttributes, ACCEPT_MARKER, NODE_NAME, REJECT_MARKER};
use crate::meta::{LocatedSuggestion, ResolveOrigin, SuggestionAction, SuggestionActionMeta};
use crate::node::render_attributes;
use crate::options::SuggestionOptions;
use crate::resolution::resolve_located;
use crate::toolbar::default_toolbar;
use diff_suggestion_common::{find_attr_paths, NodePath};
use diff_suggestion_editor::markup::Element;
use diff_suggestion_editor::{
    Node, NodeView, NodeViewFactory, NodeViewHost, PositionHandle, ViewEvent,
};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    /// Path of the bound element from the view root
    path: NodePath,
    action: SuggestionAction,
}

pub struct SuggestionView {
    options: Arc<SuggestionOptions>,
    attrs: SuggestionAttributes,
    handle: PositionHandle,
    dom: Element,
    bindings: Vec<Binding>,
    surface_index: Option<usize>,
    hovered: bool,
    destroyed: bool,
}

impl SuggestionView {
    pub fn new(options: Arc<SuggestionOptions>, node: &Node, handle: PositionHandle) -> Self {
        let attrs = SuggestionAttributes::from_node(node).unwrap_or_default();
        debug!(id = %attrs.id, pos = ?handle.get(), "Creating suggestion view");

        let mut view = Self {
            options,
            attrs,
            handle,
            dom: Element::new("span"),
            bindings: Vec::new(),
            surface_index: None,
            hovered: false,
            destroyed: false,
        };
        view.render();
        view
    }

    pub fn attrs(&self) -> &SuggestionAttributes {
        &self.attrs
    }

    /// Paths of bound elements with their actions, in binding order
    pub fn bindings(&self) -> Vec<(NodePath, SuggestionAction)> {
        self.bindings
            .iter()
            .map(|binding| (binding.path.clone(), binding.action))
            .collect()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn render(&mut self) {
        let mut dom = render_attributes(&self.options, &self.attrs);
        for (property, value) in self.options.theme.variables.css_properties() {
            dom.set_style_property(property, value);
        }

        self.bindings.clear();
        self.surface_index = None;

        if let Some(mut surface) = self.action_surface() {
            surface.set_style_property("opacity", opacity(self.hovered));

            let index = dom.children.len();
            for (marker, action) in [
                (ACCEPT_MARKER, SuggestionAction::Accept),
                (REJECT_MARKER, SuggestionAction::Reject),
            ] {
                for path in find_attr_paths(&surface, marker) {
                    let mut full = vec![index];
                    full.extend(path);
                    self.bindings.push(Binding { path: full, action });
                }
            }

            dom.children.push(surface.into());
            self.surface_index = Some(index);
        }

        self.dom = dom;
    }

    /// Custom menu or default toolbar. A detached view has no position to
    /// hand the custom renderer, so it gets no custom menu.
    fn action_surface(&self) -> Option<Element> {
        if !self.options.show_buttons {
            return None;
        }
        match &self.options.render_action_menu {
            Some(render) => {
                let pos = self.handle.get()?;
                Some(render(&SuggestionActionMeta::snapshot(&self.attrs, pos, None)))
            }
            None => Some(default_toolbar(&self.options.buttons)),
        }
    }

    /// Innermost binding containing `target`
    fn binding_for(&self, target: &[usize]) -> Option<SuggestionAction> {
        self.bindings
            .iter()
            .filter(|binding| target.starts_with(&binding.path))
            .max_by_key(|binding| binding.path.len())
            .map(|binding| binding.action)
    }

    fn click(&mut self, target: &[usize], host: &mut dyn NodeViewHost) -> bool {
        let Some(action) = self.binding_for(target) else {
            return false;
        };
        let Some(pos) = self.handle.get() else {
            debug!(id = %self.attrs.id, "Suggestion view detached, ignoring click");
            return false;
        };

        let state = host.state().clone();
        let target = LocatedSuggestion {
            pos,
            attrs: self.attrs.clone(),
        };
        resolve_located(
            &self.options,
            &state,
            Some(host.dispatcher()),
            target,
            action,
            ResolveOrigin::View,
        )
    }

    fn set_hovered(&mut self, hovered: bool) -> bool {
        self.hovered = hovered;
        let Some(surface) = self
            .surface_index
            .and_then(|index| self.dom.element_at_path_mut(&[index]))
        else {
            return false;
        };
        surface.set_style_property("opacity", opacity(hovered));
        true
    }
}

fn opacity(hovered: bool) -> &'static str {
    if hovered {
        "1"
    } else {
        "0"
    }
}

impl NodeView for SuggestionView {
    fn dom(&self) -> &Element {
        &self.dom
    }

    fn update(&mut self, node: &Node) -> bool {
        if node.type_name() != NODE_NAME {
            return false;
        }
        self.attrs = SuggestionAttributes::from_node(node).unwrap_or_default();
        self.render();
        debug!(id = %self.attrs.id, "Updated suggestion view");
        true
    }

    fn handle_event(&mut self, event: &ViewEvent, host: &mut dyn NodeViewHost) -> bool {
        if self.destroyed {
            return false;
        }
        match event {
            ViewEvent::Click { target } => self.click(target, host),
            ViewEvent::PointerEnter => self.set_hovered(true),
            ViewEvent::PointerLeave => self.set_hovered(false),
        }
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.bindings.clear();
        self.destroyed = true;
        debug!(id = %self.attrs.id, "Destroyed suggestion view");
    }
}

/// Factory creating a [`SuggestionView`] per suggestion node
pub fn suggestion_view_factory(options: Arc<SuggestionOptions>) -> NodeViewFactory {
    Box::new(move |node: &Node, handle: PositionHandle| {
        Box::new(SuggestionView::new(Arc::clone(&options), node, handle)) as Box<dyn NodeView>
    })
}
