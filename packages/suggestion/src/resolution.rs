//! Single-suggestion resolution shared by the command and the view

use crate::attributes::SuggestionAttributes;
use crate::meta::{
    LocatedSuggestion, ResolveContext, ResolveOrigin, SuggestionAction, SuggestionActionMeta,
};
use crate::options::SuggestionOptions;
use diff_suggestion_editor::{Dispatch, EditorState};
use tracing::{debug, warn};

/// Resolve `target` with `action`.
///
/// A configured override takes over completely and gates the callback with
/// its result. Otherwise the node is replaced by its resolution text, the
/// transaction dispatched and the callback fired. Without a dispatcher the
/// default path does nothing and returns `false`.
pub(crate) fn resolve_located(
    options: &SuggestionOptions,
    state: &EditorState,
    dispatcher: Option<&mut dyn Dispatch>,
    target: LocatedSuggestion,
    action: SuggestionAction,
    origin: ResolveOrigin,
) -> bool {
    let meta = SuggestionActionMeta::snapshot(&target.attrs, target.pos, Some(action));

    if let Some(handler) = options.handler(action) {
        let handled = handler(ResolveContext {
            state,
            dispatcher: dispatcher.map(|d| d as &mut dyn Dispatch),
            tr: state.tr(),
            action,
            target,
            origin,
        });
        debug!(id = %meta.id, %action, ?origin, handled, "Resolution override ran");
        if handled {
            fire_callback(options, action, &meta);
        }
        return handled;
    }

    let Some(dispatcher) = dispatcher else {
        debug!(id = %meta.id, %action, "No dispatcher, skipping resolution");
        return false;
    };

    let pos = target.pos;
    let Some(node) = state
        .doc()
        .node_at(pos)
        .filter(|node| SuggestionAttributes::from_node(node).is_some())
    else {
        warn!(pos, id = %meta.id, "No suggestion at position");
        return false;
    };

    let mut tr = state.tr();
    let text = target.attrs.resolution_text(action);
    if let Err(err) = tr.insert_text(text, pos, pos + node.node_size()) {
        warn!(error = %err, id = %meta.id, "Failed to resolve suggestion");
        return false;
    }

    dispatcher.dispatch(tr);
    debug!(id = %meta.id, %action, ?origin, pos, "Resolved suggestion");
    fire_callback(options, action, &meta);
    true
}

fn fire_callback(options: &SuggestionOptions, action: SuggestionAction, meta: &SuggestionActionMeta) {
    if let Some(callback) = options.callback(action) {
        callback(meta);
    }
}
