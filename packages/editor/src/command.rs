//! # Commands
//!
//! A command inspects a state and, when given a dispatcher, emits
//! transactions. Called without a dispatcher it only reports whether it
//! would apply.

use crate::state::EditorState;
use crate::transaction::Transaction;

/// Receiver for transactions produced by commands and node views
pub trait Dispatch {
    fn dispatch(&mut self, tr: Transaction);
}

impl<F> Dispatch for F
where
    F: FnMut(Transaction),
{
    fn dispatch(&mut self, tr: Transaction) {
        self(tr)
    }
}

pub trait Command {
    /// Run against `state`. Returns whether the command applied.
    fn execute(&self, state: &EditorState, dispatch: Option<&mut dyn Dispatch>) -> bool;

    /// Debug name used in logs
    fn name(&self) -> &'static str {
        "command"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use std::sync::Arc;

    struct AppendText(&'static str);

    impl Command for AppendText {
        fn execute(&self, state: &EditorState, dispatch: Option<&mut dyn Dispatch>) -> bool {
            let end = state.doc().content_size() - 1;
            let mut tr = state.tr();
            if tr.insert_text(self.0, end, end).is_err() {
                return false;
            }
            if let Some(dispatch) = dispatch {
                dispatch.dispatch(tr);
            }
            true
        }
    }

    #[test]
    fn test_closure_dispatch_collects_transactions() {
        let state = EditorState::from_markup(Arc::new(Schema::new()), "<p>a</p>").unwrap();
        let mut collected = Vec::new();
        let mut sink = |tr: Transaction| collected.push(tr);

        assert!(AppendText("b").execute(&state, Some(&mut sink)));
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].doc().text_content(), "ab");
    }

    #[test]
    fn test_run_without_dispatch_leaves_state() {
        let state = EditorState::from_markup(Arc::new(Schema::new()), "<p>a</p>").unwrap();
        assert!(AppendText("b").execute(&state, None));

        let (handled, next) = state.run(&AppendText("c"));
        assert!(handled);
        assert_eq!(next.doc().text_content(), "ac");
    }
}
