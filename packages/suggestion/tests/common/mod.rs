//! Shared helpers for suggestion integration tests

#![allow(dead_code)]

use diff_suggestion::{DiffSuggestion, SuggestionOptions};
use diff_suggestion_editor::{EditorState, EditorView};
use std::sync::{Arc, Mutex};

/// Install a test-writer subscriber once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Suggestion markup as it appears in stored documents
pub fn suggestion(id: &str, original: &str, suggested: &str) -> String {
    format!(
        concat!(
            r#"<span data-diff-suggestion="" data-diff-suggestion-id="{}" "#,
            r#"data-diff-suggestion-comment="" contenteditable="false" class="diff-suggestion">"#,
            r#"<span data-diff-suggestion-old="">{}</span>"#,
            r#"<span data-diff-suggestion-new="">{}</span></span>"#
        ),
        id, original, suggested
    )
}

pub fn state(extension: &DiffSuggestion, markup: &str) -> EditorState {
    init_tracing();
    EditorState::from_markup(extension.schema(), markup).expect("valid test document")
}

/// Editor view with suggestion views mounted
pub fn view(extension: &DiffSuggestion, markup: &str) -> EditorView {
    let mut view = EditorView::new(state(extension, markup));
    extension.mount(&mut view);
    view
}

/// Records callback invocations as `"<action> <id>"`
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: String) {
        self.0.lock().expect("log lock").push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("log lock").clone()
    }
}

/// Options whose callbacks append to `log`
pub fn logging_options(log: &CallLog) -> SuggestionOptions {
    let accept_log = log.clone();
    let reject_log = log.clone();
    SuggestionOptions::default()
        .on_accept(move |meta| accept_log.push(format!("accept {}", meta.id)))
        .on_reject(move |meta| reject_log.push(format!("reject {}", meta.id)))
}
