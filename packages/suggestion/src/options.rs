//! # Suggestion Options
//!
//! Explicit configuration for the suggestion node, its view and its
//! commands. The declarative part loads from JSON:
//!
//! ```json
//! {
//!   "className": "diff-suggestion",
//!   "showButtons": true,
//!   "buttons": {
//!     "accept": "✓",
//!     "reject": { "content": "<b>✗</b>", "title": "Drop", "className": "danger" }
//!   },
//!   "theme": { "variables": { "acceptBg": "#dcfce7" } },
//!   "HTMLAttributes": { "data-origin": "review" }
//! }
//! ```
//!
//! Callbacks, resolution overrides and the action menu renderer are set
//! with builder methods. Unknown keys are rejected.

use crate::meta::{ResolveContext, SuggestionAction, SuggestionActionMeta};
use diff_suggestion_editor::markup::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Side-effect callback fired after a suggestion is resolved
pub type ActionCallback = Arc<dyn Fn(&SuggestionActionMeta) + Send + Sync>;

/// Full override of per-item resolution; returns whether it handled it
pub type ResolveHandler = Arc<dyn Fn(ResolveContext<'_>) -> bool + Send + Sync>;

/// Builds a custom action surface
pub type ActionMenuRenderer = Arc<dyn Fn(&SuggestionActionMeta) -> Element + Send + Sync>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid suggestion options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structured button descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ButtonConfig {
    /// Text or markup shown inside the button
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
}

/// A button label: either bare content or a full descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ButtonLabel {
    Text(String),
    Config(ButtonConfig),
}

impl ButtonLabel {
    pub fn content(&self) -> &str {
        match self {
            ButtonLabel::Text(text) => text,
            ButtonLabel::Config(config) => &config.content,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            ButtonLabel::Text(_) => None,
            ButtonLabel::Config(config) => config.title.as_deref(),
        }
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            ButtonLabel::Text(_) => None,
            ButtonLabel::Config(config) => config.class_name.as_deref(),
        }
    }

    pub fn style(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            ButtonLabel::Text(_) => None,
            ButtonLabel::Config(config) => Some(&config.style),
        }
    }
}

impl Default for ButtonLabel {
    fn default() -> Self {
        ButtonLabel::Text(String::new())
    }
}

impl From<&str> for ButtonLabel {
    fn from(text: &str) -> Self {
        ButtonLabel::Text(text.to_string())
    }
}

impl From<ButtonConfig> for ButtonLabel {
    fn from(config: ButtonConfig) -> Self {
        ButtonLabel::Config(config)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ButtonOptions {
    pub accept: ButtonLabel,
    pub reject: ButtonLabel,
}

impl ButtonOptions {
    pub fn label(&self, action: SuggestionAction) -> &ButtonLabel {
        match action {
            SuggestionAction::Accept => &self.accept,
            SuggestionAction::Reject => &self.reject,
        }
    }
}

/// CSS custom properties applied to each rendered suggestion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeVariables {
    pub accept_bg: Option<String>,
    pub reject_bg: Option<String>,
    pub border_color: Option<String>,
    pub accept_color: Option<String>,
    pub reject_color: Option<String>,
    pub hover_bg: Option<String>,
}

impl ThemeVariables {
    /// `(property, value)` pairs for the variables that are set
    pub fn css_properties(&self) -> Vec<(&'static str, &str)> {
        [
            ("--diff-suggestion-accept-bg", &self.accept_bg),
            ("--diff-suggestion-reject-bg", &self.reject_bg),
            ("--diff-suggestion-border-color", &self.border_color),
            ("--diff-suggestion-accept-color", &self.accept_color),
            ("--diff-suggestion-reject-color", &self.reject_color),
            ("--diff-suggestion-hover-bg", &self.hover_bg),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| (name, value)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuggestionTheme {
    pub variables: ThemeVariables,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SuggestionOptions {
    /// Extra wrapper attributes; they win over computed ones except the marker
    #[serde(rename = "HTMLAttributes")]
    pub html_attributes: BTreeMap<String, String>,
    pub class_name: String,
    pub show_buttons: bool,
    pub buttons: ButtonOptions,
    pub theme: SuggestionTheme,

    #[serde(skip)]
    pub render_action_menu: Option<ActionMenuRenderer>,
    #[serde(skip)]
    pub on_accept: Option<ActionCallback>,
    #[serde(skip)]
    pub on_reject: Option<ActionCallback>,
    #[serde(skip)]
    pub handle_accept: Option<ResolveHandler>,
    #[serde(skip)]
    pub handle_reject: Option<ResolveHandler>,
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        Self {
            html_attributes: BTreeMap::new(),
            class_name: "diff-suggestion".to_string(),
            show_buttons: true,
            buttons: ButtonOptions::default(),
            theme: SuggestionTheme::default(),
            render_action_menu: None,
            on_accept: None,
            on_reject: None,
            handle_accept: None,
            handle_reject: None,
        }
    }
}

impl SuggestionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the declarative options from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_show_buttons(mut self, show: bool) -> Self {
        self.show_buttons = show;
        self
    }

    pub fn with_buttons(
        mut self,
        accept: impl Into<ButtonLabel>,
        reject: impl Into<ButtonLabel>,
    ) -> Self {
        self.buttons = ButtonOptions {
            accept: accept.into(),
            reject: reject.into(),
        };
        self
    }

    pub fn with_html_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.html_attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_theme(mut self, variables: ThemeVariables) -> Self {
        self.theme = SuggestionTheme { variables };
        self
    }

    pub fn render_action_menu<F>(mut self, render: F) -> Self
    where
        F: Fn(&SuggestionActionMeta) -> Element + Send + Sync + 'static,
    {
        self.render_action_menu = Some(Arc::new(render));
        self
    }

    pub fn on_accept<F>(mut self, callback: F) -> Self
    where
        F: Fn(&SuggestionActionMeta) + Send + Sync + 'static,
    {
        self.on_accept = Some(Arc::new(callback));
        self
    }

    pub fn on_reject<F>(mut self, callback: F) -> Self
    where
        F: Fn(&SuggestionActionMeta) + Send + Sync + 'static,
    {
        self.on_reject = Some(Arc::new(callback));
        self
    }

    pub fn handle_accept<F>(mut self, handler: F) -> Self
    where
        F: Fn(ResolveContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.handle_accept = Some(Arc::new(handler));
        self
    }

    pub fn handle_reject<F>(mut self, handler: F) -> Self
    where
        F: Fn(ResolveContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.handle_reject = Some(Arc::new(handler));
        self
    }

    pub fn callback(&self, action: SuggestionAction) -> Option<&ActionCallback> {
        match action {
            SuggestionAction::Accept => self.on_accept.as_ref(),
            SuggestionAction::Reject => self.on_reject.as_ref(),
        }
    }

    pub fn handler(&self, action: SuggestionAction) -> Option<&ResolveHandler> {
        match action {
            SuggestionAction::Accept => self.handle_accept.as_ref(),
            SuggestionAction::Reject => self.handle_reject.as_ref(),
        }
    }
}

impl fmt::Debug for SuggestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionOptions")
            .field("html_attributes", &self.html_attributes)
            .field("class_name", &self.class_name)
            .field("show_buttons", &self.show_buttons)
            .field("buttons", &self.buttons)
            .field("theme", &self.theme)
            .field("render_action_menu", &self.render_action_menu.is_some())
            .field("on_accept", &self.on_accept.is_some())
            .field("on_reject", &self.on_reject.is_some())
            .field("handle_accept", &self.handle_accept.is_some())
            .field("handle_reject", &self.handle_reject.is_some())
            .finish()
    }
}
