//! Keeps a [ThemeRoot] in sync with computed styles, launch parameters and
//! host messages.

use std::time::Duration;

use serde_json::{json, Value};

use super::message::{classify_message, parse_message_theme, ThemeMessage, ThemeUpdate, REQUEST_THEME_TYPE};
use super::color::normalise_color;
use super::role::ThemeRole;
use super::root::ThemeRoot;
use super::style::StyleSource;
use crate::error::Result;
use crate::params::LaunchParams;

/// Delay before the second startup theme request.
pub const REQUEST_RETRY_DELAY: Duration = Duration::from_millis(250);

const SCHEME_PARAMS: [&str; 3] = ["colorScheme", "scheme", "theme"];

/// The embedding host, if any.
pub trait ParentFrame {
    /// False when the console is running standalone.
    fn is_present(&self) -> bool;

    fn post_message(&mut self, message: &Value) -> Result<()>;
}

/// Standalone: no host to talk to.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParent;

impl ParentFrame for NoParent {
    fn is_present(&self) -> bool {
        false
    }

    fn post_message(&mut self, _message: &Value) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSyncOptions {
    /// Ask the host for its theme at startup and on [ThemeSync::request_theme].
    pub request_parent: bool,
}

impl Default for ThemeSyncOptions {
    fn default() -> Self {
        Self { request_parent: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// A theme update was applied (possibly changing nothing).
    Applied,
    /// The host asked for a theme request.
    ThemeRequested,
    Ignored,
}

pub struct ThemeSync<P: ParentFrame = NoParent> {
    root: ThemeRoot,
    params: LaunchParams,
    parent: P,
    options: ThemeSyncOptions,
}

impl<P: ParentFrame> std::fmt::Debug for ThemeSync<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSync")
            .field("root", &self.root)
            .field("options", &self.options)
            .field("parent_present", &self.parent.is_present())
            .finish()
    }
}

impl<P: ParentFrame> ThemeSync<P> {
    pub fn new(params: LaunchParams, parent: P, options: ThemeSyncOptions) -> Self {
        Self {
            root: ThemeRoot::new(),
            params,
            parent,
            options,
        }
    }

    pub fn root(&self) -> &ThemeRoot {
        &self.root
    }

    pub fn options(&self) -> ThemeSyncOptions {
        self.options
    }

    pub fn parent(&self) -> &P {
        &self.parent
    }

    /// Startup sequence: computed styles, then launch parameters, then the
    /// first request to the host. Returns true when the caller should call
    /// [ThemeSync::request_theme] again after [REQUEST_RETRY_DELAY].
    pub fn init(&mut self, style: &dyn StyleSource) -> bool {
        self.refresh_from_computed(style);
        self.apply_from_params();
        if !self.options.request_parent {
            return false;
        }
        self.request_theme();
        true
    }

    /// Resolve every role from computed styles only: first non-empty
    /// candidate, else the role default.
    pub fn refresh_from_computed(&mut self, style: &dyn StyleSource) {
        for role in ThemeRole::ALL {
            let value = role
                .computed_candidates()
                .iter()
                .filter_map(|name| style.property_value(name))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
                .unwrap_or_else(|| role.default_value().to_string());
            self.root.set_property(role.css_var(), &value);
        }
    }

    /// Per role, the first present alias wins even when its value is empty
    /// (an empty value then leaves the role unchanged).
    pub fn apply_from_params(&mut self) {
        if let Some(scheme) = SCHEME_PARAMS.iter().find_map(|name| self.params.get(name)) {
            self.root.apply_color_scheme(scheme);
        }
        for role in ThemeRole::ALL {
            let Some(raw) = role.param_aliases().iter().find_map(|alias| self.params.get(alias)) else {
                continue;
            };
            let value = normalise_color(raw);
            self.root.set_property(role.css_var(), &value);
        }
    }

    /// Handle a raw message. Empty or malformed JSON is ignored.
    pub fn handle_message_text(&mut self, text: &str) -> MessageOutcome {
        if text.is_empty() {
            return MessageOutcome::Ignored;
        }
        match serde_json::from_str::<Value>(text) {
            Ok(value) => self.handle_message(&value),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring malformed theme message");
                MessageOutcome::Ignored
            }
        }
    }

    pub fn handle_message(&mut self, data: &Value) -> MessageOutcome {
        match classify_message(data) {
            Some(ThemeMessage::Update(update)) => {
                self.apply(&update);
                MessageOutcome::Applied
            }
            Some(ThemeMessage::Request) => MessageOutcome::ThemeRequested,
            None => MessageOutcome::Ignored,
        }
    }

    /// Apply a bare payload, as if it had arrived inside a theme message.
    pub fn apply_update(&mut self, payload: &Value) {
        let update = parse_message_theme(payload);
        self.apply(&update);
    }

    /// Post `{"type":"dmud:request-theme"}` to the host. Returns true when a
    /// message was actually posted; delivery failures are logged and dropped.
    pub fn request_theme(&mut self) -> bool {
        if !self.options.request_parent || !self.parent.is_present() {
            return false;
        }
        match self.parent.post_message(&json!({ "type": REQUEST_THEME_TYPE })) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "theme request to host failed");
                false
            }
        }
    }

    fn apply(&mut self, update: &ThemeUpdate) {
        let applied = self.root.apply_variables(&update.vars);
        if let Some(scheme) = update.scheme.as_deref() {
            self.root.apply_color_scheme(scheme);
        }
        tracing::debug!(applied, scheme = ?update.scheme, "theme update");
    }
}
