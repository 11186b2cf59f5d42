//! Theme messages posted by an embedding host.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::color::normalise_color;
use super::role::MESSAGE_ALIASES;

/// Message types that carry a theme update.
pub const THEME_MESSAGE_TYPES: [&str; 3] = ["dmud:theme", "dmud-theme", "dmud:theme:update"];

/// Inbound: the host asks the console to re-announce itself.
pub const THEME_REQUEST_TYPE: &str = "dmud:theme:request";

/// Outbound: the console asks the host for its theme.
pub const REQUEST_THEME_TYPE: &str = "dmud:request-theme";

/// Variables and scheme extracted from a message payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeUpdate {
    /// Normalised values; empty ones are dropped when applied.
    pub vars: BTreeMap<String, String>,
    pub scheme: Option<String>,
}

impl ThemeUpdate {
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.scheme.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeMessage {
    Update(ThemeUpdate),
    Request,
}

/// Classify a decoded message. `None` for anything that is not an object
/// with a recognised string `type`.
pub fn classify_message(data: &Value) -> Option<ThemeMessage> {
    let object = data.as_object()?;
    let kind = object.get("type").and_then(Value::as_str).unwrap_or("");
    if THEME_MESSAGE_TYPES.contains(&kind) {
        let payload = match object.get("theme") {
            Some(theme) => theme,
            None => object.get("payload").filter(|p| truthy(p)).unwrap_or(data),
        };
        return Some(ThemeMessage::Update(parse_message_theme(payload)));
    }
    if kind == THEME_REQUEST_TYPE {
        return Some(ThemeMessage::Request);
    }
    None
}

/// Extract an update from a payload object.
///
/// Explicit variables come from the first truthy of `cssVariables`, `css`,
/// `vars`; semantic aliases are applied after them and win. The scheme is the
/// first string among `colorScheme`, `scheme`, `mode`.
pub fn parse_message_theme(data: &Value) -> ThemeUpdate {
    let Some(object) = data.as_object() else {
        return ThemeUpdate::default();
    };
    let mut update = ThemeUpdate::default();

    let explicit = ["cssVariables", "css", "vars"]
        .iter()
        .filter_map(|key| object.get(*key))
        .find(|v| truthy(v));
    if let Some(Value::Object(vars)) = explicit {
        for (name, value) in vars {
            update.vars.insert(name.clone(), normalise_color(&scalar_text(value)));
        }
    }

    for (alias, role) in MESSAGE_ALIASES {
        if let Some(value) = object.get(*alias) {
            update
                .vars
                .insert(role.css_var().to_string(), normalise_color(&scalar_text(value)));
        }
    }

    update.scheme = first_string(object, &["colorScheme", "scheme", "mode"]);
    update
}

fn first_string(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text of a scalar value; falsy values, arrays and objects become empty.
fn scalar_text(value: &Value) -> String {
    if !truthy(value) {
        return String::new();
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
