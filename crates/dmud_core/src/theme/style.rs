//! Computed-style sources.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ConsoleError, Result};

/// Read access to computed custom properties (the terminal's stand-in for
/// `getComputedStyle`).
pub trait StyleSource {
    /// Raw value of `name`, if defined.
    fn property_value(&self, name: &str) -> Option<String>;
}

impl StyleSource for HashMap<String, String> {
    fn property_value(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Custom properties loaded from a TOML (or `.json`) file:
///
/// ```toml
/// "--background" = "#101014"
/// "--accent" = "#22d3ee"
/// ```
///
/// Non-string values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    properties: HashMap<String, String>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&raw)
        } else {
            Self::from_toml_str(&raw)
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let table: toml::Table = raw
            .parse()
            .map_err(|e: toml::de::Error| ConsoleError::StyleSheet(e.to_string()))?;
        let properties = table
            .into_iter()
            .filter_map(|(k, v)| match v {
                toml::Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect();
        Ok(Self { properties })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let object = value
            .as_object()
            .ok_or_else(|| ConsoleError::StyleSheet("expected a JSON object".to_string()))?;
        let properties = object
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect();
        Ok(Self { properties })
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl StyleSource for StyleSheet {
    fn property_value(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }
}
