//! The resolved theme: CSS custom properties plus the color-scheme attribute.

use std::collections::BTreeMap;

use serde::Serialize;

use super::color::ColorScheme;
use super::role::ThemeRole;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeRoot {
    /// Custom property name → value. May hold names beyond the nine roles.
    pub variables: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<ColorScheme>,
}

impl ThemeRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one property; empty or whitespace-only values are ignored.
    pub fn set_property(&mut self, name: &str, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        self.variables.insert(name.to_string(), value.to_string());
        true
    }

    /// Apply a batch of properties; returns how many were set.
    pub fn apply_variables<'a, I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        values
            .into_iter()
            .filter(|(name, value)| self.set_property(name, value))
            .count()
    }

    /// Apply a scheme string; only `light`/`dark` take effect.
    pub fn apply_color_scheme(&mut self, scheme: &str) -> bool {
        match ColorScheme::parse(scheme) {
            Some(s) => {
                self.color_scheme = Some(s);
                true
            }
            None => false,
        }
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Value of a role, falling back to its default when unset.
    pub fn role(&self, role: ThemeRole) -> &str {
        self.property(role.css_var()).unwrap_or(role.default_value())
    }
}
