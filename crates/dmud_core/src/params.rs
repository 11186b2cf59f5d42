//! Launch parameters: the query string of the launch URL plus CLI overrides.
//!
//! Lookups follow `URLSearchParams` semantics: [LaunchParams::get] returns the
//! first value for a name, and an empty value is still present.

use url::Url;

use crate::endpoint::PageLocation;
use crate::error::Result;

/// Ordered multimap of launch parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    pairs: Vec<(String, String)>,
}

impl LaunchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bare query string (`a=1&b=2`, leading `?` allowed).
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Parse the launch URL into its parameters and page location.
    pub fn from_launch_url(launch_url: &str) -> Result<(Self, PageLocation)> {
        let url = Url::parse(launch_url)?;
        let pairs = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Ok((Self { pairs }, PageLocation::from_url(&url)))
    }

    /// Add overrides in front of the existing pairs so they win on lookup.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut front: Vec<(String, String)> = overrides
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        front.append(&mut self.pairs);
        self.pairs = front;
        self
    }

    /// First value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `name` when present and non-empty.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parse a `key=value` CLI override. A missing `=` yields an empty value.
pub fn parse_override(raw: &str) -> (String, String) {
    match raw.split_once('=') {
        Some((k, v)) => (k.trim().to_string(), v.to_string()),
        None => (raw.trim().to_string(), String::new()),
    }
}
