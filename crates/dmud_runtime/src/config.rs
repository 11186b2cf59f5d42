//! Runtime configuration for the dmud console

use std::path::PathBuf;
use std::time::Duration;

use dmud_core::RECONNECT_DELAY;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Delay before an automatic reconnect attempt
    pub reconnect_delay: Duration,
    /// File of CSS custom properties standing in for computed styles
    pub style_file: Option<PathBuf>,
    /// Newline-delimited JSON theme messages from the embedding host
    pub theme_feed: Option<PathBuf>,
    /// Where theme requests to the host are appended
    pub theme_request: Option<PathBuf>,
    /// Whether to ask the host for its theme at all
    pub request_parent: bool,
    /// Capacity of the runtime → UI event channel
    pub event_buffer: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self {
            reconnect_delay: RECONNECT_DELAY,
            style_file: None,
            theme_feed: None,
            theme_request: None,
            request_parent: true,
            event_buffer: 256,
        }
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn with_style_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.style_file = Some(path.into());
        self
    }

    pub fn with_theme_feed(mut self, path: impl Into<PathBuf>) -> Self {
        self.theme_feed = Some(path.into());
        self
    }

    pub fn with_theme_request(mut self, path: impl Into<PathBuf>) -> Self {
        self.theme_request = Some(path.into());
        self
    }

    pub fn with_request_parent(mut self, enabled: bool) -> Self {
        self.request_parent = enabled;
        self
    }

    pub fn with_event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity.max(1);
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [RuntimeConfig::from_env] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(delay) = lookup("DMUD_RECONNECT_DELAY_MS")
            && let Ok(ms) = delay.trim().parse::<u64>()
        {
            config.reconnect_delay = Duration::from_millis(ms);
        }

        if let Some(path) = lookup("DMUD_STYLE_FILE").filter(|p| !p.is_empty()) {
            config.style_file = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("DMUD_THEME_FEED").filter(|p| !p.is_empty()) {
            config.theme_feed = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("DMUD_THEME_REQUEST").filter(|p| !p.is_empty()) {
            config.theme_request = Some(PathBuf::from(path));
        }

        if let Some(flag) = lookup("DMUD_REQUEST_PARENT") {
            config.request_parent = !matches!(flag.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off");
        }

        config
    }
}
