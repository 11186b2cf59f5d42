//! Configuration for observability/telemetry

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Service name reported when none is configured.
pub const DEFAULT_SERVICE_NAME: &str = "dmud-console";

/// Receives one formatted line per tracing event. Called on the logging
/// thread, so it must not block.
pub type LogSink = Arc<dyn Fn(String) + Send + Sync>;

/// The serializable part of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Settings {
    #[serde(default = "default_service_name")]
    service_name: String,
    #[serde(default)]
    service_version: Option<String>,
    #[serde(default)]
    otlp_endpoint: Option<String>,
    #[serde(default = "default_true")]
    enable_console: bool,
    #[serde(default)]
    log_level: Option<String>,
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

/// Observability configuration
#[derive(Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to exported spans
    pub service_name: String,

    /// Service version, when known
    pub service_version: Option<String>,

    /// OTLP gRPC endpoint; export is off when unset
    pub otlp_endpoint: Option<String>,

    /// Write formatted events to stderr. Must be off while the TUI owns the terminal.
    pub enable_console: bool,

    /// Filter directive such as `info` or `info,dmud_runtime=debug`
    pub log_level: Option<String>,

    /// Where the TUI collects log lines. Not serialized.
    pub log_sink: Option<LogSink>,
}

impl Serialize for ObservabilityConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.settings().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ObservabilityConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = Settings::deserialize(deserializer)?;
        Ok(Self {
            service_name: s.service_name,
            service_version: s.service_version,
            otlp_endpoint: s.otlp_endpoint,
            enable_console: s.enable_console,
            log_level: s.log_level,
            log_sink: None,
        })
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}

impl std::fmt::Debug for ObservabilityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservabilityConfig")
            .field("service_name", &self.service_name)
            .field("service_version", &self.service_version)
            .field("otlp_endpoint", &self.otlp_endpoint)
            .field("enable_console", &self.enable_console)
            .field("log_level", &self.log_level)
            .field("log_sink", &self.log_sink.is_some())
            .finish()
    }
}

impl ObservabilityConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: None,
            otlp_endpoint: None,
            enable_console: true,
            log_level: None,
            log_sink: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_log_sink(mut self, sink: LogSink) -> Self {
        self.log_sink = Some(sink);
        self
    }

    /// Build from environment variables
    ///
    /// - `OTEL_SERVICE_NAME` → service_name
    /// - `OTEL_SERVICE_VERSION` → service_version
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT` → otlp_endpoint
    /// - `OTEL_LOG_LEVEL` or `RUST_LOG` → log_level
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [ObservabilityConfig::from_env] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::new(non_empty("OTEL_SERVICE_NAME").unwrap_or_else(default_service_name));
        config.service_version = non_empty("OTEL_SERVICE_VERSION");
        config.otlp_endpoint = non_empty("OTEL_EXPORTER_OTLP_ENDPOINT");
        config.log_level = non_empty("OTEL_LOG_LEVEL").or_else(|| non_empty("RUST_LOG"));
        config
    }

    fn settings(&self) -> Settings {
        Settings {
            service_name: self.service_name.clone(),
            service_version: self.service_version.clone(),
            otlp_endpoint: self.otlp_endpoint.clone(),
            enable_console: self.enable_console,
            log_level: self.log_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup_defaults() {
        let config = ObservabilityConfig::from_lookup(|_| None);
        assert_eq!(config.service_name, "dmud-console");
        assert!(config.otlp_endpoint.is_none());
        assert!(config.enable_console);
    }

    #[test]
    fn test_from_lookup_prefers_otel_log_level() {
        let config = ObservabilityConfig::from_lookup(|key| match key {
            "OTEL_LOG_LEVEL" => Some("debug".to_string()),
            "RUST_LOG" => Some("warn".to_string()),
            "OTEL_EXPORTER_OTLP_ENDPOINT" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_serde_skips_sink() {
        let sink: LogSink = Arc::new(|_| {});
        let config = ObservabilityConfig::new("svc").with_log_sink(sink).with_console(false);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["service_name"], "svc");
        assert!(json.get("log_sink").is_none());

        let back: ObservabilityConfig = serde_json::from_value(json).unwrap();
        assert!(!back.enable_console);
        assert!(back.log_sink.is_none());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ObservabilityConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.service_name, DEFAULT_SERVICE_NAME);
        assert!(config.enable_console);
    }
}
