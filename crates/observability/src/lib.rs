//! dmud-observability: tracing setup shared by the dmud binaries.
//!
//! - `tracing-subscriber` with an env filter (`OTEL_LOG_LEVEL` / `RUST_LOG`)
//! - optional OTLP span export when `OTEL_EXPORTER_OTLP_ENDPOINT` is set
//! - an optional [LogSink] that receives every event as one formatted line;
//!   the TUI uses it to fill its debug screen instead of writing to the terminal
//!
//! ```no_run
//! use dmud_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::from_env().with_console(false);
//! init(config)?;
//! tracing::info!("console started");
//! # Ok::<(), dmud_observability::ObservabilityError>(())
//! ```

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;
pub mod tui_log_layer;

pub use config::{LogSink, ObservabilityConfig, DEFAULT_SERVICE_NAME};
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env, shutdown};
pub use self::tracing::record_error;

// `connection_span!` is exported at the crate root via #[macro_export].
