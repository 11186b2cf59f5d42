//! Async driver for the dmud console.
//!
//! [ConsoleRuntime] owns the sans-IO [dmud_core::ConnectionManager] and
//! [dmud_core::ThemeSync] and executes their effects on tokio: one
//! [transport::Transport] task per connection attempt, a single
//! [timer::ReconnectTimer], and an optional theme feed from an embedding host.

pub mod config;
pub mod error;
pub mod feed;
pub mod parent;
pub mod runtime;
pub mod timer;
pub mod transport;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use parent::FeedParent;
pub use runtime::ConsoleRuntime;
