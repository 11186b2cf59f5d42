//! Runtime error types

use dmud_core::ConsoleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Console error: {0}")]
    Console(#[from] ConsoleError),

    #[error("UI channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
