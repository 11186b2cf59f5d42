//! The embedding host, reached through files.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use dmud_core::{ConsoleError, ParentFrame};
use serde_json::Value;

/// Posts messages to the host by appending one JSON line per message to a
/// request file (or FIFO). Without a path the console runs standalone.
#[derive(Debug, Clone, Default)]
pub struct FeedParent {
    request_path: Option<PathBuf>,
}

impl FeedParent {
    pub fn new(request_path: Option<PathBuf>) -> Self {
        Self { request_path }
    }

    pub fn request_path(&self) -> Option<&Path> {
        self.request_path.as_deref()
    }
}

impl ParentFrame for FeedParent {
    fn is_present(&self) -> bool {
        self.request_path.is_some()
    }

    fn post_message(&mut self, message: &Value) -> dmud_core::Result<()> {
        let Some(path) = &self.request_path else {
            return Ok(());
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ConsoleError::Parent(format!("{}: {e}", path.display())))?;
        writeln!(file, "{message}").map_err(|e| ConsoleError::Parent(e.to_string()))?;
        tracing::debug!(path = %path.display(), "posted message to host");
        Ok(())
    }
}
