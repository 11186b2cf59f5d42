//! Reads theme messages posted by the host, one JSON document per line.

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Spawn a reader that forwards every non-blank line of `path`. The task ends
/// at EOF, on a read error, or when the receiver is dropped.
pub fn spawn_feed_reader(path: PathBuf, lines: mpsc::Sender<String>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "theme feed unavailable");
                return;
            }
        };
        let mut reader = BufReader::new(file).lines();
        loop {
            match reader.next_line().await {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    if lines.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    tracing::debug!(path = %path.display(), "theme feed closed");
                    break;
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "theme feed read failed");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_forwards_non_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.jsonl");
        std::fs::write(&path, "{\"type\":\"dmud:theme\"}\n\n   \nnot json\n").unwrap();

        let (tx, mut rx) = mpsc::channel(8);
        spawn_feed_reader(path, tx).await.unwrap();

        assert_eq!(rx.recv().await.as_deref(), Some("{\"type\":\"dmud:theme\"}"));
        assert_eq!(rx.recv().await.as_deref(), Some("not json"));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_missing_file_ends_quietly() {
        let (tx, mut rx) = mpsc::channel(1);
        spawn_feed_reader(PathBuf::from("/no/such/feed"), tx).await.unwrap();
        assert_eq!(rx.recv().await, None);
    }
}
