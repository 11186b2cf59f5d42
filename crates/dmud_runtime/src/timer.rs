//! The single reconnect timer.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Fires `generation` on the channel after the delay. Arming replaces any
/// previous task, and a fire from an older generation is stale.
#[derive(Debug, Default)]
pub struct ReconnectTimer {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl ReconnectTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, delay: Duration, fired: mpsc::Sender<u64>) -> u64 {
        self.cancel();
        let generation = self.generation;
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = fired.send(generation).await;
        }));
        generation
    }

    /// Abort the pending task, if any. Later fires of the old generation are stale.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
    }

    /// Accept a fire; false for stale generations.
    pub fn take_fired(&mut self, generation: u64) -> bool {
        if self.task.is_none() || generation != self.generation {
            return false;
        }
        self.task = None;
        self.generation += 1;
        true
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for ReconnectTimer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = ReconnectTimer::new();
        let generation = timer.arm(Duration::from_millis(4000), tx);

        tokio::time::sleep(Duration::from_millis(3999)).await;
        assert!(rx.try_recv().is_err());

        let fired = rx.recv().await.unwrap();
        assert_eq!(fired, generation);
        assert!(timer.take_fired(fired));
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_fire() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = ReconnectTimer::new();
        timer.arm(Duration::from_millis(100), tx);
        timer.cancel();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_makes_old_fire_stale() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut timer = ReconnectTimer::new();
        let first = timer.arm(Duration::from_millis(100), tx.clone());
        let second = timer.arm(Duration::from_millis(100), tx);
        assert_ne!(first, second);
        assert!(!timer.take_fired(first));

        let fired = rx.recv().await.unwrap();
        assert_eq!(fired, second);
        assert!(timer.take_fired(fired));
        assert!(!timer.take_fired(fired));
    }
}
