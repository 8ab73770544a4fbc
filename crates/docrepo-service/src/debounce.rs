//! Trailing-edge debouncer.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Holds the latest pushed value until `delay` passes without another push.
///
/// Every push restarts the window, so a burst of pushes yields at most one
/// value: the last one.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a new value and restart the window.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// Whether a value is waiting for its window to close.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its window has closed.
    pub fn poll_ready(&mut self) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= Instant::now() => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Wait for the window to close and take the value. Returns `None`
    /// immediately when nothing is pending.
    pub async fn settled(&mut self) -> Option<T> {
        let deadline = self.pending.as_ref()?.1;
        sleep_until(deadline).await;
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_yields_only_last_value() {
        let mut d = Debouncer::new(Duration::from_millis(600));
        d.push("a");
        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(d.poll_ready(), None);
        d.push("ab");
        tokio::time::advance(Duration::from_millis(500)).await;
        assert_eq!(d.poll_ready(), None);
        d.push("abc");

        assert_eq!(d.settled().await, Some("abc"));
        assert_eq!(d.settled().await, None);
        assert!(!d.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_quiet_period() {
        let mut d = Debouncer::new(Duration::from_millis(600));
        d.push(1);
        tokio::time::advance(Duration::from_millis(599)).await;
        assert_eq!(d.poll_ready(), None);
        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(d.poll_ready(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let mut d = Debouncer::new(Duration::from_millis(10));
        d.push(());
        d.cancel();
        assert_eq!(d.settled().await, None);
    }
}
