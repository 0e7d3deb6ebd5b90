//! Tracker for consecutive mouse clicks (double / triple click).
//!
//! # How the rolling window works (for beginners)
//!
//! Every completed click (a mouse button release) restarts a 640 ms window.
//! If the next click lands inside the window and uses the same button, the
//! count goes up; otherwise the run starts over at 1.  When the window expires
//! without another click, the count drops back to 0.
//!
//! Instead of arming a real timer, the tracker stores the instant at which the
//! window closes and checks it whenever the count is read.  The observable
//! behaviour is the same as a one-shot timer that zeroes the state on expiry,
//! and callers can drive it from any monotonic clock (the engine passes
//! `tokio::time::Instant` so paused-clock tests stay deterministic).
//!
//! The tracker is shared by every pointer device in a session: clicks are a
//! property of the page, not of one device.

use std::time::{Duration, Instant};

/// Maximum interval between two clicks that still counts as a multi-click.
pub const CLICK_INTERVAL: Duration = Duration::from_millis(640);

/// Counts consecutive clicks of the same button inside [`CLICK_INTERVAL`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickTracker {
    count: u32,
    last_button: Option<u64>,
    expires_at: Option<Instant>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clicks in the current run as of `now`.
    pub fn count(&mut self, now: Instant) -> u32 {
        self.expire(now);
        self.count
    }

    /// Records a completed click of `button` at `now`.
    pub fn register_click(&mut self, button: u64, now: Instant) {
        self.expire(now);

        match self.last_button {
            None => self.count += 1,
            Some(last) if last == button => self.count += 1,
            Some(_) => self.count = 1,
        }

        self.last_button = Some(button);
        self.expires_at = Some(now + CLICK_INTERVAL);
    }

    /// Ends the current run immediately.
    pub fn reset(&mut self) {
        self.count = 0;
        self.last_button = None;
        self.expires_at = None;
    }

    fn expire(&mut self, now: Instant) {
        if matches!(self.expires_at, Some(deadline) if now >= deadline) {
            self.reset();
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_tracker_has_zero_count() {
        let mut tracker = ClickTracker::new();
        assert_eq!(tracker.count(Instant::now()), 0);
    }

    #[test]
    fn test_three_quick_clicks_count_up_to_three() {
        // Arrange
        let mut tracker = ClickTracker::new();
        let t0 = Instant::now();

        // Act / Assert
        tracker.register_click(0, t0);
        assert_eq!(tracker.count(t0), 1);
        tracker.register_click(0, t0 + ms(200));
        assert_eq!(tracker.count(t0 + ms(200)), 2);
        tracker.register_click(0, t0 + ms(400));
        assert_eq!(tracker.count(t0 + ms(400)), 3);
    }

    #[test]
    fn test_click_after_window_starts_new_run() {
        let mut tracker = ClickTracker::new();
        let t0 = Instant::now();

        tracker.register_click(0, t0);
        tracker.register_click(0, t0 + ms(100));
        // 640 ms after the last click the window has closed.
        tracker.register_click(0, t0 + ms(100) + CLICK_INTERVAL);

        assert_eq!(tracker.count(t0 + ms(100) + CLICK_INTERVAL), 1);
    }

    #[test]
    fn test_count_expires_without_new_click() {
        let mut tracker = ClickTracker::new();
        let t0 = Instant::now();

        tracker.register_click(0, t0);

        assert_eq!(tracker.count(t0 + ms(639)), 1);
        assert_eq!(tracker.count(t0 + ms(640)), 0);
    }

    #[test]
    fn test_different_button_restarts_run() {
        let mut tracker = ClickTracker::new();
        let t0 = Instant::now();

        tracker.register_click(0, t0);
        tracker.register_click(0, t0 + ms(50));
        tracker.register_click(2, t0 + ms(100));

        assert_eq!(tracker.count(t0 + ms(100)), 1);
    }

    #[test]
    fn test_reset_clears_run() {
        let mut tracker = ClickTracker::new();
        let t0 = Instant::now();
        tracker.register_click(0, t0);

        tracker.reset();
        tracker.register_click(0, t0 + ms(10));

        assert_eq!(tracker.count(t0 + ms(10)), 1);
    }
}
