//! Frame pacing for actions with a duration ("move over time").
//!
//! # How a move is spread over time (for beginners)
//!
//! A pointer move of 300 ms from (0, 0) to (300, 0) should not jump straight
//! to the end.  Instead the engine emits one event roughly every 17 ms (one
//! frame at 60 Hz).  Each frame's position is the start plus the elapsed
//! fraction of the way to the target, floored to whole pixels.  When less
//! than a tenth of a frame remains, the loop stops and one last step lands
//! exactly on the target.
//!
//! [`MoveOverTime`] only computes *where* and *when*; the caller decides what
//! to emit for each step.  The next frame deadline is fixed when a step is
//! handed out, so a slow step and the frame wait overlap instead of adding up.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tracing::trace;

use actions_core::domain::geometry::interpolate;
use actions_core::{ActionError, Point};

/// Interval between intermediate steps.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(17);

/// Produces the steps of one time-interpolated move for N parallel pointers.
#[derive(Debug)]
pub struct MoveOverTime {
    starts: Vec<Point>,
    targets: Vec<Point>,
    duration_ms: u64,
    started_at: Instant,
    next_frame: Instant,
    finished: bool,
}

impl MoveOverTime {
    /// Starts the clock for a move of `duration_ms` milliseconds.
    ///
    /// # Errors
    ///
    /// [`ActionError::Internal`] when `starts` and `targets` differ in length.
    pub fn new(
        starts: Vec<Point>,
        targets: Vec<Point>,
        duration_ms: u64,
    ) -> Result<Self, ActionError> {
        if starts.len() != targets.len() {
            return Err(ActionError::Internal(format!(
                "Expected equal number of start and target coordinates, got {} and {}",
                starts.len(),
                targets.len()
            )));
        }

        trace!("moveOverTime start: {starts:?} target: {targets:?} duration: {duration_ms}");

        let started_at = Instant::now();
        Ok(Self {
            starts,
            targets,
            duration_ms,
            started_at,
            next_frame: started_at + FRAME_INTERVAL,
            finished: false,
        })
    }

    /// Waits for the next frame and returns the positions for it.
    ///
    /// Returns `None` once the final step (exactly the targets) has been
    /// handed out.  A zero duration yields the targets immediately.
    pub async fn next_step(&mut self) -> Option<Vec<Point>> {
        if self.finished {
            return None;
        }
        if self.duration_ms == 0 {
            self.finished = true;
            return Some(self.targets.clone());
        }

        sleep_until(self.next_frame).await;

        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.started_at).as_millis() as f64;
        let duration = self.duration_ms as f64;
        let ratio = elapsed_ms / duration;
        let epsilon = FRAME_INTERVAL.as_millis() as f64 / duration / 10.0;

        if 1.0 - ratio > epsilon {
            self.next_frame = now + FRAME_INTERVAL;
            return Some(
                self.starts
                    .iter()
                    .zip(&self.targets)
                    .map(|(&start, &target)| interpolate(start, target, ratio))
                    .collect(),
            );
        }

        self.finished = true;
        Some(self.targets.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
