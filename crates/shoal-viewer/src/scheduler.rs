//! Frame-paced world stepping.
//!
//! [`FrameScheduler`] owns a [`Stepper`] and a [`FrameClock`] and turns
//! display notifications into world frames: each due frame advances the
//! world exactly once and yields the snapshot to draw. Skipped notifications
//! touch nothing, so simulation speed is bound to the frame rate rather than
//! to how often the display wakes us.

use std::time::Instant;

use shoal_world::snapshot::WorldSnapshot;
use shoal_world::stepper::Stepper;

use crate::clock::FrameClock;
use crate::SchedulerError;

/// Drives a [`Stepper`] at a fixed frame rate.
///
/// The scheduler's millisecond timeline starts at construction. [`poll`] is
/// the wall-clock entry point used by the windowed runner; [`poll_at`] takes
/// raw timestamps and exists so pacing can be exercised deterministically.
///
/// Once [`stop`] is called the scheduler is inert: every subsequent poll
/// returns `None` and the world is never stepped again.
///
/// [`poll`]: FrameScheduler::poll
/// [`poll_at`]: FrameScheduler::poll_at
/// [`stop`]: FrameScheduler::stop
pub struct FrameScheduler<S> {
    clock: FrameClock,
    stepper: S,
    stopped: bool,
    epoch: Instant,
}

impl<S: Stepper> FrameScheduler<S> {
    /// Creates a scheduler stepping `stepper` at `target_fps`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidConfiguration`] if `target_fps` is
    /// not positive and finite.
    pub fn new(stepper: S, target_fps: f64) -> Result<Self, SchedulerError> {
        let clock = FrameClock::new(target_fps)?;
        tracing::info!(
            target_fps,
            interval_ms = clock.interval_ms(),
            "frame scheduler configured"
        );
        Ok(Self {
            clock,
            stepper,
            stopped: false,
            epoch: Instant::now(),
        })
    }

    /// Handles a notification at wall-clock time `now`.
    ///
    /// Returns the freshly stepped world when a frame is due, `None` when the
    /// notification is skipped or the scheduler is stopped.
    pub fn poll(&mut self, now: Instant) -> Option<WorldSnapshot> {
        let now_ms = now.saturating_duration_since(self.epoch).as_secs_f64() * 1000.0;
        self.poll_at(now_ms)
    }

    /// Handles a notification at `now_ms` on the scheduler's own timeline.
    pub fn poll_at(&mut self, now_ms: f64) -> Option<WorldSnapshot> {
        if self.stopped {
            return None;
        }
        if !self.clock.on_notify(now_ms) {
            return None;
        }
        self.stepper.step();
        Some(self.stepper.world())
    }

    /// Stops the scheduler. Idempotent; no frames are emitted afterwards.
    pub fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            tracing::debug!(
                frames = self.clock.frames(),
                notifications = self.clock.notifications(),
                "frame scheduler stopped"
            );
        }
    }

    /// Whether [`stop`](FrameScheduler::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// The pacing clock, for inspecting frame and notification counts.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Immutable access to the driven stepper.
    pub fn stepper(&self) -> &S {
        &self.stepper
    }

    /// Mutable access to the driven stepper, for setup and tests.
    pub fn stepper_mut(&mut self) -> &mut S {
        &mut self.stepper
    }
}
