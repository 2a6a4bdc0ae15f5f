//! Drift-corrected frame pacing over a millisecond timeline.
//!
//! [`FrameClock`] decides, for each display notification, whether a frame is
//! due. It is pure state plus arithmetic: callers supply timestamps, which
//! makes every pacing decision replayable in tests.

use crate::SchedulerError;

/// Decides which display notifications become frames.
///
/// The clock divides a caller-supplied millisecond timeline into frame
/// intervals of `1000 / target_fps`. A notification produces a frame when at
/// least one full interval has elapsed since the last frame. On emission the
/// frame timestamp is advanced by a whole number of intervals rather than
/// snapped to the notification time, so a notification source that does not
/// divide the interval evenly (a 60 Hz display driving a 24 fps clock, say)
/// still converges on the target rate instead of running slow.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval_ms: f64,
    last_frame_ms: f64,
    frames: u64,
    notifications: u64,
}

impl FrameClock {
    /// Creates a clock targeting `target_fps` frames per second.
    ///
    /// The timeline origin is the moment of construction: the first frame
    /// becomes due one full interval after timestamp zero.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidConfiguration`] unless `target_fps`
    /// is positive and finite, since no frame interval exists otherwise.
    pub fn new(target_fps: f64) -> Result<Self, SchedulerError> {
        if !target_fps.is_finite() || target_fps <= 0.0 {
            return Err(SchedulerError::InvalidConfiguration { target_fps });
        }
        Ok(Self {
            interval_ms: 1000.0 / target_fps,
            last_frame_ms: 0.0,
            frames: 0,
            notifications: 0,
        })
    }

    /// Records a notification at `now_ms` and reports whether a frame is due.
    ///
    /// A frame is due when `now_ms - last_frame_ms >= interval_ms`. Frames
    /// are never emitted retroactively: a notification arriving many
    /// intervals late yields exactly one frame, and pacing resumes from the
    /// interval boundary at or before `now_ms`.
    pub fn on_notify(&mut self, now_ms: f64) -> bool {
        self.notifications += 1;
        let elapsed = now_ms - self.last_frame_ms;
        if elapsed < self.interval_ms {
            return false;
        }
        // Rewind to the interval boundary instead of snapping to `now_ms`,
        // carrying the overshoot into the next frame's budget.
        self.last_frame_ms = now_ms - (elapsed % self.interval_ms);
        self.frames += 1;
        true
    }

    /// The frame interval in milliseconds.
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Timestamp of the most recent frame, in milliseconds. Zero until the
    /// first frame is emitted.
    pub fn last_frame_ms(&self) -> f64 {
        self.last_frame_ms
    }

    /// Number of frames emitted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of notifications observed, including skipped ones.
    pub fn notifications(&self) -> u64 {
        self.notifications
    }
}
