//! Fixed-rate input frames on top of a variable-rate event loop.
//!
//! Window events arrive whenever the OS delivers them, but the controls must
//! advance at a steady rate so that "held for N frames" means the same thing
//! on every machine. The clock accumulates wall time and reports how many
//! input frames are due; the caller runs them.

use std::time::{Duration, Instant};
use tracing::warn;

/// Default input frame rate.
pub const DEFAULT_RATE_HZ: u32 = 60;

/// Longest stretch of wall time credited in one call.
///
/// After a stall (window drag, debugger pause) the clock runs at most this
/// much worth of frames instead of replaying the whole gap.
pub const MAX_CATCH_UP: f64 = 0.25;

/// Accumulator-driven frame scheduler.
pub struct FrameClock {
    frame_dt: f64,
    previous_time: Instant,
    accumulator: f64,
    frames: u64,
}

impl FrameClock {
    /// A clock producing `rate_hz` frames per second; zero falls back to
    /// [`DEFAULT_RATE_HZ`].
    #[must_use]
    pub fn new(rate_hz: u32) -> Self {
        let rate = if rate_hz == 0 {
            warn!("Frame rate 0 is invalid, using {DEFAULT_RATE_HZ} Hz");
            DEFAULT_RATE_HZ
        } else {
            rate_hz
        };
        Self {
            frame_dt: 1.0 / f64::from(rate),
            previous_time: Instant::now(),
            accumulator: 0.0,
            frames: 0,
        }
    }

    /// Seconds per frame.
    #[must_use]
    pub fn frame_dt(&self) -> f64 {
        self.frame_dt
    }

    /// Total frames handed out so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Measures time since the previous call and returns how many frames
    /// are due.
    pub fn advance_to(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.previous_time);
        self.previous_time = now;
        self.advance_by(elapsed.as_secs_f64())
    }

    /// Credits `elapsed` seconds and returns how many frames are due.
    pub fn advance_by(&mut self, elapsed: f64) -> u32 {
        let mut elapsed = elapsed.max(0.0);
        if elapsed > MAX_CATCH_UP {
            warn!(
                "Input stalled for {:.1}ms, catching up {:.1}ms only",
                elapsed * 1000.0,
                MAX_CATCH_UP * 1000.0
            );
            elapsed = MAX_CATCH_UP;
        }
        self.accumulator += elapsed;

        let mut due = 0;
        while self.accumulator >= self.frame_dt {
            self.accumulator -= self.frame_dt;
            due += 1;
        }
        self.frames += u64::from(due);
        due
    }

    /// When the next frame falls due, for `ControlFlow::WaitUntil`.
    #[must_use]
    pub fn next_deadline(&self) -> Instant {
        let remaining = (self.frame_dt - self.accumulator).max(0.0);
        self.previous_time + Duration::from_secs_f64(remaining)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_HZ)
    }
}
