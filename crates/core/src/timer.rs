//! Frame timing for the viewer's update loop.

use std::time::{Duration, Instant};

/// Tracks per-frame delta time and a smoothed frame rate.
#[derive(Debug)]
pub struct FrameTimer {
    start: Instant,
    last_tick: Instant,
    frame_count: u64,
    smoothed_delta: f32,
}

/// Exponential smoothing factor for the frame-rate estimate.
const SMOOTHING: f32 = 0.05;

impl FrameTimer {
    /// Create a new timer, starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            frame_count: 0,
            smoothed_delta: 0.0,
        }
    }

    /// Get the total elapsed time since the timer was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Get the elapsed time in seconds since the timer was created.
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Number of frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Advance to the next frame and return the time since the last tick.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now - self.last_tick;
        self.last_tick = now;
        self.frame_count += 1;

        let secs = delta.as_secs_f32();
        if self.frame_count == 1 {
            self.smoothed_delta = secs;
        } else {
            self.smoothed_delta += (secs - self.smoothed_delta) * SMOOTHING;
        }

        delta
    }

    /// Advance to the next frame and return the delta time in seconds.
    pub fn delta_secs(&mut self) -> f32 {
        self.tick().as_secs_f32()
    }

    /// Smoothed frames-per-second estimate, or 0 before the first tick.
    pub fn fps(&self) -> f32 {
        if self.smoothed_delta > 0.0 {
            1.0 / self.smoothed_delta
        } else {
            0.0
        }
    }

    /// Reset the timer to the current time.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_tick = now;
        self.frame_count = 0;
        self.smoothed_delta = 0.0;
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
