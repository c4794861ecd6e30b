//! Variable-rate frame clock.
//!
//! The scene advances exactly one step per rendered frame, so there is no
//! fixed-timestep accumulator. The clock only measures the frame delta that
//! drives scale tweens and reads the wall clock for the starfield.

use std::time::Instant;

use ringlet_scene::FrameInput;
use ringlet_space::now_millis;
use tracing::warn;

/// Longest frame delta handed to the scene, in seconds. A stall (window drag,
/// debugger break) finishes tweens early rather than skipping them.
pub const MAX_FRAME_TIME: f64 = 0.25;

pub struct FrameClock {
    previous_time: Instant,
    frame_count: u64,
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            frame_count: 0,
            elapsed: 0.0,
        }
    }

    /// Measure the time since the previous call and read the wall clock.
    pub fn tick(&mut self) -> FrameInput {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.step(frame_time, now_millis())
    }

    /// Advance by an explicit frame time.
    pub fn step(&mut self, frame_time: f64, wall_clock_ms: f64) -> FrameInput {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }
        self.elapsed += frame_time;
        self.frame_count += 1;
        FrameInput {
            dt: frame_time as f32,
            wall_clock_ms,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of clamped frame times, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
