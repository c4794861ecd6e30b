//! Wheel accumulator with a smoothed read-out.

use glam::Vec2;
use winit::event::MouseScrollDelta;

use crate::smoothing::Smoothed;

/// Accumulated wheel offset plus its per-frame smoothed value.
///
/// Raw deltas follow the DOM sign convention: positive `y` means the user
/// scrolled down (content moves up), positive `x` means scrolled right. The
/// accumulated offset is unbounded.
#[derive(Debug, Clone)]
pub struct ScrollState {
    raw: Vec2,
    smoothed: Smoothed,
    speed: f32,
    line_height_px: f32,
}

impl ScrollState {
    /// Creates a scroll accumulator.
    ///
    /// `speed` scales pixel deltas into offset units, `smoothing` is the
    /// per-frame coefficient, and `line_height_px` converts line-based wheel
    /// ticks into pixels.
    #[must_use]
    pub fn new(speed: f32, smoothing: f32, line_height_px: f32) -> Self {
        Self {
            raw: Vec2::ZERO,
            smoothed: Smoothed::new(smoothing),
            speed,
            line_height_px,
        }
    }

    // ── Event handlers ──────────────────────────────────────────────

    /// Adds a pixel-space wheel delta (DOM convention).
    pub fn on_wheel(&mut self, dx: f32, dy: f32) {
        self.raw.x += dx * self.speed;
        self.raw.y += dy * self.speed;
    }

    /// Process a winit `MouseWheel` event.
    ///
    /// winit reports positive `y` when content should move down, which is the
    /// opposite of the DOM, so both axes are negated here.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (x * self.line_height_px, y * self.line_height_px),
            MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
        };
        self.on_wheel(-dx, -dy);
    }

    // ── Per frame ───────────────────────────────────────────────────

    /// Moves the smoothed offset one frame toward the accumulated offset.
    pub fn smooth(&mut self) {
        self.smoothed.step(self.raw);
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Accumulated offset (speed already applied).
    #[must_use]
    pub fn raw(&self) -> Vec2 {
        self.raw
    }

    /// Smoothed offset.
    #[must_use]
    pub fn smoothed(&self) -> Vec2 {
        self.smoothed.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    fn state() -> ScrollState {
        ScrollState::new(0.005, 0.1, 100.0)
    }

    #[test]
    fn test_wheel_accumulates_with_speed() {
        let mut scroll = state();
        scroll.on_wheel(0.0, 100.0);
        scroll.on_wheel(40.0, 100.0);
        assert!((scroll.raw().x - 0.2).abs() < 1e-6);
        assert!((scroll.raw().y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_accumulation_is_order_independent() {
        let events = [(3.0, -120.0), (0.0, 40.0), (-10.0, 7.5), (25.0, 0.0)];

        let mut forward = state();
        for &(dx, dy) in &events {
            forward.on_wheel(dx, dy);
        }
        let mut reverse = state();
        for &(dx, dy) in events.iter().rev() {
            reverse.on_wheel(dx, dy);
        }
        let mut single = state();
        single.on_wheel(18.0, -72.5);

        assert!((forward.raw() - reverse.raw()).length() < 1e-6);
        assert!((forward.raw() - single.raw()).length() < 1e-6);
    }

    #[test]
    fn test_accumulation_is_unbounded() {
        let mut scroll = state();
        for _ in 0..10_000 {
            scroll.on_wheel(0.0, 100.0);
        }
        assert!((scroll.raw().y - 5000.0).abs() < 1e-2);
    }

    #[test]
    fn test_line_delta_converted_and_negated() {
        let mut scroll = state();
        // One notch toward the user: winit y = -1, DOM deltaY = +100.
        scroll.on_scroll(MouseScrollDelta::LineDelta(0.0, -1.0));
        assert!((scroll.raw().y - 0.5).abs() < 1e-6);
        assert_eq!(scroll.raw().x, 0.0);
    }

    #[test]
    fn test_pixel_delta_negated() {
        let mut scroll = state();
        scroll.on_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(-20.0, 60.0)));
        assert!((scroll.raw().x - 0.1).abs() < 1e-6);
        assert!((scroll.raw().y + 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_events_do_not_touch_smoothed_value() {
        let mut scroll = state();
        scroll.on_wheel(100.0, 100.0);
        assert_eq!(scroll.smoothed(), Vec2::ZERO);
        scroll.smooth();
        assert!((scroll.smoothed().x - 0.05).abs() < 1e-6);
    }
}
