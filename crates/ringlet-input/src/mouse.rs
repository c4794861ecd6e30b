//! Cursor position tracker mapping pixels to a signed offset from the
//! viewport center.

use glam::Vec2;

use crate::smoothing::Smoothed;

/// Cursor state: last raw position, normalized offset, and its smoothed value.
///
/// The normalized offset is `(position - size / 2) / size * 2`, which lies in
/// `[-1, 1]` while the cursor is inside the viewport. Position and viewport
/// size must be in the same pixel space.
#[derive(Debug, Clone)]
pub struct MouseState {
    position: Vec2,
    viewport: Vec2,
    normal_offset: Vec2,
    smoothed: Smoothed,
    gaze_range: Vec2,
}

impl MouseState {
    /// Creates a tracker for a viewport of the given size.
    ///
    /// `gaze_range` bounds the camera displacement produced by
    /// [`camera_offset`](Self::camera_offset).
    #[must_use]
    pub fn new(viewport_width: f32, viewport_height: f32, smoothing: f32, gaze_range: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport: Vec2::new(viewport_width.max(1.0), viewport_height.max(1.0)),
            normal_offset: Vec2::ZERO,
            smoothed: Smoothed::new(smoothing),
            gaze_range,
        }
    }

    // ── Event handlers ──────────────────────────────────────────────

    /// Process a `CursorMoved` event.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.position = Vec2::new(x as f32, y as f32);
        self.normal_offset = normalize(self.position, self.viewport);
    }

    /// Track a new viewport size. The stored offset is recomputed from the
    /// last known cursor position.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        self.normal_offset = normalize(self.position, self.viewport);
    }

    // ── Per frame ───────────────────────────────────────────────────

    /// Moves the smoothed offset one frame toward the normalized offset.
    pub fn smooth(&mut self) {
        self.smoothed.step(self.normal_offset);
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Last cursor position in pixels.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Offset from the viewport center, roughly in `[-1, 1]`.
    #[must_use]
    pub fn normal_offset(&self) -> Vec2 {
        self.normal_offset
    }

    /// Smoothed offset from the viewport center.
    #[must_use]
    pub fn smoothed(&self) -> Vec2 {
        self.smoothed.value()
    }

    /// Camera displacement for the smoothed offset.
    ///
    /// Screen `y` grows downward while world `y` grows upward, so the vertical
    /// component is negated.
    #[must_use]
    pub fn camera_offset(&self) -> Vec2 {
        let s = self.smoothed.value();
        Vec2::new(s.x * self.gaze_range.x, -s.y * self.gaze_range.y)
    }
}

fn normalize(position: Vec2, viewport: Vec2) -> Vec2 {
    (position - viewport * 0.5) / viewport * 2.0
}
