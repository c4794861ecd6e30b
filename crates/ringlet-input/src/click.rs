//! Press-then-release click detection for the render surface.

use winit::event::{ElementState, MouseButton};

/// Reports a click when the primary button is released after being pressed
/// inside the window, matching the DOM `click` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickDetector {
    armed: bool,
}

impl ClickDetector {
    /// Creates a detector with no button held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `MouseInput` event. Returns `true` when it completes a click.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        match state {
            ElementState::Pressed => {
                self.armed = true;
                false
            }
            ElementState::Released => std::mem::take(&mut self.armed),
        }
    }

    /// Forget a pending press, e.g. when the cursor leaves the window.
    pub fn cancel(&mut self) {
        self.armed = false;
    }
}
