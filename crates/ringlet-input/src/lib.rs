//! Raw pointer and keyboard sampling.
//!
//! The samplers here only update their own state when winit events arrive;
//! nothing in this crate touches the scene. The per-frame driver reads the
//! smoothed values once per rendered frame.

pub mod click;
pub mod hotkeys;
pub mod modifiers;
pub mod mouse;
pub mod scroll;
pub mod smoothing;

pub use click::ClickDetector;
pub use hotkeys::{MaterialHotkey, material_hotkey};
pub use modifiers::Modifiers;
pub use mouse::MouseState;
pub use scroll::ScrollState;
pub use smoothing::{Smoothed, smooth_toward};
