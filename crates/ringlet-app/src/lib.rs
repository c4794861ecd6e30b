//! ringlet application host.
//!
//! Provides window creation, event handling, GPU resource glue and the
//! per-frame loop around [`ringlet_scene::SceneDriver`].

pub mod frame_clock;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod status;
pub mod window;

pub use frame_clock::FrameClock;
pub use platform::{PlatformDirs, PlatformError};
pub use renderer::SceneRenderer;
pub use window::{AppState, run};
