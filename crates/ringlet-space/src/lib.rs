//! Star backdrop: seeded point-cloud generation, the wall-clock driven
//! twinkle/rotation pose, and the billboard renderer.

pub mod animation;
pub mod renderer;
pub mod starfield;

pub use animation::{StarfieldPose, now_millis, phase_from_millis};
pub use renderer::{STAR_SHADER_SOURCE, StarInstance, StarRenderer, StarUniform, sprite_world_size};
pub use starfield::{StarPoint, StarfieldGenerator};
