//! Scene state for ringlet: the three rotating rings, their torus meshes,
//! the light rig, the scale toggle and the material controls, all driven one
//! frame at a time by [`SceneDriver`].

pub mod body;
pub mod controls;
pub mod driver;
pub mod easing;
pub mod lights;
pub mod toggle;
pub mod torus;
pub mod tween;

pub use body::{
    Axis, BODY_SPECS, BodyId, BodySpec, MaterialSlot, RotatingBody, ScrollCoupling, ScrollSource,
};
pub use controls::{Button, ControlSurface, button_name};
pub use driver::{FrameInput, INITIAL_MATERIALS, SceneDriver, SceneTuning};
pub use easing::Easing;
pub use lights::{AMBIENT_LIGHT, AmbientLightDef, FRONT_LIGHT, PointLightDef, RIM_LIGHT, light_rig};
pub use toggle::ScaleToggle;
pub use torus::{TorusGeometry, TorusMesh};
pub use tween::Tween;
