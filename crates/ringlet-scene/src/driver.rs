//! The per-frame scene driver.
//!
//! [`SceneDriver`] owns every piece of mutable scene state: the input
//! accumulators, the three rings, the camera, the starfield pose and the
//! control surface. The host feeds it window events between frames and calls
//! [`tick`](SceneDriver::tick) once per rendered frame.

use glam::{Vec2, Vec3};
use ringlet_input::{MouseState, ScrollState};
use ringlet_materials::{MaterialCatalog, MaterialKind};
use ringlet_render::Camera;
use ringlet_space::StarfieldPose;
use tracing::{debug, info};

use crate::body::{BodyId, MaterialSlot, RotatingBody};
use crate::controls::ControlSurface;
use crate::toggle::ScaleToggle;

/// Sets each ring receives when the catalog becomes ready.
pub const INITIAL_MATERIALS: [(BodyId, MaterialKind); 3] = [
    (BodyId::Outer, MaterialKind::Ice),
    (BodyId::Middle, MaterialKind::Marble),
    (BodyId::Inner, MaterialKind::Wood),
];

/// Tuning constants for input feel and the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTuning {
    pub scroll_speed: f32,
    pub scroll_smoothing: f32,
    pub mouse_smoothing: f32,
    /// Camera displacement at the viewport edge, per axis.
    pub gaze_range: Vec2,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Camera z position.
    pub camera_depth: f32,
    pub wheel_line_height_px: f32,
    pub toggle: ScaleToggle,
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            scroll_speed: 0.005,
            scroll_smoothing: 0.1,
            mouse_smoothing: 0.07,
            gaze_range: Vec2::new(70.0, 30.0),
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            camera_depth: 0.0,
            wheel_line_height_px: 100.0,
            toggle: ScaleToggle::default(),
        }
    }
}

/// Clock readings for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame. Drives tweens only.
    pub dt: f32,
    /// Wall-clock milliseconds. Drives the starfield.
    pub wall_clock_ms: f64,
}

pub struct SceneDriver {
    tuning: SceneTuning,
    scroll: ScrollState,
    mouse: MouseState,
    bodies: [RotatingBody; 3],
    camera: Camera,
    stars: StarfieldPose,
    controls: ControlSurface,
    ready: bool,
    frame_count: u64,
}

impl SceneDriver {
    pub fn new(tuning: SceneTuning, width: u32, height: u32) -> Self {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let mut camera = Camera::perspective(tuning.fov_degrees, w / h, tuning.near, tuning.far);
        camera.position = Vec3::new(0.0, 0.0, tuning.camera_depth);
        camera.look_at(Vec3::ZERO, Vec3::Y);

        Self {
            scroll: ScrollState::new(
                tuning.scroll_speed,
                tuning.scroll_smoothing,
                tuning.wheel_line_height_px,
            ),
            mouse: MouseState::new(w, h, tuning.mouse_smoothing, tuning.gaze_range),
            bodies: BodyId::ALL.map(RotatingBody::new),
            camera,
            stars: StarfieldPose::default(),
            controls: ControlSurface::new(),
            ready: false,
            frame_count: 0,
            tuning,
        }
    }

    // ── Events ──────────────────────────────────────────────────────

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    pub fn mouse_mut(&mut self) -> &mut MouseState {
        &mut self.mouse
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.mouse.on_resize(width as f32, height as f32);
        self.camera.set_aspect_ratio(width as f32, height as f32);
    }

    /// A completed click on the render surface.
    pub fn on_click(&mut self) {
        self.tuning.toggle.apply(&mut self.bodies);
    }

    /// The catalog finished loading: assign the initial sets and enable
    /// the controls. Later calls do nothing.
    pub fn on_catalog_ready(&mut self, catalog: &MaterialCatalog) {
        if self.ready {
            return;
        }
        for (body, kind) in INITIAL_MATERIALS {
            self.assign_material(catalog, body, kind);
        }
        self.controls.enable_all();
        self.ready = true;
        info!("material catalog ready, controls enabled");
    }

    /// Show `kind` on `body`. Requiring the catalog makes assignment before
    /// loading completes impossible.
    pub fn assign_material(&mut self, catalog: &MaterialCatalog, body: BodyId, kind: MaterialKind) {
        let set = catalog.get(kind);
        debug!(body = %body, material = %set.kind(), "assign material");
        self.bodies[body.index()].set_material(MaterialSlot::Set(set.kind()));
    }

    /// Press a named button. Returns the assignment made, if any.
    pub fn press_button(
        &mut self,
        catalog: &MaterialCatalog,
        name: &str,
    ) -> Option<(BodyId, MaterialKind)> {
        let (body, kind) = self.controls.press(name)?;
        self.assign_material(catalog, body, kind);
        Some((body, kind))
    }

    // ── Per frame ───────────────────────────────────────────────────

    /// Advance the scene by one frame.
    ///
    /// Smoothing and spin are per-frame steps, not scaled by `dt`.
    pub fn tick(&mut self, input: FrameInput) {
        self.scroll.smooth();
        self.mouse.smooth();

        let scroll = self.scroll.smoothed();
        for body in &mut self.bodies {
            body.spin();
            body.apply_scroll(scroll);
            body.advance_tween(input.dt);
        }

        let offset = self.mouse.camera_offset();
        self.camera.position = Vec3::new(offset.x, offset.y, self.tuning.camera_depth);
        self.camera.look_at(Vec3::ZERO, Vec3::Y);

        self.stars = StarfieldPose::at_millis(input.wall_clock_ms);
        self.frame_count += 1;
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub fn tuning(&self) -> &SceneTuning {
        &self.tuning
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    pub fn bodies(&self) -> &[RotatingBody; 3] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> &RotatingBody {
        &self.bodies[id.index()]
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn stars(&self) -> StarfieldPose {
        self.stars
    }

    pub fn controls(&self) -> &ControlSurface {
        &self.controls
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
