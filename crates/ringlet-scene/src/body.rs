//! The three rotating rings and their fixed tuning.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt;

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use ringlet_materials::{MaterialKind, hex_to_linear};

use crate::torus::TorusGeometry;
use crate::tween::Tween;

/// Identifies one of the three rings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyId {
    Outer,
    Middle,
    Inner,
}

impl BodyId {
    pub const ALL: [BodyId; 3] = [BodyId::Outer, BodyId::Middle, BodyId::Inner];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn spec(self) -> &'static BodySpec {
        &BODY_SPECS[self.index()]
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BodyId::Outer => "outer",
            BodyId::Middle => "middle",
            BodyId::Inner => "inner",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn get(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    fn set(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
    }
}

/// Which component of the smoothed scroll offset drives a rotation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollSource {
    X,
    Y,
}

/// An absolute rotation overwrite: `rotation[axis] = scroll[source] * weight`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollCoupling {
    pub axis: Axis,
    pub source: ScrollSource,
    pub weight: f32,
}

impl ScrollCoupling {
    fn value(&self, scroll: Vec2) -> f32 {
        let s = match self.source {
            ScrollSource::X => scroll.x,
            ScrollSource::Y => scroll.y,
        };
        s * self.weight
    }
}

/// Fixed creation-time parameters of a ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySpec {
    pub id: BodyId,
    pub torus: TorusGeometry,
    /// Euler angles (XYZ order) at creation.
    pub base_rotation: Vec3,
    pub base_scale: f32,
    pub spin_axis: Axis,
    /// Radians added to the spin axis every frame.
    pub spin_per_frame: f32,
    pub scroll_couplings: &'static [ScrollCoupling],
    /// `#rrggbb` shown until the material catalog is ready.
    pub placeholder_color: &'static str,
}

impl BodySpec {
    /// Placeholder color in linear RGB.
    pub fn placeholder_linear(&self) -> [f32; 3] {
        hex_to_linear(self.placeholder_color).unwrap_or([1.0, 1.0, 1.0])
    }
}

pub static BODY_SPECS: [BodySpec; 3] = [
    BodySpec {
        id: BodyId::Outer,
        torus: TorusGeometry::new(2.4, 0.2, 32, 100),
        base_rotation: Vec3::ZERO,
        base_scale: 1.25,
        spin_axis: Axis::Y,
        spin_per_frame: 0.01,
        scroll_couplings: &[ScrollCoupling {
            axis: Axis::X,
            source: ScrollSource::X,
            weight: 0.5,
        }],
        placeholder_color: "#ffffff",
    },
    BodySpec {
        id: BodyId::Middle,
        torus: TorusGeometry::new(1.8, 0.3, 32, 100),
        base_rotation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
        base_scale: 0.8,
        spin_axis: Axis::X,
        spin_per_frame: 0.008,
        scroll_couplings: &[ScrollCoupling {
            axis: Axis::Y,
            source: ScrollSource::Y,
            weight: 0.5,
        }],
        placeholder_color: "#ff5555",
    },
    BodySpec {
        id: BodyId::Inner,
        torus: TorusGeometry::new(1.2, 0.25, 32, 100),
        base_rotation: Vec3::new(0.0, 0.0, FRAC_PI_4),
        base_scale: 0.5,
        spin_axis: Axis::Z,
        spin_per_frame: 0.012,
        scroll_couplings: &[
            ScrollCoupling {
                axis: Axis::X,
                source: ScrollSource::X,
                weight: 0.3,
            },
            ScrollCoupling {
                axis: Axis::Y,
                source: ScrollSource::Y,
                weight: 0.3,
            },
        ],
        placeholder_color: "#55ff55",
    },
];

/// The material currently shown on a ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialSlot {
    /// Untextured color shown before the catalog is ready.
    Placeholder,
    Set(MaterialKind),
}

impl MaterialSlot {
    pub fn kind(self) -> Option<MaterialKind> {
        match self {
            MaterialSlot::Placeholder => None,
            MaterialSlot::Set(kind) => Some(kind),
        }
    }
}

/// Mutable per-frame state of one ring.
#[derive(Clone, Debug)]
pub struct RotatingBody {
    spec: &'static BodySpec,
    rotation: Vec3,
    scale: Vec3,
    tween: Option<Tween>,
    material: MaterialSlot,
}

impl RotatingBody {
    pub fn new(id: BodyId) -> Self {
        let spec = id.spec();
        Self {
            spec,
            rotation: spec.base_rotation,
            scale: Vec3::splat(spec.base_scale),
            tween: None,
            material: MaterialSlot::Placeholder,
        }
    }

    pub fn id(&self) -> BodyId {
        self.spec.id
    }

    pub fn spec(&self) -> &'static BodySpec {
        self.spec
    }

    /// Euler angles, XYZ order.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set the scale directly, dropping any tween in flight.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.tween = None;
    }

    pub fn material(&self) -> MaterialSlot {
        self.material
    }

    pub(crate) fn set_material(&mut self, material: MaterialSlot) {
        self.material = material;
    }

    pub fn tween(&self) -> Option<&Tween> {
        self.tween.as_ref()
    }

    /// Replace any tween in flight; the new one starts from the current scale.
    pub(crate) fn start_tween(&mut self, tween: Tween) {
        self.tween = Some(tween);
    }

    /// Advance the primary spin axis by one frame.
    pub(crate) fn spin(&mut self) {
        let axis = self.spec.spin_axis;
        let value = axis.get(self.rotation) + self.spec.spin_per_frame;
        axis.set(&mut self.rotation, value);
    }

    /// Overwrite the secondary axes from the smoothed scroll offset.
    pub(crate) fn apply_scroll(&mut self, scroll: Vec2) {
        for coupling in self.spec.scroll_couplings {
            coupling.axis.set(&mut self.rotation, coupling.value(scroll));
        }
    }

    pub(crate) fn advance_tween(&mut self, dt: f32) {
        if let Some(tween) = &mut self.tween {
            self.scale = tween.advance(dt);
            if tween.is_finished() {
                self.tween = None;
            }
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Model matrix; every ring sits at the origin.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation(), Vec3::ZERO)
    }
}
