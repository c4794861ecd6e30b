//! Material set definitions: [`MapSlot`], [`MaterialDef`], and the packed
//! [`MaterialUniform`] the ring shader reads.

use std::fmt;
use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::MaterialError;
use crate::kind::MaterialKind;

// ---------------------------------------------------------------------------
// MapSlot
// ---------------------------------------------------------------------------

/// The six image maps a set may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MapSlot {
    Albedo,
    AmbientOcclusion,
    Normal,
    Roughness,
    Metalness,
    Displacement,
}

impl MapSlot {
    pub const ALL: [MapSlot; 6] = [
        MapSlot::Albedo,
        MapSlot::AmbientOcclusion,
        MapSlot::Normal,
        MapSlot::Roughness,
        MapSlot::Metalness,
        MapSlot::Displacement,
    ];

    /// Texel used when a set does not provide this map.
    ///
    /// Chosen so the shader math is a no-op: white for multiplicative maps,
    /// a flat tangent-space normal, and zero height.
    pub fn neutral_texel(self) -> [u8; 4] {
        match self {
            MapSlot::Normal => [128, 128, 255, 255],
            MapSlot::Displacement => [0, 0, 0, 255],
            _ => [255, 255, 255, 255],
        }
    }

    /// Whether the map holds color data (sampled as sRGB) rather than linear data.
    pub fn is_color(self) -> bool {
        matches!(self, MapSlot::Albedo)
    }
}

impl fmt::Display for MapSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MapSlot::Albedo => "albedo",
            MapSlot::AmbientOcclusion => "ambient-occlusion",
            MapSlot::Normal => "normal",
            MapSlot::Roughness => "roughness",
            MapSlot::Metalness => "metalness",
            MapSlot::Displacement => "displacement",
        })
    }
}

/// Tangent-space normal map convention.
///
/// DirectX maps store green pointing down; they are flipped to OpenGL on load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalConvention {
    #[default]
    OpenGl,
    DirectX,
}

// ---------------------------------------------------------------------------
// MapFiles
// ---------------------------------------------------------------------------

/// File names of a set's maps, relative to the set's directory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapFiles {
    pub albedo: Option<String>,
    pub ao: Option<String>,
    pub normal: Option<String>,
    pub roughness: Option<String>,
    pub metalness: Option<String>,
    pub displacement: Option<String>,
}

impl MapFiles {
    pub fn get(&self, slot: MapSlot) -> Option<&str> {
        match slot {
            MapSlot::Albedo => self.albedo.as_deref(),
            MapSlot::AmbientOcclusion => self.ao.as_deref(),
            MapSlot::Normal => self.normal.as_deref(),
            MapSlot::Roughness => self.roughness.as_deref(),
            MapSlot::Metalness => self.metalness.as_deref(),
            MapSlot::Displacement => self.displacement.as_deref(),
        }
    }

    /// Declared maps in [`MapSlot::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (MapSlot, &str)> {
        MapSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|file| (slot, file)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// MaterialDef
// ---------------------------------------------------------------------------

/// Full definition of one material set as written in the manifest.
///
/// Scalars are clamped by [`MaterialDef::validated`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDef {
    pub kind: MaterialKind,

    /// Sub-directory of the texture root. Defaults to the set's name.
    #[serde(default)]
    pub directory: Option<String>,

    #[serde(default)]
    pub maps: MapFiles,

    /// Base color multiplier as `#rrggbb` (sRGB). White when absent.
    #[serde(default)]
    pub color: Option<String>,

    /// Clamped to `[0.0, 1.0]`.
    pub metalness: f32,

    /// Clamped to `[0.0, 1.0]`.
    pub roughness: f32,

    /// World-space displacement at full height. Must be >= 0.0.
    #[serde(default)]
    pub displacement_scale: f32,

    #[serde(default)]
    pub normal_convention: NormalConvention,
}

impl MaterialDef {
    /// Validates the color and clamps scalars to their legal ranges.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::InvalidColor`] if `color` is not `#rrggbb`.
    pub fn validated(mut self) -> Result<Self, MaterialError> {
        if let Some(color) = &self.color {
            parse_hex_color(color)?;
        }
        self.metalness = self.metalness.clamp(0.0, 1.0);
        self.roughness = self.roughness.clamp(0.0, 1.0);
        self.displacement_scale = self.displacement_scale.max(0.0);
        Ok(self)
    }

    pub fn directory(&self) -> &str {
        self.directory.as_deref().unwrap_or(self.kind.name())
    }

    /// Absolute path of a declared map under `texture_root`.
    pub fn map_path(&self, texture_root: &Path, slot: MapSlot) -> Option<PathBuf> {
        self.maps
            .get(slot)
            .map(|file| texture_root.join(self.directory()).join(file))
    }

    /// Base color in linear RGBA.
    pub fn base_color(&self) -> [f32; 4] {
        let [r, g, b] = self
            .color
            .as_deref()
            .and_then(|c| parse_hex_color(c).ok())
            .unwrap_or([255, 255, 255]);
        [
            srgb_to_linear(r),
            srgb_to_linear(g),
            srgb_to_linear(b),
            1.0,
        ]
    }
}

/// Parse `#rrggbb` into bytes.
pub fn parse_hex_color(s: &str) -> Result<[u8; 3], MaterialError> {
    let invalid = || MaterialError::InvalidColor(s.to_string());
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Parse `#rrggbb` into linear RGB.
pub fn hex_to_linear(s: &str) -> Result<[f32; 3], MaterialError> {
    let [r, g, b] = parse_hex_color(s)?;
    Ok([srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)])
}

pub fn srgb_to_linear(c: u8) -> f32 {
    let c = f32::from(c) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ---------------------------------------------------------------------------
// MaterialUniform
// ---------------------------------------------------------------------------

/// Packed per-set uniform, 64 bytes, std140-compatible.
///
/// Map flags are 1.0 when the set provides the map, so the shader can skip
/// the neutral texture's contribution explicitly.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    /// Base color in linear RGBA.
    pub base_color: [f32; 4],
    /// x = metalness, y = roughness, z = displacement scale, w unused.
    pub scalars: [f32; 4],
    /// x = albedo, y = ao, z = roughness, w = metalness.
    pub surface_maps: [f32; 4],
    /// x = normal, y = displacement, z, w unused.
    pub geometry_maps: [f32; 4],
}

impl From<&MaterialDef> for MaterialUniform {
    fn from(m: &MaterialDef) -> Self {
        let flag = |slot| if m.maps.get(slot).is_some() { 1.0 } else { 0.0 };
        Self {
            base_color: m.base_color(),
            scalars: [m.metalness, m.roughness, m.displacement_scale, 0.0],
            surface_maps: [
                flag(MapSlot::Albedo),
                flag(MapSlot::AmbientOcclusion),
                flag(MapSlot::Roughness),
                flag(MapSlot::Metalness),
            ],
            geometry_maps: [flag(MapSlot::Normal), flag(MapSlot::Displacement), 0.0, 0.0],
        }
    }
}

impl MaterialUniform {
    /// Untextured uniform for a placeholder color given as linear RGB.
    pub fn placeholder(color: [f32; 3]) -> Self {
        Self {
            base_color: [color[0], color[1], color[2], 1.0],
            scalars: [0.0, 1.0, 0.0, 0.0],
            surface_maps: [0.0; 4],
            geometry_maps: [0.0; 4],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
