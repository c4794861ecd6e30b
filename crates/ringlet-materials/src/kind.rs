//! The ten material set identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MaterialError;

/// Identifier of one of the ten material sets.
///
/// The declaration order is the manifest order and the hotkey order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Ice,
    Marble,
    Lava,
    Alien,
    Bog,
    Coarse,
    Forest,
    Rusted,
    Antique,
    Wood,
}

impl MaterialKind {
    /// Number of material sets.
    pub const COUNT: usize = 10;

    /// Every set, in manifest order.
    pub const ALL: [MaterialKind; Self::COUNT] = [
        MaterialKind::Ice,
        MaterialKind::Marble,
        MaterialKind::Lava,
        MaterialKind::Alien,
        MaterialKind::Bog,
        MaterialKind::Coarse,
        MaterialKind::Forest,
        MaterialKind::Rusted,
        MaterialKind::Antique,
        MaterialKind::Wood,
    ];

    /// Position in [`ALL`](Self::ALL).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Set at `index` in manifest order.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lowercase name, also the texture sub-directory by default.
    pub fn name(self) -> &'static str {
        match self {
            MaterialKind::Ice => "ice",
            MaterialKind::Marble => "marble",
            MaterialKind::Lava => "lava",
            MaterialKind::Alien => "alien",
            MaterialKind::Bog => "bog",
            MaterialKind::Coarse => "coarse",
            MaterialKind::Forest => "forest",
            MaterialKind::Rusted => "rusted",
            MaterialKind::Antique => "antique",
            MaterialKind::Wood => "wood",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaterialKind {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| MaterialError::UnknownMaterial(s.to_string()))
    }
}
