use std::path::PathBuf;

use thiserror::Error;

use crate::kind::MaterialKind;
use crate::material::MapSlot;

/// Errors from material definitions, the manifest, and catalog assembly.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("unknown material set: {0}")]
    UnknownMaterial(String),

    #[error("material set {0} is defined more than once")]
    DuplicateMaterial(MaterialKind),

    #[error("material set {0} is missing from the manifest")]
    MissingMaterial(MaterialKind),

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("material set {kind} has no texture for its {slot} map")]
    CatalogIncomplete { kind: MaterialKind, slot: MapSlot },

    #[error("failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    ManifestParse(#[from] ron::error::SpannedError),
}

/// Errors from loading a single texture file.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to spawn texture loader thread: {0}")]
    WorkerSpawn(std::io::Error),

    #[error("asset loader has shut down")]
    LoaderShutDown,
}
