//! RON manifest listing every material set.
//!
//! A copy is compiled into the binary; a file on disk can replace it.

use std::path::Path;

use serde::Deserialize;

use crate::error::MaterialError;
use crate::kind::MaterialKind;
use crate::material::MaterialDef;

/// Manifest compiled into the binary.
pub const BUILTIN_MANIFEST: &str = include_str!("../assets/materials.ron");

#[derive(Deserialize)]
struct ManifestFile {
    sets: Vec<MaterialDef>,
}

/// Validated manifest: exactly one definition per [`MaterialKind`], stored in
/// manifest order.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialManifest {
    sets: Vec<MaterialDef>,
}

impl MaterialManifest {
    /// The built-in manifest.
    pub fn builtin() -> Result<Self, MaterialError> {
        Self::from_ron_str(BUILTIN_MANIFEST)
    }

    /// Load a manifest file from disk.
    pub fn load(path: &Path) -> Result<Self, MaterialError> {
        let contents = std::fs::read_to_string(path).map_err(|source| MaterialError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::from_ron_str(&contents)?;
        tracing::info!(path = %path.display(), "Loaded material manifest");
        Ok(manifest)
    }

    /// Load `path` when given, otherwise the built-in manifest.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, MaterialError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Parse and validate a manifest document.
    ///
    /// # Errors
    ///
    /// Fails on RON syntax errors, invalid colors, a set defined twice, or a
    /// set that is not defined at all.
    pub fn from_ron_str(s: &str) -> Result<Self, MaterialError> {
        let file: ManifestFile = ron::from_str(s)?;

        let mut slots: [Option<MaterialDef>; MaterialKind::COUNT] = Default::default();
        for def in file.sets {
            let def = def.validated()?;
            let slot = &mut slots[def.kind.index()];
            if slot.is_some() {
                return Err(MaterialError::DuplicateMaterial(def.kind));
            }
            *slot = Some(def);
        }

        let mut sets = Vec::with_capacity(MaterialKind::COUNT);
        for (kind, def) in MaterialKind::ALL.into_iter().zip(slots) {
            sets.push(def.ok_or(MaterialError::MissingMaterial(kind))?);
        }
        Ok(Self { sets })
    }

    pub fn get(&self, kind: MaterialKind) -> &MaterialDef {
        &self.sets[kind.index()]
    }

    /// Definitions in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = &MaterialDef> {
        self.sets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{MapSlot, NormalConvention};

    #[test]
    fn test_builtin_manifest_parses() {
        let manifest = MaterialManifest::builtin().unwrap();
        let kinds: Vec<_> = manifest.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, MaterialKind::ALL.to_vec());
    }

    #[test]
    fn test_builtin_scalars() {
        let manifest = MaterialManifest::builtin().unwrap();
        let expected = [
            (MaterialKind::Ice, 0.3, 0.2, 0.6),
            (MaterialKind::Marble, 0.4, 0.3, 0.3),
            (MaterialKind::Lava, 0.3, 0.4, 0.9),
            (MaterialKind::Alien, 0.5, 0.3, 0.6),
            (MaterialKind::Bog, 0.3, 0.6, 0.4),
            (MaterialKind::Coarse, 0.4, 0.4, 0.4),
            (MaterialKind::Forest, 0.3, 0.5, 0.8),
            (MaterialKind::Rusted, 0.5, 0.4, 0.0),
            (MaterialKind::Antique, 0.4, 0.3, 0.5),
            (MaterialKind::Wood, 0.3, 0.5, 0.4),
        ];
        for (kind, metal, rough, disp) in expected {
            let def = manifest.get(kind);
            assert_eq!(def.metalness, metal, "{kind} metalness");
            assert_eq!(def.roughness, rough, "{kind} roughness");
            assert_eq!(def.displacement_scale, disp, "{kind} displacement");
        }
    }

    #[test]
    fn test_builtin_maps() {
        let manifest = MaterialManifest::builtin().unwrap();
        let lava = manifest.get(MaterialKind::Lava);
        assert!(lava.maps.get(MapSlot::Albedo).is_none());
        assert!(lava.maps.get(MapSlot::Roughness).is_some());
        assert_eq!(lava.color.as_deref(), Some("#ffffff"));

        let forest = manifest.get(MaterialKind::Forest);
        assert_eq!(forest.normal_convention, NormalConvention::DirectX);
        assert_eq!(forest.maps.get(MapSlot::Normal), Some("forest_floor_Normal-dx.png"));

        let rusted = manifest.get(MaterialKind::Rusted);
        assert_eq!(rusted.maps.len(), 2);
        let textures: usize = manifest.iter().map(|def| def.maps.len()).sum();
        assert_eq!(textures, 33);
    }

    #[test]
    fn test_duplicate_set_rejected() {
        let doc = BUILTIN_MANIFEST.replacen("kind: marble", "kind: ice", 1);
        let err = MaterialManifest::from_ron_str(&doc).unwrap_err();
        assert!(matches!(err, MaterialError::DuplicateMaterial(MaterialKind::Ice)));
    }

    #[test]
    fn test_missing_set_rejected() {
        let doc = "(sets: [(kind: ice, metalness: 0.1, roughness: 0.2)])";
        let err = MaterialManifest::from_ron_str(doc).unwrap_err();
        assert!(matches!(err, MaterialError::MissingMaterial(MaterialKind::Marble)));
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let doc = "(sets: [(kind: granite, metalness: 0.1, roughness: 0.2)])";
        let err = MaterialManifest::from_ron_str(doc).unwrap_err();
        assert!(matches!(err, MaterialError::ManifestParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sets.ron");
        let doc = BUILTIN_MANIFEST.replace("roughness: 0.2,", "roughness: 0.25,");
        std::fs::write(&path, doc).unwrap();

        let manifest = MaterialManifest::load_or_builtin(Some(&path)).unwrap();
        assert_eq!(manifest.get(MaterialKind::Ice).roughness, 0.25);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MaterialManifest::load(&dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, MaterialError::ManifestRead { .. }));
    }
}
