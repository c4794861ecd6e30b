//! The assembled material catalog.
//!
//! A [`MaterialCatalog`] only exists once every declared map of every set has
//! decoded, so holding one is proof that any [`MaterialKind`] can be assigned.

use std::collections::{BTreeMap, HashMap};

use crate::error::MaterialError;
use crate::kind::MaterialKind;
use crate::manifest::MaterialManifest;
use crate::material::{MapSlot, MaterialDef, MaterialUniform};
use crate::texture::DecodedTexture;

/// One immutable material set: its definition plus decoded maps.
#[derive(Debug)]
pub struct MaterialSet {
    def: MaterialDef,
    maps: BTreeMap<MapSlot, DecodedTexture>,
}

impl MaterialSet {
    pub fn kind(&self) -> MaterialKind {
        self.def.kind
    }

    pub fn def(&self) -> &MaterialDef {
        &self.def
    }

    /// Decoded map for `slot`, or `None` when the set does not use it.
    pub fn map(&self, slot: MapSlot) -> Option<&DecodedTexture> {
        self.maps.get(&slot)
    }

    pub fn uniform(&self) -> MaterialUniform {
        MaterialUniform::from(&self.def)
    }
}

/// All ten material sets, indexed by [`MaterialKind`].
#[derive(Debug)]
pub struct MaterialCatalog {
    sets: Vec<MaterialSet>,
}

impl MaterialCatalog {
    /// Assemble the catalog from a manifest and every decoded map.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::CatalogIncomplete`] for the first declared map
    /// that has no decoded texture.
    pub fn assemble(
        manifest: &MaterialManifest,
        mut textures: HashMap<(MaterialKind, MapSlot), DecodedTexture>,
    ) -> Result<Self, MaterialError> {
        let mut sets = Vec::with_capacity(MaterialKind::COUNT);
        for def in manifest.iter() {
            let mut maps = BTreeMap::new();
            for (slot, _) in def.maps.iter() {
                let texture = textures
                    .remove(&(def.kind, slot))
                    .ok_or(MaterialError::CatalogIncomplete {
                        kind: def.kind,
                        slot,
                    })?;
                maps.insert(slot, texture);
            }
            sets.push(MaterialSet {
                def: def.clone(),
                maps,
            });
        }
        Ok(Self { sets })
    }

    pub fn get(&self, kind: MaterialKind) -> &MaterialSet {
        &self.sets[kind.index()]
    }

    /// Sets in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = &MaterialSet> {
        self.sets.iter()
    }
}
