//! PBR material sets for the rings: the fixed catalog of ten named sets, the
//! RON manifest describing their texture maps, and the background loader that
//! produces the catalog once every texture has decoded.

pub mod catalog;
pub mod error;
pub mod kind;
pub mod loader;
pub mod manifest;
pub mod material;
pub mod texture;

pub use catalog::{MaterialCatalog, MaterialSet};
pub use error::{AssetError, MaterialError};
pub use kind::MaterialKind;
pub use loader::{AssetLoader, LoadProgress};
pub use manifest::MaterialManifest;
pub use material::{
    MapFiles, MapSlot, MaterialDef, MaterialUniform, NormalConvention, hex_to_linear,
    parse_hex_color, srgb_to_linear,
};
pub use texture::DecodedTexture;
