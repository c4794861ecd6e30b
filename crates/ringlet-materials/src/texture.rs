//! CPU-side decoded texture maps.

use std::path::Path;

use crate::error::AssetError;
use crate::material::NormalConvention;

/// A decoded RGBA8 image ready for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedTexture {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for DecodedTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedTexture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

impl DecodedTexture {
    /// Read and decode an image file.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image = image::load_from_memory(&bytes)
            .map_err(|source| AssetError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        Ok(Self {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        })
    }

    /// Read a normal map and convert it to the OpenGL convention.
    pub fn load_normal(path: &Path, convention: NormalConvention) -> Result<Self, AssetError> {
        let mut texture = Self::load(path)?;
        if convention == NormalConvention::DirectX {
            texture.flip_green();
        }
        Ok(texture)
    }

    /// A 1x1 texture of a single texel.
    pub fn solid(texel: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: texel.to_vec(),
        }
    }

    /// Invert the green channel in place.
    pub fn flip_green(&mut self) {
        for px in self.rgba.chunks_exact_mut(4) {
            px[1] = 255 - px[1];
        }
    }

    pub fn byte_len(&self) -> usize {
        self.rgba.len()
    }
}

#[cfg(test)]
pub(crate) fn write_test_png(path: &Path, width: u32, height: u32, texel: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(texel));
    img.save(path).unwrap();
}
