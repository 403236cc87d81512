// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Image decoding.

use super::{AssetLoader, LoadError};
use strata_data::assets::Texture;

/// Decodes any format the `image` crate understands into RGBA8 pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureLoader;

impl AssetLoader<Texture> for TextureLoader {
    fn load_bytes(&self, bytes: &[u8]) -> Result<Texture, LoadError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Texture {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_decodes_to_rgba8() {
        // --- 1. ARRANGE ---
        let mut source = image::RgbImage::new(2, 3);
        source.put_pixel(1, 2, image::Rgb([255, 0, 0]));
        let mut png = Vec::new();
        source
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        // --- 2. ACT ---
        let texture = TextureLoader.load_bytes(&png).unwrap();

        // --- 3. ASSERT ---
        assert_eq!((texture.width, texture.height), (2, 3));
        assert_eq!(texture.pixels.len(), 2 * 3 * 4);
        assert_eq!(&texture.pixels[(2 * 2 + 1) * 4..][..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            TextureLoader.load_bytes(b"not an image"),
            Err(LoadError::Image(_))
        ));
    }
}
