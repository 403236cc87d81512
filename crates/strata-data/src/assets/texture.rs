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

use strata_core::asset::Asset;

/// A decoded 2D image, ready to be uploaded by the renderer.
///
/// Pixels are tightly packed 8-bit RGBA rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 pixel data, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl Asset for Texture {
    const KIND: &'static str = "texture";
}

impl Texture {
    /// Gets the row size in bytes.
    pub fn row_size(&self) -> usize {
        self.width as usize * 4
    }
}
