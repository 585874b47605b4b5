use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{SpriteError, SpriteResult};

/// Where the sprite artwork comes from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StencilSource {
    /// The built-in 16x16 sprite, each texel scaled to `scale x scale` pixels.
    Builtin {
        #[serde(default = "one")]
        scale: u32,
    },
    /// An image file, relative to the manifest directory unless absolute.
    Png { path: PathBuf },
}

fn one() -> u32 {
    1
}

impl Default for StencilSource {
    fn default() -> Self {
        Self::Builtin { scale: 4 }
    }
}

/// Prepared sprite artwork: a `width x height` grid of RGB texels.
///
/// Texels equal to the canvas' transparent key are stamped as background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stencil {
    width: u32,
    height: u32,
    texels: Vec<Rgb8>,
}

// '.' is the transparent key (black); every drawn color avoids pure black.
const BUILTIN_ROWS: [&str; 16] = [
    "......RRRR......",
    "....RRRRWWRR....",
    "...RRRRWWWWRR...",
    "..WRRRRWWWWRRW..",
    "..WWRRRRWWRRWW..",
    ".WWWRRRRRRRRWWW.",
    ".WWRRWWWWWWRRWW.",
    "RRRRWWWWWWWWRRRR",
    "RRRRWWWWWWWWRRRR",
    "RRRRRWWWWWWRRRRR",
    ".RRRRRRRRRRRRRR.",
    "....SSSSSSSS....",
    "...SSSKSSKSSS...",
    "...SSSKSSKSSS...",
    "...SSSSSSSSSS...",
    "....SSSSSSSS....",
];

fn builtin_palette(c: char) -> Option<Rgb8> {
    match c {
        '.' => Some(Rgb8::BLACK),
        'R' => Some(Rgb8::new(0xD8, 0x28, 0x00)),
        'W' => Some(Rgb8::new(0xFC, 0xFC, 0xFC)),
        'S' => Some(Rgb8::new(0xFC, 0xD8, 0xA8)),
        'K' => Some(Rgb8::new(0x10, 0x10, 0x10)),
        _ => None,
    }
}

impl Stencil {
    /// Build a stencil from tightly packed RGB8 bytes (row-major).
    pub fn from_rgb8(width: u32, height: u32, rgb: &[u8]) -> SpriteResult<Self> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(SpriteError::validation(format!(
                "stencil {width}x{height} expects {expected} RGB bytes, got {}",
                rgb.len()
            )));
        }
        let texels = rgb
            .chunks_exact(3)
            .map(|px| Rgb8::new(px[0], px[1], px[2]))
            .collect();
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Pixel size of the built-in sprite at `scale`, or `None` when it overflows `u32`.
    pub fn builtin_size(scale: u32) -> Option<(u32, u32)> {
        let width = (BUILTIN_ROWS[0].len() as u32).checked_mul(scale)?;
        let height = (BUILTIN_ROWS.len() as u32).checked_mul(scale)?;
        Some((width, height))
    }

    /// The built-in sprite, upscaled by an integer factor.
    pub fn builtin(scale: u32) -> SpriteResult<Self> {
        if scale == 0 {
            return Err(SpriteError::validation("builtin stencil scale must be > 0"));
        }
        let too_large =
            || SpriteError::validation(format!("builtin stencil scale {scale} is too large"));
        let (width, height) = Self::builtin_size(scale).ok_or_else(too_large)?;
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(too_large)?;

        let mut texels = Vec::new();
        texels.try_reserve_exact(count).map_err(|e| {
            SpriteError::validation(format!("builtin stencil {width}x{height}: {e}"))
        })?;
        for y in 0..height {
            let row = BUILTIN_ROWS[(y / scale) as usize].as_bytes();
            for x in 0..width {
                let c = char::from(row[(x / scale) as usize]);
                let texel = builtin_palette(c).ok_or_else(|| {
                    SpriteError::validation(format!("unknown builtin palette entry '{c}'"))
                })?;
                texels.push(texel);
            }
        }

        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Decode an encoded image file into a stencil (alpha is dropped).
    pub fn from_png_path(path: &Path) -> SpriteResult<Self> {
        let img = image::open(path)
            .with_context(|| format!("decode stencil image '{}'", path.display()))?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self::from_rgb8(width, height, rgb.as_raw())
    }

    /// Resolve a [`StencilSource`]; relative paths are joined onto `root`.
    pub fn prepare(source: &StencilSource, root: &Path) -> SpriteResult<Self> {
        match source {
            StencilSource::Builtin { scale } => Self::builtin(*scale),
            StencilSource::Png { path } => {
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    root.join(path)
                };
                Self::from_png_path(&path)
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texel(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x < self.width && y < self.height {
            self.texels
                .get(y as usize * self.width as usize + x as usize)
                .copied()
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/stencil.rs"]
mod tests;
