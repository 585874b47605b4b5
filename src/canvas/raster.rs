use std::sync::Arc;

use xxhash_rust::xxh3::Xxh3;

use crate::canvas::plane::Plane;
use crate::canvas::stencil::Stencil;
use crate::encode::sink::FrameRgb;
use crate::foundation::core::{Direction, Rgb8};
use crate::foundation::error::{SpriteError, SpriteResult};

const XXH3_SEED: u64 = 0x5c94_fcd8_2800_a8d8;

/// Everything needed to build a canvas in its initial state.
///
/// Two canvases built from equal configs are pixel-identical, which is what replay relies on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub background: Rgb8,
    /// Stencil texels equal to this key are stamped as `background`.
    pub transparent: Rgb8,
    /// Top-left canvas position of the stencil.
    pub origin: (u32, u32),
    pub stencil: Arc<Stencil>,
}

/// A geometric transform the canvas knows how to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transform {
    Shift { direction: Direction, distance: u32 },
    /// Counter-clockwise quarter turns, applied one at a time.
    Rotate { quarter_turns: u8 },
}

/// Three pixel-aligned `u8` planes (red, green, blue) of fixed size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    planes: [Plane; 3],
}

impl Canvas {
    /// Fill with the background color and stamp the stencil at `config.origin`.
    pub fn new(config: &CanvasConfig) -> SpriteResult<Self> {
        let (width, height) = (config.width, config.height);
        if width == 0 || height == 0 {
            return Err(SpriteError::geometry(format!(
                "canvas dimensions must be non-zero (got {width}x{height})"
            )));
        }

        let stencil = &config.stencil;
        let (ox, oy) = config.origin;
        ensure_stencil_fits(
            (stencil.width(), stencil.height()),
            config.origin,
            (width, height),
        )?;

        let bg = config.background;
        let mut canvas = Self {
            width,
            height,
            planes: [
                Plane::filled(width, height, bg.r),
                Plane::filled(width, height, bg.g),
                Plane::filled(width, height, bg.b),
            ],
        };

        for sy in 0..stencil.height() {
            for sx in 0..stencil.width() {
                let Some(texel) = stencil.texel(sx, sy) else {
                    continue;
                };
                let color = if texel == config.transparent { bg } else { texel };
                canvas.put(ox + sx, oy + sy, color);
            }
        }

        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        let [r, g, b] = &self.planes;
        Some(Rgb8::new(r.get(x, y)?, g.get(x, y)?, b.get(x, y)?))
    }

    fn put(&mut self, x: u32, y: u32, color: Rgb8) {
        let [r, g, b] = &mut self.planes;
        r.set(x, y, color.r);
        g.set(x, y, color.g);
        b.set(x, y, color.b);
    }

    /// Circular shift of all three planes; `distance` is reduced modulo the axis length.
    pub fn shift(&mut self, direction: Direction, distance: u32) {
        for plane in &mut self.planes {
            plane.shift(direction, distance);
        }
    }

    /// Rotate all three planes 90 degrees counter-clockwise.
    ///
    /// # Errors
    ///
    /// [`SpriteError::InvalidGeometry`] if the canvas is not square; the canvas is left untouched.
    pub fn rotate90(&mut self) -> SpriteResult<()> {
        self.apply(Transform::Rotate { quarter_turns: 1 })
    }

    /// Apply a transform, checking its preconditions before touching any plane.
    pub fn apply(&mut self, transform: Transform) -> SpriteResult<()> {
        match transform {
            Transform::Shift {
                direction,
                distance,
            } => self.shift(direction, distance),
            Transform::Rotate { quarter_turns } => {
                self.ensure_square("rotate")?;
                for _ in 0..quarter_turns {
                    for plane in &mut self.planes {
                        plane.rotate90_ccw();
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn ensure_square(&self, op: &str) -> SpriteResult<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(SpriteError::geometry(format!(
                "{op} requires a square canvas (got {}x{})",
                self.width, self.height
            )))
        }
    }

    /// Immutable copy of the planes for export.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            planes: self.planes.clone(),
        }
    }
}

/// Check that a `size` stencil placed at `origin` lies inside a `canvas` of the given size.
pub(crate) fn ensure_stencil_fits(
    size: (u32, u32),
    origin: (u32, u32),
    canvas: (u32, u32),
) -> SpriteResult<()> {
    let ((sw, sh), (ox, oy), (width, height)) = (size, origin, canvas);
    let fits_x = ox.checked_add(sw).is_some_and(|right| right <= width);
    let fits_y = oy.checked_add(sh).is_some_and(|bottom| bottom <= height);
    if fits_x && fits_y {
        Ok(())
    } else {
        Err(SpriteError::geometry(format!(
            "stencil {sw}x{sh} at ({ox}, {oy}) does not fit a {width}x{height} canvas"
        )))
    }
}

/// Stable 128-bit frame fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Point-in-time copy of a canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    planes: [Plane; 3],
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn planes(&self) -> &[Plane; 3] {
        &self.planes
    }

    /// Row-major `R,G,B,R,G,B,...` bytes, the layout image encoders expect.
    pub fn to_interleaved_rgb(&self) -> Vec<u8> {
        let [red, green, blue] = &self.planes;
        let mut out = Vec::with_capacity(red.as_bytes().len() * 3);
        let pixels = red
            .as_bytes()
            .iter()
            .zip(green.as_bytes())
            .zip(blue.as_bytes());
        for ((&r, &g), &b) in pixels {
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }

    pub fn to_frame(&self) -> FrameRgb {
        FrameRgb {
            width: self.width,
            height: self.height,
            data: self.to_interleaved_rgb(),
        }
    }

    pub fn fingerprint(&self) -> FrameFingerprint {
        let mut h = Xxh3::with_seed(XXH3_SEED);
        h.update(&self.width.to_le_bytes());
        h.update(&self.height.to_le_bytes());
        for plane in &self.planes {
            h.update(plane.as_bytes());
        }
        let v = h.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/raster.rs"]
mod tests;
