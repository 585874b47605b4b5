use std::path::Path;
use std::sync::Arc;

use crate::canvas::raster::{CanvasConfig, ensure_stencil_fits};
use crate::canvas::stencil::{Stencil, StencilSource};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{SpriteError, SpriteResult};

/// JSON-facing description of a canvas and its sprite.
///
/// This is the serializable form of [`CanvasConfig`]: the stencil is named by its source and
/// only loaded by [`SpriteManifest::prepare`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpriteManifest {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_background")]
    pub background: Rgb8,
    #[serde(default)]
    pub transparent: Rgb8,
    #[serde(default)]
    pub origin: (u32, u32),
    #[serde(default)]
    pub stencil: StencilSource,
}

fn default_background() -> Rgb8 {
    Rgb8::new(0x5C, 0x94, 0xFC)
}

impl Default for SpriteManifest {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            background: default_background(),
            transparent: Rgb8::BLACK,
            origin: (96, 96),
            stencil: StencilSource::default(),
        }
    }
}

impl SpriteManifest {
    /// Cheap checks that need no IO.
    pub fn validate(&self) -> SpriteResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SpriteError::geometry(format!(
                "canvas dimensions must be non-zero (got {}x{})",
                self.width, self.height
            )));
        }
        if let StencilSource::Builtin { scale } = self.stencil {
            if scale == 0 {
                return Err(SpriteError::validation("builtin stencil scale must be > 0"));
            }
            // Reject oversized sprites here, before anything is allocated for them.
            let size = Stencil::builtin_size(scale).ok_or_else(|| {
                SpriteError::validation(format!("builtin stencil scale {scale} is too large"))
            })?;
            ensure_stencil_fits(size, self.origin, (self.width, self.height))?;
        }
        Ok(())
    }

    /// Load the stencil (relative paths resolve against `root`) and build a [`CanvasConfig`].
    #[tracing::instrument(skip(self), fields(width = self.width, height = self.height))]
    pub fn prepare(&self, root: &Path) -> SpriteResult<CanvasConfig> {
        self.validate()?;
        let stencil = Stencil::prepare(&self.stencil, root)?;
        Ok(CanvasConfig {
            width: self.width,
            height: self.height,
            background: self.background,
            transparent: self.transparent,
            origin: self.origin,
            stencil: Arc::new(stencil),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/manifest.rs"]
mod tests;
