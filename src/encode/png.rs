use std::path::{Path, PathBuf};

use image::ImageEncoder as _;

use crate::encode::sink::{FrameRgb, FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SpriteError, SpriteResult};

/// External image encoding capability: interleaved RGB8 in, encoded file bytes out.
pub trait ImageEncoder: Send {
    /// File extension (without dot) for the produced bytes.
    fn extension(&self) -> &'static str;

    /// Encode `width x height` row-major `R,G,B` bytes.
    fn encode(&self, width: u32, height: u32, rgb: &[u8]) -> SpriteResult<Vec<u8>>;
}

/// PNG encoder backed by the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn encode(&self, width: u32, height: u32, rgb: &[u8]) -> SpriteResult<Vec<u8>> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(SpriteError::encode(format!(
                "png encode: {width}x{height} RGB frame needs {expected} bytes, got {}",
                rgb.len()
            )));
        }

        let mut out = Vec::new();
        image::codecs::png::PngEncoder::new(&mut out)
            .write_image(rgb, width, height, image::ExtendedColorType::Rgb8)
            .map_err(|e| SpriteError::encode(format!("png encode: {e}")))?;
        Ok(out)
    }
}

/// Writes every frame to `<dir>/<prefix>_<index>.<ext>`.
pub struct DirSink {
    dir: PathBuf,
    prefix: String,
    encoder: Box<dyn ImageEncoder>,
    written: Vec<PathBuf>,
}

impl std::fmt::Debug for DirSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirSink")
            .field("dir", &self.dir)
            .field("prefix", &self.prefix)
            .field("written", &self.written.len())
            .finish_non_exhaustive()
    }
}

impl DirSink {
    /// PNG frames named `<prefix>_0.png`, `<prefix>_1.png`, ...
    pub fn png(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self::with_encoder(dir, prefix, Box::new(PngEncoder))
    }

    pub fn with_encoder(
        dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        encoder: Box<dyn ImageEncoder>,
    ) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            encoder,
            written: Vec::new(),
        }
    }

    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!(
            "{}_{}.{}",
            self.prefix,
            idx.0,
            self.encoder.extension()
        ))
    }

    /// Files written since the last `begin`, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for DirSink {
    fn begin(&mut self, _cfg: SinkConfig) -> SpriteResult<()> {
        ensure_dir(&self.dir)?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> SpriteResult<()> {
        let bytes = self
            .encoder
            .encode(frame.width, frame.height, &frame.data)
            .map_err(|e| match e {
                SpriteError::Encode(msg) => {
                    SpriteError::encode(format!("frame {}: {msg}", idx.0))
                }
                other => other,
            })?;

        let path = self.frame_path(idx);
        std::fs::write(&path, bytes).map_err(|e| {
            SpriteError::encode(format!("frame {}: write '{}': {e}", idx.0, path.display()))
        })?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> SpriteResult<()> {
        Ok(())
    }
}

/// Create `dir` (and parents) if needed.
pub fn ensure_dir(dir: &Path) -> SpriteResult<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| {
        SpriteError::encode(format!("create output dir '{}': {e}", dir.display()))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
