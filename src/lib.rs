//! spritelog keeps an animated raster sprite and a durable journal of everything done to it.
//!
//! # Pipeline overview
//!
//! 1. **Build**: `SpriteManifest -> CanvasConfig -> Engine` (background fill + stencil stamp)
//! 2. **Operate**: `move_*`, `rotate`, `undo`, `redo`, `repeat` mutate the [`Canvas`] and
//!    update the [`History`] (journal, action stack, undone stack) as one step
//! 3. **Persist** (optional): [`JournalFile`] stores the manifest and journal as JSON
//! 4. **Replay**: [`replay_all`] re-dispatches the journal on a fresh engine and pushes one
//!    frame per step into a [`FrameSink`] (PNG files via [`DirSink`], or memory)
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same journal and config always produce the same frames.
//! - **No partial updates**: operations validate before mutating; a failure changes nothing.
//! - **No IO in the engine**: stencil files are loaded up front by [`SpriteManifest::prepare`].
#![forbid(unsafe_code)]

mod canvas;
mod encode;
mod engine;
mod foundation;
mod history;
mod replay;
mod session;

pub use canvas::plane::Plane;
pub use canvas::raster::{Canvas, CanvasConfig, FrameFingerprint, Snapshot, Transform};
pub use canvas::stencil::{Stencil, StencilSource};
pub use encode::png::{DirSink, ImageEncoder, PngEncoder, ensure_dir};
pub use encode::sink::{FrameRgb, FrameSink, InMemorySink, SinkConfig};
pub use engine::dispatch::{Handler, handler_for};
pub use engine::script::{parse_command, parse_script, run_script};
pub use engine::sprite_engine::Engine;
pub use foundation::core::{Direction, FrameIndex, Rgb8};
pub use foundation::error::{SpriteError, SpriteResult};
pub use history::journal::History;
pub use history::movement::{Movement, MovementKind};
pub use replay::replayer::{ReplayReport, replay_all};
pub use session::manifest::SpriteManifest;
pub use session::sprite_session::{JournalFile, SpriteSession};
