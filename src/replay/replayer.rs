use crate::canvas::raster::{CanvasConfig, FrameFingerprint};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::engine::sprite_engine::Engine;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::history::movement::Movement;

/// Summary of a completed replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayReport {
    /// Frames pushed to the sink; always `journal.len() + 1`.
    pub frames: u64,
    /// Fingerprint of every pushed frame, in order.
    pub fingerprints: Vec<FrameFingerprint>,
}

/// Rebuild the animation described by `journal` on a fresh engine.
///
/// Frame 0 is the initial state; frame `i + 1` is the state after dispatching `journal[i]`
/// through the same public operation that produced it. The journal is only read, so a failed
/// replay can simply be run again.
///
/// # Errors
///
/// Stops at the first geometry or sink error. Frames already pushed stay where the sink put
/// them and `end` is not called.
#[tracing::instrument(skip_all, fields(steps = journal.len()))]
pub fn replay_all(
    journal: &[Movement],
    config: &CanvasConfig,
    sink: &mut dyn FrameSink,
) -> SpriteResult<ReplayReport> {
    let mut engine = Engine::new(config.clone())?;
    let frame_count = journal.len() as u64 + 1;

    sink.begin(SinkConfig {
        width: config.width,
        height: config.height,
        frame_count,
    })?;

    let mut fingerprints = Vec::with_capacity(journal.len() + 1);
    emit(&engine, FrameIndex(0), sink, &mut fingerprints)?;

    for (step, &m) in journal.iter().enumerate() {
        engine.dispatch(m).map_err(|e| match e {
            SpriteError::InvalidGeometry(msg) => {
                SpriteError::geometry(format!("replay step {step} ({m}): {msg}"))
            }
            other => other,
        })?;
        emit(&engine, FrameIndex(step as u64 + 1), sink, &mut fingerprints)?;
    }

    sink.end()?;
    tracing::debug!(frames = frame_count, "replay complete");

    Ok(ReplayReport {
        frames: frame_count,
        fingerprints,
    })
}

fn emit(
    engine: &Engine,
    idx: FrameIndex,
    sink: &mut dyn FrameSink,
    fingerprints: &mut Vec<FrameFingerprint>,
) -> SpriteResult<()> {
    let snap = engine.snapshot();
    sink.push_frame(idx, &snap.to_frame())?;
    fingerprints.push(snap.fingerprint());
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/replay/replayer.rs"]
mod tests;
