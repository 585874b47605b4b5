use std::sync::Arc;

use super::*;
use crate::canvas::raster::Snapshot;
use crate::canvas::stencil::Stencil;
use crate::encode::sink::{FrameRgb, InMemorySink};
use crate::foundation::core::Rgb8;

fn config(width: u32, height: u32) -> CanvasConfig {
    CanvasConfig {
        width,
        height,
        background: Rgb8::new(40, 50, 60),
        transparent: Rgb8::BLACK,
        origin: (1, 1),
        stencil: Arc::new(Stencil::builtin(1).unwrap()),
    }
}

/// Run a fixed sequence live, returning the engine and the state after every call.
fn live_session() -> (Engine, Vec<Snapshot>) {
    let ops: [fn(&mut Engine); 9] = [
        |e| e.move_right(500),
        |e| e.rotate().unwrap(),
        |e| assert!(e.undo().unwrap()),
        |e| assert!(e.redo().unwrap()),
        |e| assert!(e.repeat().unwrap()),
        |e| e.move_up(7),
        |e| assert!(e.undo().unwrap()),
        |e| assert!(e.repeat().unwrap()),
        |e| e.move_left(3),
    ];

    let mut e = Engine::new(config(20, 20)).unwrap();
    let mut states = vec![e.snapshot()];
    for op in ops {
        op(&mut e);
        states.push(e.snapshot());
    }
    (e, states)
}

#[test]
fn replay_reproduces_live_states_frame_by_frame() {
    let (e, states) = live_session();
    assert_eq!(e.journal().len(), 9);

    let mut sink = InMemorySink::new();
    let report = replay_all(e.journal(), e.config(), &mut sink).unwrap();

    assert_eq!(report.frames, 10);
    assert_eq!(report.fingerprints.len(), 10);
    assert_eq!(sink.frames().len(), 10);
    assert!(sink.is_finished());
    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 20,
            height: 20,
            frame_count: 10
        })
    );

    for (i, ((idx, frame), live)) in sink.frames().iter().zip(&states).enumerate() {
        assert_eq!(*idx, FrameIndex(i as u64));
        assert_eq!(frame, &live.to_frame(), "frame {i}");
        assert_eq!(report.fingerprints[i], live.fingerprint(), "frame {i}");
    }
}

#[test]
fn replay_of_empty_journal_emits_initial_frame() {
    let cfg = config(20, 20);
    let mut sink = InMemorySink::new();
    let report = replay_all(&[], &cfg, &mut sink).unwrap();

    assert_eq!(report.frames, 1);
    let initial = Engine::new(cfg).unwrap().snapshot();
    assert_eq!(sink.frames()[0].1, initial.to_frame());
}

#[test]
fn replay_is_deterministic_and_leaves_source_untouched() {
    let (e, _) = live_session();
    let journal_before = e.journal().to_vec();
    let history_before = e.history().clone();

    let a = e.replay_into(&mut InMemorySink::new()).unwrap();
    let b = e.replay_into(&mut InMemorySink::new()).unwrap();
    assert_eq!(a, b);
    assert_eq!(e.journal(), journal_before.as_slice());
    assert_eq!(e.history(), &history_before);
}

/// Accepts `limit` frames, then fails.
#[derive(Default)]
struct FlakySink {
    limit: usize,
    frames: Vec<FrameRgb>,
    ended: bool,
}

impl FrameSink for FlakySink {
    fn begin(&mut self, _cfg: SinkConfig) -> SpriteResult<()> {
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgb) -> SpriteResult<()> {
        if self.frames.len() >= self.limit {
            return Err(SpriteError::encode(format!("frame {}: device full", idx.0)));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> SpriteResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[test]
fn encoder_failure_aborts_but_keeps_produced_frames() {
    let (e, states) = live_session();
    let journal_before = e.journal().to_vec();

    let mut sink = FlakySink {
        limit: 4,
        ..FlakySink::default()
    };
    let err = e.replay_into(&mut sink).unwrap_err();
    assert!(matches!(err, SpriteError::Encode(_)));
    assert!(err.to_string().contains("frame 4"));
    assert!(!sink.ended);
    assert_eq!(sink.frames.len(), 4);
    for (frame, live) in sink.frames.iter().zip(&states) {
        assert_eq!(frame, &live.to_frame());
    }
    assert_eq!(e.journal(), journal_before.as_slice());

    // Running again from scratch with a healthy sink completes.
    sink.limit = usize::MAX;
    let report = e.replay_into(&mut sink).unwrap();
    assert_eq!(report.frames, 10);
    assert_eq!(sink.frames.len(), 10);
    assert!(sink.ended);
}

#[test]
fn rotate_in_journal_fails_on_non_square_config() {
    let journal = [
        Movement::shift(crate::foundation::core::Direction::Down, 2),
        Movement::rotate(),
    ];
    let mut sink = InMemorySink::new();
    let err = replay_all(&journal, &config(20, 24), &mut sink).unwrap_err();

    assert!(matches!(err, SpriteError::InvalidGeometry(_)));
    assert!(err.to_string().contains("replay step 1 (rotate)"));
    assert_eq!(sink.frames().len(), 2);
    assert!(!sink.is_finished());
}
