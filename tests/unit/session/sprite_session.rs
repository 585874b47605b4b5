use super::*;
use crate::encode::sink::InMemorySink;
use crate::engine::script::{parse_script, run_script};
use crate::foundation::core::Direction;
use crate::history::movement::MovementKind;

fn small_manifest() -> SpriteManifest {
    SpriteManifest {
        width: 40,
        height: 40,
        origin: (4, 4),
        stencil: crate::canvas::stencil::StencilSource::Builtin { scale: 2 },
        ..SpriteManifest::default()
    }
}

fn scripted_session() -> SpriteSession {
    let mut s = SpriteSession::new(small_manifest(), ".").unwrap();
    let script = "right 500\nrotate\nundo\nredo\nrepeat\ndown 13\nundo\n";
    run_script(s.engine_mut(), &parse_script(script).unwrap()).unwrap();
    s
}

#[test]
fn journal_file_json_shape() {
    let file = JournalFile {
        manifest: small_manifest(),
        journal: vec![
            Movement::shift(Direction::Right, 5),
            Movement::marker(MovementKind::Undo),
        ],
    };
    let mut buf = Vec::new();
    file.to_writer(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains(r#""kind": "shift_right""#));
    assert!(text.contains(r##""background": "#5C94FC""##));

    let back = JournalFile::from_reader(text.as_bytes()).unwrap();
    assert_eq!(back, file);
}

#[test]
fn malformed_journal_is_a_serde_error() {
    let err = JournalFile::from_reader(&b"{\"manifest\": 3}"[..]).unwrap_err();
    assert!(matches!(err, SpriteError::Serde(_)));

    let err = JournalFile::from_path(Path::new("target/definitely/missing.json")).unwrap_err();
    assert!(err.to_string().contains("open journal"));
}

#[test]
fn save_then_open_restores_engine_state() {
    let live = scripted_session();
    let path = PathBuf::from("target")
        .join("session_roundtrip")
        .join("journal.json");
    live.save(&path).unwrap();

    let restored = SpriteSession::open(&path).unwrap();
    assert_eq!(restored.manifest(), live.manifest());
    assert_eq!(restored.engine().canvas(), live.engine().canvas());
    assert_eq!(restored.engine().history(), live.engine().history());
}

#[test]
fn saved_journal_replays_to_identical_fingerprints() {
    let live = scripted_session();
    let file = live.to_journal_file();
    assert_eq!(file.journal.len(), 7);

    let resumed = SpriteSession::resume(&file, ".").unwrap();
    let a = live.replay_into(&mut InMemorySink::new()).unwrap();
    let b = resumed.replay_into(&mut InMemorySink::new()).unwrap();
    assert_eq!(a.frames, 8);
    assert_eq!(a, b);
    assert_eq!(
        a.fingerprints.last().copied(),
        Some(live.engine().snapshot().fingerprint())
    );
}

#[test]
fn resume_drops_noop_markers_from_hand_edited_journals() {
    let file = JournalFile {
        manifest: small_manifest(),
        journal: vec![
            Movement::marker(MovementKind::Undo),
            Movement::shift(Direction::Up, 2),
            Movement::marker(MovementKind::Redo),
        ],
    };
    let s = SpriteSession::resume(&file, ".").unwrap();
    assert_eq!(s.engine().journal(), &[Movement::shift(Direction::Up, 2)]);
}

#[test]
fn journal_file_replays_every_stored_entry() {
    let file = JournalFile {
        manifest: small_manifest(),
        journal: vec![
            Movement::marker(MovementKind::Undo),
            Movement::shift(Direction::Up, 2),
            Movement::marker(MovementKind::Redo),
        ],
    };
    let mut sink = InMemorySink::new();
    let report = file.replay_into(Path::new("."), &mut sink).unwrap();

    assert_eq!(report.frames, 4);
    assert_eq!(sink.frames().len(), 4);
    // No-op entries repeat the previous frame.
    assert_eq!(report.fingerprints[0], report.fingerprints[1]);
    assert_ne!(report.fingerprints[1], report.fingerprints[2]);
    assert_eq!(report.fingerprints[2], report.fingerprints[3]);
}

#[test]
fn journal_file_replay_names_the_failing_entry() {
    let file = JournalFile {
        manifest: SpriteManifest {
            width: 40,
            height: 36,
            ..small_manifest()
        },
        journal: vec![
            Movement::shift(Direction::Left, 3),
            Movement::marker(MovementKind::Repeat),
            Movement::rotate(),
        ],
    };
    let mut sink = InMemorySink::new();
    let err = file.replay_into(Path::new("."), &mut sink).unwrap_err();

    assert!(matches!(err, SpriteError::InvalidGeometry(_)));
    assert!(err.to_string().contains("replay step 2 (rotate)"), "{err}");
    assert_eq!(sink.frames().len(), 3);
    assert!(!sink.is_finished());
}
