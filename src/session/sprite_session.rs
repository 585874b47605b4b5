use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::encode::png::ensure_dir;
use crate::encode::sink::FrameSink;
use crate::engine::sprite_engine::Engine;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::history::movement::Movement;
use crate::replay::replayer::{ReplayReport, replay_all};
use crate::session::manifest::SpriteManifest;

/// Durable journal: the manifest that defines the initial canvas plus every movement.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JournalFile {
    pub manifest: SpriteManifest,
    #[serde(default)]
    pub journal: Vec<Movement>,
}

impl JournalFile {
    pub fn from_reader<R: Read>(r: R) -> SpriteResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SpriteError::serde(format!("parse journal JSON: {e}")))
    }

    #[tracing::instrument]
    pub fn from_path(path: &Path) -> SpriteResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open journal '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_writer<W: Write>(&self, w: W) -> SpriteResult<()> {
        serde_json::to_writer_pretty(w, self)
            .map_err(|e| SpriteError::serde(format!("write journal JSON: {e}")))
    }

    /// Replay the journal exactly as stored, one frame per entry.
    ///
    /// Unlike [`SpriteSession::open`] followed by a replay, entries that were no-ops still get
    /// their frame, and a failing entry is reported with its position in this file.
    pub fn replay_into(
        &self,
        root: &Path,
        sink: &mut dyn FrameSink,
    ) -> SpriteResult<ReplayReport> {
        let config = self.manifest.prepare(root)?;
        replay_all(&self.journal, &config, sink)
    }

    #[tracing::instrument(skip(self), fields(steps = self.journal.len()))]
    pub fn save(&self, path: &Path) -> SpriteResult<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let f = File::create(path)
            .with_context(|| format!("create journal '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        self.to_writer(&mut w)?;
        w.flush()
            .with_context(|| format!("flush journal '{}'", path.display()))?;
        Ok(())
    }
}

/// A live engine together with the manifest it was built from.
///
/// `root` is the directory relative stencil paths resolve against.
#[derive(Debug)]
pub struct SpriteSession {
    manifest: SpriteManifest,
    root: PathBuf,
    engine: Engine,
}

impl SpriteSession {
    pub fn new(manifest: SpriteManifest, root: impl Into<PathBuf>) -> SpriteResult<Self> {
        let root = root.into();
        let config = manifest.prepare(&root)?;
        let engine = Engine::new(config)?;
        Ok(Self {
            manifest,
            root,
            engine,
        })
    }

    /// Rebuild the live state of a saved journal by dispatching every movement in order.
    ///
    /// Undo/redo/repeat entries that would be no-ops leave no trace, so a hand-edited journal
    /// may come back shorter than it was written.
    pub fn resume(file: &JournalFile, root: impl Into<PathBuf>) -> SpriteResult<Self> {
        let mut session = Self::new(file.manifest.clone(), root)?;
        for &m in &file.journal {
            session.engine.dispatch(m)?;
        }
        Ok(session)
    }

    /// [`Self::resume`] from a journal on disk, resolving paths against its directory.
    pub fn open(path: &Path) -> SpriteResult<Self> {
        let file = JournalFile::from_path(path)?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Self::resume(&file, root)
    }

    pub fn manifest(&self) -> &SpriteManifest {
        &self.manifest
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn to_journal_file(&self) -> JournalFile {
        JournalFile {
            manifest: self.manifest.clone(),
            journal: self.engine.journal().to_vec(),
        }
    }

    pub fn save(&self, path: &Path) -> SpriteResult<()> {
        self.to_journal_file().save(path)
    }

    pub fn replay_into(&self, sink: &mut dyn FrameSink) -> SpriteResult<ReplayReport> {
        self.engine.replay_into(sink)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sprite_session.rs"]
mod tests;
