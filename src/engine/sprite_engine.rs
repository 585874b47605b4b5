use crate::canvas::raster::{Canvas, CanvasConfig, Snapshot};
use crate::encode::sink::FrameSink;
use crate::engine::dispatch::handler_for;
use crate::foundation::core::Direction;
use crate::foundation::error::SpriteResult;
use crate::history::journal::History;
use crate::history::movement::Movement;
use crate::replay::replayer::{ReplayReport, replay_all};

/// A canvas plus its history; the public operation surface.
///
/// Every operation checks its preconditions and mutates the canvas before touching history,
/// so an error leaves both exactly as they were.
#[derive(Clone, Debug)]
pub struct Engine {
    config: CanvasConfig,
    canvas: Canvas,
    history: History,
}

impl Engine {
    /// Build the initial canvas from `config` with empty history.
    #[tracing::instrument(skip(config), fields(width = config.width, height = config.height))]
    pub fn new(config: CanvasConfig) -> SpriteResult<Self> {
        let canvas = Canvas::new(&config)?;
        Ok(Self {
            config,
            canvas,
            history: History::new(),
        })
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn journal(&self) -> &[Movement] {
        self.history.journal()
    }

    pub fn action_stack(&self) -> &[Movement] {
        self.history.action_stack()
    }

    pub fn undone_stack(&self) -> &[Movement] {
        self.history.undone_stack()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.canvas.snapshot()
    }

    pub fn move_right(&mut self, distance: u32) {
        self.shift(Direction::Right, distance);
    }

    pub fn move_down(&mut self, distance: u32) {
        self.shift(Direction::Down, distance);
    }

    pub fn move_left(&mut self, distance: u32) {
        self.shift(Direction::Left, distance);
    }

    pub fn move_up(&mut self, distance: u32) {
        self.shift(Direction::Up, distance);
    }

    /// Circular shift, journaled and pushed as an undoable action.
    pub fn shift(&mut self, direction: Direction, distance: u32) {
        let m = Movement::shift(direction, distance);
        self.canvas.shift(direction, distance);
        self.history.commit_movement(m);
        self.trace_commit("move", m);
    }

    /// Quarter turn counter-clockwise, journaled and pushed as an undoable action.
    ///
    /// # Errors
    ///
    /// [`crate::SpriteError::InvalidGeometry`] on a non-square canvas; nothing is recorded.
    pub fn rotate(&mut self) -> SpriteResult<()> {
        let m = Movement::rotate();
        self.canvas.rotate90()?;
        self.history.commit_movement(m);
        self.trace_commit("rotate", m);
        Ok(())
    }

    /// Revert the top action. Returns `false` (and records nothing) when there is none.
    pub fn undo(&mut self) -> SpriteResult<bool> {
        let Some(m) = self.history.peek_action() else {
            tracing::trace!("undo: action stack empty");
            return Ok(false);
        };
        if let Some(inverse) = m.inverse() {
            self.canvas.apply(inverse)?;
        }
        self.history.commit_undo();
        self.trace_commit("undo", m);
        Ok(true)
    }

    /// Re-apply the most recently undone action. Returns `false` when there is none.
    pub fn redo(&mut self) -> SpriteResult<bool> {
        let Some(m) = self.history.peek_undone() else {
            tracing::trace!("redo: undone stack empty");
            return Ok(false);
        };
        if let Some(forward) = m.forward() {
            self.canvas.apply(forward)?;
        }
        self.history.commit_redo();
        self.trace_commit("redo", m);
        Ok(true)
    }

    /// Apply the top action once more and push a copy of it. Returns `false` when there is none.
    pub fn repeat(&mut self) -> SpriteResult<bool> {
        let Some(m) = self.history.peek_action() else {
            tracing::trace!("repeat: action stack empty");
            return Ok(false);
        };
        if let Some(forward) = m.forward() {
            self.canvas.apply(forward)?;
        }
        self.history.commit_repeat();
        self.trace_commit("repeat", m);
        Ok(true)
    }

    /// Run the public operation that corresponds to `m.kind()`.
    ///
    /// Markers re-derive their effect from this engine's own history; their magnitude is ignored.
    pub fn dispatch(&mut self, m: Movement) -> SpriteResult<()> {
        handler_for(m.kind())(self, m.magnitude())
    }

    /// Replay this engine's journal from the initial state into `sink`.
    pub fn replay_into(&self, sink: &mut dyn FrameSink) -> SpriteResult<ReplayReport> {
        replay_all(self.journal(), &self.config, sink)
    }

    fn trace_commit(&self, op: &'static str, m: Movement) {
        tracing::debug!(
            op,
            movement = %m,
            journal = self.history.journal().len(),
            actions = self.history.action_stack().len(),
            undone = self.history.undone_stack().len(),
            "committed"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/sprite_engine.rs"]
mod tests;
