use crate::history::movement::{Movement, MovementKind};

/// The journal plus the action and undone stacks of one engine.
///
/// The stacks only ever hold geometric movements. The journal holds everything, markers
/// included, in call order, and is never popped.
///
/// The `commit_*` methods only shuffle entries; the engine calls them after the matching
/// canvas mutation succeeded, so a failed mutation leaves history untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    journal: Vec<Movement>,
    actions: Vec<Movement>,
    undone: Vec<Movement>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation issued so far, oldest first.
    pub fn journal(&self) -> &[Movement] {
        &self.journal
    }

    /// Applied, undoable movements; the last element is the top.
    pub fn action_stack(&self) -> &[Movement] {
        &self.actions
    }

    /// Undone, redoable movements; the last element is the top.
    pub fn undone_stack(&self) -> &[Movement] {
        &self.undone
    }

    pub fn peek_action(&self) -> Option<Movement> {
        self.actions.last().copied()
    }

    pub fn peek_undone(&self) -> Option<Movement> {
        self.undone.last().copied()
    }

    /// Journal a fresh geometric movement and make it the top action.
    pub(crate) fn commit_movement(&mut self, m: Movement) {
        debug_assert!(m.is_geometric());
        self.journal.push(m);
        self.actions.push(m);
    }

    /// Move the top action onto the undone stack.
    pub(crate) fn commit_undo(&mut self) -> Option<Movement> {
        let m = self.actions.pop()?;
        self.journal.push(Movement::marker(MovementKind::Undo));
        self.undone.push(m);
        Some(m)
    }

    /// Move the top undone movement back onto the action stack.
    pub(crate) fn commit_redo(&mut self) -> Option<Movement> {
        let m = self.undone.pop()?;
        self.journal.push(Movement::marker(MovementKind::Redo));
        self.actions.push(m);
        Some(m)
    }

    /// Duplicate the top action. The undone stack is left alone.
    pub(crate) fn commit_repeat(&mut self) -> Option<Movement> {
        let m = self.peek_action()?;
        self.journal.push(Movement::marker(MovementKind::Repeat));
        self.actions.push(m);
        Some(m)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/journal.rs"]
mod tests;
