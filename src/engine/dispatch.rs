use crate::engine::sprite_engine::Engine;
use crate::foundation::error::SpriteResult;
use crate::history::movement::MovementKind;

/// Entry point for one movement kind; the `u32` is the journaled magnitude.
pub type Handler = fn(&mut Engine, u32) -> SpriteResult<()>;

/// Map a movement kind to the public engine operation that performs it.
///
/// Live command surfaces and replay both go through this table.
pub fn handler_for(kind: MovementKind) -> Handler {
    match kind {
        MovementKind::ShiftRight => shift_right,
        MovementKind::ShiftDown => shift_down,
        MovementKind::ShiftLeft => shift_left,
        MovementKind::ShiftUp => shift_up,
        MovementKind::Repeat => repeat,
        MovementKind::Rotate => rotate,
        MovementKind::Undo => undo,
        MovementKind::Redo => redo,
    }
}

fn shift_right(engine: &mut Engine, distance: u32) -> SpriteResult<()> {
    engine.move_right(distance);
    Ok(())
}

fn shift_down(engine: &mut Engine, distance: u32) -> SpriteResult<()> {
    engine.move_down(distance);
    Ok(())
}

fn shift_left(engine: &mut Engine, distance: u32) -> SpriteResult<()> {
    engine.move_left(distance);
    Ok(())
}

fn shift_up(engine: &mut Engine, distance: u32) -> SpriteResult<()> {
    engine.move_up(distance);
    Ok(())
}

fn rotate(engine: &mut Engine, _: u32) -> SpriteResult<()> {
    engine.rotate()
}

fn repeat(engine: &mut Engine, _: u32) -> SpriteResult<()> {
    engine.repeat().map(drop)
}

fn undo(engine: &mut Engine, _: u32) -> SpriteResult<()> {
    engine.undo().map(drop)
}

fn redo(engine: &mut Engine, _: u32) -> SpriteResult<()> {
    engine.redo().map(drop)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/dispatch.rs"]
mod tests;
