use crate::engine::sprite_engine::Engine;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::history::movement::{Movement, MovementKind};

/// Parse a command script: one `<command> [distance]` per line, `#` starts a comment.
///
/// Commands are the movement kind names (`shift_right 5`, `rotate`, `undo`, ...) plus the
/// short forms `right`, `down`, `left`, `up`.
pub fn parse_script(text: &str) -> SpriteResult<Vec<Movement>> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(m) = parse_command(line)
            .map_err(|e| SpriteError::validation(format!("line {}: {e}", i + 1)))?
        {
            out.push(m);
        }
    }
    Ok(out)
}

/// Parse one script line. Blank and comment-only lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Movement>, String> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };

    let word = word.to_ascii_lowercase();
    let kind = match word.as_str() {
        "right" => MovementKind::ShiftRight,
        "down" => MovementKind::ShiftDown,
        "left" => MovementKind::ShiftLeft,
        "up" => MovementKind::ShiftUp,
        other => MovementKind::ALL
            .into_iter()
            .find(|k| k.as_str() == other)
            .ok_or_else(|| format!("unknown command '{other}'"))?,
    };

    let magnitude = if kind.direction().is_some() {
        let arg = words
            .next()
            .ok_or_else(|| format!("'{word}' needs a distance"))?;
        arg.parse::<u32>()
            .map_err(|_| format!("invalid distance '{arg}' for '{word}'"))?
    } else {
        0
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument '{extra}' after '{word}'"));
    }
    Ok(Some(Movement::new(kind, magnitude)))
}

/// Dispatch every movement in order, stopping at the first error.
pub fn run_script(engine: &mut Engine, movements: &[Movement]) -> SpriteResult<()> {
    for &m in movements {
        engine.dispatch(m)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/engine/script.rs"]
mod tests;
