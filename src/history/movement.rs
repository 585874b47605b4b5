use crate::canvas::raster::Transform;
use crate::foundation::core::Direction;

/// Closed set of operation kinds an engine can journal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    ShiftRight,
    ShiftDown,
    ShiftLeft,
    ShiftUp,
    Repeat,
    Rotate,
    Undo,
    Redo,
}

impl MovementKind {
    pub const ALL: [Self; 8] = [
        Self::ShiftRight,
        Self::ShiftDown,
        Self::ShiftLeft,
        Self::ShiftUp,
        Self::Repeat,
        Self::Rotate,
        Self::Undo,
        Self::Redo,
    ];

    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Right => Self::ShiftRight,
            Direction::Down => Self::ShiftDown,
            Direction::Left => Self::ShiftLeft,
            Direction::Up => Self::ShiftUp,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::ShiftRight => Some(Direction::Right),
            Self::ShiftDown => Some(Direction::Down),
            Self::ShiftLeft => Some(Direction::Left),
            Self::ShiftUp => Some(Direction::Up),
            Self::Repeat | Self::Rotate | Self::Undo | Self::Redo => None,
        }
    }

    /// Shifts and rotation; the only kinds allowed on the action and undone stacks.
    pub fn is_geometric(self) -> bool {
        self.direction().is_some() || self == Self::Rotate
    }

    /// Journal-only markers whose effect is derived from history at dispatch time.
    pub fn is_marker(self) -> bool {
        matches!(self, Self::Repeat | Self::Undo | Self::Redo)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShiftRight => "shift_right",
            Self::ShiftDown => "shift_down",
            Self::ShiftLeft => "shift_left",
            Self::ShiftUp => "shift_up",
            Self::Repeat => "repeat",
            Self::Rotate => "rotate",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

#[derive(serde::Deserialize)]
struct RawMovement {
    kind: MovementKind,
    #[serde(default)]
    magnitude: u32,
}

impl From<RawMovement> for Movement {
    fn from(raw: RawMovement) -> Self {
        Self::new(raw.kind, raw.magnitude)
    }
}

/// One journaled operation. Immutable once built.
///
/// Only shifts keep a magnitude; rotation and markers always carry 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawMovement")]
pub struct Movement {
    kind: MovementKind,
    magnitude: u32,
}

impl Movement {
    pub fn new(kind: MovementKind, magnitude: u32) -> Self {
        let magnitude = if kind.direction().is_some() {
            magnitude
        } else {
            0
        };
        Self { kind, magnitude }
    }

    pub fn shift(direction: Direction, distance: u32) -> Self {
        Self::new(MovementKind::from_direction(direction), distance)
    }

    pub fn rotate() -> Self {
        Self::new(MovementKind::Rotate, 0)
    }

    pub fn marker(kind: MovementKind) -> Self {
        debug_assert!(kind.is_marker());
        Self::new(kind, 0)
    }

    pub fn kind(self) -> MovementKind {
        self.kind
    }

    pub fn magnitude(self) -> u32 {
        self.magnitude
    }

    pub fn is_geometric(self) -> bool {
        self.kind.is_geometric()
    }

    /// Transform that re-applies this movement; `None` for markers.
    pub fn forward(self) -> Option<Transform> {
        match self.kind.direction() {
            Some(direction) => Some(Transform::Shift {
                direction,
                distance: self.magnitude,
            }),
            None if self.kind == MovementKind::Rotate => {
                Some(Transform::Rotate { quarter_turns: 1 })
            }
            None => None,
        }
    }

    /// Transform that cancels this movement; `None` for markers.
    ///
    /// Only a forward quarter turn exists, so rotation is undone with three more.
    pub fn inverse(self) -> Option<Transform> {
        match self.forward()? {
            Transform::Shift {
                direction,
                distance,
            } => Some(Transform::Shift {
                direction: direction.opposite(),
                distance,
            }),
            Transform::Rotate { quarter_turns } => Some(Transform::Rotate {
                quarter_turns: (4 - quarter_turns % 4) % 4,
            }),
        }
    }
}

impl std::fmt::Display for Movement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind.direction().is_some() {
            write!(f, "{}({})", self.kind.as_str(), self.magnitude)
        } else {
            f.write_str(self.kind.as_str())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/movement.rs"]
mod tests;
