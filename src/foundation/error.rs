/// Convenience result type used across spritelog.
pub type SpriteResult<T> = Result<T, SpriteError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Undo, redo and repeat on empty history are not errors; they are silent no-ops.
#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    /// Canvas geometry precondition violated (zero size, stencil out of bounds, non-square rotate).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The image encoder or frame sink could not produce or persist a frame.
    #[error("encode failure: {0}")]
    Encode(String),

    /// Invalid user-provided manifest, script or journal data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpriteError {
    /// Build a [`SpriteError::InvalidGeometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Build a [`SpriteError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SpriteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpriteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
