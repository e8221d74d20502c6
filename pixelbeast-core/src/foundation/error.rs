/// Convenience result type used across pixelbeast.
pub type BeastResult<T> = Result<T, BeastError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum BeastError {
    /// Invalid request, configuration or rule table.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unexpected failure while drawing, rasterizing, synthesizing or encoding.
    #[error("generation error: {0}")]
    Generation(String),

    /// Failure reported by an external acceleration backend.
    ///
    /// The batch orchestrator recovers from these locally; they never reach the caller of
    /// [`crate::Engine::generate`].
    #[error("external generator error: {0}")]
    External(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BeastError {
    /// Build a [`BeastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BeastError::Generation`] value.
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Build a [`BeastError::External`] value.
    pub fn external(msg: impl Into<String>) -> Self {
        Self::External(msg.into())
    }

    /// Build a [`BeastError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
