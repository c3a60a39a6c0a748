/// Convenience result type used across Blinkmark.
pub type BlinkmarkResult<T> = Result<T, BlinkmarkError>;

/// Top-level error taxonomy used by the blink controller APIs.
#[derive(thiserror::Error, Debug)]
pub enum BlinkmarkError {
    /// Invalid caller-provided configuration, or use of a controller whose
    /// markers were already removed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A mutating call arrived from outside the owning execution context.
    #[error("execution context error: {0}")]
    Context(String),

    /// The map surface failed to place or manage a marker.
    #[error("surface error: {0}")]
    Surface(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlinkmarkError {
    /// Build a [`BlinkmarkError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`BlinkmarkError::Context`] value.
    pub fn context(msg: impl Into<String>) -> Self {
        Self::Context(msg.into())
    }

    /// Build a [`BlinkmarkError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
