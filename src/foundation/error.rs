/// Crate-wide result alias.
pub type SkyResult<T> = Result<T, SkyError>;

/// Crate-wide error type.
///
/// The taxonomy is deliberately narrow: the engine performs no I/O or parsing,
/// so almost everything that can go wrong is either construction-time misuse
/// (`Validation`) or a raster/presenter failure (`Render`).
#[derive(thiserror::Error, Debug)]
pub enum SkyError {
    /// Construction-time misuse (bad fps, bad range).
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization or frame presentation failure.
    #[error("render error: {0}")]
    Render(String),

    /// Any other wrapped error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SkyError {
    /// Build a [`SkyError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SkyError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
