use thiserror::Error;

/// The single, unified error type for the crate.
///
/// Wraps all module-specific errors so callers embedding the engine handle
/// one consistent type at the surface.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Ai(#[from] crate::ai::error::AiError),

    #[error(transparent)]
    Document(#[from] crate::document::error::DocumentError),

    #[error("{message}")]
    General { message: String },
}

/// A universal Result type for surface-level fallible functions.
pub type Result<T> = std::result::Result<T, AppError>;
