use thiserror::Error;

/// Errors raised by the document layer.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Serializing a notebook (or one of its output entries) failed.
    #[error("failed to serialize notebook: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The host refused or failed to apply a metadata edit.
    #[error("metadata edit rejected by host: {0}")]
    EditRejected(String),
}
