use thiserror::Error;

/// Errors surfaced by the model capability.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("model discovery failed: {details}")]
    DiscoveryFailed { details: String },

    #[error("chat request to {vendor}/{model} failed: {details}")]
    RequestFailed {
        vendor: String,
        model: String,
        details: String,
    },

    #[error("stream processing failed: {details}")]
    StreamFailed { details: String },
}
