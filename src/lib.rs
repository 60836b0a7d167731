// modules
pub mod ai;
pub mod constants;
pub mod document;
pub mod error;
pub mod execution;
pub mod logger;
pub mod selector;

#[cfg(test)]
pub mod test;

pub use ai::error::AiError;
pub use ai::traits::chat::{
    ChatCallback, ChatMessage, ChatModelProvider, ChatResponse, MessageRole, MessageType,
    ModelDetails,
};
pub use ai::traits::stoppable::Stoppable;
pub use document::codec::{decode, encode};
pub use document::error::DocumentError;
pub use document::output::{CellOutput, OutputItem, OutputValue};
pub use document::types::{
    CellData, CellKind, ContextItem, ModelRef, NotebookData, NotebookMetadata,
};
pub use error::{AppError, Result};
pub use execution::controller::{CellRun, NotebookController};
pub use execution::host::{CellExecution, DocumentHost, NotebookUi};
pub use selector::{select_model, show_model_selector};
