pub mod codec;
pub mod error;
pub mod output;
pub mod types;

pub use error::DocumentError;
pub use output::{CellOutput, OutputItem, OutputValue};
pub use types::{CellData, CellKind, ContextItem, ModelRef, NotebookData, NotebookMetadata};
