use async_trait::async_trait;

use crate::document::error::DocumentError;
use crate::document::output::CellOutput;
use crate::document::types::NotebookMetadata;

/// Execution-lifecycle hooks for a single cell run.
///
/// A handle is owned exclusively by one run; the host behind it keeps the
/// displayed cell state in step with the calls it receives.
pub trait CellExecution: Send {
    /// Marks the run started, with its order number and a wall-clock
    /// millisecond timestamp.
    fn start(&mut self, order: u32, started_at: i64);

    /// Replaces the cell's displayed output wholesale.
    fn replace_output(&mut self, output: CellOutput);

    /// Marks the run ended. Called exactly once, success or not.
    fn end(&mut self, success: bool, ended_at: i64);
}

/// Handle on the active notebook document.
#[async_trait]
pub trait DocumentHost: Send + Sync {
    /// A snapshot of the document's out-of-band metadata.
    fn metadata(&self) -> NotebookMetadata;

    /// Applies a metadata edit through the host.
    async fn update_metadata(&self, metadata: NotebookMetadata) -> Result<(), DocumentError>;
}

/// Transient host UI surface: a single-choice picker and notices.
#[async_trait]
pub trait NotebookUi: Send + Sync {
    /// Shows a single-choice picker over `entries`; resolves to the chosen
    /// index, or `None` when the user dismisses it.
    async fn pick(&self, entries: &[String]) -> Option<usize>;

    /// Shows an informational notice.
    fn info(&self, message: &str);

    /// Shows an error notice.
    fn error(&self, message: &str);
}
