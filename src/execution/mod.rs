pub mod controller;
pub mod host;

pub use controller::{CellRun, NotebookController};
pub use host::{CellExecution, DocumentHost, NotebookUi};
