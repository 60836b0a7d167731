// =================================================
// Document format
// =================================================
/// Version tag written into every persisted document.
pub const DOCUMENT_VERSION: &str = "1";

// =================================================
// Output item MIME types
// =================================================
pub const MARKDOWN_MIME: &str = "text/markdown";
pub const ERROR_MIME: &str = "application/vnd.code.notebook.error";
