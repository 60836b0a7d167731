use serde::{Deserialize, Serialize};

use crate::constants::DOCUMENT_VERSION;

use super::output::OutputValue;

/// Identity of a chat model, as stored in document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    pub vendor: String,
    pub id: String,
}

/// A reserved context entry. Round-tripped verbatim, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextItem {
    pub r#type: String,
    pub content: String,
}

/// The persisted JSON shape of a notebook document.
///
/// `cells` is required: a document without it fails deserialization and is
/// replaced wholesale by the default document during decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNotebook {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelRef>,
    #[serde(default)]
    pub context: Vec<ContextItem>,
    pub cells: Vec<RawCell>,
}

impl Default for RawNotebook {
    fn default() -> Self {
        Self {
            version: default_version(),
            model: None,
            context: Vec::new(),
            cells: Vec::new(),
        }
    }
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

/// One persisted cell.
///
/// `content` must be present (an empty string is fine); a cell missing it
/// invalidates the whole document. `outputs` entries are serialized output
/// records, each a JSON document of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCell {
    pub r#type: String,
    pub content: String,
    #[serde(default)]
    pub is_code: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,
}

/// Whether the host treats a cell as executable or as display markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Markup,
    Code,
}

/// A host-displayable cell record produced by the codec.
#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    pub kind: CellKind,
    /// The language/content-type tag (the raw cell's `type`).
    pub language: String,
    /// The cell body.
    pub value: String,
    /// Parsed output records, absent when the stored cell carried none.
    pub outputs: Option<Vec<OutputValue>>,
}

impl CellData {
    pub fn new(kind: CellKind, value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            kind,
            language: language.into(),
            value: value.into(),
            outputs: None,
        }
    }
}

/// Out-of-band document fields stored alongside the cell list.
#[derive(Debug, Clone, PartialEq)]
pub struct NotebookMetadata {
    pub version: String,
    pub model: Option<ModelRef>,
    pub context: Vec<ContextItem>,
}

impl Default for NotebookMetadata {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            model: None,
            context: Vec::new(),
        }
    }
}

/// The in-memory notebook: ordered cells plus metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotebookData {
    pub cells: Vec<CellData>,
    pub metadata: NotebookMetadata,
}
