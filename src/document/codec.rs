use log::error;

use super::error::DocumentError;
use super::output::OutputValue;
use super::types::{CellData, CellKind, NotebookData, NotebookMetadata, RawCell, RawNotebook};

/// Decodes persisted bytes into a notebook.
///
/// Decoding never fails: a document that does not parse, or whose cell list
/// fails validation (any cell without a non-empty `type` and a present
/// `content`), is replaced wholesale by the default empty document. A cell
/// whose stored outputs fail to parse is dropped on its own, leaving the
/// rest of the document intact. Both losses are logged, not surfaced.
pub fn decode(content: &[u8]) -> NotebookData {
    let raw = read_contents(content);
    let cells = raw.cells.into_iter().filter_map(map_raw_cell).collect();

    NotebookData {
        cells,
        metadata: NotebookMetadata {
            version: raw.version,
            model: raw.model,
            context: raw.context,
        },
    }
}

/// Encodes a notebook back to its persisted UTF-8 JSON form.
pub fn encode(notebook: &NotebookData) -> Result<Vec<u8>, DocumentError> {
    let cells = notebook
        .cells
        .iter()
        .map(map_cell)
        .collect::<Result<Vec<_>, _>>()?;

    let raw = RawNotebook {
        version: notebook.metadata.version.clone(),
        model: notebook.metadata.model.clone(),
        context: notebook.metadata.context.clone(),
        cells,
    };

    Ok(serde_json::to_vec(&raw)?)
}

fn read_contents(content: &[u8]) -> RawNotebook {
    let text = String::from_utf8_lossy(content);

    match serde_json::from_str::<RawNotebook>(&text) {
        Ok(raw) => {
            if validate_cells(&raw.cells) {
                raw
            } else {
                error!("notebook rejected: a cell is missing its type tag");
                RawNotebook::default()
            }
        }
        Err(e) => {
            error!("failed to parse notebook document: {}", e);
            RawNotebook::default()
        }
    }
}

// A missing `content` already fails deserialization of the whole document,
// so only the non-empty `type` rule is left to check here.
fn validate_cells(cells: &[RawCell]) -> bool {
    cells.iter().all(|cell| !cell.r#type.is_empty())
}

fn map_raw_cell(cell: RawCell) -> Option<CellData> {
    let outputs = match cell.outputs {
        None => None,
        Some(entries) => {
            let mut values = Vec::with_capacity(entries.len());
            for entry in entries {
                match OutputValue::parse(&entry) {
                    Ok(value) => values.push(value),
                    Err(e) => {
                        error!("dropping cell with unparsable output entry: {}", e);
                        return None;
                    }
                }
            }
            Some(values)
        }
    };

    let kind = if cell.is_code {
        CellKind::Code
    } else {
        CellKind::Markup
    };

    Some(CellData {
        kind,
        language: cell.r#type,
        value: cell.content,
        outputs,
    })
}

fn map_cell(cell: &CellData) -> Result<RawCell, DocumentError> {
    let outputs = match &cell.outputs {
        None => None,
        Some(values) => Some(
            values
                .iter()
                .map(OutputValue::to_entry)
                .collect::<Result<Vec<_>, _>>()?,
        ),
    };

    Ok(RawCell {
        r#type: cell.language.clone(),
        content: cell.value.clone(),
        is_code: cell.kind == CellKind::Code,
        outputs,
    })
}
