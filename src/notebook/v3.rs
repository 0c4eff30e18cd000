//! Upgrade of nbformat 3 documents to the version 4 layout.
//!
//! Version 3 keeps cells inside `worksheets`, has `heading` cells, stores
//! code under `input`/`prompt_number`, and keys output data by short names
//! (`text`, `png`) at the top level of each output.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Minor version written for upgraded documents.
pub const UPGRADED_MINOR: u64 = 5;

const MIME_KEYS: &[(&str, &str)] = &[
    ("text", "text/plain"),
    ("html", "text/html"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpeg", "image/jpeg"),
    ("latex", "text/latex"),
    ("json", "application/json"),
    ("javascript", "application/javascript"),
];

/// Rewrite a version 3 document in place as version 4.
pub fn upgrade(document: &mut Value) -> Result<()> {
    let Some(nb) = document.as_object_mut() else {
        return Err(Error::InvalidNotebook("top level is not an object".to_string()));
    };

    let orig_minor = nb.remove("nbformat_minor").unwrap_or(Value::from(0));
    let metadata = nb
        .entry("metadata")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| Error::InvalidNotebook("metadata is not an object".to_string()))?;
    metadata.remove("name");
    metadata.remove("signature");
    metadata.insert("orig_nbformat".to_string(), Value::from(3));
    metadata.insert("orig_nbformat_minor".to_string(), orig_minor);

    let mut cells = Vec::new();
    if let Some(worksheets) = nb.remove("worksheets") {
        let Value::Array(worksheets) = worksheets else {
            return Err(Error::InvalidNotebook("worksheets is not a list".to_string()));
        };
        for worksheet in worksheets {
            let Some(Value::Array(ws_cells)) = worksheet.get("cells").cloned() else {
                return Err(Error::InvalidNotebook("worksheet without cells".to_string()));
            };
            for cell in ws_cells {
                let Value::Object(cell) = cell else {
                    return Err(Error::InvalidNotebook("cell is not an object".to_string()));
                };
                cells.push(Value::Object(upgrade_cell(cell, cells.len())));
            }
        }
    }

    nb.insert("nbformat".to_string(), Value::from(4));
    nb.insert("nbformat_minor".to_string(), Value::from(UPGRADED_MINOR));
    nb.insert("cells".to_string(), Value::Array(cells));
    Ok(())
}

fn upgrade_cell(mut cell: Map<String, Value>, index: usize) -> Map<String, Value> {
    if !cell.get("metadata").is_some_and(Value::is_object) {
        cell.insert("metadata".to_string(), Value::Object(Map::new()));
    }
    // Version 4.5 requires ids; derive them from position so output is stable.
    cell.insert("id".to_string(), Value::from(format!("cell-{index}")));

    let cell_type = cell
        .get("cell_type")
        .and_then(Value::as_str)
        .map(str::to_string);
    match cell_type.as_deref() {
        Some("code") => {
            cell.remove("language");
            if let Some(collapsed) = cell.remove("collapsed") {
                if let Some(Value::Object(metadata)) = cell.get_mut("metadata") {
                    metadata.insert("collapsed".to_string(), collapsed);
                }
            }
            let source = cell.remove("input").unwrap_or(Value::from(""));
            cell.insert("source".to_string(), source);
            let count = cell.remove("prompt_number").unwrap_or(Value::Null);
            cell.insert("execution_count".to_string(), count);
            let outputs = match cell.remove("outputs") {
                Some(Value::Array(outputs)) => outputs.into_iter().map(upgrade_output).collect(),
                _ => Vec::new(),
            };
            cell.insert("outputs".to_string(), Value::Array(outputs));
        }
        Some("heading") => {
            let level = cell.remove("level").and_then(|l| l.as_u64()).unwrap_or(1);
            let text = source_text(cell.get("source"));
            let single_line = text.lines().collect::<Vec<_>>().join(" ");
            let hashes = "#".repeat(level as usize);
            cell.insert("cell_type".to_string(), Value::from("markdown"));
            cell.insert("source".to_string(), Value::from(format!("{hashes} {single_line}")));
        }
        Some("html") => {
            cell.insert("cell_type".to_string(), Value::from("markdown"));
        }
        _ => {}
    }
    cell
}

fn upgrade_output(output: Value) -> Value {
    let Value::Object(mut output) = output else {
        return output;
    };

    let kind = output
        .get("output_type")
        .and_then(Value::as_str)
        .map(str::to_string);
    match kind.as_deref() {
        Some(kind @ ("pyout" | "display_data")) => {
            let is_result = kind == "pyout";
            let mut metadata = match output.remove("metadata") {
                Some(Value::Object(m)) => m,
                _ => Map::new(),
            };
            let count = output.remove("prompt_number");
            let output_type = output.remove("output_type");

            // Everything left is mime data.
            let mut data = to_mime_keys(std::mem::take(&mut output));
            let parsed_json = match data.get("application/json") {
                Some(Value::String(json)) => serde_json::from_str::<Value>(json).ok(),
                _ => None,
            };
            if let Some(parsed) = parsed_json {
                data.insert("application/json".to_string(), parsed);
            }
            metadata = to_mime_keys(metadata);

            if is_result {
                output.insert("output_type".to_string(), Value::from("execute_result"));
                output.insert("execution_count".to_string(), count.unwrap_or(Value::Null));
            } else if let Some(output_type) = output_type {
                output.insert("output_type".to_string(), output_type);
            }
            output.insert("metadata".to_string(), Value::Object(metadata));
            output.insert("data".to_string(), Value::Object(data));
        }
        Some("pyerr") => {
            output.insert("output_type".to_string(), Value::from("error"));
        }
        Some("stream") => {
            let name = output.remove("stream").unwrap_or(Value::from("stdout"));
            output.insert("name".to_string(), name);
        }
        _ => {}
    }
    Value::Object(output)
}

fn to_mime_keys(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| {
            let mime = MIME_KEYS
                .iter()
                .find(|(short, _)| *short == key)
                .map_or(key, |(_, mime)| mime.to_string());
            (mime, value)
        })
        .collect()
}

fn source_text(source: Option<&Value>) -> String {
    match source {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(lines)) => lines.iter().filter_map(Value::as_str).collect(),
        _ => String::new(),
    }
}
