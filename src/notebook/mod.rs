//! Notebook documents (nbformat 4).
//!
//! Only the fields the converter touches are modelled; everything else is
//! carried through `extra` so a read-then-write cycle loses nothing.
//! Version 3 documents are upgraded on read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub mod v3;

/// Notebook format major version documents are read as.
pub const NBFORMAT: u64 = 4;

/// A decoded notebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub nbformat: u64,
    pub nbformat_minor: u64,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub cells: Vec<Cell>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Code,
    Markdown,
    Raw,
}

/// One notebook cell.
///
/// `source`, `outputs`, `execution_count`, `id` and `attachments` live in
/// `extra`; accessors below reach the ones the exporter needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Notebook {
    /// Parse notebook JSON as format version 4.
    ///
    /// Version 3 documents are upgraded; any other version is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(text)?;
        let version = value
            .get("nbformat")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::InvalidNotebook("missing nbformat version".to_string()))?;
        match version {
            NBFORMAT => {}
            3 => v3::upgrade(&mut value)?,
            other => return Err(Error::UnsupportedVersion(other)),
        }
        serde_json::from_value(value).map_err(|e| Error::InvalidNotebook(e.to_string()))
    }

    /// Serialize with one-space indentation and a trailing newline,
    /// the layout Jupyter itself writes.
    pub fn to_json(&self) -> Result<String> {
        to_notebook_json(self)
    }
}

/// Serialize any value in the on-disk notebook layout.
pub(crate) fn to_notebook_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only ever emits UTF-8.
    String::from_utf8(buf).map_err(|e| Error::InvalidNotebook(e.to_string()))
}

impl Cell {
    /// Tags from `metadata.tags`. Non-string entries are ignored.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        tags_of(&self.metadata)
    }

    pub fn is_code(&self) -> bool {
        self.cell_type == CellType::Code
    }

    /// Mutable access to a code cell's outputs.
    pub fn outputs_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self.extra.get_mut("outputs") {
            Some(Value::Array(outputs)) => Some(outputs),
            _ => None,
        }
    }

    /// Set `execution_count` to null on a code cell.
    pub fn clear_execution_count(&mut self) {
        if self.is_code() {
            self.extra
                .insert("execution_count".to_string(), Value::Null);
        }
    }
}

/// Tags from an output object's `metadata.tags`.
pub fn output_tags(output: &Value) -> impl Iterator<Item = &str> {
    output
        .get("metadata")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(tags_of)
}

fn tags_of(metadata: &Map<String, Value>) -> impl Iterator<Item = &str> {
    metadata
        .get("tags")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> String {
        json!({
            "nbformat": 4,
            "nbformat_minor": 5,
            "metadata": {"kernelspec": {"name": "python3"}},
            "cells": [
                {
                    "cell_type": "markdown",
                    "id": "intro",
                    "metadata": {"tags": ["daytum", 3]},
                    "source": ["# Title"]
                },
                {
                    "cell_type": "code",
                    "id": "calc",
                    "metadata": {},
                    "execution_count": 7,
                    "outputs": [],
                    "source": "1 + 1"
                }
            ]
        })
        .to_string()
    }

    #[test]
    fn test_parse_and_preserve_unknown_fields() {
        let nb = Notebook::parse(&sample()).unwrap();
        assert_eq!(nb.cells.len(), 2);
        assert_eq!(nb.cells[0].cell_type, CellType::Markdown);
        assert_eq!(nb.cells[0].extra["id"], json!("intro"));
        assert_eq!(nb.metadata["kernelspec"]["name"], json!("python3"));

        let reparsed = Notebook::parse(&nb.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, nb);
    }

    #[test]
    fn test_tags_skip_non_strings() {
        let nb = Notebook::parse(&sample()).unwrap();
        assert_eq!(nb.cells[0].tags().collect::<Vec<_>>(), ["daytum"]);
        assert_eq!(nb.cells[1].tags().count(), 0);
    }

    #[test]
    fn test_clear_execution_count_only_on_code() {
        let mut nb = Notebook::parse(&sample()).unwrap();
        for cell in &mut nb.cells {
            cell.clear_execution_count();
        }
        assert!(!nb.cells[0].extra.contains_key("execution_count"));
        assert_eq!(nb.cells[1].extra["execution_count"], Value::Null);
    }

    #[test]
    fn test_rejects_other_versions() {
        let v2 = json!({"nbformat": 2, "nbformat_minor": 0, "worksheets": []}).to_string();
        assert!(matches!(Notebook::parse(&v2), Err(Error::UnsupportedVersion(2))));
    }

    #[test]
    fn test_parse_upgrades_version_3() {
        let v3 = json!({
            "nbformat": 3,
            "nbformat_minor": 0,
            "metadata": {"name": "deck"},
            "worksheets": [{"cells": [
                {"cell_type": "heading", "level": 1, "metadata": {}, "source": "Intro"},
                {"cell_type": "code", "input": "1 + 1", "prompt_number": 2, "outputs": [], "metadata": {}}
            ]}]
        })
        .to_string();

        let nb = Notebook::parse(&v3).unwrap();
        assert_eq!(nb.nbformat, 4);
        assert_eq!(nb.cells.len(), 2);
        assert_eq!(nb.cells[0].cell_type, CellType::Markdown);
        assert_eq!(nb.cells[0].extra["source"], json!("# Intro"));
        assert_eq!(nb.cells[1].extra["execution_count"], json!(2));
        assert!(!nb.metadata.contains_key("name"));
        assert_eq!(nb.metadata["orig_nbformat"], json!(3));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(Notebook::parse("{not json"), Err(Error::Json(_))));
        assert!(matches!(
            Notebook::parse(r#"{"cells": []}"#),
            Err(Error::InvalidNotebook(_))
        ));
        assert!(matches!(
            Notebook::parse(r#"{"nbformat": 4, "nbformat_minor": 5, "metadata": {}}"#),
            Err(Error::InvalidNotebook(_))
        ));
    }

    #[test]
    fn test_json_layout() {
        let nb = Notebook::parse(&sample()).unwrap();
        let text = nb.to_json().unwrap();
        assert!(text.starts_with("{\n \"nbformat\": 4,"));
        assert!(text.ends_with("}\n"));
    }
}
