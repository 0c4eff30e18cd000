//! Notebook-to-notebook export.
//!
//! The [`Exporter`] trait is the seam the converter drives; [`NotebookExporter`]
//! implements it with prompt stripping and tag-based removal of cells and
//! outputs.
//!
//! # Example
//!
//! ```
//! use rise_convert::export::{Exporter, NotebookExporter};
//! use rise_convert::notebook::Notebook;
//! use rise_convert::ExportConfig;
//!
//! let text = r#"{"nbformat": 4, "nbformat_minor": 5, "metadata": {}, "cells": [
//!     {"cell_type": "markdown", "metadata": {"tags": ["daytum"]}, "source": "hidden"},
//!     {"cell_type": "markdown", "metadata": {}, "source": "kept"}
//! ]}"#;
//! let notebook = Notebook::parse(text)?;
//!
//! let config = ExportConfig::for_mode(false);
//! let (body, resources) = NotebookExporter::new(&config).export(notebook)?;
//! assert_eq!(resources.removed_cells, 1);
//! assert!(body.contains("kept"));
//! # Ok::<(), rise_convert::Error>(())
//! ```

use serde_json::Value;

use crate::error::Result;
use crate::notebook::{Notebook, output_tags};
use crate::options::ExportConfig;

/// Side information produced alongside an export body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    /// Extension the body should be written with.
    pub output_extension: &'static str,
    /// Number of cells dropped by tag removal.
    pub removed_cells: usize,
}

/// Turns a notebook into a serialized output body.
pub trait Exporter {
    fn export(&self, notebook: Notebook) -> Result<(String, Resources)>;
}

/// Exports notebooks back to notebook JSON.
#[derive(Debug, Clone, Copy)]
pub struct NotebookExporter<'a> {
    config: &'a ExportConfig,
}

impl<'a> NotebookExporter<'a> {
    pub fn new(config: &'a ExportConfig) -> Self {
        Self { config }
    }

    /// Apply prompt stripping and tag removal in place. Returns the number
    /// of cells removed.
    pub fn preprocess(&self, notebook: &mut Notebook) -> usize {
        let config = self.config;
        let mut removed = 0;

        if config.tag_removal_enabled {
            let before = notebook.cells.len();
            notebook
                .cells
                .retain(|cell| !ExportConfig::matches(&config.remove_cell_tags, cell.tags()));
            removed = before - notebook.cells.len();

            for cell in notebook.cells.iter_mut().filter(|c| c.is_code()) {
                if ExportConfig::matches(&config.remove_all_outputs_tags, cell.tags()) {
                    if let Some(outputs) = cell.outputs_mut() {
                        outputs.clear();
                    }
                } else if !config.remove_single_output_tags.is_empty() {
                    if let Some(outputs) = cell.outputs_mut() {
                        outputs.retain(|out| {
                            !ExportConfig::matches(
                                &config.remove_single_output_tags,
                                output_tags(out),
                            )
                        });
                    }
                }
            }
        }

        for cell in notebook.cells.iter_mut().filter(|c| c.is_code()) {
            if config.exclude_input_prompt {
                cell.clear_execution_count();
            }
            if config.exclude_output_prompt {
                if let Some(outputs) = cell.outputs_mut() {
                    outputs.iter_mut().for_each(clear_output_prompt);
                }
            }
        }

        removed
    }
}

impl Exporter for NotebookExporter<'_> {
    fn export(&self, mut notebook: Notebook) -> Result<(String, Resources)> {
        let removed_cells = self.preprocess(&mut notebook);
        let body = notebook.to_json()?;
        Ok((
            body,
            Resources {
                output_extension: ".ipynb",
                removed_cells,
            },
        ))
    }
}

fn clear_output_prompt(output: &mut Value) {
    if let Some(obj) = output.as_object_mut() {
        if obj.get("output_type").and_then(Value::as_str) == Some("execute_result") {
            obj.insert("execution_count".to_string(), Value::Null);
        }
    }
}
