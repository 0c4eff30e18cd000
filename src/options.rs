//! Run options and the export configuration derived from them.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Cell tag removed from ordinary output.
pub const DAYTUM_TAG: &str = "daytum";

/// Cell tag removed from Daytum output.
pub const NO_DAYTUM_TAG: &str = "no_daytum";

/// Options for one conversion run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Text file listing the files to convert, one per line.
    pub manifest_path: PathBuf,
    /// Directory the converted files are written into.
    pub output_dir: PathBuf,
    /// Rebrand output for Daytum.
    pub daytum: bool,
}

impl Options {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            output_dir: PathBuf::from("./"),
            daytum: false,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_daytum(mut self, daytum: bool) -> Self {
        self.daytum = daytum;
        self
    }
}

/// Configuration handed to the [`Exporter`](crate::export::Exporter) for every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportConfig {
    /// Null the execution count of every code cell.
    pub exclude_input_prompt: bool,
    /// Null the execution count of every `execute_result` output.
    pub exclude_output_prompt: bool,
    /// Whether any of the tag sets below are applied.
    pub tag_removal_enabled: bool,
    /// Cells carrying any of these tags are dropped.
    pub remove_cell_tags: BTreeSet<String>,
    /// Code cells carrying any of these tags lose all their outputs.
    pub remove_all_outputs_tags: BTreeSet<String>,
    /// Outputs carrying any of these tags are dropped.
    pub remove_single_output_tags: BTreeSet<String>,
}

impl ExportConfig {
    /// The configuration used by a conversion run.
    ///
    /// Prompts are always stripped. Daytum output drops `no_daytum` cells,
    /// ordinary output drops `daytum` cells.
    pub fn for_mode(daytum: bool) -> Self {
        let tag = if daytum { NO_DAYTUM_TAG } else { DAYTUM_TAG };
        Self {
            exclude_input_prompt: true,
            exclude_output_prompt: true,
            tag_removal_enabled: true,
            remove_cell_tags: BTreeSet::from([tag.to_string()]),
            ..Self::default()
        }
    }

    /// Whether `tags` intersects `set`.
    pub(crate) fn matches<'t>(
        set: &BTreeSet<String>,
        mut tags: impl Iterator<Item = &'t str>,
    ) -> bool {
        !set.is_empty() && tags.any(|t| set.contains(t))
    }
}
