//! Driver: walk the manifest and convert or copy each entry.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::classify::{FileKind, classify, output_stem};
use crate::copy::copy_plain;
use crate::error::{Error, Result};
use crate::export::{Exporter, NotebookExporter};
use crate::manifest::Manifest;
use crate::notebook::Notebook;
use crate::options::{ExportConfig, Options};
use crate::rise::add_rise_options;

/// Counts of what a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub exported: usize,
    pub copied: usize,
    pub skipped: usize,
}

/// Converts every entry of a manifest according to [`Options`].
pub struct Converter<E> {
    options: Options,
    exporter: E,
}

impl<'a> Converter<NotebookExporter<'a>> {
    /// Converter using the built-in notebook exporter.
    pub fn new(options: Options, config: &'a ExportConfig) -> Self {
        Self::with_exporter(options, NotebookExporter::new(config))
    }
}

impl<E: Exporter> Converter<E> {
    pub fn with_exporter(options: Options, exporter: E) -> Self {
        Self { options, exporter }
    }

    /// Read the manifest and process it in order.
    pub fn run(&self) -> Result<Summary> {
        let manifest = Manifest::read(&self.options.manifest_path)?;
        debug!(entries = manifest.len(), "read manifest");
        self.run_manifest(&manifest)
    }

    /// Process every entry; the first failure aborts the run.
    pub fn run_manifest(&self, manifest: &Manifest) -> Result<Summary> {
        let mut summary = Summary::default();
        for path in manifest.iter() {
            match self.process(path)? {
                FileKind::Template => summary.exported += 1,
                FileKind::Copy => summary.copied += 1,
                FileKind::Skip => summary.skipped += 1,
            }
        }
        info!(
            exported = summary.exported,
            copied = summary.copied,
            skipped = summary.skipped,
            "conversion finished"
        );
        Ok(summary)
    }

    /// Classify one entry and act on it.
    pub fn process(&self, path: &str) -> Result<FileKind> {
        let kind = classify(path, self.options.daytum)?;
        match kind {
            FileKind::Template => {
                let dest = self.export_template(path)?;
                info!("exported {path} -> {}", dest.display());
            }
            FileKind::Copy => {
                let (dest, bytes) = copy_plain(path, &self.options.output_dir)?;
                info!("copied {path} -> {} ({bytes} bytes)", dest.display());
            }
            FileKind::Skip => debug!("skipped {path}"),
        }
        Ok(kind)
    }

    /// Export a template notebook, inject slide options and write it out.
    pub fn export_template(&self, template: &str) -> Result<PathBuf> {
        let text = fs::read_to_string(template).map_err(|e| Error::io(template, e))?;
        let notebook = Notebook::parse(&text)?;

        let (body, resources) = self.exporter.export(notebook)?;
        debug!(removed_cells = resources.removed_cells, "exported {template}");

        let body = add_rise_options(&body, self.options.daytum)?;

        let name = format!("{}{}", output_stem(template), resources.output_extension);
        let dest = self.options.output_dir.join(name);
        write_output(&dest, &body)?;
        Ok(dest)
    }
}

fn write_output(dest: &Path, body: &str) -> Result<()> {
    fs::write(dest, body).map_err(|e| Error::io(dest, e))
}
