//! Manifest files: one path per line.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Ordered list of paths to process.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`; the terminator is dropped and
/// the rest kept verbatim. Blank lines become empty entries and are processed
/// like any other path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<String>,
}

impl Manifest {
    /// Read a manifest file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::parse(&text))
    }

    /// Split manifest text into entries.
    pub fn parse(text: &str) -> Self {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let entries = text
            .split_inclusive('\n')
            .map(|line| line.trim_end_matches('\n').to_string())
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
