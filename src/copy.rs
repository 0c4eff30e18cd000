//! Verbatim copies of non-template files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Copy `source` into `output_dir`, keeping the path exactly as given.
///
/// `a/b/c.txt` lands at `<output_dir>/a/b/c.txt`; intermediate directories
/// are not created. An absolute `source` replaces `output_dir` entirely, so
/// copying a file onto itself is refused. Returns the destination and the
/// number of bytes copied.
pub fn copy_plain(source: &str, output_dir: &Path) -> Result<(PathBuf, u64)> {
    let dest = output_dir.join(source);

    if dest.exists() && same_file(Path::new(source), &dest)? {
        return Err(Error::SameFile(dest));
    }

    let bytes = fs::copy(source, &dest).map_err(|e| {
        // Report whichever side is at fault.
        if Path::new(source).exists() {
            Error::io(&dest, e)
        } else {
            Error::io(source, e)
        }
    })?;
    Ok((dest, bytes))
}

fn same_file(a: &Path, b: &Path) -> Result<bool> {
    let a = fs::canonicalize(a).map_err(|e| Error::io(a, e))?;
    let b = fs::canonicalize(b).map_err(|e| Error::io(b, e))?;
    Ok(a == b)
}
