use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

/// Opens a file, naming its `kind` (e.g., `project` or `theme`) in the error.
pub fn open(path: &Path, kind: &str) -> Result<File> {
    File::open(path).with_context(|| format!("Opening {} file `{}`", kind, path.display()))
}
