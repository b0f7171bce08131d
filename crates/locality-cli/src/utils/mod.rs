pub(crate) mod logging;

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Append one line to `path`, creating the file if needed.
pub(crate) fn append_line(path: &Path, line: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("can't open '{}' for appending", path.display()))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{line}")?;
    writer.flush()?;
    Ok(())
}

#[inline]
pub(crate) fn open_input(path: &Path) -> Result<File> {
    if path.is_dir() {
        anyhow::bail!("'{}' is a folder, not a file", path.display());
    }
    File::open(path).with_context(|| format!("can't open '{}'", path.display()))
}
