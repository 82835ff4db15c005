//! Output-tree emission for rendered files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;
use tracing::debug;

use crate::RenderedFile;

/// Write rendered files under `dest` in manifest order, creating parent
/// directories before their children. Each file is written atomically via a
/// temporary file in the destination directory followed by a rename, so
/// readers never observe partial content. Returns the written paths.
pub fn write_output(files: &[RenderedFile], dest: &Path) -> io::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let target = dest.join(&file.relative_path);
        atomic_write(&target, &file.contents)?;
        debug!(path = %target.display(), "wrote rendered file");
        written.push(target);
    }

    Ok(written)
}

/// Atomically write `contents` to `path`, ensuring the parent directory
/// exists first.
pub fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    let parent = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Path::new(".").to_path_buf());
    fs::create_dir_all(&parent)?;

    let mut tmp = Builder::new().prefix(".reportsmith").tempfile_in(&parent)?;

    tmp.as_file_mut().write_all(contents.as_bytes())?;
    tmp.as_file_mut().sync_all()?;

    tmp.persist(path).map(|_| ()).map_err(|err| err.error)
}
