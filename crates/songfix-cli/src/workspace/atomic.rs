use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{WorkspaceError, WorkspaceResult};

pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> WorkspaceResult<()> {
    let tmp_path = stage_bytes(path, data)?;
    if let Err(err) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err.into());
    }
    sync_parent(path)?;
    Ok(())
}

/// Write `data` next to `path` under a temp name and fsync it.
///
/// The caller renames the returned temp file into place.
pub(super) fn stage_bytes(path: &Path, data: &[u8]) -> WorkspaceResult<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let written = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)
        .and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        });
    if let Err(err) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err.into());
    }
    Ok(tmp_path)
}

pub(super) fn sync_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => sync_dir(parent),
        _ => Ok(()),
    }
}

/// Hidden sibling that holds a replaced file until delivery commits.
pub(super) fn backup_path(path: &Path) -> WorkspaceResult<PathBuf> {
    hidden_sibling(path, "bak")
}

fn temp_path(path: &Path) -> WorkspaceResult<PathBuf> {
    hidden_sibling(path, "tmp")
}

fn hidden_sibling(path: &Path, extension: &str) -> WorkspaceResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| WorkspaceError::Invalid("invalid path for atomic write".to_string()))?;
    let name = format!(".{}.{extension}", file_name.to_string_lossy());
    Ok(path.with_file_name(name))
}

fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}
