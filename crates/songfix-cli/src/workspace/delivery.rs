use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use serde::Serialize;
use songfix_generate::{FixtureArtifact, FixturePair};
use tracing::warn;

use super::atomic::{backup_path, stage_bytes, sync_parent};
use super::{WorkspaceError, WorkspaceResult};

/// Final locations of a delivered fixture pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveredPair {
    pub sequence_path: PathBuf,
    pub table_path: PathBuf,
}

/// Write both artifacts into `out_dir`, or neither.
///
/// Both files are staged and fsynced before either is renamed into place. An
/// existing file at a target is moved aside first and restored if the other
/// rename fails, so a same-second collision never leaves a mixed pair behind.
pub fn deliver_pair(out_dir: &Path, pair: &FixturePair) -> WorkspaceResult<DeliveredPair> {
    create_dir_all(out_dir)?;

    let targets = pair
        .artifacts()
        .map(|artifact| target_path(out_dir, artifact));
    let [sequence_path, table_path] = targets;
    let (sequence_path, table_path) = (sequence_path?, table_path?);

    let sequence_tmp = stage_bytes(&sequence_path, pair.sequence.content.as_bytes())?;
    let table_tmp = match stage_bytes(&table_path, pair.table.content.as_bytes()) {
        Ok(path) => path,
        Err(err) => {
            let _ = std::fs::remove_file(&sequence_tmp);
            return Err(err);
        }
    };

    let mut swaps: Vec<Swap> = Vec::with_capacity(2);
    for (staged, target) in [(&sequence_tmp, &sequence_path), (&table_tmp, &table_path)] {
        match swap_into_place(staged, target) {
            Ok(swap) => swaps.push(swap),
            Err(err) => {
                let _ = std::fs::remove_file(&sequence_tmp);
                let _ = std::fs::remove_file(&table_tmp);
                for swap in swaps.iter().rev() {
                    swap.undo();
                }
                return Err(err);
            }
        }
    }

    // Both files are in place from here on; cleanup failures are only logged.
    for swap in &swaps {
        swap.discard_backup();
    }
    if let Err(err) = sync_parent(&sequence_path) {
        warn!(dir = %out_dir.display(), error = %err, "fixture directory sync failed");
    }

    Ok(DeliveredPair {
        sequence_path,
        table_path,
    })
}

/// A staged file renamed onto its target, with the file it replaced.
struct Swap {
    target: PathBuf,
    backup: Option<PathBuf>,
}

impl Swap {
    fn undo(&self) {
        let _ = match &self.backup {
            Some(backup) => std::fs::rename(backup, &self.target),
            None => std::fs::remove_file(&self.target),
        };
    }

    fn discard_backup(&self) {
        let Some(backup) = &self.backup else {
            return;
        };
        if let Err(err) = std::fs::remove_file(backup) {
            warn!(path = %backup.display(), error = %err, "stale fixture backup left behind");
        }
    }
}

fn swap_into_place(staged: &Path, target: &Path) -> WorkspaceResult<Swap> {
    let backup = if target.is_file() {
        let backup = backup_path(target)?;
        std::fs::rename(target, &backup)?;
        Some(backup)
    } else {
        None
    };

    if let Err(err) = std::fs::rename(staged, target) {
        if let Some(backup) = &backup {
            let _ = std::fs::rename(backup, target);
        }
        return Err(err.into());
    }
    Ok(Swap {
        target: target.to_path_buf(),
        backup,
    })
}

fn target_path(out_dir: &Path, artifact: &FixtureArtifact) -> WorkspaceResult<PathBuf> {
    let name = artifact.filename.as_str();
    let is_plain = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\']);
    if !is_plain {
        return Err(WorkspaceError::Invalid(format!(
            "artifact filename '{name}' is not a plain file name"
        )));
    }
    Ok(out_dir.join(name))
}
