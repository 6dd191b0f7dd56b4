//! Directory moves and copies with unified error handling

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{self, Result};

/// Copy a directory recursively, creating `dst` if needed
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    for entry in WalkDir::new(src_ref).follow_links(false) {
        let entry = entry.map_err(std::io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(src_ref)
            .map_err(std::io::Error::other)?;
        let target = dst_ref.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}

/// Move a directory into place, replacing whatever is at `destination`.
///
/// The destination is removed first, then its parent is created, then the source is renamed.
/// When the rename fails (e.g. across filesystems) the tree is copied and the source removed.
pub fn move_dir(source: &Path, destination: &Path) -> Result<()> {
    if !source.is_dir() {
        return Err(error::fs::move_failed(
            source,
            destination,
            "source directory does not exist",
        ));
    }

    if destination.exists() {
        fs::remove_dir_all(destination).map_err(|e| {
            error::fs::move_failed(
                source,
                destination,
                format!("could not remove existing destination: {e}"),
            )
        })?;
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| error::fs::write_failed(parent, &e))?;
    }

    if fs::rename(source, destination).is_ok() {
        return Ok(());
    }

    copy_dir_recursive(source, destination)
        .map_err(|e| error::fs::move_failed(source, destination, e.to_string()))?;
    fs::remove_dir_all(source).map_err(|e| {
        error::fs::move_failed(
            source,
            destination,
            format!("copied but could not remove source: {e}"),
        )
    })
}
