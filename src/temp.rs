//! Run-scoped scratch directory holding the restore project and the private package cache.
//!
//! The directory lives under the system temp base with a random suffix, and is removed when
//! the [`ScratchDir`] is dropped, whichever way the pipeline exits.

use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{AcquireError, Result};

/// Prefix of every scratch directory name
const SCRATCH_PREFIX: &str = "workload-acquire-";

/// Subdirectory holding the generated restore project
const PROJECT_DIR: &str = "restore";

/// Subdirectory used as `NUGET_PACKAGES` for both restores
const PACKAGES_DIR: &str = ".nuget";

/// Returns a directory path suitable for creating temporary directories.
/// Never returns a relative path, so scratch trees are never created under the current
/// working directory (e.g. when TMPDIR=tmp).
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// Scratch tree owned by one acquisition run
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a scratch directory under [`temp_dir_base`]
    pub fn create() -> Result<Self> {
        Self::create_in(temp_dir_base())
    }

    /// Create a scratch directory under `base`, creating `base` if needed
    pub fn create_in(base: impl AsRef<Path>) -> Result<Self> {
        let base = base.as_ref();
        std::fs::create_dir_all(base).map_err(|e| crate::error::fs::write_failed(base, &e))?;

        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(base)
            .map_err(|e| AcquireError::IoError {
                message: format!("Failed to create scratch directory: {e}"),
            })?;

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Directory holding `Restore.csproj` and the build-customization stubs
    pub fn project_dir(&self) -> PathBuf {
        self.path().join(PROJECT_DIR)
    }

    /// Private package cache passed to restore as `NUGET_PACKAGES`
    pub fn packages_dir(&self) -> PathBuf {
        self.path().join(PACKAGES_DIR)
    }
}
