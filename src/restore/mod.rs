//! Package restore through the `dotnet` host
//!
//! This module handles:
//! - Generating the synthetic restore projects ([`project`])
//! - Running `dotnet restore` with a private package cache
//! - Querying the active SDK version
//! - Locating the `dotnet` host when none is given
//!
//! The [`RestoreHost`] trait is the seam between the pipeline and the external process.

pub mod project;

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{self, AcquireError, Result};

pub use project::RestoreProject;

/// Environment variable redirecting the NuGet global packages folder
const PACKAGES_ENV: &str = "NUGET_PACKAGES";

#[cfg(windows)]
const HOST_EXECUTABLE: &str = "dotnet.exe";
#[cfg(not(windows))]
const HOST_EXECUTABLE: &str = "dotnet";

/// Captured result of a `dotnet restore` run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RestoreOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// External tooling the pipeline drives
pub trait RestoreHost {
    /// Restore `project` into the package cache at `packages_dir`
    fn restore(&self, project: &Path, packages_dir: &Path) -> Result<RestoreOutput>;

    /// Version of the SDK the host resolves (`dotnet --version`)
    fn sdk_version(&self) -> Result<String>;
}

/// The real `dotnet` executable
#[derive(Debug, Clone)]
pub struct DotnetHost {
    path: PathBuf,
}

impl DotnetHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RestoreHost for DotnetHost {
    fn restore(&self, project: &Path, packages_dir: &Path) -> Result<RestoreOutput> {
        let output = Command::new(&self.path)
            .arg("restore")
            .arg(project)
            .env(PACKAGES_ENV, packages_dir)
            .output()
            .map_err(|e| error::restore::launch_failed(&self.path, &e))?;

        Ok(RestoreOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn sdk_version(&self) -> Result<String> {
        let output = Command::new(&self.path)
            .arg("--version")
            .output()
            .map_err(|e| error::restore::launch_failed(&self.path, &e))?;

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if version.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(error::restore::sdk_version(format!(
                "{} --version printed nothing: {}",
                self.path.display(),
                stderr.trim()
            )));
        }

        Ok(version)
    }
}

/// Resolve the `dotnet` host: an explicit path wins, otherwise the first match on `PATH`.
/// Symlinks are resolved so the SDK root is the real installation directory.
pub fn locate_host(explicit: Option<&Path>) -> Result<PathBuf> {
    let candidate = match explicit {
        Some(path) => path.to_path_buf(),
        None => env::var_os("PATH")
            .as_deref()
            .and_then(find_on_path)
            .ok_or(AcquireError::HostNotFound)?,
    };

    if !candidate.is_file() {
        return Err(error::fs::not_found(&candidate));
    }

    dunce::canonicalize(&candidate).map_err(|e| error::fs::read_failed(&candidate, &e))
}

/// First `dotnet` executable in a `PATH`-style list
pub fn find_on_path(path_var: &OsStr) -> Option<PathBuf> {
    env::split_paths(path_var)
        .map(|dir| dir.join(HOST_EXECUTABLE))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_restore_output_success() {
        let ok = RestoreOutput {
            code: Some(0),
            ..RestoreOutput::default()
        };
        let failed = RestoreOutput {
            code: Some(1),
            ..RestoreOutput::default()
        };
        let killed = RestoreOutput::default();

        assert!(ok.success());
        assert!(!failed.success());
        assert!(!killed.success());
    }

    #[test]
    fn test_find_on_path() {
        let temp = TempDir::new().unwrap();
        let empty = temp.path().join("empty");
        let sdk = temp.path().join("sdk");
        std::fs::create_dir_all(&empty).unwrap();
        std::fs::create_dir_all(&sdk).unwrap();
        std::fs::write(sdk.join(HOST_EXECUTABLE), "").unwrap();

        let path_var = env::join_paths([&empty, &sdk]).unwrap();
        assert_eq!(find_on_path(&path_var), Some(sdk.join(HOST_EXECUTABLE)));
    }

    #[test]
    fn test_find_on_path_none() {
        let temp = TempDir::new().unwrap();
        let path_var = env::join_paths([temp.path()]).unwrap();
        assert_eq!(find_on_path(&path_var), None);
    }

    #[test]
    fn test_locate_explicit_host() {
        let temp = TempDir::new().unwrap();
        let host = temp.path().join(HOST_EXECUTABLE);
        std::fs::write(&host, "").unwrap();

        let located = locate_host(Some(&host)).unwrap();
        assert_eq!(located, dunce::canonicalize(&host).unwrap());
    }

    #[test]
    fn test_locate_explicit_host_missing() {
        let temp = TempDir::new().unwrap();
        let err = locate_host(Some(&temp.path().join("nope"))).unwrap_err();
        assert!(matches!(err, AcquireError::FileNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_locate_resolves_symlink() {
        let temp = TempDir::new().unwrap();
        let real_dir = temp.path().join("share/dotnet");
        std::fs::create_dir_all(&real_dir).unwrap();
        std::fs::write(real_dir.join("dotnet"), "").unwrap();
        let link = temp.path().join("dotnet");
        std::os::unix::fs::symlink(real_dir.join("dotnet"), &link).unwrap();

        let located = locate_host(Some(&link)).unwrap();
        assert_eq!(
            located.parent().unwrap(),
            dunce::canonicalize(&real_dir).unwrap()
        );
    }

    #[test]
    fn test_launch_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let host = DotnetHost::new(temp.path().join("missing-dotnet"));
        let err = host.sdk_version().unwrap_err();
        assert!(matches!(err, AcquireError::HostLaunchFailed { .. }));
    }
}
