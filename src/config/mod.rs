//! Run configuration
//!
//! [`Config`] is built once from the parsed command line, with every default resolved
//! (runtime identifier, `dotnet` host, SDK root), and passed by reference to each stage.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{self, Result};
use crate::manifest::VersionPins;
use crate::restore::locate_host;

/// Manifest version label used for install paths and the restored version folder
pub const MANIFEST_VERSION: &str = "6.0.100";

pub const DEFAULT_PACKAGE_NAME: &str = "Microsoft.NET.Sdk.BlazorWebAssembly.AOT";
pub const DEFAULT_PACKAGE_VERSION: &str = "6.0.0-*";
pub const DEFAULT_WORKLOAD_NAME: &str = "Microsoft.NET.Workload.BlazorWebAssembly";

/// Runtime identifier used when the platform has no known mapping
pub const FALLBACK_RID: &str = "any";

/// Immutable settings for one acquisition run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rid: String,
    pub sdk_root: PathBuf,
    pub host_path: PathBuf,
    pub manifest_version: String,
    pub workload_name: String,
    pub workload_id: Option<String>,
    pub package_name: String,
    pub package_version: String,
    pub manifest_override: Option<PathBuf>,
    pub version_pins: VersionPins,
    pub verbose: bool,
    /// No `-rid` was given and the platform has no runtime identifier
    pub fallback_rid: bool,
}

impl Config {
    /// Resolve defaults and build the run configuration
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let host_path = locate_host(cli.dotnet.as_deref())?;

        let sdk_root = match cli.sdk_path {
            Some(path) => path,
            None => sdk_root_of(&host_path)?,
        };

        let fallback_rid = cli.rid.is_none() && default_rid().is_none();
        let rid = cli
            .rid
            .unwrap_or_else(|| default_rid().unwrap_or(FALLBACK_RID).to_string());

        Ok(Self {
            rid,
            sdk_root,
            host_path,
            manifest_version: MANIFEST_VERSION.to_string(),
            workload_name: cli.workload,
            workload_id: cli.workload_id,
            package_name: cli.package_name,
            package_version: cli.package_version,
            manifest_override: cli.manifest,
            version_pins: cli.versions.into_iter().collect(),
            verbose: cli.verbose,
            fallback_rid,
        })
    }
}

/// Directory holding the `dotnet` host
fn sdk_root_of(host_path: &Path) -> Result<PathBuf> {
    host_path
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| error::fs::not_found(host_path))
}

/// Runtime identifier of the running platform, if it has one
pub fn default_rid() -> Option<&'static str> {
    rid_for(std::env::consts::OS, std::env::consts::ARCH)
}

fn rid_for(os: &str, arch: &str) -> Option<&'static str> {
    let rid = match (os, arch) {
        ("windows", "x86_64") => "win-x64",
        ("windows", "x86") => "win-x86",
        ("windows", "aarch64") => "win-arm64",
        ("macos", "x86_64") => "osx-x64",
        ("macos", "aarch64") => "osx-arm64",
        ("linux", "x86_64") => "linux-x64",
        ("linux", "aarch64") => "linux-arm64",
        _ => return None,
    };
    Some(rid)
}
