//! Installation into the SDK tree
//!
//! This module handles:
//! - The SDK directory layout for manifests, packs and the resolver sentinel
//! - Moving restored directories from the scratch package cache into that layout
//! - Writing the sentinel that turns on workload resolution
//!
//! Each move replaces its destination. There is no rollback: a failure part-way leaves the
//! moves already done in place.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::fs::move_dir;
use crate::error::{self, Result};
use crate::resolver::ResolvedPack;

/// Zero-length file whose presence enables workload resolution in an SDK
pub const SENTINEL_FILE: &str = "EnableWorkloadResolver.sentinel";

/// Paths inside a .NET SDK root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkLayout {
    root: PathBuf,
}

impl SdkLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `sdk-manifests/<manifest version>/<workload name>`
    pub fn manifest_dir(&self, manifest_version: &str, workload_name: &str) -> PathBuf {
        self.root
            .join("sdk-manifests")
            .join(manifest_version)
            .join(workload_name)
    }

    /// `packs/<package>/<version>`
    pub fn pack_dir(&self, package: &str, version: &str) -> PathBuf {
        self.root.join("packs").join(package).join(version)
    }

    /// `sdk/<sdk version>/EnableWorkloadResolver.sentinel`
    pub fn sentinel_path(&self, sdk_version: &str) -> PathBuf {
        self.root.join("sdk").join(sdk_version).join(SENTINEL_FILE)
    }
}

/// Location of a restored package inside a NuGet global packages folder.
/// NuGet lays packages out as lowercase `<id>/<version>`.
pub fn cached_package_dir(packages_dir: &Path, package: &str, version: &str) -> PathBuf {
    packages_dir
        .join(package.to_lowercase())
        .join(version.to_lowercase())
}

/// Moves restored content into an SDK
#[derive(Debug, Clone)]
pub struct Installer {
    layout: SdkLayout,
    manifest_version: String,
}

impl Installer {
    pub fn new(layout: SdkLayout, manifest_version: impl Into<String>) -> Self {
        Self {
            layout,
            manifest_version: manifest_version.into(),
        }
    }

    /// Move a manifest directory into `sdk-manifests`. Returns the destination.
    pub fn install_manifest(&self, source: &Path, workload_name: &str) -> Result<PathBuf> {
        let destination = self
            .layout
            .manifest_dir(&self.manifest_version, workload_name);
        move_dir(source, &destination)?;
        Ok(destination)
    }

    /// Move a restored pack from the package cache into `packs`. Returns the destination.
    pub fn install_pack(&self, packages_dir: &Path, pack: &ResolvedPack) -> Result<PathBuf> {
        let source = cached_package_dir(packages_dir, &pack.package, &pack.version);
        let destination = self.layout.pack_dir(&pack.package, &pack.version);
        move_dir(&source, &destination)?;
        Ok(destination)
    }

    /// Write the resolver sentinel for `sdk_version`. The SDK version directory must exist.
    pub fn write_sentinel(&self, sdk_version: &str) -> Result<PathBuf> {
        let path = self.layout.sentinel_path(sdk_version);
        fs::write(&path, b"").map_err(|e| error::fs::write_failed(&path, &e))?;
        Ok(path)
    }
}
