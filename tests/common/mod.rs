//! Common test utilities for workload-acquire integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// SDK version the fake host reports
#[allow(dead_code)]
pub const SDK_VERSION: &str = "6.0.100-test.1";

/// Fake `dotnet` host. `restore` copies a feed into `NUGET_PACKAGES`: the pack feed when the
/// project is a pack restore (it carries NU1213), the manifest feed otherwise.
/// `FAKE_RESTORE_FAIL=manifest|packs` makes that restore fail.
#[allow(dead_code)]
const FAKE_DOTNET: &str = r#"#!/bin/sh
case "$1" in
  --version)
    echo "6.0.100-test.1"
    ;;
  restore)
    if grep -q NU1213 "$2"; then
      phase=packs
      feed="$FAKE_PACK_FEED"
    else
      phase=manifest
      feed="$FAKE_MANIFEST_FEED"
    fi
    if [ "$FAKE_RESTORE_FAIL" = "$phase" ]; then
      echo "error NU1101: Unable to find package" >&2
      exit 1
    fi
    mkdir -p "$NUGET_PACKAGES"
    cp -R "$feed"/. "$NUGET_PACKAGES"/
    echo "Restored $phase from $feed"
    ;;
  *)
    exit 2
    ;;
esac
"#;

/// A throwaway SDK root with a fake `dotnet` host and two local package feeds
#[allow(dead_code)]
pub struct TestSdk {
    pub temp: TempDir,
    /// SDK root (directory holding the host)
    pub root: PathBuf,
    pub dotnet: PathBuf,
    pub manifest_feed: PathBuf,
    pub pack_feed: PathBuf,
    /// Used as TMPDIR so scratch directories can be checked
    pub scratch_base: PathBuf,
}

#[allow(dead_code)]
impl TestSdk {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join("dotnet");
        let manifest_feed = temp.path().join("feeds/manifest");
        let pack_feed = temp.path().join("feeds/packs");
        let scratch_base = temp.path().join("tmp");

        for dir in [&manifest_feed, &pack_feed, &scratch_base] {
            std::fs::create_dir_all(dir).expect("Failed to create directory");
        }
        std::fs::create_dir_all(root.join("sdk").join(SDK_VERSION))
            .expect("Failed to create SDK version directory");

        let dotnet = root.join("dotnet");
        write_script(&dotnet, FAKE_DOTNET);

        Self {
            temp,
            root,
            dotnet,
            manifest_feed,
            pack_feed,
            scratch_base,
        }
    }

    /// Publish a manifest package to the manifest feed
    pub fn publish_manifest(&self, package: &str, version: &str, manifest: &str) -> PathBuf {
        let dir = self
            .manifest_feed
            .join(package.to_lowercase())
            .join(version.to_lowercase());
        std::fs::create_dir_all(&dir).expect("Failed to create manifest package");
        std::fs::write(dir.join("WorkloadManifest.json"), manifest)
            .expect("Failed to write manifest");
        std::fs::write(dir.join("WorkloadManifest.targets"), "<Project />")
            .expect("Failed to write targets");
        dir
    }

    /// Publish a pack package to the pack feed
    pub fn publish_pack(&self, package: &str, version: &str) -> PathBuf {
        let dir = self
            .pack_feed
            .join(package.to_lowercase())
            .join(version.to_lowercase());
        std::fs::create_dir_all(dir.join("tools")).expect("Failed to create pack package");
        std::fs::write(dir.join("tools/pack.txt"), package).expect("Failed to write pack file");
        dir
    }

    /// Path inside the SDK root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// The binary wired to this SDK's fake host and feeds
    pub fn cmd(&self) -> Command {
        let mut cmd = workload_acquire_cmd();
        cmd.arg(format!("-dotnet:{}", self.dotnet.display()))
            .env("FAKE_MANIFEST_FEED", &self.manifest_feed)
            .env("FAKE_PACK_FEED", &self.pack_feed)
            .env("TMPDIR", &self.scratch_base)
            .env_remove("FAKE_RESTORE_FAIL")
            .env_remove("WORKLOAD_ACQUIRE_VERBOSE");
        cmd
    }

    /// Scratch directories left behind under the test TMPDIR
    pub fn leftover_scratch(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.scratch_base)
            .expect("Failed to read scratch base")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with("workload-acquire-"))
            })
            .collect()
    }
}

impl Default for TestSdk {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn workload_acquire_cmd() -> Command {
    Command::cargo_bin("workload-acquire").expect("Failed to find workload-acquire binary")
}

#[cfg(unix)]
fn write_script(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::write(path, content).expect("Failed to write script");
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make script executable");
}

#[cfg(not(unix))]
fn write_script(path: &Path, content: &str) {
    std::fs::write(path, content).expect("Failed to write script");
}

/// Every file and directory under `dir`, relative to it
#[allow(dead_code)]
pub fn tree(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.path().strip_prefix(dir).ok().map(Path::to_path_buf))
        .collect();
    entries.sort();
    entries
}
