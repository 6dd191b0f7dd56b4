//! Acquire command implementation
//!
//! The acquisition pipeline:
//! 1. Restore the manifest package into the scratch package cache
//! 2. Rename its version folder to the manifest version label
//! 3. Apply a caller-supplied manifest/targets and version pins, rewrite the manifest
//! 4. Resolve and restore the workload packs
//! 5. Move the manifest and packs into the SDK
//! 6. Write the workload resolver sentinel for the active SDK version
//!
//! Moves already done are kept if a later step fails. The scratch tree is always removed.

use std::fs;
use std::path::{Path, PathBuf};

use console::Style;

use crate::config::Config;
use crate::error::{self, Result};
use crate::installer::{Installer, SdkLayout};
use crate::manifest::{MANIFEST_FILE, ManifestInformation, TARGETS_FILE};
use crate::resolver::{ResolvedPack, resolve_packs};
use crate::restore::{DotnetHost, RestoreHost, RestoreOutput, RestoreProject};
use crate::temp::ScratchDir;
use crate::ui::{InteractiveProgressReporter, ProgressReporter};

/// What an acquisition put into the SDK
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSummary {
    pub manifest_dir: PathBuf,
    pub pack_dirs: Vec<PathBuf>,
    pub sdk_version: String,
    pub sentinel: PathBuf,
}

/// Run the acquire command
pub fn run(config: &Config) -> Result<()> {
    let host = DotnetHost::new(&config.host_path);
    let mut progress = InteractiveProgressReporter::new(config.verbose);

    if config.fallback_rid {
        progress.warn("No runtime identifier for this platform; aliased packs will be skipped");
    }

    println!(
        "{} {} ({})",
        Style::new().bold().apply_to("Targeting SDK"),
        config.sdk_root.display(),
        config.rid
    );

    let scratch = ScratchDir::create()?;
    let result = Acquisition::new(config, &host, &scratch, &mut progress).execute();

    match result {
        Ok(summary) => {
            println!(
                "{} {} with {} pack(s) for SDK {}",
                Style::new().green().bold().apply_to("Installed"),
                config.workload_name,
                summary.pack_dirs.len(),
                summary.sdk_version
            );
            Ok(())
        }
        Err(e) => {
            progress.abandon();
            Err(e)
        }
    }
}

/// One acquisition run against a scratch tree
pub struct Acquisition<'a, H: RestoreHost> {
    config: &'a Config,
    host: &'a H,
    scratch: &'a ScratchDir,
    progress: &'a mut dyn ProgressReporter,
}

impl<'a, H: RestoreHost> Acquisition<'a, H> {
    pub fn new(
        config: &'a Config,
        host: &'a H,
        scratch: &'a ScratchDir,
        progress: &'a mut dyn ProgressReporter,
    ) -> Self {
        Self {
            config,
            host,
            scratch,
            progress,
        }
    }

    pub fn execute(&mut self) -> Result<InstallSummary> {
        let (manifest, manifest_dir) = self.acquire_manifest()?;
        let packs = self.restore_packs(&manifest)?;
        self.install(&manifest_dir, &packs)
    }

    /// Restore the manifest package and leave the rewritten manifest in
    /// `<cache>/<package>/<manifest version>`
    fn acquire_manifest(&mut self) -> Result<(ManifestInformation, PathBuf)> {
        let config = self.config;
        let project = RestoreProject::manifest_package(&config.package_name, &config.package_version)
            .write_to(&self.scratch.project_dir())?;

        let output = self.restore(
            &project,
            &format!(
                "Restoring {} {}",
                config.package_name, config.package_version
            ),
        )?;
        if !output.success() {
            return Err(error::restore::manifest_failed(
                &config.package_name,
                output.code,
            ));
        }

        let package_dir = self
            .scratch
            .packages_dir()
            .join(config.package_name.to_lowercase());
        let manifest_dir = self.normalize_version_dir(&package_dir)?;

        let source = self.apply_manifest_override(&manifest_dir)?;
        let mut manifest = ManifestInformation::load(&source)?;

        if !config.version_pins.is_empty() {
            let replaced = manifest.apply_version_pins(&config.version_pins);
            self.progress.status(&format!(
                "Pinned {replaced} pack version(s) with {} pin(s)",
                config.version_pins.len()
            ));
        }

        manifest.save(&manifest_dir.join(MANIFEST_FILE))?;
        Ok((manifest, manifest_dir))
    }

    /// Rename the restored version folder to the manifest version label
    fn normalize_version_dir(&mut self, package_dir: &Path) -> Result<PathBuf> {
        let mut versions: Vec<PathBuf> = match fs::read_dir(package_dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .collect(),
            Err(_) => Vec::new(),
        };
        versions.sort();

        let Some(restored) = versions.first() else {
            return Err(error::manifest::package_empty(package_dir));
        };

        if versions.len() > 1 {
            self.progress.warn(&format!(
                "{} holds {} versions, using {}",
                package_dir.display(),
                versions.len(),
                restored.display()
            ));
        }

        let target = package_dir.join(&self.config.manifest_version);
        if *restored != target {
            crate::common::fs::move_dir(restored, &target)?;
        }
        Ok(target)
    }

    /// Copy caller-supplied targets into `manifest_dir` and pick the manifest to load.
    /// A directory only supplies targets; a file is loaded as the manifest.
    fn apply_manifest_override(&mut self, manifest_dir: &Path) -> Result<PathBuf> {
        let restored = manifest_dir.join(MANIFEST_FILE);
        let Some(path) = self.config.manifest_override.as_deref() else {
            return Ok(restored);
        };

        let (source_dir, source) = if path.is_dir() {
            (path, restored)
        } else {
            (path.parent().unwrap_or(Path::new(".")), path.to_path_buf())
        };

        let targets = source_dir.join(TARGETS_FILE);
        if targets.is_file() {
            let destination = manifest_dir.join(TARGETS_FILE);
            fs::copy(&targets, &destination)
                .map_err(|e| error::fs::write_failed(&destination, &e))?;
            self.progress
                .status(&format!("Using targets {}", targets.display()));
        }

        self.progress
            .status(&format!("Using manifest {}", source.display()));
        Ok(source)
    }

    /// Resolve the packs to install and restore them into the scratch cache
    fn restore_packs(&mut self, manifest: &ManifestInformation) -> Result<Vec<ResolvedPack>> {
        let packs = resolve_packs(
            manifest,
            self.config.workload_id.as_deref(),
            &self.config.rid,
        )?;

        if packs.is_empty() {
            self.progress.status("No workload packs to restore");
            return Ok(packs);
        }

        let project = RestoreProject::packs(&packs).write_to(&self.scratch.project_dir())?;
        let output = self.restore(
            &project,
            &format!("Restoring {} workload pack(s)", packs.len()),
        )?;
        if !output.success() {
            return Err(error::restore::packs_failed(packs.len(), output.code));
        }

        Ok(packs)
    }

    /// Move everything into the SDK and enable the workload resolver
    fn install(&mut self, manifest_dir: &Path, packs: &[ResolvedPack]) -> Result<InstallSummary> {
        let installer = Installer::new(
            SdkLayout::new(&self.config.sdk_root),
            &self.config.manifest_version,
        );
        let packages_dir = self.scratch.packages_dir();

        let installed_manifest =
            installer.install_manifest(manifest_dir, &self.config.workload_name)?;
        self.progress.status(&format!(
            "Moved manifest to {}",
            installed_manifest.display()
        ));

        let mut pack_dirs = Vec::with_capacity(packs.len());
        for pack in packs {
            let destination = installer.install_pack(&packages_dir, pack)?;
            self.progress.status(&format!(
                "Moved {} ({pack}) to {}",
                pack.pack_id,
                destination.display()
            ));
            pack_dirs.push(destination);
        }

        let sdk_version = self.host.sdk_version()?;
        let sentinel = installer.write_sentinel(&sdk_version)?;
        self.progress
            .status(&format!("Enabled workload resolver: {}", sentinel.display()));

        Ok(InstallSummary {
            manifest_dir: installed_manifest,
            pack_dirs,
            sdk_version,
            sentinel,
        })
    }

    /// Run one restore behind a spinner. Output is echoed when verbose, and always on failure.
    fn restore(&mut self, project: &Path, step: &str) -> Result<RestoreOutput> {
        self.progress.begin_step(step);
        let output = self.host.restore(project, &self.scratch.packages_dir());
        self.progress.finish_step();
        let output = output?;

        if output.success() {
            self.progress.tool_output(&output.stdout);
            self.progress.tool_output(&output.stderr);
        } else {
            for text in [&output.stdout, &output.stderr] {
                let text = text.trim_end();
                if !text.is_empty() {
                    self.progress.status(text);
                }
            }
        }

        Ok(output)
    }
}
