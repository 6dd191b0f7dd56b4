//! Synthetic restore projects
//!
//! `dotnet restore` only acquires packages referenced by a project, so each restore writes a
//! throwaway `Restore.csproj` next to empty `Directory.Build.props`/`.targets` files. The empty
//! files stop MSBuild from importing customizations from directories above the scratch tree.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{self, Result};
use crate::resolver::ResolvedPack;

/// Project file name inside the project directory
pub const PROJECT_FILE: &str = "Restore.csproj";

/// Framework the restore projects target
pub const TARGET_FRAMEWORK: &str = "net6.0";

const BUILD_CUSTOMIZATION_FILES: [&str; 2] = ["Directory.Build.props", "Directory.Build.targets"];

/// Warning raised when restoring packs whose package type is not a dependency
const PACK_RESTORE_NO_WARN: &str = "NU1213";

/// A restore project with a list of package references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreProject {
    references: Vec<(String, String)>,
    no_warn: Option<&'static str>,
}

impl RestoreProject {
    /// Project restoring the manifest package
    pub fn manifest_package(name: &str, version: &str) -> Self {
        Self {
            references: vec![(name.to_string(), version.to_string())],
            no_warn: None,
        }
    }

    /// Project restoring every resolved pack
    pub fn packs(packs: &[ResolvedPack]) -> Self {
        Self {
            references: packs
                .iter()
                .map(|p| (p.package.clone(), p.version.clone()))
                .collect(),
            no_warn: Some(PACK_RESTORE_NO_WARN),
        }
    }

    /// Render the project XML
    pub fn render(&self) -> String {
        let mut xml = String::from("<Project Sdk=\"Microsoft.NET.Sdk\">\n");
        xml.push_str("    <PropertyGroup>\n");
        let _ = writeln!(
            xml,
            "        <TargetFramework>{TARGET_FRAMEWORK}</TargetFramework>"
        );
        if let Some(code) = self.no_warn {
            let _ = writeln!(xml, "        <NoWarn>$(NoWarn);{code}</NoWarn>");
        }
        xml.push_str("    </PropertyGroup>\n");
        xml.push_str("    <ItemGroup>\n");
        for (name, version) in &self.references {
            let _ = writeln!(
                xml,
                "        <PackageReference Include=\"{}\" Version=\"{}\" />",
                escape_attribute(name),
                escape_attribute(version)
            );
        }
        xml.push_str("    </ItemGroup>\n");
        xml.push_str("</Project>\n");
        xml
    }

    /// Write the project and the build-customization stubs into `dir`.
    /// Returns the project file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).map_err(|e| error::fs::write_failed(dir, &e))?;

        for name in BUILD_CUSTOMIZATION_FILES {
            let path = dir.join(name);
            fs::write(&path, "<Project />").map_err(|e| error::fs::write_failed(&path, &e))?;
        }

        let project = dir.join(PROJECT_FILE);
        fs::write(&project, self.render()).map_err(|e| error::fs::write_failed(&project, &e))?;
        Ok(project)
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
