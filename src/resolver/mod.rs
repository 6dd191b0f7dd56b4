//! Pack set resolution
//!
//! This module handles:
//! - Narrowing the manifest's packs to the members of one workload
//! - Resolving per-runtime-identifier aliases to delivery package ids
//!
//! Resolution is one level deep: `extends` is not followed, and no transitive package graph
//! is computed.

use std::fmt;

use crate::error::{self, Result};
use crate::manifest::ManifestInformation;

/// A pack ready to be restored and installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPack {
    /// Pack id as declared in the manifest
    pub pack_id: String,
    /// NuGet package that delivers the pack on the active runtime identifier
    pub package: String,
    pub version: String,
}

impl fmt::Display for ResolvedPack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.package, self.version)
    }
}

/// Resolve the packs to install, in manifest declaration order.
///
/// With `workload_id`, only packs listed by that workload are considered; the workload and
/// every pack it lists must exist. Aliased packs without an entry for `rid` are dropped.
pub fn resolve_packs(
    manifest: &ManifestInformation,
    workload_id: Option<&str>,
    rid: &str,
) -> Result<Vec<ResolvedPack>> {
    let subset = match workload_id {
        Some(id) => Some(workload_subset(manifest, id)?),
        None => None,
    };

    let resolved = manifest
        .pack_entries()
        .filter(|(id, _)| subset.is_none_or(|members| members.contains(*id)))
        .filter_map(|(id, pack)| {
            pack.alias_to.resolve(id, rid).map(|package| ResolvedPack {
                pack_id: id.clone(),
                package: package.to_string(),
                version: pack.version.clone(),
            })
        })
        .collect();

    Ok(resolved)
}

/// Member pack ids of a workload, checked against the manifest's pack map
fn workload_subset<'a>(manifest: &'a ManifestInformation, id: &str) -> Result<&'a [String]> {
    let members = manifest.workload(id)?.pack_ids();

    if let Some(missing) = members.iter().find(|p| manifest.pack(p).is_none()) {
        return Err(error::manifest::pack_not_found(id, missing));
    }

    Ok(members)
}
