//! Workload manifest model (`WorkloadManifest.json`)
//!
//! The manifest declares a workload set's schema version, its workloads and the packs they
//! pull in. It is loaded once per run, has version pins applied in place, and is written back
//! indented with null members omitted. Members this model does not know about are carried
//! through unchanged.

pub mod jsonc;
pub mod pins;

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{self, Result};

pub use pins::{VersionPin, VersionPins};

/// Manifest file name inside a manifest directory
pub const MANIFEST_FILE: &str = "WorkloadManifest.json";

/// MSBuild targets shipped next to the manifest
pub const TARGETS_FILE: &str = "WorkloadManifest.targets";

/// Integer schema version. Accepts a number or a numeric string, always written as a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaVersion(pub u64);

impl<'de> Deserialize<'de> for SchemaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| D::Error::custom(format!("invalid schema version '{s}'"))),
        }
    }
}

/// Top-level manifest document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestInformation {
    #[serde(default)]
    pub version: SchemaVersion,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Other manifests this one requires, with their minimum schema version
    #[serde(rename = "depends-on", default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<IndexMap<String, SchemaVersion>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workloads: Option<IndexMap<String, WorkloadInformation>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packs: Option<IndexMap<String, PackVersionInformation>>,

    /// Opaque, preserved as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A workload definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadInformation {
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub is_abstract: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Member pack ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packs: Option<Vec<String>>,

    /// Parent workload ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl WorkloadInformation {
    /// Member pack ids; a workload without a `packs` list has none
    pub fn pack_ids(&self) -> &[String] {
        self.packs.as_deref().unwrap_or_default()
    }
}

/// A pack entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackVersionInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Version or `${placeholder}` token
    pub version: String,

    #[serde(rename = "alias-to", default, skip_serializing_if = "PackAlias::is_none")]
    pub alias_to: PackAlias,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Delivery package for a pack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Option<IndexMap<String, String>>",
    into = "Option<IndexMap<String, String>>"
)]
pub enum PackAlias {
    /// The pack id is the package id
    #[default]
    None,
    /// Runtime identifier -> package id
    ByRuntime(IndexMap<String, String>),
}

impl PackAlias {
    pub fn is_none(&self) -> bool {
        matches!(self, PackAlias::None)
    }

    /// Package that delivers `pack_id` on `rid`, if any.
    ///
    /// A runtime-keyed alias without an entry (or with an empty entry) for `rid` yields nothing.
    pub fn resolve<'a>(&'a self, pack_id: &'a str, rid: &str) -> Option<&'a str> {
        match self {
            PackAlias::None => Some(pack_id),
            PackAlias::ByRuntime(map) => map
                .get(rid)
                .map(String::as_str)
                .filter(|name| !name.is_empty()),
        }
    }
}

impl From<Option<IndexMap<String, String>>> for PackAlias {
    fn from(map: Option<IndexMap<String, String>>) -> Self {
        map.map_or(PackAlias::None, PackAlias::ByRuntime)
    }
}

impl From<PackAlias> for Option<IndexMap<String, String>> {
    fn from(alias: PackAlias) -> Self {
        match alias {
            PackAlias::None => None,
            PackAlias::ByRuntime(map) => Some(map),
        }
    }
}

impl ManifestInformation {
    /// Load a manifest from disk, tolerating comments and trailing commas
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(error::manifest::not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| error::fs::read_failed(path, &e))?;
        Self::from_jsonc(&content, path)
    }

    /// Parse manifest text; `path` is only used in error messages
    pub fn from_jsonc(content: &str, path: &Path) -> Result<Self> {
        let mut manifest: Self = serde_json::from_str(&jsonc::sanitize(content))
            .map_err(|e| error::manifest::parse_failed(path, e.to_string()))?;
        manifest.drop_null_members();
        Ok(manifest)
    }

    /// Null members this model does not know about are not carried through
    fn drop_null_members(&mut self) {
        self.extra.retain(|_, value| !value.is_null());
        for workload in self.workloads.iter_mut().flat_map(IndexMap::values_mut) {
            workload.extra.retain(|_, value| !value.is_null());
        }
        for pack in self.packs.iter_mut().flat_map(IndexMap::values_mut) {
            pack.extra.retain(|_, value| !value.is_null());
        }
    }

    /// Indented JSON with null members omitted
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self
            .to_json()
            .map_err(|e| error::fs::write_failed(path, &e.into()))?;
        fs::write(path, json).map_err(|e| error::fs::write_failed(path, &e))
    }

    /// Pack entries in declaration order
    pub fn pack_entries(&self) -> impl Iterator<Item = (&String, &PackVersionInformation)> {
        self.packs.iter().flatten()
    }

    /// Look up a pack by id
    pub fn pack(&self, id: &str) -> Option<&PackVersionInformation> {
        self.packs.as_ref()?.get(id)
    }

    /// Replace every pack version that exactly equals a pin key. Returns the number replaced.
    pub fn apply_version_pins(&mut self, pins: &VersionPins) -> usize {
        let mut replaced = 0;
        for pack in self.packs.iter_mut().flat_map(IndexMap::values_mut) {
            if let Some(pinned) = pins.get(&pack.version) {
                pack.version = pinned.to_string();
                replaced += 1;
            }
        }
        replaced
    }

    /// Look up a workload by id
    pub fn workload(&self, id: &str) -> Result<&WorkloadInformation> {
        self.workloads
            .as_ref()
            .and_then(|workloads| workloads.get(id))
            .ok_or_else(|| error::manifest::workload_not_found(id))
    }
}
