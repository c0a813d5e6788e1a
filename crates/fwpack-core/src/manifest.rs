//! Release manifest schema.
//!
//! `release.json` is consumed by downstream flasher tooling; the field names
//! and the `0x`-prefixed hex offset encoding are part of that contract, so
//! every field here is required and serialized as a string.

use crate::layout::FlashSize;
use crate::scm::ScmInfo;
use crate::version::VersionRecord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Manifest filename, on disk and at the archive root.
pub const MANIFEST_NAME: &str = "release.json";

/// The generated release descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseManifest {
    /// Release version string (e.g. `v1.5`).
    pub version: String,
    /// Release date from the version header.
    pub version_date: String,
    /// Local timestamp of this packaging run, `YYYY-MM-DD HH:MM:SS`.
    pub build_date: String,
    /// Last commit subject and body, or the version string without git.
    pub description: String,
    /// Short commit hash, or `NOGIT`.
    pub git_commit: String,
    /// Images to flash, in write order.
    pub files: Vec<ManifestFile>,
}

/// One image entry: filename inside the archive and its flash offset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestFile {
    pub filename: String,
    /// Flash offset as `0x`-prefixed hex, as the flasher expects.
    pub offset: String,
}

impl ReleaseManifest {
    /// Assemble from the version record, commit metadata and the flash
    /// layout for `size`. Stamps the build date from the local clock.
    pub fn build(version: &VersionRecord, scm: &ScmInfo, size: FlashSize) -> Result<Self> {
        let full = version.full()?.to_string();
        let build_date = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let files = size
            .layout()
            .iter()
            .map(|region| ManifestFile {
                filename: region.filename.to_string(),
                offset: format!("0x{:x}", region.offset),
            })
            .collect();

        Ok(Self {
            version: full,
            version_date: version.date().to_string(),
            build_date,
            description: scm.description.clone(),
            git_commit: scm.commit.clone(),
            files,
        })
    }

    /// Pretty-printed JSON bytes, as written to `release.json`.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).context("serialize release manifest")
    }
}
