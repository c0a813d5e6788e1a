//! Distribution archive writer.
//!
//! Writes the firmware zip with a canonical layout: `release.json` first,
//! then images in sorted name order. Entry metadata is fixed (no wall-clock
//! timestamps, constant permissions) so repeated runs over identical inputs
//! produce identical archives.

use crate::manifest::{ReleaseManifest, MANIFEST_NAME};
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Single file to add to the archive: entry name (POSIX, relative) and
/// contents.
#[derive(Debug, Clone)]
pub struct BundleEntry {
    pub name: String,
    pub data: Vec<u8>,
}

/// Write the firmware bundle to `w`: manifest first, then entries in sorted
/// order.
pub fn write_firmware_zip<W: Write + Seek>(
    w: W,
    manifest: &ReleaseManifest,
    entries: &[BundleEntry],
) -> Result<()> {
    let manifest_json = manifest.to_json()?;

    let mut zip = ZipWriter::new(w);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    write_zip_entry(&mut zip, MANIFEST_NAME, &manifest_json, options)?;

    let mut sorted: Vec<_> = entries.iter().collect();
    sorted.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));

    for e in &sorted {
        normalize_name_and_append(&mut zip, &e.name, &e.data, options)?;
    }

    zip.finish().context("finalize zip")?;
    Ok(())
}

/// SHA-256 of a finished archive, hex-encoded. Logged for provenance next
/// to the written file.
pub fn archive_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn write_zip_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    data: &[u8],
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(name, options)
        .with_context(|| format!("start archive entry {name}"))?;
    zip.write_all(data)
        .with_context(|| format!("write archive entry {name}"))?;
    Ok(())
}

/// Normalize the entry name to POSIX relative (forward slashes, no leading
/// slash) and append.
fn normalize_name_and_append<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    data: &[u8],
    options: SimpleFileOptions,
) -> Result<()> {
    let normalized = name.replace('\\', "/").trim_start_matches('/').to_string();
    if normalized.is_empty() || normalized.contains("..") {
        anyhow::bail!("invalid archive entry name: {}", name);
    }
    write_zip_entry(zip, &normalized, data, options)
}
