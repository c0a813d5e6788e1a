//! `fwpack pack`: the packaging pipeline.
//!
//! Clean output dir -> resolve project config -> check artifacts (skip the
//! zip step when any are missing) -> scrape version header -> capture git
//! metadata -> write `release.json` -> write the distribution zip.

use anyhow::Context;
use std::io::Cursor;
use tracing::info;

use fwpack_core::artifacts::{self, BuildArtifacts};
use fwpack_core::bundle::{archive_digest, write_firmware_zip, BundleEntry};
use fwpack_core::clean::reset_output_dir;
use fwpack_core::config::ProjectConfig;
use fwpack_core::layout::FlashSize;
use fwpack_core::manifest::{ReleaseManifest, MANIFEST_NAME};
use fwpack_core::scm;
use fwpack_core::version::VersionRecord;

use super::super::args::PackArgs;
use crate::exit_codes::SUCCESS;

pub fn run(args: PackArgs) -> anyhow::Result<i32> {
    let project_dir = &args.project_dir;
    let output_dir = project_dir.join(&args.output);

    reset_output_dir(&output_dir)?;

    let config_path = project_dir.join(&args.config);
    let config = ProjectConfig::load(&config_path, &args.section)?;
    println!("Creating firmware zip for ESP32 board: {}", config.board);

    let artifacts = BuildArtifacts::locate(project_dir, &config.build_env);
    let missing = artifacts.missing();
    if !missing.is_empty() {
        for name in &missing {
            println!("{}", artifacts::missing_hint(name));
        }
        println!("Skipping ZIP file creation");
        return Ok(SUCCESS);
    }

    let header_path = project_dir.join(&args.version_header);
    let header = std::fs::read_to_string(&header_path)
        .with_context(|| format!("failed to read {}", header_path.display()))?;
    let version = VersionRecord::parse(&header);
    let version_full = version.full()?.to_string();

    let scm = scm::capture_scm(project_dir, &version_full);

    let size = FlashSize::from_board(&config.board).with_context(|| {
        format!(
            "board {:?} does not name a supported flash size (16mb/8mb/4mb)",
            config.board
        )
    })?;

    let manifest = ReleaseManifest::build(&version, &scm, size)?;
    let manifest_path = output_dir.join(MANIFEST_NAME);
    std::fs::write(&manifest_path, manifest.to_json()?)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;

    let mut entries = Vec::with_capacity(artifacts::REQUIRED.len());
    for name in artifacts::REQUIRED {
        entries.push(BundleEntry {
            name: name.to_string(),
            data: artifacts.read(name)?,
        });
    }

    let mut buf = Vec::new();
    write_firmware_zip(Cursor::new(&mut buf), &manifest, &entries)?;

    let zip_name = format!(
        "{}-{}-{}.zip",
        args.name,
        config.platform_segment(),
        manifest.version
    );
    let zip_path = output_dir.join(&zip_name);
    std::fs::write(&zip_path, &buf)
        .with_context(|| format!("failed to write {}", zip_path.display()))?;

    info!(
        "wrote {} ({} bytes, sha256:{})",
        zip_path.display(),
        buf.len(),
        archive_digest(&buf)
    );
    println!("Firmware zip: {}", zip_path.display());

    Ok(SUCCESS)
}
