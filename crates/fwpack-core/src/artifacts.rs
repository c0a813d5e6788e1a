//! Build artifact discovery.
//!
//! The packaging step never builds anything itself; it only checks that the
//! build system already produced the fixed set of images for the active
//! environment under `.pio/build/<env>/`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const BOOTLOADER_BIN: &str = "bootloader.bin";
pub const PARTITIONS_BIN: &str = "partitions.bin";
pub const FIRMWARE_BIN: &str = "firmware.bin";
pub const SPIFFS_BIN: &str = "spiffs.bin";

/// Every image that must exist before the zip step runs, in flash order.
pub const REQUIRED: [&str; 4] = [BOOTLOADER_BIN, PARTITIONS_BIN, FIRMWARE_BIN, SPIFFS_BIN];

/// Build outputs of one environment.
#[derive(Debug, Clone)]
pub struct BuildArtifacts {
    build_dir: PathBuf,
}

impl BuildArtifacts {
    pub fn locate(project_dir: &Path, build_env: &str) -> Self {
        Self {
            build_dir: project_dir.join(".pio").join("build").join(build_env),
        }
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.build_dir.join(name)
    }

    /// Required images not present on disk, in flash order.
    pub fn missing(&self) -> Vec<&'static str> {
        REQUIRED
            .iter()
            .copied()
            .filter(|name| !self.path(name).exists())
            .collect()
    }

    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path(name);
        std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Operator-facing message for a missing image. The filesystem image gets
/// an extra hint because its build target is a separate PlatformIO task.
pub fn missing_hint(name: &str) -> String {
    let label = name.trim_end_matches(".bin").to_ascii_uppercase();
    if name == SPIFFS_BIN {
        format!("{label} not available to pack in firmware zip, run \"Build Filesystem Image\" first")
    } else {
        format!("{label} not available to pack in firmware zip")
    }
}
