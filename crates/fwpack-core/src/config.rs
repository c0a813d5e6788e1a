//! PlatformIO project configuration resolution.
//!
//! Reads `platformio.ini` the way the build does: the project section names
//! the active build environment and platform, and the matching `env:` section
//! carries the board identifier the flash layout is derived from.

use anyhow::{Context, Result};
use ini::Ini;
use std::path::Path;

/// Resolved board settings for the active build environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Build environment name (first token of `build_board`).
    pub build_env: String,
    /// Platform identifier, e.g. `BUILD_ATARI`.
    pub build_platform: String,
    /// Board name from the `env:<build_env>` section.
    pub board: String,
}

impl ProjectConfig {
    /// Load from an ini file. `section` is the project section holding
    /// `build_board` and `build_platform`.
    pub fn load(path: &Path, section: &str) -> Result<Self> {
        let conf = Ini::load_from_file(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let build_board = conf.get_from(Some(section), "build_board").with_context(|| {
            format!("[{section}] build_board missing in {}", path.display())
        })?;
        // build_board may carry trailing tokens (comments, alternates); the
        // environment name is the first.
        let build_env = build_board
            .split_whitespace()
            .next()
            .with_context(|| format!("[{section}] build_board is empty in {}", path.display()))?
            .to_string();

        let build_platform = conf
            .get_from(Some(section), "build_platform")
            .with_context(|| {
                format!("[{section}] build_platform missing in {}", path.display())
            })?
            .to_string();

        let env_section = format!("env:{build_env}");
        let board = conf
            .get_from(Some(env_section.as_str()), "board")
            .with_context(|| format!("[{env_section}] board missing in {}", path.display()))?
            .to_string();

        Ok(Self {
            build_env,
            build_platform,
            board,
        })
    }

    /// Platform segment used in archive names: the token after the first
    /// underscore of `build_platform` (`BUILD_ATARI` -> `ATARI`), or the
    /// whole value when there is none.
    pub fn platform_segment(&self) -> &str {
        self.build_platform
            .split('_')
            .nth(1)
            .unwrap_or(&self.build_platform)
    }
}
