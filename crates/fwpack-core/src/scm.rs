//! Version-control metadata capture for the release manifest.
//!
//! Both queries tolerate failure: packaging must still work from a source
//! tarball or a shallow CI checkout, so fallbacks are applied instead of
//! surfacing an error.

use std::path::Path;
use std::process::Command;

/// Commit id stand-in when the tree has no usable git history.
pub const NO_GIT: &str = "NOGIT";

/// Commit metadata with fallbacks already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScmInfo {
    /// Last commit subject and body, or `default_desc` when unavailable.
    pub description: String,
    /// Short commit hash, or [`NO_GIT`].
    pub commit: String,
}

/// Capture commit message and short hash from the repository at `dir`.
/// `default_desc` (normally the release version string) stands in for the
/// commit message when git is unavailable or the command fails.
pub fn capture_scm(dir: &Path, default_desc: &str) -> ScmInfo {
    let description = git_stdout(dir, &["log", "-1", "--pretty=%B"])
        .unwrap_or_else(|| default_desc.to_string());

    let commit =
        git_stdout(dir, &["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| NO_GIT.to_string());

    ScmInfo {
        description,
        commit,
    }
}

fn git_stdout(dir: &Path, args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
