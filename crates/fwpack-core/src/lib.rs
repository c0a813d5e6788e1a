//! Firmware release packaging (Core).
//!
//! Post-build step for ESP32 projects: collects the build outputs of one
//! PlatformIO environment, derives a release manifest from the version
//! header and commit metadata, and bundles everything into a distribution
//! zip that flasher tooling consumes as-is.

pub mod artifacts;
pub mod bundle;
pub mod clean;
pub mod config;
pub mod layout;
pub mod manifest;
pub mod scm;
pub mod version;
