//! Version header scraping.
//!
//! The firmware records its version as `#define` lines in a C header; the
//! packaging step reads them back as strings instead of compiling anything.
//! Values may be quoted or bare; quotes are stripped.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

/// Define carrying the release version string (e.g. `v1.5`). Required.
pub const VERSION_FULL_KEY: &str = "FW_VERSION_FULL";
/// Define carrying the release date string. Optional.
pub const VERSION_DATE_KEY: &str = "FW_VERSION_DATE";

/// Date stand-in when the header does not define one.
pub const UNKNOWN_DATE: &str = "unknown";

lazy_static! {
    /// `#define NAME value` with an optionally quoted value. Horizontal
    /// whitespace only between name and value, so a bare include-guard
    /// define never swallows the following line.
    static ref DEFINE_LINE: Regex =
        Regex::new(r#"(?m)^\s*#define\s+(\w+)[ \t]+"?([^"\n]+)"?"#).unwrap();
}

/// All `#define` pairs from the version header, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRecord {
    defines: BTreeMap<String, String>,
}

impl VersionRecord {
    /// Scrape every `#define NAME value` pair from header text.
    pub fn parse(content: &str) -> Self {
        let mut defines = BTreeMap::new();
        for cap in DEFINE_LINE.captures_iter(content) {
            defines.insert(cap[1].to_string(), cap[2].trim().to_string());
        }
        Self { defines }
    }

    /// Raw define lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.defines.get(name).map(String::as_str)
    }

    /// The release version string. Missing it makes the whole release
    /// unnameable, so this is the one hard requirement on the header.
    pub fn full(&self) -> Result<&str> {
        self.get(VERSION_FULL_KEY)
            .with_context(|| format!("{VERSION_FULL_KEY} not defined in version header"))
    }

    /// The release date string, or [`UNKNOWN_DATE`].
    pub fn date(&self) -> &str {
        self.get(VERSION_DATE_KEY).unwrap_or(UNKNOWN_DATE)
    }

    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }
}
