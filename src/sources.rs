//! # Source pools
//!
//! Classifies an article's source name into one of two editorial pools:
//! established/legacy outlets and digital-first ("new age") outlets. Names
//! matching neither pool fall into `Other`.
//!
//! - Loads the two allow-lists from JSON config.
//! - Case-insensitive substring lookup against provider source names.
//! - Includes a built-in `default_seed()` with the stock pools.
//! - Falls back to the seed on a missing or corrupt config file.

use serde::Deserialize;
use std::{fs, path::Path};
use tracing::warn;

/// Which editorial pool a source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAge {
    Legacy,
    NewAge,
    Other,
}

/// The two fixed allow-lists, loaded from JSON or defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePoolsConfig {
    /// Established/traditional media brands.
    #[serde(default)]
    pub legacy: Vec<String>,
    /// Digital-first media brands.
    #[serde(default)]
    pub new_age: Vec<String>,
}

impl SourcePoolsConfig {
    /// Load the pools from a JSON file.
    /// Falls back to `default_seed()` on error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!(target: "sources", error = %e, "corrupt source pools config, using seed");
                Self::default_seed()
            }),
            Err(_) => Self::default_seed(),
        }
    }

    /// Classify a provider source name.
    ///
    /// Matching is a case-insensitive substring test against the provider's
    /// display name. The legacy list is checked first so the three groups
    /// stay disjoint.
    pub fn classify(&self, source: &str) -> MediaAge {
        let s = source.to_lowercase();
        if self.legacy.iter().any(|p| s.contains(&p.to_lowercase())) {
            return MediaAge::Legacy;
        }
        if self.new_age.iter().any(|p| s.contains(&p.to_lowercase())) {
            return MediaAge::NewAge;
        }
        MediaAge::Other
    }

    /// Built-in seed with the stock pools. Used as fallback if no config is
    /// found.
    pub(crate) fn default_seed() -> Self {
        Self {
            legacy: [
                "bbc-news",
                "cnn",
                "the-times",
                "financial-times",
                "the-wall-street-journal",
                "the-washington-post",
            ]
            .map(str::to_string)
            .to_vec(),
            new_age: [
                "techcrunch",
                "hacker-news",
                "the-verge",
                "wired",
                "recode",
                "ars-technica",
                "fast-company",
            ]
            .map(str::to_string)
            .to_vec(),
        }
    }
}

impl Default for SourcePoolsConfig {
    fn default() -> Self {
        Self::default_seed()
    }
}
