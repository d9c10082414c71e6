//! Client-local preference state: votes, removed articles, and the
//! (category, weight) filter pair.
//!
//! Each piece persists as its own JSON blob under a storage directory, with
//! explicit load/save boundaries: everything is read once at startup and the
//! full blob is rewritten after every mutation. Absent or corrupt JSON resets
//! that piece to its default instead of failing. Nothing is ever pruned;
//! votes for articles that no longer appear in any fetch are retained
//! indefinitely.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;

use crate::aggregator::{DEFAULT_CATEGORY, DEFAULT_WEIGHT};
use crate::provider::Article;

const VOTES_FILE: &str = "votes.json";
const REMOVED_FILE: &str = "removed.json";
const PREFS_FILE: &str = "prefs.json";

/// Per-article vote counters. Client-local, unbounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteRecord {
    pub upvotes: u64,
    pub downvotes: u64,
}

/// The persisted (category, weight) filter pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewPrefs {
    pub category: String,
    pub legacy_weight: u8,
}

impl Default for ViewPrefs {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            legacy_weight: DEFAULT_WEIGHT,
        }
    }
}

#[derive(Debug)]
pub struct PreferenceStore {
    dir: PathBuf,
    votes: HashMap<String, VoteRecord>,
    removed: HashSet<String>,
    prefs: ViewPrefs,
}

impl PreferenceStore {
    /// Load all three blobs from `dir`, tolerating absent or corrupt data.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            votes: load_blob(&dir.join(VOTES_FILE)),
            removed: load_blob(&dir.join(REMOVED_FILE)),
            prefs: load_blob(&dir.join(PREFS_FILE)),
            dir,
        }
    }

    pub fn upvote(&mut self, id: &str) {
        self.votes.entry(id.to_string()).or_default().upvotes += 1;
        self.save_votes();
    }

    pub fn downvote(&mut self, id: &str) {
        self.votes.entry(id.to_string()).or_default().downvotes += 1;
        self.save_votes();
    }

    pub fn remove(&mut self, id: &str) {
        self.removed.insert(id.to_string());
        if let Err(e) = save_blob(&self.dir.join(REMOVED_FILE), &self.removed) {
            warn!(target: "store", error = %e, "failed to persist removed set");
        }
    }

    pub fn votes_for(&self, id: &str) -> VoteRecord {
        self.votes.get(id).cloned().unwrap_or_default()
    }

    pub fn is_removed(&self, id: &str) -> bool {
        self.removed.contains(id)
    }

    pub fn prefs(&self) -> &ViewPrefs {
        &self.prefs
    }

    /// Update and persist the filter pair.
    pub fn set_prefs(&mut self, category: &str, legacy_weight: u8) {
        self.prefs = ViewPrefs {
            category: category.to_string(),
            legacy_weight,
        };
        if let Err(e) = save_blob(&self.dir.join(PREFS_FILE), &self.prefs) {
            warn!(target: "store", error = %e, "failed to persist prefs");
        }
    }

    /// Restore default prefs and delete the persisted pair.
    pub fn reset_prefs(&mut self) {
        self.prefs = ViewPrefs::default();
        let _ = fs::remove_file(self.dir.join(PREFS_FILE));
    }

    /// The display list: fetched articles minus the removed set, ordered
    /// descending by upvote count. Downvotes do not affect order; ties keep
    /// the original fetch order (the sort is stable).
    pub fn visible_articles<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        let mut out: Vec<&Article> = articles
            .iter()
            .filter(|a| !self.removed.contains(&a.id))
            .collect();
        out.sort_by_key(|a| std::cmp::Reverse(self.votes_for(&a.id).upvotes));
        out
    }

    fn save_votes(&self) {
        if let Err(e) = save_blob(&self.dir.join(VOTES_FILE), &self.votes) {
            warn!(target: "store", error = %e, "failed to persist votes");
        }
    }
}

fn load_blob<T: DeserializeOwned + Default>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            warn!(target: "store", path = %path.display(), error = %e, "corrupt blob, resetting");
            T::default()
        }),
        Err(_) => T::default(),
    }
}

fn save_blob<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating storage dir {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
