//! Knowledge store — the catalogue records the assistant grounds its answers in.
//!
//! One JSON file under the work directory holds the whole collection; every
//! mutation rewrites the blob in full (the corpus is a dozen-odd records, not
//! a database). Loading is forgiving: a missing or malformed file falls back
//! to the built-in seed catalogue with a warning, never an error — losing the
//! enrichment history must not take the assistant down.
//!
//! The store is constructed once per process with [`KnowledgeStore::open`]
//! and passed by reference to consumers; there is no module-level state, so
//! tests get a fresh store per tempdir.

pub mod search;
pub mod seed;

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AppError;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Fixed category taxonomy for knowledge entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Products,
    Support,
    Warranty,
    Installation,
    General,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::Products,
        Category::Support,
        Category::Warranty,
        Category::Installation,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Products => "products",
            Category::Support => "support",
            Category::Warranty => "warranty",
            Category::Installation => "installation",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "products" => Ok(Category::Products),
            "support" => Ok(Category::Support),
            "warranty" => Ok(Category::Warranty),
            "installation" => Ok(Category::Installation),
            "general" => Ok(Category::General),
            other => Err(format!("unknown category: '{other}'")),
        }
    }
}

/// A knowledge entry as supplied by a caller — no timestamp yet.
///
/// `topic` and `content` must be non-empty; that is the caller's check
/// (the enrichment flow validates before submitting), not the store's.
#[derive(Debug, Clone)]
pub struct KnowledgeEntry {
    pub topic: String,
    pub content: String,
    pub category: Category,
    /// Attribution: a username, `"anonymous"`, or `"system"` for seed data.
    pub created_by: String,
}

/// A knowledge entry as held and persisted by the store.
///
/// `created_at` is assigned by the store at insertion time. Entries are
/// immutable once stored; the only mutation is removal by topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub topic: String,
    pub content: String,
    pub category: Category,
    pub created_by: String,
    /// RFC 3339 timestamp of insertion.
    pub created_at: String,
}

// ── Store ─────────────────────────────────────────────────────────────────────

pub struct KnowledgeStore {
    path: PathBuf,
    entries: Vec<StoredEntry>,
}

impl KnowledgeStore {
    /// Load the store from `path`, falling back to the seed catalogue when
    /// the file is missing or does not parse. The fallback is silent to the
    /// caller — only a warning is logged.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<Vec<StoredEntry>>(&data) {
                Ok(entries) => {
                    debug!(count = entries.len(), path = %path.display(), "knowledge entries loaded");
                    entries
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "malformed knowledge file — using seed catalogue");
                    seed::seed_entries()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "no persisted knowledge — using seed catalogue");
                seed::seed_entries()
            }
        };
        Self { path, entries }
    }

    /// Append `entry` with a store-assigned `created_at` and persist the
    /// whole collection. Duplicate topics are allowed.
    pub fn add(&mut self, entry: KnowledgeEntry) -> Result<StoredEntry, AppError> {
        let stored = StoredEntry {
            topic: entry.topic,
            content: entry.content,
            category: entry.category,
            created_by: entry.created_by,
            created_at: now_iso8601(),
        };
        self.entries.push(stored.clone());
        self.persist()?;
        Ok(stored)
    }

    /// All entries in insertion order, seed entries first.
    pub fn list(&self) -> &[StoredEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry whose topic equals `topic` exactly, then persist.
    /// A topic with no matches is a silent no-op (the file is still rewritten).
    pub fn remove_by_topic(&mut self, topic: &str) -> Result<(), AppError> {
        self.entries.retain(|e| e.topic != topic);
        self.persist()
    }

    /// Entries with exact category equality, in store order.
    pub fn by_category(&self, category: Category) -> Vec<&StoredEntry> {
        self.entries.iter().filter(|e| e.category == category).collect()
    }

    /// Case-insensitive substring search over topic and content.
    /// See [`search::search`] for the matching rules.
    pub fn search(&self, query: &str) -> Vec<&StoredEntry> {
        search::search(&self.entries, query)
    }

    /// Rewrite the persisted blob in full.
    fn persist(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Knowledge(format!("create {}: {e}", parent.display())))?;
        }
        let data = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| AppError::Knowledge(format!("serialise entries: {e}")))?;
        fs::write(&self.path, data)
            .map_err(|e| AppError::Knowledge(format!("cannot write {}: {e}", self.path.display())))
    }
}

/// Current UTC time as an RFC 3339 string with second precision, e.g.
/// `"2026-08-04T12:00:00Z"`.
pub(crate) fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
