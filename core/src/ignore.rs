//! Ignore rules and their persistence backends.
//!
//! An [`IgnoreRule`] records a user's decision to suppress future matches for
//! a rule id or a whole category id. Two backends are provided:
//! - `InMemoryIgnoreStore`: thread-safe map, used in tests and for ephemeral
//!   sessions.
//! - `RedbIgnoreStore`: persistent, ACID-backed storage using `redb`.
//!
//! Adds are idempotent: a rule is identified by `(id, rule_type)` and adding
//! it twice keeps the first entry.

use redb::ReadableTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use thiserror::Error;

/// Whether an ignore rule suppresses a single rule id or a category id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreRuleType {
    Rule,
    Category,
}

impl IgnoreRuleType {
    fn tag(self) -> &'static str {
        match self {
            IgnoreRuleType::Rule => "rule",
            IgnoreRuleType::Category => "category",
        }
    }
}

/// A persisted user decision to suppress matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnoreRule {
    /// The suppressed rule id or category id.
    pub id: String,
    pub rule_type: IgnoreRuleType,
    /// Human-readable label shown in the ignore-list UI.
    pub display_title: String,
    pub created_at: SystemTime,
}

impl IgnoreRule {
    pub fn new(
        id: impl Into<String>,
        rule_type: IgnoreRuleType,
        display_title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            rule_type,
            display_title: display_title.into(),
            created_at: SystemTime::now(),
        }
    }

    /// Storage key. Uniqueness is `(id, rule_type)`.
    fn key(&self) -> String {
        format!("{}:{}", self.rule_type.tag(), self.id)
    }
}

/// Errors from the ignore-rule backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ignore store transaction failed: {0}")]
    Transaction(#[from] redb::TransactionError),
    #[error("ignore store table unavailable: {0}")]
    Table(#[from] redb::TableError),
    #[error("ignore store read/write failed: {0}")]
    Storage(#[from] redb::StorageError),
    #[error("ignore store commit failed: {0}")]
    Commit(#[from] redb::CommitError),
    #[error("ignore store open failed: {0}")]
    Open(#[from] redb::DatabaseError),
    #[error("ignore rule encoding failed: {0}")]
    Codec(#[from] bincode::Error),
    #[error("ignore store lock poisoned")]
    Poisoned,
}

/// Persisted add/enumerate of ignore rules.
///
/// The orchestrator only ever adds rules and fetches the full list; edits and
/// deletions happen in the host app's settings screen against the same
/// backing store.
pub trait IgnoreRuleStore: Send + Sync {
    /// Idempotently add a rule. Returns `true` if it was newly inserted,
    /// `false` if an entry with the same `(id, rule_type)` already existed.
    fn add(&self, rule: IgnoreRule) -> Result<bool, StoreError>;

    /// Enumerate every persisted rule.
    fn get_all(&self) -> Result<Vec<IgnoreRule>, StoreError>;
}

/// Thread-safe in-memory ignore store.
#[derive(Clone, Debug, Default)]
pub struct InMemoryIgnoreStore {
    inner: Arc<RwLock<HashMap<String, IgnoreRule>>>,
}

impl InMemoryIgnoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IgnoreRuleStore for InMemoryIgnoreStore {
    fn add(&self, rule: IgnoreRule) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let key = rule.key();
        if map.contains_key(&key) {
            return Ok(false);
        }
        map.insert(key, rule);
        Ok(true)
    }

    fn get_all(&self) -> Result<Vec<IgnoreRule>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.values().cloned().collect())
    }
}

/// Redb-backed ignore store.
///
/// One table keyed by `"{type}:{id}"`, values are bincode-encoded
/// [`IgnoreRule`]s. Every operation is a single transaction.
pub struct RedbIgnoreStore {
    db: redb::Database,
}

impl RedbIgnoreStore {
    const TABLE_DEF: redb::TableDefinition<'static, &'static str, &'static [u8]> =
        redb::TableDefinition::new("ignore_rules");

    /// Create or open the database at `path`.
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let db = redb::Database::create(path.as_ref())?;
        // Make sure the table exists so get_all on a fresh database works.
        let write_txn = db.begin_write()?;
        write_txn.open_table(Self::TABLE_DEF)?;
        write_txn.commit()?;
        Ok(RedbIgnoreStore { db })
    }
}

impl IgnoreRuleStore for RedbIgnoreStore {
    fn add(&self, rule: IgnoreRule) -> Result<bool, StoreError> {
        let key = rule.key();
        let write_txn = self.db.begin_write()?;
        let inserted = {
            let mut table = write_txn.open_table(Self::TABLE_DEF)?;
            if table.get(key.as_str())?.is_some() {
                false
            } else {
                let encoded = bincode::serialize(&rule)?;
                table.insert(key.as_str(), encoded.as_slice())?;
                true
            }
        };
        write_txn.commit()?;
        Ok(inserted)
    }

    fn get_all(&self) -> Result<Vec<IgnoreRule>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(Self::TABLE_DEF)?;
        let mut out = Vec::new();
        for item in table.iter()? {
            let (_, value) = item?;
            out.push(bincode::deserialize(value.value())?);
        }
        Ok(out)
    }
}
