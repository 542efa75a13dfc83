//! Local SQLite index of DART corporation codes.
//!
//! Every DART query is keyed by an 8-digit `corp_code`, so looking a company
//! up by name needs DART's registry stored locally. The registry is loaded
//! lazily on the first lookup, or at startup when configured.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, params};
use serde::Serialize;
use tracing::{debug, info};

use super::client::DartClient;
use super::corp_code::CorpRecord;
use super::error::{DartError, DartResult};

/// Largest number of matches a lookup may return.
pub const MAX_MATCHES: usize = 100;

/// A lookup hit with its similarity to the query.
#[derive(Debug, Clone, Serialize)]
pub struct CorpMatch {
    #[serde(flatten)]
    pub record: CorpRecord,
    pub similarity: f64,
}

/// SQLite-backed corporation code index.
pub struct CorpIndex {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
    sync_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for CorpIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpIndex").field("path", &self.path).finish()
    }
}

impl CorpIndex {
    /// Open the index at `path`, or in memory when `path` is `None`.
    pub fn open(path: Option<&Path>) -> DartResult<Self> {
        let conn = match path {
            Some(path) => Connection::open(path)?,
            None => Connection::open_in_memory()?,
        };
        let index = Self {
            conn: Mutex::new(conn),
            path: path.map(Path::to_path_buf),
            sync_lock: tokio::sync::Mutex::new(()),
        };
        index.init_tables()?;
        Ok(index)
    }

    pub fn in_memory() -> DartResult<Self> {
        Self::open(None)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn init_tables(&self) -> DartResult<()> {
        let conn = self.conn();
        conn.execute(
            "CREATE TABLE IF NOT EXISTS corp_codes (
                corp_code TEXT PRIMARY KEY,
                corp_name TEXT NOT NULL,
                corp_eng_name TEXT NOT NULL DEFAULT '',
                stock_code TEXT,
                modify_date TEXT NOT NULL DEFAULT ''
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_corp_codes_name ON corp_codes(corp_name)",
            [],
        )?;
        Ok(())
    }

    /// Number of stored corporations.
    pub fn count(&self) -> DartResult<usize> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM corp_codes", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    pub fn is_empty(&self) -> DartResult<bool> {
        Ok(self.count()? == 0)
    }

    /// Replace the whole index with `records` in one transaction.
    pub fn replace_all(&self, records: &[CorpRecord]) -> DartResult<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM corp_codes", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO corp_codes
                 (corp_code, corp_name, corp_eng_name, stock_code, modify_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.corp_code,
                    record.corp_name,
                    record.corp_eng_name,
                    record.stock_code,
                    record.modify_date,
                ])?;
            }
        }
        let stored: i64 = tx.query_row("SELECT COUNT(*) FROM corp_codes", [], |row| row.get(0))?;
        tx.commit()?;

        let unique: HashSet<&str> = records.iter().map(|r| r.corp_code.as_str()).collect();
        let stored = usize::try_from(stored).unwrap_or(0);
        if stored != unique.len() {
            return Err(DartError::Task(format!(
                "stored {} corporations but received {}",
                stored,
                unique.len()
            )));
        }
        Ok(stored)
    }

    /// Find companies whose name matches the SQL `LIKE` pattern `%name%`.
    ///
    /// `%` and `_` in `name` keep their `LIKE` meaning. Matches are ranked by
    /// bigram similarity to `name`, then listed companies first, then shorter
    /// names, then `corp_code`.
    pub fn search(&self, name: &str, limit: usize) -> DartResult<Vec<CorpMatch>> {
        let name = name.trim();
        let pattern = format!("%{}%", name);

        let records = {
            let conn = self.conn();
            let mut stmt = conn.prepare(
                "SELECT corp_code, corp_name, corp_eng_name, stock_code, modify_date
                 FROM corp_codes WHERE corp_name LIKE ?1",
            )?;
            let rows = stmt.query_map(params![pattern], |row| {
                Ok(CorpRecord {
                    corp_code: row.get(0)?,
                    corp_name: row.get(1)?,
                    corp_eng_name: row.get(2)?,
                    stock_code: row.get(3)?,
                    modify_date: row.get(4)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let query: String = name.chars().filter(|c| *c != '%' && *c != '_').collect();
        let mut matches: Vec<CorpMatch> = records
            .into_iter()
            .map(|record| CorpMatch {
                similarity: bigram_similarity(&query, &record.corp_name),
                record,
            })
            .collect();

        matches.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| b.record.is_listed().cmp(&a.record.is_listed()))
                .then_with(|| {
                    a.record
                        .corp_name
                        .chars()
                        .count()
                        .cmp(&b.record.corp_name.chars().count())
                })
                .then_with(|| a.record.corp_code.cmp(&b.record.corp_code))
        });
        matches.truncate(limit.clamp(1, MAX_MATCHES));

        debug!(query = name, hits = matches.len(), "Corporation lookup");
        Ok(matches)
    }

    /// Download the registry from DART and replace the index with it.
    pub async fn sync(self: &Arc<Self>, client: &DartClient) -> DartResult<usize> {
        let _guard = self.sync_lock.lock().await;
        self.sync_locked(client).await
    }

    /// Load the registry unless the index already holds data.
    pub async fn ensure_loaded(self: &Arc<Self>, client: &DartClient) -> DartResult<usize> {
        let _guard = self.sync_lock.lock().await;
        let count = self.count()?;
        if count > 0 {
            return Ok(count);
        }
        self.sync_locked(client).await
    }

    async fn sync_locked(self: &Arc<Self>, client: &DartClient) -> DartResult<usize> {
        info!("Downloading DART corporation codes");
        let records = client.fetch_corp_codes().await?;

        let index = Arc::clone(self);
        let stored = tokio::task::spawn_blocking(move || index.replace_all(&records))
            .await
            .map_err(|e| DartError::Task(e.to_string()))??;

        info!(corporations = stored, "Corporation index loaded");
        Ok(stored)
    }

    /// Run [`CorpIndex::search`] on the blocking pool.
    pub async fn search_blocking(
        self: &Arc<Self>,
        name: String,
        limit: usize,
    ) -> DartResult<Vec<CorpMatch>> {
        let index = Arc::clone(self);
        tokio::task::spawn_blocking(move || index.search(&name, limit))
            .await
            .map_err(|e| DartError::Task(e.to_string()))?
    }

    /// Run [`CorpIndex::count`] on the blocking pool.
    pub async fn count_blocking(self: &Arc<Self>) -> DartResult<usize> {
        let index = Arc::clone(self);
        tokio::task::spawn_blocking(move || index.count())
            .await
            .map_err(|e| DartError::Task(e.to_string()))?
    }
}

fn bigrams(text: &str) -> Vec<(char, char)> {
    let chars: Vec<char> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Dice coefficient over character bigrams, in `0.0..=1.0`.
///
/// Single-character strings compare by equality.
pub fn bigram_similarity(a: &str, b: &str) -> f64 {
    let (left, right) = (bigrams(a), bigrams(b));
    if left.is_empty() || right.is_empty() {
        let norm = |s: &str| s.trim().to_lowercase();
        return if !norm(a).is_empty() && norm(a) == norm(b) {
            1.0
        } else {
            0.0
        };
    }

    let mut remaining = right.clone();
    let mut shared = 0usize;
    for gram in &left {
        if let Some(pos) = remaining.iter().position(|g| g == gram) {
            remaining.swap_remove(pos);
            shared += 1;
        }
    }
    (2 * shared) as f64 / (left.len() + right.len()) as f64
}
