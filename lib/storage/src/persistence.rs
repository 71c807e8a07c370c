use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{DateTime, Utc};
use relevant_core::{ContentId, ContentIndex, Error, Result, Term, TermId, Vocabulary};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static LAST_SAVE_TIME: AtomicU64 = AtomicU64::new(0);

const SNAPSHOT_FILE: &str = "index.snapshot";

/// Serialized form of the whole index.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub vocabularies: Vec<Vocabulary>,
    pub terms: Vec<Term>,
    pub items: Vec<ItemSnapshot>,
    pub saved_at: DateTime<Utc>,
}

/// One content item in a snapshot. The payload is kept as a JSON string so
/// the bincode stream contains no self-describing values.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub id: ContentId,
    pub content_type: String,
    pub published: bool,
    pub created: i64,
    pub terms: Vec<TermId>,
    pub payload: Option<String>,
}

/// Atomic bincode snapshots of a [`ContentIndex`].
pub struct SnapshotPersistence {
    snapshot_path: PathBuf,
}

impl SnapshotPersistence {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            snapshot_path: data_dir.as_ref().join(SNAPSHOT_FILE),
        }
    }

    #[inline]
    #[must_use]
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Serialize the index and replace the snapshot file atomically.
    pub fn save(&self, index: &ContentIndex) -> Result<()> {
        let snapshot = IndexSnapshot {
            vocabularies: index.list_vocabularies(),
            terms: index.all_terms(),
            items: index
                .all_items()
                .into_iter()
                .map(|item| {
                    let payload = match &item.payload {
                        Some(value) => Some(
                            serde_json::to_string(value)
                                .map_err(|e| Error::Serialization(e.to_string()))?,
                        ),
                        None => None,
                    };
                    Ok(ItemSnapshot {
                        id: item.id,
                        content_type: item.content_type,
                        published: item.published,
                        created: item.created,
                        terms: item.terms,
                        payload,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            saved_at: Utc::now(),
        };

        let data =
            bincode::serialize(&snapshot).map_err(|e| Error::Serialization(e.to_string()))?;

        let file = AtomicFile::new(&self.snapshot_path, OverwriteBehavior::AllowOverwrite);
        file.write(|f| f.write_all(&data))
            .map_err(|e| Error::Storage(e.to_string()))?;

        LAST_SAVE_TIME.store(snapshot.saved_at.timestamp() as u64, Ordering::Release);
        Ok(())
    }

    /// Load the snapshot, or `Ok(None)` when none has been written yet.
    pub fn load(&self) -> Result<Option<IndexSnapshot>> {
        if !self.snapshot_path.exists() {
            return Ok(None);
        }
        let data = std::fs::read(&self.snapshot_path)?;
        let snapshot: IndexSnapshot =
            bincode::deserialize(&data).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(Some(snapshot))
    }

    /// Unix time of the most recent successful save, 0 if none.
    #[must_use]
    pub fn last_save_time() -> u64 {
        LAST_SAVE_TIME.load(Ordering::Acquire)
    }
}
