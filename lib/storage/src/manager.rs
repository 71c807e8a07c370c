use crate::persistence::SnapshotPersistence;
use relevant_core::{ContentIndex, ContentItem, Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

const DEFAULT_SAVE_INTERVAL: Duration = Duration::from_secs(300);

/// Owns the content index and its on-disk snapshot lifecycle.
///
/// A new manager restores any existing snapshot into a fresh index and
/// spawns a periodic background save. Mutations go straight to the shared
/// index; durability is best-effort between saves.
pub struct StorageManager {
    index: Arc<ContentIndex>,
    data_dir: PathBuf,
    persistence: Arc<SnapshotPersistence>,
}

impl StorageManager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Self::with_save_interval(data_dir, Some(DEFAULT_SAVE_INTERVAL))
    }

    /// Create a manager with an explicit save interval. `None` disables the
    /// background save thread (tests, one-shot tools).
    pub fn with_save_interval<P: AsRef<Path>>(
        data_dir: P,
        save_interval: Option<Duration>,
    ) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let persistence = Arc::new(SnapshotPersistence::new(&data_dir));
        let index = Arc::new(ContentIndex::new());

        if let Some(snapshot) = persistence.load()? {
            for vocabulary in snapshot.vocabularies {
                index.upsert_vocabulary(vocabulary);
            }
            index.upsert_terms(snapshot.terms);
            for item in snapshot.items {
                let payload = match item.payload {
                    Some(raw) => Some(
                        serde_json::from_str(&raw)
                            .map_err(|e| Error::Serialization(e.to_string()))?,
                    ),
                    None => None,
                };
                let mut restored = ContentItem::new(item.id, item.content_type, item.created)
                    .with_terms(item.terms)
                    .with_published(item.published);
                restored.payload = payload;
                index.upsert(restored);
            }
            info!(
                items = index.count(),
                terms = index.term_count(),
                saved_at = %snapshot.saved_at,
                "index snapshot restored"
            );
        }

        let manager = Self {
            index,
            data_dir,
            persistence,
        };

        if let Some(interval) = save_interval {
            manager.start_background_save(interval);
        }

        Ok(manager)
    }

    fn start_background_save(&self, interval: Duration) {
        let index = self.index.clone();
        let persistence = self.persistence.clone();

        std::thread::spawn(move || loop {
            std::thread::sleep(interval);
            if let Err(e) = persistence.save(&index) {
                error!("background save failed: {e}");
            }
        });
    }

    /// Shared handle to the content index.
    #[inline]
    #[must_use]
    pub fn index(&self) -> Arc<ContentIndex> {
        self.index.clone()
    }

    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Write a snapshot now.
    pub fn save(&self) -> Result<()> {
        self.persistence.save(&self.index)
    }

    /// Unix time of the most recent successful save, 0 if none.
    #[must_use]
    pub fn last_save_time(&self) -> u64 {
        SnapshotPersistence::last_save_time()
    }
}
