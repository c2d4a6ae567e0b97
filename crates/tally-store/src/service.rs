//! Service layer orchestrating collection reads and writes.
//!
//! `TallyService` owns the audit and schedule repositories, the class catalog,
//! and the change feed. Domain methods are implemented as `impl TallyService`
//! blocks under `repos/`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tally_config::TallyConfig;
use tally_core::catalog::ClassCatalog;
use tally_core::entities::{AuditRecord, ScheduleEntry};

use crate::feed::{ChangeFeed, Poller};
use crate::repository::Repository;
use crate::store::{FileStore, KeyValueStore, MemoryStore};

/// Store keys of the two collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionKeys {
    pub audits: String,
    pub schedule: String,
}

impl Default for CollectionKeys {
    fn default() -> Self {
        Self {
            audits: "audits".to_string(),
            schedule: "schedule".to_string(),
        }
    }
}

pub struct TallyService {
    store: Arc<dyn KeyValueStore>,
    feed: ChangeFeed,
    keys: CollectionKeys,
    audits: Repository<AuditRecord>,
    schedule: Repository<ScheduleEntry>,
    catalog: ClassCatalog,
    default_target: u32,
}

impl TallyService {
    /// Create a service over any backend.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, keys: CollectionKeys, catalog: ClassCatalog) -> Self {
        let feed = ChangeFeed::new();
        let audits = Repository::new(Arc::clone(&store), keys.audits.clone(), feed.clone());
        let schedule = Repository::new(Arc::clone(&store), keys.schedule.clone(), feed.clone());
        Self {
            store,
            feed,
            keys,
            audits,
            schedule,
            catalog,
            default_target: 1,
        }
    }

    /// File-backed service for a project, configured from `config`.
    ///
    /// `data_dir` overrides the configured data directory.
    #[must_use]
    pub fn open(config: &TallyConfig, project_root: &Path, data_dir: Option<PathBuf>) -> Self {
        let dir = data_dir.unwrap_or_else(|| config.storage.resolve_data_dir(project_root));
        let catalog = ClassCatalog::load(
            config
                .catalog
                .resolve_classes_path(project_root)
                .as_deref(),
        );
        let keys = CollectionKeys {
            audits: config.storage.audits_key.clone(),
            schedule: config.storage.schedule_key.clone(),
        };
        tracing::debug!(data_dir = %dir.display(), classes = catalog.len(), "opening file store");
        Self::new(Arc::new(FileStore::new(dir)), keys, catalog)
            .with_default_target(config.schedule.default_monthly_target)
    }

    /// Memory-backed service with the built-in catalog.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            CollectionKeys::default(),
            ClassCatalog::builtin(),
        )
    }

    /// Target used when schedule input does not carry one.
    #[must_use]
    pub fn with_default_target(mut self, target: u32) -> Self {
        self.default_target = target.max(1);
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    #[must_use]
    pub const fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    #[must_use]
    pub const fn keys(&self) -> &CollectionKeys {
        &self.keys
    }

    #[must_use]
    pub const fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn default_target(&self) -> u32 {
        self.default_target
    }

    pub(crate) const fn audits(&self) -> &Repository<AuditRecord> {
        &self.audits
    }

    pub(crate) const fn schedule(&self) -> &Repository<ScheduleEntry> {
        &self.schedule
    }

    /// A poller over both collections publishing on this service's feed.
    #[must_use]
    pub fn poller(&self, interval: Duration) -> Poller {
        Poller::new(
            Arc::clone(&self.store),
            self.feed.clone(),
            &[self.keys.audits.as_str(), self.keys.schedule.as_str()],
            interval,
        )
    }
}
