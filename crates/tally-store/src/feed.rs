//! Change notification for stored collections.
//!
//! Two sources feed the same broadcast channel: every repository write
//! publishes a [`ChangeOrigin::Write`] event, and a [`Poller`] publishes a
//! [`ChangeOrigin::Poll`] event when the stored text of a key changes
//! underneath us (for example another `tly` process saved an audit).

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::error::StoreError;
use crate::store::KeyValueStore;

const FEED_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Published by a repository write in this process.
    Write,
    /// Detected by the poller.
    Poll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub key: String,
    pub origin: ChangeOrigin,
}

/// Broadcast channel of collection-changed events.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(FEED_CAPACITY);
        Self { sender }
    }

    /// Publish an event. Having no subscribers is fine.
    pub fn publish(&self, key: &str, origin: ChangeOrigin) {
        let delivered = self
            .sender
            .send(ChangeEvent {
                key: key.to_string(),
                origin,
            })
            .unwrap_or(0);
        tracing::trace!(key, ?origin, delivered, "change published");
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }
}

// ---------------------------------------------------------------------------
// Poller
// ---------------------------------------------------------------------------

/// Polls a set of keys and publishes when their stored text changes.
pub struct Poller {
    store: Arc<dyn KeyValueStore>,
    feed: ChangeFeed,
    interval: Duration,
    fingerprints: HashMap<String, Option<u64>>,
}

/// Hash of the stored text, `None` when the key is absent.
fn fingerprint(store: &dyn KeyValueStore, key: &str) -> Result<Option<u64>, StoreError> {
    Ok(store.get(key)?.map(|text| {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        hasher.finish()
    }))
}

impl Poller {
    /// Start watching `keys`. Their current contents are the baseline, so
    /// only later changes are reported.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        feed: ChangeFeed,
        keys: &[&str],
        interval: Duration,
    ) -> Self {
        let fingerprints = keys
            .iter()
            .map(|key| {
                let baseline = fingerprint(store.as_ref(), key).unwrap_or_else(|error| {
                    tracing::warn!(key, %error, "poll baseline read failed");
                    None
                });
                ((*key).to_string(), baseline)
            })
            .collect();
        Self {
            store,
            feed,
            interval,
            fingerprints,
        }
    }

    /// Compare every key against its last fingerprint, publish for each one
    /// that changed, and return the changed keys. A key whose read fails
    /// keeps its last fingerprint and is not reported.
    pub fn check(&mut self) -> Vec<String> {
        let mut changed = Vec::new();
        for (key, last) in &mut self.fingerprints {
            let current = match fingerprint(self.store.as_ref(), key) {
                Ok(current) => current,
                Err(error) => {
                    tracing::warn!(key = %key, %error, "poll read failed");
                    continue;
                }
            };
            if current != *last {
                *last = current;
                self.feed.publish(key, ChangeOrigin::Poll);
                changed.push(key.clone());
            }
        }
        changed.sort();
        changed
    }

    /// Poll at the configured interval until `shutdown` becomes true or its
    /// sender is dropped.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        tracing::debug!(interval_secs = self.interval.as_secs_f64(), "poller started");
        let mut ticker = tokio::time::interval(self.interval);
        ticker.tick().await;

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    let changed = self.check();
                    if !changed.is_empty() {
                        tracing::debug!(?changed, "poller detected external change");
                    }
                }
                result = shutdown.changed() => {
                    if result.is_err() {
                        break;
                    }
                }
            }
        }
        tracing::debug!("poller stopped");
    }

    /// Run on a background task.
    #[must_use]
    pub fn spawn(self) -> PollerHandle {
        let (shutdown, receiver) = watch::channel(false);
        let task = tokio::spawn(self.run(receiver));
        PollerHandle { shutdown, task }
    }
}

/// Handle to a spawned [`Poller`].
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Signal the poller and wait for it to exit.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(error) = self.task.await {
            tracing::warn!(%error, "poller task ended abnormally");
        }
    }
}
