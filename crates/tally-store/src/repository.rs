//! Typed collection access over a key-value store.
//!
//! A collection is a JSON array stored under one key. A value that is not a
//! JSON array is logged and treated as empty; the next write replaces it.
//! Array elements that do not read as `T` are skipped on read and written
//! back unchanged at their original position.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::{Deserialize, DeserializeOwned};
use serde_json::Value;
use tally_core::entities::Identified;
use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::feed::{ChangeEvent, ChangeFeed, ChangeOrigin};
use crate::store::KeyValueStore;

struct Loaded<T> {
    items: Vec<T>,
    unreadable: Vec<(usize, Value)>,
}

pub struct Repository<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    feed: ChangeFeed,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Repository<T>
where
    T: Identified + Serialize + DeserializeOwned,
{
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, feed: ChangeFeed) -> Self {
        Self {
            store,
            key: key.into(),
            feed,
            _entity: PhantomData,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Every stored item in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` only if the backend cannot be read. Unparseable
    /// contents yield an empty list.
    pub fn all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.load()?.items)
    }

    /// The item with `id`, if present.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    pub fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.all()?.into_iter().find(|item| item.id() == id))
    }

    /// Append one item to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be read or written.
    pub fn append(&self, item: T) -> Result<(), StoreError> {
        let Loaded {
            mut items,
            unreadable,
        } = self.load()?;
        items.push(item);
        self.write(&items, &unreadable)
    }

    /// Remove the item with `id`. Returns whether anything was removed; a
    /// missing id leaves the stored value untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be read or written.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let Loaded {
            mut items,
            unreadable,
        } = self.load()?;
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Ok(false);
        }
        self.write(&items, &unreadable)?;
        Ok(true)
    }

    /// Overwrite the readable part of the collection and publish a change
    /// event. Elements that could not be read as `T` stay where they were.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if reading, encoding or writing fails.
    pub fn replace_all(&self, items: &[T]) -> Result<(), StoreError> {
        let Loaded { unreadable, .. } = self.load()?;
        self.write(items, &unreadable)
    }

    fn load(&self) -> Result<Loaded<T>, StoreError> {
        let mut loaded = Loaded {
            items: Vec::new(),
            unreadable: Vec::new(),
        };
        let Some(text) = self.store.get(&self.key)? else {
            return Ok(loaded);
        };
        if text.trim().is_empty() {
            return Ok(loaded);
        }
        let elements = match serde_json::from_str::<Vec<Value>>(&text) {
            Ok(elements) => elements,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "discarding malformed collection");
                return Ok(loaded);
            }
        };
        for (index, element) in elements.into_iter().enumerate() {
            match T::deserialize(&element) {
                Ok(item) => loaded.items.push(item),
                Err(error) => {
                    tracing::warn!(key = %self.key, index, %error, "keeping unreadable element");
                    loaded.unreadable.push((index, element));
                }
            }
        }
        Ok(loaded)
    }

    fn write(&self, items: &[T], unreadable: &[(usize, Value)]) -> Result<(), StoreError> {
        let encode = |source| StoreError::Encode {
            key: self.key.clone(),
            source,
        };
        let mut elements = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(encode)?;
        for (index, element) in unreadable {
            elements.insert((*index).min(elements.len()), element.clone());
        }
        let text = serde_json::to_string(&elements).map_err(encode)?;
        self.store.set(&self.key, &text)?;
        tracing::debug!(
            key = %self.key,
            count = items.len(),
            kept = unreadable.len(),
            "collection replaced"
        );
        self.feed.publish(&self.key, ChangeOrigin::Write);
        Ok(())
    }

    /// Receive change events for every collection on this feed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.feed.subscribe()
    }
}
