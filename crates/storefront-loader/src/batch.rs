//! Request batching with a short scheduling window.
//!
//! Concurrent loads for the same collection are collected into one pending
//! batch. The first load of a window schedules a flush; every load arriving
//! before the flush fires joins the batch, duplicate keys collapse onto the
//! same slot, and the whole batch is served by a single [`BatchFetch`] call.
//! Results fan out to every waiter, including a shared clone of the error
//! when the fetch fails.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::LoadError;

/// Fetches a batch of records in one backend round trip.
///
/// Implemented by the cache coordinator; the loader never talks to the
/// store or the cache directly.
#[async_trait]
pub trait BatchFetch: Send + Sync {
    /// Fetches the values for `keys`.
    ///
    /// The result must have the same length and order as `keys`, with `None`
    /// for keys that do not exist. `keys` is already deduplicated.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fetch fails; the caller delivers it
    /// to every waiter of the batch.
    async fn fetch_batch(&self, keys: &[String]) -> Result<Vec<Option<Value>>, LoadError>;
}

#[async_trait]
impl<F: BatchFetch + ?Sized> BatchFetch for Arc<F> {
    async fn fetch_batch(&self, keys: &[String]) -> Result<Vec<Option<Value>>, LoadError> {
        (**self).fetch_batch(keys).await
    }
}

type Waiter = oneshot::Sender<Result<Option<Value>, LoadError>>;

/// Batches concurrent [`load`](BatchLoader::load) calls into single fetches.
///
/// Cheap to clone; clones share the same pending batch.
pub struct BatchLoader<F> {
    inner: Arc<Inner<F>>,
}

struct Inner<F> {
    fetcher: F,
    window: Duration,
    // `Some` while a batch is pending and its flush is scheduled.
    pending: Mutex<Option<IndexMap<String, Vec<Waiter>>>>,
}

impl<F> Clone for BatchLoader<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F> BatchLoader<F>
where
    F: BatchFetch + 'static,
{
    /// Creates a loader flushing pending batches after `window`.
    #[must_use]
    pub fn new(fetcher: F, window: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                window,
                pending: Mutex::new(None),
            }),
        }
    }

    /// Loads one record by key, joining the current batch window.
    ///
    /// # Errors
    ///
    /// Returns the batch's shared error when the underlying fetch fails.
    pub async fn load(&self, key: &str) -> Result<Option<Value>, LoadError> {
        let (tx, rx) = oneshot::channel();
        self.enqueue(key, tx);
        rx.await
            .map_err(|_| LoadError::batch("batch dispatcher dropped the reply channel"))?
    }

    /// Loads many records, preserving the order and multiplicity of `keys`.
    ///
    /// All keys join the same batch window, so duplicates across the input
    /// still cost one fetch slot each.
    ///
    /// # Errors
    ///
    /// Fails with the batch's shared error when the underlying fetch fails.
    pub async fn load_many(&self, keys: &[String]) -> Result<Vec<Option<Value>>, LoadError> {
        try_join_all(keys.iter().map(|key| self.load(key))).await
    }

    fn enqueue(&self, key: &str, waiter: Waiter) {
        let mut pending = match self.inner.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match pending.as_mut() {
            Some(batch) => {
                batch.entry(key.to_string()).or_default().push(waiter);
            }
            None => {
                let mut batch = IndexMap::new();
                batch.insert(key.to_string(), vec![waiter]);
                *pending = Some(batch);
                self.schedule_flush();
            }
        }
    }

    fn schedule_flush(&self) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.window).await;
            Inner::flush(&inner).await;
        });
    }
}

impl<F> Inner<F>
where
    F: BatchFetch,
{
    async fn flush(inner: &Arc<Self>) {
        let batch = {
            let mut pending = match inner.pending.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            pending.take()
        };
        let Some(batch) = batch else {
            return;
        };

        let keys: Vec<String> = batch.keys().cloned().collect();
        debug!(batch_size = keys.len(), "flushing batch");

        match inner.fetcher.fetch_batch(&keys).await {
            Ok(values) if values.len() == keys.len() => {
                for (value, waiters) in values.into_iter().zip(batch.into_values()) {
                    for waiter in waiters {
                        let _ = waiter.send(Ok(value.clone()));
                    }
                }
            }
            Ok(values) => {
                warn!(
                    expected = keys.len(),
                    got = values.len(),
                    "batch fetch returned wrong number of values"
                );
                let err = LoadError::batch(format!(
                    "batch fetch returned {} values for {} keys",
                    values.len(),
                    keys.len()
                ));
                Self::fail_all(batch, &err);
            }
            Err(err) => {
                warn!(error = %err, batch_size = keys.len(), "batch fetch failed");
                Self::fail_all(batch, &err);
            }
        }
    }

    fn fail_all(batch: IndexMap<String, Vec<Waiter>>, err: &LoadError) {
        for waiters in batch.into_values() {
            for waiter in waiters {
                let _ = waiter.send(Err(err.clone()));
            }
        }
    }
}
