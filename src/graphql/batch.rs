//! Request-scoped batching and caching primitive
//!
//! `BatchLoader` coalesces the many single-key lookups issued while resolving
//! one GraphQL request into one bulk fetch per entity kind, solving the N+1
//! query problem. Keys enqueued while a collection window is open are flushed
//! together: the window closes after a short delay or when the batch reaches
//! a size cap, whichever comes first. Results are cached for the lifetime of
//! the loader (one request), with manual `prime`/`clear` cache control for
//! resolvers and mutation handlers.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::mem;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;

/// How long a collection window stays open before the pending keys flush.
const FLUSH_DELAY: Duration = Duration::from_millis(1);

/// Pending-key cap; reaching it flushes the batch without waiting for the
/// delay window.
const MAX_BATCH_KEYS: usize = 250;

/// A bulk-fetch function for one entity kind.
///
/// Implementors map a deduplicated key set to whatever subset of values
/// exists. Keys missing from the returned map resolve as absent, which is not
/// an error. Collection-valued fetchers (posts by author, subscriptions by
/// subscriber) should instead insert an empty collection for keys with no
/// rows so callers see "empty", not "absent".
pub trait BatchFetch: Send + Sync + 'static {
    type Key: Clone + Eq + Hash + Send + Sync + 'static;
    type Value: Clone + Send + Sync + 'static;
    type Error: Clone + Send + Sync + 'static;

    fn fetch(
        &self,
        keys: &[Self::Key],
    ) -> impl Future<Output = Result<HashMap<Self::Key, Self::Value>, Self::Error>> + Send;
}

/// Error surfaced to a `load` caller.
#[derive(Debug, Clone, Error)]
pub enum BatchError<E> {
    /// The bulk fetch for the batch containing this key failed. Every caller
    /// waiting on that batch receives the same underlying error.
    #[error("bulk fetch failed: {0}")]
    Fetch(E),

    /// The flush task went away before delivering a result.
    #[error("batch flush task dropped before delivering a result")]
    Dispatch,
}

enum CacheEntry<F: BatchFetch> {
    /// The key is part of an open or in-flight batch. `waiters` receive the
    /// outcome when the batch resolves. `evicted` is set by `clear` while the
    /// batch is in flight: waiters are still answered, but the result is not
    /// retained in the cache.
    InFlight {
        waiters: Vec<oneshot::Sender<Result<Option<F::Value>, F::Error>>>,
        evicted: bool,
    },
    /// The key resolved (or was primed). `None` records a confirmed absence
    /// so repeated lookups of a missing key do not refetch.
    Ready(Option<F::Value>),
}

struct State<F: BatchFetch> {
    cache: HashMap<F::Key, CacheEntry<F>>,
    pending: Vec<F::Key>,
    flush_scheduled: bool,
}

enum Enqueued<F: BatchFetch> {
    Ready(Option<F::Value>),
    Waiting(oneshot::Receiver<Result<Option<F::Value>, F::Error>>),
}

/// Batching, deduplicating, request-lifetime cache in front of one bulk-fetch
/// function.
///
/// Cheap to clone; clones share the same cache and pending batch.
pub struct BatchLoader<F: BatchFetch> {
    fetcher: Arc<F>,
    state: Arc<Mutex<State<F>>>,
    delay: Duration,
    max_batch: usize,
}

impl<F: BatchFetch> Clone for BatchLoader<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            state: Arc::clone(&self.state),
            delay: self.delay,
            max_batch: self.max_batch,
        }
    }
}

impl<F: BatchFetch> BatchLoader<F> {
    /// Create a loader with the default collection window.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            state: Arc::new(Mutex::new(State {
                cache: HashMap::new(),
                pending: Vec::new(),
                flush_scheduled: false,
            })),
            delay: FLUSH_DELAY,
            max_batch: MAX_BATCH_KEYS,
        }
    }

    /// Override the flush delay (mainly for tests).
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Override the batch size cap (mainly for tests).
    pub fn max_batch_size(mut self, max_batch: usize) -> Self {
        assert!(max_batch > 0, "batch size cap must be positive");
        self.max_batch = max_batch;
        self
    }

    /// Access the underlying bulk fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Load the value for `key`.
    ///
    /// A cached key resolves immediately; an uncached key joins the current
    /// collection window and resolves when the batch does. Repeated loads of
    /// the same key share one fetch and observe the same value. A key the
    /// fetch did not return resolves to `Ok(None)`.
    pub async fn load(&self, key: F::Key) -> Result<Option<F::Value>, BatchError<F::Error>> {
        self.wait(self.enqueue(key)).await
    }

    /// Load many keys, preserving input-order correspondence in the output
    /// (absent keys yield `None` at their position).
    ///
    /// All keys are registered in the pending batch before the first await,
    /// so one `load_many` call never spans more batches than the window
    /// forces.
    pub async fn load_many<I>(
        &self,
        keys: I,
    ) -> Result<Vec<Option<F::Value>>, BatchError<F::Error>>
    where
        I: IntoIterator<Item = F::Key>,
    {
        let slots: Vec<Enqueued<F>> = keys.into_iter().map(|key| self.enqueue(key)).collect();
        let mut values = Vec::with_capacity(slots.len());
        for slot in slots {
            values.push(self.wait(slot).await?);
        }
        Ok(values)
    }

    /// Seed the cache with an already-known value, skipping a future fetch
    /// for `key`. Never overwrites: a no-op if the key is already cached or
    /// in flight.
    pub fn prime(&self, key: F::Key, value: F::Value) {
        let mut state = self.state.lock().expect("loader state poisoned");
        state
            .cache
            .entry(key)
            .or_insert(CacheEntry::Ready(Some(value)));
    }

    /// Evict a cached entry so a subsequent `load` fetches fresh data.
    /// Mutation handlers call this for every key whose underlying record they
    /// changed. Clearing an in-flight key still answers its waiters with the
    /// batch result when it lands, including loads that joined after the
    /// clear; the result is just not retained, so the first load after the
    /// batch resolves fetches fresh.
    pub fn clear(&self, key: &F::Key) {
        let mut state = self.state.lock().expect("loader state poisoned");
        match state.cache.get_mut(key) {
            Some(CacheEntry::Ready(_)) => {
                state.cache.remove(key);
            }
            Some(CacheEntry::InFlight { evicted, .. }) => *evicted = true,
            None => {}
        }
    }

    fn enqueue(&self, key: F::Key) -> Enqueued<F> {
        let mut state = self.state.lock().expect("loader state poisoned");
        let state = &mut *state;
        match state.cache.entry(key.clone()) {
            Entry::Occupied(mut entry) => match entry.get_mut() {
                CacheEntry::Ready(value) => Enqueued::Ready(value.clone()),
                CacheEntry::InFlight { waiters, .. } => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Enqueued::Waiting(rx)
                }
            },
            Entry::Vacant(entry) => {
                let (tx, rx) = oneshot::channel();
                entry.insert(CacheEntry::InFlight {
                    waiters: vec![tx],
                    evicted: false,
                });
                state.pending.push(key);

                if state.pending.len() >= self.max_batch {
                    // Size cap reached: flush right away. A delayed flush that
                    // is already scheduled will find nothing pending and fall
                    // through.
                    let keys = mem::take(&mut state.pending);
                    let fetcher = Arc::clone(&self.fetcher);
                    let shared = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        run_batch(fetcher, shared, keys).await;
                    });
                } else if !state.flush_scheduled {
                    state.flush_scheduled = true;
                    let fetcher = Arc::clone(&self.fetcher);
                    let shared = Arc::clone(&self.state);
                    let delay = self.delay;
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let keys = {
                            let mut state = shared.lock().expect("loader state poisoned");
                            state.flush_scheduled = false;
                            mem::take(&mut state.pending)
                        };
                        if !keys.is_empty() {
                            run_batch(fetcher, shared, keys).await;
                        }
                    });
                }

                Enqueued::Waiting(rx)
            }
        }
    }

    async fn wait(&self, slot: Enqueued<F>) -> Result<Option<F::Value>, BatchError<F::Error>> {
        match slot {
            Enqueued::Ready(value) => Ok(value),
            Enqueued::Waiting(rx) => match rx.await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(err)) => Err(BatchError::Fetch(err)),
                Err(_) => Err(BatchError::Dispatch),
            },
        }
    }
}

/// Run one bulk fetch and fan the outcome back to every waiter.
///
/// On success each key's value (or absence) is delivered and cached, unless
/// the key was cleared mid-flight. On failure every waiter receives the same
/// error and the keys are left uncached so a later `load` can retry.
async fn run_batch<F: BatchFetch>(
    fetcher: Arc<F>,
    state: Arc<Mutex<State<F>>>,
    keys: Vec<F::Key>,
) {
    let result = fetcher.fetch(&keys).await;
    let mut state = state.lock().expect("loader state poisoned");
    match result {
        Ok(mut values) => {
            for key in keys {
                let value = values.remove(&key);
                if let Some(CacheEntry::InFlight { waiters, evicted }) = state.cache.remove(&key) {
                    for waiter in waiters {
                        let _ = waiter.send(Ok(value.clone()));
                    }
                    if !evicted {
                        state.cache.insert(key, CacheEntry::Ready(value));
                    }
                }
            }
        }
        Err(err) => {
            for key in keys {
                if let Some(CacheEntry::InFlight { waiters, .. }) = state.cache.remove(&key) {
                    for waiter in waiters {
                        let _ = waiter.send(Err(err.clone()));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::sync::Notify;

    /// Mock fetcher over a fixed key→value table that records every batch it
    /// receives.
    struct Tracked {
        rows: HashMap<String, String>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl Tracked {
        fn new<const N: usize>(rows: [(&str, &str); N]) -> Self {
            Self {
                rows: rows
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl BatchFetch for Tracked {
        type Key = String;
        type Value = String;
        type Error = String;

        async fn fetch(
            &self,
            keys: &[String],
        ) -> Result<HashMap<String, String>, String> {
            self.calls.lock().unwrap().push(keys.to_vec());
            Ok(keys
                .iter()
                .filter_map(|k| self.rows.get(k).map(|v| (k.clone(), v.clone())))
                .collect())
        }
    }

    fn loader<const N: usize>(rows: [(&str, &str); N]) -> BatchLoader<Tracked> {
        BatchLoader::new(Tracked::new(rows))
    }

    fn calls(loader: &BatchLoader<Tracked>) -> Vec<Vec<String>> {
        loader.fetcher.calls.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn distinct_keys_in_one_window_share_one_fetch() {
        let loader = loader([("a", "1"), ("b", "2"), ("c", "3")]);

        let (a, b, c) = tokio::join!(
            loader.load("a".into()),
            loader.load("b".into()),
            loader.load("c".into()),
        );

        assert_eq!(a.unwrap().as_deref(), Some("1"));
        assert_eq!(b.unwrap().as_deref(), Some("2"));
        assert_eq!(c.unwrap().as_deref(), Some("3"));

        let calls = calls(&loader);
        assert_eq!(calls.len(), 1, "expected a single bulk fetch");
        let mut batch = calls[0].clone();
        batch.sort();
        assert_eq!(batch, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn repeated_key_is_fetched_once() {
        let loader = loader([("a", "1")]);

        let (first, second) = tokio::join!(loader.load("a".into()), loader.load("a".into()));

        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(calls(&loader), vec![vec!["a".to_string()]]);
    }

    #[tokio::test]
    async fn resolved_value_is_cached_for_the_loader_lifetime() {
        let loader = loader([("a", "1")]);

        loader.load("a".into()).await.unwrap();
        loader.load("a".into()).await.unwrap();

        assert_eq!(calls(&loader).len(), 1);
    }

    #[tokio::test]
    async fn primed_key_skips_the_fetch() {
        let loader = loader([("a", "stale")]);

        loader.prime("a".into(), "primed".into());
        let value = loader.load("a".into()).await.unwrap();

        assert_eq!(value.as_deref(), Some("primed"));
        assert!(calls(&loader).is_empty(), "prime must avoid the bulk fetch");
    }

    #[tokio::test]
    async fn prime_never_overwrites() {
        let loader = loader([]);

        loader.prime("a".into(), "first".into());
        loader.prime("a".into(), "second".into());

        assert_eq!(
            loader.load("a".into()).await.unwrap().as_deref(),
            Some("first")
        );
    }

    #[tokio::test]
    async fn clear_forces_a_fresh_fetch() {
        let loader = loader([("a", "1")]);

        loader.load("a".into()).await.unwrap();
        loader.clear(&"a".into());
        loader.load("a".into()).await.unwrap();

        assert_eq!(calls(&loader).len(), 2);
    }

    #[tokio::test]
    async fn load_many_preserves_request_order() {
        let loader = loader([("a", "1"), ("b", "2"), ("c", "3")]);

        let values = loader
            .load_many(["b".to_string(), "missing".to_string(), "a".to_string()])
            .await
            .unwrap();

        assert_eq!(
            values,
            vec![Some("2".to_string()), None, Some("1".to_string())]
        );
        assert_eq!(calls(&loader).len(), 1);
    }

    #[tokio::test]
    async fn absent_key_is_cached_as_absent() {
        let loader = loader([]);

        assert_eq!(loader.load("ghost".into()).await.unwrap(), None);
        assert_eq!(loader.load("ghost".into()).await.unwrap(), None);

        assert_eq!(calls(&loader).len(), 1, "absence must not trigger refetch");
    }

    #[tokio::test]
    async fn size_cap_flushes_without_waiting_for_the_window() {
        let loader = BatchLoader::new(Tracked::new([("a", "1"), ("b", "2")]))
            .delay(Duration::from_secs(30))
            .max_batch_size(2);

        let (a, b) = tokio::join!(loader.load("a".into()), loader.load("b".into()));

        assert_eq!(a.unwrap().as_deref(), Some("1"));
        assert_eq!(b.unwrap().as_deref(), Some("2"));
        assert_eq!(calls(&loader).len(), 1);
    }

    /// Fetcher that fails the first batch and serves later ones, to check
    /// that a failed batch does not poison the cache.
    struct FailsOnce {
        rows: HashMap<String, String>,
        calls: Mutex<usize>,
    }

    impl BatchFetch for FailsOnce {
        type Key = String;
        type Value = String;
        type Error = String;

        async fn fetch(
            &self,
            keys: &[String],
        ) -> Result<HashMap<String, String>, String> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            if *calls == 1 {
                return Err("connection reset".to_string());
            }
            Ok(keys
                .iter()
                .filter_map(|k| self.rows.get(k).map(|v| (k.clone(), v.clone())))
                .collect())
        }
    }

    #[tokio::test]
    async fn failed_batch_fans_out_the_error_and_allows_retry() {
        let loader = BatchLoader::new(FailsOnce {
            rows: HashMap::from([("a".to_string(), "1".to_string())]),
            calls: Mutex::new(0),
        });

        let (first, second) = tokio::join!(loader.load("a".into()), loader.load("a".into()));
        assert!(matches!(first, Err(BatchError::Fetch(_))));
        assert!(matches!(second, Err(BatchError::Fetch(_))));

        // The failed batch left no cache entry behind, so a retry refetches.
        let retried = loader.load("a".into()).await.unwrap();
        assert_eq!(retried.as_deref(), Some("1"));
        assert_eq!(*loader.fetcher.calls.lock().unwrap(), 2);
    }

    /// Fetcher whose first batch blocks until released, so a test can act
    /// while that batch is in flight.
    struct Gated {
        started: Arc<Notify>,
        release: Arc<Notify>,
        calls: Mutex<usize>,
    }

    impl BatchFetch for Gated {
        type Key = String;
        type Value = String;
        type Error = String;

        async fn fetch(
            &self,
            keys: &[String],
        ) -> Result<HashMap<String, String>, String> {
            let first = {
                let mut calls = self.calls.lock().unwrap();
                *calls += 1;
                *calls == 1
            };
            if first {
                self.started.notify_one();
                self.release.notified().await;
            }
            Ok(keys
                .iter()
                .map(|k| (k.clone(), "fetched".to_string()))
                .collect())
        }
    }

    #[tokio::test]
    async fn clear_on_an_in_flight_key_answers_waiters_but_drops_the_result() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let loader = BatchLoader::new(Gated {
            started: Arc::clone(&started),
            release: Arc::clone(&release),
            calls: Mutex::new(0),
        });

        let early = tokio::spawn({
            let loader = loader.clone();
            async move { loader.load("a".into()).await }
        });
        started.notified().await;

        // The batch is in flight; clear the key, then join a late load onto
        // the same batch before releasing it.
        loader.clear(&"a".into());
        let late = tokio::spawn({
            let loader = loader.clone();
            async move { loader.load("a".into()).await }
        });
        tokio::time::sleep(Duration::from_millis(5)).await;
        release.notify_one();

        // Both waiters are answered with the in-flight batch's value.
        assert_eq!(early.await.unwrap().unwrap().as_deref(), Some("fetched"));
        assert_eq!(late.await.unwrap().unwrap().as_deref(), Some("fetched"));

        // The cleared key was not retained, so the next load refetches.
        loader.load("a".into()).await.unwrap();
        assert_eq!(*loader.fetcher.calls.lock().unwrap(), 2);
    }
}
