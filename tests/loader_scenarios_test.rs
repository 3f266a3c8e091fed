//! Loader contract scenarios exercised through mock bulk fetchers
//!
//! These tests drive the batch loaders the way GraphQL resolution does:
//! a page of users resolved concurrently, each fanning out to its profile
//! and posts, and a mutation invalidating a cached user before a re-read.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures_util::future::join_all;
use uuid::Uuid;

use quill_api::graphql::batch::{BatchFetch, BatchLoader};

/// Records every batch handed to a fetcher.
#[derive(Clone, Default)]
struct CallLog(Arc<Mutex<Vec<Vec<Uuid>>>>);

impl CallLog {
    fn record(&self, keys: &[Uuid]) {
        self.0.lock().unwrap().push(keys.to_vec());
    }

    fn batches(&self) -> Vec<Vec<Uuid>> {
        self.0.lock().unwrap().clone()
    }
}

/// Mock single-value table (users by id, profiles by user id).
struct Table {
    rows: Arc<Mutex<HashMap<Uuid, String>>>,
    log: CallLog,
}

impl Table {
    fn new(rows: HashMap<Uuid, String>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            log: CallLog::default(),
        }
    }
}

impl BatchFetch for Table {
    type Key = Uuid;
    type Value = String;
    type Error = String;

    async fn fetch(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, String>, String> {
        self.log.record(keys);
        let rows = self.rows.lock().unwrap();
        Ok(keys
            .iter()
            .filter_map(|k| rows.get(k).map(|v| (*k, v.clone())))
            .collect())
    }
}

/// Mock collection table (posts by author id); missing keys yield empty.
struct CollectionTable {
    rows: HashMap<Uuid, Vec<String>>,
    log: CallLog,
}

impl BatchFetch for CollectionTable {
    type Key = Uuid;
    type Value = Vec<String>;
    type Error = String;

    async fn fetch(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Vec<String>>, String> {
        self.log.record(keys);
        Ok(keys
            .iter()
            .map(|k| (*k, self.rows.get(k).cloned().unwrap_or_default()))
            .collect())
    }
}

fn sorted(mut keys: Vec<Uuid>) -> Vec<Uuid> {
    keys.sort();
    keys
}

/// Fetching 3 users, each with a profile and posts selection, issues exactly
/// one bulk fetch per entity kind, never 3 separate profile or post fetches.
#[tokio::test]
async fn user_page_with_profiles_and_posts_is_three_bulk_fetches() {
    let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];

    let users = BatchLoader::new(Table::new(
        ids.iter().map(|id| (*id, format!("user-{id}"))).collect(),
    ));
    let profiles = BatchLoader::new(Table::new(
        ids.iter().map(|id| (*id, format!("profile-{id}"))).collect(),
    ));
    let posts = BatchLoader::new(CollectionTable {
        rows: ids
            .iter()
            .map(|id| (*id, vec!["a post".to_string()]))
            .collect(),
        log: CallLog::default(),
    });

    let loaded = users.load_many(ids).await.unwrap();
    assert!(loaded.iter().all(Option::is_some));

    // Resolve each user's profile and posts concurrently, like the executor
    // resolving sibling fields for every list element.
    join_all(ids.iter().map(|id| {
        let profiles = profiles.clone();
        let posts = posts.clone();
        async move {
            let (profile, user_posts) = tokio::join!(profiles.load(*id), posts.load(*id));
            assert!(profile.unwrap().is_some());
            assert_eq!(user_posts.unwrap().unwrap(), vec!["a post".to_string()]);
        }
    }))
    .await;

    for (name, log) in [
        ("users", users.fetcher_log()),
        ("profiles", profiles.fetcher_log()),
        ("posts", posts.fetcher_log()),
    ] {
        assert_eq!(log.len(), 1, "{name}: expected exactly one bulk fetch");
        assert_eq!(sorted(log[0].clone()), sorted(ids.to_vec()), "{name}");
    }
}

/// A mutation that updates a record and clears its key makes a re-read in
/// the same request observe the new value rather than the cached one.
#[tokio::test]
async fn clear_after_write_makes_reread_observe_the_update() {
    let id = Uuid::new_v4();
    let table = Table::new(HashMap::from([(id, "Alice".to_string())]));
    let rows = Arc::clone(&table.rows);
    let loader = BatchLoader::new(table);

    assert_eq!(loader.load(id).await.unwrap().as_deref(), Some("Alice"));

    // The mutation writes through to storage, then invalidates the key.
    rows.lock().unwrap().insert(id, "Alicia".to_string());
    loader.clear(&id);

    assert_eq!(loader.load(id).await.unwrap().as_deref(), Some("Alicia"));
    assert_eq!(loader.fetcher_log().len(), 2);
}

/// Without the clear, the same re-read would serve the stale cached value;
/// this pins down why mutation handlers must invalidate.
#[tokio::test]
async fn reread_without_clear_serves_the_stale_cache() {
    let id = Uuid::new_v4();
    let table = Table::new(HashMap::from([(id, "Alice".to_string())]));
    let rows = Arc::clone(&table.rows);
    let loader = BatchLoader::new(table);

    assert_eq!(loader.load(id).await.unwrap().as_deref(), Some("Alice"));
    rows.lock().unwrap().insert(id, "Alicia".to_string());
    assert_eq!(loader.load(id).await.unwrap().as_deref(), Some("Alice"));
    assert_eq!(loader.fetcher_log().len(), 1);
}

/// Test-only peek at the mock call logs.
trait FetcherLog {
    fn fetcher_log(&self) -> Vec<Vec<Uuid>>;
}

impl FetcherLog for BatchLoader<Table> {
    fn fetcher_log(&self) -> Vec<Vec<Uuid>> {
        self.fetcher().log.batches()
    }
}

impl FetcherLog for BatchLoader<CollectionTable> {
    fn fetcher_log(&self) -> Vec<Vec<Uuid>> {
        self.fetcher().log.batches()
    }
}
