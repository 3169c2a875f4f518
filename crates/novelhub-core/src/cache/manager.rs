//! Query cache with single-flight fetch collapsing.
//!
//! Results are memoized per operation family under canonical keys. A
//! mutation invalidates whole families (every list, the catalog) or a
//! single detail entry; invalidation marks entries stale rather than
//! serving them, so the next read recomputes from the store.
//!
//! Consistency rules enforced here:
//! - at most one entry per distinct key, and at most one fetch in flight
//!   per key (concurrent identical reads share the winner's result);
//! - an invalidation clears pending flights, so a reader arriving after a
//!   completed mutation never joins a fetch that predates it;
//! - a fetch that was already in flight when an invalidation landed may
//!   return its value to its own callers, but does not install it.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::models::{Category, Story, StoryFilter};

/// A cached query result with the time it was fetched.
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    pub data: T,
    pub fetched_at: DateTime<Utc>,
    stale: bool,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            fetched_at: Utc::now(),
            stale: false,
        }
    }

    /// Time elapsed since the fetch.
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Usable as a cache hit: not invalidated and within the max age,
    /// if one is set.
    pub fn is_fresh(&self, max_age: Option<Duration>) -> bool {
        !self.stale && max_age.map_or(true, |limit| self.age() <= limit)
    }
}

/// A completed store mutation, tagged with the cache entries it obsoletes.
#[derive(Debug, Clone)]
pub enum StoryMutation {
    Created { id: String },
    Updated { id: String },
    Deleted { id: String },
}

impl StoryMutation {
    /// The invalidation set for this mutation. Every mutation obsoletes all
    /// list entries and the category catalog (story counts are derived from
    /// the collection); update and delete also obsolete the detail entry
    /// for the affected id. Create has no pre-existing detail entry.
    pub fn invalidations(&self) -> Vec<Invalidation> {
        match self {
            StoryMutation::Created { .. } => {
                vec![Invalidation::Lists, Invalidation::Categories]
            }
            StoryMutation::Updated { id } | StoryMutation::Deleted { id } => vec![
                Invalidation::Lists,
                Invalidation::Categories,
                Invalidation::Detail(id.clone()),
            ],
        }
    }
}

/// One invalidation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    /// Every cached story list, regardless of filter.
    Lists,
    /// The category catalog entry.
    Categories,
    /// The detail entry for one story id.
    Detail(String),
}

/// Cache traffic counters, for tests and diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheMetrics {
    /// Reads served from a fresh entry.
    pub hits: u64,
    /// Fetches actually executed against the store.
    pub fetches: u64,
    /// Invalidation targets applied.
    pub invalidations: u64,
}

/// One query family: entries plus in-flight fetch slots, both keyed by the
/// canonical parameters.
struct QueryFamily<K, V> {
    entries: Mutex<HashMap<K, CachedData<V>>>,
    flights: Mutex<HashMap<K, Arc<OnceCell<(u64, V)>>>>,
}

impl<K, V> QueryFamily<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            flights: Mutex::new(HashMap::new()),
        }
    }

    fn fresh(&self, key: &K, max_age: Option<Duration>) -> Option<V> {
        self.lock_entries()
            .get(key)
            .filter(|entry| entry.is_fresh(max_age))
            .map(|entry| entry.data.clone())
    }

    /// The in-flight slot for a key, created if absent. Concurrent callers
    /// receive the same slot and race inside it; exactly one runs the fetch.
    fn flight(&self, key: &K) -> Arc<OnceCell<(u64, V)>> {
        self.lock_flights()
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// Install a fetched value unless an invalidation landed after the
    /// fetch began, then retire the flight slot.
    fn complete(
        &self,
        key: &K,
        cell: &Arc<OnceCell<(u64, V)>>,
        generation: &AtomicU64,
        fetched_gen: u64,
        value: V,
    ) {
        {
            let mut entries = self.lock_entries();
            if generation.load(Ordering::SeqCst) == fetched_gen {
                entries.insert(key.clone(), CachedData::new(value));
            }
        }
        self.detach(key, cell);
    }

    /// Remove the flight slot if it is still the one we started with.
    fn detach(&self, key: &K, cell: &Arc<OnceCell<(u64, V)>>) {
        let mut flights = self.lock_flights();
        if let Some(current) = flights.get(key) {
            if Arc::ptr_eq(current, cell) {
                flights.remove(key);
            }
        }
    }

    /// Mark every entry stale and drop all pending flights. Both locks are
    /// held together so a reader cannot see the stale entries and still
    /// join an obsolete flight.
    fn invalidate_all(&self) {
        let mut entries = self.lock_entries();
        let mut flights = self.lock_flights();
        for entry in entries.values_mut() {
            entry.mark_stale();
        }
        flights.clear();
    }

    /// Mark one entry stale and drop its pending flight.
    fn invalidate_key(&self, key: &K) {
        let mut entries = self.lock_entries();
        let mut flights = self.lock_flights();
        if let Some(entry) = entries.get_mut(key) {
            entry.mark_stale();
        }
        flights.remove(key);
    }

    fn remove_all(&self) {
        let mut entries = self.lock_entries();
        let mut flights = self.lock_flights();
        entries.clear();
        flights.clear();
    }

    fn entry_count(&self) -> usize {
        self.lock_entries().len()
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<K, CachedData<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_flights(&self) -> MutexGuard<'_, HashMap<K, Arc<OnceCell<(u64, V)>>>> {
        self.flights.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read-through cache over the three story query families.
pub struct QueryCache {
    lists: QueryFamily<StoryFilter, Vec<Story>>,
    details: QueryFamily<String, Story>,
    catalog: QueryFamily<(), Vec<Category>>,
    /// Bumped on every invalidation; fetches that began under an older
    /// generation are not installed.
    generation: AtomicU64,
    max_age: Option<Duration>,
    hits: AtomicU64,
    fetches: AtomicU64,
    invalidations: AtomicU64,
}

impl QueryCache {
    /// Entries stay fresh until invalidated.
    pub fn new() -> Self {
        Self::with_max_age(None)
    }

    /// Entries additionally expire after `max_age`.
    pub fn with_max_age(max_age: Option<Duration>) -> Self {
        Self {
            lists: QueryFamily::new(),
            details: QueryFamily::new(),
            catalog: QueryFamily::new(),
            generation: AtomicU64::new(0),
            max_age,
            hits: AtomicU64::new(0),
            fetches: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
        }
    }

    /// Cached story list for a filter, fetching on miss. The filter is
    /// normalized first so equivalent filters share one entry.
    pub async fn list_stories<E, F, Fut>(
        &self,
        filter: &StoryFilter,
        fetch: F,
    ) -> Result<Vec<Story>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Story>, E>>,
    {
        let key = filter.normalize();
        self.get_or_fetch(&self.lists, "stories-list", key, fetch)
            .await
    }

    /// Cached story detail by id, fetching on miss.
    pub async fn story_detail<E, F, Fut>(&self, id: &str, fetch: F) -> Result<Story, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Story, E>>,
    {
        self.get_or_fetch(&self.details, "story-detail", id.to_string(), fetch)
            .await
    }

    /// Cached category catalog, fetching on miss.
    pub async fn categories<E, F, Fut>(&self, fetch: F) -> Result<Vec<Category>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Category>, E>>,
    {
        self.get_or_fetch(&self.catalog, "categories", (), fetch)
            .await
    }

    /// Apply one mutation's whole invalidation set.
    pub fn invalidate_for(&self, mutation: &StoryMutation) {
        debug!(mutation = ?mutation, "Invalidating cache for mutation");
        for invalidation in mutation.invalidations() {
            self.invalidate(invalidation);
        }
    }

    /// Apply a single invalidation target.
    pub fn invalidate(&self, invalidation: Invalidation) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.invalidations.fetch_add(1, Ordering::Relaxed);
        match invalidation {
            Invalidation::Lists => self.lists.invalidate_all(),
            Invalidation::Categories => self.catalog.invalidate_all(),
            Invalidation::Detail(id) => self.details.invalidate_key(&id),
        }
    }

    /// Drop everything, entries and pending flights alike.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.lists.remove_all();
        self.details.remove_all();
        self.catalog.remove_all();
        debug!("Cache cleared");
    }

    pub fn metrics(&self) -> CacheMetrics {
        CacheMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            fetches: self.fetches.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }

    /// Number of distinct list entries currently held, fresh or stale.
    pub fn cached_list_count(&self) -> usize {
        self.lists.entry_count()
    }

    async fn get_or_fetch<K, V, E, F, Fut>(
        &self,
        family: &QueryFamily<K, V>,
        name: &'static str,
        key: K,
        fetch: F,
    ) -> Result<V, E>
    where
        K: Eq + Hash + Clone + fmt::Debug,
        V: Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = family.fresh(&key, self.max_age) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(family = name, key = ?key, "Cache hit");
            return Ok(value);
        }

        let cell = family.flight(&key);
        let key_ref = &key;
        let result = cell
            .get_or_try_init(|| async move {
                self.fetches.fetch_add(1, Ordering::Relaxed);
                debug!(family = name, key = ?key_ref, "Cache miss, fetching");
                let fetched_gen = self.generation.load(Ordering::SeqCst);
                let value = fetch().await?;
                Ok((fetched_gen, value))
            })
            .await;

        match result {
            Ok(pair) => {
                let value = pair.1.clone();
                family.complete(&key, &cell, &self.generation, pair.0, value.clone());
                Ok(value)
            }
            Err(err) => {
                // Errors are never cached; the slot is freed for a retry.
                family.detach(&key, &cell);
                Err(err)
            }
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
