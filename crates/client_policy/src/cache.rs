//! Staleness-aware query cache and hydration
//!
//! Read results stay fresh for five minutes before a lookup reports them
//! stale. Dehydration captures the queries worth shipping across the
//! client/server boundary - those that completed successfully and those
//! still pending at serialization time - as [`RichValue`]s, so rich types
//! survive the trip.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use core_kernel::ErrorKind;
use serde::{Deserialize, Serialize};

use crate::value::RichValue;

/// How long a read result is served without being considered stale
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// Resolution state of a client-issued query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "data")]
pub enum QueryState {
    /// Completed with a value
    Success(RichValue),
    /// Issued but not yet resolved
    Pending,
    /// Failed; the kind drives the re-issue decision
    Error(ErrorKind),
}

impl QueryState {
    /// Eligible for persistence into the hydration cache: completed
    /// successfully, or still pending at serialization time
    pub fn should_dehydrate(&self) -> bool {
        matches!(self, QueryState::Success(_) | QueryState::Pending)
    }
}

/// A cached query result with its fetch timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct CachedQuery {
    pub state: QueryState,
    pub fetched_at: DateTime<Utc>,
}

impl CachedQuery {
    /// Whether this entry has outlived `stale_time` as of `now`
    pub fn is_stale(&self, now: DateTime<Utc>, stale_time: Duration) -> bool {
        let age = now.signed_duration_since(self.fetched_at);
        age >= chrono::Duration::from_std(stale_time).unwrap_or(chrono::Duration::MAX)
    }
}

/// Client-side cache of query results, keyed by query identity
pub struct QueryCache {
    stale_time: Duration,
    entries: HashMap<String, CachedQuery>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_stale_time(DEFAULT_STALE_TIME)
    }

    pub fn with_stale_time(stale_time: Duration) -> Self {
        Self {
            stale_time,
            entries: HashMap::new(),
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Records the state of a query fetched at `fetched_at`
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        state: QueryState,
        fetched_at: DateTime<Utc>,
    ) {
        self.entries
            .insert(key.into(), CachedQuery { state, fetched_at });
    }

    pub fn get(&self, key: &str) -> Option<&CachedQuery> {
        self.entries.get(key)
    }

    /// The cached value for `key` if it completed successfully and is still
    /// fresh as of `now`
    pub fn fresh_value(&self, key: &str, now: DateTime<Utc>) -> Option<&RichValue> {
        let entry = self.entries.get(key)?;
        if entry.is_stale(now, self.stale_time) {
            return None;
        }
        match &entry.state {
            QueryState::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Captures every dehydration-eligible query for transport
    pub fn dehydrate(&self) -> DehydratedState {
        let mut queries: Vec<DehydratedQuery> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.state.should_dehydrate())
            .map(|(key, entry)| DehydratedQuery {
                key: key.clone(),
                state: entry.state.clone(),
            })
            .collect();
        // Deterministic transport order
        queries.sort_by(|a, b| a.key.cmp(&b.key));
        DehydratedState { queries }
    }

    /// Rebuilds a cache from transported state, stamping every entry as
    /// fetched at `now`
    pub fn hydrate(state: DehydratedState, now: DateTime<Utc>) -> Self {
        let mut cache = Self::new();
        for query in state.queries {
            cache.insert(query.key, query.state, now);
        }
        cache
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized form of the cache, as shipped across the boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DehydratedState {
    pub queries: Vec<DehydratedQuery>,
}

/// One transported query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DehydratedQuery {
    pub key: String,
    #[serde(flatten)]
    pub state: QueryState,
}
