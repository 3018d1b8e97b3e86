//! Time-bounded memoization of computed statistics.
//!
//! The cache is owned by the application state and keyed by the dataset's
//! content fingerprint, so identical tables reuse the previous result until
//! the entry expires. Failed aggregations are cached too: the calculators
//! are deterministic and recomputing would fail the same way.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::errors::StatsError;
use crate::models::dataset::Dataset;
use crate::services::basic_stats::{self, BasicStats};
use crate::services::user_stats::{self, UserStats};

/// Default entry lifetime in seconds.
pub const DEFAULT_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    computed_at: DateTime<Utc>,
}

/// Key/value memo table whose entries expire after a fixed lifetime.
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key`, computing and storing it if absent
    /// or expired.
    pub fn get_or_compute(&self, key: &str, compute: impl FnOnce() -> V) -> V {
        self.get_or_compute_at(key, Utc::now(), compute)
    }

    /// Same as [`get_or_compute`](Self::get_or_compute) with an explicit clock.
    pub fn get_or_compute_at(
        &self,
        key: &str,
        now: DateTime<Utc>,
        compute: impl FnOnce() -> V,
    ) -> V {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(entry) = entries.get(key) {
            if now - entry.computed_at < self.ttl {
                tracing::debug!(key, "Stats cache hit");
                return entry.value.clone();
            }
            tracing::debug!(key, "Stats cache entry expired");
        }

        let value = compute();
        entries.insert(
            key.to_string(),
            Entry {
                value: value.clone(),
                computed_at: now,
            },
        );
        entries.retain(|_, e| now - e.computed_at < self.ttl);
        value
    }

    /// Drop every entry that has outlived the TTL as of `now`.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, e| now - e.computed_at < self.ttl);
        before - entries.len()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Memoized access to both calculators for a dataset.
#[derive(Debug)]
pub struct StatsCache {
    basic: TtlCache<BasicStats>,
    users: TtlCache<Result<UserStats, StatsError>>,
}

impl StatsCache {
    /// A TTL too large for `chrono::Duration` falls back to the default.
    pub fn new(ttl_secs: i64) -> Self {
        let ttl = Duration::try_seconds(ttl_secs).unwrap_or_else(|| {
            tracing::warn!(ttl_secs, "Stats cache TTL out of range, using default");
            Duration::seconds(DEFAULT_TTL_SECS)
        });
        Self {
            basic: TtlCache::new(ttl),
            users: TtlCache::new(ttl),
        }
    }

    pub fn basic_stats(&self, dataset: &Dataset) -> BasicStats {
        self.basic.get_or_compute(dataset.fingerprint(), || {
            basic_stats::calculate(dataset.products(), dataset.ratings())
        })
    }

    pub fn user_stats(&self, dataset: &Dataset) -> Result<UserStats, StatsError> {
        self.users.get_or_compute(dataset.fingerprint(), || {
            user_stats::calculate(dataset.ratings(), dataset.products())
        })
    }

    /// Drop expired entries from both tables, returning how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        self.basic.purge_expired(now) + self.users.purge_expired(now)
    }

    /// Lifetime of a cached entry.
    pub fn ttl(&self) -> Duration {
        self.basic.ttl
    }

    /// Live entries across both tables.
    pub fn entry_count(&self) -> usize {
        self.basic.entry_count() + self.users.entry_count()
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::TimeZone;

    use super::*;
    use crate::models::product::ProductRecord;
    use crate::models::rating::RatingRecord;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn second_lookup_within_ttl_is_a_hit() {
        let cache = TtlCache::new(Duration::seconds(3600));
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            42
        };

        assert_eq!(cache.get_or_compute_at("k", t0(), compute), 42);
        assert_eq!(
            cache.get_or_compute_at("k", t0() + Duration::seconds(3599), compute),
            42
        );
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn expired_entry_is_recomputed() {
        let cache = TtlCache::new(Duration::seconds(3600));
        assert_eq!(cache.get_or_compute_at("k", t0(), || 1), 1);
        assert_eq!(
            cache.get_or_compute_at("k", t0() + Duration::seconds(3600), || 2),
            2
        );
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        let cache = TtlCache::new(Duration::seconds(60));
        assert_eq!(cache.get_or_compute_at("a", t0(), || "a"), "a");
        assert_eq!(cache.get_or_compute_at("b", t0(), || "b"), "b");
        assert_eq!(cache.entry_count(), 2);
    }

    #[test]
    fn purge_removes_only_expired() {
        let cache = TtlCache::new(Duration::seconds(60));
        cache.get_or_compute_at("old", t0(), || 1);
        cache.get_or_compute_at("new", t0() + Duration::seconds(50), || 2);
        assert_eq!(cache.purge_expired(t0() + Duration::seconds(70)), 1);
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn insert_evicts_expired_entries() {
        let cache = TtlCache::new(Duration::seconds(60));
        cache.get_or_compute_at("old", t0(), || 1);
        cache.get_or_compute_at("new", t0() + Duration::seconds(120), || 2);
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn stats_cache_returns_calculator_results() {
        let dataset = Dataset::new(
            vec![ProductRecord::new("p1", "Kettle", "Kitchen", 100.0)],
            vec![
                RatingRecord::new("u1", "p1", 5),
                RatingRecord::new("u2", "p1", 4),
            ],
        );
        let cache = StatsCache::default();

        let basic = cache.basic_stats(&dataset);
        assert_eq!(basic.num_users, 2);
        assert_eq!(cache.basic_stats(&dataset), basic);

        let users = cache.user_stats(&dataset).unwrap();
        assert_eq!(users.top_five_star_user, "u1");
        assert_eq!(cache.user_stats(&dataset).unwrap(), users);
    }

    #[test]
    fn oversized_ttl_falls_back_to_default() {
        let cache = StatsCache::new(i64::MAX);
        assert_eq!(cache.ttl(), Duration::seconds(DEFAULT_TTL_SECS));
        assert_eq!(StatsCache::new(60).ttl(), Duration::seconds(60));
    }

    #[test]
    fn stats_cache_purges_both_tables() {
        let dataset = Dataset::new(
            vec![ProductRecord::new("p1", "Kettle", "Kitchen", 100.0)],
            vec![RatingRecord::new("u1", "p1", 5)],
        );
        let cache = StatsCache::new(60);
        cache.basic_stats(&dataset);
        cache.user_stats(&dataset).unwrap();
        assert_eq!(cache.entry_count(), 2);

        assert_eq!(cache.purge_expired(Utc::now()), 0);
        assert_eq!(cache.purge_expired(Utc::now() + Duration::seconds(61)), 2);
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn stats_cache_keeps_failures() {
        let dataset = Dataset::new(vec![], vec![]);
        let cache = StatsCache::default();
        assert!(cache.user_stats(&dataset).is_err());
        assert!(cache.user_stats(&dataset).is_err());
    }
}
