//! Memoising wrapper around any provider.
//!
//! # Caching Strategy
//!
//! - Read lock first; a fresh hit returns immediately
//! - Entries older than the TTL count as misses
//! - On a miss the inner provider is called without holding any lock
//! - The write lock re-checks before inserting, so a fresh value fetched
//!   concurrently by another task is kept rather than overwritten
//! - Errors are never cached

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use trade_core::Currency;

use super::{RateProvider, RateSeries};
use crate::error::MarketError;

/// Default lifetime of a cached entry.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

type SeriesKey = (Currency, Currency, NaiveDate, NaiveDate);

struct Entry<V> {
    value: V,
    fetched_at: Instant,
}

type Cache<K, V> = RwLock<HashMap<K, Entry<V>>>;

/// Caches latest rates per pair and series per request, each for at most `ttl`.
pub struct CachedRateProvider<P> {
    inner: P,
    ttl: Duration,
    latest_cache: Cache<(Currency, Currency), f64>,
    series_cache: Cache<SeriesKey, RateSeries>,
}

impl<P: RateProvider> CachedRateProvider<P> {
    /// Wrap a provider with empty caches and [`DEFAULT_CACHE_TTL`].
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            ttl: DEFAULT_CACHE_TTL,
            latest_cache: RwLock::new(HashMap::new()),
            series_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Set how long an entry is served before it is fetched again.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Drop every cached value.
    pub fn clear(&self) {
        self.latest_cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.series_cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

fn lookup<K: Eq + Hash, V: Clone>(cache: &Cache<K, V>, key: &K, ttl: Duration) -> Option<V> {
    cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(key)
        .filter(|entry| entry.fetched_at.elapsed() < ttl)
        .map(|entry| entry.value.clone())
}

fn store<K: Eq + Hash, V: Clone>(cache: &Cache<K, V>, key: K, value: V, ttl: Duration) -> V {
    let mut guard = cache.write().unwrap_or_else(PoisonError::into_inner);
    let entry = guard.entry(key).or_insert_with(|| Entry {
        value: value.clone(),
        fetched_at: Instant::now(),
    });
    if entry.fetched_at.elapsed() >= ttl {
        *entry = Entry {
            value,
            fetched_at: Instant::now(),
        };
    }
    entry.value.clone()
}

#[async_trait::async_trait]
impl<P: RateProvider> RateProvider for CachedRateProvider<P> {
    async fn latest(&self, from: Currency, to: Currency) -> Result<f64, MarketError> {
        let key = (from, to);
        if let Some(rate) = lookup(&self.latest_cache, &key, self.ttl) {
            return Ok(rate);
        }

        tracing::info!(provider = self.inner.name(), %from, %to, "Rate cache miss");
        let rate = self.inner.latest(from, to).await?;
        Ok(store(&self.latest_cache, key, rate, self.ttl))
    }

    async fn timeseries(
        &self,
        from: Currency,
        to: Currency,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RateSeries, MarketError> {
        let key = (from, to, start, end);
        if let Some(series) = lookup(&self.series_cache, &key, self.ttl) {
            return Ok(series);
        }

        tracing::info!(
            provider = self.inner.name(),
            %from,
            %to,
            %start,
            %end,
            "Series cache miss"
        );
        let series = self.inner.timeseries(from, to, start, end).await?;
        Ok(store(&self.series_cache, key, series, self.ttl))
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
