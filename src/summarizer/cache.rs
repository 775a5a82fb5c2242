//! Bounded summary cache
//!
//! Summaries are keyed by a blake3 fingerprint of the input (optionally just
//! its leading characters) together with the selection options. Storage is a
//! `moka` cache, so memory stays bounded in long-running processes and the
//! cache can be shared across threads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::sync::Cache;

use crate::nlp::tokenizer::char_prefix;
use crate::types::{CacheKeyStrategy, SummaryOptions};

/// Hit and miss counters
#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Snapshot of cache activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Summary cache shared by every clone of a generator.
#[derive(Clone)]
pub struct SummaryCache {
    inner: Option<Cache<String, String>>,
    key_strategy: CacheKeyStrategy,
    counters: Arc<Counters>,
}

impl std::fmt::Debug for SummaryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryCache")
            .field("enabled", &self.inner.is_some())
            .field("key_strategy", &self.key_strategy)
            .field("stats", &self.stats())
            .finish()
    }
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new(1024, CacheKeyStrategy::default())
    }
}

impl SummaryCache {
    /// Cache holding at most `capacity` summaries. A capacity of zero
    /// disables caching.
    pub fn new(capacity: u64, key_strategy: CacheKeyStrategy) -> Self {
        let inner = (capacity > 0).then(|| Cache::builder().max_capacity(capacity).build());
        Self {
            inner,
            key_strategy,
            counters: Arc::new(Counters::default()),
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(0, CacheKeyStrategy::default())
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub fn key_strategy(&self) -> CacheKeyStrategy {
        self.key_strategy
    }

    /// Fingerprint of the keyed text span plus the options.
    pub fn key(&self, text: &str, options: &SummaryOptions) -> String {
        let span = match self.key_strategy {
            CacheKeyStrategy::Prefix(chars) => char_prefix(text, chars),
            CacheKeyStrategy::FullContent => text,
        };

        let mut hasher = blake3::Hasher::new();
        hasher.update(span.as_bytes());
        hasher.update(&options.ratio.to_bits().to_le_bytes());
        hasher.update(&(options.min_sentences as u64).to_le_bytes());
        hasher.update(&(options.max_sentences as u64).to_le_bytes());
        hasher.finalize().to_hex().to_string()
    }

    /// Look up a summary, recording a hit or a miss.
    pub fn get(&self, key: &str) -> Option<String> {
        let cache = self.inner.as_ref()?;
        let found = cache.get(key);
        let counter = if found.is_some() {
            &self.counters.hits
        } else {
            &self.counters.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub fn insert(&self, key: String, summary: String) {
        if let Some(cache) = &self.inner {
            cache.insert(key, summary);
        }
    }

    /// Number of cached summaries.
    pub fn len(&self) -> u64 {
        match &self.inner {
            Some(cache) => {
                cache.run_pending_tasks();
                cache.entry_count()
            }
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached summary. Counters are kept.
    pub fn clear(&self) {
        if let Some(cache) = &self.inner {
            cache.invalidate_all();
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
        }
    }
}
