//! In-memory memoization of analysis reports.

use std::collections::{HashMap, VecDeque};

use crate::api::types::AnalysisReport;

/// Reports kept by [`AnalysisCache::new`]
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Reports keyed by input checksum.
///
/// The checksum covers both records and parameters, so a hit is always a
/// report for identical inputs. Holds at most `capacity` reports; the least
/// recently used one is evicted first.
#[derive(Debug)]
pub struct AnalysisCache {
    entries: HashMap<String, AnalysisReport>,
    // Front is least recently used
    recency: VecDeque<String>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache holding at most `capacity` reports (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            recency: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached report for `checksum`, computing it on a miss.
    pub fn get_or_try_insert_with<F, E>(
        &mut self,
        checksum: &str,
        compute: F,
    ) -> Result<AnalysisReport, E>
    where
        F: FnOnce() -> Result<AnalysisReport, E>,
    {
        if let Some(report) = self.entries.get(checksum) {
            let report = report.clone();
            self.hits += 1;
            self.touch(checksum);
            log::debug!("Analysis cache hit for {}", checksum);
            return Ok(report);
        }

        self.misses += 1;
        let report = compute()?;

        if self.entries.len() >= self.capacity {
            if let Some(evicted) = self.recency.pop_front() {
                self.entries.remove(&evicted);
                log::debug!("Analysis cache evicted {}", evicted);
            }
        }
        self.entries.insert(checksum.to_string(), report.clone());
        self.recency.push_back(checksum.to_string());
        Ok(report)
    }

    fn touch(&mut self, checksum: &str) {
        if let Some(position) = self.recency.iter().position(|k| k == checksum) {
            if let Some(key) = self.recency.remove(position) {
                self.recency.push_back(key);
            }
        }
    }

    pub fn contains(&self, checksum: &str) -> bool {
        self.entries.contains_key(checksum)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    /// (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
