//! Model cache keyed by dataset content hash and training configuration
//!
//! Fitting is a pure function of (dataset, config), so the (model, schema,
//! mapping) triple can be memoized. A new triple is swapped in atomically
//! whenever the key changes; fitted predictors are never mutated in place.

use super::{PredictorConfig, SalaryPredictor};
use crate::dataset::SalaryDataset;
use crate::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Thread-safe cache of fitted predictors
pub struct ModelCache {
    entries: RwLock<HashMap<String, Arc<SalaryPredictor>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached predictor for this dataset, fitting one on a miss.
    ///
    /// The key combines the dataset content hash with the training
    /// configuration: the same dataset refit with a different config gets
    /// its own entry instead of aliasing the previous fit.
    pub fn get_or_fit(
        &self,
        dataset: &SalaryDataset,
        config: &PredictorConfig,
    ) -> Result<Arc<SalaryPredictor>> {
        let key = format!("{}:{}", dataset.content_hash(), serde_json::to_string(config)?);

        if let Some(predictor) = self.entries.read().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %&key[..12], "model cache hit");
            return Ok(Arc::clone(predictor));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %&key[..12], "model cache miss, fitting");

        // Fit outside the lock; writers only race to insert an identical
        // value because fitting is deterministic in the dataset.
        let predictor = Arc::new(SalaryPredictor::fit(dataset, config)?);
        let mut entries = self.entries.write();
        let entry = entries.entry(key).or_insert_with(|| Arc::clone(&predictor));
        Ok(Arc::clone(entry))
    }

    /// Drop every cached predictor
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of cached predictors
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// (hits, misses) counters
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::synthetic::generate_synthetic;

    fn quick_config() -> PredictorConfig {
        PredictorConfig {
            n_trees: 10,
            max_depth: Some(6),
            ..PredictorConfig::default()
        }
    }

    #[test]
    fn test_cache_hit_returns_same_model() {
        let cache = ModelCache::new();
        let ds = generate_synthetic(60, 42).unwrap();

        let a = cache.get_or_fit(&ds, &quick_config()).unwrap();
        let b = cache.get_or_fit(&ds, &quick_config()).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_changed_dataset_is_a_miss() {
        let cache = ModelCache::new();
        let a = generate_synthetic(60, 1).unwrap();
        let b = generate_synthetic(60, 2).unwrap();

        let pa = cache.get_or_fit(&a, &quick_config()).unwrap();
        let pb = cache.get_or_fit(&b, &quick_config()).unwrap();

        assert!(!Arc::ptr_eq(&pa, &pb));
        assert_eq!(cache.stats(), (0, 2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_changed_config_is_a_miss() {
        let cache = ModelCache::new();
        let ds = generate_synthetic(60, 42).unwrap();

        let small = cache.get_or_fit(&ds, &quick_config()).unwrap();
        let big = cache
            .get_or_fit(
                &ds,
                &PredictorConfig {
                    n_trees: 20,
                    ..quick_config()
                },
            )
            .unwrap();

        assert!(!Arc::ptr_eq(&small, &big));
        assert_eq!(cache.stats(), (0, 2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_clear() {
        let cache = ModelCache::new();
        let ds = generate_synthetic(60, 42).unwrap();
        cache.get_or_fit(&ds, &quick_config()).unwrap();
        assert!(!cache.is_empty());

        cache.clear();
        assert!(cache.is_empty());
    }
}
