//! Thread-safe LRU caches for computed results.

use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use crate::tensor::TensorDecomposition;
use crate::weight_system::WeightSystem;
use crate::{CartanType, LieResult, RootSystem, Weight};

/// Memoized results, shared between threads.
///
/// Each kind of result is kept in its own LRU cache. Locks are never held
/// while computing a value, so two threads may compute the same value at once;
/// whichever finishes second discards its result and uses the first one.
#[derive(Debug)]
pub struct ComputationCache {
    root_systems: CacheMap<CartanType, RootSystem>,
    weight_systems: CacheMap<(CartanType, Weight), WeightSystem>,
    tensor_products: CacheMap<(CartanType, Weight, Weight), TensorDecomposition>,
}

impl ComputationCache {
    /// Constructs an empty cache that holds up to `capacity` values of each
    /// kind. If `capacity` is zero, then nothing is cached.
    pub fn new(capacity: usize) -> Self {
        Self {
            root_systems: CacheMap::new("root system", capacity),
            weight_systems: CacheMap::new("weight system", capacity),
            tensor_products: CacheMap::new("tensor product", capacity),
        }
    }

    /// Returns the cached root system for `cartan_type`, or computes it using
    /// `f`.
    pub fn root_system(
        &self,
        cartan_type: CartanType,
        f: impl FnOnce() -> LieResult<RootSystem>,
    ) -> LieResult<Arc<RootSystem>> {
        self.root_systems.get_or_try_insert(cartan_type, f)
    }

    /// Returns the cached weight system for an irrep, or computes it using
    /// `f`.
    pub fn weight_system(
        &self,
        cartan_type: CartanType,
        highest_weight: &Weight,
        f: impl FnOnce() -> LieResult<WeightSystem>,
    ) -> LieResult<Arc<WeightSystem>> {
        let key = (cartan_type, highest_weight.clone());
        self.weight_systems.get_or_try_insert(key, f)
    }

    /// Returns the cached decomposition of a tensor product, or computes it
    /// using `f`.
    pub fn tensor_product(
        &self,
        cartan_type: CartanType,
        lhs: &Weight,
        rhs: &Weight,
        f: impl FnOnce() -> LieResult<TensorDecomposition>,
    ) -> LieResult<Arc<TensorDecomposition>> {
        let key = (cartan_type, lhs.clone(), rhs.clone());
        self.tensor_products.get_or_try_insert(key, f)
    }

    /// Returns the total number of cached values.
    pub fn len(&self) -> usize {
        self.root_systems.len() + self.weight_systems.len() + self.tensor_products.len()
    }
    /// Returns whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Removes every cached value.
    pub fn clear(&self) {
        self.root_systems.clear();
        self.weight_systems.clear();
        self.tensor_products.clear();
    }
}

struct CacheMap<K, V> {
    name: &'static str,
    /// `None` if caching is disabled.
    map: Option<Mutex<LruCache<K, Arc<V>>>>,
}

impl<K: Hash + Eq, V> fmt::Debug for CacheMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheMap")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

impl<K: Hash + Eq, V> CacheMap<K, V> {
    fn new(name: &'static str, capacity: usize) -> Self {
        let map = NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        Self { name, map }
    }

    fn len(&self) -> usize {
        self.map.as_ref().map_or(0, |m| m.lock().len())
    }

    fn clear(&self) {
        if let Some(m) = &self.map {
            m.lock().clear();
        }
    }
}

impl<K: Hash + Eq + fmt::Debug, V> CacheMap<K, V> {
    fn get_or_try_insert(&self, key: K, f: impl FnOnce() -> LieResult<V>) -> LieResult<Arc<V>> {
        let Some(map) = &self.map else {
            return f().map(Arc::new);
        };

        if let Some(value) = map.lock().get(&key) {
            log::trace!("{} cache hit for {key:?}", self.name);
            return Ok(Arc::clone(value));
        }
        log::trace!("{} cache miss for {key:?}", self.name);

        let value = Arc::new(f()?);
        Ok(Arc::clone(map.lock().get_or_insert(key, || value)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::LieError;

    #[test]
    fn test_cache_hit() {
        let cache = ComputationCache::new(4);
        let calls = AtomicUsize::new(0);
        let compute = || {
            calls.fetch_add(1, Ordering::Relaxed);
            RootSystem::new(CartanType::A(2))
        };
        let a = cache.root_system(CartanType::A(2), compute).unwrap();
        let b = cache.root_system(CartanType::A(2), compute).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_eviction() {
        let cache = ComputationCache::new(2);
        for t in [CartanType::A(1), CartanType::A(2), CartanType::A(3)] {
            cache.root_system(t, || RootSystem::new(t)).unwrap();
        }
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_disabled_cache() {
        let cache = ComputationCache::new(0);
        let a = cache.root_system(CartanType::G2, || RootSystem::new(CartanType::G2)).unwrap();
        let b = cache.root_system(CartanType::G2, || RootSystem::new(CartanType::G2)).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = ComputationCache::new(4);
        let result = cache.root_system(CartanType::A(2), || {
            Err(LieError::UnsupportedOperation("nope".to_owned()))
        });
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_inserts() {
        let cache = ComputationCache::new(4);
        let results = std::thread::scope(|s| {
            let handles = (0..8)
                .map(|_| s.spawn(|| cache.root_system(CartanType::E6, || RootSystem::new(CartanType::E6))))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect::<Vec<_>>()
        });
        assert_eq!(cache.len(), 1);
        assert!(results.iter().all(|rs| rs.cartan_type() == CartanType::E6));
    }
}
