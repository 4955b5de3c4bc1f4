use crate::canvas::bitmap::Bitmap;
use crate::canvas::block::Rect;
use crate::io::configuration::REGION_CACHE_CAPACITY;
use crate::scoring::color::RegionColors;
use std::collections::HashMap;

/// Memoization cache for region color statistics
///
/// The target never changes during a run, so the statistics of a rectangle can be
/// reused across sweeps and across the many candidates that revisit the same child
/// rectangles. The map is flushed whenever it reaches its capacity.
#[derive(Debug)]
pub struct RegionColorCache {
    /// Rectangle to color statistics mapping
    colors: HashMap<Rect, RegionColors>,

    /// Entries held before a flush
    capacity: usize,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Number of times the full cache was flushed
    pub flushes: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Default for RegionColorCache {
    fn default() -> Self {
        Self::with_capacity_limit(REGION_CACHE_CAPACITY)
    }
}

impl RegionColorCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache flushed once it holds `capacity` rectangles
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            colors: HashMap::new(),
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    /// Retrieve cached statistics or compute and store them
    pub fn get_or_compute<F>(&mut self, rect: Rect, compute_fn: F) -> RegionColors
    where
        F: FnOnce() -> RegionColors,
    {
        use std::collections::hash_map::Entry;

        if self.colors.len() >= self.capacity && !self.colors.contains_key(&rect) {
            self.colors.clear();
            self.stats.flushes += 1;
        }
        match self.colors.entry(rect) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                *entry.get()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                *entry.insert(compute_fn())
            }
        }
    }

    /// Statistics of `rect` over `target`
    pub fn colors(&mut self, target: &Bitmap, rect: Rect) -> RegionColors {
        self.get_or_compute(rect, || RegionColors::of(target, &rect))
    }

    /// Number of cached rectangles
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
