use ahash::AHashMap;

/// Default bound on the number of stored pairs
pub const DEFAULT_CACHE_ENTRIES: usize = 1 << 16;

/// Pairwise distance memo keyed by unordered pairs of collection positions
///
/// Holds at most `max_entries` pairs. Once full, new distances are still
/// counted as evaluations but are no longer stored.
#[derive(Debug)]
pub struct DistanceCache {
    entries: AHashMap<(usize, usize), f64>,
    max_entries: usize,
    evaluations: usize,
    hits: usize,
}

impl Default for DistanceCache {
    fn default() -> Self {
        Self::bounded(DEFAULT_CACHE_ENTRIES)
    }
}

impl DistanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache storing at most `max_entries` pairs
    pub fn bounded(max_entries: usize) -> Self {
        Self {
            entries: AHashMap::new(),
            max_entries,
            evaluations: 0,
            hits: 0,
        }
    }

    #[inline]
    fn key(a: usize, b: usize) -> (usize, usize) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn get(&self, a: usize, b: usize) -> Option<f64> {
        self.entries.get(&Self::key(a, b)).copied()
    }

    /// Record a freshly computed distance
    pub fn insert(&mut self, a: usize, b: usize, distance: f64) {
        let key = Self::key(a, b);
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = distance;
            return;
        }
        self.evaluations += 1;
        if self.entries.len() < self.max_entries {
            self.entries.insert(key, distance);
        }
    }

    /// Cached distance for the pair, computing and recording it on a miss
    pub fn get_or_compute<F>(&mut self, a: usize, b: usize, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        if let Some(distance) = self.get(a, b) {
            self.hits += 1;
            return distance;
        }
        let distance = compute();
        self.insert(a, b, distance);
        distance
    }

    /// Number of distinct pairs computed so far
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Lookups through `get_or_compute` answered without computing
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
