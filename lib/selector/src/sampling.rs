//! Working-set sampling
//!
//! Bounds the cost of selection on large collections by reducing the input
//! to at most `sample_size` positions before the greedy phase runs.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Collections larger than this are sampled with a reservoir instead of a shuffle
pub const RESERVOIR_THRESHOLD: usize = 10_000;

/// How a working set was drawn from the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// Collection fits within the sample size and is used as is
    Full,
    /// Uniform shuffle of all positions, truncated to the sample size
    ShuffleTruncate,
    /// Single-pass reservoir sampling (Algorithm R)
    Reservoir,
}

impl SamplingStrategy {
    /// Strategy used for a collection of `collection_size` records
    pub fn for_size(collection_size: usize, sample_size: usize) -> Self {
        if collection_size <= sample_size {
            SamplingStrategy::Full
        } else if collection_size <= RESERVOIR_THRESHOLD {
            SamplingStrategy::ShuffleTruncate
        } else {
            SamplingStrategy::Reservoir
        }
    }
}

/// Sample up to `sample_size` positions out of `0..collection_size`
///
/// With the `Full` strategy positions come back in collection order.
pub fn sample_indices<R: Rng + ?Sized>(
    collection_size: usize,
    sample_size: usize,
    rng: &mut R,
) -> (Vec<usize>, SamplingStrategy) {
    let strategy = SamplingStrategy::for_size(collection_size, sample_size);
    let indices = match strategy {
        SamplingStrategy::Full => (0..collection_size).collect(),
        SamplingStrategy::ShuffleTruncate => shuffle_truncate(collection_size, sample_size, rng),
        SamplingStrategy::Reservoir => reservoir(collection_size, sample_size, rng),
    };
    (indices, strategy)
}

fn shuffle_truncate<R: Rng + ?Sized>(collection_size: usize, sample_size: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..collection_size).collect();
    indices.shuffle(rng);
    indices.truncate(sample_size);
    indices
}

fn reservoir<R: Rng + ?Sized>(collection_size: usize, sample_size: usize, rng: &mut R) -> Vec<usize> {
    let mut reservoir: Vec<usize> = (0..sample_size.min(collection_size)).collect();
    for i in reservoir.len()..collection_size {
        let j = rng.random_range(0..=i);
        if j < sample_size {
            reservoir[j] = i;
        }
    }
    reservoir
}
