//! Greedy max-min diverse selection
//!
//! Picks an initial record (the most complete one, or a random one), then
//! repeatedly adds the candidate whose distance to its nearest selected
//! record is largest, optionally blended with the candidate's completeness.

use crate::cache::DistanceCache;
use crate::options::SelectionOptions;
use crate::sampling::{sample_indices, SamplingStrategy};
use divsel_core::{completeness_of, flatten_with, Error, FlatRecord, Result};
use divsel_similarity::{DistanceFunction, RecordDistance};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Outcome of a selection run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Positions in the input collection, in selection order
    pub indices: Vec<usize>,
    /// How the working set was drawn
    pub strategy: SamplingStrategy,
    /// Number of records the greedy phase ran over
    pub working_set_size: usize,
    /// Distinct record pairs whose distance was computed
    pub distance_evaluations: usize,
}

impl Selection {
    fn empty() -> Self {
        Self {
            indices: Vec::new(),
            strategy: SamplingStrategy::Full,
            working_set_size: 0,
            distance_evaluations: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The selected records, borrowed from `items`
    pub fn records<'a>(&self, items: &'a [Value]) -> Vec<&'a Value> {
        self.indices.iter().map(|&i| &items[i]).collect()
    }
}

/// Select a diverse subset of `items`
///
/// Randomness comes from `options.seed` when set, otherwise from a freshly
/// seeded generator.
pub fn select_diverse_examples(items: &[Value], options: &SelectionOptions) -> Result<Vec<Value>> {
    let mut rng = create_rng(options.seed);
    select_diverse_examples_with_rng(items, options, &mut rng)
}

/// Select a diverse subset of `items` drawing randomness from `rng`
pub fn select_diverse_examples_with_rng<R: Rng + ?Sized>(
    items: &[Value],
    options: &SelectionOptions,
    rng: &mut R,
) -> Result<Vec<Value>> {
    let selection = select_indices_with_rng(items, options, rng)?;
    Ok(selection.indices.iter().map(|&i| items[i].clone()).collect())
}

/// Like [`select_diverse_examples`] but returns positions and run details
pub fn select_indices(items: &[Value], options: &SelectionOptions) -> Result<Selection> {
    let mut rng = create_rng(options.seed);
    select_indices_with_rng(items, options, &mut rng)
}

/// Like [`select_diverse_examples_with_rng`] but returns positions and run details
pub fn select_indices_with_rng<R: Rng + ?Sized>(
    items: &[Value],
    options: &SelectionOptions,
    rng: &mut R,
) -> Result<Selection> {
    options.validate()?;

    if items.is_empty() || options.num_examples == 0 {
        return Ok(Selection::empty());
    }
    if options.num_examples > items.len() {
        return Err(Error::InsufficientItems {
            requested: options.num_examples,
            available: items.len(),
        });
    }

    let sample_size = options.effective_sample_size(items.len());
    let (working, strategy) = sample_indices(items.len(), sample_size, rng);
    debug!(
        "Working set of {} out of {} records ({:?})",
        working.len(),
        items.len(),
        strategy
    );
    if working.len() < options.num_examples {
        warn!(
            "Working set holds {} records, fewer than the {} requested",
            working.len(),
            options.num_examples
        );
    }

    let working_set_size = working.len();
    let mut state = SelectionState::new(items, working, options);
    let indices = state.run(options.num_examples, rng);

    Ok(Selection {
        indices,
        strategy,
        working_set_size,
        distance_evaluations: state.cache.evaluations(),
    })
}

fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

enum Metric<'o> {
    Record(RecordDistance),
    Custom(&'o dyn DistanceFunction),
}

impl Metric<'_> {
    /// Distance between two working-set slots
    fn measure(
        &self,
        items: &[Value],
        working: &[usize],
        flattened: &[FlatRecord<'_>],
        a: usize,
        b: usize,
    ) -> f64 {
        match self {
            Metric::Record(metric) => metric.distance_flat(&flattened[a], &flattened[b]),
            Metric::Custom(metric) => metric.distance(&items[working[a]], &items[working[b]]),
        }
    }
}

/// Partition of the working set into selected and remaining slots
///
/// Slots index the working set; `working[slot]` is the record's position in
/// the input collection, which is what the distance cache is keyed on.
struct SelectionState<'a> {
    items: &'a [Value],
    working: Vec<usize>,
    metric: Metric<'a>,
    /// Per-slot flattening, built once per run when the default metric or
    /// completeness needs it
    flattened: Vec<FlatRecord<'a>>,
    completeness: Vec<f64>,
    completeness_weight: Option<f64>,
    parallel: bool,
    selected: Vec<usize>,
    remaining: Vec<usize>,
    /// Distance from each slot to its nearest selected slot
    min_distances: Vec<f64>,
    cache: DistanceCache,
}

impl<'a> SelectionState<'a> {
    fn new(items: &'a [Value], working: Vec<usize>, options: &'a SelectionOptions) -> Self {
        let metric = match options.distance.as_deref() {
            Some(custom) => Metric::Custom(custom),
            None => Metric::Record(RecordDistance::new(options.sequence_mode)),
        };

        let needs_flattening =
            matches!(metric, Metric::Record(_)) || options.prioritize_complete;
        let flattened: Vec<FlatRecord<'a>> = if needs_flattening {
            working
                .iter()
                .map(|&pos| flatten_with(&items[pos], options.sequence_mode))
                .collect()
        } else {
            Vec::new()
        };

        let (completeness, completeness_weight) = if options.prioritize_complete {
            let scores = flattened.iter().map(completeness_of).collect();
            (scores, Some(options.completeness_weight))
        } else {
            (Vec::new(), None)
        };

        let size = working.len();
        Self {
            items,
            working,
            metric,
            flattened,
            completeness,
            completeness_weight,
            parallel: options.parallel,
            selected: Vec::with_capacity(options.num_examples.min(size)),
            remaining: (0..size).collect(),
            min_distances: vec![f64::INFINITY; size],
            cache: DistanceCache::new(),
        }
    }

    fn run<R: Rng + ?Sized>(&mut self, num_examples: usize, rng: &mut R) -> Vec<usize> {
        if self.remaining.is_empty() {
            return Vec::new();
        }

        let first = self.initial_pick(rng);
        debug!("Initial pick: record {}", self.working[first]);
        self.commit(first);

        while self.selected.len() < num_examples && !self.remaining.is_empty() {
            if let Some(&newest) = self.selected.last() {
                self.refresh_min_distances(newest);
            }

            let Some((position, score)) = self.best_candidate() else {
                break;
            };
            let slot = self.remaining[position];
            debug!(
                "Pick {}: record {} (score {:.4})",
                self.selected.len() + 1,
                self.working[slot],
                score
            );
            self.commit_at(position);
        }

        debug!(
            "Selected {} records with {} distance evaluations",
            self.selected.len(),
            self.cache.evaluations()
        );
        self.selected.iter().map(|&slot| self.working[slot]).collect()
    }

    /// Most complete slot (first maximum) or a uniformly random one
    fn initial_pick<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        if self.completeness_weight.is_some() {
            let mut best = 0;
            for slot in 1..self.completeness.len() {
                if self.completeness[slot] > self.completeness[best] {
                    best = slot;
                }
            }
            best
        } else {
            rng.random_range(0..self.working.len())
        }
    }

    /// Fold the newest selection into every remaining slot's nearest distance
    fn refresh_min_distances(&mut self, newest: usize) {
        let newest_pos = self.working[newest];

        if self.parallel {
            let fresh: Vec<(usize, f64)> = {
                let state = &*self;
                state
                    .remaining
                    .par_iter()
                    .map(|&slot| {
                        let distance = state
                            .cache
                            .get(newest_pos, state.working[slot])
                            .unwrap_or_else(|| state.measure(newest, slot));
                        (slot, distance)
                    })
                    .collect()
            };
            for (slot, distance) in fresh {
                self.cache.insert(newest_pos, self.working[slot], distance);
                if distance < self.min_distances[slot] {
                    self.min_distances[slot] = distance;
                }
            }
            return;
        }

        let Self {
            items,
            ref working,
            ref metric,
            ref flattened,
            ref remaining,
            ref mut min_distances,
            ref mut cache,
            ..
        } = *self;
        for &slot in remaining.iter() {
            let distance = cache.get_or_compute(newest_pos, working[slot], || {
                metric.measure(items, working, flattened, newest, slot)
            });
            if distance < min_distances[slot] {
                min_distances[slot] = distance;
            }
        }
    }

    fn measure(&self, a: usize, b: usize) -> f64 {
        self.metric.measure(self.items, &self.working, &self.flattened, a, b)
    }

    fn score(&self, slot: usize) -> f64 {
        let min_distance = self.min_distances[slot];
        match self.completeness_weight {
            Some(weight) => (1.0 - weight) * min_distance + weight * self.completeness[slot],
            None => min_distance,
        }
    }

    /// Position in `remaining` of the highest-scoring candidate; earlier wins ties
    fn best_candidate(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (position, &slot) in self.remaining.iter().enumerate() {
            let score = self.score(slot);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((position, score));
            }
        }
        best
    }

    fn commit(&mut self, slot: usize) {
        if let Some(position) = self.remaining.iter().position(|&s| s == slot) {
            self.commit_at(position);
        }
    }

    fn commit_at(&mut self, position: usize) {
        let slot = self.remaining.remove(position);
        self.selected.push(slot);
    }
}
