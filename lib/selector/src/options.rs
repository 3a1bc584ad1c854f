use divsel_core::{Error, Result, SequenceMode};
use divsel_similarity::DistanceFunction;
use std::fmt;
use std::sync::Arc;

/// Working-set cap used when no sample size is given
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

/// Weight of completeness in the blended score when prioritizing complete records
pub const DEFAULT_COMPLETENESS_WEIGHT: f64 = 0.3;

/// Options for a single selection run
#[derive(Clone)]
pub struct SelectionOptions {
    /// Number of records to select
    pub num_examples: usize,
    /// Cap on the working set; defaults to `min(1000, collection size)`
    pub sample_size: Option<usize>,
    /// Start from the most complete record and blend completeness into the score
    pub prioritize_complete: bool,
    /// Completeness share of the blended score, in [0.0, 1.0]
    pub completeness_weight: f64,
    /// Replaces the default record distance when set
    pub distance: Option<Arc<dyn DistanceFunction>>,
    /// Seed for the initial pick and the sampler; random when `None`
    pub seed: Option<u64>,
    /// Sequence handling for flattening (default metric and completeness)
    pub sequence_mode: SequenceMode,
    /// Evaluate candidate distances on the rayon pool
    pub parallel: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            num_examples: 0,
            sample_size: None,
            prioritize_complete: false,
            completeness_weight: DEFAULT_COMPLETENESS_WEIGHT,
            distance: None,
            seed: None,
            sequence_mode: SequenceMode::Positional,
            parallel: false,
        }
    }
}

impl fmt::Debug for SelectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionOptions")
            .field("num_examples", &self.num_examples)
            .field("sample_size", &self.sample_size)
            .field("prioritize_complete", &self.prioritize_complete)
            .field("completeness_weight", &self.completeness_weight)
            .field("distance", &self.distance.as_ref().map(|_| "custom"))
            .field("seed", &self.seed)
            .field("sequence_mode", &self.sequence_mode)
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl SelectionOptions {
    /// Options selecting `num_examples` records with everything else defaulted
    pub fn new(num_examples: usize) -> Self {
        Self {
            num_examples,
            ..Self::default()
        }
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = Some(sample_size);
        self
    }

    pub fn with_prioritize_complete(mut self, prioritize: bool) -> Self {
        self.prioritize_complete = prioritize;
        self
    }

    pub fn with_completeness_weight(mut self, weight: f64) -> Self {
        self.completeness_weight = weight;
        self
    }

    /// Use a custom distance function instead of the default record distance
    pub fn with_distance<D>(mut self, distance: D) -> Self
    where
        D: DistanceFunction + 'static,
    {
        self.distance = Some(Arc::new(distance));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sequence_mode(mut self, mode: SequenceMode) -> Self {
        self.sequence_mode = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check option values that do not depend on the input collection
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.completeness_weight) {
            return Err(Error::InvalidConfig(format!(
                "completeness weight must be between 0 and 1, got {}",
                self.completeness_weight
            )));
        }
        if self.sample_size == Some(0) {
            return Err(Error::InvalidConfig(
                "sample size must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Working-set cap for a collection of `collection_size` records
    pub fn effective_sample_size(&self, collection_size: usize) -> usize {
        self.sample_size
            .unwrap_or_else(|| DEFAULT_SAMPLE_SIZE.min(collection_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_defaults() {
        let options = SelectionOptions::new(5);
        assert_eq!(options.num_examples, 5);
        assert_eq!(options.sample_size, None);
        assert!(!options.prioritize_complete);
        assert_eq!(options.completeness_weight, 0.3);
        assert!(options.distance.is_none());
        assert!(options.seed.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_weight_out_of_range() {
        for weight in [-0.1, 1.5, f64::NAN] {
            let options = SelectionOptions::new(1).with_completeness_weight(weight);
            assert!(matches!(options.validate(), Err(Error::InvalidConfig(_))));
        }
        assert!(SelectionOptions::new(1).with_completeness_weight(0.0).validate().is_ok());
        assert!(SelectionOptions::new(1).with_completeness_weight(1.0).validate().is_ok());
    }

    #[test]
    fn test_zero_sample_size_rejected() {
        let options = SelectionOptions::new(1).with_sample_size(0);
        assert!(options.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_effective_sample_size() {
        assert_eq!(SelectionOptions::new(1).effective_sample_size(50), 50);
        assert_eq!(SelectionOptions::new(1).effective_sample_size(5000), 1000);
        assert_eq!(SelectionOptions::new(1).with_sample_size(20).effective_sample_size(5000), 20);
    }

    #[test]
    fn test_debug_hides_distance_closure() {
        let options = SelectionOptions::new(2).with_distance(|_: &Value, _: &Value| 0.5);
        let rendered = format!("{:?}", options);
        assert!(rendered.contains("custom"));
    }
}
