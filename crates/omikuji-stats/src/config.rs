//! Configuration for statistical validation runs.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Configuration shared by the validators.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// RNG seed used by the seeded convenience entry points.
    pub seed: u64,
    /// Largest allowed per-bucket deviation, in percentage points.
    pub tolerance_percent: f64,
    /// Minimum consistency rate for intermediate fortune values.
    pub consistency_threshold: f64,
    /// Sample sizes and iteration counts above this are clamped.
    pub max_sample_size: usize,
    /// How many individual violations a report keeps. 0 = none.
    pub max_recorded_violations: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tolerance_percent: 5.0,
            consistency_threshold: 0.95,
            max_sample_size: 1_000_000,
            max_recorded_violations: 10,
        }
    }
}

impl ValidationConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the deviation tolerance in percentage points.
    pub fn with_tolerance_percent(mut self, tolerance: f64) -> Self {
        self.tolerance_percent = tolerance;
        self
    }

    /// Set the consistency threshold for intermediate fortunes.
    pub fn with_consistency_threshold(mut self, threshold: f64) -> Self {
        self.consistency_threshold = threshold;
        self
    }

    /// Set the sample size cap.
    pub fn with_max_sample_size(mut self, max: usize) -> Self {
        self.max_sample_size = max;
        self
    }

    /// Set how many violations a report records.
    pub fn with_max_recorded_violations(mut self, max: usize) -> Self {
        self.max_recorded_violations = max;
        self
    }

    /// A generator seeded from [`seed`](Self::seed).
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }

    /// Clamp a requested sample size to the configured cap.
    pub fn clamp_sample_size(&self, requested: usize) -> usize {
        if requested > self.max_sample_size {
            tracing::warn!(
                requested,
                max = self.max_sample_size,
                "sample size clamped"
            );
            self.max_sample_size
        } else {
            requested
        }
    }
}
