//! Monte Carlo accuracy checks.
//!
//! A sampler is treated as a black box that maps one uniform draw to a bucket
//! index. The validator draws `sample_size` values, tallies buckets, and
//! compares observed frequencies with the declared probabilities.

use serde::Serialize;

use omikuji_core::rarity::{self, RARITY_CUMULATIVE};
use omikuji_core::{
    EmotionAttribute, EmotionAttributeDistribution, FortuneTable, RandomSource, Saisen,
};
use omikuji_engine::saisen_effect::{adjust_rarity_probabilities, band_widths};

use crate::config::ValidationConfig;

/// One outcome of a sampler and its declared probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    /// Display label.
    pub label: String,
    /// Declared probability.
    pub probability: f64,
}

impl Bucket {
    /// Create a bucket.
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// Outcome of an accuracy run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    /// Whether the largest deviation is within tolerance.
    pub is_valid: bool,
    /// Bucket labels, in the order of the distributions below.
    pub labels: Vec<String>,
    /// Observed frequency of each bucket.
    pub actual_distribution: Vec<f64>,
    /// Declared probability of each bucket.
    pub expected_distribution: Vec<f64>,
    /// Largest absolute deviation, in percentage points.
    pub deviation_percentage: f64,
    /// Number of draws actually taken.
    pub sample_size: usize,
    /// Human-readable findings.
    pub validation_errors: Vec<String>,
}

impl AccuracyReport {
    fn rejected(buckets: &[Bucket], error: String) -> Self {
        Self {
            is_valid: false,
            labels: buckets.iter().map(|b| b.label.clone()).collect(),
            actual_distribution: vec![0.0; buckets.len()],
            expected_distribution: buckets.iter().map(|b| b.probability).collect(),
            deviation_percentage: 0.0,
            sample_size: 0,
            validation_errors: vec![error],
        }
    }
}

/// Tally `sample_size` draws of `classify` and compare with `buckets`.
///
/// `classify` maps a uniform draw to an index into `buckets`; indices past
/// the end are counted against the last bucket.
pub fn validate_sampler<S, F>(
    buckets: &[Bucket],
    sample_size: usize,
    source: &mut S,
    config: &ValidationConfig,
    classify: F,
) -> AccuracyReport
where
    S: RandomSource + ?Sized,
    F: Fn(f64) -> usize,
{
    if buckets.is_empty() {
        return AccuracyReport::rejected(buckets, "no buckets to validate".to_string());
    }
    if sample_size == 0 {
        return AccuracyReport::rejected(buckets, "sample size must be positive".to_string());
    }
    let tolerance = config.tolerance_percent;
    if !tolerance.is_finite() || tolerance < 0.0 {
        return AccuracyReport::rejected(
            buckets,
            format!("tolerance must be finite and non-negative, got {tolerance}"),
        );
    }
    let sample_size = config.clamp_sample_size(sample_size);

    let counts = tally(buckets.len(), sample_size, source, classify);
    let actual: Vec<f64> = counts
        .iter()
        .map(|&c| c as f64 / sample_size as f64)
        .collect();

    let mut validation_errors = Vec::new();
    let mut max_deviation = 0.0_f64;
    for (bucket, observed) in buckets.iter().zip(&actual) {
        let deviation = (observed - bucket.probability).abs() * 100.0;
        max_deviation = max_deviation.max(deviation);
        if deviation > tolerance {
            validation_errors.push(format!(
                "{}: observed {:.2}% vs expected {:.2}% (deviation {:.2}pp)",
                bucket.label,
                observed * 100.0,
                bucket.probability * 100.0,
                deviation
            ));
        }
    }

    let is_valid = validation_errors.is_empty();
    if is_valid {
        tracing::info!(sample_size, deviation = max_deviation, "accuracy check passed");
    } else {
        tracing::warn!(sample_size, deviation = max_deviation, "accuracy check failed");
    }

    AccuracyReport {
        is_valid,
        labels: buckets.iter().map(|b| b.label.clone()).collect(),
        actual_distribution: actual,
        expected_distribution: buckets.iter().map(|b| b.probability).collect(),
        deviation_percentage: max_deviation,
        sample_size,
        validation_errors,
    }
}

/// Count how many of `sample_size` draws land in each of `len` buckets.
pub(crate) fn tally<S, F>(len: usize, sample_size: usize, source: &mut S, classify: F) -> Vec<usize>
where
    S: RandomSource + ?Sized,
    F: Fn(f64) -> usize,
{
    let mut counts = vec![0usize; len];
    let last = len.saturating_sub(1);
    for _ in 0..sample_size {
        let idx = classify(source.next_unit()).min(last);
        if let Some(count) = counts.get_mut(idx) {
            *count += 1;
        }
    }
    counts
}

/// Buckets of an emotion distribution, in band order.
pub fn emotion_buckets(distribution: &EmotionAttributeDistribution) -> Vec<Bucket> {
    EmotionAttribute::ALL
        .iter()
        .map(|&a| Bucket::new(a.to_string(), distribution.probability_of(a)))
        .collect()
}

/// Check that `select_emotion_attribute` reproduces `distribution`.
pub fn validate_distribution_accuracy<S: RandomSource + ?Sized>(
    distribution: &EmotionAttributeDistribution,
    sample_size: usize,
    source: &mut S,
    config: &ValidationConfig,
) -> AccuracyReport {
    validate_sampler(
        &emotion_buckets(distribution),
        sample_size,
        source,
        config,
        |u| distribution.select_emotion_attribute(u).index(),
    )
}

/// [`validate_distribution_accuracy`] with a seeded generator and default
/// settings.
pub fn validate_distribution_accuracy_seeded(
    distribution: &EmotionAttributeDistribution,
    sample_size: usize,
    seed: u64,
) -> AccuracyReport {
    let config = ValidationConfig::default().with_seed(seed);
    let mut rng = config.rng();
    validate_distribution_accuracy(distribution, sample_size, &mut rng, &config)
}

/// Check that the weighted sampler reproduces the table's weights.
pub fn validate_fortune_table_accuracy<S: RandomSource + ?Sized>(
    table: &FortuneTable,
    sample_size: usize,
    source: &mut S,
    config: &ValidationConfig,
) -> AccuracyReport {
    let buckets: Vec<Bucket> = table
        .levels()
        .iter()
        .zip(table.probabilities())
        .map(|(level, p)| Bucket::new(level.id.clone(), p))
        .collect();
    validate_sampler(&buckets, sample_size, source, config, |u| {
        table.select_index(u)
    })
}

/// Check the rarity calculator under `saisen` against the adjusted odds.
pub fn validate_rarity_accuracy<S: RandomSource + ?Sized>(
    saisen: Saisen,
    sample_size: usize,
    source: &mut S,
    config: &ValidationConfig,
) -> AccuracyReport {
    let cumulative = adjust_rarity_probabilities(RARITY_CUMULATIVE, saisen);
    let widths = band_widths(&cumulative);
    let buckets: Vec<Bucket> = rarity::Rarity::ALL
        .iter()
        .zip(widths)
        .map(|(tier, p)| Bucket::new(tier.to_string(), p))
        .collect();
    validate_sampler(&buckets, sample_size, source, config, |u| {
        usize::from(rarity::determine_with(&cumulative, u).value() - 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use omikuji_core::SequenceSource;

    /// Evenly spaced draws, `n` per cycle.
    fn stratified(n: usize) -> SequenceSource {
        SequenceSource::new(
            (0..n)
                .map(|i| (i as f64 + 0.5) / n as f64)
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn seeded_run_is_within_tolerance() {
        let d = EmotionAttributeDistribution::create(0.6, 0.3, 0.1).unwrap();
        let report = validate_distribution_accuracy_seeded(&d, 10_000, 42);
        assert!(report.is_valid, "{:?}", report.validation_errors);
        assert_eq!(report.sample_size, 10_000);
        assert_eq!(report.labels, vec!["POSITIVE", "NEUTRAL", "NEGATIVE"]);
        assert!(report.deviation_percentage <= 5.0);
        let total: f64 = report.actual_distribution.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn seeded_runs_repeat() {
        let d = EmotionAttributeDistribution::for_fortune_level(0);
        let a = validate_distribution_accuracy_seeded(&d, 2_000, 9);
        let b = validate_distribution_accuracy_seeded(&d, 2_000, 9);
        assert_eq!(a, b);
    }

    #[test]
    fn stratified_source_matches_exactly() {
        let d = EmotionAttributeDistribution::create(0.6, 0.3, 0.1).unwrap();
        let mut source = stratified(100);
        let report =
            validate_distribution_accuracy(&d, 1_000, &mut source, &ValidationConfig::default());
        assert!(report.is_valid);
        assert!(report.deviation_percentage < 1e-9);
    }

    #[test]
    fn biased_source_fails() {
        let d = EmotionAttributeDistribution::create(0.6, 0.3, 0.1).unwrap();
        let mut source = SequenceSource::constant(0.0);
        let report =
            validate_distribution_accuracy(&d, 500, &mut source, &ValidationConfig::default());
        assert!(!report.is_valid);
        assert_eq!(report.actual_distribution, vec![1.0, 0.0, 0.0]);
        assert!((report.deviation_percentage - 40.0).abs() < 1e-9);
        assert_eq!(report.validation_errors.len(), 3);
        assert!(report.validation_errors[0].starts_with("POSITIVE"));
    }

    #[test]
    fn zero_samples_is_rejected() {
        let d = EmotionAttributeDistribution::for_fortune_level(2);
        let report = validate_distribution_accuracy_seeded(&d, 0, 1);
        assert!(!report.is_valid);
        assert_eq!(report.sample_size, 0);
        assert!(report.validation_errors[0].contains("sample size"));
    }

    #[test]
    fn oversized_run_is_clamped() {
        let d = EmotionAttributeDistribution::for_fortune_level(4);
        let config = ValidationConfig::default().with_max_sample_size(250);
        let mut rng = config.rng();
        let report = validate_distribution_accuracy(&d, 10_000, &mut rng, &config);
        assert_eq!(report.sample_size, 250);
        assert!(report.is_valid);
        assert_eq!(report.actual_distribution, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn fortune_table_sampler_is_accurate() {
        let table = FortuneTable::standard();
        let mut source = stratified(100);
        let config = ValidationConfig::default();
        let report = validate_fortune_table_accuracy(&table, 1_000, &mut source, &config);
        assert!(report.is_valid, "{:?}", report.validation_errors);
        assert_eq!(report.labels[0], "daikichi");
        assert!((report.actual_distribution[0] - 0.16).abs() < 1e-9);

        let report = validate_fortune_table_accuracy(&table, 20_000, &mut config.rng(), &config);
        assert!(report.is_valid, "{:?}", report.validation_errors);
    }

    #[test]
    fn rarity_sampler_follows_saisen() {
        let config = ValidationConfig::default();
        for saisen in Saisen::ALL {
            let mut source = stratified(1_000);
            let report = validate_rarity_accuracy(saisen, 1_000, &mut source, &config);
            assert!(report.is_valid, "{saisen:?}: {:?}", report.validation_errors);
        }
        let mut source = stratified(1_000);
        let report = validate_rarity_accuracy(Saisen::Bug, 1_000, &mut source, &config);
        assert!((report.expected_distribution[3] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn empty_bucket_list_is_rejected() {
        let mut source = SequenceSource::constant(0.5);
        let report =
            validate_sampler(&[], 10, &mut source, &ValidationConfig::default(), |_| 0);
        assert!(!report.is_valid);
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn unusable_tolerance_is_rejected() {
        let d = EmotionAttributeDistribution::create(0.6, 0.3, 0.1).unwrap();
        for tolerance in [f64::NAN, f64::INFINITY, -1.0] {
            // 0.0 always lands in POSITIVE, 40pp off
            let mut source = SequenceSource::constant(0.0);
            let config = ValidationConfig::default().with_tolerance_percent(tolerance);
            let report = validate_distribution_accuracy(&d, 1_000, &mut source, &config);
            assert!(!report.is_valid, "{tolerance}");
            assert!(report.validation_errors[0].contains("tolerance"));
            assert_eq!(source.draws(), 0);
        }
    }
}
