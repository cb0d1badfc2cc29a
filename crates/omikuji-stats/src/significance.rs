//! Chi-square goodness-of-fit.
//!
//! The p-value comes from a small table of critical values rather than the
//! chi-square CDF, so it is only accurate to the nearest tabulated level.

use serde::Serialize;

use omikuji_core::{EmotionAttributeDistribution, RandomSource};

use crate::accuracy::{emotion_buckets, tally};
use crate::config::ValidationConfig;

/// p-values the critical table is tabulated at, largest first.
const P_LEVELS: [f64; 6] = [0.90, 0.50, 0.10, 0.05, 0.01, 0.001];

/// Critical chi-square values for 1 to 6 degrees of freedom.
const CRITICAL_VALUES: [[f64; 6]; 6] = [
    [0.016, 0.455, 2.706, 3.841, 6.635, 10.828],
    [0.211, 1.386, 4.605, 5.991, 9.210, 13.816],
    [0.584, 2.366, 6.251, 7.815, 11.345, 16.266],
    [1.064, 3.357, 7.779, 9.488, 13.277, 18.467],
    [1.610, 4.351, 9.236, 11.070, 15.086, 20.515],
    [2.204, 5.348, 10.645, 12.592, 16.812, 22.458],
];

/// Outcome of a goodness-of-fit run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignificanceReport {
    /// The chi-square statistic.
    pub chi_square: f64,
    /// Bucket count minus one.
    pub degrees_of_freedom: usize,
    /// Tabulated p-value, or `None` when no table row exists.
    pub p_value: Option<f64>,
    /// Significance level the p-value is compared with.
    pub alpha: f64,
    /// `p_value <= alpha`: the statistic reached the critical value at
    /// `alpha`, so the sample does not fit the distribution.
    pub is_significant: bool,
    /// No significant misfit and no input errors.
    pub is_valid: bool,
    /// Observed count per bucket.
    pub observed_counts: Vec<usize>,
    /// Expected count per bucket.
    pub expected_counts: Vec<f64>,
    /// Number of draws actually taken.
    pub sample_size: usize,
    /// Human-readable findings.
    pub validation_errors: Vec<String>,
}

/// Pearson's chi-square for `observed` counts against `expected_probs`.
///
/// Buckets with zero expected count are skipped, unless something was
/// observed there, which makes the statistic infinite.
pub fn chi_square(observed: &[usize], expected_probs: &[f64]) -> f64 {
    let total: usize = observed.iter().sum();
    let mut statistic = 0.0;
    for (&count, &p) in observed.iter().zip(expected_probs) {
        let expected = p * total as f64;
        if expected <= 0.0 {
            if count > 0 {
                return f64::INFINITY;
            }
            continue;
        }
        let diff = count as f64 - expected;
        statistic += diff * diff / expected;
    }
    statistic
}

/// Approximate p-value for `statistic` with `df` degrees of freedom.
///
/// Returns the smallest tabulated p whose critical value the statistic
/// reaches, 1.0 below the first critical value, and `None` for `df` outside
/// 1..=6 or a NaN statistic.
pub fn approximate_p_value(statistic: f64, df: usize) -> Option<f64> {
    if statistic.is_nan() {
        return None;
    }
    let row = CRITICAL_VALUES.get(df.checked_sub(1)?)?;
    let p = row
        .iter()
        .zip(P_LEVELS)
        .rev()
        .find(|(critical, _)| statistic >= **critical)
        .map_or(1.0, |(_, p)| p);
    Some(p)
}

/// Goodness-of-fit of a generic sampler against `expected_probs`.
pub fn validate_goodness_of_fit<S, F>(
    expected_probs: &[f64],
    sample_size: usize,
    alpha: f64,
    source: &mut S,
    config: &ValidationConfig,
    classify: F,
) -> SignificanceReport
where
    S: RandomSource + ?Sized,
    F: Fn(f64) -> usize,
{
    let degrees_of_freedom = expected_probs.len().saturating_sub(1);
    let mut report = SignificanceReport {
        chi_square: 0.0,
        degrees_of_freedom,
        p_value: None,
        alpha,
        is_significant: false,
        is_valid: false,
        observed_counts: vec![0; expected_probs.len()],
        expected_counts: vec![0.0; expected_probs.len()],
        sample_size: 0,
        validation_errors: Vec::new(),
    };

    if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
        report.validation_errors.push(format!("alpha must be within (0, 1), got {alpha}"));
    }
    if sample_size == 0 {
        report.validation_errors.push("sample size must be positive".to_string());
    }
    if degrees_of_freedom == 0 {
        report.validation_errors.push("need at least two buckets".to_string());
    }
    if !report.validation_errors.is_empty() {
        return report;
    }

    let sample_size = config.clamp_sample_size(sample_size);
    let observed = tally(expected_probs.len(), sample_size, source, classify);
    let statistic = chi_square(&observed, expected_probs);
    let p_value = approximate_p_value(statistic, degrees_of_freedom);

    report.chi_square = statistic;
    report.p_value = p_value;
    report.expected_counts = expected_probs.iter().map(|p| p * sample_size as f64).collect();
    report.observed_counts = observed;
    report.sample_size = sample_size;

    match p_value {
        Some(p) => {
            report.is_significant = p <= alpha;
            if report.is_significant {
                report.validation_errors.push(format!(
                    "chi-square {statistic:.3} with {degrees_of_freedom} df \
                     gives p <= {p}, within alpha {alpha}"
                ));
            }
        }
        None => report.validation_errors.push(format!(
            "no critical values tabulated for {degrees_of_freedom} degrees of freedom"
        )),
    }
    report.is_valid = report.validation_errors.is_empty();

    tracing::info!(
        chi_square = statistic,
        df = degrees_of_freedom,
        p = ?p_value,
        valid = report.is_valid,
        "goodness-of-fit computed"
    );
    report
}

/// Goodness-of-fit of `select_emotion_attribute` against `distribution`.
pub fn validate_statistical_significance<S: RandomSource + ?Sized>(
    distribution: &EmotionAttributeDistribution,
    sample_size: usize,
    alpha: f64,
    source: &mut S,
    config: &ValidationConfig,
) -> SignificanceReport {
    let expected: Vec<f64> = emotion_buckets(distribution)
        .iter()
        .map(|b| b.probability)
        .collect();
    validate_goodness_of_fit(&expected, sample_size, alpha, source, config, |u| {
        distribution.select_emotion_attribute(u).index()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use omikuji_core::SequenceSource;

    fn stratified(n: usize) -> SequenceSource {
        SequenceSource::new(
            (0..n)
                .map(|i| (i as f64 + 0.5) / n as f64)
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn chi_square_of_perfect_fit_is_zero() {
        assert!(chi_square(&[60, 30, 10], &[0.6, 0.3, 0.1]) < 1e-12);
    }

    #[test]
    fn chi_square_known_value() {
        // (50-60)^2/60 + (40-30)^2/30 + (10-10)^2/10
        let stat = chi_square(&[50, 40, 10], &[0.6, 0.3, 0.1]);
        assert!((stat - (100.0 / 60.0 + 100.0 / 30.0)).abs() < 1e-9);
    }

    #[test]
    fn chi_square_zero_expected_buckets() {
        assert_eq!(chi_square(&[10, 0, 0], &[1.0, 0.0, 0.0]), 0.0);
        assert!(chi_square(&[9, 1, 0], &[1.0, 0.0, 0.0]).is_infinite());
    }

    #[test]
    fn p_value_lookup_for_two_df() {
        assert_eq!(approximate_p_value(0.1, 2), Some(1.0));
        assert_eq!(approximate_p_value(0.211, 2), Some(0.90));
        assert_eq!(approximate_p_value(2.0, 2), Some(0.50));
        assert_eq!(approximate_p_value(5.0, 2), Some(0.10));
        assert_eq!(approximate_p_value(5.991, 2), Some(0.05));
        assert_eq!(approximate_p_value(9.5, 2), Some(0.01));
        assert_eq!(approximate_p_value(13.816, 2), Some(0.001));
        assert_eq!(approximate_p_value(f64::INFINITY, 2), Some(0.001));
    }

    #[test]
    fn p_value_outside_table() {
        assert_eq!(approximate_p_value(3.0, 0), None);
        assert_eq!(approximate_p_value(3.0, 7), None);
        assert_eq!(approximate_p_value(f64::NAN, 2), None);
        assert_eq!(approximate_p_value(3.9, 1), Some(0.05));
        assert_eq!(approximate_p_value(23.0, 6), Some(0.001));
    }

    #[test]
    fn exact_sample_is_not_significant() {
        let d = EmotionAttributeDistribution::create(0.6, 0.3, 0.1).unwrap();
        let mut source = stratified(100);
        let report = validate_statistical_significance(
            &d,
            1_000,
            0.05,
            &mut source,
            &ValidationConfig::default(),
        );
        assert!(report.is_valid);
        assert!(!report.is_significant);
        assert_eq!(report.degrees_of_freedom, 2);
        assert_eq!(report.observed_counts, vec![600, 300, 100]);
        assert_eq!(report.p_value, Some(1.0));
    }

    #[test]
    fn degenerate_distribution_fits_perfectly() {
        let d = EmotionAttributeDistribution::for_fortune_level(-2);
        let config = ValidationConfig::default();
        let report = validate_statistical_significance(&d, 5_000, 0.05, &mut config.rng(), &config);
        assert_eq!(report.chi_square, 0.0);
        assert_eq!(report.observed_counts, vec![0, 0, 5_000]);
        assert!(report.is_valid);
    }

    #[test]
    fn biased_sample_is_significant() {
        let d = EmotionAttributeDistribution::create(0.6, 0.3, 0.1).unwrap();
        let mut source = SequenceSource::constant(0.7);
        let report = validate_statistical_significance(
            &d,
            1_000,
            0.05,
            &mut source,
            &ValidationConfig::default(),
        );
        assert!(report.is_significant);
        assert!(!report.is_valid);
        assert_eq!(report.p_value, Some(0.001));
        assert_eq!(report.observed_counts, vec![0, 1_000, 0]);
    }

    #[test]
    fn bad_inputs_are_reported() {
        let d = EmotionAttributeDistribution::for_fortune_level(0);
        let mut source = SequenceSource::constant(0.5);
        let config = ValidationConfig::default();
        let report = validate_statistical_significance(&d, 0, 1.5, &mut source, &config);
        assert!(!report.is_valid);
        assert_eq!(report.validation_errors.len(), 2);
        assert_eq!(source.draws(), 0);

        let report = validate_goodness_of_fit(&[1.0], 10, 0.05, &mut source, &config, |_| 0);
        assert!(!report.is_valid);
        assert!(report.validation_errors[0].contains("two buckets"));
    }

    #[test]
    fn too_many_buckets_has_no_p_value() {
        let probs = [0.125; 8];
        let mut source = stratified(8);
        let report = validate_goodness_of_fit(
            &probs,
            800,
            0.05,
            &mut source,
            &ValidationConfig::default(),
            |u| (u * 8.0) as usize,
        );
        assert_eq!(report.degrees_of_freedom, 7);
        assert_eq!(report.p_value, None);
        assert!(!report.is_valid);
    }

    #[test]
    fn statistic_between_critical_values_is_significant() {
        // chi-square 8.0 with 2 df: past 5.991 (0.05), short of 9.210 (0.01)
        let d = EmotionAttributeDistribution::create(0.6, 0.3, 0.1).unwrap();
        let mut values = vec![0.1; 560];
        values.extend([0.7; 320]);
        values.extend([0.95; 120]);
        let mut source = SequenceSource::new(values);
        let report = validate_statistical_significance(
            &d,
            1_000,
            0.05,
            &mut source,
            &ValidationConfig::default(),
        );
        assert_eq!(report.observed_counts, vec![560, 320, 120]);
        assert!((report.chi_square - 8.0).abs() < 1e-9);
        assert_eq!(report.p_value, Some(0.05));
        assert!(report.is_significant);
        assert!(!report.is_valid);
    }

    #[test]
    fn statistic_below_critical_value_is_not_significant() {
        // chi-square 5.0 with 2 df stays under 5.991
        assert_eq!(approximate_p_value(5.0, 2), Some(0.10));
        let d = EmotionAttributeDistribution::create(0.6, 0.3, 0.1).unwrap();
        let mut values = vec![0.1; 570];
        values.extend([0.7; 330]);
        values.extend([0.95; 100]);
        let mut source = SequenceSource::new(values);
        let report = validate_statistical_significance(
            &d,
            1_000,
            0.05,
            &mut source,
            &ValidationConfig::default(),
        );
        assert!(report.chi_square < 5.991);
        assert!(!report.is_significant);
        assert!(report.is_valid);
    }
}
