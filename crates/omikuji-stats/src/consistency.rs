//! Emotion consistency across repeated draws.
//!
//! A trial draws one emotion attribute per category from the distribution of
//! the fortune's value. Extreme fortunes must be unanimous in every trial.
//! Intermediate fortunes only fail a trial on a full polarity flip: every
//! category gloomy under a good fortune, or every category upbeat under a bad
//! one.

use serde::Serialize;

use omikuji_core::emotion::{EXTREME_NEGATIVE_VALUE, EXTREME_POSITIVE_VALUE};
use omikuji_core::{
    Category, EmotionAttribute, EmotionAttributeDistribution, FortuneLevel, RandomSource,
};

use crate::config::ValidationConfig;

/// A trial that broke the consistency rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyViolation {
    /// Zero-based trial number.
    pub trial: usize,
    /// Attribute drawn for each category, in category order.
    pub attributes: Vec<EmotionAttribute>,
}

/// Outcome of a consistency run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyReport {
    /// Whether the consistency rate met the required rate.
    pub is_valid: bool,
    /// Fortune level id.
    pub fortune_id: String,
    /// Fortune value the distribution was derived from.
    pub fortune_value: i32,
    /// Number of trials run.
    pub iterations: usize,
    /// Trials that satisfied the rule.
    pub consistent_trials: usize,
    /// `consistent_trials / iterations`.
    pub consistency_rate: f64,
    /// 1.0 for extreme fortunes, the configured threshold otherwise.
    pub required_rate: f64,
    /// The first few violating trials.
    pub violations: Vec<ConsistencyViolation>,
    /// Human-readable findings.
    pub validation_errors: Vec<String>,
}

/// Whether `value` is at or beyond either extreme.
pub fn is_extreme(value: i32) -> bool {
    value >= EXTREME_POSITIVE_VALUE || value <= EXTREME_NEGATIVE_VALUE
}

/// Whether one trial's draws satisfy the rule for `value`.
pub fn trial_is_consistent(value: i32, draws: &[EmotionAttribute]) -> bool {
    let all = |attr: EmotionAttribute| draws.iter().all(|&d| d == attr);
    if value >= EXTREME_POSITIVE_VALUE {
        all(EmotionAttribute::Positive)
    } else if value <= EXTREME_NEGATIVE_VALUE {
        all(EmotionAttribute::Negative)
    } else if value > 0 {
        !all(EmotionAttribute::Negative)
    } else if value < 0 {
        !all(EmotionAttribute::Positive)
    } else {
        true
    }
}

/// Run `iterations` trials of one draw per category for `fortune`.
pub fn validate_emotion_consistency<S: RandomSource + ?Sized>(
    fortune: &FortuneLevel,
    categories: &[Category],
    iterations: usize,
    source: &mut S,
    config: &ValidationConfig,
) -> ConsistencyReport {
    let value = fortune.value;
    let required_rate = if is_extreme(value) {
        1.0
    } else {
        config.consistency_threshold
    };
    let mut report = ConsistencyReport {
        is_valid: false,
        fortune_id: fortune.id.clone(),
        fortune_value: value,
        iterations: 0,
        consistent_trials: 0,
        consistency_rate: 0.0,
        required_rate,
        violations: Vec::new(),
        validation_errors: Vec::new(),
    };

    if categories.is_empty() {
        report.validation_errors.push("no categories to draw for".to_string());
    }
    if iterations == 0 {
        report.validation_errors.push("iterations must be positive".to_string());
    }
    let threshold = config.consistency_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        report.validation_errors.push(format!(
            "consistency threshold must be within [0, 1], got {threshold}"
        ));
    }
    if !report.validation_errors.is_empty() {
        return report;
    }

    let iterations = config.clamp_sample_size(iterations);
    let mut consistent_trials = 0;
    let mut draws = Vec::with_capacity(categories.len());
    for trial in 0..iterations {
        let distribution = EmotionAttributeDistribution::for_fortune_level(value);
        draws.clear();
        draws.extend(
            categories
                .iter()
                .map(|_| distribution.select_emotion_attribute(source.next_unit())),
        );

        if trial_is_consistent(value, &draws) {
            consistent_trials += 1;
        } else if report.violations.len() < config.max_recorded_violations {
            report.violations.push(ConsistencyViolation {
                trial,
                attributes: draws.clone(),
            });
        }
    }

    let rate = consistent_trials as f64 / iterations as f64;
    report.iterations = iterations;
    report.consistent_trials = consistent_trials;
    report.consistency_rate = rate;
    if rate < required_rate {
        report.validation_errors.push(format!(
            "{} (value {value}): consistency {:.2}% below required {:.2}%",
            fortune.id,
            rate * 100.0,
            required_rate * 100.0
        ));
    }
    report.is_valid = report.validation_errors.is_empty();

    if report.is_valid {
        tracing::info!(fortune = %fortune.id, rate, "emotion consistency passed");
    } else {
        tracing::warn!(fortune = %fortune.id, rate, required_rate, "emotion consistency failed");
    }
    report
}
