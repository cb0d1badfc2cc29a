//! Structural checks on raw emotion-distribution parameters.
//!
//! Unlike [`EmotionAttributeDistribution::create`], which stops at the first
//! problem, these checks collect every violated rule into a report.
//!
//! [`EmotionAttributeDistribution::create`]: omikuji_core::EmotionAttributeDistribution::create

use serde::Serialize;

use omikuji_core::CoreError;
use omikuji_core::emotion::SUM_TOLERANCE;

/// Component names in parameter order.
const COMPONENTS: [&str; 3] = ["positive", "neutral", "negative"];

/// Rule code for a NaN or infinite component.
pub const NON_FINITE_PROBABILITY: &str = "NON_FINITE_PROBABILITY";

/// Warning code for a distribution with all mass on one component.
pub const DEGENERATE_DISTRIBUTION: &str = "DEGENERATE_DISTRIBUTION";

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleViolation {
    /// Stable rule code.
    pub code: &'static str,
    /// Human-readable detail.
    pub message: String,
}

impl From<CoreError> for RuleViolation {
    fn from(err: CoreError) -> Self {
        Self {
            code: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Outcome of the structural check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterReport {
    /// No rule was violated.
    pub is_valid: bool,
    /// Every violated rule.
    pub violations: Vec<RuleViolation>,
}

impl ParameterReport {
    /// Codes of all violations, in order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.code).collect()
    }
}

/// Outcome of the property check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertiesReport {
    /// Parameters are structurally valid. Warnings do not affect this.
    pub is_valid: bool,
    /// Shannon entropy in bits.
    pub entropy: f64,
    /// Entropy of the uniform distribution over the same components.
    pub max_entropy: f64,
    /// One component carries all the mass.
    pub is_degenerate: bool,
    /// Non-fatal findings.
    pub warnings: Vec<RuleViolation>,
    /// Structural violations, as in [`ParameterReport`].
    pub violations: Vec<RuleViolation>,
}

/// Check `[positive, neutral, negative]` for range and sum problems.
pub fn validate_distribution_parameters(params: [f64; 3]) -> ParameterReport {
    let mut violations = Vec::new();

    for (component, value) in COMPONENTS.into_iter().zip(params) {
        if !value.is_finite() {
            violations.push(RuleViolation {
                code: NON_FINITE_PROBABILITY,
                message: format!("probability for {component} is not finite: {value}"),
            });
        } else if !(0.0..=1.0).contains(&value) {
            violations.push(CoreError::InvalidProbabilityRange { component, value }.into());
        }
    }

    if params.iter().all(|p| p.is_finite()) {
        let sum: f64 = params.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            violations.push(CoreError::ProbabilitySumInvalid { sum }.into());
        }
    }

    ParameterReport {
        is_valid: violations.is_empty(),
        violations,
    }
}

/// Shannon entropy in bits, skipping zero (and non-positive) terms.
pub fn shannon_entropy(probs: &[f64]) -> f64 {
    probs
        .iter()
        .filter(|&&p| p > 0.0 && p.is_finite())
        .map(|&p| -p * p.log2())
        .sum()
}

/// Structural check plus entropy and degeneracy.
pub fn validate_distribution_properties(params: [f64; 3]) -> PropertiesReport {
    let structural = validate_distribution_parameters(params);
    let is_degenerate = params.contains(&1.0);

    let mut warnings = Vec::new();
    if is_degenerate {
        warnings.push(RuleViolation {
            code: DEGENERATE_DISTRIBUTION,
            message: "all probability mass is on a single attribute".to_string(),
        });
    }

    let entropy = shannon_entropy(&params);
    tracing::debug!(entropy, is_degenerate, "distribution properties computed");

    PropertiesReport {
        is_valid: structural.is_valid,
        entropy,
        max_entropy: (params.len() as f64).log2(),
        is_degenerate,
        warnings,
        violations: structural.violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_parameters_pass() {
        let report = validate_distribution_parameters([0.6, 0.3, 0.1]);
        assert!(report.is_valid);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn every_problem_is_collected() {
        let report = validate_distribution_parameters([1.5, -0.2, 0.3]);
        assert!(!report.is_valid);
        assert_eq!(
            report.codes(),
            vec![
                "INVALID_PROBABILITY_RANGE",
                "INVALID_PROBABILITY_RANGE",
                "PROBABILITY_SUM_INVALID",
            ]
        );
        assert!(report.violations[1].message.contains("neutral"));
    }

    #[test]
    fn sum_only() {
        let report = validate_distribution_parameters([0.5, 0.5, 0.5]);
        assert_eq!(report.codes(), vec!["PROBABILITY_SUM_INVALID"]);
    }

    #[test]
    fn non_finite_skips_sum_check() {
        let report = validate_distribution_parameters([f64::NAN, 0.5, f64::INFINITY]);
        assert_eq!(report.codes(), vec![NON_FINITE_PROBABILITY, NON_FINITE_PROBABILITY]);
    }

    #[test]
    fn entropy_values() {
        assert!((shannon_entropy(&[0.5, 0.5]) - 1.0).abs() < 1e-12);
        assert_eq!(shannon_entropy(&[1.0, 0.0, 0.0]), 0.0);
        let uniform = 1.0 / 3.0;
        assert!((shannon_entropy(&[uniform; 3]) - 3f64.log2()).abs() < 1e-12);
    }

    #[test]
    fn degenerate_is_a_warning_not_an_error() {
        let report = validate_distribution_properties([0.0, 0.0, 1.0]);
        assert!(report.is_valid);
        assert!(report.is_degenerate);
        assert_eq!(report.entropy, 0.0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].code, DEGENERATE_DISTRIBUTION);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn properties_of_a_spread_distribution() {
        let report = validate_distribution_properties([0.3, 0.5, 0.2]);
        assert!(report.is_valid);
        assert!(!report.is_degenerate);
        assert!(report.warnings.is_empty());
        assert!(report.entropy > 1.0 && report.entropy < report.max_entropy);
    }

    #[test]
    fn report_serializes_codes() {
        let report = validate_distribution_parameters([0.5, 0.5, 0.5]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["violations"][0]["code"], "PROBABILITY_SUM_INVALID");
    }

    #[test]
    fn properties_carry_structural_violations() {
        let report = validate_distribution_properties([0.9, 0.9, 0.0]);
        assert!(!report.is_valid);
        assert_eq!(report.violations[0].code, "PROBABILITY_SUM_INVALID");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn entropy_is_bounded(a in 0.0f64..1.0, b in 0.0f64..1.0) {
                let (lo, hi) = if a < b { (a, b) } else { (b, a) };
                let params = [lo, hi - lo, 1.0 - hi];
                let report = validate_distribution_properties(params);
                prop_assert!(report.is_valid);
                prop_assert!(report.entropy >= 0.0);
                prop_assert!(report.entropy <= report.max_entropy + 1e-9);
            }

            #[test]
            fn out_of_range_component_is_always_rejected(bad in 1.0001f64..10.0) {
                let report = validate_distribution_parameters([bad, 0.0, 0.0]);
                prop_assert!(!report.is_valid);
                prop_assert!(report.codes().contains(&"INVALID_PROBABILITY_RANGE"));
            }
        }
    }
}
