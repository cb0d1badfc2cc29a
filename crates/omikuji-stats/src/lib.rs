//! Statistical accuracy validation for the omikuji engine.
//!
//! The validators treat samplers as black boxes fed by a [`RandomSource`]
//! and always return a report, never an error: their job is to describe how
//! observed draws deviate from the declared odds.
//!
//! [`RandomSource`]: omikuji_core::RandomSource

pub mod accuracy;
pub mod config;
pub mod consistency;
pub mod parameters;
pub mod significance;

pub use accuracy::{
    AccuracyReport, Bucket, validate_distribution_accuracy, validate_distribution_accuracy_seeded,
    validate_fortune_table_accuracy, validate_rarity_accuracy, validate_sampler,
};
pub use config::ValidationConfig;
pub use consistency::{ConsistencyReport, ConsistencyViolation, validate_emotion_consistency};
pub use parameters::{
    ParameterReport, PropertiesReport, RuleViolation, validate_distribution_parameters,
    validate_distribution_properties,
};
pub use significance::{
    SignificanceReport, approximate_p_value, chi_square, validate_statistical_significance,
};
