//! Fortune drawing services for the omikuji engine.
//!
//! Builds on the tables in `omikuji-core`: tone-conditioned category advice,
//! the saisen effect calculator that reshapes rarity odds, and the
//! [`Omikuji`] service that composes a complete slip from one random source.

pub mod advice;
pub mod config;
pub mod draw;
pub mod error;
pub mod saisen_effect;

pub use advice::{Advice, positive_probability, select_category_advice};
pub use config::DrawConfig;
pub use draw::{CategoryReading, DrawResult, FortuneSummary, Omikuji};
pub use error::{EngineError, EngineResult};
pub use saisen_effect::{
    adjust_rarity_probabilities, determine_rarity_with_saisen, normalize_probabilities,
};
