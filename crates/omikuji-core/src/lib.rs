//! Core tables and value objects for the omikuji engine.
//!
//! Defines the static fortune-level table, category message pools, rarity
//! tiers, saisen (offering) tiers, and the emotion-attribute distribution,
//! together with the cumulative-band selection primitive that every sampler
//! in the workspace is built on. Nothing here performs I/O: callers supply a
//! uniform random value (or a [`RandomSource`]) and get a plain record back.

/// Cumulative-band selection over weighted tables.
pub mod band;
/// Categories and their positive/negative message pools.
pub mod category;
/// Emotion attributes and their 3-way probability distribution.
pub mod emotion;
/// Error types used throughout the crate.
pub mod error;
/// Fortune levels and the weighted fortune table.
pub mod fortune;
/// The catalogue of selectable omikuji types.
pub mod omikuji_type;
/// Title phrases and descriptions shown with each fortune level.
pub mod presentation;
/// Injectable sources of uniform random values.
pub mod random;
/// Rarity tiers and the rarity calculator.
pub mod rarity;
/// Saisen (offering) tiers and their effects.
pub mod saisen;

/// Re-export the band primitive.
pub use band::{band_index, pick_uniform, running_sum, select_by_cumulative_band};
/// Re-export category types.
pub use category::{Category, MessagePool};
/// Re-export emotion types.
pub use emotion::{EmotionAttribute, EmotionAttributeDistribution};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export fortune types.
pub use fortune::{FortuneLevel, FortuneTable};
/// Re-export omikuji catalogue types.
pub use omikuji_type::{OmikujiMode, OmikujiType};
/// Re-export random sources.
pub use random::{RandomSource, SequenceSource};
/// Re-export rarity types.
pub use rarity::Rarity;
/// Re-export saisen types.
pub use saisen::{Saisen, SaisenEffects};
