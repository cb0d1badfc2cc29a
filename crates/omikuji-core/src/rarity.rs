//! Rarity tiers and the rarity calculator.
//!
//! Four tiers drawn independently of the fortune level: COMMON 60%,
//! RARE 30%, EPIC 8%, LEGENDARY 2%.

use serde::{Deserialize, Serialize};

use crate::band::band_index;

/// Cumulative probabilities in tier order.
pub const RARITY_CUMULATIVE: [f64; 4] = [0.6, 0.9, 0.98, 1.0];

/// A rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    /// 60%.
    Common,
    /// 30%.
    Rare,
    /// 8%.
    Epic,
    /// 2%.
    Legendary,
}

impl Rarity {
    /// All tiers in ascending order.
    pub const ALL: [Rarity; 4] = [Self::Common, Self::Rare, Self::Epic, Self::Legendary];

    /// Ordinal value, 1-4.
    pub fn value(self) -> u8 {
        match self {
            Self::Common => 1,
            Self::Rare => 2,
            Self::Epic => 3,
            Self::Legendary => 4,
        }
    }

    /// Base probability of this tier.
    pub fn probability(self) -> f64 {
        match self {
            Self::Common => 0.60,
            Self::Rare => 0.30,
            Self::Epic => 0.08,
            Self::Legendary => 0.02,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Common => "コモン",
            Self::Rare => "レア",
            Self::Epic => "エピック",
            Self::Legendary => "レジェンダリー",
        }
    }

    /// Display colour as a hex string.
    pub fn display_color(self) -> &'static str {
        match self {
            Self::Common => "#9CA3AF",
            Self::Rare => "#3B82F6",
            Self::Epic => "#A855F7",
            Self::Legendary => "#F59E0B",
        }
    }

    /// EPIC and LEGENDARY come with special effects.
    pub fn has_special_effects(self) -> bool {
        self.value() >= 3
    }

    /// Every tier above COMMON.
    pub fn is_rare(self) -> bool {
        self > Self::Common
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Common => write!(f, "COMMON"),
            Self::Rare => write!(f, "RARE"),
            Self::Epic => write!(f, "EPIC"),
            Self::Legendary => write!(f, "LEGENDARY"),
        }
    }
}

/// The fixed cumulative table `[0.6, 0.9, 0.98, 1.0]`.
pub fn cumulative_probabilities() -> [f64; 4] {
    RARITY_CUMULATIVE
}

/// Map a uniform draw to a tier over an arbitrary cumulative table.
pub fn determine_with(cumulative: &[f64; 4], random_unit: f64) -> Rarity {
    Rarity::ALL[band_index(cumulative, random_unit).min(Rarity::ALL.len() - 1)]
}

/// Map a uniform draw to a tier using the base probabilities.
///
/// A draw equal to a band edge belongs to the higher band: 0.6 is RARE,
/// 0.98 and 1.0 are LEGENDARY.
pub fn determine_rarity(random_unit: f64) -> Rarity {
    determine_with(&RARITY_CUMULATIVE, random_unit)
}

/// Whether `rarity` is above COMMON.
pub fn is_rare_result(rarity: Rarity) -> bool {
    rarity.is_rare()
}
