//! Saisen (offering) tiers.
//!
//! An offering is chosen before drawing and may shift the rarity table
//! toward higher tiers. The tiers are a closed set; the effect arithmetic
//! lives in the engine's saisen effect calculator.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Effects attached to an offering tier.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SaisenEffects {
    /// Rarity boost in percentage points, if any.
    pub rarity_boost: Option<f64>,
    /// Replaces the rarity table with an irregular one instead of boosting.
    pub is_special: bool,
    /// The result screen plays an extra animation.
    pub has_special_animation: bool,
}

/// An offering tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Saisen {
    /// No offering.
    #[default]
    None,
    /// 5 yen, for good connections. No effect on rarity.
    Goen,
    /// 50 yen.
    #[serde(rename = "fifty")]
    FiftyYen,
    /// 100 yen.
    #[serde(rename = "hundred")]
    HundredYen,
    /// 500 yen, the largest regular offering.
    #[serde(rename = "five-hundred")]
    FiveHundredYen,
    /// A glitched offering that scrambles the rarity table.
    Bug,
}

impl Saisen {
    /// Every tier, regular tiers in ascending amount, then `Bug`.
    pub const ALL: [Saisen; 6] = [
        Self::None,
        Self::Goen,
        Self::FiftyYen,
        Self::HundredYen,
        Self::FiveHundredYen,
        Self::Bug,
    ];

    /// Build an offering from a raw amount.
    ///
    /// The amount must be a finite, non-negative integer. It maps to the
    /// highest regular tier whose amount does not exceed it, so 70 yen buys
    /// the 50 yen tier. `Bug` is never reached by amount.
    pub fn from_amount(amount: f64) -> CoreResult<Self> {
        if !amount.is_finite() || amount < 0.0 || amount.fract() != 0.0 {
            return Err(CoreError::InvalidSaisenAmount(amount));
        }
        let tier = Self::ALL
            .iter()
            .rev()
            .filter(|s| !s.is_special())
            .find(|s| f64::from(s.amount()) <= amount)
            .copied()
            .unwrap_or(Self::None);
        Ok(tier)
    }

    /// Offering amount in yen.
    pub fn amount(self) -> u32 {
        match self {
            Self::None | Self::Bug => 0,
            Self::Goen => 5,
            Self::FiftyYen => 50,
            Self::HundredYen => 100,
            Self::FiveHundredYen => 500,
        }
    }

    /// Short key used on the command line and in requests.
    pub fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Goen => "goen",
            Self::FiftyYen => "fifty",
            Self::HundredYen => "hundred",
            Self::FiveHundredYen => "five-hundred",
            Self::Bug => "bug",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "お賽銭なし",
            Self::Goen => "ご縁の5円",
            Self::FiftyYen => "50円",
            Self::HundredYen => "100円",
            Self::FiveHundredYen => "500円",
            Self::Bug => "バグった賽銭",
        }
    }

    /// One-line description of the offering.
    pub fn description(self) -> &'static str {
        match self {
            Self::None => "お参りだけしていく",
            Self::Goen => "良いご縁がありますように",
            Self::FiftyYen => "少しだけ運気を上げる",
            Self::HundredYen => "しっかり運気を上げる",
            Self::FiveHundredYen => "本気の願掛け",
            Self::Bug => "何が起こるか分からない",
        }
    }

    /// Effects of this tier.
    pub fn effects(self) -> SaisenEffects {
        match self {
            Self::None | Self::Goen => SaisenEffects::default(),
            Self::FiftyYen => SaisenEffects {
                rarity_boost: Some(5.0),
                ..SaisenEffects::default()
            },
            Self::HundredYen => SaisenEffects {
                rarity_boost: Some(10.0),
                ..SaisenEffects::default()
            },
            Self::FiveHundredYen => SaisenEffects {
                rarity_boost: Some(15.0),
                is_special: false,
                has_special_animation: true,
            },
            Self::Bug => SaisenEffects {
                rarity_boost: None,
                is_special: true,
                has_special_animation: true,
            },
        }
    }

    /// Rarity boost in percentage points (0 when none).
    pub fn rarity_boost(self) -> f64 {
        self.effects().rarity_boost.unwrap_or(0.0)
    }

    /// Whether this tier redistributes rarity instead of boosting it.
    pub fn is_special(self) -> bool {
        self.effects().is_special
    }

    /// Whether this tier plays the special animation.
    pub fn has_special_animation(self) -> bool {
        self.effects().has_special_animation
    }

    /// Whether this tier changes the rarity table at all.
    pub fn has_effect(self) -> bool {
        self.rarity_boost() > 0.0 || self.is_special()
    }
}

impl std::fmt::Display for Saisen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Saisen {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|saisen| saisen.key() == normalized)
            .ok_or_else(|| CoreError::UnknownSaisen(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_and_boosts() {
        assert_eq!(Saisen::FiftyYen.amount(), 50);
        assert_eq!(Saisen::FiftyYen.rarity_boost(), 5.0);
        assert_eq!(Saisen::HundredYen.rarity_boost(), 10.0);
        assert_eq!(Saisen::FiveHundredYen.rarity_boost(), 15.0);
        assert_eq!(Saisen::Goen.rarity_boost(), 0.0);
    }

    #[test]
    fn effect_flags() {
        assert!(!Saisen::None.has_effect());
        assert!(!Saisen::Goen.has_effect());
        assert!(Saisen::FiftyYen.has_effect());
        assert!(Saisen::Bug.has_effect());
        assert!(Saisen::Bug.is_special());
        assert!(!Saisen::FiveHundredYen.is_special());
        assert!(Saisen::FiveHundredYen.has_special_animation());
        assert!(!Saisen::HundredYen.has_special_animation());
    }

    #[test]
    fn from_amount_picks_highest_tier_not_above() {
        assert_eq!(Saisen::from_amount(0.0).unwrap(), Saisen::None);
        assert_eq!(Saisen::from_amount(4.0).unwrap(), Saisen::None);
        assert_eq!(Saisen::from_amount(5.0).unwrap(), Saisen::Goen);
        assert_eq!(Saisen::from_amount(70.0).unwrap(), Saisen::FiftyYen);
        assert_eq!(Saisen::from_amount(100.0).unwrap(), Saisen::HundredYen);
        assert_eq!(Saisen::from_amount(10_000.0).unwrap(), Saisen::FiveHundredYen);
    }

    #[test]
    fn from_amount_rejects_invalid() {
        for bad in [-1.0, 2.5, f64::NAN, f64::INFINITY] {
            let err = Saisen::from_amount(bad).unwrap_err();
            assert_eq!(err.kind(), "INVALID_SAISEN_AMOUNT");
        }
    }

    #[test]
    fn parse_keys() {
        assert_eq!("fifty".parse::<Saisen>().unwrap(), Saisen::FiftyYen);
        assert_eq!("FIVE_HUNDRED".parse::<Saisen>().unwrap(), Saisen::FiveHundredYen);
        assert_eq!(" bug ".parse::<Saisen>().unwrap(), Saisen::Bug);
        assert!(matches!(
            "gold".parse::<Saisen>(),
            Err(CoreError::UnknownSaisen(_))
        ));
    }

    #[test]
    fn keys_round_trip() {
        for saisen in Saisen::ALL {
            assert_eq!(saisen.key().parse::<Saisen>().unwrap(), saisen);
        }
    }

    #[test]
    fn serde_uses_keys() {
        for saisen in Saisen::ALL {
            let json = serde_json::to_string(&saisen).unwrap();
            assert_eq!(json, format!("\"{}\"", saisen.key()));
        }
    }
}
