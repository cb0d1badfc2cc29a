//! Saisen effect calculator.
//!
//! Reshapes the cumulative rarity table according to the chosen offering,
//! then draws a tier from the reshaped table. Regular offerings move
//! probability mass out of the low tiers; the bug offering swaps in an
//! irregular table altogether.

use omikuji_core::rarity::{self, RARITY_CUMULATIVE};
use omikuji_core::{Rarity, Saisen};

/// Cumulative table used by the bug offering: 30% / 20% / 30% / 20%.
pub const SPECIAL_CUMULATIVE: [f64; 4] = [0.3, 0.5, 0.8, 1.0];

/// Share of the boost that the top offering also takes from RARE.
const RARE_REACH: f64 = 0.5;

/// Apply `saisen` to a cumulative rarity table.
///
/// The result is always a valid cumulative table: non-decreasing, every
/// entry in `[0, 1]`, last entry exactly 1.0.
pub fn adjust_rarity_probabilities(original: [f64; 4], saisen: Saisen) -> [f64; 4] {
    if !saisen.has_effect() {
        return original;
    }
    if saisen.is_special() {
        return SPECIAL_CUMULATIVE;
    }

    let boost = saisen.rarity_boost() / 100.0;
    let mut adjusted = original;
    adjusted[0] -= boost;
    if saisen == Saisen::FiveHundredYen {
        adjusted[1] -= boost * RARE_REACH;
    }

    let normalized = normalize_probabilities(&adjusted);
    let mut out = [0.0; 4];
    out.copy_from_slice(&normalized);
    out
}

/// Force `probs` into a valid cumulative table.
///
/// Clamps each entry to `[0, 1]`, raises any entry that falls below its left
/// neighbour, and pins the last entry to 1.0.
pub fn normalize_probabilities(probs: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = probs.iter().map(|p| p.clamp(0.0, 1.0)).collect();
    let mut previous = 0.0;
    for p in &mut out {
        if *p < previous {
            *p = previous;
        }
        previous = *p;
    }
    if let Some(last) = out.last_mut() {
        *last = 1.0;
    }
    out
}

/// Draw a tier with the offering's effect applied.
pub fn determine_rarity_with_saisen(random_unit: f64, saisen: Saisen) -> Rarity {
    let cumulative = adjust_rarity_probabilities(RARITY_CUMULATIVE, saisen);
    let tier = rarity::determine_with(&cumulative, random_unit);
    tracing::debug!(saisen = saisen.key(), %tier, "rarity determined");
    tier
}

/// Per-tier probabilities (band widths) of a cumulative table.
pub fn band_widths(cumulative: &[f64; 4]) -> [f64; 4] {
    let mut widths = [0.0; 4];
    let mut previous = 0.0;
    for (width, &edge) in widths.iter_mut().zip(cumulative) {
        *width = edge - previous;
        previous = edge;
    }
    widths
}

/// Whether the offering changes rarity odds.
pub fn can_apply_effect(saisen: Saisen) -> bool {
    saisen.has_effect()
}

/// Human-readable summary of an offering's effect.
pub fn effect_description(saisen: Saisen) -> &'static str {
    match saisen {
        Saisen::None => "効果なし",
        Saisen::Goen => "ご縁が結ばれる (レア度への効果なし)",
        Saisen::FiftyYen => "レア度が少しアップ (+5%)",
        Saisen::HundredYen => "レア度がアップ (+10%)",
        Saisen::FiveHundredYen => "レア度が大幅アップ (+15%) と特別演出",
        Saisen::Bug => "レア度の分布が予測不能に変化する",
    }
}
