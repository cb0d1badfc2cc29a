//! Category advice selection.
//!
//! The tone of each category's advice is conditioned on the fortune level:
//! a 大吉 reads positive 95% of the time, a 大凶 only 5%. Picking the tone and
//! picking the message use two separate draws, so categories on the same slip
//! vary independently.

use omikuji_core::band::pick_uniform;
use omikuji_core::category::Category;
use omikuji_core::{CoreError, CoreResult, FortuneLevel, RandomSource};
use serde::Serialize;

/// Probability that a category's advice is positive, per level id.
const POSITIVE_PROBABILITIES: [(&str, f64); 7] = [
    ("daikichi", 0.95),
    ("kichi", 0.80),
    ("chukichi", 0.65),
    ("shokichi", 0.55),
    ("suekichi", 0.50),
    ("kyo", 0.20),
    ("daikyo", 0.05),
];

/// The advice chosen for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    /// Category the advice belongs to.
    pub category_id: &'static str,
    /// The selected message.
    pub message: &'static str,
    /// Whether the message came from the positive pool.
    pub is_positive: bool,
}

/// Probability of positive advice for `level`.
///
/// Fails with [`CoreError::UnknownFortuneLevel`] for ids outside the
/// standard seven.
pub fn positive_probability(level: &FortuneLevel) -> CoreResult<f64> {
    POSITIVE_PROBABILITIES
        .iter()
        .find(|(id, _)| *id == level.id)
        .map(|&(_, p)| p)
        .ok_or_else(|| CoreError::UnknownFortuneLevel(level.id.clone()))
}

/// Pick advice for `category` from two uniform draws.
///
/// `tone_unit` decides the pool (`tone_unit < p` is positive);
/// `message_unit` picks `floor(message_unit * 5)` within it.
pub fn select_category_advice(
    level: &FortuneLevel,
    category: &Category,
    tone_unit: f64,
    message_unit: f64,
) -> CoreResult<Advice> {
    let p = positive_probability(level)?;
    let is_positive = tone_unit < p;
    let pool = category.pool.for_tone(is_positive);
    // pools are fixed-size arrays, so the pick always succeeds
    let message = pick_uniform(pool, message_unit).copied().unwrap_or(pool[0]);

    Ok(Advice {
        category_id: category.id,
        message,
        is_positive,
    })
}

/// Draw advice for `category`, taking two independent values from `source`.
pub fn draw_category_advice(
    level: &FortuneLevel,
    category: &Category,
    source: &mut impl RandomSource,
) -> CoreResult<Advice> {
    let tone_unit = source.next_unit();
    let message_unit = source.next_unit();
    let advice = select_category_advice(level, category, tone_unit, message_unit)?;
    tracing::debug!(
        category = advice.category_id,
        positive = advice.is_positive,
        "category advice drawn"
    );
    Ok(advice)
}
