//! Drawing a complete omikuji slip.
//!
//! One draw consumes values from a single [`RandomSource`] in a fixed
//! order: fortune level, title, then for each category the tone, the
//! message and the emotion tag, and finally the rarity. With a seeded
//! source the whole slip is reproducible.

use chrono::{DateTime, Utc};
use serde::Serialize;

use omikuji_core::band::pick_uniform;
use omikuji_core::omikuji_type::{self, OmikujiType};
use omikuji_core::presentation::{description_for, titles_for};
use omikuji_core::{
    EmotionAttribute, EmotionAttributeDistribution, FortuneLevel, FortuneTable, RandomSource,
    Rarity, Saisen,
};

use crate::advice::draw_category_advice;
use crate::config::DrawConfig;
use crate::error::{EngineError, EngineResult};
use crate::saisen_effect::determine_rarity_with_saisen;

/// The fortune level as it appears on a slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortuneSummary {
    /// Level id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// 1 is best.
    pub rank: u32,
    /// Numeric fortune value.
    pub value: i32,
}

impl From<&FortuneLevel> for FortuneSummary {
    fn from(level: &FortuneLevel) -> Self {
        Self {
            id: level.id.clone(),
            name: level.name.clone(),
            rank: level.rank,
            value: level.value,
        }
    }
}

/// Advice and emotion tag for one category on a slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReading {
    /// Category id.
    pub category_id: &'static str,
    /// Category display name.
    pub category_name: &'static str,
    /// Selected advice message.
    pub message: &'static str,
    /// Whether the message came from the positive pool.
    pub is_positive: bool,
    /// Emotion tag drawn for this category.
    pub emotion: EmotionAttribute,
}

/// A complete slip, ready to be rendered or returned as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawResult {
    /// Id of the omikuji type that was drawn.
    pub omikuji_type: &'static str,
    /// Display name of the omikuji type.
    pub omikuji_name: &'static str,
    /// The drawn fortune level.
    pub fortune: FortuneSummary,
    /// Title phrase for the level.
    pub title: String,
    /// Description text for the level.
    pub description: String,
    /// One reading per category of the type.
    pub readings: Vec<CategoryReading>,
    /// Rarity tier of the slip.
    pub rarity: Rarity,
    /// Offering made before drawing.
    pub saisen: Saisen,
    /// When the slip was drawn.
    pub drawn_at: DateTime<Utc>,
}

impl DrawResult {
    /// Number of readings that came out positive.
    pub fn positive_count(&self) -> usize {
        self.readings.iter().filter(|r| r.is_positive).count()
    }
}

/// The drawing service: a fortune table plus the static catalogue.
#[derive(Debug, Clone, Default)]
pub struct Omikuji {
    table: FortuneTable,
}

impl Omikuji {
    /// A service over the standard fortune table.
    pub fn standard() -> Self {
        Self::default()
    }

    /// A service over a custom fortune table.
    pub fn with_table(table: FortuneTable) -> Self {
        Self { table }
    }

    /// The fortune table in use.
    pub fn table(&self) -> &FortuneTable {
        &self.table
    }

    /// Draw a slip of type `type_id` with the given offering.
    pub fn draw(
        &self,
        type_id: &str,
        saisen: Saisen,
        source: &mut impl RandomSource,
    ) -> EngineResult<DrawResult> {
        let omikuji = omikuji_type::find_type(type_id)
            .ok_or_else(|| EngineError::UnknownOmikujiType(type_id.to_string()))?;

        let level = self.table.draw(source);
        let title = pick_uniform(titles_for(&level.id), source.next_unit())
            .map(|t| (*t).to_string())
            .unwrap_or_else(|| level.name.clone());
        let description = description_for(&level.id).unwrap_or_default().to_string();

        let readings = read_categories(omikuji, level, source)?;
        let rarity = determine_rarity_with_saisen(source.next_unit(), saisen);

        tracing::debug!(
            omikuji = omikuji.id,
            level = %level.id,
            %rarity,
            saisen = saisen.key(),
            "omikuji drawn"
        );

        Ok(DrawResult {
            omikuji_type: omikuji.id,
            omikuji_name: omikuji.name,
            fortune: FortuneSummary::from(level),
            title,
            description,
            readings,
            rarity,
            saisen,
            drawn_at: Utc::now(),
        })
    }

    /// Draw a slip using the RNG described by `config`.
    pub fn draw_with_config(
        &self,
        type_id: &str,
        saisen: Saisen,
        config: &DrawConfig,
    ) -> EngineResult<DrawResult> {
        let mut rng = config.rng();
        self.draw(type_id, saisen, &mut rng)
    }
}

fn read_categories(
    omikuji: &OmikujiType,
    level: &FortuneLevel,
    source: &mut impl RandomSource,
) -> EngineResult<Vec<CategoryReading>> {
    let emotions = EmotionAttributeDistribution::for_fortune_level(level.value);
    omikuji
        .categories()
        .iter()
        .map(|category| {
            let advice = draw_category_advice(level, category, source)?;
            let emotion = emotions.select_emotion_attribute(source.next_unit());
            Ok(CategoryReading {
                category_id: category.id,
                category_name: category.name,
                message: advice.message,
                is_positive: advice.is_positive,
                emotion,
            })
        })
        .collect()
}
