//! Fortune levels and the weighted fortune table.
//!
//! Seven ranked levels from 大吉 down to 大凶, each with an integer weight.
//! Weights sum to exactly 100, so a level's weight is its percentage chance.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::band::{band_index, running_sum};
use crate::error::{CoreError, CoreResult};
use crate::random::RandomSource;

/// The total weight every fortune table must sum to.
pub const TOTAL_WEIGHT: u32 = 100;

/// One discrete fortune outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FortuneLevel {
    /// Stable identifier (`daikichi`, `kyo`, ...).
    pub id: String,
    /// Display name (大吉, 凶, ...).
    pub name: String,
    /// Selection weight, 1-100.
    pub weight: u32,
    /// 1 is the best level; ranks are contiguous.
    pub rank: u32,
    /// Numeric fortune value used to derive emotion distributions.
    pub value: i32,
}

impl FortuneLevel {
    fn standard(id: &str, name: &str, weight: u32, rank: u32, value: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            weight,
            rank,
            value,
        }
    }
}

impl std::fmt::Display for FortuneLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// The standard seven-level table in table order.
pub fn standard_levels() -> Vec<FortuneLevel> {
    vec![
        FortuneLevel::standard("daikichi", "大吉", 16, 1, 4),
        FortuneLevel::standard("kichi", "吉", 23, 2, 3),
        FortuneLevel::standard("chukichi", "中吉", 34, 3, 2),
        FortuneLevel::standard("shokichi", "小吉", 12, 4, 1),
        FortuneLevel::standard("suekichi", "末吉", 8, 5, 0),
        FortuneLevel::standard("kyo", "凶", 4, 6, -1),
        FortuneLevel::standard("daikyo", "大凶", 3, 7, -2),
    ]
}

/// Running sum of level weights in table order.
pub fn build_cumulative_weights(levels: &[FortuneLevel]) -> Vec<f64> {
    running_sum(levels.iter().map(|l| f64::from(l.weight)))
}

/// Select from `table` using a precomputed cumulative array.
///
/// Returns the last entry if the draw matches no band. Returns `None` only
/// for an empty table.
pub fn select_weighted<'a, T>(
    cumulative: &[f64],
    table: &'a [T],
    random_unit: f64,
) -> Option<&'a T> {
    crate::band::select_by_cumulative_band(cumulative, table, random_unit)
}

/// A validated fortune table with its cumulative weights.
///
/// The cumulative array is derived in the constructor and never mutated, so
/// it always matches the levels it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FortuneTable {
    levels: Vec<FortuneLevel>,
    cumulative: Vec<f64>,
}

impl FortuneTable {
    /// Build a table from `levels`, checking the table invariants.
    ///
    /// Requires at least one level, unique ids, weights in 1-100 summing to
    /// exactly 100, and unique ranks covering `1..=N`.
    pub fn new(levels: Vec<FortuneLevel>) -> CoreResult<Self> {
        validate_levels(&levels)?;
        let cumulative = build_cumulative_weights(&levels);
        Ok(Self { levels, cumulative })
    }

    /// The standard seven-level table.
    pub fn standard() -> Self {
        let levels = standard_levels();
        let cumulative = build_cumulative_weights(&levels);
        Self { levels, cumulative }
    }

    /// Parse a JSON array of levels and validate it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let levels: Vec<FortuneLevel> =
            serde_json::from_str(json).map_err(|e| CoreError::TableParse(e.to_string()))?;
        Self::new(levels)
    }

    /// Levels in table order.
    pub fn levels(&self) -> &[FortuneLevel] {
        &self.levels
    }

    /// Cumulative weights, parallel to [`levels`](Self::levels).
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Sum of all weights (always 100 for a validated table).
    pub fn total_weight(&self) -> u32 {
        self.levels.iter().map(|l| l.weight).sum()
    }

    /// Look up a level by id.
    pub fn get(&self, id: &str) -> Option<&FortuneLevel> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// Declared probability of each level (weight / total).
    pub fn probabilities(&self) -> Vec<f64> {
        let total = f64::from(self.total_weight());
        self.levels
            .iter()
            .map(|l| f64::from(l.weight) / total)
            .collect()
    }

    /// Index of the level selected by `random_unit`.
    pub fn select_index(&self, random_unit: f64) -> usize {
        band_index(&self.cumulative, random_unit).min(self.levels.len() - 1)
    }

    /// The level selected by `random_unit`.
    pub fn select(&self, random_unit: f64) -> &FortuneLevel {
        &self.levels[self.select_index(random_unit)]
    }

    /// Draw a level from `source`.
    pub fn draw(&self, source: &mut impl RandomSource) -> &FortuneLevel {
        let level = self.select(source.next_unit());
        tracing::debug!(level = %level.id, "fortune level drawn");
        level
    }
}

impl Default for FortuneTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_levels(levels: &[FortuneLevel]) -> CoreResult<()> {
    if levels.is_empty() {
        return Err(CoreError::InvalidFortuneTable("table has no levels".into()));
    }

    let mut ids = HashSet::new();
    for level in levels {
        if !ids.insert(level.id.as_str()) {
            return Err(CoreError::InvalidFortuneTable(format!(
                "duplicate id '{}'",
                level.id
            )));
        }
        if !(1..=TOTAL_WEIGHT).contains(&level.weight) {
            return Err(CoreError::InvalidFortuneTable(format!(
                "weight of '{}' must be 1-{TOTAL_WEIGHT}, got {}",
                level.id, level.weight
            )));
        }
    }

    let total: u32 = levels.iter().map(|l| l.weight).sum();
    if total != TOTAL_WEIGHT {
        return Err(CoreError::InvalidFortuneTable(format!(
            "weights must sum to {TOTAL_WEIGHT}, got {total}"
        )));
    }

    let mut ranks: Vec<u32> = levels.iter().map(|l| l.rank).collect();
    ranks.sort_unstable();
    let contiguous = ranks
        .iter()
        .enumerate()
        .all(|(i, &rank)| rank as usize == i + 1);
    if !contiguous {
        return Err(CoreError::InvalidFortuneTable(format!(
            "ranks must be unique and cover 1..={}",
            levels.len()
        )));
    }

    Ok(())
}
