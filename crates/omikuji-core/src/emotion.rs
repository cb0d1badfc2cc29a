//! Emotion attributes and their 3-way distribution.
//!
//! Generated content is tagged POSITIVE, NEUTRAL or NEGATIVE. The odds come
//! from an [`EmotionAttributeDistribution`], usually derived from the numeric
//! value of the drawn fortune level.

use serde::{Deserialize, Serialize};

use crate::band::select_by_cumulative_band;
use crate::error::{CoreError, CoreResult};

/// Tolerance for the sum-to-one check.
pub const SUM_TOLERANCE: f64 = 1e-4;

/// Fortune value at or above which every draw must be POSITIVE.
pub const EXTREME_POSITIVE_VALUE: i32 = 4;

/// Fortune value at or below which every draw must be NEGATIVE.
pub const EXTREME_NEGATIVE_VALUE: i32 = -2;

/// The tone of a piece of generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmotionAttribute {
    /// Upbeat.
    Positive,
    /// Neither.
    Neutral,
    /// Gloomy.
    Negative,
}

impl EmotionAttribute {
    /// All attributes in band order.
    pub const ALL: [EmotionAttribute; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Position of this attribute in [`ALL`](Self::ALL).
    pub fn index(self) -> usize {
        match self {
            Self::Positive => 0,
            Self::Neutral => 1,
            Self::Negative => 2,
        }
    }
}

impl std::fmt::Display for EmotionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "POSITIVE"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Negative => write!(f, "NEGATIVE"),
        }
    }
}

/// Probabilities of each emotion attribute. Components lie in `[0, 1]` and
/// sum to 1.0 within [`SUM_TOLERANCE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmotionAttributeDistribution {
    positive: f64,
    neutral: f64,
    negative: f64,
}

impl EmotionAttributeDistribution {
    /// Build a validated distribution.
    ///
    /// Fails with `INVALID_PROBABILITY_RANGE` if any component is outside
    /// `[0, 1]` (or not finite), then with `PROBABILITY_SUM_INVALID` if the
    /// components do not sum to 1.0.
    pub fn create(positive: f64, neutral: f64, negative: f64) -> CoreResult<Self> {
        for (component, value) in [
            ("positive", positive),
            ("neutral", neutral),
            ("negative", negative),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidProbabilityRange { component, value });
            }
        }

        let sum = positive + neutral + negative;
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(CoreError::ProbabilitySumInvalid { sum });
        }

        Ok(Self {
            positive,
            neutral,
            negative,
        })
    }

    /// Distribution for a numeric fortune value.
    ///
    /// | value        | positive | neutral | negative |
    /// |--------------|----------|---------|----------|
    /// | >= 4         | 1.00     | 0.00    | 0.00     |
    /// | 3            | 0.80     | 0.15    | 0.05     |
    /// | 1, 2         | 0.60     | 0.30    | 0.10     |
    /// | 0            | 0.30     | 0.50    | 0.20     |
    /// | -1           | 0.15     | 0.25    | 0.60     |
    /// | <= -2        | 0.00     | 0.00    | 1.00     |
    ///
    /// The extremes are degenerate so that the best and worst fortunes never
    /// produce content of the opposite tone.
    pub fn for_fortune_level(value: i32) -> Self {
        let (positive, neutral, negative) = match value {
            v if v >= EXTREME_POSITIVE_VALUE => (1.0, 0.0, 0.0),
            v if v >= 3 => (0.80, 0.15, 0.05),
            v if v >= 1 => (0.60, 0.30, 0.10),
            0 => (0.30, 0.50, 0.20),
            v if v > EXTREME_NEGATIVE_VALUE => (0.15, 0.25, 0.60),
            _ => (0.0, 0.0, 1.0),
        };
        Self {
            positive,
            neutral,
            negative,
        }
    }

    /// Probability of POSITIVE.
    pub fn positive(&self) -> f64 {
        self.positive
    }

    /// Probability of NEUTRAL.
    pub fn neutral(&self) -> f64 {
        self.neutral
    }

    /// Probability of NEGATIVE.
    pub fn negative(&self) -> f64 {
        self.negative
    }

    /// Probability of `attribute`.
    pub fn probability_of(&self, attribute: EmotionAttribute) -> f64 {
        match attribute {
            EmotionAttribute::Positive => self.positive,
            EmotionAttribute::Neutral => self.neutral,
            EmotionAttribute::Negative => self.negative,
        }
    }

    /// Components in band order.
    pub fn as_array(&self) -> [f64; 3] {
        [self.positive, self.neutral, self.negative]
    }

    /// Cumulative band edges, with the last edge pinned to 1.0.
    pub fn cumulative(&self) -> [f64; 3] {
        [self.positive, self.positive + self.neutral, 1.0]
    }

    /// Whether one component carries all the mass.
    pub fn is_degenerate(&self) -> bool {
        self.as_array().contains(&1.0)
    }

    /// Map a uniform draw to an attribute: below `positive` is POSITIVE,
    /// below `positive + neutral` is NEUTRAL, anything else NEGATIVE.
    pub fn select_emotion_attribute(&self, random_unit: f64) -> EmotionAttribute {
        select_by_cumulative_band(&self.cumulative(), &EmotionAttribute::ALL, random_unit)
            .copied()
            .unwrap_or(EmotionAttribute::Negative)
    }
}
