/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by table lookups and value-object construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// A fortune-level id has no entry in a static lookup map.
    #[error("unknown fortune level: {0}")]
    UnknownFortuneLevel(String),

    /// A probability component lies outside `[0, 1]` or is not finite.
    #[error("probability for {component} must be within [0, 1], got {value}")]
    InvalidProbabilityRange {
        /// Which component was rejected (`positive`, `neutral`, `negative`).
        component: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The components of a distribution do not sum to 1.0.
    #[error("probabilities must sum to 1.0, got {sum}")]
    ProbabilitySumInvalid {
        /// The actual sum.
        sum: f64,
    },

    /// A saisen amount is negative, fractional, or not finite.
    #[error("invalid saisen amount: {0}")]
    InvalidSaisenAmount(f64),

    /// A saisen key does not name any offering tier.
    #[error("unknown saisen: {0}")]
    UnknownSaisen(String),

    /// A custom fortune table violates the table invariants.
    #[error("invalid fortune table: {0}")]
    InvalidFortuneTable(String),

    /// A fortune table could not be parsed from JSON.
    #[error("failed to parse fortune table: {0}")]
    TableParse(String),
}

impl CoreError {
    /// Stable rule code for this error, suitable for reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownFortuneLevel(_) => "UNKNOWN_FORTUNE_LEVEL",
            Self::InvalidProbabilityRange { .. } => "INVALID_PROBABILITY_RANGE",
            Self::ProbabilitySumInvalid { .. } => "PROBABILITY_SUM_INVALID",
            Self::InvalidSaisenAmount(_) => "INVALID_SAISEN_AMOUNT",
            Self::UnknownSaisen(_) => "UNKNOWN_SAISEN",
            Self::InvalidFortuneTable(_) => "INVALID_FORTUNE_TABLE",
            Self::TableParse(_) => "TABLE_PARSE",
        }
    }
}
