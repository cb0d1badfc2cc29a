//! The catalogue of selectable omikuji.
//!
//! Each type picks a mode, and the mode decides which advice categories
//! appear on the slip.

use serde::Serialize;

use crate::category::{CLASSIC_CATEGORIES, Category, ENGINEER_CATEGORIES};

/// Which set of advice categories a slip uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OmikujiMode {
    /// Love, work, health, money, study.
    Classic,
    /// Coding, review, deploy, waiting, conflict, growth.
    Engineer,
}

impl OmikujiMode {
    /// Categories shown for this mode.
    pub fn categories(self) -> &'static [Category] {
        match self {
            Self::Classic => &CLASSIC_CATEGORIES,
            Self::Engineer => &ENGINEER_CATEGORIES,
        }
    }
}

impl std::fmt::Display for OmikujiMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Engineer => write!(f, "engineer"),
        }
    }
}

/// A selectable omikuji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OmikujiType {
    /// Stable identifier used in requests.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Category set.
    pub mode: OmikujiMode,
}

impl OmikujiType {
    /// Categories shown on this type's slip.
    pub fn categories(&self) -> &'static [Category] {
        self.mode.categories()
    }
}

/// Every omikuji offered by default.
pub const DEFAULT_TYPES: [OmikujiType; 3] = [
    OmikujiType {
        id: "engineer",
        name: "エンジニア運勢",
        description: "今日のコードとデプロイの運勢を占う",
        mode: OmikujiMode::Engineer,
    },
    OmikujiType {
        id: "classic",
        name: "伝統おみくじ",
        description: "恋愛・仕事・健康・金運・学業を占う",
        mode: OmikujiMode::Classic,
    },
    OmikujiType {
        id: "release",
        name: "リリース占い",
        description: "リリース前夜に引く運試し",
        mode: OmikujiMode::Engineer,
    },
];

/// Look up a default type by id.
pub fn find_type(id: &str) -> Option<&'static OmikujiType> {
    DEFAULT_TYPES.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_known_types() {
        assert_eq!(find_type("engineer").map(|t| t.mode), Some(OmikujiMode::Engineer));
        assert_eq!(find_type("classic").map(|t| t.categories().len()), Some(5));
        assert!(find_type("tarot").is_none());
    }

    #[test]
    fn engineer_mode_has_six_categories() {
        let ids: Vec<&str> = OmikujiMode::Engineer.categories().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["coding", "review", "deploy", "waiting", "conflict", "growth"]);
    }

    #[test]
    fn type_ids_are_unique() {
        for (i, t) in DEFAULT_TYPES.iter().enumerate() {
            assert!(DEFAULT_TYPES[..i].iter().all(|other| other.id != t.id));
        }
    }
}
