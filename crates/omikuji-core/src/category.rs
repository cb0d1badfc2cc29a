//! Advice categories and their message pools.
//!
//! Each category carries exactly five positive and five negative messages.
//! Messages are short (3-10 characters) so they fit on a fortune slip.

use serde::Serialize;

/// Number of messages in each pool.
pub const POOL_SIZE: usize = 5;

/// Shortest allowed message, in characters.
pub const MIN_MESSAGE_CHARS: usize = 3;

/// Longest allowed message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 10;

/// Positive and negative messages for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessagePool {
    /// Messages shown when the tone draw comes out positive.
    pub positive: [&'static str; POOL_SIZE],
    /// Messages shown when the tone draw comes out negative.
    pub negative: [&'static str; POOL_SIZE],
}

impl MessagePool {
    /// The pool for the given tone.
    pub fn for_tone(&self, positive: bool) -> &[&'static str; POOL_SIZE] {
        if positive { &self.positive } else { &self.negative }
    }

    /// Whether `message` belongs to either pool.
    pub fn contains(&self, message: &str) -> bool {
        self.positive.contains(&message) || self.negative.contains(&message)
    }
}

/// An advice category such as love or deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Messages to choose from.
    pub pool: MessagePool,
}

impl Category {
    /// Check the pool invariants, returning one message per violation.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (tone, pool) in [("positive", &self.pool.positive), ("negative", &self.pool.negative)] {
            for (i, message) in pool.iter().enumerate() {
                let chars = message.chars().count();
                if !(MIN_MESSAGE_CHARS..=MAX_MESSAGE_CHARS).contains(&chars) {
                    problems.push(format!(
                        "{}: {tone} message '{message}' has {chars} characters",
                        self.id
                    ));
                }
                if pool[..i].contains(message) {
                    problems.push(format!("{}: duplicate {tone} message '{message}'", self.id));
                }
            }
        }

        for message in &self.pool.positive {
            if self.pool.negative.contains(message) {
                problems.push(format!(
                    "{}: message '{message}' is both positive and negative",
                    self.id
                ));
            }
        }

        problems
    }
}

/// Categories for classic omikuji.
pub const CLASSIC_CATEGORIES: [Category; 5] = [
    Category {
        id: "love",
        name: "恋愛",
        pool: MessagePool {
            positive: ["良縁あり", "想いが届く", "出会いの予感", "告白は吉", "絆が深まる"],
            negative: ["焦りは禁物", "すれ違い注意", "待つが吉", "言葉に注意", "距離を置け"],
        },
    },
    Category {
        id: "work",
        name: "仕事",
        pool: MessagePool {
            positive: ["努力が実る", "昇進の兆し", "評価が上がる", "好機到来", "協力を得る"],
            negative: ["慢心は禁物", "確認を怠るな", "無理は禁物", "報連相を徹底", "焦らず進め"],
        },
    },
    Category {
        id: "health",
        name: "健康",
        pool: MessagePool {
            positive: ["快調そのもの", "よく眠れる", "活力みなぎる", "回復が早い", "体が軽い"],
            negative: ["睡眠不足注意", "食べ過ぎ注意", "無理をするな", "肩こり注意", "水分を取れ"],
        },
    },
    Category {
        id: "money",
        name: "金運",
        pool: MessagePool {
            positive: ["臨時収入あり", "財布が潤う", "投資は吉", "節約が実る", "思わぬ収入"],
            negative: ["散財に注意", "衝動買い注意", "貸し借り不可", "契約は慎重に", "浪費の兆し"],
        },
    },
    Category {
        id: "study",
        name: "学業",
        pool: MessagePool {
            positive: ["理解が深まる", "集中力抜群", "努力が報われる", "合格の兆し", "閃きが冴える"],
            negative: ["復習を怠るな", "油断大敵", "基礎を固めよ", "夜更かし注意", "独学は危うし"],
        },
    },
];

/// Categories for engineer omikuji.
pub const ENGINEER_CATEGORIES: [Category; 6] = [
    Category {
        id: "coding",
        name: "コーディング",
        pool: MessagePool {
            positive: ["一発でビルド成功", "バグが消える", "コードが冴える", "型が味方する", "リファクタ吉"],
            negative: ["タイポ注意", "無限ループ注意", "nullに注意", "依存地獄の兆し", "動くが読めない"],
        },
    },
    Category {
        id: "review",
        name: "レビュー",
        pool: MessagePool {
            positive: ["即LGTM", "良い指摘を得る", "差分が小さい", "称賛の嵐", "学びが多い"],
            negative: ["指摘が大量", "放置される", "nit地獄", "差し戻しの相", "議論が長引く"],
        },
    },
    Category {
        id: "deploy",
        name: "デプロイ",
        pool: MessagePool {
            positive: ["本番も平穏", "一発で通る", "監視も静か", "金曜も安心", "CIが全て緑"],
            negative: ["金曜は避けよ", "ロールバック", "設定漏れ注意", "夜間対応の相", "CIが赤い"],
        },
    },
    Category {
        id: "waiting",
        name: "待ち人",
        pool: MessagePool {
            positive: ["返信すぐ来る", "レビュアー来る", "助っ人現る", "待ち人来たる", "回答が届く"],
            negative: ["返信は来ない", "待ちぼうけ", "既読スルー", "担当者不在", "明日に持越し"],
        },
    },
    Category {
        id: "conflict",
        name: "争い事",
        pool: MessagePool {
            positive: ["自動マージ吉", "衝突は起きぬ", "話せば分かる", "円満解決", "rebase成功"],
            negative: ["衝突多発", "強制push厳禁", "設計で揉める", "主張は控えよ", "競合の嵐"],
        },
    },
    Category {
        id: "growth",
        name: "成長",
        pool: MessagePool {
            positive: ["新技術を習得", "登壇の好機", "視野が広がる", "OSS貢献吉", "壁を越える"],
            negative: ["学習の停滞", "手を広げるな", "基礎に戻れ", "慢心は成長の敵", "情報過多注意"],
        },
    },
];

/// Look up a category by id across both sets.
pub fn find_category(id: &str) -> Option<&'static Category> {
    CLASSIC_CATEGORIES
        .iter()
        .chain(ENGINEER_CATEGORIES.iter())
        .find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_pools_are_valid() {
        for category in CLASSIC_CATEGORIES.iter().chain(ENGINEER_CATEGORIES.iter()) {
            let problems = category.validate();
            assert!(problems.is_empty(), "{problems:?}");
        }
    }

    #[test]
    fn category_ids_are_unique() {
        let ids: Vec<&str> = CLASSIC_CATEGORIES
            .iter()
            .chain(ENGINEER_CATEGORIES.iter())
            .map(|c| c.id)
            .collect();
        for (i, id) in ids.iter().enumerate() {
            assert!(!ids[..i].contains(id), "duplicate category {id}");
        }
    }

    #[test]
    fn validate_reports_problems() {
        let broken = Category {
            id: "broken",
            name: "壊れた",
            pool: MessagePool {
                positive: ["ok!", "ok!", "これはとても長すぎるメッセージ", "abc", "def"],
                negative: ["abc", "ghi", "jkl", "mno", "pq"],
            },
        };
        let problems = broken.validate();
        assert!(problems.iter().any(|p| p.contains("duplicate positive")));
        assert!(problems.iter().any(|p| p.contains("characters")));
        assert!(problems.iter().any(|p| p.contains("both positive and negative")));
        assert_eq!(problems.len(), 4);
    }

    #[test]
    fn pool_lookup() {
        let deploy = find_category("deploy").unwrap();
        assert!(deploy.pool.contains("ロールバック"));
        assert!(!deploy.pool.contains("良縁あり"));
        assert_eq!(deploy.pool.for_tone(true)[0], "本番も平穏");
        assert!(find_category("karaoke").is_none());
    }
}
