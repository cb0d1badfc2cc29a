//! Title phrases and descriptions printed on the slip for each level.

/// Title phrases for a level id. Empty for unknown ids.
pub fn titles_for(level_id: &str) -> &'static [&'static str] {
    match level_id {
        "daikichi" => &["全テスト緑", "本番無風", "神コミット"],
        "kichi" => &["順調なスプリント", "レビュー即通過", "快適な開発環境"],
        "chukichi" => &["堅実なリリース", "小さな改善の積み重ね", "手応えのある一日"],
        "shokichi" => &["地道なデバッグ", "小さな前進", "ささやかな成功"],
        "suekichi" => &["遅れてくる成果", "技術的負債と共に", "待てば海路の日和あり"],
        "kyo" => &["謎のエラー", "再現しないバグ", "ビルド不調"],
        "daikyo" => &["本番障害", "金曜日のデプロイ", "全テスト赤"],
        _ => &[],
    }
}

/// Description text for a level id, if known.
pub fn description_for(level_id: &str) -> Option<&'static str> {
    let text = match level_id {
        "daikichi" => "何をやっても上手くいく日。温めていた大きな変更を出すなら今日。",
        "kichi" => "流れは良好。普段通りの丁寧さを保てば成果がついてくる。",
        "chukichi" => "安定した運気。小さな改善を積み重ねると大きな実りになる。",
        "shokichi" => "控えめな好調。焦らず一歩ずつ進めれば問題なし。",
        "suekichi" => "今は種まきの時期。努力は後からじわじわ効いてくる。",
        "kyo" => "思わぬ落とし穴に注意。確認とバックアップを怠らないこと。",
        "daikyo" => "今日は守りに徹すべし。大きな変更は明日に回そう。",
        _ => return None,
    };
    Some(text)
}
