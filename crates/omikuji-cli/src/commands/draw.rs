use std::path::Path;

use colored::{ColoredString, Colorize};
use comfy_table::{ContentArrangement, Table};

use omikuji_core::EmotionAttribute;
use omikuji_engine::draw::FortuneSummary;
use omikuji_engine::{DrawConfig, Omikuji};

pub fn run(
    kind: &str,
    saisen: &str,
    seed: Option<u64>,
    json: bool,
    levels: Option<&Path>,
) -> Result<(), String> {
    let table = super::load_table(levels)?;
    let saisen = super::parse_saisen(saisen)?;

    let mut config = DrawConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let slip = Omikuji::with_table(table)
        .draw_with_config(kind, saisen, &config)
        .map_err(|e| e.to_string())?;

    if json {
        return super::print_json(&slip);
    }

    println!(
        "  {} {}",
        slip.omikuji_name.bold(),
        format!("({}, saisen: {})", slip.omikuji_type, slip.saisen).dimmed()
    );
    println!();
    println!("  {}  {}", colorize_fortune(&slip.fortune), slip.title.bold());
    if !slip.description.is_empty() {
        println!("  {}", slip.description);
    }
    println!("  Rarity: {}", super::colorize_rarity(slip.rarity));
    if slip.saisen.has_special_animation() && slip.rarity.has_special_effects() {
        println!("  {}", "* special effect *".yellow().bold());
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Advice", "Emotion"]);
    for reading in &slip.readings {
        table.add_row(vec![
            reading.category_name.to_string(),
            reading.message.to_string(),
            emotion_label(reading.emotion).to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}

fn colorize_fortune(fortune: &FortuneSummary) -> ColoredString {
    let text = format!("{} ({})", fortune.name, fortune.id);
    match fortune.value {
        v if v >= 3 => text.green().bold(),
        v if v > 0 => text.green(),
        0 => text.yellow(),
        _ => text.red().bold(),
    }
}

fn emotion_label(emotion: EmotionAttribute) -> &'static str {
    match emotion {
        EmotionAttribute::Positive => "+ POSITIVE",
        EmotionAttribute::Neutral => "  NEUTRAL",
        EmotionAttribute::Negative => "- NEGATIVE",
    }
}
