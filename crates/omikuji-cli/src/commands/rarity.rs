use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use omikuji_core::Rarity;
use omikuji_core::rarity::RARITY_CUMULATIVE;
use omikuji_engine::saisen_effect::{adjust_rarity_probabilities, band_widths, effect_description};

pub fn run(saisen: &str) -> Result<(), String> {
    let saisen = super::parse_saisen(saisen)?;
    let adjusted = adjust_rarity_probabilities(RARITY_CUMULATIVE, saisen);
    let base_widths = band_widths(&RARITY_CUMULATIVE);
    let adjusted_widths = band_widths(&adjusted);

    println!(
        "  {} {}",
        saisen.name().bold(),
        format!("({} yen, {})", saisen.amount(), saisen.key()).dimmed()
    );
    println!("  {}", effect_description(saisen));
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Tier", "Base", "Adjusted", "Cumulative"]);
    for (i, tier) in Rarity::ALL.iter().enumerate() {
        table.add_row(vec![
            super::colorize_rarity(*tier).to_string(),
            super::percent(base_widths[i]),
            super::percent(adjusted_widths[i]),
            format!("{:.3}", adjusted[i]),
        ]);
    }
    println!("{table}");
    Ok(())
}
