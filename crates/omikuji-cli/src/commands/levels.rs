use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(levels: Option<&Path>) -> Result<(), String> {
    let fortune_table = super::load_table(levels)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Rank",
        "Id",
        "Name",
        "Weight",
        "Probability",
        "Cumulative",
        "Value",
    ]);

    for ((level, cumulative), p) in fortune_table
        .levels()
        .iter()
        .zip(fortune_table.cumulative())
        .zip(fortune_table.probabilities())
    {
        table.add_row(vec![
            level.rank.to_string(),
            level.id.clone(),
            level.name.clone(),
            level.weight.to_string(),
            super::percent(p),
            format!("{cumulative}"),
            level.value.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} levels, total weight {}",
        fortune_table.levels().len(),
        fortune_table.total_weight()
    );
    Ok(())
}
