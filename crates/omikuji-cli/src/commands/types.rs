use comfy_table::{ContentArrangement, Table};

use omikuji_core::omikuji_type::DEFAULT_TYPES;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Mode", "Categories", "Description"]);

    for omikuji in &DEFAULT_TYPES {
        let categories: Vec<&str> = omikuji.categories().iter().map(|c| c.name).collect();
        table.add_row(vec![
            omikuji.id.to_string(),
            omikuji.name.to_string(),
            omikuji.mode.to_string(),
            categories.join(", "),
            omikuji.description.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} types", DEFAULT_TYPES.len());
    Ok(())
}
