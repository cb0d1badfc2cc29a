pub mod draw;
pub mod levels;
pub mod rarity;
pub mod types;
pub mod validate;

use std::fs;
use std::path::Path;

use colored::{ColoredString, Colorize};
use serde::Serialize;

use omikuji_core::{FortuneTable, Rarity, Saisen};

/// Load a custom fortune table, or the standard one when no path is given.
fn load_table(path: Option<&Path>) -> Result<FortuneTable, String> {
    let Some(path) = path else {
        return Ok(FortuneTable::standard());
    };
    let json = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let table = FortuneTable::from_json(&json).map_err(|e| e.to_string())?;
    tracing::info!(
        path = %path.display(),
        levels = table.levels().len(),
        "loaded custom fortune table"
    );
    Ok(table)
}

fn parse_saisen(key: &str) -> Result<Saisen, String> {
    key.parse::<Saisen>().map_err(|e| e.to_string())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}

fn percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Parse a `#RRGGBB` colour.
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Tier name in the tier's display colour.
fn colorize_rarity(rarity: Rarity) -> ColoredString {
    let text = format!("{} {}", rarity, rarity.label());
    match hex_rgb(rarity.display_color()) {
        Some((r, g, b)) if rarity.has_special_effects() => text.truecolor(r, g, b).bold(),
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn status(valid: bool) -> ColoredString {
    if valid {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    }
}

fn print_errors(errors: &[String]) {
    for error in errors {
        println!("  {} {error}", "-".red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours() {
        assert_eq!(hex_rgb("#F59E0B"), Some((0xF5, 0x9E, 0x0B)));
        assert_eq!(hex_rgb("#9ca3af"), Some((0x9C, 0xA3, 0xAF)));
        assert_eq!(hex_rgb("F59E0B"), None);
        assert_eq!(hex_rgb("#F59E"), None);
        assert_eq!(hex_rgb("#GG0000"), None);
    }

    #[test]
    fn every_tier_colour_parses() {
        for tier in Rarity::ALL {
            assert!(hex_rgb(tier.display_color()).is_some(), "{tier}");
        }
    }

    #[test]
    fn missing_table_file_is_an_error() {
        let err = load_table(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(err.contains("failed to read"));
        assert_eq!(load_table(None).unwrap().levels().len(), 7);
    }

    #[test]
    fn percent_format() {
        assert_eq!(percent(0.16), "16.00%");
        assert_eq!(percent(0.025), "2.50%");
    }
}
