use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use omikuji_core::{EmotionAttributeDistribution, FortuneTable, omikuji_type};
use omikuji_stats::{
    AccuracyReport, ValidationConfig, validate_distribution_accuracy,
    validate_distribution_parameters, validate_distribution_properties,
    validate_emotion_consistency, validate_fortune_table_accuracy, validate_rarity_accuracy,
    validate_statistical_significance,
};

pub fn accuracy(
    target: &str,
    value: i32,
    saisen: &str,
    samples: usize,
    seed: u64,
    tolerance: f64,
    json: bool,
) -> Result<(), String> {
    let config = ValidationConfig::default()
        .with_seed(seed)
        .with_tolerance_percent(tolerance);
    let mut rng = config.rng();

    let (title, report) = match target {
        "emotion" => {
            let distribution = EmotionAttributeDistribution::for_fortune_level(value);
            let report = validate_distribution_accuracy(&distribution, samples, &mut rng, &config);
            (format!("emotion distribution for value {value}"), report)
        }
        "fortune" => {
            let table = FortuneTable::standard();
            let report = validate_fortune_table_accuracy(&table, samples, &mut rng, &config);
            ("fortune table".to_string(), report)
        }
        "rarity" => {
            let saisen = super::parse_saisen(saisen)?;
            let report = validate_rarity_accuracy(saisen, samples, &mut rng, &config);
            (format!("rarity with saisen {}", saisen.key()), report)
        }
        other => {
            return Err(format!(
                "unknown target: {other} (expected emotion, fortune or rarity)"
            ));
        }
    };

    if json {
        super::print_json(&report)?;
    } else {
        print_accuracy(&title, &report);
    }
    finish(report.is_valid, "accuracy")
}

fn print_accuracy(title: &str, report: &AccuracyReport) {
    println!(
        "  {} {} {}",
        super::status(report.is_valid),
        format!("Accuracy: {title}").bold(),
        format!("({} samples)", report.sample_size).dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Bucket", "Expected", "Observed", "Deviation"]);
    for ((label, expected), actual) in report
        .labels
        .iter()
        .zip(&report.expected_distribution)
        .zip(&report.actual_distribution)
    {
        table.add_row(vec![
            label.clone(),
            super::percent(*expected),
            super::percent(*actual),
            format!("{:.2}pp", (actual - expected).abs() * 100.0),
        ]);
    }
    println!("{table}");
    println!();
    println!("  max deviation {:.2}pp", report.deviation_percentage);
    super::print_errors(&report.validation_errors);
}

pub fn significance(
    value: i32,
    samples: usize,
    alpha: f64,
    seed: u64,
    json: bool,
) -> Result<(), String> {
    let config = ValidationConfig::default().with_seed(seed);
    let distribution = EmotionAttributeDistribution::for_fortune_level(value);
    let mut rng = config.rng();
    let report =
        validate_statistical_significance(&distribution, samples, alpha, &mut rng, &config);

    if json {
        super::print_json(&report)?;
    } else {
        println!(
            "  {} {} {}",
            super::status(report.is_valid),
            format!("Chi-square for value {value}").bold(),
            format!("({} samples)", report.sample_size).dimmed()
        );
        println!(
            "  chi-square {:.3}, df {}, p {}, alpha {}",
            report.chi_square,
            report.degrees_of_freedom,
            report
                .p_value
                .map_or_else(|| "n/a".to_string(), |p| format!("~{p}")),
            report.alpha
        );
        let observed: Vec<String> = report.observed_counts.iter().map(|c| c.to_string()).collect();
        let expected: Vec<String> = report
            .expected_counts
            .iter()
            .map(|c| format!("{c:.1}"))
            .collect();
        println!("  observed [{}]", observed.join(", "));
        println!("  expected [{}]", expected.join(", "));
        super::print_errors(&report.validation_errors);
    }
    finish(report.is_valid, "significance")
}

pub fn consistency(
    level: &str,
    kind: &str,
    iterations: usize,
    seed: u64,
    json: bool,
) -> Result<(), String> {
    let table = FortuneTable::standard();
    let fortune = table
        .get(level)
        .ok_or_else(|| format!("unknown fortune level: {level}"))?;
    let omikuji = omikuji_type::find_type(kind)
        .ok_or_else(|| format!("unknown omikuji type: {kind}"))?;

    let config = ValidationConfig::default().with_seed(seed);
    let report = validate_emotion_consistency(
        fortune,
        omikuji.categories(),
        iterations,
        &mut config.rng(),
        &config,
    );

    if json {
        super::print_json(&report)?;
    } else {
        println!(
            "  {} {} {}",
            super::status(report.is_valid),
            format!("Consistency: {} (value {})", fortune.name, fortune.value).bold(),
            format!("({} trials x {} categories)", report.iterations, omikuji.categories().len())
                .dimmed()
        );
        println!(
            "  rate {} (required {})",
            super::percent(report.consistency_rate),
            super::percent(report.required_rate)
        );
        for violation in &report.violations {
            let attrs: Vec<String> = violation.attributes.iter().map(|a| a.to_string()).collect();
            println!("  trial {:>5}: {}", violation.trial, attrs.join(" ").dimmed());
        }
        super::print_errors(&report.validation_errors);
    }
    finish(report.is_valid, "consistency")
}

pub fn params(params: [f64; 3], json: bool) -> Result<(), String> {
    let structural = validate_distribution_parameters(params);
    let properties = validate_distribution_properties(params);

    if json {
        super::print_json(&properties)?;
    } else {
        println!(
            "  {} {}",
            super::status(structural.is_valid),
            format!(
                "Parameters [{}, {}, {}]",
                params[0], params[1], params[2]
            )
            .bold()
        );
        for violation in &structural.violations {
            println!("  {} {}", violation.code.red(), violation.message);
        }
        for warning in &properties.warnings {
            println!("  {} {}", warning.code.yellow(), warning.message);
        }
        println!(
            "  entropy {:.4} bits (max {:.4})",
            properties.entropy, properties.max_entropy
        );
    }
    finish(structural.is_valid, "parameter")
}

fn finish(valid: bool, check: &str) -> Result<(), String> {
    if valid {
        Ok(())
    } else {
        Err(format!("{check} check failed"))
    }
}
