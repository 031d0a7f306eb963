//! Summary command - dataset overview of inferred types and counts.

use std::path::PathBuf;

use colored::Colorize;
use varstat::{VariableType, Varstat};

pub fn run(file: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let analysis = Varstat::new().analyze_file(&file)?;
    let summary = &analysis.summary;

    if json_output {
        let status = serde_json::json!({
            "file": analysis.source.file,
            "hash": analysis.source.hash,
            "rows": summary.row_count,
            "columns": summary.overview(),
            "failed": summary.failed().count(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Summary for".cyan().bold(),
        analysis.source.file.white()
    );
    println!(
        "{} rows, {} columns",
        summary.row_count.to_string().white().bold(),
        summary.column_count().to_string().white().bold()
    );
    println!();

    println!(
        "  {:24} {:12} {:>8} {:>9} {:>9}",
        "column".bold(),
        "type".bold(),
        "total".bold(),
        "missing".bold(),
        "distinct".bold()
    );
    for overview in summary.overview() {
        let type_label = match overview.variable_type {
            Some(t) => t.label().yellow(),
            None => "failed".red(),
        };
        println!(
            "  {:24} {:12} {:>8} {:>9} {:>9}",
            overview.name,
            type_label,
            overview.total_count,
            overview.missing_count,
            overview.distinct_count
        );
    }

    println!();
    let counts: Vec<String> = VariableType::ALL
        .iter()
        .map(|t| format!("{} {}", summary.of_type(*t).count(), t.label()))
        .collect();
    println!("{}", counts.join(", "));

    Ok(())
}
