//! Analyze command - classify columns and report their statistics.

use std::fs;
use std::path::Path;

use colored::Colorize;
use tracing::debug;
use varstat::{
    AnalysisConfig, FileAnalysis, MarkdownReport, Mode, ParserConfig, VarianceKind,
    VariableAnalysis, Varstat,
};

use crate::cli::{AnalyzeArgs, ReportFormat};

pub fn run(args: AnalyzeArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let config = build_config(&args)?;
    debug!(?config, "analysis configuration");

    let parser_config = ParserConfig {
        delimiter: args.delimiter,
        ..ParserConfig::default()
    };
    let varstat = Varstat::with_config(config).with_parser_config(parser_config);
    let analysis = varstat.analyze_file(&args.file)?;

    let rendered = match args.format {
        ReportFormat::Json => serde_json::to_string_pretty(&analysis)?,
        ReportFormat::Markdown => MarkdownReport::new().render_dataset(&analysis.summary),
        ReportFormat::Text => render_text(&analysis, verbose),
    };

    match args.output {
        Some(path) => write_output(&path, &rendered)?,
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Config file first, then command-line overrides.
fn build_config(args: &AnalyzeArgs) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(threshold) = args.numeric_threshold {
        config.numeric_majority_threshold = threshold;
    }
    if let Some(cardinality) = args.cardinality {
        config.cardinality_threshold = cardinality;
    }
    if args.bins.is_some() {
        config.bin_count = args.bins;
    }
    if args.sample_variance {
        config.variance = VarianceKind::Sample;
    }
    for (column, categories) in &args.ordinal {
        config
            .ordinal_hints
            .insert(column.clone(), categories.clone());
    }

    config.validate()?;
    Ok(config)
}

fn write_output(path: &Path, contents: &str) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(path, contents)?;
    eprintln!(
        "{} {}",
        "Saved to".green().bold(),
        path.display().to_string().white()
    );
    Ok(())
}

fn render_text(analysis: &FileAnalysis, verbose: bool) -> String {
    let summary = &analysis.summary;
    let mut lines = vec![
        format!(
            "{} {} ({} rows, {} columns)",
            "Analyzed".cyan().bold(),
            analysis.source.file.white(),
            summary.row_count,
            summary.column_count()
        ),
        String::new(),
    ];

    for record in &summary.variables {
        lines.extend(variable_lines(record, verbose));
        lines.push(String::new());
    }

    let failed = summary.failed().count();
    if failed > 0 {
        lines.push(format!(
            "{} column(s) could not be analysed",
            failed.to_string().red().bold()
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn variable_lines(record: &VariableAnalysis, verbose: bool) -> Vec<String> {
    let Some(variable_type) = record.variable_type else {
        return vec![format!(
            "{} {}",
            record.name.white().bold(),
            record.failure.as_deref().unwrap_or("failed").red()
        )];
    };

    let mut lines = vec![format!(
        "{} {} [{} values, {} missing]",
        record.name.white().bold(),
        variable_type.label().yellow(),
        record.value_count,
        record.missing_count
    )];

    let central = &record.central;
    let mut measures = Vec::new();
    if let Some(mean) = central.mean {
        measures.push(format!("mean {:.4}", mean));
    }
    if let Some(median) = central.median {
        measures.push(format!("median {:.4}", median));
    }
    if let Some(category) = &central.median_category {
        measures.push(format!("median category {}", category));
    }
    match &central.mode {
        Some(Mode::Value(v)) => measures.push(format!("mode {:.4}", v)),
        Some(Mode::Category(c)) => measures.push(format!("mode {}", c)),
        None => {}
    }
    if !measures.is_empty() {
        lines.push(format!("  {}", measures.join(", ")));
    }

    if let Some(proportions) = &record.proportions {
        let parts: Vec<String> = proportions
            .iter()
            .map(|(label, percent)| format!("{} {:.2}%", label, percent))
            .collect();
        lines.push(format!("  {}", parts.join(", ")));
    }

    if let Some(separatrices) = &record.separatrices {
        let quartiles: Vec<String> = separatrices
            .quartiles
            .iter()
            .map(|(name, value)| format!("{} {:.4}", name, value))
            .collect();
        lines.push(format!("  {}", quartiles.join(", ")));
    }

    if let Some(dispersion) = &record.dispersion {
        let cv = dispersion
            .cv
            .map(|cv| format!("{:.2}%", cv))
            .unwrap_or_else(|| "n/a".to_string());
        lines.push(format!(
            "  range {:.4}, std dev {:.4}, IQR {:.4}, CV {}",
            dispersion.range, dispersion.std_dev, dispersion.iqr, cv
        ));
    }

    if let Some(interpretation) = &record.interpretation {
        lines.push(format!("  {}", interpretation.text.green()));
    }

    if verbose {
        for entry in record.frequency.iter() {
            lines.push(format!(
                "    {:20} {:>6} {:>8.2}% {:>8.2}%",
                entry.label,
                entry.absolute,
                entry.relative * 100.0,
                entry.cumulative * 100.0
            ));
        }
    }

    lines
}
