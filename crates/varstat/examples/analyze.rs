//! Example: Analyze a tabular data file with varstat.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>

use std::env;
use std::path::Path;

use varstat::{MarkdownReport, Varstat};

fn main() -> varstat::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let analysis = Varstat::new().analyze_file(path)?;

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("varstat analysis: {}", analysis.source.file);
    println!("{}", separator);
    println!();
    println!("  Format: {}", analysis.source.format);
    println!("  Rows: {}", analysis.source.row_count);
    println!("  Columns: {}", analysis.source.column_count);
    println!();

    for overview in analysis.summary.overview() {
        let type_label = overview.variable_type.map(|t| t.label()).unwrap_or("failed");
        println!(
            "  {:20} {:12} missing={:<5} distinct={}",
            overview.name, type_label, overview.missing_count, overview.distinct_count
        );
    }
    println!();

    print!("{}", MarkdownReport::new().render_dataset(&analysis.summary));

    Ok(())
}
