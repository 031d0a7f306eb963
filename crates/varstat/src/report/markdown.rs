//! Markdown rendering of analysis results.

use std::fmt::{self, Write};

use crate::model::{DatasetSummary, VariableAnalysis};
use crate::stats::{CentralTendency, DispersionSummary, FrequencyTable, Mode, SeparatrixSet, VarianceKind};

/// Frequency rows shown per variable unless configured otherwise.
pub const DEFAULT_MAX_FREQUENCY_ROWS: usize = 20;

/// Renders analysis records as Markdown.
///
/// ```
/// use varstat::{Dataset, MarkdownReport, RawColumn, RawValue, Varstat};
///
/// let dataset = Dataset::new(
///     "survey",
///     vec![RawColumn::new("smoker", vec![RawValue::text("yes"), RawValue::text("no")])],
/// );
/// let summary = Varstat::new().analyze_dataset(&dataset).unwrap();
/// let markdown = MarkdownReport::new().render_dataset(&summary);
/// assert!(markdown.contains("## smoker"));
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownReport {
    heading_level: u8,
    max_frequency_rows: usize,
}

impl MarkdownReport {
    pub fn new() -> Self {
        Self {
            heading_level: 2,
            max_frequency_rows: DEFAULT_MAX_FREQUENCY_ROWS,
        }
    }

    /// Heading level of each variable section (2-5). The dataset title sits
    /// one level above.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(2, 5);
        self
    }

    /// Limit the frequency table to the first `rows` entries.
    pub fn with_max_frequency_rows(mut self, rows: usize) -> Self {
        self.max_frequency_rows = rows;
        self
    }

    /// Render a dataset overview followed by one section per variable.
    pub fn render_dataset(&self, summary: &DatasetSummary) -> String {
        render(|out| self.write_dataset(out, summary))
    }

    /// Render a single variable section.
    pub fn render_variable(&self, record: &VariableAnalysis) -> String {
        render(|out| self.write_variable(out, record))
    }

    fn write_dataset(&self, out: &mut impl Write, summary: &DatasetSummary) -> fmt::Result {
        let h = "#".repeat(self.heading_level as usize - 1);

        writeln!(out, "{h} Analysis report: {}", summary.name)?;
        writeln!(out)?;
        writeln!(out, "**Rows:** {}  ", summary.row_count)?;
        writeln!(out, "**Columns:** {}", summary.column_count())?;
        writeln!(out)?;
        writeln!(out, "| Column | Type | Missing | Distinct |")?;
        writeln!(out, "|--------|------|---------|----------|")?;
        for overview in summary.overview() {
            let type_label = overview
                .variable_type
                .map(|t| t.label())
                .unwrap_or("failed");
            writeln!(
                out,
                "| {} | {} | {} | {} |",
                overview.name, type_label, overview.missing_count, overview.distinct_count
            )?;
        }
        writeln!(out)?;

        for record in &summary.variables {
            self.write_variable(out, record)?;
        }
        Ok(())
    }

    fn write_variable(&self, out: &mut impl Write, record: &VariableAnalysis) -> fmt::Result {
        let h = "#".repeat(self.heading_level as usize);

        writeln!(out, "{h} {}", record.name)?;
        writeln!(out)?;

        let Some(variable_type) = record.variable_type else {
            writeln!(
                out,
                "**Analysis failed:** {}",
                record.failure.as_deref().unwrap_or("unknown reason")
            )?;
            return writeln!(out);
        };

        writeln!(out, "**Type:** {}  ", variable_type)?;
        writeln!(
            out,
            "**Values:** {} of {} ({} missing, {:.2}%)",
            record.value_count,
            record.total_count,
            record.missing_count,
            record.missing_percentage()
        )?;
        if record.malformed_count > 0 {
            writeln!(out, "**Malformed:** {}", record.malformed_count)?;
        }
        if record.converted_count > 0 {
            writeln!(out, "**Converted from decimal comma:** {}", record.converted_count)?;
        }
        writeln!(out)?;

        self.write_frequency(out, &h, &record.frequency)?;
        write_central(out, &h, &record.central)?;

        if let Some(proportions) = &record.proportions {
            writeln!(out, "{h}# Proportions")?;
            writeln!(out)?;
            for (label, percent) in proportions {
                writeln!(out, "- **{}:** {:.2}%", label, percent)?;
            }
            writeln!(out)?;
        }

        if let Some(separatrices) = &record.separatrices {
            write_separatrices(out, &h, separatrices)?;
        }
        if let Some(dispersion) = &record.dispersion {
            write_dispersion(out, &h, dispersion)?;
        }
        if let Some(interpretation) = &record.interpretation {
            writeln!(out, "{h}# Interpretation")?;
            writeln!(out)?;
            writeln!(out, "{}", interpretation.text)?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_frequency(&self, out: &mut impl Write, h: &str, table: &FrequencyTable) -> fmt::Result {
        if table.is_empty() {
            return Ok(());
        }
        writeln!(out, "{h}# Frequency distribution")?;
        writeln!(out)?;
        writeln!(out, "| Value | Absolute | Relative | Cumulative |")?;
        writeln!(out, "|-------|----------|----------|------------|")?;
        for entry in table.iter().take(self.max_frequency_rows) {
            writeln!(
                out,
                "| {} | {} | {:.4} ({:.2}%) | {:.4} |",
                entry.label,
                entry.absolute,
                entry.relative,
                entry.relative * 100.0,
                entry.cumulative
            )?;
        }
        if table.len() > self.max_frequency_rows {
            writeln!(out)?;
            writeln!(
                out,
                "*Showing {} of {} rows*",
                self.max_frequency_rows,
                table.len()
            )?;
        }
        writeln!(out)
    }
}

impl Default for MarkdownReport {
    fn default() -> Self {
        Self::new()
    }
}

fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write(&mut out);
    out
}

fn write_central(out: &mut impl Write, h: &str, central: &CentralTendency) -> fmt::Result {
    if central == &CentralTendency::default() {
        return Ok(());
    }
    writeln!(out, "{h}# Central tendency")?;
    writeln!(out)?;
    writeln!(out, "| Measure | Value |")?;
    writeln!(out, "|---------|-------|")?;
    if let Some(mean) = central.mean {
        writeln!(out, "| Mean | {:.4} |", mean)?;
    }
    if let Some(median) = central.median {
        writeln!(out, "| Median | {:.4} |", median)?;
    }
    if let Some(category) = &central.median_category {
        writeln!(out, "| Median category | {} |", category)?;
    }
    match &central.mode {
        Some(Mode::Value(v)) => writeln!(out, "| Mode | {:.4} |", v)?,
        Some(Mode::Category(c)) => writeln!(out, "| Mode | {} |", c)?,
        None => {}
    }
    writeln!(out)
}

fn write_separatrices(out: &mut impl Write, h: &str, separatrices: &SeparatrixSet) -> fmt::Result {
    writeln!(out, "{h}# Separatrices")?;
    writeln!(out)?;
    writeln!(out, "| Quartile | Value |")?;
    writeln!(out, "|----------|-------|")?;
    for (k, (name, value)) in separatrices.quartiles.iter().enumerate() {
        writeln!(out, "| {} ({}%) | {:.4} |", name, (k + 1) * 25, value)?;
    }
    writeln!(out)?;
    writeln!(out, "| Decile | Value |")?;
    writeln!(out, "|--------|-------|")?;
    for (name, value) in &separatrices.deciles {
        writeln!(out, "| {} | {:.4} |", name, value)?;
    }
    writeln!(out)
}

fn write_dispersion(out: &mut impl Write, h: &str, dispersion: &DispersionSummary) -> fmt::Result {
    let kind = match dispersion.variance_kind {
        VarianceKind::Population => "population",
        VarianceKind::Sample => "sample",
    };
    writeln!(out, "{h}# Dispersion")?;
    writeln!(out)?;
    writeln!(out, "| Measure | Value |")?;
    writeln!(out, "|---------|-------|")?;
    writeln!(out, "| Range | {:.4} |", dispersion.range)?;
    writeln!(out, "| Variance ({kind}) | {:.4} |", dispersion.variance)?;
    writeln!(out, "| Standard deviation ({kind}) | {:.4} |", dispersion.std_dev)?;
    writeln!(out, "| IQR (Q3 - Q1) | {:.4} |", dispersion.iqr)?;
    match dispersion.cv {
        Some(cv) => writeln!(out, "| Coefficient of variation | {:.2}% |", cv)?,
        None => writeln!(out, "| Coefficient of variation | not applicable |")?,
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Varstat;
    use crate::model::{Dataset, RawColumn, RawValue};

    fn summary(columns: Vec<RawColumn>) -> DatasetSummary {
        Varstat::new()
            .analyze_dataset(&Dataset::new("test", columns))
            .unwrap()
    }

    fn column(name: &str, cells: &[&str]) -> RawColumn {
        RawColumn::new(name, cells.iter().map(|c| RawValue::text(*c)).collect())
    }

    #[test]
    fn test_dataset_overview() {
        let summary = summary(vec![
            column("color", &["red", "green", "blue"]),
            RawColumn::new("empty", Vec::new()),
        ]);
        let markdown = MarkdownReport::new().render_dataset(&summary);
        assert!(markdown.starts_with("# Analysis report: test"));
        assert!(markdown.contains("| color | Nominal | 0 | 3 |"));
        assert!(markdown.contains("| empty | failed | 0 | 0 |"));
        assert!(markdown.contains("**Analysis failed:**"));
    }

    #[test]
    fn test_numeric_sections() {
        let summary = summary(vec![column("age", &["25", "30", "25", "40"])]);
        let markdown = MarkdownReport::new().render_variable(&summary.variables[0]);
        assert!(markdown.starts_with("## age"));
        assert!(markdown.contains("**Type:** Discrete"));
        assert!(markdown.contains("| Mean | 30.0000 |"));
        assert!(markdown.contains("| Q2 (50%) | 27.5000 |"));
        assert!(markdown.contains("| Variance (population) |"));
        assert!(!markdown.contains("### Interpretation"));
    }

    #[test]
    fn test_binary_proportions() {
        let summary = summary(vec![column("smoker", &["yes", "yes", "no", "yes"])]);
        let markdown = MarkdownReport::new().render_variable(&summary.variables[0]);
        assert!(markdown.contains("- **yes:** 75.00%"));
        assert!(markdown.contains("| yes | 3 | 0.7500 (75.00%) | 0.7500 |"));
        assert!(!markdown.contains("### Dispersion"));
    }

    #[test]
    fn test_frequency_rows_limited() {
        let cells: Vec<String> = (0..25).map(|i| format!("c{}", i)).collect();
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        let summary = summary(vec![column("code", &cells)]);
        let markdown = MarkdownReport::new().render_variable(&summary.variables[0]);
        assert!(markdown.contains("*Showing 20 of 25 rows*"));
        assert!(markdown.contains("| c19 |"));
        assert!(!markdown.contains("| c20 |"));
    }

    #[test]
    fn test_heading_level() {
        let summary = summary(vec![column("color", &["red", "green", "blue"])]);
        let markdown = MarkdownReport::new()
            .with_heading_level(3)
            .render_variable(&summary.variables[0]);
        assert!(markdown.starts_with("### color"));
        assert!(markdown.contains("#### Frequency distribution"));
    }

    #[test]
    fn test_title_stays_above_variable_sections() {
        let summary = summary(vec![column("color", &["red", "green", "blue"])]);
        let markdown = MarkdownReport::new()
            .with_heading_level(1)
            .render_dataset(&summary);
        assert!(markdown.starts_with("# Analysis report: test"));
        assert!(markdown.contains("\n## color\n"));
        assert!(markdown.contains("### Frequency distribution"));
    }
}
