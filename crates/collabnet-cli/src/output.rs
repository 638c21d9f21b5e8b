//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use collabnet_analysis::RunReport;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the report of a finished run.
    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(report.artifacts.join("\n")),
        }
    }

    /// Format the report as tables.
    fn format_report_table(&self, report: &RunReport) -> String {
        let mut sections = Vec::new();

        if report.years.is_empty() {
            sections.push(self.warning(&format!("No years analysed for {}.", report.range())));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Year", "Nodes", "Edges", "Gamma"]);
            for row in &report.years {
                builder.push_record([
                    row.year.to_string(),
                    row.nodes.to_string(),
                    row.edges.to_string(),
                    format!("{:.4}", row.gamma),
                ]);
            }
            sections.push(styled(builder));
        }

        if !report.snapshots.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Year", "Degree pairs", "Assortativity"]);
            for snapshot in &report.snapshots {
                builder.push_record([
                    snapshot.year.to_string(),
                    snapshot.pairs.to_string(),
                    snapshot
                        .coefficient
                        .map(|r| format!("{:.4}", r))
                        .unwrap_or_else(|| "undefined".to_string()),
                ]);
            }
            sections.push(styled(builder));
        }

        if !report.unmatched.is_empty() {
            let mut lines = vec![self.warning(&format!("{} author(s) not found:", report.unmatched.len()))];
            lines.extend(report.unmatched.iter().map(|name| format!("  {}", name)));
            sections.push(lines.join("\n"));
        }

        sections.push(self.success(&format!(
            "Wrote {} artifact(s) for {}",
            report.artifacts.len(),
            report.range()
        )));
        sections.join("\n\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabnet_analysis::{SnapshotRow, YearRow};

    fn create_test_report() -> RunReport {
        RunReport {
            year_start: 2000,
            year_end: 2001,
            years: vec![
                YearRow { year: 2000, nodes: 3, edges: 2, gamma: 1.0 },
                YearRow { year: 2001, nodes: 4, edges: 4, gamma: 0.5 },
            ],
            snapshots: vec![SnapshotRow { year: 2000, pairs: 4, coefficient: None }],
            unmatched: vec!["Nobody".to_string()],
            artifacts: vec!["degree_dist_2000.png".to_string(), "degree_dist_2001.png".to_string()],
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["years"][1]["edges"], 4);
        assert_eq!(value["unmatched"][0], "Nobody");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        assert_eq!(output, "degree_dist_2000.png\ndegree_dist_2001.png");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        assert!(output.contains("Gamma"));
        assert!(output.contains("Assortativity"));
        assert!(output.contains("undefined"));
        assert!(output.contains("1 author(s) not found"));
        assert!(output.contains("Wrote 2 artifact(s) for 2000-2001"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("test"), "✗ test");
    }
}
