//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Collabnet - yearly co-authorship graphs and their degree statistics.
///
/// Exactly one data source is required: a roster to resolve against the
/// author database, a resolved-author checkpoint, or a relation table.
#[derive(Debug, Parser)]
#[command(name = "collabnet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// First year of the analysed range
    #[arg(long, allow_negative_numbers = true)]
    pub year_start: i32,

    /// Last year of the analysed range
    #[arg(long, allow_negative_numbers = true)]
    pub year_end: i32,

    /// Prefix prepended to every artifact name
    #[arg(long)]
    pub prefix: Option<String>,

    /// Author database (SQLite) used to resolve roster names
    #[arg(long, env = "COLLABNET_DATABASE")]
    pub sqlite: Option<PathBuf>,

    /// Roster of researchers to resolve (CSV export of the spreadsheet)
    #[arg(long, alias = "xls")]
    pub roster: Option<PathBuf>,

    /// Resolved-author checkpoint written by an earlier run
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Relation table written by an earlier run
    #[arg(long)]
    pub relations: Option<PathBuf>,

    /// Directory receiving checkpoints and charts
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (artifact names only)
    Quiet,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => Self::Table,
            CliFormat::Json => Self::Json,
            CliFormat::Quiet => Self::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relations_run() {
        let cli = Cli::try_parse_from([
            "collabnet",
            "--year-start",
            "2000",
            "--year-end",
            "2009",
            "--relations",
            "temporal_rels.csv",
            "--prefix",
            "db",
            "-f",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.year_start, 2000);
        assert_eq!(cli.year_end, 2009);
        assert_eq!(cli.relations, Some(PathBuf::from("temporal_rels.csv")));
        assert_eq!(cli.prefix.as_deref(), Some("db"));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_xls_is_roster_alias() {
        let cli = Cli::try_parse_from([
            "collabnet",
            "--year-start",
            "2000",
            "--year-end",
            "2001",
            "--xls",
            "people.csv",
        ])
        .unwrap();
        assert_eq!(cli.roster, Some(PathBuf::from("people.csv")));
    }

    #[test]
    fn test_years_are_required() {
        assert!(Cli::try_parse_from(["collabnet", "--relations", "t.csv"]).is_err());
    }
}
