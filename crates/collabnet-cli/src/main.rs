//! Collabnet CLI - yearly co-authorship graphs from a bibliography.

use clap::Parser;
use collabnet_cli::config::OutputFormat;
use collabnet_cli::{run, Cli, Config, DataSource, Formatter, RunOptions};
use collabnet_domain::YearRange;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let errors = Formatter::new(OutputFormat::Table, !cli.no_color);

    if let Err(e) = execute(cli) {
        eprintln!("{}", errors.error(&format!("Error: {}", e)));
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn execute(cli: Cli) -> collabnet_cli::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    // Fails before any file is touched
    let source = DataSource::select(cli.roster, cli.csv, cli.relations, cli.sqlite.or(config.database.clone()))?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let formatter = Formatter::new(format, !cli.no_color && config.settings.color);

    let options = RunOptions {
        range: YearRange::new(cli.year_start, cli.year_end),
        prefix: cli.prefix,
    };

    let report = run(&source, &options, &config)?;
    println!("{}", formatter.format_report(&report)?);
    Ok(())
}
