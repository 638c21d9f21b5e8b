//! The batch run: load or build the relation table, analyse, publish.

use crate::config::Config;
use crate::error::Result;
use crate::source::DataSource;
use collabnet_analysis::{publish, NameQuery, RunReport, TemporalAggregator, TemporalRelationBuilder};
use collabnet_domain::traits::RelationCheckpoint;
use collabnet_domain::{AuthorKey, RelationTable, YearRange};
use collabnet_render::PngRenderer;
use collabnet_store::{read_roster_file, CsvAuthorCheckpoint, CsvRelationTable, DirectorySink, SqliteAuthorIndex};

/// Per-run parameters that do not come from the configuration file
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Years to analyse
    pub range: YearRange,

    /// Optional artifact name prefix
    pub prefix: Option<String>,
}

/// Run the pipeline from `source` to written artifacts
pub fn run(source: &DataSource, options: &RunOptions, config: &Config) -> Result<RunReport> {
    let range = options.range;
    if range.is_empty() {
        tracing::warn!("year range {} is empty; nothing will be analysed", range);
    }

    let renderer = PngRenderer::new(config.render.clone())?;
    let mut sink = DirectorySink::new(&config.output_dir)?;
    tracing::info!("Reading {}", source.describe());

    let (table, unmatched) = relation_table(source, range, config)?;
    let covered = table.range();
    if !range.is_empty() && !(covered.contains(range.start) && covered.contains(range.end)) {
        tracing::warn!("relation table covers {}, requested {}", covered, range);
    }

    let report = TemporalAggregator::new(config.analysis.clone()).run_range(&table, range)?;
    let artifacts = publish(&report, options.prefix.as_deref(), &renderer, &mut sink)?;

    Ok(RunReport::new(&report, unmatched, &artifacts))
}

/// Produce the relation table and the names that could not be resolved
fn relation_table(source: &DataSource, range: YearRange, config: &Config) -> Result<(RelationTable, Vec<String>)> {
    let delimiter = &config.analysis.delimiter;
    let builder = TemporalRelationBuilder::new(config.analysis.clone());
    let mut checkpoint = CsvRelationTable::new(config.relations_checkpoint_path(), delimiter);

    match source {
        DataSource::Relations(path) => {
            let table = CsvRelationTable::new(path, delimiter).load()?;
            Ok((table, Vec::new()))
        }
        DataSource::Authors(path) => {
            let authors = CsvAuthorCheckpoint::new(path, delimiter).load()?;
            tracing::info!("Loaded {} resolved authors", authors.len());
            let table = builder.build_and_checkpoint(&authors, range, &mut checkpoint)?;
            Ok((table, Vec::new()))
        }
        DataSource::Roster { roster, database } => {
            let entries = read_roster_file(roster)?;
            let index = SqliteAuthorIndex::open_existing(database)?;
            index.check()?;

            let queries = entries.into_iter().map(|entry| NameQuery {
                name: entry.name,
                key: entry.dblp.map(AuthorKey::new),
            });
            let resolution = builder.resolve(queries, &index)?;

            CsvAuthorCheckpoint::new(config.authors_checkpoint_path(), delimiter).save(&resolution.authors)?;
            let table = builder.build_and_checkpoint(&resolution.authors, range, &mut checkpoint)?;
            Ok((table, resolution.unmatched))
        }
    }
}
