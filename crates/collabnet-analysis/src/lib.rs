//! Collabnet Analysis
//!
//! Application layer of the collaboration pipeline.
//!
//! # Overview
//!
//! - **Resolution**: roster names are looked up in an author index; names
//!   without a match are reported, not fatal
//! - **Temporal relation**: one cumulative row per resolved author, saved to a
//!   checkpoint so later runs can start from it
//! - **Aggregation**: one collaboration graph per year, its degree
//!   distribution and power-law fit, and assortativity snapshots at the first,
//!   middle and last year
//! - **Publishing**: charts are rendered to bytes and handed to a sink under
//!   `[prefix_]kind_identifier.ext` names
//!
//! # Usage
//!
//! ```no_run
//! use collabnet_analysis::{publish, AnalysisConfig, TemporalAggregator, TemporalRelationBuilder};
//! use collabnet_domain::YearRange;
//! use collabnet_render::PngRenderer;
//! use collabnet_store::{CsvRelationTable, DirectorySink, SqliteAuthorIndex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnalysisConfig::default();
//! let range = YearRange::new(2000, 2009);
//!
//! let index = SqliteAuthorIndex::open_existing("dblp.sqlite")?;
//! let builder = TemporalRelationBuilder::new(config.clone());
//! let resolution = builder.resolve(["Jim Gray", "Barbara Liskov"], &index)?;
//!
//! let mut checkpoint = CsvRelationTable::new("temporal_rels.csv", &config.delimiter);
//! let table = builder.build_and_checkpoint(&resolution.authors, range, &mut checkpoint)?;
//!
//! let report = TemporalAggregator::new(config).run_range(&table, range)?;
//! let mut sink = DirectorySink::new("out")?;
//! publish(&report, None, &PngRenderer::default(), &mut sink)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregator;
mod artifacts;
mod config;
mod error;
mod relation_builder;
mod report;

pub use aggregator::{RangeReport, SizePoint, Snapshot, TemporalAggregator};
pub use artifacts::{artifact_name, publish, Artifact, ArtifactKind};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use relation_builder::{NameQuery, ResolutionReport, TemporalRelationBuilder};
pub use report::{RunReport, SnapshotRow, YearRow};
