//! Collabnet Domain Layer
//!
//! This crate contains the collaboration model and the graph statistics that the
//! rest of Collabnet builds on. It defines the value objects, the pure
//! algorithms, and the trait interfaces that the infrastructure crates
//! implement.
//!
//! ## Key Concepts
//!
//! - **Canonical author**: a resolved person with an ordered publication history
//! - **Temporal relation**: per-author, per-year cumulative collaborator lists
//! - **Collaboration graph**: undirected simple graph for a single year
//! - **Gamma**: negative slope of the log-log degree-frequency fit
//! - **Checkpoint year**: start, midpoint or end of the analysed range
//!
//! ## Architecture
//!
//! - Minimal dependencies: `petgraph` for graphs, `thiserror` for errors
//! - Pure computation only (no I/O, no logging)
//! - Storage, rendering and file output live in other crates
//! - Trait definitions for every external interaction

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod author;
pub mod graph;
pub mod relation;
pub mod statistics;
pub mod traits;
pub mod year;

// Re-exports for convenience
pub use author::{AuthorKey, CanonicalAuthor, Publication};
pub use graph::CollaborationGraph;
pub use relation::{RelationTable, TemporalRelationRow, DELIMITER};
pub use statistics::{AssortativityDensity, DegreeDistribution, StatisticsError, YearStatistics};
pub use year::YearRange;
