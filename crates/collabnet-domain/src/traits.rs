//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its collaborators.
//! Infrastructure implementations live in other crates.

use crate::{AssortativityDensity, CanonicalAuthor, DegreeDistribution, RelationTable, YearRange, YearStatistics};

/// Trait for resolving free-text names against a reference bibliography
///
/// Implemented by the infrastructure layer (collabnet-store)
pub trait AuthorIndex {
    /// Error type for index operations
    type Error;

    /// Resolve a name to zero or more canonical authors
    ///
    /// Implementations must return matches in a stable order; callers take
    /// the first match.
    fn query(&self, name: &str) -> Result<Vec<CanonicalAuthor>, Self::Error>;
}

/// Trait for persisting and reloading the temporal relation
///
/// Implemented by the infrastructure layer (collabnet-store)
pub trait RelationCheckpoint {
    /// Error type for checkpoint operations
    type Error;

    /// Persist the full table, replacing any previous checkpoint
    fn save(&mut self, table: &RelationTable) -> Result<(), Self::Error>;

    /// Load the table written by a previous run
    fn load(&self) -> Result<RelationTable, Self::Error>;
}

/// Trait for turning statistics into encoded chart images
///
/// Rendering is pure: every method returns the encoded bytes and leaves
/// writing them to an [`ArtifactSink`].
///
/// Implemented by the rendering layer (collabnet-render)
pub trait ChartRenderer {
    /// Error type for rendering operations
    type Error;

    /// File extension of the encoded images, without the dot
    fn extension(&self) -> &'static str;

    /// Log-log degree distribution with its best-fit line
    fn degree_distribution(&self, year: i32, distribution: &DegreeDistribution) -> Result<Vec<u8>, Self::Error>;

    /// Degree-pair density heatmap
    fn assortativity_heatmap(&self, year: i32, density: &AssortativityDensity) -> Result<Vec<u8>, Self::Error>;

    /// Gamma against year over the full range
    fn gamma_progression(&self, range: YearRange, series: &[YearStatistics]) -> Result<Vec<u8>, Self::Error>;

    /// Node and edge counts against year over the full range
    fn size_progression(&self, range: YearRange, series: &[YearStatistics]) -> Result<Vec<u8>, Self::Error>;
}

/// Trait for the terminal destination of rendered artifacts
pub trait ArtifactSink {
    /// Error type for sink operations
    type Error;

    /// Store an artifact under `name`
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<(), Self::Error>;
}
