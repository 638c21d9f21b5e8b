//! Artifact naming and publishing
//!
//! Rendering returns bytes; this module names them and hands them to the sink.

use crate::{AnalysisError, RangeReport};
use collabnet_domain::traits::{ArtifactSink, ChartRenderer};
use std::fmt;

/// The chart kinds the pipeline produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Log-log degree distribution, one per year
    DegreeDistribution,
    /// Degree-pair heatmap, one per checkpoint year
    Assortativity,
    /// Gamma against year, one per range
    GammaProgression,
    /// Node and edge counts against year, one per range
    SizeProgression,
}

impl ArtifactKind {
    /// Name used in artifact file names
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::DegreeDistribution => "degree_dist",
            ArtifactKind::Assortativity => "assortativity",
            ArtifactKind::GammaProgression => "gamma_progression",
            ArtifactKind::SizeProgression => "size_progression",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build `[prefix_]kind_identifier.ext`
///
/// A blank prefix is treated as no prefix.
///
/// # Examples
///
/// ```
/// use collabnet_analysis::{artifact_name, ArtifactKind};
///
/// assert_eq!(artifact_name(None, ArtifactKind::DegreeDistribution, &2004, "png"), "degree_dist_2004.png");
/// assert_eq!(artifact_name(Some("ml"), ArtifactKind::DegreeDistribution, &2004, "png"), "ml_degree_dist_2004.png");
/// ```
pub fn artifact_name(prefix: Option<&str>, kind: ArtifactKind, identifier: &dyn fmt::Display, extension: &str) -> String {
    match prefix.map(str::trim).filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}_{}_{}.{}", prefix, kind, identifier, extension),
        None => format!("{}_{}.{}", kind, identifier, extension),
    }
}

/// A written artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Chart kind
    pub kind: ArtifactKind,
    /// File name handed to the sink
    pub name: String,
    /// Encoded size in bytes
    pub bytes: usize,
}

/// Render every chart of a report and write it to `sink`
///
/// Produces one degree distribution per year, one heatmap per snapshot and
/// the two range-wide progressions, in that order.
pub fn publish<R, S>(
    report: &RangeReport,
    prefix: Option<&str>,
    renderer: &R,
    sink: &mut S,
) -> Result<Vec<Artifact>, AnalysisError>
where
    R: ChartRenderer,
    R::Error: fmt::Display,
    S: ArtifactSink,
    S::Error: fmt::Display,
{
    let extension = renderer.extension();
    let mut written = Vec::new();

    for (year, distribution) in &report.distributions {
        let bytes = renderer
            .degree_distribution(*year, distribution)
            .map_err(|e| AnalysisError::Render(format!("degree distribution {}: {}", year, e)))?;
        let name = artifact_name(prefix, ArtifactKind::DegreeDistribution, year, extension);
        written.push(write_artifact(sink, ArtifactKind::DegreeDistribution, name, &bytes)?);
    }

    for snapshot in &report.snapshots {
        let bytes = renderer
            .assortativity_heatmap(snapshot.year, &snapshot.density)
            .map_err(|e| AnalysisError::Render(format!("assortativity {}: {}", snapshot.year, e)))?;
        let name = artifact_name(prefix, ArtifactKind::Assortativity, &snapshot.year, extension);
        written.push(write_artifact(sink, ArtifactKind::Assortativity, name, &bytes)?);
    }

    if !report.range.is_empty() {
        let range = report.range;

        let bytes = renderer
            .gamma_progression(range, &report.statistics)
            .map_err(|e| AnalysisError::Render(format!("gamma progression {}: {}", range, e)))?;
        let name = artifact_name(prefix, ArtifactKind::GammaProgression, &range, extension);
        written.push(write_artifact(sink, ArtifactKind::GammaProgression, name, &bytes)?);

        let bytes = renderer
            .size_progression(range, &report.statistics)
            .map_err(|e| AnalysisError::Render(format!("size progression {}: {}", range, e)))?;
        let name = artifact_name(prefix, ArtifactKind::SizeProgression, &range, extension);
        written.push(write_artifact(sink, ArtifactKind::SizeProgression, name, &bytes)?);
    }

    tracing::info!("published {} artifacts", written.len());
    Ok(written)
}

fn write_artifact<S>(sink: &mut S, kind: ArtifactKind, name: String, bytes: &[u8]) -> Result<Artifact, AnalysisError>
where
    S: ArtifactSink,
    S::Error: fmt::Display,
{
    sink.write(&name, bytes)
        .map_err(|e| AnalysisError::Sink(format!("{}: {}", name, e)))?;
    tracing::debug!(bytes = bytes.len(), "published {}", name);
    Ok(Artifact {
        kind,
        name,
        bytes: bytes.len(),
    })
}
