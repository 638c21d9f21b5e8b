//! Run report for a completed pipeline run

use crate::{Artifact, RangeReport};
use collabnet_domain::YearRange;
use serde::Serialize;

/// Per-year row of the run report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRow {
    /// Year
    pub year: i32,
    /// Number of nodes
    pub nodes: usize,
    /// Number of edges
    pub edges: usize,
    /// Power-law exponent estimate
    pub gamma: f64,
}

/// Summary of one assortativity snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRow {
    /// Checkpoint year
    pub year: i32,
    /// Mirrored degree pairs the estimate was computed from
    pub pairs: usize,
    /// Degree-assortativity coefficient, absent when undefined
    pub coefficient: Option<f64>,
}

/// Everything a caller needs to know about a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// First year analysed
    pub year_start: i32,
    /// Last year analysed
    pub year_end: i32,
    /// Per-year statistics, chronological
    pub years: Vec<YearRow>,
    /// Snapshot summaries at the checkpoint years
    pub snapshots: Vec<SnapshotRow>,
    /// Roster names that could not be resolved
    pub unmatched: Vec<String>,
    /// Names of the written artifacts
    pub artifacts: Vec<String>,
}

impl RunReport {
    /// Collect the report of a finished run
    pub fn new(report: &RangeReport, unmatched: Vec<String>, artifacts: &[Artifact]) -> Self {
        Self {
            year_start: report.range.start,
            year_end: report.range.end,
            years: report
                .statistics
                .iter()
                .map(|s| YearRow {
                    year: s.year,
                    nodes: s.node_count,
                    edges: s.edge_count,
                    gamma: s.gamma,
                })
                .collect(),
            snapshots: report
                .snapshots
                .iter()
                .map(|s| SnapshotRow {
                    year: s.year,
                    pairs: s.density.pairs.len(),
                    coefficient: s.density.coefficient,
                })
                .collect(),
            unmatched,
            artifacts: artifacts.iter().map(|a| a.name.clone()).collect(),
        }
    }

    /// The analysed range
    pub fn range(&self) -> YearRange {
        YearRange::new(self.year_start, self.year_end)
    }

    /// Generate a plain-text summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Collaboration Summary {}", self.range()),
            "=============================".to_string(),
            format!("Years analysed: {}", self.years.len()),
        ];

        if let (Some(first), Some(last)) = (self.years.first(), self.years.last()) {
            lines.push(format!(
                "Nodes: {} -> {}, edges: {} -> {}",
                first.nodes, last.nodes, first.edges, last.edges
            ));
            lines.push(format!("Gamma: {:.3} -> {:.3}", first.gamma, last.gamma));
        }
        lines.push(String::new());

        if !self.snapshots.is_empty() {
            lines.push("Assortativity:".to_string());
            for snapshot in &self.snapshots {
                match snapshot.coefficient {
                    Some(r) => lines.push(format!("  {}: {:.3}", snapshot.year, r)),
                    None => lines.push(format!("  {}: undefined", snapshot.year)),
                }
            }
            lines.push(String::new());
        }

        if !self.unmatched.is_empty() {
            lines.push(format!("Unmatched authors ({}):", self.unmatched.len()));
            for name in &self.unmatched {
                lines.push(format!("  {}", name));
            }
            lines.push(String::new());
        }

        lines.push(format!("Artifacts written: {}", self.artifacts.len()));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RunReport {
        RunReport {
            year_start: 2000,
            year_end: 2001,
            years: vec![
                YearRow { year: 2000, nodes: 3, edges: 2, gamma: 1.0 },
                YearRow { year: 2001, nodes: 4, edges: 4, gamma: 0.5 },
            ],
            snapshots: vec![
                SnapshotRow { year: 2000, pairs: 4, coefficient: Some(-1.0) },
                SnapshotRow { year: 2001, pairs: 8, coefficient: None },
            ],
            unmatched: vec!["Nobody".to_string()],
            artifacts: vec!["degree_dist_2000.png".to_string()],
        }
    }

    #[test]
    fn test_summary() {
        let summary = report().summary();
        assert!(summary.contains("Collaboration Summary 2000-2001"));
        assert!(summary.contains("Years analysed: 2"));
        assert!(summary.contains("Nodes: 3 -> 4, edges: 2 -> 4"));
        assert!(summary.contains("2000: -1.000"));
        assert!(summary.contains("2001: undefined"));
        assert!(summary.contains("Unmatched authors (1):"));
        assert!(summary.contains("Artifacts written: 1"));
    }

    #[test]
    fn test_serializes_undefined_coefficient_as_null() {
        let json = serde_json::to_value(report()).unwrap();
        assert!(json["snapshots"][1]["coefficient"].is_null());
        assert_eq!(json["years"][0]["nodes"], 3);
    }
}
