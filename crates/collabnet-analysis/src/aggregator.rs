//! Temporal aggregator: runs graph construction and statistics over a range

use crate::{AnalysisConfig, AnalysisError};
use collabnet_domain::statistics::KdeOptions;
use collabnet_domain::{
    AssortativityDensity, CollaborationGraph, DegreeDistribution, RelationTable, YearRange, YearStatistics,
};

/// Assortativity snapshot taken at a checkpoint year
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Checkpoint year
    pub year: i32,

    /// Degree pairs, density and coefficient of that year's graph
    pub density: AssortativityDensity,
}

/// Node and edge counts of one year's graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePoint {
    /// Year
    pub year: i32,
    /// Number of nodes
    pub node_count: usize,
    /// Number of edges
    pub edge_count: usize,
}

/// Everything computed for one year range
///
/// Every per-year collection holds exactly one entry per year of the range,
/// in chronological order.
#[derive(Debug, Clone)]
pub struct RangeReport {
    /// The analysed range
    pub range: YearRange,

    /// Per-year summary
    pub statistics: Vec<YearStatistics>,

    /// Per-year degree distribution with its fit
    pub distributions: Vec<(i32, DegreeDistribution)>,

    /// Snapshots at the checkpoint years, ascending
    pub snapshots: Vec<Snapshot>,

    /// Graphs built during the run, kept for the size series
    pub graphs: Vec<(i32, CollaborationGraph)>,

    /// Gamma against year
    pub gamma_series: Vec<(i32, f64)>,

    /// Node and edge counts against year
    pub size_series: Vec<SizePoint>,
}

/// Drives the yearly graph builder and statistics across a year range
///
/// # Examples
///
/// ```
/// use collabnet_analysis::{AnalysisConfig, TemporalAggregator};
/// use collabnet_domain::{RelationTable, TemporalRelationRow, YearRange};
///
/// let range = YearRange::new(2000, 2001);
/// let mut row = TemporalRelationRow::new("A");
/// for year in range.years() {
///     row.set(year, vec!["B".to_string(), "C".to_string()]);
/// }
/// let mut table = RelationTable::new(range);
/// table.push(row);
///
/// let aggregator = TemporalAggregator::new(AnalysisConfig::default());
/// let report = aggregator.run_range(&table, range).unwrap();
/// assert_eq!(report.statistics.len(), 2);
/// ```
pub struct TemporalAggregator {
    kde: KdeOptions,
}

impl TemporalAggregator {
    /// Create an aggregator with the given configuration
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            kde: config.kde_options(),
        }
    }

    /// Analyse every year of `range`, ascending
    ///
    /// Any year whose statistics are undefined fails the whole run, since a
    /// missing year would break the fixed length of the series.
    pub fn run_range(&self, table: &RelationTable, range: YearRange) -> Result<RangeReport, AnalysisError> {
        if table.range() != range {
            tracing::debug!("table covers {}, analysing {}", table.range(), range);
        }

        let checkpoints = range.checkpoint_years();
        let mut statistics = Vec::with_capacity(range.len());
        let mut distributions = Vec::with_capacity(range.len());
        let mut snapshots = Vec::with_capacity(checkpoints.len());
        let mut graphs = Vec::with_capacity(range.len());

        for year in range.years() {
            let graph = CollaborationGraph::for_year(table, year);
            let distribution =
                DegreeDistribution::compute(&graph).map_err(|source| AnalysisError::Statistics { year, source })?;

            tracing::debug!(
                year,
                nodes = distribution.node_count,
                edges = distribution.edge_count,
                gamma = distribution.gamma,
                "computed degree distribution"
            );

            if checkpoints.contains(&year) {
                let density = AssortativityDensity::compute(&graph, &self.kde)
                    .map_err(|source| AnalysisError::Statistics { year, source })?;
                tracing::info!(year, coefficient = ?density.coefficient, "took assortativity snapshot");
                snapshots.push(Snapshot { year, density });
            }

            statistics.push(distribution.year_statistics(year));
            distributions.push((year, distribution));
            graphs.push((year, graph));
        }

        let gamma_series = statistics.iter().map(|s| (s.year, s.gamma)).collect();
        let size_series = graphs
            .iter()
            .map(|(year, graph)| SizePoint {
                year: *year,
                node_count: graph.node_count(),
                edge_count: graph.edge_count(),
            })
            .collect();

        tracing::info!(years = statistics.len(), snapshots = snapshots.len(), "analysed {}", range);

        Ok(RangeReport {
            range,
            statistics,
            distributions,
            snapshots,
            graphs,
            gamma_series,
            size_series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabnet_domain::{StatisticsError, TemporalRelationRow};

    fn row(author: &str, cells: &[(i32, &[&str])]) -> TemporalRelationRow {
        let mut row = TemporalRelationRow::new(author);
        for (year, names) in cells {
            row.set(*year, names.iter().map(|n| n.to_string()).collect());
        }
        row
    }

    /// A star A-{B,C} in every year of the range
    fn steady_table(range: YearRange) -> RelationTable {
        let cells: Vec<(i32, &[&str])> = range.years().map(|y| (y, &["B", "C"][..])).collect();
        let mut table = RelationTable::new(range);
        table.push(row("A", &cells));
        table
    }

    #[test]
    fn test_series_length_matches_range() {
        let range = YearRange::new(2000, 2005);
        let aggregator = TemporalAggregator::new(AnalysisConfig::default());
        let report = aggregator.run_range(&steady_table(range), range).unwrap();

        let years: Vec<i32> = report.statistics.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2000, 2001, 2002, 2003, 2004, 2005]);
        assert_eq!(report.gamma_series.len(), 6);
        assert_eq!(report.size_series.len(), 6);
        assert_eq!(report.graphs.len(), 6);
        assert_eq!(report.distributions.len(), 6);
    }

    #[test]
    fn test_snapshots_at_checkpoint_years_only() {
        let range = YearRange::new(2000, 2009);
        let aggregator = TemporalAggregator::new(AnalysisConfig::default());
        let report = aggregator.run_range(&steady_table(range), range).unwrap();

        let years: Vec<i32> = report.snapshots.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2000, 2004, 2009]);
    }

    #[test]
    fn test_size_series_follows_graphs() {
        let range = YearRange::new(2000, 2001);
        let mut table = RelationTable::new(range);
        table.push(row("A", &[(2000, &["B", "C"]), (2001, &["B", "C", "D"])]));
        table.push(row("B", &[(2000, &["A"]), (2001, &["A", "D"])]));
        table.push(row("C", &[(2000, &["A"]), (2001, &["A"])]));
        table.push(row("D", &[(2000, &[]), (2001, &["B", "A"])]));

        let aggregator = TemporalAggregator::new(AnalysisConfig::default());
        let report = aggregator.run_range(&table, range).unwrap();

        assert_eq!(
            report.size_series,
            vec![
                SizePoint { year: 2000, node_count: 3, edge_count: 2 },
                SizePoint { year: 2001, node_count: 4, edge_count: 4 },
            ]
        );
        for (stats, point) in report.statistics.iter().zip(&report.size_series) {
            assert_eq!(stats.node_count, point.node_count);
            assert_eq!(stats.edge_count, point.edge_count);
        }
    }

    #[test]
    fn test_insufficient_fit_data_names_the_year() {
        let range = YearRange::new(2000, 2001);
        let mut table = RelationTable::new(range);
        // 2001 is a triangle: every node has degree 2
        table.push(row("A", &[(2000, &["B", "C"]), (2001, &["B", "C"])]));
        table.push(row("B", &[(2001, &["C"])]));

        let aggregator = TemporalAggregator::new(AnalysisConfig::default());
        let err = aggregator.run_range(&table, range).unwrap_err();

        assert!(matches!(
            err,
            AnalysisError::Statistics {
                year: 2001,
                source: StatisticsError::InsufficientFitData { distinct_degrees: 1 }
            }
        ));
    }

    #[test]
    fn test_empty_year_fails() {
        let range = YearRange::new(2000, 2001);
        let mut table = RelationTable::new(range);
        table.push(row("A", &[(2001, &["B", "C"])]));

        let aggregator = TemporalAggregator::new(AnalysisConfig::default());
        let err = aggregator.run_range(&table, range).unwrap_err();
        assert!(matches!(err, AnalysisError::Statistics { year: 2000, .. }));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let aggregator = TemporalAggregator::new(AnalysisConfig::default());
        let range = YearRange::new(2005, 2000);
        let report = aggregator
            .run_range(&RelationTable::new(YearRange::new(2000, 2005)), range)
            .unwrap();

        assert!(report.statistics.is_empty());
        assert!(report.snapshots.is_empty());
    }
}
