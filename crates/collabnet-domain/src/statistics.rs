//! Graph statistics module
//!
//! Computes the summaries extracted from each yearly graph:
//! 1. Degree-frequency distribution and its log-log least-squares fit (gamma)
//! 2. Degree-assortativity coefficient over connected node pairs
//! 3. Gaussian kernel density over `(degree(u), degree(v))` edge pairs

use crate::CollaborationGraph;
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Default number of grid points per axis for density estimates
pub const DEFAULT_GRID_SIZE: usize = 64;

/// Default bandwidth used when an axis has zero variance
pub const DEFAULT_FALLBACK_BANDWIDTH: f64 = 1.0;

/// Number of bandwidths the density grid extends past the data
const GRID_CUT: f64 = 3.0;

/// Errors raised when a statistic is undefined for a graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatisticsError {
    /// Fewer than two distinct non-zero degree values for the log-log fit
    #[error("insufficient data for fit: {distinct_degrees} distinct non-zero degree value(s), need at least 2")]
    InsufficientFitData {
        /// Number of distinct non-zero degree values found
        distinct_degrees: usize,
    },

    /// The graph has no edges, so degree pairs do not exist
    #[error("graph has no edges")]
    EmptyGraph,
}

/// Result of an ordinary least-squares line fit `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Slope `m`
    pub slope: f64,
    /// Intercept `b`
    pub intercept: f64,
}

/// Fit a line through `points` by ordinary least squares
///
/// Returns `None` when the points hold fewer than two distinct x values,
/// where the slope is undefined.
pub fn least_squares(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
    let sxy: f64 = points.iter().map(|p| (p.0 - mean_x) * (p.1 - mean_y)).sum();

    if sxx <= 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Frequency table: degree value -> number of nodes with that degree (ascending)
pub fn degree_frequencies(graph: &CollaborationGraph) -> BTreeMap<usize, usize> {
    let mut frequencies = BTreeMap::new();
    for (_, degree) in graph.degrees() {
        *frequencies.entry(degree).or_insert(0) += 1;
    }
    frequencies
}

/// Per-year summary kept for the longitudinal series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearStatistics {
    /// Year the graph was built for
    pub year: i32,
    /// Number of nodes in the graph
    pub node_count: usize,
    /// Number of edges in the graph
    pub edge_count: usize,
    /// Negative slope of the log-log degree-frequency fit
    pub gamma: f64,
}

/// Degree distribution of one graph together with its power-law fit
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeDistribution {
    /// Number of nodes, taken from the graph itself
    pub node_count: usize,

    /// Number of edges, taken from the graph itself
    pub edge_count: usize,

    /// `(degree, frequency)` pairs, ascending by degree
    pub frequencies: Vec<(usize, usize)>,

    /// Fit of `ln(frequency)` against `ln(degree)` over non-zero degrees
    pub fit: LinearFit,

    /// Power-law exponent estimate, `-fit.slope`
    pub gamma: f64,
}

impl DegreeDistribution {
    /// Compute the distribution and fit for a graph
    ///
    /// Degree 0 is excluded before taking logarithms. Fails with
    /// [`StatisticsError::InsufficientFitData`] when fewer than two distinct
    /// non-zero degrees remain, instead of yielding an undefined slope.
    ///
    /// # Examples
    ///
    /// ```
    /// use collabnet_domain::{CollaborationGraph, DegreeDistribution};
    ///
    /// // Star: one node of degree 3, three of degree 1
    /// let mut graph = CollaborationGraph::new();
    /// for leaf in ["B", "C", "D"] {
    ///     graph.add_edge("A", leaf);
    /// }
    ///
    /// let dist = DegreeDistribution::compute(&graph).unwrap();
    /// assert_eq!(dist.frequencies, vec![(1, 3), (3, 1)]);
    /// assert!((dist.gamma - 1.0).abs() < 1e-12);
    /// ```
    pub fn compute(graph: &CollaborationGraph) -> Result<Self, StatisticsError> {
        let frequencies: Vec<(usize, usize)> = degree_frequencies(graph).into_iter().collect();

        let points: Vec<(f64, f64)> = frequencies
            .iter()
            .filter(|(degree, _)| *degree > 0)
            .map(|&(degree, count)| ((degree as f64).ln(), (count as f64).ln()))
            .collect();

        let fit = least_squares(&points).ok_or(StatisticsError::InsufficientFitData {
            distinct_degrees: points.len(),
        })?;

        Ok(Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            frequencies,
            fit,
            gamma: -fit.slope,
        })
    }

    /// Frequency predicted by the fitted power law at `degree`
    pub fn fitted_frequency(&self, degree: f64) -> f64 {
        (self.fit.slope * degree.ln() + self.fit.intercept).exp()
    }

    /// Summarize for the longitudinal series
    pub fn year_statistics(&self, year: i32) -> YearStatistics {
        YearStatistics {
            year,
            node_count: self.node_count,
            edge_count: self.edge_count,
            gamma: self.gamma,
        }
    }
}

/// Tuning for the kernel density estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KdeOptions {
    /// Grid points per axis (at least 2 are used)
    pub grid_size: usize,

    /// Bandwidth used for an axis with zero variance
    pub fallback_bandwidth: f64,
}

impl Default for KdeOptions {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            fallback_bandwidth: DEFAULT_FALLBACK_BANDWIDTH,
        }
    }
}

/// Two-dimensional Gaussian kernel density estimate with Scott's rule
///
/// Uses an axis-aligned kernel with per-axis bandwidth `sigma * n^(-1/6)`.
/// Identical points are merged into weighted samples, which keeps the
/// estimate cheap for integer degree pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    samples: Vec<((f64, f64), f64)>,
    total_weight: f64,
    bandwidth: (f64, f64),
}

impl GaussianKde {
    /// Fit the estimator to `points`; returns `None` for an empty input
    pub fn fit(points: &[(f64, f64)], fallback_bandwidth: f64) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut merged: BTreeMap<(u64, u64), ((f64, f64), f64)> = BTreeMap::new();
        for &(x, y) in points {
            merged
                .entry((x.to_bits(), y.to_bits()))
                .or_insert(((x, y), 0.0))
                .1 += 1.0;
        }
        let samples: Vec<((f64, f64), f64)> = merged.into_values().collect();

        let n = points.len() as f64;
        let factor = n.powf(-1.0 / 6.0);
        let bandwidth_for = |values: &dyn Fn(&(f64, f64)) -> f64| {
            let sigma = weighted_std(&samples, values);
            if sigma > 0.0 {
                sigma * factor
            } else {
                fallback_bandwidth
            }
        };
        let bandwidth = (
            bandwidth_for(&|p: &(f64, f64)| p.0),
            bandwidth_for(&|p: &(f64, f64)| p.1),
        );

        Some(Self {
            samples,
            total_weight: n,
            bandwidth,
        })
    }

    /// Per-axis bandwidth `(h_x, h_y)`
    pub fn bandwidth(&self) -> (f64, f64) {
        self.bandwidth
    }

    /// Evaluate the density at `(x, y)`
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let (hx, hy) = self.bandwidth;
        let sum: f64 = self
            .samples
            .iter()
            .map(|&((sx, sy), weight)| {
                let dx = (x - sx) / hx;
                let dy = (y - sy) / hy;
                weight * (-0.5 * (dx * dx + dy * dy)).exp()
            })
            .sum();
        sum / (self.total_weight * 2.0 * PI * hx * hy)
    }
}

/// Unbiased weighted standard deviation of one coordinate
fn weighted_std(samples: &[((f64, f64), f64)], value: &dyn Fn(&(f64, f64)) -> f64) -> f64 {
    let n: f64 = samples.iter().map(|s| s.1).sum();
    if n < 2.0 {
        return 0.0;
    }
    let mean = samples.iter().map(|s| value(&s.0) * s.1).sum::<f64>() / n;
    let var = samples
        .iter()
        .map(|s| (value(&s.0) - mean).powi(2) * s.1)
        .sum::<f64>()
        / (n - 1.0);
    var.sqrt()
}

/// Density values sampled on a regular `size x size` grid
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    /// Lower x bound
    pub x_min: f64,
    /// Upper x bound
    pub x_max: f64,
    /// Lower y bound
    pub y_min: f64,
    /// Upper y bound
    pub y_max: f64,
    /// Points per axis
    pub size: usize,
    /// Row-major values, `values[iy * size + ix]`
    pub values: Vec<f64>,
}

impl DensityGrid {
    /// Sample a fitted estimator over the given bounds
    pub fn sample(kde: &GaussianKde, x: (f64, f64), y: (f64, f64), size: usize) -> Self {
        let size = size.max(2);
        let step = |lo: f64, hi: f64, i: usize| lo + (hi - lo) * i as f64 / (size - 1) as f64;

        let mut values = Vec::with_capacity(size * size);
        for iy in 0..size {
            let gy = step(y.0, y.1, iy);
            for ix in 0..size {
                values.push(kde.evaluate(step(x.0, x.1, ix), gy));
            }
        }

        Self {
            x_min: x.0,
            x_max: x.1,
            y_min: y.0,
            y_max: y.1,
            size,
            values,
        }
    }

    /// Value at grid coordinates
    pub fn value(&self, ix: usize, iy: usize) -> f64 {
        self.values[iy * self.size + ix]
    }

    /// Largest sampled value (0 for an empty grid)
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Data extent widened by `GRID_CUT` bandwidths on each side, floored at 0
fn padded_bounds(values: impl Iterator<Item = f64>, bandwidth: f64) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    ((lo - GRID_CUT * bandwidth).max(0.0), hi + GRID_CUT * bandwidth)
}

/// Pearson correlation of degrees across connected pairs
///
/// Returns `None` when either coordinate has zero variance (e.g. regular
/// graphs), where the coefficient is undefined.
pub fn degree_assortativity(pairs: &[(usize, usize)]) -> Option<f64> {
    if pairs.is_empty() {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0 as f64).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1 as f64).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x as f64 - mean_x;
        let dy = y as f64 - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    Some(cov / (var_x * var_y).sqrt())
}

/// Degree-pair scatter, its density estimate and the assortativity coefficient
#[derive(Debug, Clone, PartialEq)]
pub struct AssortativityDensity {
    /// `(degree(u), degree(v))` for every edge, emitted in both orientations
    pub pairs: Vec<(usize, usize)>,

    /// Density evaluated at each pair (same order as `pairs`), for colouring
    pub point_density: Vec<f64>,

    /// Density sampled on a grid covering the pairs, for the heatmap
    pub grid: DensityGrid,

    /// Kernel bandwidth `(h_x, h_y)`
    pub bandwidth: (f64, f64),

    /// Degree-assortativity coefficient, `None` when undefined
    pub coefficient: Option<f64>,
}

impl AssortativityDensity {
    /// Compute the mirrored degree pairs, density and coefficient for a graph
    ///
    /// Fails with [`StatisticsError::EmptyGraph`] when the graph has no edges.
    pub fn compute(graph: &CollaborationGraph, options: &KdeOptions) -> Result<Self, StatisticsError> {
        if graph.edge_count() == 0 {
            return Err(StatisticsError::EmptyGraph);
        }

        let mut pairs = Vec::with_capacity(graph.edge_count() * 2);
        for (u, v) in graph.edges() {
            let (du, dv) = (graph.degree(u), graph.degree(v));
            pairs.push((du, dv));
            pairs.push((dv, du));
        }

        let points: Vec<(f64, f64)> = pairs.iter().map(|&(x, y)| (x as f64, y as f64)).collect();
        let kde = GaussianKde::fit(&points, options.fallback_bandwidth).ok_or(StatisticsError::EmptyGraph)?;

        // Many edges share a degree pair; evaluate each distinct pair once
        let mut unique: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for &(x, y) in &pairs {
            unique
                .entry((x, y))
                .or_insert_with(|| kde.evaluate(x as f64, y as f64));
        }
        let point_density = pairs.iter().map(|pair| unique[pair]).collect();

        let (hx, hy) = kde.bandwidth();
        let x_bounds = padded_bounds(points.iter().map(|p| p.0), hx);
        let y_bounds = padded_bounds(points.iter().map(|p| p.1), hy);
        let grid = DensityGrid::sample(&kde, x_bounds, y_bounds, options.grid_size);

        Ok(Self {
            coefficient: degree_assortativity(&pairs),
            pairs,
            point_density,
            grid,
            bandwidth: (hx, hy),
        })
    }
}
