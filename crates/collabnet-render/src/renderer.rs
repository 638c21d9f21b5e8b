//! PNG implementation of the chart capability

use crate::canvas::{value_to_heatmap_color, Bounds, Canvas};
use crate::{RenderConfig, RenderError};
use collabnet_domain::traits::ChartRenderer;
use collabnet_domain::{AssortativityDensity, DegreeDistribution, YearRange, YearStatistics};

/// Fraction of the data span left empty around plotted points
const PADDING: f64 = 0.05;

/// Renders charts as PNG images
///
/// # Examples
///
/// ```
/// use collabnet_domain::traits::ChartRenderer;
/// use collabnet_domain::{CollaborationGraph, DegreeDistribution};
/// use collabnet_render::PngRenderer;
///
/// let mut graph = CollaborationGraph::new();
/// graph.add_edge("A", "B");
/// graph.add_edge("A", "C");
///
/// let distribution = DegreeDistribution::compute(&graph).unwrap();
/// let png = PngRenderer::default().degree_distribution(2000, &distribution).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PngRenderer {
    config: RenderConfig,
}

impl PngRenderer {
    /// Create a renderer, rejecting configurations without a plot area
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn line_chart(&self, range: YearRange, series: &[&[(f64, f64)]]) -> Result<Vec<u8>, RenderError> {
        let points = series.iter().flat_map(|s| s.iter().copied());
        let mut bounds = Bounds::enclosing(points, PADDING)
            .ok_or_else(|| RenderError::EmptySeries(format!("no finite values for {}", range)))?;
        bounds.x = (range.start as f64 - 0.5, range.end as f64 + 0.5);

        let mut canvas = Canvas::new(&self.config, bounds);
        canvas.draw_axes();
        let palette = [self.config.primary, self.config.secondary];
        for (points, color) in series.iter().zip(palette.iter().cycle()) {
            canvas.draw_polyline(points, *color);
        }
        canvas.encode_png()
    }
}

impl ChartRenderer for PngRenderer {
    type Error = RenderError;

    fn extension(&self) -> &'static str {
        "png"
    }

    /// Scatter of `(ln degree, ln frequency)` with the fitted line across it
    fn degree_distribution(&self, year: i32, distribution: &DegreeDistribution) -> Result<Vec<u8>, Self::Error> {
        let points: Vec<(f64, f64)> = distribution
            .frequencies
            .iter()
            .filter(|(degree, _)| *degree > 0)
            .map(|&(degree, count)| ((degree as f64).ln(), (count as f64).ln()))
            .collect();

        let (x_min, x_max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.0), hi.max(p.0)));
        let fit = distribution.fit;
        let line = [(x_min, fit.intercept + fit.slope * x_min), (x_max, fit.intercept + fit.slope * x_max)];

        let bounds = Bounds::enclosing(points.iter().copied().chain(line), PADDING)
            .ok_or_else(|| RenderError::EmptySeries(format!("degree distribution {} has no degrees", year)))?;

        let mut canvas = Canvas::new(&self.config, bounds);
        canvas.draw_axes();
        canvas.draw_line(line[0], line[1], self.config.secondary);
        for &(x, y) in &points {
            canvas.draw_point(x, y, self.config.primary);
        }
        canvas.encode_png()
    }

    /// Density grid as a heatmap, with the degree pairs marked on top
    fn assortativity_heatmap(&self, year: i32, density: &AssortativityDensity) -> Result<Vec<u8>, Self::Error> {
        let grid = &density.grid;
        if grid.size < 2 || grid.values.len() != grid.size * grid.size {
            return Err(RenderError::EmptySeries(format!("assortativity {} has no density grid", year)));
        }

        let bounds = Bounds {
            x: (grid.x_min, grid.x_max),
            y: (grid.y_min, grid.y_max),
        };
        let peak = grid.max();
        let last = (grid.size - 1) as f64;
        let cell = |value: f64, lo: f64, hi: f64| -> usize {
            let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.0 };
            (t * last).round().clamp(0.0, last) as usize
        };

        let mut canvas = Canvas::new(&self.config, bounds);
        canvas.fill_plot_area(|x, y| {
            let value = grid.value(cell(x, grid.x_min, grid.x_max), cell(y, grid.y_min, grid.y_max));
            value_to_heatmap_color(if peak > 0.0 { value / peak } else { 0.0 })
        });
        canvas.draw_axes();
        for &(du, dv) in &density.pairs {
            canvas.draw_point(du as f64, dv as f64, self.config.background);
        }
        canvas.encode_png()
    }

    fn gamma_progression(&self, range: YearRange, series: &[YearStatistics]) -> Result<Vec<u8>, Self::Error> {
        let gamma: Vec<(f64, f64)> = series.iter().map(|s| (s.year as f64, s.gamma)).collect();
        self.line_chart(range, &[gamma.as_slice()])
    }

    fn size_progression(&self, range: YearRange, series: &[YearStatistics]) -> Result<Vec<u8>, Self::Error> {
        let nodes: Vec<(f64, f64)> = series.iter().map(|s| (s.year as f64, s.node_count as f64)).collect();
        let edges: Vec<(f64, f64)> = series.iter().map(|s| (s.year as f64, s.edge_count as f64)).collect();
        self.line_chart(range, &[nodes.as_slice(), edges.as_slice()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabnet_domain::statistics::KdeOptions;
    use collabnet_domain::CollaborationGraph;
    use image::GenericImageView;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn star() -> CollaborationGraph {
        let mut graph = CollaborationGraph::new();
        for leaf in ["B", "C", "D"] {
            graph.add_edge("A", leaf);
        }
        graph.add_edge("D", "E");
        graph
    }

    fn renderer() -> PngRenderer {
        PngRenderer::new(RenderConfig::compact()).unwrap()
    }

    fn statistics() -> Vec<YearStatistics> {
        vec![
            YearStatistics { year: 2000, node_count: 3, edge_count: 2, gamma: 1.0 },
            YearStatistics { year: 2001, node_count: 4, edge_count: 4, gamma: 0.6 },
            YearStatistics { year: 2002, node_count: 7, edge_count: 9, gamma: 0.8 },
        ]
    }

    #[test]
    fn test_degree_distribution_is_png() {
        let distribution = DegreeDistribution::compute(&star()).unwrap();
        let png = renderer().degree_distribution(2000, &distribution).unwrap();

        assert_eq!(png[..8], PNG_SIGNATURE);
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.dimensions(), (160, 120));
    }

    #[test]
    fn test_heatmap_is_png() {
        let density = AssortativityDensity::compute(&star(), &KdeOptions::default()).unwrap();
        let png = renderer().assortativity_heatmap(2000, &density).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
    }

    #[test]
    fn test_progressions_are_png() {
        let range = YearRange::new(2000, 2002);
        let renderer = renderer();

        assert_eq!(renderer.gamma_progression(range, &statistics()).unwrap()[..8], PNG_SIGNATURE);
        assert_eq!(renderer.size_progression(range, &statistics()).unwrap()[..8], PNG_SIGNATURE);
    }

    #[test]
    fn test_empty_series_fails() {
        let result = renderer().gamma_progression(YearRange::new(2000, 2002), &[]);
        assert!(matches!(result, Err(RenderError::EmptySeries(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RenderConfig {
            width: 10,
            height: 10,
            margin: 10,
            ..RenderConfig::default()
        };
        assert!(matches!(PngRenderer::new(config), Err(RenderError::InvalidConfig(_))));
    }
}
