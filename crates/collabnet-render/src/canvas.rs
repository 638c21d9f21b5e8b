//! Pixel canvas with a data-to-pixel mapping

use crate::{RenderConfig, RenderError};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Data bounds of a plot, `(min, max)` per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Bounds {
    /// Bounds enclosing all points, widened by `pad` of the span on each side
    ///
    /// A degenerate axis is widened to a unit span around its value.
    pub fn enclosing(points: impl IntoIterator<Item = (f64, f64)>, pad: f64) -> Option<Self> {
        let mut x = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y = (f64::INFINITY, f64::NEG_INFINITY);
        for (px, py) in points {
            if !(px.is_finite() && py.is_finite()) {
                continue;
            }
            x = (x.0.min(px), x.1.max(px));
            y = (y.0.min(py), y.1.max(py));
        }
        if x.0 > x.1 {
            return None;
        }
        Some(Self {
            x: widen(x, pad),
            y: widen(y, pad),
        })
    }
}

fn widen((lo, hi): (f64, f64), pad: f64) -> (f64, f64) {
    let span = hi - lo;
    if span <= f64::EPSILON {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo - span * pad, hi + span * pad)
    }
}

/// An image with a plot area inside the configured margin
pub(crate) struct Canvas<'a> {
    config: &'a RenderConfig,
    img: RgbImage,
    bounds: Bounds,
}

impl<'a> Canvas<'a> {
    pub fn new(config: &'a RenderConfig, bounds: Bounds) -> Self {
        Self {
            config,
            img: RgbImage::from_pixel(config.width, config.height, Rgb(config.background)),
            bounds,
        }
    }

    fn left(&self) -> u32 {
        self.config.margin
    }

    fn right(&self) -> u32 {
        self.config.width - self.config.margin - 1
    }

    fn top(&self) -> u32 {
        self.config.margin
    }

    fn bottom(&self) -> u32 {
        self.config.height - self.config.margin - 1
    }

    /// Map a data point to pixel coordinates; the y axis points up
    pub fn to_pixel(&self, x: f64, y: f64) -> (i64, i64) {
        let (x0, x1) = self.bounds.x;
        let (y0, y1) = self.bounds.y;
        let tx = (x - x0) / (x1 - x0);
        let ty = (y - y0) / (y1 - y0);

        let width = (self.right() - self.left()) as f64;
        let height = (self.bottom() - self.top()) as f64;
        let px = self.left() as f64 + tx * width;
        let py = self.bottom() as f64 - ty * height;
        (px.round() as i64, py.round() as i64)
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Left and bottom axis lines
    pub fn draw_axes(&mut self) {
        let color = Rgb(self.config.axis);
        let (left, right, top, bottom) = (self.left(), self.right(), self.top(), self.bottom());
        for x in left..=right {
            self.img.put_pixel(x, bottom, color);
        }
        for y in top..=bottom {
            self.img.put_pixel(left, y, color);
        }
    }

    /// Filled square centered on a data point
    pub fn draw_point(&mut self, x: f64, y: f64, color: [u8; 3]) {
        let (cx, cy) = self.to_pixel(x, y);
        let half = (self.config.point_size / 2) as i64;
        for dy in -half..=half {
            for dx in -half..=half {
                self.put(cx + dx, cy + dy, Rgb(color));
            }
        }
    }

    /// Straight line between two data points (Bresenham)
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: [u8; 3]) {
        let (mut x, mut y) = self.to_pixel(from.0, from.1);
        let (x2, y2) = self.to_pixel(to.0, to.1);
        let dx = (x2 - x).abs();
        let dy = (y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.put(x, y, Rgb(color));
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Connect consecutive points and mark each one
    pub fn draw_polyline(&mut self, points: &[(f64, f64)], color: [u8; 3]) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], color);
        }
        for &(x, y) in points {
            self.draw_point(x, y, color);
        }
    }

    /// Fill the plot area, coloring each pixel from its data coordinates
    pub fn fill_plot_area(&mut self, mut color_at: impl FnMut(f64, f64) -> [u8; 3]) {
        let (x0, x1) = self.bounds.x;
        let (y0, y1) = self.bounds.y;
        let (left, right, top, bottom) = (self.left(), self.right(), self.top(), self.bottom());
        let width = (right - left).max(1) as f64;
        let height = (bottom - top).max(1) as f64;

        for py in top..=bottom {
            let y = y0 + (bottom - py) as f64 / height * (y1 - y0);
            for px in left..=right {
                let x = x0 + (px - left) as f64 / width * (x1 - x0);
                self.img.put_pixel(px, py, Rgb(color_at(x, y)));
            }
        }
    }

    /// Encode as PNG
    pub fn encode_png(self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        self.img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Interpolate between two colors
pub fn interpolate_color(c1: [u8; 3], c2: [u8; 3], t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| ((1.0 - t) * a as f64 + t * b as f64) as u8;
    [mix(c1[0], c2[0]), mix(c1[1], c2[1]), mix(c1[2], c2[2])]
}

/// Map a value in `[0, 1]` onto a black-blue-cyan-yellow-red scale
pub fn value_to_heatmap_color(value: f64) -> [u8; 3] {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };

    if v < 0.25 {
        interpolate_color([0, 0, 0], [0, 0, 255], v / 0.25)
    } else if v < 0.5 {
        interpolate_color([0, 0, 255], [0, 255, 255], (v - 0.25) / 0.25)
    } else if v < 0.75 {
        interpolate_color([0, 255, 255], [255, 255, 0], (v - 0.5) / 0.25)
    } else {
        interpolate_color([255, 255, 0], [255, 0, 0], (v - 0.75) / 0.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_color() {
        assert_eq!(interpolate_color([0, 0, 0], [255, 255, 255], 0.5), [127, 127, 127]);
    }

    #[test]
    fn test_heatmap_color_ends() {
        assert_eq!(value_to_heatmap_color(0.0), [0, 0, 0]);
        assert_eq!(value_to_heatmap_color(1.0), [255, 0, 0]);
        assert_eq!(value_to_heatmap_color(f64::NAN), [0, 0, 0]);
    }

    #[test]
    fn test_bounds_widen_degenerate_axis() {
        let bounds = Bounds::enclosing([(1.0, 2.0), (3.0, 2.0)], 0.0).unwrap();
        assert_eq!(bounds.x, (1.0, 3.0));
        assert_eq!(bounds.y, (1.5, 2.5));
        assert!(Bounds::enclosing(Vec::new(), 0.1).is_none());
    }

    #[test]
    fn test_to_pixel_corners() {
        let config = RenderConfig::compact();
        let canvas = Canvas::new(&config, Bounds { x: (0.0, 1.0), y: (0.0, 1.0) });

        let margin = config.margin as i64;
        assert_eq!(canvas.to_pixel(0.0, 0.0), (margin, config.height as i64 - margin - 1));
        assert_eq!(canvas.to_pixel(1.0, 1.0), (config.width as i64 - margin - 1, margin));
    }
}
