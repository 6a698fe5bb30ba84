//! Board topology providers.
//!
//! The engine is agnostic to board shape: a layout only has to yield a
//! finite, stable-identity set of points. Coordinates are UI-scale
//! (the geometry tolerances are calibrated against an 800x800
//! surface), but nothing here draws anything.

use crate::geometry::Point;
use std::f64::consts::PI;

/// Default board surface extent, in both axes.
const DEFAULT_EXTENT: f64 = 800.0;

/// Default margin between the surface edge and the outermost points.
const DEFAULT_PADDING: f64 = 80.0;

/// Ring radius as a fraction of the smaller surface extent.
const CIRCLE_RADIUS_FACTOR: f64 = 0.45;

/// Proximity tolerance for [`nearest_point`]. Clicks farther than this
/// from every point select nothing.
pub const CLICK_TOLERANCE: f64 = 15.0;

/// A point-set generator for one board shape.
///
/// Implementations must return the same points in the same order on
/// every call for the lifetime of a game, so point identity is stable.
pub trait Layout {
    /// Enumerates every point on the board.
    fn points(&self) -> Vec<Point>;
}

/// Rectangular grid of evenly spaced points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    size: usize,
    width: f64,
    height: f64,
    padding: f64,
}

impl GridLayout {
    /// Creates a `size` x `size` grid on the default 800x800 surface.
    ///
    /// `size` must be at least 2.
    pub fn new(size: usize) -> Self {
        Self::with_surface(size, DEFAULT_EXTENT, DEFAULT_EXTENT, DEFAULT_PADDING)
    }

    /// Creates a grid on a custom surface.
    ///
    /// `size` must be at least 2.
    pub fn with_surface(size: usize, width: f64, height: f64, padding: f64) -> Self {
        assert!(size >= 2, "grid layout needs at least a 2x2 grid");
        Self {
            size,
            width,
            height,
            padding,
        }
    }

    /// Grid side length in points.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for GridLayout {
    /// The standard 10x10 board.
    fn default() -> Self {
        Self::new(10)
    }
}

impl Layout for GridLayout {
    fn points(&self) -> Vec<Point> {
        let steps = (self.size - 1) as f64;
        let spacing_x = (self.width - 2.0 * self.padding) / steps;
        let spacing_y = (self.height - 2.0 * self.padding) / steps;

        let mut points = Vec::with_capacity(self.size * self.size);
        for i in 0..self.size {
            for j in 0..self.size {
                points.push(Point::new(
                    self.padding + i as f64 * spacing_x,
                    self.padding + j as f64 * spacing_y,
                ));
            }
        }
        points
    }
}

/// Concentric rings of points around a center dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleLayout {
    rings: usize,
    dot_budget: usize,
    width: f64,
    height: f64,
}

impl CircleLayout {
    /// Creates the standard circle board: 6 rings, 24-dot budget for
    /// the outermost ring, on the default 800x800 surface.
    pub fn new() -> Self {
        Self {
            rings: 6,
            dot_budget: 24,
            width: DEFAULT_EXTENT,
            height: DEFAULT_EXTENT,
        }
    }
}

impl Default for CircleLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for CircleLayout {
    fn points(&self) -> Vec<Point> {
        let center_x = self.width / 2.0;
        let center_y = self.height / 2.0;
        let max_radius = CIRCLE_RADIUS_FACTOR * self.width.min(self.height);
        let outer = self.rings - 1;

        let mut points = vec![Point::new(center_x, center_y)];
        for ring in 1..self.rings {
            let radius = max_radius * ring as f64 / outer as f64;
            // Dot count scales with the ring index; the outermost ring
            // carries the full budget.
            let count = self.dot_budget * ring / outer;
            for i in 0..count {
                let angle = i as f64 * 2.0 * PI / count as f64 - PI / 2.0;
                points.push(Point::new(
                    center_x + radius * angle.cos(),
                    center_y + radius * angle.sin(),
                ));
            }
        }
        points
    }
}

/// Finds the board point nearest to raw surface coordinates, within
/// [`CLICK_TOLERANCE`].
///
/// This is the hit-testing contract at the presentation boundary: the
/// engine itself only ever sees points returned from here (or from the
/// layout directly), never pixel coordinates.
pub fn nearest_point(points: &[Point], x: f64, y: f64) -> Option<Point> {
    let probe = Point::new(x, y);
    let mut closest = None;
    let mut min_distance = f64::INFINITY;
    for &point in points {
        let distance = point.distance(probe);
        if distance < min_distance && distance < CLICK_TOLERANCE {
            min_distance = distance;
            closest = Some(point);
        }
    }
    closest
}
