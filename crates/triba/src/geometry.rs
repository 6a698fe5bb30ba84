//! Point and segment geometry for move validation.
//!
//! Pure functions over coordinate pairs. All tolerances are fixed
//! constants calibrated to UI-scale coordinates (an 800x800 board
//! surface); they are not a configuration surface.

use serde::{Deserialize, Serialize};

/// Signed areas below this magnitude count as true collinearity.
pub const COLLINEAR_TOLERANCE: f64 = 1e-3;

/// Minimum triangle area. Triangles thinner than this are treated as
/// collinear even when technically non-degenerate, so players cannot
/// claim slivers that are indistinguishable from a line on screen.
pub const MIN_AREA_TOLERANCE: f64 = 100.0;

/// Bounding-box slack for the collinear-overlap intersection case;
/// segments touching at a boundary coordinate count as overlapping.
const OVERLAP_EPSILON: f64 = 1e-10;

/// Per-axis tolerance for matching a point against a triangle vertex.
pub const VERTEX_TOLERANCE: f64 = 2.0;

/// Perpendicular-distance tolerance for matching a point against a
/// triangle edge. Segments shorter than this are degenerate and match
/// nothing.
pub const EDGE_DISTANCE_TOLERANCE: f64 = 3.0;

/// A point on the board. Immutable once created by a layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Tolerance-based identity, used for vertex-usability checks.
    ///
    /// This is deliberately distinct from [`PointKey`] equality: vertex
    /// matching absorbs small coordinate drift, while disabled-point
    /// membership and selection identity are exact.
    pub fn approx_eq(self, other: Point) -> bool {
        (self.x - other.x).abs() < VERTEX_TOLERANCE && (self.y - other.y).abs() < VERTEX_TOLERANCE
    }

    /// Exact-identity key for this point.
    pub fn key(self) -> PointKey {
        PointKey {
            x: self.x.to_bits(),
            y: self.y.to_bits(),
        }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Exact identity of a point: the bit patterns of its coordinates.
///
/// Used where the game wants set semantics over points (the disabled
/// set, the pending selection). Board layouts hand out each point with
/// one stable representation, so bit equality is identity there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointKey {
    x: u64,
    y: u64,
}

impl PointKey {
    /// Reconstructs the point this key was taken from.
    pub fn point(self) -> Point {
        Point {
            x: f64::from_bits(self.x),
            y: f64::from_bits(self.y),
        }
    }
}

impl From<Point> for PointKey {
    fn from(point: Point) -> Self {
        point.key()
    }
}

/// Arrangement of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The triple encloses no meaningful area.
    Collinear,
    /// Positive signed area.
    Clockwise,
    /// Negative signed area.
    CounterClockwise,
}

/// Computes the orientation of the triple `(p, q, r)`.
///
/// Returns [`Orientation::Collinear`] when the signed area is below
/// [`COLLINEAR_TOLERANCE`] or below [`MIN_AREA_TOLERANCE`]. The two
/// thresholds are layered on purpose: the first catches genuine
/// collinearity, the second rejects triangles too thin to be visually
/// distinct from a line at board scale.
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let area = (p.x * (q.y - r.y) + q.x * (r.y - p.y) + r.x * (p.y - q.y)) / 2.0;

    if area.abs() < COLLINEAR_TOLERANCE || area.abs() < MIN_AREA_TOLERANCE {
        return Orientation::Collinear;
    }
    if area > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// A line segment with canonically ordered endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    left: Point,
    right: Point,
}

impl Segment {
    /// Creates a segment, storing the endpoint with the smaller x
    /// coordinate as `left`.
    pub fn new(a: Point, b: Point) -> Self {
        if a.x <= b.x {
            Self { left: a, right: b }
        } else {
            Self { left: b, right: a }
        }
    }

    /// The endpoint with the smaller x coordinate.
    pub fn left(&self) -> Point {
        self.left
    }

    /// The endpoint with the larger x coordinate.
    pub fn right(&self) -> Point {
        self.right
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.left.distance(self.right)
    }

    fn shares_endpoint(&self, other: &Segment) -> bool {
        let ends = [self.left.key(), self.right.key()];
        ends.contains(&other.left.key()) || ends.contains(&other.right.key())
    }
}

/// Tests whether two segments cross.
///
/// General case: the endpoints of each segment straddle the other, as
/// witnessed by the four orientation triples. Degenerate case: when all
/// four triples are collinear, the segments intersect iff their
/// bounding boxes overlap on both axes (with [`OVERLAP_EPSILON`] slack
/// so touching counts).
///
/// Segments that share an endpoint exactly are classified as
/// non-intersecting; reuse of a claimed vertex is a usability
/// violation, caught before any intersection test runs.
pub fn segments_intersect(s1: &Segment, s2: &Segment) -> bool {
    if s1.shares_endpoint(s2) {
        return false;
    }

    let o1 = orientation(s1.left, s1.right, s2.left);
    let o2 = orientation(s1.left, s1.right, s2.right);
    let o3 = orientation(s2.left, s2.right, s1.left);
    let o4 = orientation(s2.left, s2.right, s1.right);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear segments: crossing means overlapping extents.
    if o1 == Orientation::Collinear && o2 == Orientation::Collinear {
        let overlap_x =
            s1.left.x.max(s2.left.x) <= s1.right.x.min(s2.right.x) + OVERLAP_EPSILON;
        let overlap_y =
            s1.left.y.max(s2.left.y) <= s1.right.y.min(s2.right.y) + OVERLAP_EPSILON;
        return overlap_x && overlap_y;
    }

    false
}

/// Tests whether `point` lies on `segment`, within
/// [`EDGE_DISTANCE_TOLERANCE`].
///
/// Degenerate segments (shorter than the tolerance) match nothing.
/// Otherwise the point must be within tolerance of the infinite line
/// and its projection must fall between the endpoints.
pub fn point_on_segment(point: Point, segment: &Segment) -> bool {
    let left = segment.left;
    let right = segment.right;
    let length = segment.length();

    if length < EDGE_DISTANCE_TOLERANCE {
        return false;
    }

    let distance = ((right.y - left.y) * point.x - (right.x - left.x) * point.y
        + right.x * left.y
        - right.y * left.x)
        .abs()
        / length;
    if distance > EDGE_DISTANCE_TOLERANCE {
        return false;
    }

    let projection = ((point.x - left.x) * (right.x - left.x)
        + (point.y - left.y) * (right.y - left.y))
        / length;
    (0.0..=length).contains(&projection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_orientation_antisymmetric_under_reversal() {
        let p = Point::new(100.0, 100.0);
        let q = Point::new(300.0, 100.0);
        let r = Point::new(200.0, 300.0);

        let forward = orientation(p, q, r);
        let reversed = orientation(r, q, p);
        match forward {
            Orientation::Clockwise => assert_eq!(reversed, Orientation::CounterClockwise),
            Orientation::CounterClockwise => assert_eq!(reversed, Orientation::Clockwise),
            Orientation::Collinear => assert_eq!(reversed, Orientation::Collinear),
        }
    }

    #[test]
    fn test_orientation_collinear_on_exact_line() {
        let p = Point::new(0.0, 0.0);
        let q = Point::new(50.0, 0.0);
        let r = Point::new(100.0, 0.0);
        assert_eq!(orientation(p, q, r), Orientation::Collinear);
    }

    #[test]
    fn test_orientation_rejects_sliver_triangle() {
        // Non-degenerate but far below the minimum-area gate.
        let p = Point::new(0.0, 0.0);
        let q = Point::new(100.0, 1.0);
        let r = Point::new(200.0, 2.5);
        assert_eq!(orientation(p, q, r), Orientation::Collinear);
    }

    #[test]
    fn test_orientation_never_collinear_for_large_triangle() {
        let a = Point::new(100.0, 100.0);
        let b = Point::new(300.0, 100.0);
        let c = Point::new(200.0, 300.0);
        for (p, q, r) in [(a, b, c), (b, c, a), (c, a, b), (a, c, b), (c, b, a), (b, a, c)] {
            assert_ne!(orientation(p, q, r), Orientation::Collinear);
        }
    }

    #[test]
    fn test_segment_canonicalizes_endpoints() {
        let a = Point::new(300.0, 50.0);
        let b = Point::new(100.0, 200.0);
        let segment = Segment::new(a, b);
        assert_relative_eq!(segment.left().x, 100.0);
        assert_relative_eq!(segment.right().x, 300.0);
        assert!(segment.left().x <= segment.right().x);
    }

    #[test]
    fn test_crossing_segments_intersect() {
        let s1 = Segment::new(Point::new(100.0, 100.0), Point::new(300.0, 300.0));
        let s2 = Segment::new(Point::new(100.0, 300.0), Point::new(300.0, 100.0));
        assert!(segments_intersect(&s1, &s2));
    }

    #[test]
    fn test_disjoint_segments_do_not_intersect() {
        let s1 = Segment::new(Point::new(100.0, 100.0), Point::new(200.0, 100.0));
        let s2 = Segment::new(Point::new(100.0, 300.0), Point::new(200.0, 350.0));
        assert!(!segments_intersect(&s1, &s2));
    }

    #[test]
    fn test_intersection_is_symmetric() {
        let pairs = [
            (
                Segment::new(Point::new(100.0, 100.0), Point::new(300.0, 300.0)),
                Segment::new(Point::new(100.0, 300.0), Point::new(300.0, 100.0)),
            ),
            (
                Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
                Segment::new(Point::new(0.0, 50.0), Point::new(100.0, 50.0)),
            ),
            (
                Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
                Segment::new(Point::new(50.0, 0.0), Point::new(150.0, 0.0)),
            ),
        ];
        for (s1, s2) in pairs {
            assert_eq!(segments_intersect(&s1, &s2), segments_intersect(&s2, &s1));
        }
    }

    #[test]
    fn test_collinear_overlapping_segments_intersect() {
        let s1 = Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let s2 = Segment::new(Point::new(50.0, 0.0), Point::new(150.0, 0.0));
        assert!(segments_intersect(&s1, &s2));
    }

    #[test]
    fn test_collinear_disjoint_segments_do_not_intersect() {
        let s1 = Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let s2 = Segment::new(Point::new(200.0, 0.0), Point::new(300.0, 0.0));
        assert!(!segments_intersect(&s1, &s2));
    }

    #[test]
    fn test_shared_endpoint_is_not_an_intersection() {
        let shared = Point::new(100.0, 100.0);
        let s1 = Segment::new(shared, Point::new(300.0, 100.0));
        let s2 = Segment::new(shared, Point::new(200.0, 300.0));
        assert!(!segments_intersect(&s1, &s2));
    }

    #[test]
    fn test_point_on_segment_interior() {
        let segment = Segment::new(Point::new(100.0, 100.0), Point::new(300.0, 100.0));
        assert!(point_on_segment(Point::new(200.0, 100.0), &segment));
        assert!(point_on_segment(Point::new(200.0, 102.0), &segment));
    }

    #[test]
    fn test_point_off_segment() {
        let segment = Segment::new(Point::new(100.0, 100.0), Point::new(300.0, 100.0));
        assert!(!point_on_segment(Point::new(200.0, 110.0), &segment));
        // On the infinite line but beyond the endpoints.
        assert!(!point_on_segment(Point::new(400.0, 100.0), &segment));
    }

    #[test]
    fn test_degenerate_segment_matches_nothing() {
        let segment = Segment::new(Point::new(100.0, 100.0), Point::new(101.0, 100.0));
        assert!(!point_on_segment(Point::new(100.5, 100.0), &segment));
    }

    #[test]
    fn test_point_key_round_trips() {
        let point = Point::new(222.2222222222, -0.5);
        assert_eq!(point.key().point(), point);
        assert_eq!(point.key(), point.key());
        assert_ne!(point.key(), Point::new(222.2222222223, -0.5).key());
    }

    #[test]
    fn test_approx_eq_uses_vertex_tolerance() {
        let point = Point::new(100.0, 100.0);
        assert!(point.approx_eq(Point::new(101.0, 99.5)));
        assert!(!point.approx_eq(Point::new(103.0, 100.0)));
    }
}
