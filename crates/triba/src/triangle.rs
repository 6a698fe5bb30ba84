//! Claimed-triangle value type.

use crate::geometry::{Point, Segment};
use crate::types::Player;
use serde::{Deserialize, Serialize};

/// Contract violation in geometry construction.
///
/// These signal caller bugs, not gameplay outcomes; gameplay
/// rejections are reported as [`crate::rules::Legality`] before any
/// triangle is built.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GeometryError {
    /// A triangle was requested from other than exactly 3 points.
    #[display("triangle requires exactly 3 points, got {}", _0)]
    InvalidPointCount(usize),
}

impl std::error::Error for GeometryError {}

/// A committed triangle: three vertices, the claiming player, and the
/// three derived edges. Immutable once claimed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    points: [Point; 3],
    owner: Player,
    segments: [Segment; 3],
}

impl Triangle {
    /// Creates a triangle from a point slice.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidPointCount`] unless the slice
    /// holds exactly 3 points.
    pub fn new(points: &[Point], owner: Player) -> Result<Self, GeometryError> {
        match points {
            &[a, b, c] => Ok(Self::from_vertices([a, b, c], owner)),
            other => Err(GeometryError::InvalidPointCount(other.len())),
        }
    }

    /// Creates a triangle from exactly three vertices.
    ///
    /// Collinearity is a gameplay concern, checked by the validator
    /// before a triangle is committed; this constructor only derives
    /// the edges.
    pub fn from_vertices(points: [Point; 3], owner: Player) -> Self {
        let segments = [
            Segment::new(points[0], points[1]),
            Segment::new(points[1], points[2]),
            Segment::new(points[2], points[0]),
        ];
        Self {
            points,
            owner,
            segments,
        }
    }

    /// The triangle's vertices.
    pub fn points(&self) -> &[Point; 3] {
        &self.points
    }

    /// The player who claimed this triangle.
    pub fn owner(&self) -> Player {
        self.owner
    }

    /// The triangle's edges, endpoints canonically ordered.
    pub fn segments(&self) -> &[Segment; 3] {
        &self.segments
    }
}
