//! Move legality rules and terminal-state detection.
//!
//! Free functions over the current claimed-triangle set and disabled
//! points; all state lives in [`crate::game::Game`].

use crate::geometry::{
    orientation, point_on_segment, segments_intersect, Orientation, Point, PointKey, Segment,
};
use crate::triangle::Triangle;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Why a candidate move was rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum RejectReason {
    /// A candidate point is disabled or already part of a triangle.
    #[display("cannot use points that are already part of a triangle")]
    AlreadyUsed,
    /// The candidate points are collinear.
    #[display("points cannot be collinear")]
    Collinear,
    /// A candidate edge crosses an existing triangle's edge.
    #[display("triangle cannot intersect with existing triangles")]
    IntersectsExisting,
}

/// Verdict of the move validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Legality {
    /// The candidate triangle may be committed.
    Legal,
    /// The candidate triangle is illegal; the mover loses the turn.
    Rejected(RejectReason),
}

/// Tests whether a point is out of play: in the disabled set (exact
/// identity), coinciding with a claimed vertex (tolerance identity),
/// or lying on a claimed edge.
pub fn is_point_used(
    point: Point,
    claimed: &[Triangle],
    disabled: &HashSet<PointKey>,
) -> bool {
    if disabled.contains(&point.key()) {
        return true;
    }
    claimed.iter().any(|triangle| {
        let is_vertex = triangle.points().iter().any(|vertex| vertex.approx_eq(point));
        let is_on_edge = triangle
            .segments()
            .iter()
            .any(|segment| point_on_segment(point, segment));
        is_vertex || is_on_edge
    })
}

/// Validates a candidate triple against the current position.
///
/// Checks run in order and short-circuit: usability first (the most
/// specific diagnostic when violations co-occur), then collinearity,
/// then intersection with claimed edges.
#[instrument(skip(claimed, disabled))]
pub fn validate_move(
    candidate: &[Point; 3],
    claimed: &[Triangle],
    disabled: &HashSet<PointKey>,
) -> Legality {
    if candidate
        .iter()
        .any(|&point| is_point_used(point, claimed, disabled))
    {
        debug!("candidate uses an occupied or disabled point");
        return Legality::Rejected(RejectReason::AlreadyUsed);
    }

    if orientation(candidate[0], candidate[1], candidate[2]) == Orientation::Collinear {
        debug!("candidate points are collinear");
        return Legality::Rejected(RejectReason::Collinear);
    }

    if intersects_claimed(&candidate_segments(candidate), claimed) {
        debug!("candidate crosses an existing triangle");
        return Legality::Rejected(RejectReason::IntersectsExisting);
    }

    Legality::Legal
}

/// Derives the three edges of a candidate triple.
fn candidate_segments(candidate: &[Point; 3]) -> [Segment; 3] {
    [
        Segment::new(candidate[0], candidate[1]),
        Segment::new(candidate[1], candidate[2]),
        Segment::new(candidate[2], candidate[0]),
    ]
}

/// Tests the candidate edges against every edge of every claimed
/// triangle.
fn intersects_claimed(segments: &[Segment; 3], claimed: &[Triangle]) -> bool {
    segments.iter().any(|candidate| {
        claimed
            .iter()
            .flat_map(|triangle| triangle.segments())
            .any(|existing| segments_intersect(candidate, existing))
    })
}

/// Collects the points still in play.
pub fn unused_points(
    points: &[Point],
    claimed: &[Triangle],
    disabled: &HashSet<PointKey>,
) -> Vec<Point> {
    points
        .iter()
        .copied()
        .filter(|&point| !is_point_used(point, claimed, disabled))
        .collect()
}

/// Exhaustive terminal-state check: is any legal triangle still
/// available?
///
/// Enumerates every unordered triple of unused points and accepts the
/// first that is non-collinear and crosses nothing. O(U^3) geometry
/// tests over U unused points; boards stay small and this runs once
/// per committed move.
#[instrument(skip_all, fields(points = points.len(), claimed = claimed.len()))]
pub fn is_move_possible(
    points: &[Point],
    claimed: &[Triangle],
    disabled: &HashSet<PointKey>,
) -> bool {
    let unused = unused_points(points, claimed, disabled);
    if unused.len() < 3 {
        debug!("fewer than 3 points available");
        return false;
    }

    for i in 0..unused.len() - 2 {
        for j in i + 1..unused.len() - 1 {
            for k in j + 1..unused.len() {
                let triple = [unused[i], unused[j], unused[k]];
                if orientation(triple[0], triple[1], triple[2]) != Orientation::Collinear
                    && !intersects_claimed(&candidate_segments(&triple), claimed)
                {
                    return true;
                }
            }
        }
    }
    debug!("no legal triangle remains");
    false
}
