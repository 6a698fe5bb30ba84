//! Pure game logic for Triba, a two-player territorial triangle game.
//!
//! Players alternately claim triangles over a field of points. A move
//! picks three unused, non-collinear points whose triangle crosses no
//! previously claimed edge; an illegal triple costs the mover the
//! turn, and the last player able to move wins.
//!
//! # Architecture
//!
//! - **geometry**: orientation, segment-intersection, and
//!   point-on-segment tests with fixed tolerances
//! - **triangle**: the claimed-triangle value type
//! - **layout**: pluggable board topologies (grid, concentric rings)
//! - **rules**: move legality and the exhaustive terminal-state search
//! - **game**: the selection state machine, turn tracking, and the
//!   dynamic-disable variant
//!
//! Rendering, hit-testing, and input wiring are presentation concerns;
//! the engine consumes board points and produces structured outcomes.
//!
//! # Example
//!
//! ```
//! use triba::{Game, GridLayout, SelectionOutcome, Variant};
//!
//! let layout = GridLayout::new(10);
//! let mut game = Game::new(&layout, Variant::Standard);
//! let points = game.points().to_vec();
//!
//! game.select_point(points[0]);
//! game.select_point(points[20]);
//! match game.select_point(points[2]) {
//!     SelectionOutcome::MoveAccepted(triangle) => {
//!         assert_eq!(triangle.points().len(), 3);
//!     }
//!     outcome => panic!("expected an accepted move, got {outcome:?}"),
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod geometry;
mod layout;
mod rules;
mod triangle;
mod types;

pub use game::{Game, SelectionOutcome};
pub use geometry::{
    orientation, point_on_segment, segments_intersect, Orientation, Point, PointKey, Segment,
    COLLINEAR_TOLERANCE, EDGE_DISTANCE_TOLERANCE, MIN_AREA_TOLERANCE, VERTEX_TOLERANCE,
};
pub use layout::{nearest_point, CircleLayout, GridLayout, Layout, CLICK_TOLERANCE};
pub use rules::{is_move_possible, is_point_used, unused_points, validate_move, Legality, RejectReason};
pub use triangle::{GeometryError, Triangle};
pub use types::{GameStatus, Player, Variant};
