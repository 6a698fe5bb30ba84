//! The Triba game engine: selection state machine, turn tracking, and
//! the dynamic-disable policy.
//!
//! One input (a point selection) is processed to completion before the
//! next is accepted; there is no background work. The only
//! non-determinism is the dynamic variant's randomness, injected as an
//! [`Rng`] so tests can replay fixed sequences.

use crate::geometry::{Point, PointKey};
use crate::layout::Layout;
use crate::rules;
use crate::rules::{Legality, RejectReason};
use crate::triangle::Triangle;
use crate::types::{GameStatus, Player, Variant};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Result of feeding one point selection to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// The input was a bad click: the game is over, the point is not
    /// on the board, or the point is already out of play. Nothing
    /// changed; no turn was lost.
    Ignored,
    /// The point joined the pending selection.
    SelectionUpdated {
        /// How many points are now selected (1 or 2).
        selected: usize,
    },
    /// The completed triple was illegal; the selection cleared and the
    /// turn passed to the opponent.
    MoveRejected(RejectReason),
    /// The triangle was committed and the turn passed to the opponent.
    MoveAccepted(Triangle),
    /// The triangle was committed and no legal move remains: the
    /// committing player wins.
    GameEnded {
        /// The last player to move.
        winner: Player,
        /// The final committed triangle.
        triangle: Triangle,
    },
}

/// When the next disable event fires and how many dots it withdraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DisableSchedule {
    next_disable_move: u32,
    dots_to_disable: u32,
}

impl DisableSchedule {
    /// Samples a schedule relative to the given move count: the event
    /// fires 1-2 moves later and withdraws 2-5 dots.
    fn sample<R: Rng>(rng: &mut R, after_move: u32) -> Self {
        Self {
            next_disable_move: after_move + rng.random_range(1..=2),
            dots_to_disable: rng.random_range(2..=5),
        }
    }
}

/// A Triba game in progress.
///
/// Holds the full point set from its [`Layout`], the claimed
/// triangles, the disabled set, and the pending selection. Generic
/// over the random source driving the dynamic variant; [`Game::new`]
/// uses OS entropy, tests inject a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct Game<R: Rng = StdRng> {
    points: Vec<Point>,
    variant: Variant,
    current_player: Player,
    selected: Vec<Point>,
    triangles: Vec<Triangle>,
    disabled: HashSet<PointKey>,
    move_count: u32,
    game_count: u32,
    game_over: bool,
    winner: Option<Player>,
    schedule: Option<DisableSchedule>,
    rng: R,
}

impl Game<StdRng> {
    /// Creates a new game on the given board, player A to move.
    pub fn new(layout: &dyn Layout, variant: Variant) -> Self {
        Self::with_rng(layout, variant, StdRng::from_os_rng())
    }
}

impl<R: Rng> Game<R> {
    /// Creates a new game with an injected random source.
    pub fn with_rng(layout: &dyn Layout, variant: Variant, mut rng: R) -> Self {
        let schedule = match variant {
            Variant::Dynamic => Some(DisableSchedule::sample(&mut rng, 0)),
            Variant::Standard => None,
        };
        Self {
            points: layout.points(),
            variant,
            current_player: Player::A,
            selected: Vec::new(),
            triangles: Vec::new(),
            disabled: HashSet::new(),
            move_count: 0,
            game_count: 0,
            game_over: false,
            winner: None,
            schedule,
            rng,
        }
    }

    /// Feeds one point selection to the engine.
    ///
    /// Unusable points are ignored rather than rejected: a bad click
    /// costs nothing, only a completed illegal triple costs the turn.
    /// The third selected point triggers validation; on acceptance the
    /// triangle is committed, the turn passes, and the terminal check
    /// runs for the incoming player.
    #[instrument(skip(self))]
    pub fn select_point(&mut self, point: Point) -> SelectionOutcome {
        if self.game_over {
            debug!("input after game over ignored");
            return SelectionOutcome::Ignored;
        }
        if !self.points.iter().any(|p| p.key() == point.key()) {
            warn!("selection is not a board point");
            return SelectionOutcome::Ignored;
        }
        if rules::is_point_used(point, &self.triangles, &self.disabled) {
            debug!("point already used");
            return SelectionOutcome::Ignored;
        }

        // Re-selecting a pending point is a no-op.
        if !self.selected.iter().any(|p| p.key() == point.key()) {
            self.selected.push(point);
        }
        if self.selected.len() < 3 {
            return SelectionOutcome::SelectionUpdated {
                selected: self.selected.len(),
            };
        }

        let candidate = [self.selected[0], self.selected[1], self.selected[2]];
        self.selected.clear();

        match rules::validate_move(&candidate, &self.triangles, &self.disabled) {
            Legality::Rejected(reason) => {
                warn!(player = ?self.current_player, %reason, "invalid move, turn passes");
                self.current_player = self.current_player.opponent();
                SelectionOutcome::MoveRejected(reason)
            }
            Legality::Legal => self.commit(candidate),
        }
    }

    /// Commits a validated triangle and advances the game.
    fn commit(&mut self, candidate: [Point; 3]) -> SelectionOutcome {
        let triangle = Triangle::from_vertices(candidate, self.current_player);
        self.triangles.push(triangle.clone());
        self.move_count += 1;
        debug!(player = ?self.current_player, move_count = self.move_count, "triangle committed");

        if let Some(schedule) = self.schedule.take() {
            if schedule.next_disable_move == self.move_count {
                self.disable_random_dots(schedule.dots_to_disable);
                self.schedule = Some(DisableSchedule::sample(&mut self.rng, self.move_count));
            } else {
                self.schedule = Some(schedule);
            }
        }

        let last_player = self.current_player;
        self.current_player = last_player.opponent();

        if !rules::is_move_possible(&self.points, &self.triangles, &self.disabled) {
            self.game_over = true;
            self.winner = Some(last_player);
            debug!(winner = ?last_player, "no move remains, game over");
            SelectionOutcome::GameEnded {
                winner: last_player,
                triangle,
            }
        } else {
            SelectionOutcome::MoveAccepted(triangle)
        }
    }

    /// Withdraws up to `count` random unused dots from play. Sampling
    /// halts while 3 or fewer unused dots remain, so a final move is
    /// never disabled away.
    fn disable_random_dots(&mut self, count: u32) {
        let mut unused = rules::unused_points(&self.points, &self.triangles, &self.disabled);
        if unused.len() <= 3 {
            return;
        }
        for _ in 0..count {
            if unused.len() <= 3 {
                break;
            }
            let index = self.rng.random_range(0..unused.len());
            let dot = unused.remove(index);
            self.disabled.insert(dot.key());
            debug!(x = dot.x, y = dot.y, "dot disabled");
        }
    }

    /// Restores the initial state for the next game on the same board.
    ///
    /// The starting player alternates across games: game N starts with
    /// player A when N is even, B when odd.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.triangles.clear();
        self.selected.clear();
        self.disabled.clear();
        self.move_count = 0;
        self.game_over = false;
        self.winner = None;
        self.game_count += 1;
        self.current_player = if self.game_count % 2 == 0 {
            Player::A
        } else {
            Player::B
        };
        if self.variant == Variant::Dynamic {
            self.schedule = Some(DisableSchedule::sample(&mut self.rng, 0));
        }
        debug!(game = self.game_count, starts = ?self.current_player, "game reset");
    }

    /// The player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The committed triangles, in commit order.
    pub fn claimed(&self) -> &[Triangle] {
        &self.triangles
    }

    /// The points withdrawn from play by the dynamic variant.
    pub fn disabled_points(&self) -> Vec<Point> {
        self.disabled.iter().map(|key| key.point()).collect()
    }

    /// The pending selection for the current turn.
    pub fn selection(&self) -> &[Point] {
        &self.selected
    }

    /// Every point on the board.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The points still available for play.
    pub fn unused_points(&self) -> Vec<Point> {
        rules::unused_points(&self.points, &self.triangles, &self.disabled)
    }

    /// Whether the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The winner, once the game has ended.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Current status as a single value.
    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(player) if self.game_over => GameStatus::Won(player),
            _ => GameStatus::InProgress,
        }
    }

    /// Committed moves this game.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// How many games have been completed before this one.
    pub fn games_played(&self) -> u32 {
        self.game_count
    }

    /// The board variant in effect.
    pub fn variant(&self) -> Variant {
        self.variant
    }
}
