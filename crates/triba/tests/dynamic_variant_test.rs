//! Tests for the dynamic-disable variant: injected randomness must
//! make the schedule fully deterministic under a fixed seed.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use triba::{
    validate_move, Game, GridLayout, Legality, Point, PointKey, SelectionOutcome, Variant,
};

/// Finds a currently legal triple through the public API.
fn find_legal_triple<R: rand::Rng>(game: &Game<R>) -> Option<[Point; 3]> {
    let unused = game.unused_points();
    let disabled: HashSet<PointKey> = game.disabled_points().iter().map(|p| p.key()).collect();
    for i in 0..unused.len() {
        for j in i + 1..unused.len() {
            for k in j + 1..unused.len() {
                let triple = [unused[i], unused[j], unused[k]];
                if validate_move(&triple, game.claimed(), &disabled) == Legality::Legal {
                    return Some(triple);
                }
            }
        }
    }
    None
}

/// Commits one legal move, panicking if the engine disagrees with the
/// validator.
fn play_legal_move<R: rand::Rng>(game: &mut Game<R>) {
    let triple = find_legal_triple(game).expect("a legal move should remain");
    game.select_point(triple[0]);
    game.select_point(triple[1]);
    match game.select_point(triple[2]) {
        SelectionOutcome::MoveAccepted(_) | SelectionOutcome::GameEnded { .. } => {}
        outcome => panic!("validated move was not committed: {outcome:?}"),
    }
}

#[test]
fn test_schedule_fires_within_two_moves() {
    let layout = GridLayout::new(10);
    let mut game = Game::with_rng(&layout, Variant::Dynamic, StdRng::seed_from_u64(42));

    // The first disable event is scheduled 1-2 moves in, so after two
    // committed moves at least one event has fired.
    play_legal_move(&mut game);
    play_legal_move(&mut game);

    let disabled = game.disabled_points();
    assert!(!disabled.is_empty());
    // Each event withdraws at most 5 dots.
    assert!(disabled.len() <= 10);
}

#[test]
fn test_same_seed_same_game() {
    let layout = GridLayout::new(10);
    let mut left = Game::with_rng(&layout, Variant::Dynamic, StdRng::seed_from_u64(7));
    let mut right = Game::with_rng(&layout, Variant::Dynamic, StdRng::seed_from_u64(7));

    for _ in 0..4 {
        play_legal_move(&mut left);
        play_legal_move(&mut right);
    }

    let key_set = |game: &Game<StdRng>| -> HashSet<PointKey> {
        game.disabled_points().iter().map(|p| p.key()).collect()
    };
    assert_eq!(key_set(&left), key_set(&right));
    assert_eq!(left.claimed().len(), right.claimed().len());
    assert_eq!(left.current_player(), right.current_player());
    assert_eq!(left.move_count(), right.move_count());
}

#[test]
fn test_disabled_set_only_grows_within_a_game() {
    let layout = GridLayout::new(10);
    let mut game = Game::with_rng(&layout, Variant::Dynamic, StdRng::seed_from_u64(3));

    let mut previous = 0;
    for _ in 0..3 {
        play_legal_move(&mut game);
        let now = game.disabled_points().len();
        assert!(now >= previous);
        previous = now;
    }
}

#[test]
fn test_reset_clears_disabled_points() {
    let layout = GridLayout::new(10);
    let mut game = Game::with_rng(&layout, Variant::Dynamic, StdRng::seed_from_u64(42));

    play_legal_move(&mut game);
    play_legal_move(&mut game);
    assert!(!game.disabled_points().is_empty());

    game.reset();
    assert!(game.disabled_points().is_empty());
    assert_eq!(game.move_count(), 0);
    assert!(game.claimed().is_empty());
}

#[test]
fn test_disabled_points_never_overlap_used_points() {
    let layout = GridLayout::new(10);
    let mut game = Game::with_rng(&layout, Variant::Dynamic, StdRng::seed_from_u64(11));

    for _ in 0..3 {
        play_legal_move(&mut game);
    }

    // Disabled dots are sampled from unused dots only, so none may
    // coincide with a claimed vertex.
    let vertices: Vec<Point> = game
        .claimed()
        .iter()
        .flat_map(|t| t.points().iter().copied())
        .collect();
    for disabled in game.disabled_points() {
        assert!(!vertices.iter().any(|v| v.key() == disabled.key()));
    }
}
