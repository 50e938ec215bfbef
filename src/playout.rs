//! Monte Carlo playouts (random game completion).
//!
//! A playout copies the position, fills every empty cell with alternating
//! stones in a random order and reports who connected. Since Hex has no draws
//! and filling the board is the same as playing to the end, no move-by-move
//! win check is needed during the fill.
//!
//! Callers pass in their own generator. Nothing here touches global state, so
//! playouts on different threads only need different `Rng` instances.

use crate::board::{Board, Color};

/// Play one random game to the end from `board` and return the winner.
///
/// `board` itself is not modified.
pub fn simulate(board: &Board, rng: &mut fastrand::Rng) -> Color {
    let mut scratch = board.clone();
    scratch.random_complete(rng);
    // A full board is won by exactly one side.
    if scratch.is_won(Color::Blue) {
        Color::Blue
    } else {
        Color::Red
    }
}

/// Run `trials` playouts from `board` and count the ones `color` wins.
pub fn count_wins(board: &Board, color: Color, trials: u32, rng: &mut fastrand::Rng) -> u32 {
    let mut wins = 0;
    for _ in 0..trials {
        if simulate(board, rng) == color {
            wins += 1;
        }
    }
    wins
}
