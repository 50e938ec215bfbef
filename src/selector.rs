//! Flat Monte Carlo move selection.
//!
//! Every empty cell is a candidate. For each one the selector plays the
//! candidate, runs a fixed number of random playouts from the resulting
//! position and counts how many the player who placed it goes on to win. The
//! candidate with the most wins is played. There is no search tree: each
//! candidate is judged one ply deep.
//!
//! Candidates are visited in row-major order and ties go to the first one
//! seen, so a fixed seed gives a reproducible choice. Each candidate draws its
//! playouts from its own generator, seeded from the selector's generator before
//! any playout starts; serial and parallel evaluation therefore agree.

use std::time::Instant;

use log::{debug, info};

use crate::board::{Board, Cell, Color, MoveError};
use crate::constants::TRIALS_PER_CANDIDATE;
use crate::playout::count_wins;

/// Tuning for [`MoveSelector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Playouts per candidate move
    pub trials_per_candidate: u32,
    /// Evaluate candidates on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
    /// Seed for the selector's generator; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trials_per_candidate: TRIALS_PER_CANDIDATE,
            parallel: cfg!(feature = "parallel"),
            seed: None,
        }
    }
}

/// Playout result for one candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidateStats {
    pub cell: Cell,
    /// Playouts won by the player who placed `cell`
    pub wins: u32,
    pub trials: u32,
}

impl CandidateStats {
    pub fn win_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.wins as f64 / self.trials as f64
        }
    }
}

/// The move the selector played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveChoice {
    pub cell: Cell,
    pub color: Color,
    pub wins: u32,
    pub trials: u32,
}

impl MoveChoice {
    /// Fraction of playouts won after this move, in `[0, 1]`.
    pub fn win_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.wins as f64 / self.trials as f64
        }
    }

    /// The chosen cell in 1-indexed `(row, col)` form for display.
    pub fn display_cell(&self) -> (usize, usize) {
        (self.cell.0 + 1, self.cell.1 + 1)
    }
}

/// Picks moves by flat Monte Carlo evaluation.
///
/// Owns a single generator, seeded once at construction.
pub struct MoveSelector {
    config: SearchConfig,
    rng: fastrand::Rng,
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl MoveSelector {
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self { config, rng }
    }

    /// Serial selector with a fixed seed and `trials` playouts per candidate.
    pub fn with_trials(trials: u32, seed: u64) -> Self {
        Self::new(SearchConfig {
            trials_per_candidate: trials,
            parallel: false,
            seed: Some(seed),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Score every empty cell of `board` for the player to move.
    ///
    /// The result follows row-major order. `board` is not modified.
    pub fn evaluate(&mut self, board: &Board) -> Result<Vec<CandidateStats>, MoveError> {
        let trials = self.config.trials_per_candidate;
        let jobs: Vec<(Cell, u64)> = board
            .unoccupied()
            .iter()
            .map(|&cell| (cell, self.rng.u64(..)))
            .collect();

        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return evaluate_parallel(board, &jobs, trials);
            }
        }

        let mut work = board.clone();
        jobs.iter()
            .map(|&(cell, seed)| evaluate_candidate(&mut work, cell, seed, trials))
            .collect()
    }

    /// Evaluate all candidates, play the best one on `board` and return it.
    ///
    /// Fails with [`MoveError::BoardFull`] when there is nothing to play, in
    /// which case `board` is unchanged.
    pub fn choose_move(&mut self, board: &mut Board) -> Result<MoveChoice, MoveError> {
        if board.is_full() {
            return Err(MoveError::BoardFull);
        }

        let start = Instant::now();
        let mover = board.to_move();
        let stats = self.evaluate(board)?;

        let mut best: Option<CandidateStats> = None;
        for s in &stats {
            debug!(
                "candidate {} {}: {}/{} wins ({:.1}%)",
                s.cell.0 + 1,
                s.cell.1 + 1,
                s.wins,
                s.trials,
                s.win_rate() * 100.0
            );
            if best.is_none_or(|b| s.wins > b.wins) {
                best = Some(*s);
            }
        }
        let best = best.ok_or(MoveError::BoardFull)?;

        board.apply_move(best.cell)?;

        let choice = MoveChoice {
            cell: best.cell,
            color: mover,
            wins: best.wins,
            trials: best.trials,
        };
        let (row, col) = choice.display_cell();
        info!(
            "{mover} plays {row} {col}: {:.1}% over {} playouts, {} candidates in {:.2?}",
            choice.win_rate() * 100.0,
            choice.trials,
            stats.len(),
            start.elapsed()
        );
        Ok(choice)
    }
}

/// Play `cell` on `work`, run the playouts, then take the move back.
fn evaluate_candidate(
    work: &mut Board,
    cell: Cell,
    seed: u64,
    trials: u32,
) -> Result<CandidateStats, MoveError> {
    let mover = work.to_move();
    work.apply_move(cell)?;
    let mut rng = fastrand::Rng::with_seed(seed);
    let wins = count_wins(work, mover, trials, &mut rng);
    work.undo_move(cell)?;
    Ok(CandidateStats { cell, wins, trials })
}

#[cfg(feature = "parallel")]
fn evaluate_parallel(
    board: &Board,
    jobs: &[(Cell, u64)],
    trials: u32,
) -> Result<Vec<CandidateStats>, MoveError> {
    use rayon::prelude::*;

    jobs.par_iter()
        .map_init(
            || board.clone(),
            |work, &(cell, seed)| evaluate_candidate(work, cell, seed, trials),
        )
        .collect()
}
