//! Engine defaults and console limits.
//!
//! The board size is chosen at runtime, so nothing here depends on it.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest board size offered by the interactive prompt.
pub const MIN_PROMPT_DIM: usize = 5;

/// Largest board size offered by the interactive prompt.
pub const MAX_PROMPT_DIM: usize = 11;

/// Board size used by `selfplay` when none is given.
pub const DEFAULT_DIM: usize = 7;

/// Offsets `(dr, dc)` to the six hex neighbors of a cell.
/// Order: West, North, North-East, East, South, South-West.
pub const HEX_OFFSETS: [(isize, isize); 6] = [
    (0, -1), // West
    (-1, 0), // North
    (-1, 1), // North-East
    (0, 1),  // East
    (1, 0),  // South
    (1, -1), // South-West
];

// =============================================================================
// Monte Carlo Parameters
// =============================================================================

/// Random playouts run for every candidate move.
pub const TRIALS_PER_CANDIDATE: u32 = 10_000;
