//! Hex-MC: a Hex player driven by flat Monte Carlo playouts.
//!
//! The engine scores every empty cell by playing it and then filling the rest
//! of the board at random many times, keeping the cell whose playouts it wins
//! most often.
//!
//! ## Modules
//!
//! - [`constants`] - Engine defaults and prompt limits
//! - [`board`] - Board state, moves, win detection and random completion
//! - [`playout`] - Random game completion for position evaluation
//! - [`selector`] - Flat Monte Carlo move selection
//! - [`game`] - Console session for human play and self-play
//!
//! ## Example
//!
//! ```
//! use hex_mc::board::{Board, Color};
//! use hex_mc::selector::MoveSelector;
//!
//! let mut board = Board::new(5);
//! board.apply_move((2, 2)).unwrap();
//!
//! // Let the engine answer with a small, seeded search
//! let mut selector = MoveSelector::with_trials(200, 7);
//! let choice = selector.choose_move(&mut board).unwrap();
//! assert_eq!(choice.color, Color::Red);
//! println!("Red plays {:?}, win rate {:.1}%", choice.display_cell(), choice.win_rate() * 100.0);
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod playout;
pub mod selector;
