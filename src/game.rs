//! Console game session.
//!
//! Handles the conversation with a human player over any line-based reader
//! and writer: board size and color prompts, move entry, engine replies and
//! the final result. Moves are entered as `row col`, 1-indexed, with `1 1`
//! the top-left corner.
//!
//! ## Example
//!
//! ```no_run
//! use std::io;
//! use hex_mc::board::{Board, Color};
//! use hex_mc::game::Session;
//! use hex_mc::selector::MoveSelector;
//!
//! let mut session = Session::new(io::stdin().lock(), io::stdout());
//! let mut board = Board::new(7);
//! let mut selector = MoveSelector::default();
//! session.play(&mut board, Color::Blue, &mut selector).unwrap();
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};

use crate::board::{Board, Cell, Color, MoveError};
use crate::constants::{MAX_PROMPT_DIM, MIN_PROMPT_DIM};
use crate::selector::MoveSelector;

/// Rejected console input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("expected two numbers `row col`, got {0:?}")]
    Malformed(String),

    #[error("{row} {col} is off the board; rows and columns run from 1 to {dim}")]
    OutOfRange { row: usize, col: usize, dim: usize },

    #[error("expected a board size, got {0:?}")]
    NotASize(String),

    #[error("board size must be between {min} and {max}, got {got}")]
    SizeOutOfRange { got: usize, min: usize, max: usize },

    #[error("expected `b` or `r`, got {0:?}")]
    UnknownColor(String),
}

/// Parse a 1-indexed `row col` pair into a board cell.
pub fn parse_move(line: &str, dim: usize) -> Result<Cell, InputError> {
    let malformed = || InputError::Malformed(line.trim().to_string());
    let mut parts = line.split_whitespace();
    let (Some(r), Some(c), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let row: usize = r.parse().map_err(|_| malformed())?;
    let col: usize = c.parse().map_err(|_| malformed())?;

    if !(1..=dim).contains(&row) || !(1..=dim).contains(&col) {
        return Err(InputError::OutOfRange { row, col, dim });
    }
    Ok((row - 1, col - 1))
}

/// Parse a board size in the range offered by the prompt.
pub fn parse_size(line: &str) -> Result<usize, InputError> {
    let line = line.trim();
    let dim: usize = line
        .parse()
        .map_err(|_| InputError::NotASize(line.to_string()))?;
    if !(MIN_PROMPT_DIM..=MAX_PROMPT_DIM).contains(&dim) {
        return Err(InputError::SizeOutOfRange {
            got: dim,
            min: MIN_PROMPT_DIM,
            max: MAX_PROMPT_DIM,
        });
    }
    Ok(dim)
}

/// Parse `b`/`blue` or `r`/`red`, case-insensitive.
pub fn parse_color(line: &str) -> Result<Color, InputError> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "b" | "blue" => Ok(Color::Blue),
        "r" | "red" => Ok(Color::Red),
        _ => Err(InputError::UnknownColor(line.to_string())),
    }
}

/// A console conversation with one human player.
pub struct Session<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Read one line; running out of input ends the session with an error.
    fn read_line(&mut self) -> Result<String> {
        self.out.flush().context("failed to flush output")?;
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if n == 0 {
            bail!("input closed before the game finished");
        }
        Ok(line)
    }

    pub fn banner(&mut self) -> Result<()> {
        writeln!(self.out, "Let's play a game of Hex!")?;
        writeln!(self.out, "Blue wins by connecting east to west.")?;
        writeln!(self.out, "Red wins by connecting north to south.")?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Prompt until a valid board size is entered.
    pub fn ask_size(&mut self) -> Result<usize> {
        loop {
            writeln!(
                self.out,
                "What size board?  Enter a number {MIN_PROMPT_DIM}-{MAX_PROMPT_DIM}."
            )?;
            match parse_size(&self.read_line()?) {
                Ok(dim) => return Ok(dim),
                Err(e) => writeln!(self.out, "{e}")?,
            }
        }
    }

    /// Prompt until the human picks a color.
    pub fn ask_color(&mut self) -> Result<Color> {
        writeln!(
            self.out,
            "Which color would you like - blue or red? (blue goes first)"
        )?;
        loop {
            writeln!(self.out, "Enter your choice (b/r):")?;
            match parse_color(&self.read_line()?) {
                Ok(color) => {
                    let name = match color {
                        Color::Blue => "Blue",
                        Color::Red => "Red",
                    };
                    writeln!(self.out, "{name} it is!")?;
                    return Ok(color);
                }
                Err(_) => writeln!(self.out, "Invalid input.")?,
            }
        }
    }

    /// Prompt until the human enters a legal move, then play it.
    pub fn ask_move(&mut self, board: &mut Board) -> Result<Cell> {
        loop {
            writeln!(self.out, "Enter your move (row col):")?;
            writeln!(self.out, "Note: the top left corner is 1 1")?;
            let line = self.read_line()?;
            let cell = match parse_move(&line, board.dim()) {
                Ok(cell) => cell,
                Err(e) => {
                    writeln!(self.out, "Invalid input, try again. {e}")?;
                    continue;
                }
            };
            match board.apply_move(cell) {
                Ok(()) => return Ok(cell),
                Err(MoveError::Occupied { .. }) => {
                    writeln!(self.out, "Illegal move!  Try again.")?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn engine_move(&mut self, board: &mut Board, selector: &mut MoveSelector) -> Result<()> {
        let choice = selector.choose_move(board)?;
        let (row, col) = choice.display_cell();
        writeln!(self.out, "The computer chooses move {row} {col}")?;
        writeln!(
            self.out,
            "win % after {} simulations: {:.2}%",
            choice.trials,
            choice.win_rate() * 100.0
        )?;
        Ok(())
    }

    /// Human against engine until someone connects. Returns the winner.
    ///
    /// If it is not the human's turn on entry, the engine moves first.
    pub fn play(
        &mut self,
        board: &mut Board,
        human: Color,
        selector: &mut MoveSelector,
    ) -> Result<Color> {
        if board.winner().is_none() && board.to_move() != human {
            self.engine_move(board, selector)?;
        }

        let winner = loop {
            if let Some(winner) = board.winner() {
                break winner;
            }
            write!(self.out, "{board}")?;
            self.ask_move(board)?;
            if board.is_won(human) {
                break human;
            }
            self.engine_move(board, selector)?;
        };

        self.game_over(board, winner)?;
        Ok(winner)
    }

    /// Engine against itself until someone connects. Returns the winner.
    pub fn self_play(&mut self, board: &mut Board, selector: &mut MoveSelector) -> Result<Color> {
        let winner = loop {
            if let Some(winner) = board.winner() {
                break winner;
            }
            let choice = selector.choose_move(board)?;
            let (row, col) = choice.display_cell();
            writeln!(
                self.out,
                "{} plays {row} {col} ({:.2}% of {} playouts won)",
                choice.color,
                choice.win_rate() * 100.0,
                choice.trials
            )?;
        };

        self.game_over(board, winner)?;
        Ok(winner)
    }

    fn game_over(&mut self, board: &Board, winner: Color) -> Result<()> {
        write!(self.out, "{board}")?;
        writeln!(self.out, "Game over.  The winner is ... {winner}!")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(input: &str) -> Session<&[u8], Vec<u8>> {
        Session::new(input.as_bytes(), Vec::new())
    }

    fn output(session: &Session<&[u8], Vec<u8>>) -> String {
        String::from_utf8(session.out.clone()).unwrap()
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("1 1", 5), Ok((0, 0)));
        assert_eq!(parse_move("  5 3\n", 5), Ok((4, 2)));
    }

    #[test]
    fn test_parse_move_malformed() {
        assert!(matches!(parse_move("", 5), Err(InputError::Malformed(_))));
        assert!(matches!(parse_move("3", 5), Err(InputError::Malformed(_))));
        assert!(matches!(parse_move("a b", 5), Err(InputError::Malformed(_))));
        assert!(matches!(parse_move("1 2 3", 5), Err(InputError::Malformed(_))));
        assert!(matches!(parse_move("-1 2", 5), Err(InputError::Malformed(_))));
    }

    #[test]
    fn test_parse_move_out_of_range() {
        assert_eq!(
            parse_move("0 1", 5),
            Err(InputError::OutOfRange { row: 0, col: 1, dim: 5 })
        );
        assert_eq!(
            parse_move("2 6", 5),
            Err(InputError::OutOfRange { row: 2, col: 6, dim: 5 })
        );
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("7\n"), Ok(7));
        assert!(matches!(
            parse_size("4"),
            Err(InputError::SizeOutOfRange { got: 4, .. })
        ));
        assert!(matches!(
            parse_size("12"),
            Err(InputError::SizeOutOfRange { got: 12, .. })
        ));
        assert_eq!(parse_size("big"), Err(InputError::NotASize("big".into())));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("b"), Ok(Color::Blue));
        assert_eq!(parse_color("RED\n"), Ok(Color::Red));
        assert!(parse_color("g").is_err());
    }

    #[test]
    fn test_ask_size_reprompts() {
        let mut s = session("3\nnine\n9\n");
        assert_eq!(s.ask_size().unwrap(), 9);
        assert_eq!(output(&s).matches("What size board?").count(), 3);
    }

    #[test]
    fn test_ask_color_reprompts() {
        let mut s = session("x\nr\n");
        assert_eq!(s.ask_color().unwrap(), Color::Red);
        let out = output(&s);
        assert!(out.contains("Invalid input."));
        assert!(out.contains("Red it is!"));
    }

    #[test]
    fn test_ask_move_rejects_occupied() {
        let mut board = Board::new(3);
        board.apply_move((0, 0)).unwrap();
        let mut s = session("1 1\n4 4\n2 2\n");
        assert_eq!(s.ask_move(&mut board).unwrap(), (1, 1));
        assert_eq!(board.get((1, 1)), Some(Color::Red));
        let out = output(&s);
        assert!(out.contains("Illegal move!  Try again."));
        assert!(out.contains("Invalid input, try again."));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut board = Board::new(3);
        let mut s = session("");
        assert!(s.ask_move(&mut board).is_err());
        assert_eq!(board, Board::new(3));
    }

    #[test]
    fn test_scripted_game_finishes() {
        // The human tries every cell in order; taken cells are refused.
        let dim = 3;
        let script: String = (1..=dim)
            .flat_map(|r| (1..=dim).map(move |c| format!("{r} {c}\n")))
            .collect();

        for human in [Color::Blue, Color::Red] {
            let mut s = session(&script);
            let mut board = Board::new(dim);
            let mut selector = MoveSelector::with_trials(20, 8);
            let winner = s.play(&mut board, human, &mut selector).unwrap();

            assert_eq!(board.winner(), Some(winner));
            let out = output(&s);
            assert!(out.contains("The computer chooses move"));
            assert!(out.ends_with(&format!("Game over.  The winner is ... {winner}!\n")));
        }
    }

    #[test]
    fn test_self_play_finishes() {
        let mut s = session("");
        let mut board = Board::new(4);
        let mut selector = MoveSelector::with_trials(30, 4);
        let winner = s.self_play(&mut board, &mut selector).unwrap();
        assert_eq!(board.winner(), Some(winner));
        assert!(output(&s).contains("BLUE plays"));
    }
}
