use std::fmt;

use crate::Point;
use crate::game::Phase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A coordinate fell outside the board's declared dimensions.
    /// Never clamped; a clamped point would corrupt region and score
    /// computations.
    OutOfRange { point: Point, cols: u8, rows: u8 },
    /// An operation was invoked in the wrong game phase.
    InvalidPhase { expected: Phase, actual: Phase },
    /// The turn-logic collaborator refused a placement.
    RejectedMove(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfRange { point, cols, rows } => {
                write!(
                    f,
                    "point ({}, {}) outside {}x{} board",
                    point.0, point.1, cols, rows
                )
            }
            GameError::InvalidPhase { expected, actual } => {
                write!(f, "requires the {expected} phase, game is in {actual}")
            }
            GameError::RejectedMove(reason) => write!(f, "move rejected: {reason}"),
        }
    }
}

impl std::error::Error for GameError {}
