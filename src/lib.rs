pub mod board;
pub mod error;
pub mod game;
pub mod point_set;
pub mod stone;
pub mod territory;
pub mod turn;

pub type Point = (u8, u8);

pub use board::{Board, BoardState};
pub use error::GameError;
pub use game::{Game, GameState, Phase};
pub use point_set::PointSet;
pub use stone::Stone;
pub use territory::{Mark, Review, ReviewState, Scores};
pub use turn::TurnLogic;
