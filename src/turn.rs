use crate::Point;
use crate::board::Board;
use crate::error::GameError;
use crate::stone::Stone;

/// Play-phase collaborator: validates and applies a single move.
///
/// Implementations own every play rule (captures, ko, suicide, turn
/// order) and return the next board. The scoring core treats the result
/// as already correct and never re-validates it; a refused placement
/// surfaces as [`GameError::RejectedMove`].
pub trait TurnLogic {
    fn do_turn(&self, board: &Board, point: Point, stone: Stone) -> Result<Board, GameError>;
}
