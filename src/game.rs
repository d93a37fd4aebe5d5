use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::board::{Board, BoardState};
use crate::error::GameError;
use crate::stone::Stone;
use crate::territory::{Review, ReviewState, Scores};
use crate::turn::TurnLogic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Play,
    Review,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Play => write!(f, "play"),
            Phase::Review => write!(f, "review"),
        }
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Phase::Play),
            "review" => Ok(Phase::Review),
            _ => Err(format!("unknown phase: {s}")),
        }
    }
}

/// Serialized game snapshot. The phase is implied: a present `review`
/// means the marking session is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: BoardState,
    pub review: Option<ReviewState>,
}

/// Host-facing controller for one game: board ownership, phase
/// enforcement, and the marking-session lifecycle.
///
/// During play the host resolves clicks to [`Game::place`], which
/// delegates the move to the [`TurnLogic`] collaborator. Once the game
/// ends it calls [`Game::begin_review`] and routes clicks to
/// [`Game::toggle`] instead. Wrong-phase calls reject with
/// [`GameError::InvalidPhase`] rather than desynchronizing board and
/// score state.
#[derive(Debug, Clone)]
pub struct Game<L> {
    board: Board,
    logic: L,
    review: Option<Review>,
}

impl<L: TurnLogic> Game<L> {
    /// A new game in the play phase.
    pub fn new(board: Board, logic: L) -> Self {
        Game {
            board,
            logic,
            review: None,
        }
    }

    // -- Accessors --

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        if self.review.is_some() {
            Phase::Review
        } else {
            Phase::Play
        }
    }

    pub fn review(&self) -> Option<&Review> {
        self.review.as_ref()
    }

    pub fn review_mut(&mut self) -> Option<&mut Review> {
        self.review.as_mut()
    }

    /// Current totals, once the review is open.
    pub fn scores(&self) -> Option<Scores> {
        self.review.as_ref().map(|r| r.scores(&self.board))
    }

    // -- Phase transitions --

    /// Apply a play-phase move through the turn-logic collaborator and
    /// install the board it returns.
    pub fn place(&mut self, point: Point, stone: Stone) -> Result<(), GameError> {
        self.expect_phase(Phase::Play)?;
        self.board = self.logic.do_turn(&self.board, point, stone)?;
        Ok(())
    }

    /// End the play phase and open the marking session, all sets empty.
    /// Base totals come from the host; capture and komi accounting stays
    /// outside this crate.
    pub fn begin_review(&mut self, base: Scores) -> Result<(), GameError> {
        self.expect_phase(Phase::Play)?;
        self.review = Some(Review::with_base(base));
        Ok(())
    }

    /// Toggle the marking of the region at `point` during review.
    pub fn toggle(&mut self, point: Point) -> Result<(), GameError> {
        match self.review.as_mut() {
            Some(review) => review.toggle(&self.board, point),
            None => Err(GameError::InvalidPhase {
                expected: Phase::Review,
                actual: Phase::Play,
            }),
        }
    }

    /// Start over on a fresh board: back to the play phase, marking
    /// session dropped.
    pub fn reset(&mut self, board: Board) {
        self.board = board;
        self.review = None;
    }

    // -- Serialization --

    pub fn state(&self) -> GameState {
        GameState {
            board: self.board.state(),
            review: self.review.as_ref().map(Review::state),
        }
    }

    pub fn from_state(state: GameState, logic: L) -> Self {
        Game {
            board: Board::from_state(state.board),
            logic,
            review: state.review.map(Review::from_state),
        }
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), GameError> {
        let actual = self.phase();
        if actual == expected {
            Ok(())
        } else {
            Err(GameError::InvalidPhase { expected, actual })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal stand-in for the play-phase collaborator: places the
    /// stone on any empty in-bounds point. No capture logic; the real
    /// collaborator owns the rules.
    struct PlaceOnly;

    impl TurnLogic for PlaceOnly {
        fn do_turn(&self, board: &Board, point: Point, stone: Stone) -> Result<Board, GameError> {
            if board.cell(point)?.is_some() {
                return Err(GameError::RejectedMove("point is occupied".into()));
            }
            let mut next = board.clone();
            next.set_stone(point, stone)?;
            Ok(next)
        }
    }

    fn new_game(cols: u8, rows: u8) -> Game<PlaceOnly> {
        Game::new(Board::with_dimensions(cols, rows), PlaceOnly)
    }

    #[test]
    fn starts_in_play_phase() {
        let game = new_game(5, 5);
        assert_eq!(game.phase(), Phase::Play);
        assert!(game.review().is_none());
        assert!(game.scores().is_none());
    }

    #[test]
    fn place_installs_the_collaborator_board() {
        let mut game = new_game(5, 5);
        game.place((2, 2), Stone::Black).unwrap();
        assert_eq!(game.board().stone_at((2, 2)), Some(Stone::Black));
    }

    #[test]
    fn rejected_move_leaves_board_unchanged() {
        let mut game = new_game(5, 5);
        game.place((2, 2), Stone::Black).unwrap();
        let before = game.board().clone();

        let err = game.place((2, 2), Stone::White).unwrap_err();
        assert_eq!(err, GameError::RejectedMove("point is occupied".into()));
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn place_out_of_range_propagates() {
        let mut game = new_game(4, 4);
        assert!(matches!(
            game.place((4, 0), Stone::Black),
            Err(GameError::OutOfRange { .. })
        ));
    }

    #[test]
    fn toggle_during_play_is_invalid_phase() {
        let mut game = new_game(5, 5);
        let err = game.toggle((0, 0)).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidPhase {
                expected: Phase::Review,
                actual: Phase::Play
            }
        );
    }

    #[test]
    fn place_during_review_is_invalid_phase() {
        let mut game = new_game(5, 5);
        game.begin_review(Scores::default()).unwrap();

        let err = game.place((0, 0), Stone::Black).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidPhase {
                expected: Phase::Play,
                actual: Phase::Review
            }
        );
        assert!(game.board().is_empty());
    }

    #[test]
    fn begin_review_twice_is_invalid_phase() {
        let mut game = new_game(5, 5);
        game.begin_review(Scores::default()).unwrap();
        assert!(matches!(
            game.begin_review(Scores::default()),
            Err(GameError::InvalidPhase { .. })
        ));
    }

    #[test]
    fn review_toggles_and_scores() {
        let mut game = new_game(5, 5);
        game.place((0, 0), Stone::Black).unwrap();
        game.place((1, 0), Stone::Black).unwrap();
        game.place((4, 4), Stone::White).unwrap();
        game.begin_review(Scores::new(1, 2)).unwrap();
        assert_eq!(game.phase(), Phase::Review);
        assert_eq!(game.scores(), Some(Scores::new(1, 2)));

        game.toggle((0, 0)).unwrap();
        let review = game.review().unwrap();
        assert_eq!(review.dead_stones().sorted(), vec![(0, 0), (1, 0)]);
        assert_eq!(game.scores(), Some(Scores::new(1, 6)));

        game.toggle((1, 0)).unwrap();
        assert_eq!(game.scores(), Some(Scores::new(1, 2)));
    }

    #[test]
    fn reset_returns_to_play() {
        let mut game = new_game(3, 3);
        game.place((0, 0), Stone::Black).unwrap();
        game.begin_review(Scores::default()).unwrap();

        game.reset(Board::with_dimensions(3, 3));
        assert_eq!(game.phase(), Phase::Play);
        assert!(game.review().is_none());
        assert!(game.board().is_empty());
    }

    #[test]
    fn state_round_trip() {
        let mut game = new_game(4, 4);
        game.place((1, 1), Stone::Black).unwrap();
        game.place((2, 2), Stone::White).unwrap();
        game.begin_review(Scores::new(0, 3)).unwrap();
        game.toggle((2, 2)).unwrap();

        let json = serde_json::to_string(&game.state()).unwrap();
        let restored = Game::from_state(serde_json::from_str(&json).unwrap(), PlaceOnly);

        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.phase(), Phase::Review);
        assert_eq!(restored.scores(), game.scores());
    }

    #[test]
    fn play_state_has_null_review() {
        let game = new_game(2, 2);
        let json = serde_json::to_value(game.state()).unwrap();
        assert!(json["review"].is_null());
        assert_eq!(json["board"]["cols"], 2);
    }

    #[test]
    fn phase_display_and_parse() {
        assert_eq!(Phase::Play.to_string(), "play");
        assert_eq!(Phase::Review.to_string(), "review");
        assert_eq!("review".parse::<Phase>(), Ok(Phase::Review));
        assert!("scoring".parse::<Phase>().is_err());
    }

    #[test]
    fn phase_serializes_snake_case() {
        assert_eq!(serde_json::to_value(Phase::Play).unwrap(), "play");
        assert_eq!(serde_json::to_value(Phase::Review).unwrap(), "review");
    }
}
