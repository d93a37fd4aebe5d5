use serde::{Deserialize, Serialize};

use crate::Point;
use crate::board::Board;
use crate::error::GameError;
use crate::point_set::PointSet;
use crate::stone::Stone;

/// Per-point annotation during territory review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// Stone marked captured-but-left-on-board.
    Dead,
    /// Empty point claimed as Black territory.
    BlackClaim,
    /// Empty point claimed as White territory.
    WhiteClaim,
}

impl Mark {
    fn claim(stone: Stone) -> Self {
        match stone {
            Stone::Black => Mark::BlackClaim,
            Stone::White => Mark::WhiteClaim,
        }
    }
}

/// Score totals for both players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub black: u32,
    pub white: u32,
}

impl Scores {
    pub fn new(black: u32, white: u32) -> Self {
        Scores { black, white }
    }

    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    /// "B+{margin}", "W+{margin}", or "Draw".
    pub fn result(&self) -> String {
        if self.black > self.white {
            format!("B+{}", self.black - self.white)
        } else if self.white > self.black {
            format!("W+{}", self.white - self.black)
        } else {
            "Draw".to_string()
        }
    }
}

/// Serialized review snapshot. Point lists are row-major sorted so the
/// wire form is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    pub dead_stones: Vec<Point>,
    pub black_claims: Vec<Point>,
    pub white_claims: Vec<Point>,
    pub base: Scores,
}

/// Interactive end-of-game marking session.
///
/// Holds the dead-stone set and the two territory-claim sets; the single
/// state transition is [`Review::toggle`]. Score totals are derived from
/// the sets on every read, so they cannot drift out of sync with the
/// marks. The board is passed into each operation and never mutated.
///
/// The three sets stay pairwise disjoint: claims are only ever added for
/// cells that are empty on the board, dead marks only for occupied ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Review {
    dead_stones: PointSet,
    black_claims: PointSet,
    white_claims: PointSet,
    base: Scores,
}

impl Review {
    /// A fresh session with zero base totals and all sets empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session carrying pre-review base totals (capture and komi
    /// accounting happens outside this crate).
    pub fn with_base(base: Scores) -> Self {
        Review {
            base,
            ..Self::default()
        }
    }

    /// Restore a session from a serialized snapshot.
    pub fn from_state(state: ReviewState) -> Self {
        Review {
            dead_stones: state.dead_stones.into_iter().collect(),
            black_claims: state.black_claims.into_iter().collect(),
            white_claims: state.white_claims.into_iter().collect(),
            base: state.base,
        }
    }

    pub fn state(&self) -> ReviewState {
        ReviewState {
            dead_stones: self.dead_stones.sorted(),
            black_claims: self.black_claims.sorted(),
            white_claims: self.white_claims.sorted(),
            base: self.base,
        }
    }

    // -- Accessors --

    pub fn dead_stones(&self) -> &PointSet {
        &self.dead_stones
    }

    pub fn black_claims(&self) -> &PointSet {
        &self.black_claims
    }

    pub fn white_claims(&self) -> &PointSet {
        &self.white_claims
    }

    pub fn base(&self) -> Scores {
        self.base
    }

    /// The annotation at a point, if any.
    pub fn mark_at(&self, point: &Point) -> Option<Mark> {
        if self.dead_stones.contains(point) {
            Some(Mark::Dead)
        } else if self.black_claims.contains(point) {
            Some(Mark::BlackClaim)
        } else if self.white_claims.contains(point) {
            Some(Mark::WhiteClaim)
        } else {
            None
        }
    }

    fn set_of(&mut self, mark: Mark) -> &mut PointSet {
        match mark {
            Mark::Dead => &mut self.dead_stones,
            Mark::BlackClaim => &mut self.black_claims,
            Mark::WhiteClaim => &mut self.white_claims,
        }
    }

    // -- The toggle transition --

    /// Advance the annotation of the whole region at `point`.
    ///
    /// A stone group flips between alive and dead; an empty region's
    /// claim cycles unclaimed -> black -> white -> unclaimed. Exactly one
    /// of the three sets changes, always by a whole connected component.
    /// An out-of-range point is rejected with no mutation.
    pub fn toggle(&mut self, board: &Board, point: Point) -> Result<(), GameError> {
        let cell = board.cell(point)?;
        let region = board.region(point)?;
        let current = self.mark_at(&point);

        let next = match (cell, current) {
            // Stone groups: strict alive/dead flip.
            (Some(_), None) => Some(Mark::Dead),
            (Some(_), Some(Mark::Dead)) => None,
            // Empty regions: unclaimed -> black -> white -> unclaimed.
            (None, None) => Some(Mark::BlackClaim),
            (None, Some(Mark::BlackClaim)) => Some(Mark::WhiteClaim),
            (None, Some(Mark::WhiteClaim)) => None,
            // A stone never carries a claim, nor an empty point a dead
            // mark; the board is read-only during review.
            (Some(_), Some(_)) | (None, Some(Mark::Dead)) => {
                unreachable!("mark does not match cell state")
            }
        };

        if let Some(mark) = current {
            self.set_of(mark).remove_all(&region);
        }
        if let Some(mark) = next {
            self.set_of(mark).insert_all(&region);
        }

        Ok(())
    }

    // -- Derived scores --

    /// Black's running total: base, plus claimed territory, plus two
    /// points per dead white stone (one captured stone, one point of
    /// resulting territory).
    pub fn black_score(&self, board: &Board) -> u32 {
        self.base.black + self.black_claims.len() as u32 + 2 * self.dead_count(board, Stone::White)
    }

    /// White's running total, symmetric to [`Review::black_score`].
    pub fn white_score(&self, board: &Board) -> u32 {
        self.base.white + self.white_claims.len() as u32 + 2 * self.dead_count(board, Stone::Black)
    }

    pub fn scores(&self, board: &Board) -> Scores {
        Scores {
            black: self.black_score(board),
            white: self.white_score(board),
        }
    }

    fn dead_count(&self, board: &Board, stone: Stone) -> u32 {
        self.dead_stones
            .iter()
            .filter(|&&p| board.stone_at(p) == Some(stone))
            .count() as u32
    }

    // -- Host views --

    /// Flat cols x rows ownership map: +1 black, -1 white, 0 unmarked.
    /// Claimed points carry their claimant; a dead stone's point counts
    /// for the opponent.
    pub fn ownership(&self, board: &Board) -> Vec<i8> {
        let mut map = vec![0i8; board.len()];
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                let point = (col, row);
                let i = row as usize * board.cols() as usize + col as usize;
                map[i] = match self.mark_at(&point) {
                    Some(Mark::BlackClaim) => Stone::Black.to_int(),
                    Some(Mark::WhiteClaim) => Stone::White.to_int(),
                    Some(Mark::Dead) => match board.stone_at(point) {
                        Some(s) => s.opp().to_int(),
                        None => 0,
                    },
                    None => 0,
                };
            }
        }
        map
    }

    // -- Claim suggestions --

    /// Claim every unclaimed empty region bordered by a single color.
    ///
    /// Dead stones are transparent to the fill: it walks through them and
    /// they contribute no border color, so regions split only by a dead
    /// group merge. Regions bordering both colors (dame) or no live stone
    /// at all stay unclaimed, and dead-stone points themselves are never
    /// claimed.
    pub fn suggest_claims(&mut self, board: &Board) {
        let cols = board.cols() as usize;
        let mut visited = vec![false; board.len()];

        for row in 0..board.rows() {
            for col in 0..board.cols() {
                let seed = (col, row);
                if visited[row as usize * cols + col as usize] || !self.fillable(board, seed) {
                    continue;
                }

                let mut region = Vec::new();
                let mut borders_black = false;
                let mut borders_white = false;
                let mut stack = vec![seed];

                while let Some(p) = stack.pop() {
                    let pi = p.1 as usize * cols + p.0 as usize;
                    if visited[pi] {
                        continue;
                    }
                    visited[pi] = true;
                    region.push(p);

                    for n in board.neighbors(p) {
                        if self.fillable(board, n) {
                            if !visited[n.1 as usize * cols + n.0 as usize] {
                                stack.push(n);
                            }
                        } else {
                            match board.stone_at(n) {
                                Some(Stone::Black) => borders_black = true,
                                Some(Stone::White) => borders_white = true,
                                None => {}
                            }
                        }
                    }
                }

                let claimant = match (borders_black, borders_white) {
                    (true, false) => Some(Stone::Black),
                    (false, true) => Some(Stone::White),
                    _ => None,
                };

                if let Some(stone) = claimant {
                    let claims = self.set_of(Mark::claim(stone));
                    for &p in &region {
                        if board.stone_at(p).is_none() {
                            claims.insert(p);
                        }
                    }
                }
            }
        }
    }

    /// Walkable for the suggestion fill: empty and unclaimed, or a dead
    /// stone.
    fn fillable(&self, board: &Board, point: Point) -> bool {
        if self.dead_stones.contains(&point) {
            return true;
        }
        board.stone_at(point).is_none() && self.mark_at(&point).is_none()
    }
}
