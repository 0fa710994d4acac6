//! Computer move selection.
//!
//! [`GreedyPolicy`] is a fixed priority list, not a search: win if
//! possible, otherwise block, otherwise take the center, a corner, a side.
//! Ties among corners or sides are broken by an injected random source so
//! a seeded generator makes every choice reproducible.

use super::rules::{CENTER, CORNERS, SIDES, completing_cell};
use super::{Board, Player};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Chooses the computer's cell on a board.
pub trait MovePolicy {
    /// Returns an empty cell to play, or `None` if the board has none.
    fn choose_cell(&mut self, board: &Board) -> Option<usize>;
}

/// Priority rule that produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Rule {
    /// Completes a computer line.
    Win,
    /// Fills the gap in a human line.
    Block,
    /// Takes cell 4.
    Center,
    /// Random empty corner.
    Corner,
    /// Random empty side.
    Side,
    /// Random empty cell.
    Fallback,
}

/// A chosen cell and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Cell to play.
    pub cell: usize,
    /// Rule that fired.
    pub rule: Rule,
}

/// Greedy rule-based opponent.
#[derive(Debug, Clone)]
pub struct GreedyPolicy<R = SmallRng> {
    rng: R,
}

impl GreedyPolicy<SmallRng> {
    /// Policy with a deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Policy seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> GreedyPolicy<R> {
    /// Creates a policy drawing tie-breaks from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Applies the rules in priority order; the first one with a candidate wins.
    #[instrument(skip_all)]
    pub fn select(&mut self, board: &Board) -> Option<Selection> {
        let selection = if let Some(cell) = completing_cell(board, Player::Computer) {
            Selection { cell, rule: Rule::Win }
        } else if let Some(cell) = completing_cell(board, Player::Human) {
            Selection { cell, rule: Rule::Block }
        } else if board.is_empty(CENTER) {
            Selection {
                cell: CENTER,
                rule: Rule::Center,
            }
        } else if let Some(cell) = self.pick(board, &CORNERS) {
            Selection { cell, rule: Rule::Corner }
        } else if let Some(cell) = self.pick(board, &SIDES) {
            Selection { cell, rule: Rule::Side }
        } else {
            let cell = self.pick(board, &board.empty_cells())?;
            Selection {
                cell,
                rule: Rule::Fallback,
            }
        };

        debug!(cell = selection.cell, rule = %selection.rule, "Computer chose cell");
        Some(selection)
    }

    /// Uniform choice among the empty cells of `candidates`.
    fn pick(&mut self, board: &Board, candidates: &[usize]) -> Option<usize> {
        let open: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&cell| board.is_empty(cell))
            .collect();
        open.choose(&mut self.rng).copied()
    }
}

impl<R: Rng> MovePolicy for GreedyPolicy<R> {
    fn choose_cell(&mut self, board: &Board) -> Option<usize> {
        self.select(board).map(|selection| selection.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(codes: [u8; 9]) -> Board {
        Board::from_codes(codes).unwrap()
    }

    #[test]
    fn test_win_beats_block() {
        let mut policy = GreedyPolicy::seeded(7);
        let selection = policy.select(&board([2, 2, 0, 1, 1, 0, 0, 0, 0])).unwrap();
        assert_eq!(selection, Selection { cell: 2, rule: Rule::Win });
    }

    #[test]
    fn test_block() {
        let mut policy = GreedyPolicy::seeded(7);
        let selection = policy.select(&board([1, 1, 0, 0, 2, 0, 0, 0, 0])).unwrap();
        assert_eq!(selection, Selection { cell: 2, rule: Rule::Block });
    }

    #[test]
    fn test_center_preferred() {
        let mut policy = GreedyPolicy::seeded(7);
        let selection = policy.select(&board([1, 0, 0, 0, 0, 0, 0, 0, 0])).unwrap();
        assert_eq!(
            selection,
            Selection {
                cell: CENTER,
                rule: Rule::Center
            }
        );
    }

    #[test]
    fn test_corner_when_center_taken() {
        let mut policy = GreedyPolicy::seeded(7);
        let selection = policy.select(&board([0, 0, 0, 0, 1, 0, 0, 0, 0])).unwrap();
        assert_eq!(selection.rule, Rule::Corner);
        assert!(CORNERS.contains(&selection.cell));
    }

    #[test]
    fn test_side_when_corners_taken() {
        // Only sides 1 and 7 are open and no line is two-thirds full.
        let mut policy = GreedyPolicy::seeded(7);
        let selection = policy.select(&board([1, 0, 2, 2, 1, 1, 1, 0, 2])).unwrap();
        assert_eq!(selection.rule, Rule::Side);
        assert!([1, 7].contains(&selection.cell));
    }

    #[test]
    fn test_full_board_has_no_selection() {
        let mut policy = GreedyPolicy::seeded(7);
        assert_eq!(policy.select(&board([1, 2, 1, 1, 2, 2, 2, 1, 1])), None);
    }

    #[test]
    fn test_same_seed_same_tie_break() {
        let open_corners = board([0, 0, 0, 0, 1, 0, 0, 0, 0]);
        let picks = |seed| {
            let mut policy = GreedyPolicy::seeded(seed);
            (0..16)
                .map(|_| policy.choose_cell(&open_corners))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
    }
}
