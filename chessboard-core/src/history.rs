//! Move history - what it takes to reverse each executed move

use crate::board::PieceId;
use crate::square::Square;

/// One executed move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub moved: PieceId,
    /// Piece that stood on `to`, detached from the grid but still owned by the board
    pub captured: Option<PieceId>,
}

/// LIFO stack of executed moves
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    pub(crate) fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    /// Most recent move
    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> + '_ {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn record(board: &Board, from: (i32, i32), to: (i32, i32)) -> MoveRecord {
        let from_sq = Square::new(from.0, from.1).unwrap();
        let to_sq = Square::new(to.0, to.1).unwrap();
        MoveRecord {
            from: from_sq,
            to: to_sq,
            moved: board.board_state().get(from_sq).unwrap().id(),
            captured: None,
        }
    }

    #[test]
    fn test_lifo_order() {
        let board = Board::default();
        let mut history = MoveHistory::new();
        assert!(history.is_empty());

        let first = record(&board, (1, 0), (2, 0));
        let second = record(&board, (6, 0), (5, 0));
        history.push(first);
        history.push(second);

        assert_eq!(history.len(), 2);
        assert_eq!(history.last(), Some(&second));
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(history.pop(), Some(second));
        assert_eq!(history.pop(), Some(first));
        assert_eq!(history.pop(), None);
    }
}
