//! Property-based tests for board moves
//!
//! Random sequences of moves must never duplicate or lose a card, and a
//! move followed by the inverse move restores the board.

use memos_core::{Board, Card, CardId, Column, ColumnColor, ColumnId};
use proptest::prelude::*;
use std::collections::BTreeSet;

const COLUMNS: usize = 3;
const CARDS: usize = 9;

fn seeded_board() -> Board {
    let columns = (0..COLUMNS)
        .map(|c| {
            let cards = (0..CARDS)
                .filter(|i| i % COLUMNS == c)
                .map(|i| Card::with_id(format!("card-{}", i), format!("Card {}", i)));
            Column::with_id(format!("col-{}", c), format!("Column {}", c), ColumnColor::Primary)
                .with_cards(cards)
        })
        .collect();
    Board::with_columns("Property board", columns)
}

fn all_ids(board: &Board) -> Vec<CardId> {
    board
        .columns()
        .iter()
        .flat_map(|column| column.card_ids().cloned())
        .collect()
}

/// (card, target column, target index); indexes may exceed the column length
fn move_op() -> impl Strategy<Value = (usize, usize, usize)> {
    (0..CARDS, 0..COLUMNS, 0..CARDS + 3)
}

proptest! {
    /// Property: every card appears exactly once after any sequence of moves
    #[test]
    fn prop_moves_never_duplicate_or_lose(ops in prop::collection::vec(move_op(), 0..40)) {
        let mut board = seeded_board();
        let expected: BTreeSet<CardId> = all_ids(&board).into_iter().collect();

        for (card, column, index) in ops {
            let card_id = CardId::from(format!("card-{}", card));
            let column_id = ColumnId::from(format!("col-{}", column));
            let moving = board.card(&card_id).cloned().expect("seeded card");

            prop_assert!(board.move_card(&column_id, index, moving));

            let ids = all_ids(&board);
            prop_assert_eq!(ids.len(), CARDS);
            let unique: BTreeSet<CardId> = ids.into_iter().collect();
            prop_assert_eq!(&unique, &expected);

            let landed = board.column(&column_id).expect("column").position_of(&card_id);
            let column_len = board.column(&column_id).expect("column").len();
            prop_assert_eq!(landed, Some(index.min(column_len - 1)));
        }
    }

    /// Property: moving a card away and back to its origin restores the board
    #[test]
    fn prop_move_then_inverse_restores(op in move_op()) {
        let (card, column, index) = op;
        let mut board = seeded_board();
        let original = board.clone();

        let card_id = CardId::from(format!("card-{}", card));
        let position = board.find_card_position(&card_id).expect("seeded card");
        let origin_column = board.columns()[position.column_index].id.clone();

        let moving = board.card(&card_id).cloned().expect("seeded card");
        board.move_card(&ColumnId::from(format!("col-{}", column)), index, moving);

        let moving = board.card(&card_id).cloned().expect("seeded card");
        board.move_card(&origin_column, position.card_index, moving);

        prop_assert_eq!(board, original);
    }

    /// Property: moves into a column that is not on the board change nothing
    #[test]
    fn prop_missing_column_is_noop(card in 0..CARDS, index in 0..CARDS) {
        let mut board = seeded_board();
        let original = board.clone();
        let moving = board.card(&CardId::from(format!("card-{}", card))).cloned().expect("seeded card");

        prop_assert!(!board.move_card(&ColumnId::from("col-missing"), index, moving));
        prop_assert_eq!(board, original);
    }
}
