use battleship_rules::{
    Board, BoardPosition, CellContent, GameError, Orientation, Placement, ShipPiece,
};
use proptest::prelude::*;

const N: usize = 10;

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

fn fits(anchor: BoardPosition, size: usize, orientation: Orientation) -> bool {
    match orientation {
        Orientation::Horizontal => anchor.col + size <= N,
        Orientation::Vertical => anchor.row + size <= N,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn settle_inside_marks_every_part(
        row in 0..N, col in 0..N, size in 1..=5usize, o in orientation()
    ) {
        let anchor = BoardPosition::new(row, col);
        prop_assume!(fits(anchor, size, o));
        let mut board = Board::new(N, Placement::Origin);
        board.settle(&ShipPiece::new(3, size, o, anchor)).unwrap();
        for part in 0..size {
            let cell = match o {
                Orientation::Horizontal => BoardPosition::new(row, col + part),
                Orientation::Vertical => BoardPosition::new(row + part, col),
            };
            prop_assert_eq!(
                board.cell(cell).unwrap().content,
                CellContent::Ship { ship_id: 3, part }
            );
        }
    }

    #[test]
    fn settle_outside_is_atomic(
        row in 0..N, col in 0..N, size in 1..=5usize, o in orientation()
    ) {
        let anchor = BoardPosition::new(row, col);
        prop_assume!(!fits(anchor, size, o));
        let mut board = Board::new(N, Placement::Origin);
        let before = board.clone();
        let err = board.settle(&ShipPiece::new(0, size, o, anchor)).unwrap_err();
        prop_assert!(matches!(err, GameError::OutOfBounds { .. }), "unexpected {:?}", err);
        prop_assert_eq!(board, before);
    }

    #[test]
    fn settle_overlapping_is_atomic(
        row in 0..N, col in 0..N, size in 2..=5usize, o in orientation(), shift in 0..5usize
    ) {
        let anchor = BoardPosition::new(row, col);
        prop_assume!(fits(anchor, size, o));
        let mut board = Board::new(N, Placement::Origin);
        board.settle(&ShipPiece::new(0, size, o, anchor)).unwrap();
        let before = board.clone();

        // A crossing ship whose run passes through one of the first ship's cells.
        let shift = shift % size;
        let (hit_row, hit_col) = match o {
            Orientation::Horizontal => (row, col + shift),
            Orientation::Vertical => (row + shift, col),
        };
        let crossing = ShipPiece::new(1, 1, o.rotated(), BoardPosition::new(hit_row, hit_col));
        let err = board.settle(&crossing).unwrap_err();
        prop_assert!(matches!(err, GameError::Overlap { ship_id: 0, .. }), "unexpected {:?}", err);
        prop_assert_eq!(board, before);
    }

    #[test]
    fn second_attack_fails_and_keeps_first_result(
        row in 0..N, col in 0..N, ship_row in 0..N, ship_col in 0..N - 2
    ) {
        let mut board = Board::new(N, Placement::Origin);
        board
            .settle(&ShipPiece::new(0, 3, Orientation::Horizontal, BoardPosition::new(ship_row, ship_col)))
            .unwrap();
        let target = BoardPosition::new(row, col);
        let first = board.attack(target).unwrap();
        let after_first = board.clone();
        let err = board.attack(target).unwrap_err();
        prop_assert_eq!(err, GameError::AlreadyAttacked { row, col });
        prop_assert_eq!(&board, &after_first);
        let expected_hit = row == ship_row && (ship_col..ship_col + 3).contains(&col);
        prop_assert_eq!(first.is_some(), expected_hit);
        if let Some(hit) = first {
            prop_assert_eq!(hit.part, col - ship_col);
        }
    }
}
