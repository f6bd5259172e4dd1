use battleship_rules::{
    Board, BoardPosition, CellContent, GameError, Orientation, Placement, ShipHit, ShipPiece,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn pos(row: usize, col: usize) -> BoardPosition {
    BoardPosition::new(row, col)
}

#[test]
fn test_settle_origin_marks_parts_in_order() {
    let mut board = Board::new(10, Placement::Origin);
    let ship = ShipPiece::new(0, 3, Orientation::Vertical, pos(2, 5));
    board.settle(&ship).unwrap();
    for part in 0..3 {
        assert_eq!(
            board.cell(pos(2 + part, 5)).unwrap().content,
            CellContent::Ship { ship_id: 0, part }
        );
    }
    assert_eq!(board.cell(pos(5, 5)).unwrap().content, CellContent::Water);
    assert_eq!(board.cell(pos(1, 5)).unwrap().content, CellContent::Water);
}

#[test]
fn test_settle_centered_spans_both_sides() {
    let mut board = Board::new(10, Placement::Centered);
    let ship = ShipPiece::new(4, 5, Orientation::Horizontal, pos(7, 4));
    board.settle(&ship).unwrap();
    for (part, col) in (2..=6).enumerate() {
        assert_eq!(
            board.cell(pos(7, col)).unwrap().content,
            CellContent::Ship { ship_id: 4, part }
        );
    }
    assert_eq!(board.cell(pos(7, 1)).unwrap().content, CellContent::Water);
    assert_eq!(board.cell(pos(7, 7)).unwrap().content, CellContent::Water);
}

#[test]
fn test_settle_centered_rejects_negative_extent() {
    let mut board = Board::new(10, Placement::Centered);
    let ship = ShipPiece::new(0, 3, Orientation::Vertical, pos(0, 0));
    assert_eq!(
        board.settle(&ship).unwrap_err(),
        GameError::OutOfBounds { row: -1, col: 0 }
    );
    assert_eq!(board, Board::new(10, Placement::Centered));
}

#[test]
fn test_settle_out_of_bounds_leaves_board_untouched() {
    let mut board = Board::new(10, Placement::Origin);
    let ship = ShipPiece::new(0, 3, Orientation::Horizontal, pos(4, 9));
    assert_eq!(
        board.settle(&ship).unwrap_err(),
        GameError::OutOfBounds { row: 4, col: 10 }
    );
    assert_eq!(board, Board::new(10, Placement::Origin));

    let anchor_off = ShipPiece::new(0, 1, Orientation::Horizontal, pos(10, 0));
    assert!(matches!(
        board.settle(&anchor_off),
        Err(GameError::OutOfBounds { .. })
    ));
}

#[test]
fn test_settle_overlap_leaves_board_untouched() {
    let mut board = Board::new(10, Placement::Origin);
    board
        .settle(&ShipPiece::new(0, 4, Orientation::Horizontal, pos(3, 2)))
        .unwrap();
    let before = board.clone();
    let crossing = ShipPiece::new(1, 3, Orientation::Vertical, pos(1, 4));
    assert_eq!(
        board.settle(&crossing).unwrap_err(),
        GameError::Overlap {
            row: 3,
            col: 4,
            ship_id: 0
        }
    );
    assert_eq!(board, before);
}

#[test]
fn test_attack_water_ship_and_repeat() {
    let mut board = Board::new(4, Placement::Origin);
    board
        .settle(&ShipPiece::new(0, 2, Orientation::Horizontal, pos(1, 1)))
        .unwrap();

    assert_eq!(board.attack(pos(0, 0)).unwrap(), None);
    assert_eq!(
        board.attack(pos(1, 2)).unwrap(),
        Some(ShipHit { ship_id: 0, part: 1 })
    );
    assert_eq!(
        board.attack(pos(1, 2)).unwrap_err(),
        GameError::AlreadyAttacked { row: 1, col: 2 }
    );
    assert!(board.cell(pos(1, 2)).unwrap().attacked);
    assert_eq!(board.attacked_count(), 2);
}

#[test]
fn test_attack_out_of_bounds() {
    let mut board = Board::new(4, Placement::Origin);
    assert_eq!(
        board.attack(pos(0, 4)).unwrap_err(),
        GameError::OutOfBounds { row: 0, col: 4 }
    );
    assert_eq!(board.attacked_count(), 0);
}

#[test]
fn test_random_placement_fits() {
    let mut rng = SmallRng::seed_from_u64(42);
    for placement in [Placement::Origin, Placement::Centered] {
        let mut board = Board::new(10, placement);
        for (id, size) in [5, 3, 3, 1, 1].into_iter().enumerate() {
            let (anchor, orientation) = board.random_placement(&mut rng, size).unwrap();
            board
                .settle(&ShipPiece::new(id, size, orientation, anchor))
                .unwrap();
        }
    }
}

#[test]
fn test_random_placement_no_room() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut board = Board::new(2, Placement::Origin);
    board
        .settle(&ShipPiece::new(0, 2, Orientation::Horizontal, pos(0, 0)))
        .unwrap();
    board
        .settle(&ShipPiece::new(1, 2, Orientation::Horizontal, pos(1, 0)))
        .unwrap();
    assert_eq!(
        board.random_placement(&mut rng, 1).unwrap_err(),
        GameError::NoRoom { size: 1 }
    );
    assert_eq!(
        board.random_placement(&mut rng, 3).unwrap_err(),
        GameError::NoRoom { size: 3 }
    );
}

#[test]
fn test_huge_coordinates_are_reported_unchanged() {
    let mut board = Board::new(10, Placement::Origin);
    let err = board.attack(pos(usize::MAX, 0)).unwrap_err();
    assert_eq!(
        err,
        GameError::OutOfBounds {
            row: usize::MAX as i128,
            col: 0
        }
    );
    assert!(err.to_string().contains(&usize::MAX.to_string()), "{err}");

    let ship = ShipPiece::new(0, 2, Orientation::Horizontal, pos(3, usize::MAX));
    assert_eq!(
        board.settle(&ship).unwrap_err(),
        GameError::OutOfBounds {
            row: 3,
            col: usize::MAX as i128
        }
    );
    assert_eq!(board, Board::new(10, Placement::Origin));
}
