use super::*;

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

fn count(piece: Piece) -> usize {
    piece.possible_squares().to_list().len()
}

#[test]
fn test_rook_corner_reach() {
    assert_eq!(count(Piece::rook(Color::White, sq(0, 0))), 14);
}

#[test]
fn test_knight_reach() {
    assert_eq!(count(Piece::knight(Color::White, sq(0, 0))), 2);
    assert_eq!(count(Piece::knight(Color::Black, sq(3, 3))), 8);
}

#[test]
fn test_slider_reach_from_centre() {
    assert_eq!(count(Piece::bishop(Color::White, sq(3, 3))), 13);
    assert_eq!(count(Piece::rook(Color::White, sq(3, 3))), 14);
    assert_eq!(count(Piece::queen(Color::White, sq(3, 3))), 27);
    assert_eq!(count(Piece::king(Color::White, sq(0, 4))), 5);
}

#[test]
fn test_possible_squares_stay_on_board() {
    for kind in [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        for row in 0..8 {
            for col in 0..8 {
                let piece = Piece::new(Color::Black, kind, sq(row, col));
                assert!(
                    piece
                        .possible_squares()
                        .to_list()
                        .iter()
                        .all(|s| s.in_bounds()),
                    "{piece} reaches off the board"
                );
            }
        }
    }
}

#[test]
fn test_pawn_first_move_shape() {
    let white = Piece::pawn(Color::White, sq(1, 0));
    assert_eq!(
        white.possible_squares().to_list(),
        vec![sq(2, 0), sq(2, 1), sq(3, 0)]
    );

    let black = Piece::pawn(Color::Black, sq(6, 1));
    assert_eq!(
        black.possible_squares().to_list(),
        vec![sq(5, 1), sq(5, 2), sq(5, 0), sq(4, 1)]
    );
}

#[test]
fn test_pawn_loses_double_step_after_moving() {
    let pawn = Piece::pawn(Color::White, sq(1, 4)).moved_to(sq(2, 4));
    assert_eq!(pawn.move_count(), Some(1));
    assert_eq!(
        pawn.possible_squares().to_list(),
        vec![sq(3, 4), sq(3, 5), sq(3, 3)]
    );
}

#[test]
fn test_templates_survive_queries() {
    let queen = Piece::queen(Color::White, sq(3, 3));
    let _ = queen.possible_squares();
    let _ = Piece::queen(Color::Black, sq(7, 7)).possible_squares();

    let template = queen.template();
    assert_eq!(template.root().loc, sq(0, 0));
    assert_eq!(template.node_count(), 1 + 8 * 7);
}

#[test]
fn test_moved_to_bookkeeping() {
    let king = Piece::king(Color::White, sq(0, 4));
    assert!(!king.has_moved());
    let king = king.moved_to(sq(0, 5));
    assert!(king.has_moved());
    assert_eq!(king.position, sq(0, 5));

    let rook = Piece::rook(Color::Black, sq(7, 7)).moved_to(sq(7, 5));
    assert_eq!(rook.role, Role::Rook { moved: true });

    let knight = Piece::knight(Color::White, sq(0, 1)).moved_to(sq(2, 2));
    assert_eq!(knight.role, Role::Knight);
}

#[test]
fn test_pawn_capture_geometry() {
    let board = Board::empty();
    let pawn = Piece::pawn(Color::White, sq(3, 3));

    assert!(pawn.can_capture(&Piece::knight(Color::Black, sq(4, 4)), &board));
    assert!(pawn.can_capture(&Piece::knight(Color::Black, sq(4, 2)), &board));
    assert!(!pawn.can_capture(&Piece::knight(Color::Black, sq(4, 3)), &board));
    assert!(!pawn.can_capture(&Piece::knight(Color::Black, sq(2, 4)), &board));
    assert!(!pawn.can_capture(&Piece::knight(Color::White, sq(4, 4)), &board));
}

#[test]
fn test_non_pawn_capture_uses_template() {
    let board = Board::empty();
    let rook = Piece::rook(Color::White, sq(0, 0));
    assert!(rook.can_capture(&Piece::bishop(Color::Black, sq(0, 5)), &board));
    assert!(!rook.can_capture(&Piece::bishop(Color::Black, sq(1, 1)), &board));
    assert!(!rook.can_capture(&Piece::bishop(Color::White, sq(0, 5)), &board));
}

#[test]
fn test_en_passant_target_needs_fresh_double_step() {
    let mut board = Board::empty();
    let white = Piece::pawn(Color::White, sq(4, 3)).moved_to(sq(4, 3));
    let black = Piece::pawn(Color::Black, sq(6, 2)).moved_to(sq(4, 2));
    board.place(white);
    board.place(black);

    assert!(!white.en_passant_target(&black, &board));
    board.set_en_passant(Some(sq(4, 2)));
    assert!(white.en_passant_target(&black, &board));
    assert!(white.can_capture(&black, &board));

    let veteran = Piece {
        role: Role::Pawn { move_count: 2 },
        ..black
    };
    assert!(!white.en_passant_target(&veteran, &board));
}

#[test]
fn test_display_and_points() {
    let rook = Piece::rook(Color::White, sq(0, 0));
    let queen = Piece::queen(Color::Black, sq(7, 3));
    assert_eq!(rook.to_string(), "white rook at a1");
    assert_eq!(queen.to_string(), "black queen at d8");
    assert_eq!(rook.cmp_points(&queen), Ordering::Less);
    assert_eq!(queen.cmp_points(&queen), Ordering::Equal);
    assert_eq!(Piece::king(Color::White, sq(0, 4)).points(), 10_000);
}

#[test]
fn test_promoted_rook_cannot_castle() {
    let rook = Piece::promoted(Color::White, PromotionKind::Rook, sq(7, 0));
    assert!(rook.has_moved());
    assert_eq!(
        Piece::promoted(Color::White, PromotionKind::Knight, sq(7, 1)).kind(),
        PieceKind::Knight
    );
}
