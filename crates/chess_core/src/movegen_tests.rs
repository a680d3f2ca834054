use super::*;

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

fn sorted(mut v: Vec<Square>) -> Vec<Square> {
    v.sort();
    v
}

#[test]
fn test_startpos_moves() {
    let board = Board::startpos();
    let mut total = 0;
    for piece in board.pieces() {
        let moves = legal_moves(piece, &board);
        match piece.kind() {
            PieceKind::Pawn | PieceKind::Knight => assert_eq!(moves.len(), 2, "{piece}"),
            _ => assert!(moves.is_empty(), "{piece} should be boxed in"),
        }
        total += moves.len();
    }
    // 20 per side
    assert_eq!(total, 40);
}

#[test]
fn test_knight_jumps_over_pieces() {
    let board = Board::startpos();
    let knight = board.piece_at(sq(0, 1)).copied().expect("knight on b1");
    assert_eq!(sorted(legal_moves(&knight, &board)), vec![sq(2, 0), sq(2, 2)]);
}

#[test]
fn test_ray_stops_at_blockers() {
    let mut board = Board::empty();
    let rook = Piece::rook(Color::White, sq(0, 0));
    board.place(rook);
    board.place(Piece::pawn(Color::White, sq(0, 3)));
    board.place(Piece::pawn(Color::Black, sq(3, 0)));

    let moves = sorted(legal_moves(&rook, &board));
    assert_eq!(
        moves,
        vec![sq(0, 1), sq(0, 2), sq(1, 0), sq(2, 0), sq(3, 0)]
    );
}

#[test]
fn test_moves_are_level_order_without_duplicates() {
    let mut board = Board::empty();
    let queen = Piece::queen(Color::Black, sq(4, 4));
    board.place(queen);
    let moves = legal_moves(&queen, &board);
    assert_eq!(moves.len(), 27);
    let mut dedup = moves.clone();
    dedup.sort();
    dedup.dedup();
    assert_eq!(dedup.len(), moves.len());
    // first ring before the second
    assert!(moves[..8].iter().all(|m| (m.row - 4).abs() <= 1 && (m.col - 4).abs() <= 1));
}

#[test]
fn test_pawn_blocked_ahead() {
    let mut board = Board::empty();
    let pawn = Piece::pawn(Color::White, sq(1, 4));
    board.place(pawn);

    board.place(Piece::knight(Color::Black, sq(3, 4)));
    assert_eq!(legal_moves(&pawn, &board), vec![sq(2, 4)]);

    board.place(Piece::knight(Color::Black, sq(2, 4)));
    assert!(legal_moves(&pawn, &board).is_empty());
}

#[test]
fn test_pawn_captures_diagonally_only() {
    let mut board = Board::empty();
    let pawn = Piece::pawn(Color::Black, sq(6, 3));
    board.place(pawn);
    board.place(Piece::rook(Color::White, sq(5, 2)));
    board.place(Piece::rook(Color::Black, sq(5, 4)));

    assert_eq!(
        sorted(legal_moves(&pawn, &board)),
        vec![sq(4, 3), sq(5, 2), sq(5, 3)]
    );
}

#[test]
fn test_en_passant_destination() {
    let mut board = Board::empty();
    let white = Piece::pawn(Color::White, sq(1, 3))
        .moved_to(sq(3, 3))
        .moved_to(sq(4, 3));
    let black = Piece::pawn(Color::Black, sq(6, 2)).moved_to(sq(4, 2));
    board.place(white);
    board.place(black);

    assert_eq!(legal_moves(&white, &board), vec![sq(5, 3)]);
    assert!(en_passant_candidates(&white, &board).is_empty());

    board.set_en_passant(Some(sq(4, 2)));
    assert_eq!(en_passant_candidates(&white, &board), vec![sq(5, 2)]);
    assert_eq!(
        sorted(legal_moves(&white, &board)),
        vec![sq(5, 2), sq(5, 3)]
    );
}

#[test]
fn test_pawn_attacks_ignore_occupancy() {
    let board = Board::startpos();
    let pawn = board.piece_at(sq(1, 0)).copied().expect("pawn on a2");
    assert_eq!(attacked_squares(&pawn, &board), vec![sq(2, 1)]);

    assert!(is_square_attacked(&board, sq(2, 5), Color::White));
    assert!(!is_square_attacked(&board, sq(3, 5), Color::White));
    assert!(is_square_attacked(&board, sq(5, 0), Color::Black));
}
