use std::fmt::Write;

use chess_core::{Color, GameState, MoveRecord, Piece, PieceKind, Square};

/// How many move pairs fit beside the board.
const HISTORY_ROWS: usize = 8;

pub fn piece_char(piece: &Piece) -> char {
    let c = match piece.kind() {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match piece.color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

/// Numbered move pairs, most recent last: `12. e2e4 e7e5`.
pub fn history_lines(history: &[MoveRecord]) -> Vec<String> {
    history
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let mut line = format!("{:>3}. {}", i + 1, pair[0]);
            if let Some(reply) = pair.get(1) {
                let _ = write!(line, " {reply}");
            }
            line
        })
        .collect()
}

/// The board from White's side, rank 8 at the top, with the latest moves
/// in a column on the right and a status line underneath.
pub fn render(game: &GameState) -> String {
    let board = game.board();
    let lines = history_lines(game.history());
    let recent = &lines[lines.len().saturating_sub(HISTORY_ROWS)..];

    let mut out = String::new();
    for (i, row) in (0..8i8).rev().enumerate() {
        let _ = write!(out, "{} ", row + 1);
        for col in 0..8 {
            let c = board.piece_at(Square::new(row, col)).map_or('.', piece_char);
            let _ = write!(out, " {c}");
        }
        if let Some(line) = recent.get(i) {
            let _ = write!(out, "    {line}");
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");

    let side = match game.to_move() {
        Color::White => "White",
        Color::Black => "Black",
    };
    let _ = write!(out, "{side} to move");
    if game.check_in_play() {
        out.push_str(" (check)");
    }
    out.push('\n');
    out
}
