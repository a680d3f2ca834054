use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::piece::{Piece, Role};
use crate::types::*;

/// An 8x8 grid of optional pieces, indexed `[row][col]`.
///
/// Pieces only enter through [`Board::place`], which files them under their
/// own `position`, so a piece's stored square always matches its cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
    /// Square of the pawn that double-stepped on the previous ply.
    en_passant: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
            en_passant: None,
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty();
        for color in Color::ALL {
            let back = color.back_rank();
            let pawns = back + color.forward();
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                let col = col as i8;
                b.place(Piece::new(color, kind, Square::new(back, col)));
                b.place(Piece::pawn(color, Square::new(pawns, col)));
            }
        }
        b
    }

    /// Builds a board from the piece-placement field of a FEN string
    /// (`"k7/2K5/1Q6/8/8/8/8/8"`). Anything after the first space is ignored.
    ///
    /// FEN carries no per-piece history, so it is inferred from the square:
    /// pawns on their starting rank have not moved, kings on e1/e8 and rooks
    /// on their home corners have not moved.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let placement = fen.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(SetupError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let row: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut col: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if !(1..=8).contains(&d) || col + d as i8 > 8 {
                        return Err(SetupError::InvalidFen(format!(
                            "bad empty-square count {ch:?} in rank {}",
                            row + 1
                        )));
                    }
                    col += d as i8;
                } else {
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => {
                            return Err(SetupError::InvalidFen(format!(
                                "invalid piece char {ch:?}"
                            )));
                        }
                    };
                    let square = Square::new(row, col);
                    if !square.in_bounds() {
                        return Err(SetupError::InvalidFen(format!(
                            "too many files in rank {}",
                            row + 1
                        )));
                    }
                    board.place(inferred_piece(color, kind, square));
                    col += 1;
                }
            }
            if col != 8 {
                return Err(SetupError::InvalidFen(format!(
                    "rank {} covers {col} files",
                    row + 1
                )));
            }
        }
        Ok(board)
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        if !sq.in_bounds() {
            return None;
        }
        self.cells[sq.row as usize][sq.col as usize].as_ref()
    }

    pub fn is_occupied(&self, sq: Square) -> bool {
        self.piece_at(sq).is_some()
    }

    /// Puts `piece` on its own square, returning whatever stood there.
    ///
    /// # Panics
    /// If the piece's position is off the board.
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        let sq = piece.position;
        assert!(sq.in_bounds(), "cannot place {piece} off the board");
        self.cells[sq.row as usize][sq.col as usize].replace(piece)
    }

    /// Empties `sq`, returning its occupant.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        if !sq.in_bounds() {
            return None;
        }
        self.cells[sq.row as usize][sq.col as usize].take()
    }

    /// All pieces in row-major order from a1.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    /// White pieces and black pieces, each in row-major order.
    pub fn pieces_by_color(&self) -> (Vec<Piece>, Vec<Piece>) {
        self.pieces().copied().partition(|p| p.color == Color::White)
    }

    /// Scans for the king of `color`.
    pub fn king_sq(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|p| p.is_king())
            .map(|p| p.position)
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    /// Checks that each color has exactly one king and every piece's stored
    /// position matches its cell. Returns the king squares.
    pub fn validate(&self) -> Result<[Square; 2], SetupError> {
        for row in 0..8i8 {
            for col in 0..8i8 {
                let cell = Square::new(row, col);
                if let Some(p) = self.piece_at(cell) {
                    if p.position != cell {
                        return Err(SetupError::PositionMismatch {
                            cell,
                            stored: p.position,
                        });
                    }
                }
            }
        }

        let mut kings = [None, None];
        for color in Color::ALL {
            for king in self.pieces_of(color).filter(|p| p.is_king()) {
                if kings[color.idx()].replace(king.position).is_some() {
                    return Err(SetupError::ExtraKing(color));
                }
            }
        }
        let white = kings[0].ok_or(SetupError::MissingKing(Color::White))?;
        let black = kings[1].ok_or(SetupError::MissingKing(Color::Black))?;
        Ok([white, black])
    }
}

fn inferred_piece(color: Color, kind: PieceKind, square: Square) -> Piece {
    let home = square.row == color.back_rank();
    let role = match kind {
        PieceKind::Pawn => {
            let start = square.row == color.back_rank() + color.forward();
            Role::Pawn {
                move_count: if start { 0 } else { 1 },
            }
        }
        PieceKind::King => Role::King {
            moved: !(home && square.col == 4),
        },
        PieceKind::Rook => Role::Rook {
            moved: !(home && (square.col == 0 || square.col == 7)),
        },
        other => Role::unmoved(other),
    };
    Piece {
        color,
        position: square,
        role,
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
