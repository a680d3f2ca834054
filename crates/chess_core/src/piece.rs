//! Pieces and their move templates.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::move_tree::{MoveTree, MoveTreeNode};
use crate::types::{Color, PieceKind, PromotionKind, Square};

/// Per-kind payload. Only pawns, kings and rooks carry state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// `move_count` is 0 until the first move and 1 right after it.
    Pawn { move_count: u16 },
    Knight,
    Bishop,
    Rook { moved: bool },
    Queen,
    King { moved: bool },
}

impl Role {
    pub fn kind(self) -> PieceKind {
        match self {
            Role::Pawn { .. } => PieceKind::Pawn,
            Role::Knight => PieceKind::Knight,
            Role::Bishop => PieceKind::Bishop,
            Role::Rook { .. } => PieceKind::Rook,
            Role::Queen => PieceKind::Queen,
            Role::King { .. } => PieceKind::King,
        }
    }

    /// A fresh role that has never moved.
    pub fn unmoved(kind: PieceKind) -> Role {
        match kind {
            PieceKind::Pawn => Role::Pawn { move_count: 0 },
            PieceKind::Knight => Role::Knight,
            PieceKind::Bishop => Role::Bishop,
            PieceKind::Rook => Role::Rook { moved: false },
            PieceKind::Queen => Role::Queen,
            PieceKind::King => Role::King { moved: false },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub position: Square,
    pub role: Role,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, position: Square) -> Self {
        Self {
            color,
            position,
            role: Role::unmoved(kind),
        }
    }

    pub fn pawn(color: Color, position: Square) -> Self {
        Self::new(color, PieceKind::Pawn, position)
    }
    pub fn knight(color: Color, position: Square) -> Self {
        Self::new(color, PieceKind::Knight, position)
    }
    pub fn bishop(color: Color, position: Square) -> Self {
        Self::new(color, PieceKind::Bishop, position)
    }
    pub fn rook(color: Color, position: Square) -> Self {
        Self::new(color, PieceKind::Rook, position)
    }
    pub fn queen(color: Color, position: Square) -> Self {
        Self::new(color, PieceKind::Queen, position)
    }
    pub fn king(color: Color, position: Square) -> Self {
        Self::new(color, PieceKind::King, position)
    }

    /// The piece a pawn turns into. Promoted rooks never castle.
    pub fn promoted(color: Color, kind: PromotionKind, position: Square) -> Self {
        let role = match kind {
            PromotionKind::Queen => Role::Queen,
            PromotionKind::Rook => Role::Rook { moved: true },
            PromotionKind::Bishop => Role::Bishop,
            PromotionKind::Knight => Role::Knight,
        };
        Self {
            color,
            position,
            role,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.role.kind()
    }

    pub fn points(&self) -> u32 {
        self.kind().points()
    }

    /// Orders two pieces by point value.
    pub fn cmp_points(&self, other: &Piece) -> Ordering {
        self.points().cmp(&other.points())
    }

    pub fn is_pawn(&self) -> bool {
        matches!(self.role, Role::Pawn { .. })
    }

    pub fn is_king(&self) -> bool {
        matches!(self.role, Role::King { .. })
    }

    /// Pawn move count, `None` for other kinds.
    pub fn move_count(&self) -> Option<u16> {
        match self.role {
            Role::Pawn { move_count } => Some(move_count),
            _ => None,
        }
    }

    /// Whether the piece has left its starting square. Knights, bishops and
    /// queens do not track this and report `false`.
    pub fn has_moved(&self) -> bool {
        match self.role {
            Role::King { moved } | Role::Rook { moved } => moved,
            Role::Pawn { move_count } => move_count > 0,
            _ => false,
        }
    }

    /// The same piece relocated to `to`, with its move bookkeeping advanced.
    pub fn moved_to(self, to: Square) -> Piece {
        let role = match self.role {
            Role::Pawn { move_count } => Role::Pawn {
                move_count: move_count.saturating_add(1),
            },
            Role::King { .. } => Role::King { moved: true },
            Role::Rook { .. } => Role::Rook { moved: true },
            other => other,
        };
        Piece {
            position: to,
            role,
            ..self
        }
    }

    /// The move template for this piece, relative to its own square.
    pub fn template(&self) -> &'static MoveTree {
        match self.role {
            Role::Pawn { move_count } => {
                let first = usize::from(move_count == 0);
                &PAWN_TEMPLATES[self.color.idx()][first]
            }
            Role::Knight => &*KNIGHT_TEMPLATE,
            Role::Bishop => &*BISHOP_TEMPLATE,
            Role::Rook { .. } => &*ROOK_TEMPLATE,
            Role::Queen => &*QUEEN_TEMPLATE,
            Role::King { .. } => &*KING_TEMPLATE,
        }
    }

    /// The template translated to this piece's square with every off-board
    /// branch cut. Ignores occupancy.
    pub fn possible_squares(&self) -> MoveTree {
        let mut tree = self.template().clone();
        tree.translate(self.position);
        tree.prune(Square::in_bounds);
        tree
    }

    /// Whether this piece may take `target` where it stands.
    ///
    /// Pawns take diagonally forward, or en passant (see
    /// [`en_passant_target`](Self::en_passant_target)). Every other kind takes
    /// any enemy on one of its possible squares.
    pub fn can_capture(&self, target: &Piece, board: &Board) -> bool {
        if target.color == self.color {
            return false;
        }
        match self.role {
            Role::Pawn { .. } => {
                let ahead = target.position.row == self.position.row + self.color.forward();
                let diagonal = (target.position.col - self.position.col).abs() == 1;
                (ahead && diagonal) || self.en_passant_target(target, board)
            }
            _ => self.possible_squares().to_list().contains(&target.position),
        }
    }

    /// Whether `target` is an enemy pawn this pawn may take en passant: it
    /// stands beside this pawn, has made exactly one move, and that move was
    /// the double step the board recorded on the previous ply.
    pub fn en_passant_target(&self, target: &Piece, board: &Board) -> bool {
        if !self.is_pawn() || target.color == self.color {
            return false;
        }
        let beside = target.position.row == self.position.row
            && (target.position.col - self.position.col).abs() == 1;
        beside
            && target.move_count() == Some(1)
            && board.en_passant() == Some(target.position)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} at {}", self.color, self.kind(), self.position)
    }
}

// =============================================================================
// Templates
// =============================================================================
//
// Built once and only ever cloned; pruning a shared template in place would
// corrupt every piece of that kind.

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const RAY_LEN: i8 = 7;

fn ray_tree(dirs: &[(i8, i8)]) -> MoveTree {
    let mut tree = MoveTree::new(Square::new(0, 0));
    for &step in dirs {
        tree.root_mut().add_child(MoveTreeNode::ray(step.into(), RAY_LEN));
    }
    tree
}

fn flat_tree(offsets: impl IntoIterator<Item = (i8, i8)>) -> MoveTree {
    let mut tree = MoveTree::new(Square::new(0, 0));
    for offset in offsets {
        tree.root_mut().add_child(offset);
    }
    tree
}

fn pawn_tree(color: Color, first_move: bool) -> MoveTree {
    let dir = color.forward();
    let mut tree = MoveTree::new(Square::new(0, 0));
    let forward = tree.root_mut().add_child((dir, 0));
    if first_move {
        forward.add_child((2 * dir, 0));
    }
    tree.root_mut().add_child((dir, 1));
    tree.root_mut().add_child((dir, -1));
    tree
}

fn knight_offsets() -> impl Iterator<Item = (i8, i8)> {
    let deltas = [1i8, -1, 2, -2];
    deltas.into_iter().flat_map(move |a| {
        deltas
            .into_iter()
            .filter(move |&b| a.abs() != b.abs())
            .map(move |b| (a, b))
    })
}

fn king_offsets() -> impl Iterator<Item = (i8, i8)> {
    (-1i8..=1)
        .flat_map(|r| (-1i8..=1).map(move |c| (r, c)))
        .filter(|&d| d != (0, 0))
}

/// Indexed by `[color][first_move as usize]`.
static PAWN_TEMPLATES: LazyLock<[[MoveTree; 2]; 2]> = LazyLock::new(|| {
    [
        [pawn_tree(Color::White, false), pawn_tree(Color::White, true)],
        [pawn_tree(Color::Black, false), pawn_tree(Color::Black, true)],
    ]
});
static KNIGHT_TEMPLATE: LazyLock<MoveTree> = LazyLock::new(|| flat_tree(knight_offsets()));
static KING_TEMPLATE: LazyLock<MoveTree> = LazyLock::new(|| flat_tree(king_offsets()));
static BISHOP_TEMPLATE: LazyLock<MoveTree> = LazyLock::new(|| ray_tree(&DIAGONALS));
static ROOK_TEMPLATE: LazyLock<MoveTree> = LazyLock::new(|| ray_tree(&ORTHOGONALS));
static QUEEN_TEMPLATE: LazyLock<MoveTree> = LazyLock::new(|| {
    let mut dirs = DIAGONALS.to_vec();
    dirs.extend_from_slice(&ORTHOGONALS);
    ray_tree(&dirs)
});

#[cfg(test)]
#[path = "piece_tests.rs"]
mod piece_tests;
