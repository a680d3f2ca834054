//! Error types surfaced by the rules engine.
//!
//! Nothing here is retried internally; every failure is returned to the
//! caller as soon as it is detected.

use thiserror::Error;

use crate::types::{Color, PieceKind, Square};

/// Why a destination is not in a piece's legal-move set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalReason {
    /// The destination holds a piece of the mover's own color.
    OwnPieceBlocked,
    /// The destination holds an enemy piece this piece cannot take.
    CannotCapture,
    /// The destination is empty but out of reach.
    Unreachable,
}

impl std::fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalReason::OwnPieceBlocked => write!(f, "the square holds one of your own pieces"),
            IllegalReason::CannotCapture => write!(f, "the piece there cannot be captured"),
            IllegalReason::Unreachable => write!(f, "the square is out of reach"),
        }
    }
}

/// Rejection of a requested move.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece at {0}")]
    NoPieceAtSource(Square),
    #[error("you cannot move the opponent's piece at {0}")]
    WrongTurn(Square),
    #[error("your {kind} cannot move from {from} to {to}: {reason}")]
    IllegalMove {
        kind: PieceKind,
        from: Square,
        to: Square,
        reason: IllegalReason,
    },
    #[error("moving that {0} leaves your king in check")]
    SelfCheck(PieceKind),
    #[error("the game is already over")]
    GameOver,
}

impl MoveError {
    /// Sub-kind of an [`MoveError::IllegalMove`], for diagnostics.
    pub fn illegal_reason(&self) -> Option<IllegalReason> {
        match self {
            MoveError::IllegalMove { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// A position that violates the board invariants.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("the {0} king is missing")]
    MissingKing(Color),
    #[error("more than one {0} king on the board")]
    ExtraKing(Color),
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
    #[error("cached {color} king square {cached} does not match the board ({actual})")]
    KingCacheMismatch {
        color: Color,
        cached: Square,
        actual: Square,
    },
    #[error("piece stored at {cell} believes it stands on {stored}")]
    PositionMismatch { cell: Square, stored: Square },
}

/// Malformed notation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid square notation: {0:?}")]
    InvalidSquare(String),
    #[error("invalid move notation: {0:?}")]
    InvalidMove(String),
    #[error("invalid promotion choice: {0:?}")]
    InvalidPromotion(String),
}
