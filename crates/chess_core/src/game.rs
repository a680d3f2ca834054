//! Turn state machine: validation, commit with self-check rollback, and
//! game-over classification.

use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::error::{IllegalReason, MoveError, SetupError};
use crate::movegen::{en_passant_candidates, is_square_attacked, legal_moves};
use crate::notation::move_to_coord;
use crate::piece::{Piece, Role};
use crate::player::{PlayerKind, PromotionChooser};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastleSide {
    /// Toward column 0.
    Queenside,
    /// Toward column 7.
    Kingside,
}

impl CastleSide {
    fn rook_col(self) -> i8 {
        match self {
            CastleSide::Queenside => 0,
            CastleSide::Kingside => 7,
        }
    }

    /// Columns between king and rook that must be empty.
    fn between_cols(self) -> &'static [i8] {
        match self {
            CastleSide::Queenside => &[1, 2, 3],
            CastleSide::Kingside => &[5, 6],
        }
    }
}

/// A validated move, ready to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovePlan {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// Set when the king moves two squares to castle.
    pub castle: Option<CastleSide>,
    /// Square of the pawn taken en passant.
    pub en_passant: Option<Square>,
    pub promotes: bool,
}

/// Terminal result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

/// Answer of [`GameState::check_game_over`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Continue,
    Checkmate { winner: Color },
    Stalemate,
}

impl From<Outcome> for GameStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Checkmate { winner } => GameStatus::Checkmate { winner },
            Outcome::Stalemate => GameStatus::Stalemate,
        }
    }
}

/// One committed ply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub color: Color,
    pub piece: PieceKind,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PromotionKind>,
    pub castle: Option<CastleSide>,
    pub en_passant: bool,
    /// Whether the move left the opponent in check.
    pub check: bool,
}

/// Coordinate notation: `e2e4`, `e7e8q`.
impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&move_to_coord(self.from, self.to, self.promotion))
    }
}

/// Everything [`GameState::apply`] changed, so it can be put back exactly.
#[derive(Clone, Copy, Debug)]
struct Undo {
    mover: Piece,
    to: Square,
    captured: Option<Piece>,
    en_passant_victim: Option<Piece>,
    /// The rook as it stood before castling, and where it went.
    rook: Option<(Piece, Square)>,
    king_squares: [Square; 2],
    en_passant: Option<Square>,
}

/// A game in progress.
///
/// Only [`make_move`](Self::make_move) changes the position from outside.
/// Speculative moves (self-check tests, [`available_moves`](Self::available_moves))
/// are applied and undone before the call returns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    to_move: Color,
    /// Always equals the position of each color's king on `board`.
    king_squares: [Square; 2],
    history: Vec<MoveRecord>,
    /// Whether the side to move is in check. Recomputed after every commit.
    check_in_play: bool,
    outcome: Option<Outcome>,
    players: [PlayerKind; 2],
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard initial position, White to move, two human players.
    pub fn new() -> Self {
        Self {
            board: Board::startpos(),
            to_move: Color::White,
            king_squares: [Square::new(0, 4), Square::new(7, 4)],
            history: Vec::new(),
            check_in_play: false,
            outcome: None,
            players: [PlayerKind::Human; 2],
        }
    }

    pub fn with_players(mut self, white: PlayerKind, black: PlayerKind) -> Self {
        self.players = [white, black];
        self
    }

    /// Starts a game from an arbitrary position.
    pub fn from_board(board: Board, to_move: Color) -> Result<Self, SetupError> {
        let king_squares = board.validate()?;
        let mut game = Self {
            board,
            to_move,
            king_squares,
            history: Vec::new(),
            check_in_play: false,
            outcome: None,
            players: [PlayerKind::Human; 2],
        };
        game.check_in_play = game.in_check(to_move);
        Ok(game)
    }

    /// Placement field plus an optional side-to-move field (`w` or `b`,
    /// default `w`). Remaining FEN fields are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let board = Board::from_fen(fen)?;
        let to_move = match fen.split_whitespace().nth(1) {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(SetupError::InvalidFen(format!(
                    "invalid side to move {other:?}"
                )));
            }
        };
        Self::from_board(board, to_move)
    }

    /// Re-checks every invariant; used after deserializing a saved game.
    pub fn verify(&self) -> Result<(), SetupError> {
        let actual = self.board.validate()?;
        for color in Color::ALL {
            let cached = self.king_squares[color.idx()];
            if cached != actual[color.idx()] {
                return Err(SetupError::KingCacheMismatch {
                    color,
                    cached,
                    actual: actual[color.idx()],
                });
            }
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.idx()]
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn check_in_play(&self) -> bool {
        self.check_in_play
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn player(&self, color: Color) -> PlayerKind {
        self.players[color.idx()]
    }

    /// Occupancy-filtered destinations of `piece`, ignoring self-check.
    pub fn legal_moves(&self, piece: &Piece) -> Vec<Square> {
        legal_moves(piece, &self.board)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    pub fn validate_move(&self, from: Square, to: Square) -> Result<MovePlan, MoveError> {
        let piece = *self
            .board
            .piece_at(from)
            .ok_or(MoveError::NoPieceAtSource(from))?;
        if piece.color != self.to_move {
            return Err(MoveError::WrongTurn(from));
        }

        let mut plan = MovePlan {
            piece,
            from,
            to,
            castle: None,
            en_passant: None,
            promotes: piece.is_pawn() && to.row == piece.color.promotion_rank(),
        };

        if legal_moves(&piece, &self.board).contains(&to) {
            if en_passant_candidates(&piece, &self.board).contains(&to) {
                plan.en_passant = Some(Square::new(from.row, to.col));
            }
            return Ok(plan);
        }

        if let Role::King { moved: false } = piece.role {
            if let Some(side) = self.can_castle(from, to) {
                plan.castle = Some(side);
                return Ok(plan);
            }
        }

        let reason = match self.board.piece_at(to) {
            Some(p) if p.color == piece.color => IllegalReason::OwnPieceBlocked,
            Some(_) => IllegalReason::CannotCapture,
            None => IllegalReason::Unreachable,
        };
        Err(MoveError::IllegalMove {
            kind: piece.kind(),
            from,
            to,
            reason,
        })
    }

    /// Whether the king on `from` may castle by moving to `to`.
    ///
    /// Requires an unmoved king and an unmoved rook of the same color in the
    /// corner `to` points at, an empty path between them, and that the king
    /// neither starts on, crosses, nor lands on an attacked square.
    pub fn can_castle(&self, from: Square, to: Square) -> Option<CastleSide> {
        let king = self.board.piece_at(from)?;
        if !king.is_king() || king.has_moved() || from.row != to.row {
            return None;
        }
        let side = match to.col - from.col {
            -2 => CastleSide::Queenside,
            2 => CastleSide::Kingside,
            _ => return None,
        };

        let row = from.row;
        let rook_ready = self
            .board
            .piece_at(Square::new(row, side.rook_col()))
            .is_some_and(|r| r.color == king.color && r.role == Role::Rook { moved: false });
        if !rook_ready {
            return None;
        }
        if side
            .between_cols()
            .iter()
            .any(|&col| self.board.is_occupied(Square::new(row, col)))
        {
            return None;
        }

        let enemy = king.color.other();
        let transit = Square::new(row, (from.col + to.col) / 2);
        if [from, transit, to]
            .into_iter()
            .any(|sq| is_square_attacked(&self.board, sq, enemy))
        {
            return None;
        }
        Some(side)
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Validates and plays `from -> to` for the side to move.
    ///
    /// A move that leaves the mover's own king attacked is undone and
    /// reported as [`MoveError::SelfCheck`]; the state is then exactly as it
    /// was before the call. `chooser` is asked for a promotion kind only once
    /// the move is known to be legal.
    pub fn make_move<C>(
        &mut self,
        from: Square,
        to: Square,
        chooser: &mut C,
    ) -> Result<MoveRecord, MoveError>
    where
        C: PromotionChooser + ?Sized,
    {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        let plan = self.validate_move(from, to)?;
        let color = plan.piece.color;

        let undo = self.apply(&plan);
        if self.in_check(color) {
            self.undo(undo);
            debug!(%color, %from, %to, "rejected move that leaves own king in check");
            return Err(MoveError::SelfCheck(plan.piece.kind()));
        }

        let promotion = if plan.promotes {
            let kind = chooser.choose_promotion(color);
            self.board.place(Piece::promoted(color, kind, to));
            Some(kind)
        } else {
            None
        };

        self.to_move = color.other();
        self.check_in_play = self.in_check(self.to_move);

        let record = MoveRecord {
            color,
            piece: plan.piece.kind(),
            from,
            to,
            captured: undo.captured.or(undo.en_passant_victim).map(|p| p.kind()),
            promotion,
            castle: plan.castle,
            en_passant: plan.en_passant.is_some(),
            check: self.check_in_play,
        };
        debug!(%color, mv = %record, check = record.check, "move committed");
        self.history.push(record.clone());
        Ok(record)
    }

    /// Plays `plan` on the board, promoting to a queen provisionally.
    fn apply(&mut self, plan: &MovePlan) -> Undo {
        let mover = plan.piece;
        let mut undo = Undo {
            mover,
            to: plan.to,
            captured: None,
            en_passant_victim: None,
            rook: None,
            king_squares: self.king_squares,
            en_passant: self.board.en_passant(),
        };

        if let Some(victim) = plan.en_passant {
            undo.en_passant_victim = self.board.take(victim);
        }

        self.board.take(plan.from);
        let landed = if plan.promotes {
            Piece::promoted(mover.color, PromotionKind::Queen, plan.to)
        } else {
            mover.moved_to(plan.to)
        };
        undo.captured = self.board.place(landed);

        if mover.is_king() {
            self.king_squares[mover.color.idx()] = plan.to;
        }

        if let Some(side) = plan.castle {
            let rook_from = Square::new(plan.from.row, side.rook_col());
            let rook_to = Square::new(plan.from.row, (plan.from.col + plan.to.col) / 2);
            if let Some(rook) = self.board.take(rook_from) {
                self.board.place(rook.moved_to(rook_to));
                undo.rook = Some((rook, rook_to));
            }
        }

        let double_step = mover.is_pawn() && (plan.to.row - plan.from.row).abs() == 2;
        self.board.set_en_passant(double_step.then_some(plan.to));
        undo
    }

    fn undo(&mut self, undo: Undo) {
        if let Some((rook, rook_to)) = undo.rook {
            self.board.take(rook_to);
            self.board.place(rook);
        }
        self.board.take(undo.to);
        if let Some(captured) = undo.captured {
            self.board.place(captured);
        }
        if let Some(victim) = undo.en_passant_victim {
            self.board.place(victim);
        }
        self.board.place(undo.mover);
        self.king_squares = undo.king_squares;
        self.board.set_en_passant(undo.en_passant);
    }

    /// Applies `from -> to`, records whether the mover's king survives, and
    /// rolls back unconditionally. Illegal moves forecast as unsafe.
    fn forecast(&mut self, from: Square, to: Square) -> bool {
        let Ok(plan) = self.validate_move(from, to) else {
            return false;
        };
        let undo = self.apply(&plan);
        let safe = !self.in_check(plan.piece.color);
        self.undo(undo);
        trace!(%from, %to, safe, "forecast");
        safe
    }

    // =========================================================================
    // Check detection
    // =========================================================================

    /// First enemy piece found attacking `color`'s king.
    fn attacker_of(&self, color: Color) -> Option<Piece> {
        let king = self.king_squares[color.idx()];
        self.board
            .pieces_of(color.other())
            .find(|p| legal_moves(p, &self.board).contains(&king))
            .copied()
    }

    /// The piece giving check, if any. White's pieces are examined first
    /// (against the black king), then Black's.
    pub fn check_check(&self) -> Option<Piece> {
        self.attacker_of(Color::Black)
            .or_else(|| self.attacker_of(Color::White))
    }

    /// Every enemy piece attacking `color`'s king; two or more is double check.
    pub fn checkers(&self, color: Color) -> Vec<Piece> {
        let king = self.king_squares[color.idx()];
        self.board
            .pieces_of(color.other())
            .filter(|p| legal_moves(p, &self.board).contains(&king))
            .copied()
            .collect()
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.attacker_of(color).is_some()
    }

    // =========================================================================
    // Game over
    // =========================================================================

    /// Moves of the side to move that keep its own king safe, keyed by origin
    /// square. Pieces with no such move are left out.
    pub fn available_moves(&mut self) -> BTreeMap<Square, Vec<Square>> {
        let color = self.to_move;
        let pieces: Vec<Piece> = self.board.pieces_of(color).copied().collect();
        let mut out = BTreeMap::new();

        for piece in pieces {
            let from = piece.position;
            let mut targets = legal_moves(&piece, &self.board);
            if piece.is_king() && !piece.has_moved() {
                for dc in [-2, 2] {
                    let to = Square::new(from.row, from.col + dc);
                    if self.can_castle(from, to).is_some() {
                        targets.push(to);
                    }
                }
            }
            let safe: Vec<Square> = targets
                .into_iter()
                .filter(|&to| self.forecast(from, to))
                .collect();
            if !safe.is_empty() {
                out.insert(from, safe);
            }
        }
        out
    }

    /// Classifies the position and records a terminal outcome.
    pub fn check_game_over(&mut self) -> GameStatus {
        if let Some(outcome) = self.outcome {
            return outcome.into();
        }
        let immovable = self.available_moves().is_empty();
        let outcome = match (self.check_in_play, immovable) {
            (true, true) => Outcome::Checkmate {
                winner: self.to_move.other(),
            },
            (false, true) => Outcome::Stalemate,
            _ => return GameStatus::Continue,
        };
        info!(?outcome, plies = self.history.len(), "game over");
        self.outcome = Some(outcome);
        outcome.into()
    }

    /// A uniformly random piece with a safe move, then a uniformly random
    /// destination for it.
    pub fn random_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(Square, Square)> {
        let moves = self.available_moves();
        let origins: Vec<Square> = moves.keys().copied().collect();
        let from = *origins.choose(rng)?;
        let to = *moves.get(&from)?.choose(rng)?;
        Some((from, to))
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
