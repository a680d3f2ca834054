use std::collections::VecDeque;

use crate::{board::Board, move_tree::MoveTreeNode, piece::Piece, types::*};

/// Destinations `piece` can reach on `board`, in level order without
/// duplicates. Ignores whether the move would expose the mover's king.
pub fn legal_moves(piece: &Piece, board: &Board) -> Vec<Square> {
    if piece.is_pawn() {
        return pawn_moves(piece, board);
    }

    let tree = piece.possible_squares();
    let mut out = Vec::with_capacity(tree.node_count());
    // Breadth-first from the root's children: an empty square extends its
    // ray, an occupied one ends it (kept only if it can be taken).
    let mut queue: VecDeque<&MoveTreeNode> = tree.root().children().iter().collect();
    while let Some(node) = queue.pop_front() {
        match board.piece_at(node.loc) {
            None => {
                out.push(node.loc);
                queue.extend(node.children());
            }
            // Every node of the tree is a possible square, so an enemy piece
            // on it is capturable.
            Some(other) if other.color != piece.color => out.push(node.loc),
            Some(_) => {}
        }
    }
    out
}

fn pawn_moves(pawn: &Piece, board: &Board) -> Vec<Square> {
    let mut tree = pawn.possible_squares();
    let dir = pawn.color.forward();
    let Square { row, col } = pawn.position;

    for dc in [1, -1] {
        let diag = Square::new(row + dir, col + dc);
        let capturable = board
            .piece_at(diag)
            .is_some_and(|target| pawn.can_capture(target, board));
        if !capturable {
            tree.trim_branch(diag);
        }
    }

    // Pawns never capture straight ahead, and a blocked first square also
    // blocks the double step beneath it.
    let double = Square::new(row + 2 * dir, col);
    if board.is_occupied(double) {
        tree.trim_branch(double);
    }
    let front = Square::new(row + dir, col);
    if board.is_occupied(front) {
        tree.trim_branch(front);
    }

    let mut moves = tree.to_list();
    for sq in en_passant_candidates(pawn, board) {
        if !moves.contains(&sq) {
            moves.push(sq);
        }
    }
    moves
}

/// Empty squares `pawn` can move to by taking a pawn beside it en passant.
pub fn en_passant_candidates(pawn: &Piece, board: &Board) -> Vec<Square> {
    if !pawn.is_pawn() {
        return Vec::new();
    }
    let Square { row, col } = pawn.position;
    let mut out = Vec::new();
    for dc in [1, -1] {
        let beside = Square::new(row, col + dc);
        let Some(target) = board.piece_at(beside) else {
            continue;
        };
        let dest = Square::new(row + pawn.color.forward(), col + dc);
        if pawn.en_passant_target(target, board) && dest.in_bounds() {
            out.push(dest);
        }
    }
    out
}

/// Squares `piece` attacks. For everything but pawns these are its legal
/// moves; a pawn attacks both forward diagonals, occupied or not, and never
/// the squares straight ahead.
pub fn attacked_squares(piece: &Piece, board: &Board) -> Vec<Square> {
    if !piece.is_pawn() {
        return legal_moves(piece, board);
    }
    let Square { row, col } = piece.position;
    let dir = piece.color.forward();
    [1, -1]
        .into_iter()
        .map(|dc| Square::new(row + dir, col + dc))
        .filter(|sq| sq.in_bounds())
        .collect()
}

pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|p| attacked_squares(p, board).contains(&target))
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
