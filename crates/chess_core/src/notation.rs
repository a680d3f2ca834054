use crate::error::ParseError;
use crate::types::*;

/// Coordinate notation for a move: `e2e4`, or `e7e8q` with a promotion.
pub fn move_to_coord(from: Square, to: Square, promotion: Option<PromotionKind>) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(from));
    s.push_str(&sq_to_coord(to));
    if let Some(kind) = promotion {
        s.push(kind.letter());
    }
    s
}

/// Parses `a2a4`, `a2 a4` or `a2 to a4` (any case, surrounding whitespace
/// ignored) into `(from, to)`.
///
/// Only the syntax is checked; whether the move is legal is up to the game.
pub fn parse_move(input: &str) -> Result<(Square, Square), ParseError> {
    let text = input.trim().to_ascii_lowercase();
    let invalid = || ParseError::InvalidMove(input.trim().to_string());

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let (from, to) = match tokens.as_slice() {
        [joined] if joined.len() == 4 && joined.is_ascii() => (&joined[0..2], &joined[2..4]),
        [from, to] | [from, "to", to] => (*from, *to),
        _ => return Err(invalid()),
    };
    let from = coord_to_sq(from).ok_or_else(invalid)?;
    let to = coord_to_sq(to).ok_or_else(invalid)?;
    Ok((from, to))
}

/// A line typed by a human player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    Move(Square, Square),
    /// Save the game and leave.
    Save,
    Help,
}

impl PlayerCommand {
    pub fn parse(input: &str) -> Result<PlayerCommand, ParseError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "save" | "quit" | "exit" | "end" => Ok(PlayerCommand::Save),
            "help" | "tutorial" | "?" => Ok(PlayerCommand::Help),
            _ => parse_move(input).map(|(from, to)| PlayerCommand::Move(from, to)),
        }
    }
}
