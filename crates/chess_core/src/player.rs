use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::GameState;
use crate::types::{Color, PromotionKind, Square};

/// Who controls a color. Stored with the game so a saved game resumes with
/// the same seats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    #[default]
    Human,
    Random,
    Computer,
}

impl FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "random" => Ok(PlayerKind::Random),
            "computer" | "cpu" => Ok(PlayerKind::Computer),
            other => Err(format!(
                "unknown player kind {other:?} (expected human, random or computer)"
            )),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayerKind::Human => "human",
            PlayerKind::Random => "random",
            PlayerKind::Computer => "computer",
        })
    }
}

/// Picks the piece a pawn becomes on the last rank.
///
/// Any `FnMut(Color) -> PromotionKind` closure is a chooser.
pub trait PromotionChooser {
    fn choose_promotion(&mut self, color: Color) -> PromotionKind;
}

impl<F> PromotionChooser for F
where
    F: FnMut(Color) -> PromotionKind,
{
    fn choose_promotion(&mut self, color: Color) -> PromotionKind {
        self(color)
    }
}

/// Always promotes to a queen.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoQueen;

impl PromotionChooser for AutoQueen {
    fn choose_promotion(&mut self, _color: Color) -> PromotionKind {
        PromotionKind::Queen
    }
}

/// Uniformly random promotion kind.
pub fn random_promotion<R: Rng + ?Sized>(rng: &mut R) -> PromotionKind {
    PromotionKind::ALL[rng.gen_range(0..PromotionKind::ALL.len())]
}

/// An automated seat at the board.
pub trait Player: PromotionChooser {
    /// The move to play for the side to move, or `None` when there is none.
    ///
    /// `game` is borrowed mutably only so the player can forecast moves; it
    /// is returned unchanged.
    fn choose_move(&mut self, game: &mut GameState) -> Option<(Square, Square)>;

    fn name(&self) -> &str;
}
