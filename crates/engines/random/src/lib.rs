//! Random Move Players
//!
//! Automated seats that pick uniformly among the moves that keep their own
//! king safe. Useful for:
//! - Exercising the rules engine over long games
//! - Opponents for a human while nothing stronger exists

use chess_core::{
    random_promotion, Color, GameState, Player, PromotionChooser, PromotionKind, Square,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(test)]
mod lib_tests;

/// Plays a random available move and promotes to a random piece.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible player; the same seed yields the same game.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromotionChooser for RandomPlayer {
    fn choose_promotion(&mut self, _color: Color) -> PromotionKind {
        random_promotion(&mut self.rng)
    }
}

impl Player for RandomPlayer {
    fn choose_move(&mut self, game: &mut GameState) -> Option<(Square, Square)> {
        game.random_move(&mut self.rng)
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}

/// The "computer" seat. Plays like [`RandomPlayer`] under its own name.
#[derive(Debug, Clone)]
pub struct ComputerPlayer {
    rng: StdRng,
}

impl ComputerPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ComputerPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromotionChooser for ComputerPlayer {
    fn choose_promotion(&mut self, _color: Color) -> PromotionKind {
        random_promotion(&mut self.rng)
    }
}

impl Player for ComputerPlayer {
    fn choose_move(&mut self, game: &mut GameState) -> Option<(Square, Square)> {
        game.random_move(&mut self.rng)
    }

    fn name(&self) -> &str {
        "Computer v1.0"
    }
}
