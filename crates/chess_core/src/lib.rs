pub mod board;
pub mod error;
pub mod game;
pub mod move_tree;
pub mod movegen;
pub mod notation;
pub mod piece;
pub mod player;
pub mod types;

// Re-export the rules engine at the crate root
pub use board::*;
pub use error::*;
pub use game::*;
pub use move_tree::*;
pub use movegen::*;
pub use notation::*;
pub use piece::*;
pub use player::*;
pub use types::*;
