//! Terminal front end for the chess rules engine
//!
//! This crate provides:
//! - A turn loop that seats humans, random players and the computer
//! - A text board with the move history alongside
//! - JSON save files and a TOML config file
//!
//! # Usage
//!
//! ```bash
//! # Human (white) against the computer
//! cargo run -p chess_play -- --black computer
//!
//! # Resume a saved game
//! cargo run -p chess_play -- --load saves/friday.json
//! ```

mod config;
mod render;
mod saves;
mod session;

pub use config::*;
pub use render::*;
pub use saves::*;
pub use session::*;
