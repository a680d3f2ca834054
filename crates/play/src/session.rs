use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chess_core::{
    Color, GameState, GameStatus, Player, PlayerCommand, PlayerKind, PromotionChooser,
    PromotionKind,
};
use random_engine::{ComputerPlayer, RandomPlayer};
use tracing::{debug, warn};

use crate::config::PlayConfig;
use crate::render::render;
use crate::saves::save_game;

/// Why [`Session::run`] returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Finished(GameStatus),
    Saved(PathBuf),
    InputClosed,
    PlyLimit,
}

/// The automated player for a seat, or `None` for a human.
pub fn make_player(kind: PlayerKind, seed: Option<u64>) -> Option<Box<dyn Player>> {
    match kind {
        PlayerKind::Human => None,
        PlayerKind::Random => Some(Box::new(
            seed.map_or_else(RandomPlayer::new, RandomPlayer::seeded),
        )),
        PlayerKind::Computer => Some(Box::new(
            seed.map_or_else(ComputerPlayer::new, ComputerPlayer::seeded),
        )),
    }
}

fn side_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// One line from `input` without its line ending, `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

/// Asks a human on the terminal, re-prompting until the answer parses.
struct PromptChooser<'a, R, W> {
    input: &'a mut R,
    out: &'a mut W,
}

impl<R: BufRead, W: Write> PromotionChooser for PromptChooser<'_, R, W> {
    fn choose_promotion(&mut self, color: Color) -> PromotionKind {
        loop {
            let _ = write!(
                self.out,
                "{} pawn promotes to (1) queen (2) rook (3) bishop (4) knight: ",
                side_name(color)
            );
            let _ = self.out.flush();
            let line = match read_line(self.input) {
                Ok(Some(line)) => line,
                Ok(None) | Err(_) => {
                    warn!("no promotion answer, promoting to a queen");
                    return PromotionKind::Queen;
                }
            };
            match line.parse() {
                Ok(kind) => return kind,
                Err(e) => {
                    let _ = writeln!(self.out, "{e}");
                }
            }
        }
    }
}

/// A game driven from a line-based terminal.
pub struct Session<R, W> {
    game: GameState,
    seats: [Option<Box<dyn Player>>; 2],
    input: R,
    out: W,
    save_dir: PathBuf,
    max_plies: Option<u32>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Seats come from the players recorded in `game`; automated seats
    /// draw their seeds from `config`.
    pub fn new(game: GameState, config: &PlayConfig, input: R, out: W) -> Self {
        let seed = config.seed;
        let seats = [
            make_player(game.player(Color::White), seed),
            make_player(game.player(Color::Black), seed.map(|s| s.wrapping_add(1))),
        ];
        Self {
            game,
            seats,
            input,
            out,
            save_dir: config.save_dir.clone(),
            max_plies: config.max_plies,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn run(&mut self) -> Result<SessionEnd> {
        loop {
            let status = self.game.check_game_over();
            if status != GameStatus::Continue {
                write!(self.out, "{}", render(&self.game))?;
                writeln!(self.out, "{}", describe(status))?;
                return Ok(SessionEnd::Finished(status));
            }
            if let Some(limit) = self.max_plies {
                if self.game.history().len() >= limit as usize {
                    writeln!(self.out, "Stopping after {limit} plies.")?;
                    return Ok(SessionEnd::PlyLimit);
                }
            }

            let color = self.game.to_move();
            match self.seats[color.idx()].as_mut() {
                Some(bot) => {
                    let Some((from, to)) = bot.choose_move(&mut self.game) else {
                        continue;
                    };
                    let record = self.game.make_move(from, to, bot.as_mut())?;
                    writeln!(
                        self.out,
                        "{} ({}) plays {record}",
                        side_name(color),
                        bot.name()
                    )?;
                }
                None => {
                    if let Some(end) = self.human_turn(color)? {
                        return Ok(end);
                    }
                }
            }
        }
    }

    fn human_turn(&mut self, color: Color) -> Result<Option<SessionEnd>> {
        write!(self.out, "{}", render(&self.game))?;
        write!(self.out, "{} move: ", side_name(color))?;
        self.out.flush()?;

        let Some(line) = read_line(&mut self.input)? else {
            return Ok(Some(SessionEnd::InputClosed));
        };
        match PlayerCommand::parse(&line) {
            Ok(PlayerCommand::Move(from, to)) => {
                let mut chooser = PromptChooser {
                    input: &mut self.input,
                    out: &mut self.out,
                };
                match self.game.make_move(from, to, &mut chooser) {
                    Ok(record) => debug!(%record, "human move"),
                    Err(e) => writeln!(self.out, "{e}")?,
                }
            }
            Ok(PlayerCommand::Help) => self.print_help()?,
            Ok(PlayerCommand::Save) => return self.save(),
            Err(e) => writeln!(self.out, "{e}. Type 'help' for the commands.")?,
        }
        Ok(None)
    }

    fn save(&mut self) -> Result<Option<SessionEnd>> {
        write!(self.out, "Save as: ")?;
        self.out.flush()?;
        let Some(name) = read_line(&mut self.input)? else {
            return Ok(Some(SessionEnd::InputClosed));
        };
        match save_game(&self.game, &self.save_dir, &name) {
            Ok(path) => {
                writeln!(self.out, "Saved to {}", path.display())?;
                Ok(Some(SessionEnd::Saved(path)))
            }
            Err(e) => {
                writeln!(self.out, "Could not save: {e:#}")?;
                Ok(None)
            }
        }
    }

    fn print_help(&mut self) -> Result<()> {
        writeln!(self.out, "Enter a move as 'e2e4' or 'e2 to e4'.")?;
        writeln!(self.out, "Castle by moving the king two squares, e.g. 'e1g1'.")?;
        writeln!(self.out, "'save' stores the game and quits; 'help' shows this text.")?;
        if self.game.check_in_play() {
            writeln!(self.out, "You are in check. Moves that get you out:")?;
            for (from, targets) in self.game.available_moves() {
                let targets: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
                writeln!(self.out, "  {from}: {}", targets.join(" "))?;
            }
        }
        Ok(())
    }
}

pub fn describe(status: GameStatus) -> String {
    match status {
        GameStatus::Continue => "The game continues.".to_string(),
        GameStatus::Checkmate { winner } => {
            format!("Checkmate. {} wins.", side_name(winner))
        }
        GameStatus::Stalemate => "Stalemate. The game is drawn.".to_string(),
    }
}
