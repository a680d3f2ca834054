use std::collections::HashSet;

use super::*;
use chess_core::{GameStatus, PieceKind};

#[test]
fn random_player_returns_available_move() {
    let mut player = RandomPlayer::seeded(1);
    let mut game = GameState::new();

    let (from, to) = player.choose_move(&mut game).expect("opening has moves");

    assert!(game.available_moves()[&from].contains(&to));
    assert_eq!(game, GameState::new());
}

#[test]
fn random_player_handles_checkmate() {
    let mut player = RandomPlayer::seeded(2);
    let mut game =
        GameState::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
            .expect("scholar's mate");

    assert!(player.choose_move(&mut game).is_none());
}

#[test]
fn random_player_handles_stalemate() {
    let mut player = RandomPlayer::seeded(3);
    let mut game = GameState::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").expect("stalemate");

    assert!(player.choose_move(&mut game).is_none());
}

#[test]
fn seeded_players_agree() {
    let mut a = RandomPlayer::seeded(42);
    let mut b = RandomPlayer::seeded(42);
    let mut game = GameState::new();
    for _ in 0..10 {
        let mv = a.choose_move(&mut game);
        assert_eq!(mv, b.choose_move(&mut game));
        let Some((from, to)) = mv else { break };
        game.make_move(from, to, &mut a).expect("available move");
    }
}

#[test]
fn computer_promotion_lands_on_board() {
    let mut player = ComputerPlayer::seeded(0);
    let mut game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w").expect("fixture");
    let record = game
        .make_move(Square::new(6, 0), Square::new(7, 0), &mut player)
        .expect("promotion");
    let kind = record.promotion.expect("pawn reached the last rank");
    let piece = game.board().piece_at(Square::new(7, 0)).expect("promoted piece");
    assert_eq!(piece.kind(), PieceKind::from(kind));
}

#[test]
fn computer_promotes_to_every_kind() {
    let mut player = ComputerPlayer::seeded(5);
    let seen: HashSet<PromotionKind> = (0..64)
        .map(|_| player.choose_promotion(Color::White))
        .collect();
    assert_eq!(seen.len(), 4);
}

#[test]
fn self_play_terminates() {
    let mut white = RandomPlayer::seeded(11);
    let mut black = ComputerPlayer::seeded(12);
    let mut game = GameState::new();

    for _ in 0..200 {
        if game.check_game_over() != GameStatus::Continue {
            break;
        }
        let player: &mut dyn Player = match game.to_move() {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let (from, to) = player.choose_move(&mut game).expect("game not over");
        game.make_move(from, to, player).expect("available move");
        game.verify().expect("invariants hold");
    }
}
