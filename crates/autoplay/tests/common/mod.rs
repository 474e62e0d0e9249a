#![allow(dead_code)]

use fireside_core::{
    builtin_deck, CardClass, Content, EventBus, Game, GameConfig, PlayerSetup,
};
use std::sync::Arc;

pub fn new_game(first: CardClass, second: CardClass, seed: u64) -> Game {
    let setups = [
        PlayerSetup::new("Player1", builtin_deck(first)),
        PlayerSetup::new("Player2", builtin_deck(second)),
    ];
    Game::new(
        Arc::new(Content::builtin()),
        GameConfig::default(),
        setups,
        seed,
    )
    .expect("game")
}

pub fn started(seed: u64) -> Game {
    let mut game = new_game(CardClass::Warlock, CardClass::Mage, seed);
    game.start(&mut EventBus::default()).expect("start");
    game
}

/// Started game with empty hands and boards where player one has no mana.
pub fn blank() -> Game {
    let mut game = new_game(CardClass::Mage, CardClass::Warrior, 5);
    game.start(&mut EventBus::default()).expect("start");
    for player in &mut game.players {
        player.hand.clear();
        player.board.clear();
    }
    game.players[0].mana = 0;
    game
}

/// Summons `card_id` for `player` and lets it attack this turn.
pub fn ready_minion(game: &mut Game, player: usize, card_id: &str) -> u32 {
    let uid = game
        .summon_minion(player, card_id, &mut EventBus::default())
        .expect("summon")
        .expect("board space");
    if let Some(minion) = game.players[player].minion_mut(uid) {
        minion.exhausted = false;
    }
    uid
}

/// One attack from lethal: the enemy hero is at two health and player one
/// has a ready 2/1.
pub fn lethal_on_board() -> Game {
    let mut game = blank();
    game.players[1].hero.health = 2;
    ready_minion(&mut game, 0, "CS2_168");
    game
}

/// Asserts the mutable parts of two games match.
pub fn assert_same_state(left: &Game, right: &Game) {
    assert_eq!(left.players, right.players);
    assert_eq!(left.current, right.current);
    assert_eq!(left.turn, right.turn);
    assert_eq!(left.outcome, right.outcome);
}
