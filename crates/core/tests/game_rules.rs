use fireside_core::*;
use std::sync::Arc;

fn new_game(seed: u64) -> Game {
    let setups = [
        PlayerSetup::new("Player1", builtin_deck(CardClass::Warlock)),
        PlayerSetup::new("Player2", builtin_deck(CardClass::Mage)),
    ];
    Game::new(
        Arc::new(Content::builtin()),
        GameConfig::default(),
        setups,
        seed,
    )
    .expect("game")
}

/// Started game with empty hands and boards and ten mana for player one.
fn blank_game() -> (Game, EventBus) {
    let mut game = new_game(7);
    let mut events = EventBus::default();
    game.start(&mut events).expect("start");
    for player in &mut game.players {
        player.hand.clear();
        player.board.clear();
    }
    game.players[0].mana = 10;
    (game, events)
}

fn ready(game: &mut Game, player: PlayerId, uid: u32) {
    let minion = game.players[player].minion_mut(uid).expect("minion");
    minion.exhausted = false;
}

#[test]
fn opening_hands_and_coin() {
    let mut game = new_game(1);
    assert_eq!(game.players[0].hand.len(), 3);
    assert_eq!(game.players[1].hand.len(), 4);
    let mut events = EventBus::default();
    game.start(&mut events).expect("start");
    assert_eq!(game.players[0].hand.len(), 4);
    assert_eq!(game.players[1].hand.len(), 5);
    assert!(game.players[1].hand.iter().any(|card| card.id == COIN_ID));
    assert_eq!(game.players[0].mana, 1);
    assert_eq!(game.turn, 1);
    assert_eq!(game.current_player(), 0);
}

#[test]
fn mulligan_keeps_card_count() {
    let mut game = new_game(2);
    let mut events = EventBus::default();
    game.mulligan(0, &[0, 2, 2], &mut events).expect("mulligan");
    let player = &game.players[0];
    assert_eq!(player.hand.len(), 3);
    assert_eq!(player.hand.len() + player.deck.len(), 30);
    game.start(&mut events).expect("start");
    assert_eq!(
        game.mulligan(1, &[0], &mut events),
        Err(GameError::AlreadyStarted)
    );
}

#[test]
fn mulligan_rejects_bad_index() {
    let mut game = new_game(2);
    let mut events = EventBus::default();
    assert_eq!(
        game.mulligan(0, &[9], &mut events),
        Err(GameError::InvalidHandIndex(9))
    );
}

#[test]
fn turns_alternate_and_mana_grows() {
    let mut game = new_game(3);
    let mut events = EventBus::default();
    game.start(&mut events).expect("start");
    game.end_turn(&mut events).expect("end");
    assert_eq!(game.current_player(), 1);
    assert_eq!(game.players[1].mana, 1);
    game.end_turn(&mut events).expect("end");
    assert_eq!(game.current_player(), 0);
    assert_eq!(game.players[0].max_mana, 2);
    assert_eq!(game.turn, 3);
}

#[test]
fn taunt_limits_attack_targets() {
    let (mut game, mut events) = blank_game();
    let raptor = game.summon_minion(0, "CS2_172", &mut events).unwrap().unwrap();
    ready(&mut game, 0, raptor);
    let footman = game.summon_minion(1, "CS1_042", &mut events).unwrap().unwrap();
    game.summon_minion(1, "CS2_182", &mut events).unwrap();
    let attacker = CharacterRef::Minion(0, raptor);
    assert_eq!(
        game.attack_targets(attacker),
        vec![CharacterRef::Minion(1, footman)]
    );
    assert_eq!(
        game.attack(attacker, CharacterRef::Hero(1), &mut events),
        Err(GameError::InvalidTarget(CharacterRef::Hero(1)))
    );
    game.attack(attacker, CharacterRef::Minion(1, footman), &mut events)
        .expect("attack");
    assert!(game.players[1].minion(footman).is_none());
    assert_eq!(game.players[0].minion(raptor).map(|m| m.health), Some(1));
    assert!(!game.can_attack(attacker));
}

#[test]
fn summoned_minions_wait_unless_charging() {
    let (mut game, mut events) = blank_game();
    let yeti = game.summon_minion(0, "CS2_182", &mut events).unwrap().unwrap();
    let wolf = game.summon_minion(0, "CS2_124", &mut events).unwrap().unwrap();
    assert!(!game.can_attack(CharacterRef::Minion(0, yeti)));
    assert!(game.can_attack(CharacterRef::Minion(0, wolf)));
}

#[test]
fn armor_absorbs_damage_first() {
    let (mut game, mut events) = blank_game();
    game.players[1].hero.armor = 2;
    let wolf = game.summon_minion(0, "CS2_124", &mut events).unwrap().unwrap();
    game.attack(CharacterRef::Minion(0, wolf), CharacterRef::Hero(1), &mut events)
        .expect("attack");
    assert_eq!(game.players[1].hero.armor, 0);
    assert_eq!(game.players[1].hero.health, 29);
}

#[test]
fn fatigue_grows_each_empty_draw() {
    let (mut game, mut events) = blank_game();
    game.players[1].deck.clear();
    game.end_turn(&mut events).expect("end");
    assert_eq!(game.players[1].hero.health, 29);
    game.end_turn(&mut events).expect("end");
    game.end_turn(&mut events).expect("end");
    assert_eq!(game.players[1].hero.health, 27);
    assert_eq!(game.players[1].fatigue, 2);
}

#[test]
fn full_hand_burns_the_draw() {
    let (mut game, mut events) = blank_game();
    for _ in 0..10 {
        game.put_in_hand(1, "CS2_231", &mut events).expect("give");
    }
    let deck_before = game.players[1].deck.len();
    game.end_turn(&mut events).expect("end");
    assert_eq!(game.players[1].hand.len(), 10);
    assert_eq!(game.players[1].deck.len(), deck_before - 1);
    assert!(events
        .drain()
        .any(|event| matches!(event, Event::CardBurned { player: 1, .. })));
}

macro_rules! playable_case {
    ($name:ident, $card:expr, friendly: $friendly:expr, enemy: $enemy:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let (mut game, mut events) = blank_game();
            for id in $friendly {
                game.summon_minion(0, id, &mut events).expect("summon");
            }
            for id in $enemy {
                game.summon_minion(1, id, &mut events).expect("summon");
            }
            game.put_in_hand(0, $card, &mut events).expect("give");
            assert_eq!(game.is_playable(0, 0), $expected);
        }
    };
}

const NONE: [&str; 0] = [];

playable_case!(shadow_bolt_needs_a_minion, "CS2_057", friendly: NONE, enemy: NONE, false);
playable_case!(shadow_bolt_with_enemy_minion, "CS2_057", friendly: NONE, enemy: ["CS2_182"], true);
playable_case!(fireball_can_hit_heroes, "CS2_029", friendly: NONE, enemy: NONE, true);
playable_case!(veteran_without_targets, "ICC_092", friendly: NONE, enemy: NONE, true);
playable_case!(flamestrike_on_empty_board, "CS2_032", friendly: NONE, enemy: NONE, true);
playable_case!(
    minion_blocked_by_full_board,
    "CS2_231",
    friendly: ["CS2_231", "CS2_231", "CS2_231", "CS2_231", "CS2_231", "CS2_231", "CS2_231"],
    enemy: NONE,
    false
);

#[test]
fn optional_battlecry_target() {
    let (mut game, mut events) = blank_game();
    game.put_in_hand(0, "ICC_092", &mut events).expect("give");
    assert!(!game.requires_target(0, 0));
    game.play_card(0, None, None, &mut events).expect("play");

    let uid = game.players[0].board[0].uid;
    game.put_in_hand(0, "ICC_092", &mut events).expect("give");
    assert!(game.requires_target(0, 0));
    assert_eq!(
        game.play_card(0, None, None, &mut events),
        Err(GameError::TargetRequired)
    );
    game.play_card(0, None, Some(CharacterRef::Minion(0, uid)), &mut events)
        .expect("play");
    assert_eq!(game.players[0].minion(uid).map(|m| m.attack), Some(3));
}

#[test]
fn mana_is_paid_and_tracked() {
    let (mut game, mut events) = blank_game();
    game.put_in_hand(0, "CS2_182", &mut events).expect("give");
    game.play_card(0, None, None, &mut events).expect("play");
    assert_eq!(game.players[0].mana, 6);
    assert_eq!(game.players[0].mana_spent, 4);
    assert_eq!(game.players[0].board_cost(), 4);
}

#[test]
fn choose_one_requires_a_mode() {
    let (mut game, mut events) = blank_game();
    let councilman = game.summon_minion(0, "OG_113", &mut events).unwrap().unwrap();
    game.put_in_hand(0, "EX1_160", &mut events).expect("give");
    assert!(game.must_choose_one(0, 0));
    assert_eq!(game.choice_modes(0, 0), vec!["EX1_160a", "EX1_160b"]);
    assert!(game.card_targets(0, 0).is_empty());
    assert_eq!(
        game.play_card(0, None, None, &mut events),
        Err(GameError::ChoiceRequired)
    );
    assert_eq!(
        game.play_card(0, Some(5), None, &mut events),
        Err(GameError::InvalidChoice(5))
    );
    game.play_card(0, Some(0), None, &mut events).expect("play");
    assert_eq!(game.players[0].board.len(), 2);
    assert_eq!(game.players[0].board[1].id, "EX1_160t");
    assert_eq!(game.players[0].minion(councilman).map(|m| m.attack), Some(2));
}

#[test]
fn keleseth_buffs_minions_left_in_deck() {
    let (mut game, mut events) = blank_game();
    let before: Vec<Card> = game.players[0].deck.clone();
    game.put_in_hand(0, "ICC_851", &mut events).expect("give");
    game.play_card(0, None, None, &mut events).expect("play");
    let content = Content::builtin();
    for (old, new) in before.iter().zip(&game.players[0].deck) {
        let minion = content.card(&old.id).map(CardDef::is_minion).unwrap_or(false);
        let bonus = i32::from(minion);
        assert_eq!(new.attack, old.attack + bonus, "{}", old.id);
        assert_eq!(new.health, old.health + bonus, "{}", old.id);
    }
}

#[test]
fn chain_gang_summons_a_copy() {
    let (mut game, mut events) = blank_game();
    game.put_in_hand(0, "ICC_466", &mut events).expect("give");
    game.play_card(0, None, None, &mut events).expect("play");
    let board = &game.players[0].board;
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].id, board[1].id);
    assert_ne!(board[0].uid, board[1].uid);
}

#[test]
fn dreadlord_pings_enemy_minions_at_turn_end() {
    let (mut game, mut events) = blank_game();
    game.summon_minion(0, "ICC_075", &mut events).expect("summon");
    let wisp = game.summon_minion(1, "CS2_231", &mut events).unwrap().unwrap();
    let yeti = game.summon_minion(1, "CS2_182", &mut events).unwrap().unwrap();
    game.end_turn(&mut events).expect("end");
    assert!(game.players[1].minion(wisp).is_none());
    assert_eq!(game.players[1].minion(yeti).map(|m| m.health), Some(4));
}

#[test]
fn heroic_strike_attack_expires() {
    let (mut game, mut events) = blank_game();
    game.put_in_hand(0, "CS2_105", &mut events).expect("give");
    game.play_card(0, None, None, &mut events).expect("play");
    assert!(game.can_attack(CharacterRef::Hero(0)));
    game.attack(CharacterRef::Hero(0), CharacterRef::Hero(1), &mut events)
        .expect("attack");
    assert_eq!(game.players[1].hero.health, 26);
    assert!(!game.can_attack(CharacterRef::Hero(0)));
    game.end_turn(&mut events).expect("end");
    assert_eq!(game.players[0].hero.attack, 0);
}

#[test]
fn coin_mana_is_capped() {
    let (mut game, mut events) = blank_game();
    game.put_in_hand(0, COIN_ID, &mut events).expect("give");
    game.play_card(0, None, None, &mut events).expect("play");
    assert_eq!(game.players[0].mana, 10);
}

#[test]
fn lethal_attack_ends_the_game() {
    let (mut game, mut events) = blank_game();
    game.players[1].hero.health = 3;
    let wolf = game.summon_minion(0, "CS2_124", &mut events).unwrap().unwrap();
    game.attack(CharacterRef::Minion(0, wolf), CharacterRef::Hero(1), &mut events)
        .expect("attack");
    assert_eq!(game.winner(), Some(0));
    assert_eq!(game.loser(), Some(1));
    assert_eq!(game.end_turn(&mut events), Err(GameError::GameOver));
    assert!(!game.is_playable(0, 0));
}

#[test]
fn hellfire_can_draw_the_game() {
    let (mut game, mut events) = blank_game();
    game.players[0].hero.health = 3;
    game.players[1].hero.health = 3;
    game.put_in_hand(0, "CS2_062", &mut events).expect("give");
    game.play_card(0, None, None, &mut events).expect("play");
    assert_eq!(game.outcome, Some(GameOutcome::Draw));
    assert_eq!(game.winner(), None);
}

#[test]
fn life_tap_draws_and_hurts() {
    let (mut game, mut events) = blank_game();
    assert!(game.hero_power_usable(0));
    assert!(!game.hero_power_requires_target(0));
    game.use_hero_power(None, &mut events).expect("power");
    assert_eq!(game.players[0].hand.len(), 1);
    assert_eq!(game.players[0].hero.health, 28);
    assert!(!game.hero_power_usable(0));
    assert_eq!(
        game.use_hero_power(None, &mut events),
        Err(GameError::HeroPowerUnavailable)
    );
}

#[test]
fn cloned_game_is_independent() {
    let (game, mut events) = blank_game();
    let mut copy = game.clone();
    copy.put_in_hand(0, "CS2_182", &mut events).expect("give");
    copy.play_card(0, None, None, &mut events).expect("play");
    assert!(game.players[0].board.is_empty());
    assert_eq!(game.players[0].mana, 10);
    assert_eq!(copy.players[0].board.len(), 1);
}
