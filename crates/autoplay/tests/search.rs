mod common;

use common::*;
use fireside_autoplay::{
    alternating_search, apply, end_turn_index, evaluate, expand_chains, extract, legal_actions,
    simulate, Action, Choices, SearchConfig, WeightVector, FEATURE_KEYS, HERO_HEALTH_ADVANTAGE, WIN_VALUE,
};
use fireside_core::{CharacterRef, EventBus, GameOutcome};

fn health_weights() -> WeightVector {
    [(HERO_HEALTH_ADVANTAGE, 1.0)].into_iter().collect()
}

macro_rules! zero_weight_case {
    ($name:ident, $seed:expr, $turns:expr) => {
        #[test]
        fn $name() {
            let mut game = started($seed);
            let mut events = EventBus::default();
            for _ in 0..$turns {
                game.end_turn(&mut events).expect("end turn");
            }
            for player in 0..2 {
                let features = extract(&game, player);
                assert_eq!(evaluate(&features, &WeightVector::new()), 0.0);
                for key in FEATURE_KEYS {
                    assert!(features.keys().any(|k| k == key), "{key}");
                }
            }
        }
    };
}

zero_weight_case!(zero_weights_opening, 1, 0);
zero_weight_case!(zero_weights_turn_four, 2, 3);
zero_weight_case!(zero_weights_turn_nine, 3, 8);

#[test]
fn features_are_relative_to_the_viewer() {
    let mut game = blank();
    game.players[0].hero.armor = 3;
    ready_minion(&mut game, 1, "CS2_182");
    let mine = extract(&game, 0);
    let theirs = extract(&game, 1);
    assert_eq!(mine.get(HERO_HEALTH_ADVANTAGE), 3.0);
    assert_eq!(theirs.get(HERO_HEALTH_ADVANTAGE), -3.0);
    assert_eq!(mine.get("board_advantage"), -1.0);
    assert_eq!(mine.get("attack_advantage"), -4.0);
    assert_eq!(mine.get("board_mana_advantage"), -4.0);
    assert_eq!(mine.get("bias"), 1.0);
    assert_eq!(theirs.get("bias"), 1.0);
}

macro_rules! end_turn_last_case {
    ($name:ident, $seed:expr, $turns:expr) => {
        #[test]
        fn $name() {
            let mut game = started($seed);
            let mut events = EventBus::default();
            for _ in 0..$turns {
                game.end_turn(&mut events).expect("end turn");
            }
            for player in 0..2 {
                let actions = legal_actions(&game, player);
                assert_eq!(actions.last(), Some(&Action::EndTurn));
                let ends = actions.iter().filter(|action| action.is_end_turn()).count();
                assert_eq!(ends, 1);
                assert_eq!(Action::EndTurn.target_count(), None);
            }
        }
    };
}

end_turn_last_case!(end_turn_last_opening, 4, 0);
end_turn_last_case!(end_turn_last_turn_five, 5, 4);
end_turn_last_case!(end_turn_last_turn_twelve, 6, 11);

#[test]
fn only_end_turn_off_turn_and_after_the_match() {
    let mut game = lethal_on_board();
    assert_eq!(legal_actions(&game, 1), vec![Action::EndTurn]);
    game.outcome = Some(GameOutcome::Draw);
    assert_eq!(legal_actions(&game, 0), vec![Action::EndTurn]);
}

#[test]
fn actions_come_in_a_fixed_order() {
    let mut game = blank();
    game.players[0].mana = 10;
    let mut events = EventBus::default();
    game.put_in_hand(0, "CS2_024", &mut events).expect("give");
    game.put_in_hand(0, "CS2_182", &mut events).expect("give");
    game.players[0].hero.attack = 1;
    let raider = ready_minion(&mut game, 0, "CS2_168");
    let actions = legal_actions(&game, 0);
    assert_eq!(actions.len(), 6);
    assert!(matches!(
        &actions[0],
        Action::PlayCard { hand_index: 0, choices: Choices::Targets(targets), .. } if targets.len() == 3
    ));
    assert!(matches!(
        &actions[1],
        Action::PlayCard { hand_index: 1, choices: Choices::None, .. }
    ));
    assert!(matches!(&actions[2], Action::UseHeroPower { targets: Some(_) }));
    assert!(matches!(
        &actions[3],
        Action::Attack { attacker: CharacterRef::Hero(0), .. }
    ));
    assert!(matches!(
        &actions[4],
        Action::Attack { attacker: CharacterRef::Minion(0, uid), .. } if *uid == raider
    ));
    assert_eq!(actions[5], Action::EndTurn);
}

#[test]
fn choose_one_counts_modes() {
    let mut game = new_game(fireside_core::CardClass::Druid, fireside_core::CardClass::Mage, 8);
    let mut events = EventBus::default();
    game.start(&mut events).expect("start");
    game.players[0].hand.clear();
    game.players[0].mana = 2;
    game.put_in_hand(0, "EX1_160", &mut events).expect("give");
    let actions = legal_actions(&game, 0);
    assert_eq!(actions[0].target_count(), Some(2));
    let (after, ended) = simulate(&game, &actions[0], Some(0)).expect("play");
    assert!(!ended);
    assert_eq!(after.players[0].board.len(), 1);
}

#[test]
fn simulate_leaves_the_original_alone() {
    let game = lethal_on_board();
    let snapshot = game.clone();
    for action in legal_actions(&game, 0) {
        for target in action.target_options() {
            simulate(&game, &action, target).expect("simulate");
            assert_same_state(&game, &snapshot);
        }
    }
}

#[test]
fn only_end_turn_expands_to_one_chain() {
    let game = blank();
    let chains = expand_chains(&game, 0, &health_weights(), &SearchConfig::default())
        .expect("expand");
    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].steps.len(), 1);
    assert_eq!(chains[0].steps[0].action, Action::EndTurn);
}

#[test]
fn every_chain_ends_the_turn_and_replays() {
    let mut game = blank();
    game.players[0].mana = 2;
    let mut events = EventBus::default();
    game.put_in_hand(0, "CS2_189", &mut events).expect("give");
    game.put_in_hand(0, "CS2_168", &mut events).expect("give");
    ready_minion(&mut game, 0, "CS2_172");
    ready_minion(&mut game, 1, "CS2_120");
    let chains = expand_chains(&game, 0, &health_weights(), &SearchConfig::default())
        .expect("expand");
    assert!(chains.len() > 1);
    for chain in &chains {
        assert!(chain.ends_turn());
        let mut replay = game.clone();
        for step in &chain.steps {
            apply(&mut replay, &step.action, step.target, &mut events).expect("replay");
        }
        assert_same_state(&replay, &chain.state);
    }
}

#[test]
fn chain_cap_still_closes_every_turn() {
    let mut game = blank();
    game.players[0].mana = 10;
    for _ in 0..5 {
        ready_minion(&mut game, 0, "CS2_231");
    }
    for _ in 0..3 {
        ready_minion(&mut game, 1, "CS2_231");
    }
    let config = SearchConfig {
        max_chains: Some(25),
        ..SearchConfig::default()
    };
    let chains = expand_chains(&game, 0, &health_weights(), &config).expect("expand");
    assert!(!chains.is_empty());
    assert!(chains.iter().all(|chain| chain.ends_turn()));
    assert!(chains.iter().all(|chain| chain.state.current_player() == 1));
}

#[test]
fn depth_zero_is_the_static_value() {
    let game = started(12);
    let weights: WeightVector = [("bias", 1.5), ("hand_advantage", 2.0)].into_iter().collect();
    let outcome =
        alternating_search(&game, 0, 0, &weights, &SearchConfig::default()).expect("search");
    assert_eq!(outcome.value, evaluate(&extract(&game, 0), &weights));
    assert!(outcome.chain.is_none());
}

#[test]
fn finished_match_is_worth_two_hundred() {
    let mut game = blank();
    game.outcome = Some(GameOutcome::Won {
        winner: 0,
        loser: 1,
    });
    let config = SearchConfig::default();
    let won = alternating_search(&game, 0, 2, &health_weights(), &config).expect("search");
    let lost = alternating_search(&game, 1, 2, &health_weights(), &config).expect("search");
    assert_eq!(won.value, WIN_VALUE);
    assert_eq!(lost.value, -WIN_VALUE);
    assert!(won.chain.is_none());
    game.outcome = Some(GameOutcome::Draw);
    let drawn = alternating_search(&game, 0, 2, &health_weights(), &config).expect("search");
    assert_eq!(drawn.value, 0.0);
}

#[test]
fn depth_two_finds_the_winning_attack() {
    let game = lethal_on_board();
    let outcome = alternating_search(&game, 0, 2, &health_weights(), &SearchConfig::default())
        .expect("search");
    assert_eq!(outcome.value, WIN_VALUE);
    let chain = outcome.chain.expect("chain");
    assert_eq!(chain.steps.len(), 1);
    assert!(matches!(chain.steps[0].action, Action::Attack { .. }));
    assert_eq!(chain.state.winner(), Some(0));
    assert!(outcome.stats.chains_expanded >= 2);
}

macro_rules! end_turn_index_case {
    ($name:ident, $game:expr) => {
        #[test]
        fn $name() {
            let game = $game;
            for player in 0..2 {
                let actions = legal_actions(&game, player);
                assert_eq!(actions[end_turn_index(&game, player)], Action::EndTurn);
            }
        }
    };
}

end_turn_index_case!(end_turn_index_on_opening_hands, started(3));
end_turn_index_case!(end_turn_index_on_an_empty_table, blank());
end_turn_index_case!(end_turn_index_with_an_attacker_ready, lethal_on_board());
end_turn_index_case!(end_turn_index_after_the_match_is_decided, {
    let mut game = blank();
    game.outcome = Some(GameOutcome::Draw);
    game
});
