use crate::{
    mulligan_by_weights, random_mulligan, ArenaConfig, AutoplayError, CardWeights, MatchRecord,
    MatchStatus, SeriesReport, TurnPolicy,
};
use fireside_core::{Content, DeckList, EventBus, Game, GameConfig, GameOutcome, PlayerSetup};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Everything needed to set up the games of a series.
#[derive(Debug, Clone)]
pub struct MatchSetup {
    pub content: Arc<Content>,
    pub game: GameConfig,
    pub decks: [DeckList; 2],
    pub arena: ArenaConfig,
    /// Opening-hand table used by the first player's mulligan.
    pub card_weights: CardWeights,
}

impl MatchSetup {
    pub fn new(content: Arc<Content>, decks: [DeckList; 2], arena: ArenaConfig) -> Self {
        let card_weights = CardWeights::by_cost(&content, arena.mulligan_cost);
        Self {
            content,
            game: GameConfig::default(),
            decks,
            arena,
            card_weights,
        }
    }
}

/// Plays one match: player one mulligans by the weight table, player two at
/// random, then the policies alternate turns until the match ends or the
/// turn limit is hit.
pub fn play_full_game<R: Rng>(
    setup: &MatchSetup,
    policies: &mut [Box<dyn TurnPolicy>; 2],
    game_index: u32,
    rng: &mut R,
) -> Result<MatchRecord, AutoplayError> {
    let seed = rng.gen::<u64>();
    let [first, second] = &setup.decks;
    let mut game = Game::new(
        Arc::clone(&setup.content),
        setup.game.clone(),
        [
            PlayerSetup::new("Player1", first.clone()),
            PlayerSetup::new("Player2", second.clone()),
        ],
        seed,
    )?;
    let mut events = EventBus::default();

    let back_first = mulligan_by_weights(&game.player(0).hand, &setup.card_weights);
    let back_second = random_mulligan(&game.player(1).hand, rng);
    let mulligans = [back_first.len(), back_second.len()];
    game.mulligan(0, &back_first, &mut events)?;
    game.mulligan(1, &back_second, &mut events)?;
    game.start(&mut events)?;

    let mut actions = [0usize; 2];
    let mut updates = [0usize; 2];
    while !game.is_over() && game.turn <= setup.arena.max_turns {
        let player = game.current_player();
        let summary = policies[player].play_turn(&mut game, &mut events)?;
        actions[player] += summary.actions;
        updates[player] += summary.updates;
        let emitted = events.drain().count();
        trace!(player, turn = game.turn, emitted, "turn played");
    }
    for (player, policy) in policies.iter_mut().enumerate() {
        updates[player] += policy.observe_outcome(&game, player);
    }

    let status = match game.outcome {
        Some(GameOutcome::Won { .. }) => MatchStatus::Decided,
        Some(GameOutcome::Draw) => MatchStatus::Draw,
        None => MatchStatus::TurnLimit,
    };
    let record = MatchRecord {
        game: game_index,
        seed,
        status,
        winner: game.winner(),
        turns: game.turn,
        actions,
        updates,
        mulligans,
        final_health: [
            game.player(0).hero.health,
            game.player(1).hero.health,
        ],
    };
    debug!(
        game = game_index,
        ?status,
        winner = ?record.winner,
        turns = record.turns,
        "match finished"
    );
    Ok(record)
}

/// Plays `games` matches in a row with the same two policies. Learning
/// policies keep their weights from one match to the next.
pub fn run_series(
    setup: &MatchSetup,
    games: u32,
    policies: &mut [Box<dyn TurnPolicy>; 2],
    seed: u64,
) -> Result<SeriesReport, AutoplayError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut report = SeriesReport {
        policies: [
            policies[0].name().to_string(),
            policies[1].name().to_string(),
        ],
        games,
        wins: 0,
        losses: 0,
        draws: 0,
        win_rate: 0.0,
        matches: Vec::with_capacity(games as usize),
        weights: None,
    };
    for game_index in 1..=games {
        let record = play_full_game(setup, policies, game_index, &mut rng)?;
        match record.winner {
            Some(0) => report.wins += 1,
            Some(_) => report.losses += 1,
            None => report.draws += 1,
        }
        report.matches.push(record);
    }
    if games > 0 {
        report.win_rate = f64::from(report.wins) / f64::from(games);
    }
    report.weights = policies[0].weights();
    info!(
        games,
        wins = report.wins,
        losses = report.losses,
        draws = report.draws,
        win_rate = report.win_rate,
        "series finished"
    );
    Ok(report)
}
