use crate::{
    alternating_search, apply, evaluate, extract, legal_actions, simulate, terminal_reward, Action,
    AutoplayError, Choices, FeatureVector, LearningConfig, SearchConfig, WeightVector,
};
use fireside_core::{opponent_of, CharacterRef, EventBus, Game, PlayerId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnSummary {
    pub actions: usize,
    pub updates: usize,
    pub turn_ended: bool,
    pub match_over: bool,
}

/// Plays every action of the current player's turn on the live game.
pub trait TurnPolicy {
    fn name(&self) -> &'static str;

    fn play_turn(
        &mut self,
        game: &mut Game,
        events: &mut EventBus,
    ) -> Result<TurnSummary, AutoplayError>;

    /// Snapshot of the learned weights, for policies that learn.
    fn weights(&self) -> Option<WeightVector> {
        None
    }

    /// Called once per match after play stops. Learners that did not close
    /// the match on their own turn settle the terminal reward here. Returns
    /// the number of weight updates made.
    fn observe_outcome(&mut self, _game: &Game, _player: PlayerId) -> usize {
        0
    }
}

/// Features and value of the last position a player left.
type Departure = (FeatureVector, f64);

/// Ends the turn unless the match is already decided.
fn finish_turn(
    game: &mut Game,
    player: PlayerId,
    events: &mut EventBus,
    summary: &mut TurnSummary,
) -> Result<(), AutoplayError> {
    if !game.is_over() && game.current_player() == player {
        game.end_turn(events)?;
    }
    summary.turn_ended = true;
    summary.match_over = game.is_over();
    Ok(())
}

/// The one update made when a turn or match closes. `features` and `value`
/// describe the position the player left the turn from.
fn terminal_update(
    weights: &mut WeightVector,
    learning: &LearningConfig,
    game: &Game,
    player: PlayerId,
    features: &FeatureVector,
    value: f64,
) {
    let next = if game.is_over() {
        0.0
    } else {
        evaluate(&extract(game, player), weights)
    };
    let reward = terminal_reward(game, player);
    let error = weights.td_update(features, value, next, reward, learning.alpha, learning.gamma);
    trace!(player, reward, error, "terminal update");
}

/// Terminal update for a match that ended while the opponent was acting.
fn settle_outcome(
    weights: &mut WeightVector,
    learning: &LearningConfig,
    pending: &mut Option<Departure>,
    game: &Game,
    player: PlayerId,
) -> usize {
    let Some((features, value)) = pending.take() else {
        return 0;
    };
    if !game.is_over() {
        return 0;
    }
    terminal_update(weights, learning, game, player, &features, value);
    1
}

fn departure_or_current(
    departure: Option<Departure>,
    game: &Game,
    player: PlayerId,
    weights: &WeightVector,
) -> Departure {
    departure.unwrap_or_else(|| {
        let features = extract(game, player);
        let value = evaluate(&features, weights);
        (features, value)
    })
}

/// Epsilon-greedy one-ply learner.
#[derive(Debug)]
pub struct GreedyPolicy {
    weights: WeightVector,
    learning: LearningConfig,
    rng: StdRng,
    pending: Option<Departure>,
}

impl GreedyPolicy {
    pub fn new(weights: WeightVector, learning: LearningConfig, seed: u64) -> Self {
        Self {
            weights,
            learning,
            rng: StdRng::seed_from_u64(seed),
            pending: None,
        }
    }

    pub fn into_weights(self) -> WeightVector {
        self.weights
    }

    fn choose(
        &mut self,
        game: &Game,
        player: PlayerId,
        actions: &[Action],
    ) -> Result<(usize, Option<usize>), AutoplayError> {
        if self.learning.epsilon > 0.0 && self.rng.gen_bool(self.learning.epsilon.min(1.0)) {
            let index = self.rng.gen_range(0..actions.len());
            let target = actions[index]
                .target_count()
                .filter(|count| *count > 0)
                .map(|count| self.rng.gen_range(0..count));
            trace!(player, action = %actions[index].short_label(target), "exploring");
            return Ok((index, target));
        }

        let mut best: Option<(f64, usize, Option<usize>)> = None;
        for (index, action) in actions.iter().enumerate() {
            for target in action.target_options() {
                let (next, _) = simulate(game, action, target)?;
                let value = evaluate(&extract(&next, player), &self.weights);
                if best.map_or(true, |(current, _, _)| value > current) {
                    best = Some((value, index, target));
                }
            }
        }
        // The trailing EndTurn always yields a candidate.
        Ok(best
            .map(|(_, index, target)| (index, target))
            .unwrap_or((actions.len().saturating_sub(1), None)))
    }
}

impl TurnPolicy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn play_turn(
        &mut self,
        game: &mut Game,
        events: &mut EventBus,
    ) -> Result<TurnSummary, AutoplayError> {
        let player = game.current_player();
        let mut summary = TurnSummary::default();
        let mut departure = None;
        self.pending = None;
        while !game.is_over() {
            let features = extract(game, player);
            let value = evaluate(&features, &self.weights);
            let actions = legal_actions(game, player);
            if actions.len() <= 1 {
                departure = Some((features, value));
                break;
            }
            let (index, target) = self.choose(game, player, &actions)?;
            let ended = apply(game, &actions[index], target, events)?;
            summary.actions += 1;
            if self.learning.epsilon > 0.0 && !game.is_over() {
                let next = evaluate(&extract(game, player), &self.weights);
                self.weights.td_update(
                    &features,
                    value,
                    next,
                    0.0,
                    self.learning.alpha,
                    self.learning.gamma,
                );
                summary.updates += 1;
            }
            if ended {
                departure = Some((features, value));
                break;
            }
        }

        let (features, value) = departure_or_current(departure, game, player, &self.weights);
        finish_turn(game, player, events, &mut summary)?;
        terminal_update(
            &mut self.weights,
            &self.learning,
            game,
            player,
            &features,
            value,
        );
        summary.updates += 1;
        if !game.is_over() {
            self.pending = Some((features, value));
        }
        Ok(summary)
    }

    fn weights(&self) -> Option<WeightVector> {
        Some(self.weights.clone())
    }

    fn observe_outcome(&mut self, game: &Game, player: PlayerId) -> usize {
        settle_outcome(
            &mut self.weights,
            &self.learning,
            &mut self.pending,
            game,
            player,
        )
    }
}

/// Commits the first action of the best alternating-search chain, then
/// searches again from the new position until the turn is over.
#[derive(Debug)]
pub struct LookaheadPolicy {
    weights: WeightVector,
    search: SearchConfig,
    learning: LearningConfig,
    pending: Option<Departure>,
}

impl LookaheadPolicy {
    pub fn new(weights: WeightVector, search: SearchConfig, learning: LearningConfig) -> Self {
        Self {
            weights,
            search,
            learning,
            pending: None,
        }
    }

    pub fn into_weights(self) -> WeightVector {
        self.weights
    }
}

impl TurnPolicy for LookaheadPolicy {
    fn name(&self) -> &'static str {
        "lookahead"
    }

    fn play_turn(
        &mut self,
        game: &mut Game,
        events: &mut EventBus,
    ) -> Result<TurnSummary, AutoplayError> {
        let player = game.current_player();
        let mut summary = TurnSummary::default();
        let mut departure = None;
        self.pending = None;
        while !game.is_over() && game.current_player() == player {
            let features = extract(game, player);
            let value = evaluate(&features, &self.weights);
            let outcome =
                alternating_search(game, player, self.search.depth, &self.weights, &self.search)?;
            let Some(step) = outcome.chain.as_ref().and_then(|chain| chain.first()) else {
                departure = Some((features, value));
                break;
            };
            debug!(
                player,
                value = outcome.value,
                action = %step.action.short_label(step.target),
                "lookahead move"
            );
            let ended = apply(game, &step.action, step.target, events)?;
            summary.actions += 1;
            if ended {
                departure = Some((features, value));
                break;
            }
        }

        let (features, value) = departure_or_current(departure, game, player, &self.weights);
        finish_turn(game, player, events, &mut summary)?;
        if self.learning.alpha > 0.0 {
            terminal_update(
                &mut self.weights,
                &self.learning,
                game,
                player,
                &features,
                value,
            );
            summary.updates += 1;
            if !game.is_over() {
                self.pending = Some((features, value));
            }
        }
        Ok(summary)
    }

    fn weights(&self) -> Option<WeightVector> {
        Some(self.weights.clone())
    }

    fn observe_outcome(&mut self, game: &Game, player: PlayerId) -> usize {
        settle_outcome(
            &mut self.weights,
            &self.learning,
            &mut self.pending,
            game,
            player,
        )
    }
}

fn enemy_hero_or_first(targets: &[CharacterRef], player: PlayerId) -> usize {
    let enemy = CharacterRef::Hero(opponent_of(player));
    targets
        .iter()
        .position(|target| *target == enemy)
        .unwrap_or(0)
}

/// Plays cards first, then the hero power, then sends every attacker at the
/// enemy hero when taunts allow.
#[derive(Debug)]
pub struct FaceFirstPolicy {
    rng: StdRng,
}

impl FaceFirstPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn target_for(&mut self, action: &Action, player: PlayerId) -> Option<usize> {
        match action {
            Action::PlayCard {
                choices: Choices::Modes(modes),
                ..
            } => Some(self.rng.gen_range(0..modes.len())),
            Action::PlayCard {
                choices: Choices::Targets(targets),
                ..
            }
            | Action::UseHeroPower {
                targets: Some(targets),
            }
            | Action::Attack { targets, .. } => Some(enemy_hero_or_first(targets, player)),
            _ => None,
        }
    }
}

impl TurnPolicy for FaceFirstPolicy {
    fn name(&self) -> &'static str {
        "face"
    }

    fn play_turn(
        &mut self,
        game: &mut Game,
        events: &mut EventBus,
    ) -> Result<TurnSummary, AutoplayError> {
        let player = game.current_player();
        let mut summary = TurnSummary::default();
        let phases: [fn(&Action) -> bool; 3] = [
            |action| matches!(action, Action::PlayCard { .. }),
            |action| matches!(action, Action::UseHeroPower { .. }),
            |action| matches!(action, Action::Attack { .. }),
        ];
        for wanted in phases {
            while !game.is_over() {
                let Some(action) = legal_actions(game, player).into_iter().find(wanted) else {
                    break;
                };
                let target = self.target_for(&action, player);
                apply(game, &action, target, events)?;
                summary.actions += 1;
            }
        }
        finish_turn(game, player, events, &mut summary)?;
        Ok(summary)
    }
}

/// Uses the hero power now and then, plays about half of what it can and
/// attacks at random.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub const HERO_POWER_CHANCE: f64 = 0.1;
    pub const PLAY_CHANCE: f64 = 0.5;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn random_target(&mut self, action: &Action) -> Option<usize> {
        action
            .target_count()
            .filter(|count| *count > 0)
            .map(|count| self.rng.gen_range(0..count))
    }
}

impl TurnPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn play_turn(
        &mut self,
        game: &mut Game,
        events: &mut EventBus,
    ) -> Result<TurnSummary, AutoplayError> {
        let player = game.current_player();
        let mut summary = TurnSummary::default();

        let power = legal_actions(game, player)
            .into_iter()
            .find(|action| matches!(action, Action::UseHeroPower { .. }));
        if let Some(power) = power {
            if self.rng.gen_bool(Self::HERO_POWER_CHANCE) {
                let target = self.random_target(&power);
                apply(game, &power, target, events)?;
                summary.actions += 1;
            }
        }

        // Each hand slot gets one roll; a played card shifts the next one
        // into the same slot.
        let mut slot = 0;
        while !game.is_over() && slot < game.player(player).hand.len() {
            let action = legal_actions(game, player).into_iter().find(|action| {
                matches!(action, Action::PlayCard { hand_index, .. } if *hand_index == slot)
            });
            match action {
                Some(action) if self.rng.gen_bool(Self::PLAY_CHANCE) => {
                    let target = self.random_target(&action);
                    apply(game, &action, target, events)?;
                    summary.actions += 1;
                }
                _ => slot += 1,
            }
        }

        while !game.is_over() {
            let Some(attack) = legal_actions(game, player)
                .into_iter()
                .find(|action| matches!(action, Action::Attack { .. }))
            else {
                break;
            };
            let target = self.random_target(&attack);
            apply(game, &attack, target, events)?;
            summary.actions += 1;
        }

        finish_turn(game, player, events, &mut summary)?;
        Ok(summary)
    }
}
