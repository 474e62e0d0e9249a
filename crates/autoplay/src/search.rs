use crate::{
    apply, end_turn_index, evaluate, extract, legal_actions, Action, AutoplayError, SearchConfig,
    WeightVector,
};
use fireside_core::{EventBus, Game, GameOutcome, PlayerId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Value of a finished match for the side that did not lose.
pub const WIN_VALUE: f64 = 200.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainStep {
    pub action_index: usize,
    pub target: Option<usize>,
    pub action: Action,
}

/// A planned sequence of actions for one turn, the state it leads to and
/// that state's value from the searching player's side.
#[derive(Debug, Clone)]
pub struct ActionChain {
    pub steps: Vec<ChainStep>,
    pub value: f64,
    pub state: Game,
}

impl ActionChain {
    fn root(game: &Game, value: f64) -> Self {
        Self {
            steps: Vec::new(),
            value,
            state: game.clone(),
        }
    }

    pub fn first(&self) -> Option<&ChainStep> {
        self.steps.first()
    }

    pub fn ends_turn(&self) -> bool {
        self.state.is_over()
            || self
                .steps
                .last()
                .map(|step| step.action.is_end_turn())
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchStats {
    pub chains_expanded: usize,
    pub leaves: usize,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub value: f64,
    /// `None` at finished matches and depth-zero leaves.
    pub chain: Option<ActionChain>,
    pub stats: SearchStats,
}

/// Breadth-first expansion of every action sequence the player to move can
/// take this turn. Chains come back in the order they were completed, each
/// valued from `perspective`'s side.
pub fn expand_chains(
    game: &Game,
    perspective: PlayerId,
    weights: &WeightVector,
    config: &SearchConfig,
) -> Result<Vec<ActionChain>, AutoplayError> {
    let mut stats = SearchStats::default();
    expand(game, perspective, weights, config, &mut stats)
}

fn expand(
    game: &Game,
    perspective: PlayerId,
    weights: &WeightVector,
    config: &SearchConfig,
    stats: &mut SearchStats,
) -> Result<Vec<ActionChain>, AutoplayError> {
    let mover = game.current_player();
    let root_value = evaluate(&extract(game, perspective), weights);
    let mut pending = VecDeque::from([ActionChain::root(game, root_value)]);
    let mut completed = Vec::new();
    let cap = config.max_chains.map(|cap| cap.max(1));
    let mut produced = 0usize;

    while let Some(chain) = pending.pop_front() {
        if cap.is_some_and(|cap| produced >= cap) {
            completed.push(close_chain(chain, perspective, weights)?);
            for rest in pending.drain(..) {
                completed.push(close_chain(rest, perspective, weights)?);
            }
            trace!(produced, "chain cap reached");
            break;
        }
        for (action_index, action) in legal_actions(&chain.state, mover).iter().enumerate() {
            for target in action.target_options() {
                let mut state = chain.state.clone();
                let mut events = EventBus::default();
                let ended = apply(&mut state, action, target, &mut events)?;
                let value = evaluate(&extract(&state, perspective), weights);
                let mut steps = chain.steps.clone();
                steps.push(ChainStep {
                    action_index,
                    target,
                    action: action.clone(),
                });
                let next = ActionChain {
                    steps,
                    value,
                    state,
                };
                produced += 1;
                if ended {
                    completed.push(next);
                } else {
                    pending.push_back(next);
                }
            }
        }
    }
    stats.chains_expanded += produced;
    Ok(completed)
}

/// Ends the turn on a chain cut short by the chain cap.
fn close_chain(
    mut chain: ActionChain,
    perspective: PlayerId,
    weights: &WeightVector,
) -> Result<ActionChain, AutoplayError> {
    if chain.ends_turn() {
        return Ok(chain);
    }
    let action_index = end_turn_index(&chain.state, chain.state.current_player());
    apply(&mut chain.state, &Action::EndTurn, None, &mut EventBus::default())?;
    chain.steps.push(ChainStep {
        action_index,
        target: None,
        action: Action::EndTurn,
    });
    chain.value = evaluate(&extract(&chain.state, perspective), weights);
    Ok(chain)
}

/// Beam-limited alternating search. The player to move maximizes when it is
/// `perspective` and minimizes otherwise; only the best `beam_width` chains
/// of each expansion are searched further. Depth drops after each opponent
/// turn.
pub fn alternating_search(
    game: &Game,
    perspective: PlayerId,
    depth: u32,
    weights: &WeightVector,
    config: &SearchConfig,
) -> Result<SearchOutcome, AutoplayError> {
    let mut stats = SearchStats::default();
    let (value, chain) = search(game, perspective, depth, weights, config, &mut stats)?;
    debug!(
        value,
        chains = stats.chains_expanded,
        leaves = stats.leaves,
        steps = chain.as_ref().map(|chain| chain.steps.len()).unwrap_or(0),
        "alternating search finished"
    );
    Ok(SearchOutcome {
        value,
        chain,
        stats,
    })
}

fn search(
    game: &Game,
    perspective: PlayerId,
    depth: u32,
    weights: &WeightVector,
    config: &SearchConfig,
    stats: &mut SearchStats,
) -> Result<(f64, Option<ActionChain>), AutoplayError> {
    if let Some(outcome) = game.outcome {
        stats.leaves += 1;
        let value = match outcome {
            GameOutcome::Draw => 0.0,
            GameOutcome::Won { loser, .. } if loser == perspective => -WIN_VALUE,
            GameOutcome::Won { .. } => WIN_VALUE,
        };
        return Ok((value, None));
    }
    if depth == 0 {
        stats.leaves += 1;
        return Ok((evaluate(&extract(game, perspective), weights), None));
    }

    let maximizing = game.current_player() == perspective;
    let mut chains = expand(game, perspective, weights, config, stats)?;
    // Stable sort keeps production order among equal values.
    chains.sort_by(|a, b| {
        let order = a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal);
        if maximizing {
            order.reverse()
        } else {
            order
        }
    });
    chains.truncate(config.beam_width.max(1));

    let next_depth = if maximizing { depth } else { depth - 1 };
    let mut best: Option<(f64, ActionChain)> = None;
    for chain in chains {
        let (value, _) = search(&chain.state, perspective, next_depth, weights, config, stats)?;
        let better = match &best {
            None => true,
            Some((current, _)) if maximizing => value > *current,
            Some((current, _)) => value < *current,
        };
        if better {
            best = Some((value, chain));
        }
    }
    Ok(match best {
        Some((value, chain)) => (value, Some(chain)),
        None => (evaluate(&extract(game, perspective), weights), None),
    })
}
