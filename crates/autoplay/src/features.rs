use fireside_core::{opponent_of, Game, Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const HERO_HEALTH_ADVANTAGE: &str = "hero_health_advantage";
pub const HAND_ADVANTAGE: &str = "hand_advantage";
pub const ATTACK_ADVANTAGE: &str = "attack_advantage";
pub const BOARD_ADVANTAGE: &str = "board_advantage";
pub const MANA_SPENT_ADVANTAGE: &str = "mana_spent_advantage";
pub const BOARD_MANA_ADVANTAGE: &str = "board_mana_advantage";
pub const BIAS: &str = "bias";

pub const FEATURE_KEYS: [&str; 7] = [
    HERO_HEALTH_ADVANTAGE,
    HAND_ADVANTAGE,
    ATTACK_ADVANTAGE,
    BOARD_ADVANTAGE,
    MANA_SPENT_ADVANTAGE,
    BOARD_MANA_ADVANTAGE,
    BIAS,
];

/// Sparse state description. Missing keys read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FeatureVector(BTreeMap<String, f64>);

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> f64 {
        self.0.get(key).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}

/// Describes `game` from `player`'s side: every feature is "mine minus
/// theirs" except the constant bias.
pub fn extract(game: &Game, player: PlayerId) -> FeatureVector {
    let me = game.player(player);
    let them = game.player(opponent_of(player));
    let diff = |stat: fn(&Player) -> i32| f64::from(stat(me) - stat(them));

    let mut features = FeatureVector::new();
    features.set(HERO_HEALTH_ADVANTAGE, diff(|p| p.hero.effective_health()));
    features.set(HAND_ADVANTAGE, diff(|p| p.hand.len() as i32));
    features.set(ATTACK_ADVANTAGE, diff(Player::board_attack));
    features.set(BOARD_ADVANTAGE, diff(|p| p.board.len() as i32));
    features.set(MANA_SPENT_ADVANTAGE, diff(|p| p.mana_spent));
    features.set(BOARD_MANA_ADVANTAGE, diff(Player::board_cost));
    features.set(BIAS, 1.0);
    features
}
