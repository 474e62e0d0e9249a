use crate::FeatureVector;
use fireside_core::{Game, GameOutcome, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const WIN_REWARD: f64 = 100.0;
pub const LOSS_REWARD: f64 = -100.0;
pub const DISCOUNT: f64 = 0.9;

/// Linear weights keyed by feature name. Unknown features weigh zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct WeightVector(BTreeMap<String, f64>);

impl WeightVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> f64 {
        self.0.get(key).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
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

    /// One-step temporal-difference correction toward
    /// `reward + gamma * next_predicted`. Returns the TD error.
    pub fn td_update(
        &mut self,
        features: &FeatureVector,
        predicted: f64,
        next_predicted: f64,
        reward: f64,
        alpha: f64,
        gamma: f64,
    ) -> f64 {
        let error = predicted - (reward + gamma * next_predicted);
        if error == 0.0 {
            return error;
        }
        let keys: BTreeSet<String> = features
            .keys()
            .chain(self.0.keys().map(String::as_str))
            .map(str::to_string)
            .collect();
        for key in keys {
            let feature = features.get(&key);
            let weight = self.0.entry(key).or_insert(0.0);
            *weight -= alpha * error * feature;
        }
        error
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for WeightVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}

pub fn evaluate(features: &FeatureVector, weights: &WeightVector) -> f64 {
    features
        .iter()
        .map(|(key, value)| value * weights.get(key))
        .sum()
}

/// +100 when `player` won, -100 when they lost, 0 while running or drawn.
pub fn terminal_reward(game: &Game, player: PlayerId) -> f64 {
    match game.outcome {
        Some(GameOutcome::Won { loser, .. }) if loser == player => LOSS_REWARD,
        Some(GameOutcome::Won { .. }) => WIN_REWARD,
        Some(GameOutcome::Draw) | None => 0.0,
    }
}
