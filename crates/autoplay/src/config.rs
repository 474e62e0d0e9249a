use crate::DISCOUNT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u32,
    pub beam_width: usize,
    /// Upper bound on chains produced by one expansion. `None` expands every
    /// reachable action sequence.
    pub max_chains: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            beam_width: 3,
            max_chains: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LearningConfig {
    pub alpha: f64,
    pub gamma: f64,
    /// Exploration rate; intra-turn updates only run when this is positive.
    pub epsilon: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.001,
            gamma: DISCOUNT,
            epsilon: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    pub games: u32,
    pub seed: u64,
    /// A match still running after this many turns is scored as a draw.
    pub max_turns: u32,
    /// Opening cards costing more than this are sent back by the weight
    /// table mulligan.
    pub mulligan_cost: i32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: 0xF1AE,
            max_turns: 120,
            mulligan_cost: 3,
        }
    }
}
