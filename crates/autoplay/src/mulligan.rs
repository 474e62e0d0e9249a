use fireside_core::{Card, Content};
use rand::seq::index::sample;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-card keep score for opening hands. Negative means send it back.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CardWeights(BTreeMap<String, f64>);

impl CardWeights {
    /// Scores every collectible card by how far its cost is under
    /// `max_cost`; anything pricier comes out negative.
    pub fn by_cost(content: &Content, max_cost: i32) -> Self {
        Self(
            content
                .cards()
                .iter()
                .filter(|card| card.collectible)
                .map(|card| (card.id.clone(), f64::from(max_cost - card.cost)))
                .collect(),
        )
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.0.get(id).copied()
    }

    pub fn set(&mut self, id: impl Into<String>, weight: f64) {
        self.0.insert(id.into(), weight);
    }
}

/// Hand indices whose weight is negative. Unknown cards are kept.
pub fn mulligan_by_weights(hand: &[Card], weights: &CardWeights) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|(_, card)| weights.get(&card.id).is_some_and(|weight| weight < 0.0))
        .map(|(idx, _)| idx)
        .collect()
}

/// A uniformly sized, uniformly chosen subset of the hand.
pub fn random_mulligan<R: Rng>(hand: &[Card], rng: &mut R) -> Vec<usize> {
    let count = rng.gen_range(0..=hand.len());
    let mut picked = sample(rng, hand.len(), count).into_vec();
    picked.sort_unstable();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn card(uid: u32, id: &str, cost: i32) -> Card {
        Card {
            uid,
            id: id.to_string(),
            cost,
            attack: 0,
            health: 0,
        }
    }

    #[test]
    fn negative_weights_go_back() {
        let hand = vec![card(1, "cheap", 1), card(2, "dear", 7), card(3, "odd", 2)];
        let mut weights = CardWeights::default();
        weights.set("cheap", 2.0);
        weights.set("dear", -4.0);
        assert_eq!(mulligan_by_weights(&hand, &weights), vec![1]);
    }

    #[test]
    fn cost_table_marks_expensive_cards() {
        let content = Content::builtin();
        let weights = CardWeights::by_cost(&content, 3);
        assert!(weights.get("CS2_200").is_some_and(|w| w < 0.0));
        assert!(weights.get("CS2_172").is_some_and(|w| w > 0.0));
        assert_eq!(weights.get("EX1_160t"), None);
    }

    #[test]
    fn random_mulligan_picks_valid_indices() {
        let hand: Vec<Card> = (0..4).map(|uid| card(uid, "x", 1)).collect();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let picked = random_mulligan(&hand, &mut rng);
            assert!(picked.len() <= hand.len());
            assert!(picked.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(picked.iter().all(|idx| *idx < hand.len()));
        }
    }
}
