use crate::{CardClass, Content, GameConfig, GameError, RngState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckList {
    pub name: String,
    pub class: CardClass,
    pub cards: Vec<String>,
}

impl DeckList {
    pub fn count(&self, id: &str) -> usize {
        self.cards.iter().filter(|card| card.as_str() == id).count()
    }

    /// Checks size, card existence, class restrictions and copy limits.
    pub fn validate(&self, content: &Content, config: &GameConfig) -> Result<(), GameError> {
        if self.cards.len() != config.deck_size {
            return Err(GameError::InvalidDeck(format!(
                "{} has {} cards, expected {}",
                self.name,
                self.cards.len(),
                config.deck_size
            )));
        }
        for id in &self.cards {
            let def = content.require(id)?;
            if !def.collectible {
                return Err(GameError::InvalidDeck(format!("{id} is not collectible")));
            }
            if def.class != CardClass::Neutral && def.class != self.class {
                return Err(GameError::InvalidDeck(format!(
                    "{id} is a {:?} card in a {:?} deck",
                    def.class, self.class
                )));
            }
            if self.count(id) > def.max_copies(config) {
                return Err(GameError::InvalidDeck(format!("too many copies of {id}")));
            }
        }
        Ok(())
    }
}

/// Fills a deck with random collectible cards legal for `class`.
pub fn random_draft(
    content: &Content,
    class: CardClass,
    config: &GameConfig,
    exclude: &[String],
    rng: &mut RngState,
) -> Result<DeckList, GameError> {
    let collection: Vec<_> = content
        .collectible_for(class)
        .filter(|card| !exclude.contains(&card.id))
        .collect();
    let capacity: usize = collection
        .iter()
        .map(|card| card.max_copies(config))
        .sum();
    if capacity < config.deck_size {
        return Err(GameError::InvalidDeck(format!(
            "only {capacity} {class:?} cards available for a {}-card deck",
            config.deck_size
        )));
    }

    let mut deck = DeckList {
        name: format!("random {class:?}"),
        class,
        cards: Vec::with_capacity(config.deck_size),
    };
    while deck.cards.len() < config.deck_size {
        let card = collection[rng.gen_index(collection.len())];
        if deck.count(&card.id) < card.max_copies(config) {
            deck.cards.push(card.id.clone());
        }
    }
    Ok(deck)
}

/// Weighted sample without replacement across several pools. A pool is picked
/// with probability proportional to its weight times its remaining size, then
/// a card is taken uniformly from it.
pub fn weighted_card_choice<T>(
    weights: &[u64],
    mut pools: Vec<Vec<T>>,
    count: usize,
    rng: &mut RngState,
) -> Vec<T> {
    let mut chosen = Vec::with_capacity(count);
    for _ in 0..count {
        let total: u64 = weights
            .iter()
            .zip(&pools)
            .map(|(weight, pool)| weight * pool.len() as u64)
            .sum();
        if total == 0 {
            break;
        }
        let mut roll = rng.gen_below(total);
        let mut picked = None;
        for (idx, (weight, pool)) in weights.iter().zip(&pools).enumerate() {
            let span = weight * pool.len() as u64;
            if roll < span {
                picked = Some(idx);
                break;
            }
            roll -= span;
        }
        let Some(set) = picked else {
            break;
        };
        let card_index = rng.gen_index(pools[set].len());
        chosen.push(pools[set].remove(card_index));
    }
    chosen
}

pub fn builtin_deck(class: CardClass) -> DeckList {
    let (name, pairs, singles): (&str, &[&str], &[&str]) = match class {
        CardClass::Warlock | CardClass::Neutral => (
            "Prince Warlock",
            &[
                "CS2_065", "EX1_302", "UNG_809", "ICC_092", "CS2_189", "CS2_172", "CS2_121",
                "OG_113", "CS2_057", "CS2_061", "CS2_182", "ICC_466", "ICC_075", "ICC_705",
            ],
            &["ICC_851", "CS2_062"],
        ),
        CardClass::Mage => (
            "Basic Mage",
            &[
                "CS2_168", "CS2_189", "UNG_809", "CS2_024", "CS2_172", "CS2_120", "CS2_023",
                "CS2_124", "CS2_118", "CS2_029", "CS2_033", "CS2_182", "CS2_179", "CS2_200",
                "CS2_032",
            ],
            &[],
        ),
        CardClass::Druid => (
            "Basic Druid",
            &[
                "CS2_231", "CS1_042", "EX1_160", "EX1_169", "CS2_009", "CS2_120", "EX1_015",
                "CS2_173", "CS2_124", "CS2_179", "CS2_182", "CS2_200", "CS2_201", "CS2_232",
                "ICC_705",
            ],
            &[],
        ),
        CardClass::Warrior => (
            "Basic Warrior",
            &[
                "EX1_400", "CS2_105", "CS1_042", "CS2_168", "CS2_121", "CS2_172", "CS2_173",
                "EX1_606", "CS2_124", "OG_113", "CS2_179", "ICC_466", "ICC_075", "CS2_200",
                "CS2_201",
            ],
            &[],
        ),
    };
    let deck_class = if class == CardClass::Neutral {
        CardClass::Warlock
    } else {
        class
    };
    let mut cards = Vec::with_capacity(30);
    for id in pairs {
        cards.push(id.to_string());
        cards.push(id.to_string());
    }
    cards.extend(singles.iter().map(|id| id.to_string()));
    DeckList {
        name: name.to_string(),
        class: deck_class,
        cards,
    }
}
