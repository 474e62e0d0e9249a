use super::{Game, GameError, PlayerSetup};
use crate::*;
use std::sync::Arc;
use tracing::debug;

impl Game {
    /// Builds both players, shuffles their decks and deals opening hands.
    /// The game is ready for mulligans; call [`Game::start`] afterwards.
    pub fn new(
        content: Arc<Content>,
        config: GameConfig,
        setups: [PlayerSetup; 2],
        seed: u64,
    ) -> Result<Self, GameError> {
        let [first, second] = setups;
        let mut game = Self {
            players: [
                Player::new(first.name.clone(), placeholder_hero()),
                Player::new(second.name.clone(), placeholder_hero()),
            ],
            content,
            config,
            current: 0,
            turn: 0,
            rng: RngState::from_seed(seed),
            outcome: None,
            started: false,
            next_uid: 1,
        };
        game.seat(0, &first.deck)?;
        game.seat(1, &second.deck)?;

        let opening = [game.config.first_hand, game.config.second_hand];
        for (player, count) in opening.into_iter().enumerate() {
            for _ in 0..count {
                let Some(card) = game.players[player].deck.pop() else {
                    break;
                };
                game.players[player].hand.push(card);
            }
        }
        Ok(game)
    }

    fn seat(&mut self, player: PlayerId, deck: &DeckList) -> Result<(), GameError> {
        let content = Arc::clone(&self.content);
        let power = content
            .hero_power_for(deck.class)
            .ok_or(GameError::MissingHeroPower(deck.class))?;
        let mut cards = Vec::with_capacity(deck.cards.len());
        for id in &deck.cards {
            let def = content.require(id)?;
            let uid = self.alloc_uid();
            cards.push(Card::from_def(uid, def));
        }
        self.rng.shuffle(&mut cards);
        let slot = &mut self.players[player];
        slot.hero = Hero::new(deck.class, self.config.starting_health, power.id.clone());
        slot.deck = cards;
        Ok(())
    }

    /// Replaces the opening cards at `indices` with fresh draws. Replacements
    /// are drawn before the returned cards are shuffled back in.
    pub fn mulligan(
        &mut self,
        player: PlayerId,
        indices: &[usize],
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        let mut picked = indices.to_vec();
        picked.sort_unstable();
        picked.dedup();
        let hand_len = self.players[player].hand.len();
        if let Some(bad) = picked.iter().find(|idx| **idx >= hand_len) {
            return Err(GameError::InvalidHandIndex(*bad));
        }

        let slot = &mut self.players[player];
        let mut returned = Vec::with_capacity(picked.len());
        for idx in picked.iter().rev() {
            returned.push(slot.hand.remove(*idx));
        }
        for _ in 0..returned.len() {
            if let Some(card) = slot.deck.pop() {
                slot.hand.push(card);
            }
        }
        slot.deck.append(&mut returned);
        self.rng.shuffle(&mut self.players[player].deck);
        events.push(Event::Mulligan {
            player,
            replaced: picked.len(),
        });
        Ok(())
    }

    /// Hands the coin to the second player and begins the first turn.
    pub fn start(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        self.started = true;
        if let Some(coin) = self.config.coin_card.clone() {
            self.put_in_hand(1, &coin, events)?;
        }
        events.push(Event::GameStarted { first: 0 });
        debug!(
            first = %self.players[0].name,
            second = %self.players[1].name,
            "game started"
        );
        self.current = 0;
        self.start_turn(events);
        Ok(())
    }

    /// Adds a fresh copy of `card_id` to a hand, burning it when the hand is
    /// full. Returns the new card's uid when it was kept.
    pub fn put_in_hand(
        &mut self,
        player: PlayerId,
        card_id: &str,
        events: &mut EventBus,
    ) -> Result<Option<u32>, GameError> {
        let content = Arc::clone(&self.content);
        let def = content.require(card_id)?;
        let uid = self.alloc_uid();
        let card = Card::from_def(uid, def);
        if self.players[player].hand.len() >= self.config.hand_limit {
            events.push(Event::CardBurned {
                player,
                card: card.id,
            });
            return Ok(None);
        }
        self.players[player].hand.push(card);
        Ok(Some(uid))
    }
}

fn placeholder_hero() -> Hero {
    Hero::new(CardClass::Neutral, 0, String::new())
}
