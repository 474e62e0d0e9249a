use super::{Game, GameError};
use crate::*;
use std::sync::Arc;
use tracing::trace;

impl Game {
    /// Ends the current player's turn: end-of-turn triggers fire, temporary
    /// hero attack is cleared and the opponent starts their turn.
    pub fn end_turn(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        self.ensure_running()?;
        let player = self.current;
        let content = Arc::clone(&self.content);
        let board: Vec<(u32, String)> = self.players[player]
            .board
            .iter()
            .map(|minion| (minion.uid, minion.id.clone()))
            .collect();
        for (uid, id) in board {
            let Some(def) = content.card(&id) else {
                continue;
            };
            for trigger in def.triggers_on(TriggerPoint::OwnTurnEnd) {
                let source = Some(CharacterRef::Minion(player, uid));
                self.resolve_effects(player, source, None, &trigger.effects, events)?;
            }
        }
        self.players[player].hero.attack = 0;
        events.push(Event::TurnEnded { player });
        self.resolve_deaths(events);
        if self.is_over() {
            return Ok(());
        }
        self.current = opponent_of(player);
        self.start_turn(events);
        Ok(())
    }

    pub(crate) fn start_turn(&mut self, events: &mut EventBus) {
        self.turn += 1;
        let player = self.current;
        let cap = self.config.max_mana;
        let slot = &mut self.players[player];
        slot.max_mana = (slot.max_mana + 1).min(cap);
        slot.mana = slot.max_mana;
        slot.hero.power_used = false;
        slot.hero.attacks_this_turn = 0;
        for minion in &mut slot.board {
            minion.exhausted = false;
            minion.attacks_this_turn = 0;
        }
        let mana = slot.mana;
        events.push(Event::TurnStarted {
            player,
            turn: self.turn,
            mana,
        });
        trace!(player, turn = self.turn, mana, "turn started");
        self.draw(player, 1, events);
        self.resolve_deaths(events);
    }

    /// Draws `count` cards. An empty deck deals growing fatigue damage and a
    /// full hand burns the drawn card.
    pub(crate) fn draw(&mut self, player: PlayerId, count: u32, events: &mut EventBus) {
        for _ in 0..count {
            let limit = self.config.hand_limit;
            let slot = &mut self.players[player];
            match slot.deck.pop() {
                None => {
                    slot.fatigue += 1;
                    let damage = slot.fatigue;
                    events.push(Event::Fatigue { player, damage });
                    self.deal_damage(CharacterRef::Hero(player), damage, events);
                }
                Some(card) if slot.hand.len() >= limit => {
                    events.push(Event::CardBurned {
                        player,
                        card: card.id,
                    });
                }
                Some(card) => {
                    slot.hand.push(card);
                    events.push(Event::CardDrawn { player });
                }
            }
        }
    }
}
