use super::{Game, GameError};
use crate::*;
use std::sync::Arc;
use tracing::debug;

impl Game {
    pub(crate) fn resolve_effects(
        &mut self,
        player: PlayerId,
        source: Option<CharacterRef>,
        target: Option<CharacterRef>,
        effects: &[Effect],
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        for effect in effects {
            self.resolve_effect(player, source, target, effect, events)?;
        }
        Ok(())
    }

    fn resolve_effect(
        &mut self,
        player: PlayerId,
        source: Option<CharacterRef>,
        target: Option<CharacterRef>,
        effect: &Effect,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        match effect {
            Effect::Damage { to, amount } => {
                for character in self.select(player, source, target, *to) {
                    self.deal_damage(character, *amount, events);
                }
            }
            Effect::Heal { to, amount } => {
                for character in self.select(player, source, target, *to) {
                    self.heal(character, *amount, events);
                }
            }
            Effect::Buff {
                to,
                attack,
                health,
                taunt,
            } => {
                for character in self.select(player, source, target, *to) {
                    let CharacterRef::Minion(owner, uid) = character else {
                        continue;
                    };
                    if let Some(minion) = self.players[owner].minion_mut(uid) {
                        minion.attack += attack;
                        minion.health += health;
                        minion.max_health += health;
                        minion.taunt |= taunt;
                    }
                }
            }
            Effect::BuffDeck { attack, health } => {
                let content = Arc::clone(&self.content);
                for card in &mut self.players[player].deck {
                    if content.card(&card.id).map(CardDef::is_minion).unwrap_or(false) {
                        card.attack += attack;
                        card.health += health;
                    }
                }
            }
            Effect::Draw { count } => self.draw(player, *count, events),
            Effect::GiveCard { card } => {
                self.put_in_hand(player, card, events)?;
            }
            Effect::Summon { card } => {
                self.summon_minion(player, card, events)?;
            }
            Effect::SummonCopy => {
                if let Some(CharacterRef::Minion(owner, uid)) = source {
                    self.summon_copy(owner, uid, events);
                }
            }
            Effect::GainArmor { amount } => self.players[player].hero.armor += amount,
            Effect::GainMana { amount } => {
                let cap = self.config.max_mana;
                let slot = &mut self.players[player];
                slot.mana = (slot.mana + amount).min(cap);
            }
            Effect::GainHeroAttack { amount } => self.players[player].hero.attack += amount,
        }
        Ok(())
    }

    fn select(
        &self,
        player: PlayerId,
        source: Option<CharacterRef>,
        target: Option<CharacterRef>,
        selector: Selector,
    ) -> Vec<CharacterRef> {
        let enemy = opponent_of(player);
        match selector {
            Selector::Target => target.into_iter().collect(),
            Selector::Source => source.into_iter().collect(),
            Selector::FriendlyHero => vec![CharacterRef::Hero(player)],
            Selector::EnemyHero => vec![CharacterRef::Hero(enemy)],
            Selector::FriendlyMinions => self.targets_for(player, TargetRule::FriendlyMinion),
            Selector::EnemyMinions => self.targets_for(player, TargetRule::EnemyMinion),
            Selector::AllMinions => self.targets_for(player, TargetRule::AnyMinion),
            Selector::AllCharacters => self.targets_for(player, TargetRule::AnyCharacter),
        }
    }

    /// Armor soaks hero damage first. Dead minions stay on the board until
    /// [`Game::resolve_deaths`] runs.
    pub(crate) fn deal_damage(&mut self, target: CharacterRef, amount: i32, events: &mut EventBus) {
        if amount <= 0 {
            return;
        }
        match target {
            CharacterRef::Hero(owner) => {
                let hero = &mut self.players[owner].hero;
                let absorbed = hero.armor.min(amount);
                hero.armor -= absorbed;
                hero.health -= amount - absorbed;
            }
            CharacterRef::Minion(owner, uid) => match self.players[owner].minion_mut(uid) {
                Some(minion) => minion.health -= amount,
                None => return,
            },
        }
        events.push(Event::Damaged { target, amount });
    }

    fn heal(&mut self, target: CharacterRef, amount: i32, events: &mut EventBus) {
        let (health, max_health) = match target {
            CharacterRef::Hero(owner) => {
                let hero = &mut self.players[owner].hero;
                (&mut hero.health, hero.max_health)
            }
            CharacterRef::Minion(owner, uid) => match self.players[owner].minion_mut(uid) {
                Some(minion) => (&mut minion.health, minion.max_health),
                None => return,
            },
        };
        let healed = (max_health - *health).clamp(0, amount.max(0));
        *health += healed;
        if healed > 0 {
            events.push(Event::Healed {
                target,
                amount: healed,
            });
        }
    }

    /// Puts a fresh minion on `player`'s board and fires summon triggers.
    /// Returns `None` when the board is full.
    pub fn summon_minion(
        &mut self,
        player: PlayerId,
        card_id: &str,
        events: &mut EventBus,
    ) -> Result<Option<u32>, GameError> {
        let content = Arc::clone(&self.content);
        let def = content.require(card_id)?;
        if !def.is_minion() {
            return Err(GameError::NotPlayable(card_id.to_string()));
        }
        if self.players[player].board.len() >= self.config.board_limit {
            return Ok(None);
        }
        let uid = self.alloc_uid();
        let minion = Minion::from_card(&Card::from_def(uid, def), def);
        self.players[player].board.push(minion);
        events.push(Event::MinionSummoned {
            player,
            card: def.id.clone(),
            uid,
        });
        self.after_summon(player, uid, events)?;
        Ok(Some(uid))
    }

    fn summon_copy(&mut self, owner: PlayerId, uid: u32, events: &mut EventBus) {
        if self.players[owner].board.len() >= self.config.board_limit {
            return;
        }
        let Some(original) = self.players[owner].minion(uid).cloned() else {
            return;
        };
        let copy_uid = self.alloc_uid();
        let copy = Minion {
            uid: copy_uid,
            exhausted: true,
            attacks_this_turn: 0,
            ..original
        };
        events.push(Event::MinionSummoned {
            player: owner,
            card: copy.id.clone(),
            uid: copy_uid,
        });
        self.players[owner].board.push(copy);
    }

    /// Clears dead minions and settles the outcome once a hero has fallen.
    pub(crate) fn resolve_deaths(&mut self, events: &mut EventBus) {
        for player in 0..2 {
            let board = &mut self.players[player].board;
            let mut idx = 0;
            while idx < board.len() {
                if board[idx].health <= 0 {
                    let dead = board.remove(idx);
                    events.push(Event::MinionDied {
                        player,
                        card: dead.id,
                    });
                } else {
                    idx += 1;
                }
            }
        }
        if self.outcome.is_some() {
            return;
        }
        let fallen = [
            self.players[0].hero.health <= 0,
            self.players[1].hero.health <= 0,
        ];
        let outcome = match fallen {
            [true, true] => GameOutcome::Draw,
            [true, false] => GameOutcome::Won {
                winner: 1,
                loser: 0,
            },
            [false, true] => GameOutcome::Won {
                winner: 0,
                loser: 1,
            },
            [false, false] => return,
        };
        self.outcome = Some(outcome);
        events.push(Event::GameEnded { outcome });
        debug!(?outcome, turn = self.turn, "game ended");
    }
}
