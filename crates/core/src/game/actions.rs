use super::{Game, GameError};
use crate::*;
use std::sync::Arc;
use tracing::trace;

impl Game {
    /// Plays the card at `hand_index`. `choice` picks a mode of a choose-one
    /// card; `target` aims the card when it needs one.
    pub fn play_card(
        &mut self,
        hand_index: usize,
        choice: Option<usize>,
        target: Option<CharacterRef>,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.ensure_running()?;
        let player = self.current;
        let content = Arc::clone(&self.content);
        let card = self.players[player]
            .hand
            .get(hand_index)
            .cloned()
            .ok_or(GameError::InvalidHandIndex(hand_index))?;
        let def = content.require(&card.id)?;
        if !self.is_playable(player, hand_index) {
            return Err(GameError::NotPlayable(card.id));
        }

        let mode = if def.must_choose_one() {
            let idx = choice.ok_or(GameError::ChoiceRequired)?;
            let mode_id = def.choose.get(idx).ok_or(GameError::InvalidChoice(idx))?;
            Some(content.require(mode_id)?)
        } else {
            None
        };
        let target = self.check_target(player, hand_index, target)?;

        self.players[player].hand.remove(hand_index);
        let slot = &mut self.players[player];
        slot.mana -= card.cost;
        slot.mana_spent += card.cost;
        events.push(Event::CardPlayed {
            player,
            card: card.id.clone(),
            cost: card.cost,
        });
        trace!(player, card = %card.id, cost = card.cost, "card played");

        if def.is_minion() {
            let minion = Minion::from_card(&card, def);
            let source = CharacterRef::Minion(player, minion.uid);
            self.players[player].board.push(minion);
            events.push(Event::MinionSummoned {
                player,
                card: card.id.clone(),
                uid: card.uid,
            });
            self.resolve_effects(player, Some(source), target, &def.play, events)?;
            self.after_summon(player, card.uid, events)?;
        } else {
            let effects = match mode {
                Some(mode) => &mode.play,
                None => &def.play,
            };
            self.resolve_effects(player, None, target, effects, events)?;
        }
        self.resolve_deaths(events);
        Ok(())
    }

    fn check_target(
        &self,
        player: PlayerId,
        hand_index: usize,
        target: Option<CharacterRef>,
    ) -> Result<Option<CharacterRef>, GameError> {
        match target {
            Some(target) if self.card_targets(player, hand_index).contains(&target) => {
                Ok(Some(target))
            }
            Some(target) => Err(GameError::InvalidTarget(target)),
            None if self.requires_target(player, hand_index) => Err(GameError::TargetRequired),
            None => Ok(None),
        }
    }

    pub fn use_hero_power(
        &mut self,
        target: Option<CharacterRef>,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.ensure_running()?;
        let player = self.current;
        if !self.hero_power_usable(player) {
            return Err(GameError::HeroPowerUnavailable);
        }
        let content = Arc::clone(&self.content);
        let power = content
            .hero_power(&self.players[player].hero.power)
            .ok_or(GameError::HeroPowerUnavailable)?;
        let target = match (power.target, target) {
            (TargetRule::None, _) => None,
            (rule, Some(target)) => {
                if !self.targets_for(player, rule).contains(&target) {
                    return Err(GameError::InvalidTarget(target));
                }
                Some(target)
            }
            (_, None) => return Err(GameError::TargetRequired),
        };

        let slot = &mut self.players[player];
        slot.mana -= power.cost;
        slot.mana_spent += power.cost;
        slot.hero.power_used = true;
        events.push(Event::HeroPowerUsed {
            player,
            power: power.id.clone(),
        });
        self.resolve_effects(
            player,
            Some(CharacterRef::Hero(player)),
            target,
            &power.effects,
            events,
        )?;
        self.resolve_deaths(events);
        Ok(())
    }

    /// Combat between two characters. Only a minion defender strikes back.
    pub fn attack(
        &mut self,
        attacker: CharacterRef,
        target: CharacterRef,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.ensure_running()?;
        if attacker.owner() != self.current {
            return Err(GameError::NotYourTurn(attacker.owner()));
        }
        if !self.can_attack(attacker) {
            return Err(GameError::CannotAttack(attacker));
        }
        if !self.attack_targets(attacker).contains(&target) {
            return Err(GameError::InvalidTarget(target));
        }

        let damage = self.attack_of(attacker);
        let retaliation = if target.is_hero() {
            0
        } else {
            self.attack_of(target)
        };
        match attacker {
            CharacterRef::Hero(owner) => self.players[owner].hero.attacks_this_turn += 1,
            CharacterRef::Minion(owner, uid) => {
                if let Some(minion) = self.players[owner].minion_mut(uid) {
                    minion.attacks_this_turn += 1;
                }
            }
        }
        events.push(Event::Attacked { attacker, target });
        self.deal_damage(target, damage, events);
        if retaliation > 0 {
            self.deal_damage(attacker, retaliation, events);
        }
        self.resolve_deaths(events);
        Ok(())
    }

    pub(crate) fn after_summon(
        &mut self,
        player: PlayerId,
        summoned: u32,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let content = Arc::clone(&self.content);
        let watchers: Vec<(u32, String)> = self.players[player]
            .board
            .iter()
            .filter(|minion| minion.uid != summoned)
            .map(|minion| (minion.uid, minion.id.clone()))
            .collect();
        for (uid, id) in watchers {
            let Some(def) = content.card(&id) else {
                continue;
            };
            for trigger in def.triggers_on(TriggerPoint::AfterFriendlySummon) {
                let source = Some(CharacterRef::Minion(player, uid));
                self.resolve_effects(player, source, None, &trigger.effects, events)?;
            }
        }
        Ok(())
    }
}
