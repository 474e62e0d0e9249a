use super::Game;
use crate::*;

impl Game {
    /// Every character a player controls: the hero, then the board in order.
    pub fn characters(&self, player: PlayerId) -> Vec<CharacterRef> {
        let mut out = vec![CharacterRef::Hero(player)];
        out.extend(
            self.players[player]
                .board
                .iter()
                .map(|minion| CharacterRef::Minion(player, minion.uid)),
        );
        out
    }

    pub fn character_exists(&self, character: CharacterRef) -> bool {
        match character {
            CharacterRef::Hero(_) => true,
            CharacterRef::Minion(owner, uid) => self.players[owner].minion(uid).is_some(),
        }
    }

    pub fn attack_of(&self, character: CharacterRef) -> i32 {
        match character {
            CharacterRef::Hero(owner) => self.players[owner].hero.attack,
            CharacterRef::Minion(owner, uid) => self.players[owner]
                .minion(uid)
                .map(|minion| minion.attack)
                .unwrap_or(0),
        }
    }

    /// Characters matching `rule` from `owner`'s point of view, friendly side
    /// first.
    pub fn targets_for(&self, owner: PlayerId, rule: TargetRule) -> Vec<CharacterRef> {
        let enemy = opponent_of(owner);
        let minions = |player: PlayerId| {
            self.players[player]
                .board
                .iter()
                .map(move |minion| CharacterRef::Minion(player, minion.uid))
        };
        match rule {
            TargetRule::None => Vec::new(),
            TargetRule::AnyCharacter => {
                let mut out = self.characters(owner);
                out.extend(self.characters(enemy));
                out
            }
            TargetRule::AnyMinion => minions(owner).chain(minions(enemy)).collect(),
            TargetRule::FriendlyMinion => minions(owner).collect(),
            TargetRule::EnemyMinion => minions(enemy).collect(),
            TargetRule::EnemyCharacter => self.characters(enemy),
        }
    }

    fn hand_def(&self, player: PlayerId, hand_index: usize) -> Option<&CardDef> {
        let card = self.players[player].hand.get(hand_index)?;
        self.content.card(&card.id)
    }

    pub fn must_choose_one(&self, player: PlayerId, hand_index: usize) -> bool {
        self.hand_def(player, hand_index)
            .map(CardDef::must_choose_one)
            .unwrap_or(false)
    }

    /// Mode card ids for a choose-one card in hand; empty for ordinary cards.
    pub fn choice_modes(&self, player: PlayerId, hand_index: usize) -> Vec<String> {
        self.hand_def(player, hand_index)
            .map(|def| def.choose.clone())
            .unwrap_or_default()
    }

    /// Legal targets for the card in hand. Choose-one cards never take a
    /// target when played.
    pub fn card_targets(&self, player: PlayerId, hand_index: usize) -> Vec<CharacterRef> {
        match self.hand_def(player, hand_index) {
            Some(def) if !def.must_choose_one() => self.targets_for(player, def.target),
            _ => Vec::new(),
        }
    }

    /// Spells with a target rule always need one. A minion's battlecry is
    /// skipped when nothing matches.
    pub fn requires_target(&self, player: PlayerId, hand_index: usize) -> bool {
        let Some(def) = self.hand_def(player, hand_index) else {
            return false;
        };
        if def.target == TargetRule::None || def.must_choose_one() {
            return false;
        }
        !def.is_minion() || !self.targets_for(player, def.target).is_empty()
    }

    fn can_act(&self, player: PlayerId) -> bool {
        self.started && !self.is_over() && self.current == player
    }

    pub fn is_playable(&self, player: PlayerId, hand_index: usize) -> bool {
        if !self.can_act(player) {
            return false;
        }
        let Some(card) = self.players[player].hand.get(hand_index) else {
            return false;
        };
        let Some(def) = self.content.card(&card.id) else {
            return false;
        };
        if card.cost > self.players[player].mana {
            return false;
        }
        if def.is_minion() {
            return self.players[player].board.len() < self.config.board_limit;
        }
        if def.target != TargetRule::None && !def.must_choose_one() {
            return !self.targets_for(player, def.target).is_empty();
        }
        true
    }

    fn hero_power_def(&self, player: PlayerId) -> Option<&HeroPowerDef> {
        self.content.hero_power(&self.players[player].hero.power)
    }

    pub fn hero_power_usable(&self, player: PlayerId) -> bool {
        if !self.can_act(player) {
            return false;
        }
        let state = &self.players[player];
        let Some(power) = self.hero_power_def(player) else {
            return false;
        };
        if state.hero.power_used || power.cost > state.mana {
            return false;
        }
        power.target == TargetRule::None || !self.targets_for(player, power.target).is_empty()
    }

    pub fn hero_power_requires_target(&self, player: PlayerId) -> bool {
        self.hero_power_def(player)
            .map(|power| power.target != TargetRule::None)
            .unwrap_or(false)
    }

    pub fn hero_power_targets(&self, player: PlayerId) -> Vec<CharacterRef> {
        self.hero_power_def(player)
            .map(|power| self.targets_for(player, power.target))
            .unwrap_or_default()
    }

    pub fn can_attack(&self, character: CharacterRef) -> bool {
        if !self.can_act(character.owner()) {
            return false;
        }
        match character {
            CharacterRef::Hero(owner) => {
                let hero = &self.players[owner].hero;
                hero.attack > 0 && hero.attacks_this_turn == 0
            }
            CharacterRef::Minion(owner, uid) => self.players[owner]
                .minion(uid)
                .map(Minion::is_ready)
                .unwrap_or(false),
        }
    }

    /// Characters `character` may attack. Enemy taunt minions must be dealt
    /// with before anything else.
    pub fn attack_targets(&self, character: CharacterRef) -> Vec<CharacterRef> {
        let enemy = opponent_of(character.owner());
        let board = &self.players[enemy].board;
        let taunts: Vec<_> = board
            .iter()
            .filter(|minion| minion.taunt)
            .map(|minion| CharacterRef::Minion(enemy, minion.uid))
            .collect();
        if taunts.is_empty() {
            self.characters(enemy)
        } else {
            taunts
        }
    }
}
