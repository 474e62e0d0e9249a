use fireside_core::{CharacterRef, Game, PlayerId};
use serde::{Deserialize, Serialize};

/// What a card in hand needs when played: nothing, a target, or a
/// choose-one mode. Never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Choices {
    None,
    Targets(Vec<CharacterRef>),
    Modes(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Action {
    PlayCard {
        hand_index: usize,
        card_id: String,
        choices: Choices,
    },
    UseHeroPower {
        targets: Option<Vec<CharacterRef>>,
    },
    Attack {
        attacker: CharacterRef,
        targets: Vec<CharacterRef>,
    },
    EndTurn,
}

impl Action {
    /// `None` when no selection is needed, otherwise the number of targets
    /// or modes to pick from.
    pub fn target_count(&self) -> Option<usize> {
        match self {
            Self::PlayCard { choices, .. } => match choices {
                Choices::None => None,
                Choices::Targets(targets) => Some(targets.len()),
                Choices::Modes(modes) => Some(modes.len()),
            },
            Self::UseHeroPower { targets } => targets.as_ref().map(Vec::len),
            Self::Attack { targets, .. } => Some(targets.len()),
            Self::EndTurn => None,
        }
    }

    /// Every way to issue this action: one `None` when no selection is
    /// needed, else one index per option.
    pub fn target_options(&self) -> Vec<Option<usize>> {
        match self.target_count() {
            None => vec![None],
            Some(count) => (0..count).map(Some).collect(),
        }
    }

    pub fn is_end_turn(&self) -> bool {
        matches!(self, Self::EndTurn)
    }

    pub fn stable_key(&self) -> String {
        match self {
            Self::PlayCard {
                hand_index,
                card_id,
                ..
            } => format!("play:{hand_index}:{card_id}"),
            Self::UseHeroPower { .. } => "hero_power".to_string(),
            Self::Attack { attacker, .. } => format!("attack:{attacker:?}"),
            Self::EndTurn => "end_turn".to_string(),
        }
    }

    pub fn short_label(&self, target: Option<usize>) -> String {
        let base = match self {
            Self::PlayCard { card_id, .. } => format!("play {card_id}"),
            Self::UseHeroPower { .. } => "hero power".to_string(),
            Self::Attack { attacker, .. } => format!("attack with {attacker:?}"),
            Self::EndTurn => "end turn".to_string(),
        };
        let chosen = match (self, target) {
            (
                Self::PlayCard {
                    choices: Choices::Modes(modes),
                    ..
                },
                Some(idx),
            ) => modes.get(idx).cloned(),
            (
                Self::PlayCard {
                    choices: Choices::Targets(targets),
                    ..
                },
                Some(idx),
            )
            | (
                Self::UseHeroPower {
                    targets: Some(targets),
                },
                Some(idx),
            )
            | (Self::Attack { targets, .. }, Some(idx)) => {
                targets.get(idx).map(|target| format!("{target:?}"))
            }
            _ => None,
        };
        match chosen {
            Some(chosen) => format!("{base} -> {chosen}"),
            None => base,
        }
    }
}

/// Legal actions for `player` in a fixed order: playable hand cards, hero
/// power, ready attackers (hero first, then board order) and one trailing
/// `EndTurn`. Only `EndTurn` is offered off-turn or after the match ended.
pub fn legal_actions(game: &Game, player: PlayerId) -> Vec<Action> {
    let mut actions = Vec::new();
    if game.is_over() || !game.started || game.current_player() != player {
        actions.push(Action::EndTurn);
        return actions;
    }

    for (hand_index, card) in game.player(player).hand.iter().enumerate() {
        if !game.is_playable(player, hand_index) {
            continue;
        }
        let choices = if game.must_choose_one(player, hand_index) {
            Choices::Modes(game.choice_modes(player, hand_index))
        } else if game.requires_target(player, hand_index) {
            Choices::Targets(game.card_targets(player, hand_index))
        } else {
            Choices::None
        };
        actions.push(Action::PlayCard {
            hand_index,
            card_id: card.id.clone(),
            choices,
        });
    }

    if game.hero_power_usable(player) {
        let targets = game
            .hero_power_requires_target(player)
            .then(|| game.hero_power_targets(player));
        actions.push(Action::UseHeroPower { targets });
    }

    for attacker in game.characters(player) {
        if game.can_attack(attacker) {
            actions.push(Action::Attack {
                attacker,
                targets: game.attack_targets(attacker),
            });
        }
    }

    actions.push(Action::EndTurn);
    actions
}

/// Position of the trailing `EndTurn` in [`legal_actions`].
pub fn end_turn_index(game: &Game, player: PlayerId) -> usize {
    legal_actions(game, player).len().saturating_sub(1)
}
