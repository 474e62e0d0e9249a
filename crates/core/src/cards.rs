use crate::GameConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CardClass {
    Neutral,
    Druid,
    Mage,
    Warlock,
    Warrior,
}

impl CardClass {
    pub const PLAYABLE: [CardClass; 4] = [
        CardClass::Druid,
        CardClass::Mage,
        CardClass::Warlock,
        CardClass::Warrior,
    ];
}

impl Default for CardClass {
    fn default() -> Self {
        Self::Neutral
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Free,
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Default for Rarity {
    fn default() -> Self {
        Self::Common
    }
}

/// Which characters a card or hero power may be aimed at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetRule {
    #[default]
    None,
    AnyCharacter,
    AnyMinion,
    FriendlyMinion,
    EnemyMinion,
    EnemyCharacter,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    Target,
    Source,
    FriendlyHero,
    EnemyHero,
    FriendlyMinions,
    EnemyMinions,
    AllMinions,
    AllCharacters,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Effect {
    Damage {
        to: Selector,
        amount: i32,
    },
    Heal {
        to: Selector,
        amount: i32,
    },
    Buff {
        to: Selector,
        attack: i32,
        health: i32,
        #[serde(default)]
        taunt: bool,
    },
    BuffDeck {
        attack: i32,
        health: i32,
    },
    Draw {
        count: u32,
    },
    GiveCard {
        card: String,
    },
    Summon {
        card: String,
    },
    SummonCopy,
    GainArmor {
        amount: i32,
    },
    GainMana {
        amount: i32,
    },
    GainHeroAttack {
        amount: i32,
    },
}

impl Effect {
    /// Card ids this effect refers to, used when validating a content pack.
    pub fn referenced_card(&self) -> Option<&str> {
        match self {
            Self::GiveCard { card } | Self::Summon { card } => Some(card.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPoint {
    AfterFriendlySummon,
    OwnTurnEnd,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trigger {
    pub on: TriggerPoint,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardKind {
    Minion {
        attack: i32,
        health: i32,
        #[serde(default)]
        taunt: bool,
        #[serde(default)]
        charge: bool,
    },
    Spell,
}

fn default_collectible() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub class: CardClass,
    #[serde(default)]
    pub rarity: Rarity,
    pub cost: i32,
    pub kind: CardKind,
    #[serde(default)]
    pub target: TargetRule,
    #[serde(default)]
    pub play: Vec<Effect>,
    /// Card ids of the alternative modes of a "choose one" card.
    #[serde(default)]
    pub choose: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default = "default_collectible")]
    pub collectible: bool,
}

impl CardDef {
    pub fn is_minion(&self) -> bool {
        matches!(self.kind, CardKind::Minion { .. })
    }

    pub fn must_choose_one(&self) -> bool {
        !self.choose.is_empty()
    }

    pub fn max_copies(&self, config: &GameConfig) -> usize {
        if self.rarity == Rarity::Legendary {
            1
        } else {
            config.max_copies
        }
    }

    pub fn triggers_on(&self, point: TriggerPoint) -> impl Iterator<Item = &Trigger> + '_ {
        self.triggers.iter().filter(move |trigger| trigger.on == point)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeroPowerDef {
    pub id: String,
    pub name: String,
    pub class: CardClass,
    pub cost: i32,
    #[serde(default)]
    pub target: TargetRule,
    pub effects: Vec<Effect>,
}

/// A card in a hand or deck. Stats are copied from the definition so that
/// effects such as deck buffs can change a single copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub uid: u32,
    pub id: String,
    pub cost: i32,
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub health: i32,
}

impl Card {
    pub fn from_def(uid: u32, def: &CardDef) -> Self {
        let (attack, health) = match def.kind {
            CardKind::Minion { attack, health, .. } => (attack, health),
            CardKind::Spell => (0, 0),
        };
        Self {
            uid,
            id: def.id.clone(),
            cost: def.cost,
            attack,
            health,
        }
    }
}
