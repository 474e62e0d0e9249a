use crate::{Card, CardClass, CardDef, CardKind};
use serde::{Deserialize, Serialize};

pub type PlayerId = usize;

pub fn opponent_of(player: PlayerId) -> PlayerId {
    1 - player
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CharacterRef {
    Hero(PlayerId),
    Minion(PlayerId, u32),
}

impl CharacterRef {
    pub fn owner(&self) -> PlayerId {
        match *self {
            Self::Hero(player) | Self::Minion(player, _) => player,
        }
    }

    pub fn is_hero(&self) -> bool {
        matches!(self, Self::Hero(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hero {
    pub class: CardClass,
    pub health: i32,
    pub max_health: i32,
    pub armor: i32,
    /// Attack gained this turn; cleared when the turn ends.
    pub attack: i32,
    pub attacks_this_turn: u8,
    pub power: String,
    pub power_used: bool,
}

impl Hero {
    pub fn new(class: CardClass, health: i32, power: String) -> Self {
        Self {
            class,
            health,
            max_health: health,
            armor: 0,
            attack: 0,
            attacks_this_turn: 0,
            power,
            power_used: false,
        }
    }

    pub fn effective_health(&self) -> i32 {
        self.health + self.armor
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Minion {
    pub uid: u32,
    pub id: String,
    pub cost: i32,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub taunt: bool,
    pub charge: bool,
    /// Summoned this turn and cannot attack yet.
    pub exhausted: bool,
    pub attacks_this_turn: u8,
}

impl Minion {
    pub fn from_card(card: &Card, def: &CardDef) -> Self {
        let (taunt, charge) = match def.kind {
            CardKind::Minion { taunt, charge, .. } => (taunt, charge),
            CardKind::Spell => (false, false),
        };
        Self {
            uid: card.uid,
            id: card.id.clone(),
            cost: card.cost,
            attack: card.attack,
            health: card.health,
            max_health: card.health,
            taunt,
            charge,
            exhausted: true,
            attacks_this_turn: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        (!self.exhausted || self.charge) && self.attacks_this_turn == 0 && self.attack > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub hero: Hero,
    pub hand: Vec<Card>,
    pub deck: Vec<Card>,
    pub board: Vec<Minion>,
    pub mana: i32,
    pub max_mana: i32,
    /// Mana spent over the whole match.
    pub mana_spent: i32,
    pub fatigue: i32,
}

impl Player {
    pub fn new(name: impl Into<String>, hero: Hero) -> Self {
        Self {
            name: name.into(),
            hero,
            hand: Vec::new(),
            deck: Vec::new(),
            board: Vec::new(),
            mana: 0,
            max_mana: 0,
            mana_spent: 0,
            fatigue: 0,
        }
    }

    pub fn minion(&self, uid: u32) -> Option<&Minion> {
        self.board.iter().find(|minion| minion.uid == uid)
    }

    pub fn minion_mut(&mut self, uid: u32) -> Option<&mut Minion> {
        self.board.iter_mut().find(|minion| minion.uid == uid)
    }

    pub fn board_attack(&self) -> i32 {
        self.hero.attack + self.board.iter().map(|minion| minion.attack).sum::<i32>()
    }

    pub fn board_cost(&self) -> i32 {
        self.board.iter().map(|minion| minion.cost).sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameOutcome {
    Won { winner: PlayerId, loser: PlayerId },
    Draw,
}

impl GameOutcome {
    pub fn loser(&self) -> Option<PlayerId> {
        match *self {
            Self::Won { loser, .. } => Some(loser),
            Self::Draw => None,
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match *self {
            Self::Won { winner, .. } => Some(winner),
            Self::Draw => None,
        }
    }
}
