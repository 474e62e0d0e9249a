use crate::{CharacterRef, GameOutcome, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    GameStarted {
        first: PlayerId,
    },
    Mulligan {
        player: PlayerId,
        replaced: usize,
    },
    TurnStarted {
        player: PlayerId,
        turn: u32,
        mana: i32,
    },
    CardDrawn {
        player: PlayerId,
    },
    CardBurned {
        player: PlayerId,
        card: String,
    },
    Fatigue {
        player: PlayerId,
        damage: i32,
    },
    CardPlayed {
        player: PlayerId,
        card: String,
        cost: i32,
    },
    HeroPowerUsed {
        player: PlayerId,
        power: String,
    },
    MinionSummoned {
        player: PlayerId,
        card: String,
        uid: u32,
    },
    Attacked {
        attacker: CharacterRef,
        target: CharacterRef,
    },
    Damaged {
        target: CharacterRef,
        amount: i32,
    },
    Healed {
        target: CharacterRef,
        amount: i32,
    },
    MinionDied {
        player: PlayerId,
        card: String,
    },
    TurnEnded {
        player: PlayerId,
    },
    GameEnded {
        outcome: GameOutcome,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
