use crate::{CardClass, CharacterRef, Content, DeckList, GameConfig, GameOutcome, Player, PlayerId, RngState};
use std::sync::Arc;
use thiserror::Error;

mod actions;
mod effects;
mod legal;
mod setup;
mod turn;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("unknown card: {0}")]
    UnknownCard(String),
    #[error("duplicate card id: {0}")]
    DuplicateCard(String),
    #[error("choose-one mode {0} has modes of its own")]
    NestedChoice(String),
    #[error("no hero power for class {0:?}")]
    MissingHeroPower(CardClass),
    #[error("invalid deck: {0}")]
    InvalidDeck(String),
    #[error("game is already over")]
    GameOver,
    #[error("game has not started")]
    NotStarted,
    #[error("game has already started")]
    AlreadyStarted,
    #[error("player {0} is not the player to act")]
    NotYourTurn(PlayerId),
    #[error("invalid hand index {0}")]
    InvalidHandIndex(usize),
    #[error("card {0} is not playable")]
    NotPlayable(String),
    #[error("a choose-one mode is required")]
    ChoiceRequired,
    #[error("invalid choose-one mode {0}")]
    InvalidChoice(usize),
    #[error("a target is required")]
    TargetRequired,
    #[error("invalid target {0:?}")]
    InvalidTarget(CharacterRef),
    #[error("hero power is not usable")]
    HeroPowerUnavailable,
    #[error("{0:?} cannot attack")]
    CannotAttack(CharacterRef),
}

#[derive(Debug, Clone)]
pub struct PlayerSetup {
    pub name: String,
    pub deck: DeckList,
}

impl PlayerSetup {
    pub fn new(name: impl Into<String>, deck: DeckList) -> Self {
        Self {
            name: name.into(),
            deck,
        }
    }
}

/// Full match state. `Clone` produces an independent copy of every mutable
/// part; only the immutable card catalog is shared.
#[derive(Debug, Clone)]
pub struct Game {
    pub content: Arc<Content>,
    pub config: GameConfig,
    pub players: [Player; 2],
    pub current: PlayerId,
    pub turn: u32,
    pub rng: RngState,
    pub outcome: Option<GameOutcome>,
    pub started: bool,
    next_uid: u32,
}

impl Game {
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn loser(&self) -> Option<PlayerId> {
        self.outcome.and_then(|outcome| outcome.loser())
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.outcome.and_then(|outcome| outcome.winner())
    }

    pub(crate) fn alloc_uid(&mut self) -> u32 {
        let uid = self.next_uid;
        self.next_uid = self.next_uid.saturating_add(1);
        uid
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if !self.started {
            return Err(GameError::NotStarted);
        }
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }
}
