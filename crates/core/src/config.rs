use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub starting_health: i32,
    pub max_mana: i32,
    pub hand_limit: usize,
    pub board_limit: usize,
    pub deck_size: usize,
    pub max_copies: usize,
    pub first_hand: usize,
    pub second_hand: usize,
    /// Card handed to the second player when the game starts.
    #[serde(default)]
    pub coin_card: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_health: 30,
            max_mana: 10,
            hand_limit: 10,
            board_limit: 7,
            deck_size: 30,
            max_copies: 2,
            first_hand: 3,
            second_hand: 4,
            coin_card: Some(crate::COIN_ID.to_string()),
        }
    }
}
