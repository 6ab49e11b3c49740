use common::games::snake::GameMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum GameModeConfig {
    SinglePlayer,
    DoublePlayer,
}

impl From<GameModeConfig> for GameMode {
    fn from(mode: GameModeConfig) -> Self {
        match mode {
            GameModeConfig::SinglePlayer => GameMode::SinglePlayer,
            GameModeConfig::DoublePlayer => GameMode::TwoPlayer,
        }
    }
}

impl From<GameMode> for GameModeConfig {
    fn from(mode: GameMode) -> Self {
        match mode {
            GameMode::SinglePlayer => GameModeConfig::SinglePlayer,
            GameMode::TwoPlayer => GameModeConfig::DoublePlayer,
        }
    }
}
