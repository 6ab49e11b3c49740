use common::config::Validate;
use common::games::snake::{start_layouts_collide, FieldSize, GameMode, SnakeSessionSettings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct SnakeGameConfig {
    pub game_width: u32,
    pub game_height: u32,
    pub block_size: u32,
    pub ticks_per_second: u32,
    pub countdown_seconds: u32,
    pub max_food_spawn_attempts: u32,
}

impl SnakeGameConfig {
    pub fn field_size(&self) -> FieldSize {
        FieldSize::from_pixels(self.game_width, self.game_height, self.block_size)
    }

    pub fn to_session_settings(&self, mode: GameMode) -> SnakeSessionSettings {
        let mut settings = SnakeSessionSettings::new(self.field_size(), mode, self.ticks_per_second);
        settings.countdown_labels = countdown_labels(self.countdown_seconds);
        settings.countdown_interval = Duration::from_secs(1);
        settings.max_food_spawn_attempts = self.max_food_spawn_attempts as usize;
        settings
    }
}

fn countdown_labels(seconds: u32) -> Vec<String> {
    if seconds == 0 {
        return Vec::new();
    }
    (1..=seconds)
        .rev()
        .map(|n| n.to_string())
        .chain(std::iter::once("Go!".to_string()))
        .collect()
}

impl Validate for SnakeGameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.block_size < 10 || self.block_size > 200 {
            return Err("block_size must be between 10 and 200".to_string());
        }
        if self.game_width % self.block_size != 0 || self.game_height % self.block_size != 0 {
            return Err("game dimensions must be multiples of block_size".to_string());
        }
        let field = self.field_size();
        if field.width < 10 || field.height < 10 {
            return Err("grid must be at least 10x10 blocks".to_string());
        }
        if field.width > 100 || field.height > 100 {
            return Err("grid must not exceed 100x100 blocks".to_string());
        }
        if start_layouts_collide(&field) {
            return Err("grid is too small for two players: the snakes would start in a collision".to_string());
        }
        if self.ticks_per_second == 0 || self.ticks_per_second > 30 {
            return Err("ticks_per_second must be between 1 and 30".to_string());
        }
        if self.countdown_seconds > 10 {
            return Err("countdown_seconds must not exceed 10".to_string());
        }
        if self.max_food_spawn_attempts == 0 {
            return Err("max_food_spawn_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for SnakeGameConfig {
    fn default() -> Self {
        Self {
            game_width: 1200,
            game_height: 900,
            block_size: 60,
            ticks_per_second: 5,
            countdown_seconds: 3,
            max_food_spawn_attempts: 100,
        }
    }
}
