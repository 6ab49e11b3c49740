use std::time::Duration;

use super::game_state::DEFAULT_MAX_FOOD_SPAWN_ATTEMPTS;
use super::types::{FieldSize, GameMode};

pub const DEFAULT_COUNTDOWN_LABELS: &[&str] = &["3", "2", "1", "Go!"];

#[derive(Clone, Debug)]
pub struct SnakeSessionSettings {
    pub field_size: FieldSize,
    pub mode: GameMode,
    pub tick_interval: Duration,
    /// Labels shown before the first tick, one per `countdown_interval`.
    pub countdown_labels: Vec<String>,
    pub countdown_interval: Duration,
    pub max_food_spawn_attempts: usize,
    /// Stop after this many ticks even if nobody crashed.
    pub max_ticks: Option<u64>,
}

impl SnakeSessionSettings {
    pub fn new(field_size: FieldSize, mode: GameMode, ticks_per_second: u32) -> Self {
        Self {
            field_size,
            mode,
            tick_interval: tick_interval_for(ticks_per_second),
            countdown_labels: DEFAULT_COUNTDOWN_LABELS.iter().map(|s| s.to_string()).collect(),
            countdown_interval: Duration::from_secs(1),
            max_food_spawn_attempts: DEFAULT_MAX_FOOD_SPAWN_ATTEMPTS,
            max_ticks: None,
        }
    }

    pub fn without_countdown(mut self) -> Self {
        self.countdown_labels.clear();
        self
    }
}

pub fn tick_interval_for(ticks_per_second: u32) -> Duration {
    Duration::from_millis(1000 / ticks_per_second.max(1) as u64)
}
