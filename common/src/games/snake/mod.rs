mod bot_controller;
mod game_state;
mod input;
mod session;
mod settings;
mod skins;
mod snake;
mod types;

pub use bot_controller::BotController;
pub use game_state::{start_layouts_collide, start_position, Food, SnakeMatch, StepError, TickReport};
pub use input::{Key, KeyAction, KeyBindings};
pub use session::{
    DisplayContext, GameOverSummary, SessionCommand, SessionOutcome, SnakeFrame, SnakeSession,
    SnakeSessionState, SnakeView,
};
pub use settings::{tick_interval_for, SnakeSessionSettings, DEFAULT_COUNTDOWN_LABELS};
pub use skins::{SkinRegistry, DEFAULT_BODY_SKIN_FILE};
pub use snake::{Segment, Snake, INITIAL_SNAKE_LENGTH};
pub use types::{DeathReason, Direction, FieldSize, GameMode, MatchResult, Point};
