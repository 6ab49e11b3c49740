mod game_mode;
mod icons_config;
mod main_config;
mod snake_game_config;

pub use main_config::{get_config_manager, Config};
pub use game_mode::GameModeConfig;
pub use icons_config::IconsConfig;
pub use snake_game_config::SnakeGameConfig;
