use std::str::FromStr;

use crate::identifiers::SnakeId;
use super::types::{Direction, GameMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    Space,
    F,
    Escape,
    Q,
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Ok(Key::ArrowUp),
            "down" | "arrowdown" => Ok(Key::ArrowDown),
            "left" | "arrowleft" => Ok(Key::ArrowLeft),
            "right" | "arrowright" => Ok(Key::ArrowRight),
            "w" => Ok(Key::W),
            "a" => Ok(Key::A),
            "s" => Ok(Key::S),
            "d" => Ok(Key::D),
            "space" => Ok(Key::Space),
            "f" => Ok(Key::F),
            "esc" | "escape" => Ok(Key::Escape),
            "q" => Ok(Key::Q),
            other => Err(format!("Unknown key '{}'", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Turn(SnakeId, Direction),
    TogglePause,
    ToggleFullscreen,
    ExitFullscreen,
    Quit,
}

/// Keyboard layout for a game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    mode: GameMode,
}

impl KeyBindings {
    pub fn for_mode(mode: GameMode) -> Self {
        Self { mode }
    }

    pub fn resolve(&self, key: Key) -> KeyAction {
        match key {
            Key::Space => KeyAction::TogglePause,
            Key::F => KeyAction::ToggleFullscreen,
            Key::Escape => KeyAction::ExitFullscreen,
            Key::Q => KeyAction::Quit,
            Key::ArrowUp => KeyAction::Turn(SnakeId::Player1, Direction::Up),
            Key::ArrowDown => KeyAction::Turn(SnakeId::Player1, Direction::Down),
            Key::ArrowLeft => KeyAction::Turn(SnakeId::Player1, Direction::Left),
            Key::ArrowRight => KeyAction::Turn(SnakeId::Player1, Direction::Right),
            Key::W => KeyAction::Turn(self.wasd_player(), Direction::Up),
            Key::S => KeyAction::Turn(self.wasd_player(), Direction::Down),
            Key::A => KeyAction::Turn(self.wasd_player(), Direction::Left),
            Key::D => KeyAction::Turn(self.wasd_player(), Direction::Right),
        }
    }

    /// Parses a key token and resolves it; unknown tokens give an error.
    pub fn resolve_token(&self, token: &str) -> Result<KeyAction, String> {
        let key: Key = token.parse()?;
        Ok(self.resolve(key))
    }

    fn wasd_player(&self) -> SnakeId {
        match self.mode {
            GameMode::SinglePlayer => SnakeId::Player1,
            GameMode::TwoPlayer => SnakeId::Player2,
        }
    }
}
