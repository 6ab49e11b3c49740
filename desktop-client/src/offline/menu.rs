use common::games::snake::{GameMode, Key};
use common::log;
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverChoice {
    Quit,
    /// Display keys keep the game-over screen up.
    Stay,
    Menu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Play(GameMode),
    Quit,
}

/// `q` quits, `f`/`esc` are display keys, anything else (Enter included) opens the menu.
pub fn game_over_choice(line: &str) -> GameOverChoice {
    let token = line.split_whitespace().next().unwrap_or_default();
    match token.parse::<Key>() {
        Ok(Key::Q) => GameOverChoice::Quit,
        Ok(Key::F) | Ok(Key::Escape) => GameOverChoice::Stay,
        _ => GameOverChoice::Menu,
    }
}

pub fn menu_choice(line: &str) -> Option<MenuChoice> {
    match line.trim() {
        "1" => Some(MenuChoice::Play(GameMode::SinglePlayer)),
        "2" => Some(MenuChoice::Play(GameMode::TwoPlayer)),
        token if matches!(token.parse::<Key>(), Ok(Key::Q)) => Some(MenuChoice::Quit),
        _ => None,
    }
}

/// Drops keys typed while the match was running so they cannot skip the game-over screen.
pub fn discard_pending_input(lines: &mut mpsc::UnboundedReceiver<String>) {
    while lines.try_recv().is_ok() {}
}

/// Game-over screen followed by the main menu. `None` means quit, including when input is closed.
pub async fn next_match(lines: &mut mpsc::UnboundedReceiver<String>) -> Option<GameMode> {
    log!("Press Enter (or any key) for the menu, q to quit");
    loop {
        match game_over_choice(&lines.recv().await?) {
            GameOverChoice::Quit => return None,
            GameOverChoice::Stay => continue,
            GameOverChoice::Menu => break,
        }
    }

    log!("Main menu: 1 = single player, 2 = two players, q = quit");
    loop {
        let line = lines.recv().await?;
        match menu_choice(&line) {
            Some(MenuChoice::Play(mode)) => return Some(mode),
            Some(MenuChoice::Quit) => return None,
            None => log!("Unknown menu choice '{}'", line.trim()),
        }
    }
}
