use std::io::BufRead;

use common::games::snake::{KeyBindings, SessionCommand};
use common::log;
use tokio::sync::mpsc;

/// Turns a line of key tokens into session commands. Unknown tokens are skipped.
pub fn parse_key_line(bindings: &KeyBindings, line: &str) -> Vec<SessionCommand> {
    line.split_whitespace()
        .filter_map(|token| match bindings.resolve_token(token) {
            Ok(action) => Some(SessionCommand::from(action)),
            Err(e) => {
                log!("Ignoring input: {}", e);
                None
            }
        })
        .collect()
}

/// Forwards stdin lines from a dedicated thread until EOF or the receiver goes away.
/// The channel outlives single matches so the game-over screen and menu read from it too.
pub fn spawn_stdin_reader(line_tx: mpsc::UnboundedSender<String>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line_tx.send(line).is_err() {
                return;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::SnakeId;
    use common::games::snake::{Direction, GameMode};

    #[test]
    fn test_parse_key_line_two_players() {
        let bindings = KeyBindings::for_mode(GameMode::TwoPlayer);
        let commands = parse_key_line(&bindings, "up  w banana space q");
        assert_eq!(
            commands,
            vec![
                SessionCommand::Turn(SnakeId::Player1, Direction::Up),
                SessionCommand::Turn(SnakeId::Player2, Direction::Up),
                SessionCommand::TogglePause,
                SessionCommand::Quit,
            ]
        );
    }

    #[test]
    fn test_empty_line_has_no_commands() {
        let bindings = KeyBindings::for_mode(GameMode::SinglePlayer);
        assert!(parse_key_line(&bindings, "   ").is_empty());
    }
}
