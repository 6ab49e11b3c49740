use std::collections::HashMap;
use std::path::Path;

use common::games::snake::{
    GameMode, KeyBindings, SessionOutcome, SkinRegistry, SnakeSession, SnakeSessionState,
};
use common::{log, SkinId, SnakeId};
use tokio::sync::mpsc;

use crate::config::Config;

use super::ConsoleRenderSink;
use super::key_reader::parse_key_line;

#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub seed: Option<u64>,
    pub autopilot: bool,
    pub max_ticks: Option<u64>,
    pub skip_countdown: bool,
    pub draw_frames: bool,
}

/// Plays one match, translating input lines with the key bindings of `mode`.
pub async fn run_snake_game(
    config: &Config,
    mode: GameMode,
    options: &RunOptions,
    lines: &mut mpsc::UnboundedReceiver<String>,
) -> Result<SessionOutcome, String> {
    let skins = SkinRegistry::from_folder(Path::new(&config.icons.folder))?;
    let state = build_session_state(config, mode, options, skins)?;

    let bindings = KeyBindings::for_mode(mode);
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    if !options.autopilot {
        log!("Controls: type `up`/`w` etc. to steer, `space` to pause, `f`/`esc` for fullscreen, `q` to quit");
    }

    let session = SnakeSession::run(state, command_rx, ConsoleRenderSink::new(options.draw_frames));
    tokio::pin!(session);

    let mut input_open = true;
    loop {
        tokio::select! {
            outcome = &mut session => return Ok(outcome),
            line = lines.recv(), if input_open => match line {
                Some(line) => {
                    for command in parse_key_line(&bindings, &line) {
                        let _ = command_tx.send(command);
                    }
                }
                None => input_open = false,
            },
        }
    }
}

pub fn build_session_state(
    config: &Config,
    mode: GameMode,
    options: &RunOptions,
    skins: SkinRegistry,
) -> Result<SnakeSessionState, String> {
    let mut settings = config.game.to_session_settings(mode);
    settings.max_ticks = options.max_ticks;
    if options.skip_countdown {
        settings = settings.without_countdown();
    }

    let bots = if options.autopilot {
        mode.snake_ids().to_vec()
    } else {
        Vec::new()
    };

    let seed = options.seed.unwrap_or_else(rand::random);
    log!(
        "Starting {:?} on a {}x{} grid",
        mode,
        settings.field_size.width,
        settings.field_size.height
    );

    SnakeSessionState::create(settings, skins, face_skins(config), bots, seed)
        .map_err(|e| e.to_string())
}

fn face_skins(config: &Config) -> HashMap<SnakeId, SkinId> {
    [
        (SnakeId::Player1, &config.icons.player1_face),
        (SnakeId::Player2, &config.icons.player2_face),
    ]
    .into_iter()
    .filter_map(|(id, face)| face.as_ref().map(|f| (id, SkinId::from(f.as_str()))))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::snake::Point;
    use std::time::Duration;

    #[test]
    fn test_build_session_state_uses_config() {
        let mut config = Config::default();
        config.icons.player1_face = Some("me.png".to_string());
        let options = RunOptions {
            seed: Some(11),
            autopilot: true,
            max_ticks: Some(50),
            skip_countdown: true,
            draw_frames: false,
        };

        let state =
            build_session_state(&config, GameMode::TwoPlayer, &options, SkinRegistry::empty()).unwrap();

        assert_eq!(state.settings.field_size.width, 20);
        assert_eq!(state.settings.field_size.height, 15);
        assert!(state.settings.countdown_labels.is_empty());
        assert_eq!(state.settings.max_ticks, Some(50));
        assert_eq!(state.bots, vec![SnakeId::Player1, SnakeId::Player2]);
        assert_eq!(state.face_skins.get(&SnakeId::Player1), Some(&SkinId::from("me.png")));
        assert!(!state.face_skins.contains_key(&SnakeId::Player2));
        assert_eq!(state.snake_match.snake(SnakeId::Player2).unwrap().head(), Point::new(15, 10));
    }

    #[test]
    fn test_single_player_without_autopilot_has_no_bots() {
        let state = build_session_state(
            &Config::default(),
            GameMode::SinglePlayer,
            &RunOptions::default(),
            SkinRegistry::empty(),
        )
        .unwrap();

        assert!(state.bots.is_empty());
        assert_eq!(state.snake_match.snakes().len(), 1);
        assert_eq!(state.settings.countdown_labels.len(), 4);
    }

    #[tokio::test]
    async fn test_quit_line_ends_match() {
        let dir = std::env::temp_dir().join(format!("face_snake_runner_{}", std::process::id()));
        let mut config = Config::default();
        config.icons.folder = dir.join("icons").to_string_lossy().into_owned();
        config.game.countdown_seconds = 0;
        let options = RunOptions {
            seed: Some(3),
            ..RunOptions::default()
        };
        let (tx, mut lines) = mpsc::unbounded_channel();
        tx.send("q".to_string()).unwrap();

        let outcome = tokio::time::timeout(
            Duration::from_secs(5),
            run_snake_game(&config, GameMode::SinglePlayer, &options, &mut lines),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(outcome, SessionOutcome::Quit);
        let _ = std::fs::remove_dir_all(dir);
    }
}
