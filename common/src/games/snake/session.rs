use std::collections::HashMap;

use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::time::{interval, sleep, MissedTickBehavior};

use crate::games::{RenderSink, SessionRng};
use crate::identifiers::{SkinId, SnakeId};
use crate::{log, log_debug};
use super::bot_controller::BotController;
use super::game_state::{Food, SnakeMatch, StepError, TickReport};
use super::input::KeyAction;
use super::settings::SnakeSessionSettings;
use super::skins::SkinRegistry;
use super::snake::Segment;
use super::types::{DeathReason, Direction, FieldSize, MatchResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(SnakeId, Direction),
    TogglePause,
    ToggleFullscreen,
    ExitFullscreen,
    Quit,
}

impl From<KeyAction> for SessionCommand {
    fn from(action: KeyAction) -> Self {
        match action {
            KeyAction::Turn(id, direction) => SessionCommand::Turn(id, direction),
            KeyAction::TogglePause => SessionCommand::TogglePause,
            KeyAction::ToggleFullscreen => SessionCommand::ToggleFullscreen,
            KeyAction::ExitFullscreen => SessionCommand::ExitFullscreen,
            KeyAction::Quit => SessionCommand::Quit,
        }
    }
}

/// Window state handed to the renderer with every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayContext {
    pub fullscreen: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeView {
    pub id: SnakeId,
    pub segments: Vec<Segment>,
    pub alive: bool,
    pub score: u32,
}

/// Owned snapshot of a match for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeFrame {
    pub tick: u64,
    pub field_size: FieldSize,
    pub snakes: Vec<SnakeView>,
    pub food: Food,
    pub paused: bool,
    pub display: DisplayContext,
    pub result: Option<MatchResult>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverSummary {
    pub result: MatchResult,
    pub reason: Option<DeathReason>,
    pub scores: Vec<(SnakeId, u32)>,
    pub winner_face: Option<SkinId>,
    pub final_frame: SnakeFrame,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Finished(GameOverSummary),
    Quit,
    TickLimitReached,
    Aborted(StepError),
}

pub struct SnakeSessionState {
    pub snake_match: SnakeMatch,
    pub settings: SnakeSessionSettings,
    pub rng: SessionRng,
    pub bots: Vec<SnakeId>,
    pub face_skins: HashMap<SnakeId, SkinId>,
    paused: bool,
    display: DisplayContext,
}

impl SnakeSessionState {
    pub fn create(
        settings: SnakeSessionSettings,
        skins: SkinRegistry,
        face_skins: HashMap<SnakeId, SkinId>,
        bots: Vec<SnakeId>,
        seed: u64,
    ) -> Result<Self, StepError> {
        let mut rng = SessionRng::new(seed);
        let snake_match =
            SnakeMatch::start(settings.field_size.clone(), settings.mode, skins, &face_skins, &mut rng)?;
        log!("Session created with seed {}", seed);
        Ok(Self::with_match(snake_match, settings, rng, bots, face_skins))
    }

    pub fn with_match(
        mut snake_match: SnakeMatch,
        settings: SnakeSessionSettings,
        rng: SessionRng,
        bots: Vec<SnakeId>,
        face_skins: HashMap<SnakeId, SkinId>,
    ) -> Self {
        snake_match.set_max_food_spawn_attempts(settings.max_food_spawn_attempts);
        Self {
            snake_match,
            settings,
            rng,
            bots,
            face_skins,
            paused: false,
            display: DisplayContext::default(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn display(&self) -> DisplayContext {
        self.display
    }

    /// Applies a command. Returns `false` when the session should stop.
    pub fn handle_command(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::Turn(id, direction) => {
                if self.paused || self.bots.contains(&id) {
                    return true;
                }
                if !self.snake_match.set_snake_direction(id, direction) {
                    log_debug!("Ignored turn {:?} for {}", direction, id);
                }
            }
            SessionCommand::TogglePause => {
                self.paused = !self.paused;
                log!("Game {}", if self.paused { "paused" } else { "resumed" });
            }
            SessionCommand::ToggleFullscreen => {
                self.display.fullscreen = !self.display.fullscreen;
            }
            SessionCommand::ExitFullscreen => {
                self.display.fullscreen = false;
            }
            SessionCommand::Quit => return false,
        }
        true
    }

    /// Commands honoured while the countdown runs; turns are dropped.
    fn handle_countdown_command(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::Turn(..) | SessionCommand::TogglePause => true,
            other => self.handle_command(other),
        }
    }

    /// One tick: autopilot turns, then the simulation step. Paused sessions stand still.
    pub fn advance(&mut self) -> Result<TickReport, StepError> {
        if self.paused {
            return Ok(TickReport::default());
        }

        let bot_intents: Vec<(SnakeId, Direction)> = self
            .bots
            .iter()
            .filter_map(|id| {
                BotController::calculate_move(*id, &self.snake_match, &mut self.rng).map(|dir| (*id, dir))
            })
            .collect();

        self.snake_match.step(&bot_intents, &mut self.rng)
    }

    pub fn frame(&self) -> SnakeFrame {
        let snakes = self
            .snake_match
            .snakes()
            .iter()
            .map(|snake| SnakeView {
                id: snake.id,
                segments: snake.segments().cloned().collect(),
                alive: snake.is_alive(),
                score: snake.score,
            })
            .collect();

        SnakeFrame {
            tick: self.snake_match.tick,
            field_size: self.snake_match.field_size.clone(),
            snakes,
            food: self.snake_match.food.clone(),
            paused: self.paused,
            display: self.display,
            result: self.snake_match.result,
        }
    }

    pub fn summary(&self, result: MatchResult) -> GameOverSummary {
        let winner_face = match result {
            MatchResult::Winner(id) => self.face_skins.get(&id).cloned(),
            MatchResult::Draw | MatchResult::NoWinner => None,
        };

        GameOverSummary {
            result,
            reason: self.snake_match.game_end_reason,
            scores: self.snake_match.snakes().iter().map(|s| (s.id, s.score)).collect(),
            winner_face,
            final_frame: self.frame(),
        }
    }

    fn tick_limit_reached(&self) -> bool {
        self.settings
            .max_ticks
            .is_some_and(|limit| self.snake_match.tick >= limit)
    }
}

pub struct SnakeSession;

impl SnakeSession {
    pub async fn run(
        mut state: SnakeSessionState,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        sink: impl RenderSink,
    ) -> SessionOutcome {
        for label in state.settings.countdown_labels.clone() {
            sink.render_countdown(&label, state.frame()).await;
            sleep(state.settings.countdown_interval).await;

            while let Ok(command) = commands.try_recv() {
                if !state.handle_countdown_command(command) {
                    log!("Quit during countdown");
                    return SessionOutcome::Quit;
                }
            }
        }

        let mut tick_interval_timer = interval(state.settings.tick_interval);
        tick_interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tick_interval_timer.tick().await;

        loop {
            tick_interval_timer.tick().await;

            loop {
                match commands.try_recv() {
                    Ok(command) => {
                        if !state.handle_command(command) {
                            log!("Quit after {} ticks", state.snake_match.tick);
                            return SessionOutcome::Quit;
                        }
                    }
                    Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                }
            }

            let report = match state.advance() {
                Ok(report) => report,
                Err(e) => {
                    log!("Session aborted: {}", e);
                    return SessionOutcome::Aborted(e);
                }
            };

            sink.render_frame(state.frame()).await;

            if let Some(result) = report.result {
                let summary = state.summary(result);
                sink.render_game_over(summary.clone()).await;
                return SessionOutcome::Finished(summary);
            }

            if state.tick_limit_reached() {
                log!("Tick limit reached after {} ticks", state.snake_match.tick);
                return SessionOutcome::TickLimitReached;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::games::snake::{GameMode, Point, Snake};

    #[derive(Clone, Default)]
    struct RecordingSink {
        countdown: Arc<Mutex<Vec<String>>>,
        frames: Arc<Mutex<Vec<SnakeFrame>>>,
        game_over: Arc<Mutex<Vec<GameOverSummary>>>,
    }

    impl RenderSink for RecordingSink {
        async fn render_countdown(&self, label: &str, _frame: SnakeFrame) {
            self.countdown.lock().unwrap().push(label.to_string());
        }

        async fn render_frame(&self, frame: SnakeFrame) {
            self.frames.lock().unwrap().push(frame);
        }

        async fn render_game_over(&self, summary: GameOverSummary) {
            self.game_over.lock().unwrap().push(summary);
        }
    }

    fn fast_settings(mode: GameMode) -> SnakeSessionSettings {
        let mut settings = SnakeSessionSettings::new(FieldSize::new(20, 15), mode, 5);
        settings.tick_interval = Duration::from_millis(1);
        settings.countdown_interval = Duration::from_millis(1);
        settings
    }

    fn snake(id: SnakeId, cells: &[(usize, usize)], direction: Direction) -> Snake {
        let positions: Vec<Point> = cells.iter().map(|(x, y)| Point::new(*x, *y)).collect();
        Snake::from_positions(id, &positions, direction).unwrap()
    }

    fn head_on_state() -> SnakeSessionState {
        let settings = fast_settings(GameMode::TwoPlayer);
        let snake_match = SnakeMatch::with_snakes(
            settings.field_size.clone(),
            GameMode::TwoPlayer,
            vec![
                snake(SnakeId::Player1, &[(5, 7), (4, 7), (3, 7)], Direction::Right),
                snake(SnakeId::Player2, &[(9, 7), (10, 7), (11, 7)], Direction::Left),
            ],
            Food { position: Point::new(0, 0), skin: None },
            SkinRegistry::empty(),
        )
        .unwrap();
        let mut faces = HashMap::new();
        faces.insert(SnakeId::Player1, SkinId::from("face-1"));
        SnakeSessionState::with_match(snake_match, settings, SessionRng::new(1), vec![], faces)
    }

    #[tokio::test]
    async fn test_session_runs_until_head_on_draw() {
        let sink = RecordingSink::default();
        let (_tx, rx) = mpsc::unbounded_channel();

        let outcome = SnakeSession::run(head_on_state(), rx, sink.clone()).await;

        let SessionOutcome::Finished(summary) = outcome else {
            panic!("expected finished session, got {:?}", outcome);
        };
        assert_eq!(summary.result, MatchResult::Draw);
        assert_eq!(summary.reason, Some(DeathReason::HeadOnCollision));
        assert_eq!(summary.winner_face, None);
        assert_eq!(*sink.countdown.lock().unwrap(), vec!["3", "2", "1", "Go!"]);
        assert_eq!(sink.frames.lock().unwrap().len(), 2);
        assert_eq!(sink.game_over.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_winner_face_is_reported() {
        let settings = fast_settings(GameMode::TwoPlayer).without_countdown();
        let snake_match = SnakeMatch::with_snakes(
            settings.field_size.clone(),
            GameMode::TwoPlayer,
            vec![
                snake(SnakeId::Player1, &[(5, 7), (4, 7), (3, 7)], Direction::Right),
                snake(SnakeId::Player2, &[(6, 5), (6, 4), (6, 3)], Direction::Down),
            ],
            Food { position: Point::new(0, 0), skin: None },
            SkinRegistry::empty(),
        )
        .unwrap();
        let mut faces = HashMap::new();
        faces.insert(SnakeId::Player1, SkinId::from("face-1"));
        faces.insert(SnakeId::Player2, SkinId::from("face-2"));
        let state = SnakeSessionState::with_match(snake_match, settings, SessionRng::new(1), vec![], faces);
        let (_tx, rx) = mpsc::unbounded_channel();
        let sink = RecordingSink::default();

        let outcome = SnakeSession::run(state, rx, sink.clone()).await;

        // Player 2 drives into the cell right behind player 1's head.
        match outcome {
            SessionOutcome::Finished(summary) => {
                assert_eq!(summary.result, MatchResult::Winner(SnakeId::Player1));
                assert_eq!(summary.reason, Some(DeathReason::OtherSnakeCollision));
                assert_eq!(summary.winner_face, Some(SkinId::from("face-1")));
                assert_eq!(summary.final_frame.result, Some(MatchResult::Winner(SnakeId::Player1)));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(sink.countdown.lock().unwrap().is_empty());
    }

    struct FrameCounter {
        frames: Arc<Mutex<usize>>,
    }

    impl RenderSink for FrameCounter {
        async fn render_countdown(&self, _label: &str, _frame: SnakeFrame) {}

        async fn render_frame(&self, _frame: SnakeFrame) {
            *self.frames.lock().unwrap() += 1;
        }

        async fn render_game_over(&self, _summary: GameOverSummary) {}
    }

    #[tokio::test]
    async fn test_session_accepts_sink_without_clone() {
        let frames = Arc::new(Mutex::new(0));
        let sink = FrameCounter { frames: frames.clone() };
        let (_tx, rx) = mpsc::unbounded_channel();

        let outcome = SnakeSession::run(head_on_state(), rx, sink).await;

        assert!(matches!(outcome, SessionOutcome::Finished(_)));
        assert_eq!(*frames.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_quit_during_countdown() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(SessionCommand::Quit).unwrap();
        let sink = RecordingSink::default();

        let outcome = SnakeSession::run(head_on_state(), rx, sink.clone()).await;

        assert_eq!(outcome, SessionOutcome::Quit);
        assert_eq!(sink.countdown.lock().unwrap().len(), 1);
        assert!(sink.frames.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tick_limit_stops_endless_single_player() {
        let mut settings = fast_settings(GameMode::SinglePlayer).without_countdown();
        settings.max_ticks = Some(4);
        let state = SnakeSessionState::create(settings, SkinRegistry::empty(), HashMap::new(), vec![], 3).unwrap();
        let (_tx, rx) = mpsc::unbounded_channel();
        let sink = RecordingSink::default();

        let outcome = SnakeSession::run(state, rx, sink.clone()).await;

        assert_eq!(outcome, SessionOutcome::TickLimitReached);
        let frames = sink.frames.lock().unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames.last().map(|f| f.tick), Some(4));
    }

    #[test]
    fn test_pause_freezes_match_and_drops_turns() {
        let mut state = head_on_state();
        assert!(state.handle_command(SessionCommand::TogglePause));
        assert!(state.is_paused());
        assert!(state.handle_command(SessionCommand::Turn(SnakeId::Player1, Direction::Up)));

        let report = state.advance().unwrap();

        assert_eq!(report, TickReport::default());
        assert_eq!(state.snake_match.tick, 0);
        assert_eq!(state.snake_match.snake(SnakeId::Player1).unwrap().pending_direction, None);
        assert!(state.frame().paused);

        state.handle_command(SessionCommand::TogglePause);
        state.advance().unwrap();
        assert_eq!(state.snake_match.tick, 1);
    }

    #[test]
    fn test_display_commands_update_context() {
        let mut state = head_on_state();
        state.handle_command(SessionCommand::ToggleFullscreen);
        assert!(state.frame().display.fullscreen);
        state.handle_command(SessionCommand::ExitFullscreen);
        assert!(!state.display().fullscreen);
        assert!(!state.handle_command(SessionCommand::Quit));
    }

    #[test]
    fn test_both_constructors_apply_spawn_attempts() {
        let mut settings = fast_settings(GameMode::SinglePlayer);
        settings.max_food_spawn_attempts = 7;

        let created =
            SnakeSessionState::create(settings.clone(), SkinRegistry::empty(), HashMap::new(), vec![], 3).unwrap();
        assert_eq!(created.snake_match.max_food_spawn_attempts(), 7);

        let snake_match = SnakeMatch::with_snakes(
            settings.field_size.clone(),
            GameMode::SinglePlayer,
            vec![snake(SnakeId::Player1, &[(5, 7), (4, 7), (3, 7)], Direction::Right)],
            Food { position: Point::new(0, 0), skin: None },
            SkinRegistry::empty(),
        )
        .unwrap();
        let state = SnakeSessionState::with_match(snake_match, settings, SessionRng::new(1), vec![], HashMap::new());
        assert_eq!(state.snake_match.max_food_spawn_attempts(), 7);
    }

    #[test]
    fn test_bots_steer_their_own_snakes() {
        let settings = fast_settings(GameMode::TwoPlayer);
        let mut state = SnakeSessionState::create(
            settings,
            SkinRegistry::empty(),
            HashMap::new(),
            vec![SnakeId::Player1, SnakeId::Player2],
            17,
        )
        .unwrap();

        state.handle_command(SessionCommand::Turn(SnakeId::Player1, Direction::Up));
        assert_eq!(state.snake_match.snake(SnakeId::Player1).unwrap().pending_direction, None);

        for _ in 0..30 {
            if state.snake_match.is_finished() {
                break;
            }
            let before: Vec<Direction> = state.snake_match.snakes().iter().map(|s| s.direction).collect();
            state.advance().unwrap();
            for (snake, old) in state.snake_match.snakes().iter().zip(before) {
                assert!(!snake.direction.is_opposite(&old));
            }
        }
    }
}
