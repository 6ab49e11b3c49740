use std::future::Future;

use crate::games::snake::{GameOverSummary, SnakeFrame};

/// Consumer of everything the player gets to see. Implementations draw over
/// the camera feed, print to a terminal or record frames for tests.
pub trait RenderSink: Send + Sync + 'static {
    fn render_countdown(&self, label: &str, frame: SnakeFrame) -> impl Future<Output = ()> + Send;

    fn render_frame(&self, frame: SnakeFrame) -> impl Future<Output = ()> + Send;

    fn render_game_over(&self, summary: GameOverSummary) -> impl Future<Output = ()> + Send;
}
