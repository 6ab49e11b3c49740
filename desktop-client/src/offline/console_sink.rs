use common::games::RenderSink;
use common::games::snake::{GameOverSummary, MatchResult, SnakeFrame};
use common::{log, log_debug, SnakeId};

/// Text renderer standing in for the camera overlay.
#[derive(Clone)]
pub struct ConsoleRenderSink {
    draw_frames: bool,
}

impl ConsoleRenderSink {
    pub fn new(draw_frames: bool) -> Self {
        Self { draw_frames }
    }
}

impl RenderSink for ConsoleRenderSink {
    async fn render_countdown(&self, label: &str, frame: SnakeFrame) {
        log!("Get Ready! {}", label);
        if self.draw_frames {
            println!("{}", render_ascii(&frame));
        }
    }

    async fn render_frame(&self, frame: SnakeFrame) {
        if self.draw_frames {
            println!("{}\n{}", status_line(&frame), render_ascii(&frame));
        } else {
            log_debug!("{}", status_line(&frame));
        }
    }

    async fn render_game_over(&self, summary: GameOverSummary) {
        if self.draw_frames {
            println!("{}", render_ascii(&summary.final_frame));
        }
        match (summary.result, &summary.winner_face) {
            (MatchResult::Winner(id), Some(face)) => log!("Winner! {} ({})", id, face),
            (MatchResult::Winner(id), None) => log!("Winner! {}", id),
            (MatchResult::Draw, _) => log!("It's a draw!"),
            (MatchResult::NoWinner, _) => log!("Game Over!"),
        }
        if let Some(reason) = summary.reason {
            log!("Reason: snake {}", reason);
        }
        for (id, score) in &summary.scores {
            log!("{} ate {} food", id, score);
        }
    }
}

pub fn status_line(frame: &SnakeFrame) -> String {
    let scores: Vec<String> = frame
        .snakes
        .iter()
        .map(|s| format!("{}: {}", s.id, s.score))
        .collect();
    let mut line = format!("tick {} | {}", frame.tick, scores.join(" | "));
    if frame.paused {
        line.push_str(" | PAUSED");
    }
    line
}

/// One character per cell: digits for heads, letters for bodies, `*` for food.
pub fn render_ascii(frame: &SnakeFrame) -> String {
    let width = frame.field_size.width;
    let height = frame.field_size.height;
    let mut grid = vec![vec!['.'; width]; height];

    let food = frame.food.position;
    if food.y < height && food.x < width {
        grid[food.y][food.x] = '*';
    }

    for snake in &frame.snakes {
        let (head, body) = match snake.id {
            SnakeId::Player1 => ('1', 'o'),
            SnakeId::Player2 => ('2', 'x'),
        };
        for (idx, segment) in snake.segments.iter().enumerate().rev() {
            let p = segment.position;
            if p.y < height && p.x < width {
                grid[p.y][p.x] = if idx == 0 { head } else { body };
            }
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
