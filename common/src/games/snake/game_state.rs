use std::collections::HashMap;
use std::fmt;

use crate::games::SessionRng;
use crate::identifiers::{SkinId, SnakeId};
use crate::{log, log_debug};
use super::skins::SkinRegistry;
use super::snake::{Segment, Snake};
use super::types::{DeathReason, Direction, FieldSize, GameMode, MatchResult, Point};

pub const DEFAULT_MAX_FOOD_SPAWN_ATTEMPTS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pub position: Point,
    pub skin: Option<SkinId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepError {
    NoFreeCell,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::NoFreeCell => f.write_str("no valid food position"),
        }
    }
}

impl std::error::Error for StepError {}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub grown: Vec<SnakeId>,
    pub food_respawned: bool,
    pub result: Option<MatchResult>,
}

#[derive(Clone, Debug)]
pub struct SnakeMatch {
    snakes: Vec<Snake>,
    pub food: Food,
    pub field_size: FieldSize,
    pub mode: GameMode,
    pub result: Option<MatchResult>,
    pub game_end_reason: Option<DeathReason>,
    pub tick: u64,
    skins: SkinRegistry,
    max_food_spawn_attempts: usize,
}

impl SnakeMatch {
    /// Fresh match with the snakes on their start cells and food on a free cell.
    pub fn start(
        field_size: FieldSize,
        mode: GameMode,
        skins: SkinRegistry,
        face_skins: &HashMap<SnakeId, SkinId>,
        rng: &mut SessionRng,
    ) -> Result<Self, StepError> {
        let snakes = mode
            .snake_ids()
            .iter()
            .map(|id| start_snake(*id, &field_size, face_skins.get(id).cloned(), skins.default_body.clone()))
            .collect();

        let mut snake_match = Self::assemble(field_size, mode, snakes, skins);
        snake_match.food = snake_match.spawn_food(rng)?;
        log!("Match started ({:?}), food at {}", mode, snake_match.food.position);
        Ok(snake_match)
    }

    /// Match from an explicit layout. The snakes must be exactly the ones `mode` plays with.
    pub fn with_snakes(
        field_size: FieldSize,
        mode: GameMode,
        snakes: Vec<Snake>,
        food: Food,
        skins: SkinRegistry,
    ) -> Result<Self, String> {
        let mut snakes = snakes;
        snakes.sort_by_key(|s| s.id);
        let ids: Vec<SnakeId> = snakes.iter().map(|s| s.id).collect();
        if ids.as_slice() != mode.snake_ids() {
            return Err(format!("{:?} expects snakes {:?}, got {:?}", mode, mode.snake_ids(), ids));
        }
        for snake in &snakes {
            if snake.positions().any(|p| !field_size.contains(p)) {
                return Err(format!("{} has a segment outside the field", snake.id));
            }
        }
        if !field_size.contains(food.position) {
            return Err("Food is outside the field".to_string());
        }

        let mut snake_match = Self::assemble(field_size, mode, snakes, skins);
        snake_match.food = food;
        Ok(snake_match)
    }

    fn assemble(field_size: FieldSize, mode: GameMode, snakes: Vec<Snake>, skins: SkinRegistry) -> Self {
        Self {
            snakes,
            food: Food {
                position: Point::new(0, 0),
                skin: None,
            },
            field_size,
            mode,
            result: None,
            game_end_reason: None,
            tick: 0,
            skins,
            max_food_spawn_attempts: DEFAULT_MAX_FOOD_SPAWN_ATTEMPTS,
        }
    }

    pub fn set_max_food_spawn_attempts(&mut self, attempts: usize) {
        self.max_food_spawn_attempts = attempts;
    }

    pub fn max_food_spawn_attempts(&self) -> usize {
        self.max_food_spawn_attempts
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn snake(&self, id: SnakeId) -> Option<&Snake> {
        self.snakes.iter().find(|s| s.id == id)
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_occupied(&self, point: Point) -> bool {
        self.snakes.iter().any(|s| s.occupies(point))
    }

    /// Buffers a turn for the next tick. Reversals and unknown snakes are ignored.
    pub fn set_snake_direction(&mut self, id: SnakeId, direction: Direction) -> bool {
        if self.result.is_some() {
            return false;
        }
        match self.snakes.iter_mut().find(|s| s.id == id) {
            Some(snake) => snake.request_direction(direction),
            None => false,
        }
    }

    /// Advances every snake by one cell and resolves food and collisions.
    pub fn step(
        &mut self,
        intents: &[(SnakeId, Direction)],
        rng: &mut SessionRng,
    ) -> Result<TickReport, StepError> {
        if let Some(result) = self.result {
            return Ok(TickReport {
                result: Some(result),
                ..TickReport::default()
            });
        }

        for (id, direction) in intents {
            self.set_snake_direction(*id, *direction);
        }
        for snake in self.snakes.iter_mut() {
            snake.apply_pending_direction();
        }

        let food_position = self.food.position;
        let mut report = TickReport::default();
        for snake in self.snakes.iter_mut() {
            let next_head = snake.head().stepped(snake.direction, &self.field_size);
            let vacated = snake.advance(next_head);
            if next_head == food_position {
                snake.grow(vacated, self.food.skin.clone());
                report.grown.push(snake.id);
                log!("{} ate food at {}. Length: {}", snake.id, next_head, snake.len());
            }
        }

        self.tick += 1;

        // Food placement cannot change the outcome, so a finished match skips it.
        if let Some((result, casualties)) = self.resolve_collisions() {
            for (id, reason) in casualties {
                if let Some(snake) = self.snakes.iter_mut().find(|s| s.id == id) {
                    snake.death_reason = Some(reason);
                }
                self.game_end_reason = Some(reason);
            }
            self.result = Some(result);
            report.result = Some(result);
            log!("Match over after {} ticks: {}", self.tick, result);
            return Ok(report);
        }

        if !report.grown.is_empty() {
            self.food = self.spawn_food(rng)?;
            report.food_respawned = true;
            log_debug!("Food spawned at {}", self.food.position);
        }

        Ok(report)
    }

    /// Priority: A self, B self, A into B, B into A, heads together.
    fn resolve_collisions(&self) -> Option<(MatchResult, Vec<(SnakeId, DeathReason)>)> {
        match self.snakes.as_slice() {
            [a] => {
                if a.body_contains(a.head()) {
                    return Some((MatchResult::NoWinner, vec![(a.id, DeathReason::SelfCollision)]));
                }
                None
            }
            [a, b] => {
                if a.body_contains(a.head()) {
                    return Some((MatchResult::Winner(b.id), vec![(a.id, DeathReason::SelfCollision)]));
                }
                if b.body_contains(b.head()) {
                    return Some((MatchResult::Winner(a.id), vec![(b.id, DeathReason::SelfCollision)]));
                }
                if b.body_contains(a.head()) {
                    return Some((
                        MatchResult::Winner(b.id),
                        vec![(a.id, DeathReason::OtherSnakeCollision)],
                    ));
                }
                if a.body_contains(b.head()) {
                    return Some((
                        MatchResult::Winner(a.id),
                        vec![(b.id, DeathReason::OtherSnakeCollision)],
                    ));
                }
                if a.head() == b.head() {
                    return Some((
                        MatchResult::Draw,
                        vec![
                            (a.id, DeathReason::HeadOnCollision),
                            (b.id, DeathReason::HeadOnCollision),
                        ],
                    ));
                }
                None
            }
            _ => None,
        }
    }

    fn spawn_food(&self, rng: &mut SessionRng) -> Result<Food, StepError> {
        let position = self.find_free_cell(rng)?;
        let skin = self.skins.pick_food_skin(rng);
        Ok(Food { position, skin })
    }

    /// Rejection sampling first, then a uniform pick over the enumerated free cells.
    fn find_free_cell(&self, rng: &mut SessionRng) -> Result<Point, StepError> {
        for _ in 0..self.max_food_spawn_attempts {
            let x = rng.random_range(0..self.field_size.width);
            let y = rng.random_range(0..self.field_size.height);
            let pos = Point::new(x, y);
            if !self.is_occupied(pos) {
                return Ok(pos);
            }
        }

        let free: Vec<Point> = self
            .field_size
            .cells()
            .filter(|p| !self.is_occupied(*p))
            .collect();
        rng.choose(&free).copied().ok_or(StepError::NoFreeCell)
    }

    pub fn segments_of(&self, id: SnakeId) -> Vec<Segment> {
        self.snake(id).map(|s| s.segments().cloned().collect()).unwrap_or_default()
    }
}

/// Player 1 starts near the top-left heading right, player 2 near the bottom-right heading left.
pub fn start_position(id: SnakeId, field_size: &FieldSize) -> (Point, Direction) {
    match id {
        SnakeId::Player1 => (
            Point::new(5.min(field_size.width - 1), 5.min(field_size.height - 1)),
            Direction::Right,
        ),
        SnakeId::Player2 => (
            Point::new(field_size.width.saturating_sub(5), field_size.height.saturating_sub(5)),
            Direction::Left,
        ),
    }
}

fn start_snake(id: SnakeId, field_size: &FieldSize, head_skin: Option<SkinId>, body_skin: Option<SkinId>) -> Snake {
    let (head, direction) = start_position(id, field_size);
    Snake::new(id, head, direction, field_size, head_skin, body_skin)
}

/// True when the two start layouts overlap or would collide on the first tick without any input.
pub fn start_layouts_collide(field_size: &FieldSize) -> bool {
    let mut first = start_snake(SnakeId::Player1, field_size, None, None);
    let mut second = start_snake(SnakeId::Player2, field_size, None, None);
    if first.positions().any(|p| second.occupies(p)) {
        return true;
    }

    for snake in [&mut first, &mut second] {
        let next_head = snake.head().stepped(snake.direction, field_size);
        snake.advance(next_head);
    }
    second.occupies(first.head()) || first.occupies(second.head())
}
