use std::collections::VecDeque;

use crate::identifiers::{SkinId, SnakeId};
use super::types::{DeathReason, Direction, FieldSize, Point};

pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// One body cell together with the skin drawn on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub position: Point,
    pub skin: Option<SkinId>,
}

impl Segment {
    pub fn new(position: Point, skin: Option<SkinId>) -> Self {
        Self { position, skin }
    }
}

#[derive(Clone, Debug)]
pub struct Snake {
    pub id: SnakeId,
    segments: VecDeque<Segment>,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
    pub death_reason: Option<DeathReason>,
    pub score: u32,
}

impl Snake {
    /// Builds a snake of initial length with its body trailing behind `head`.
    pub fn new(
        id: SnakeId,
        head: Point,
        direction: Direction,
        field_size: &FieldSize,
        head_skin: Option<SkinId>,
        body_skin: Option<SkinId>,
    ) -> Self {
        let mut segments = VecDeque::with_capacity(INITIAL_SNAKE_LENGTH);
        segments.push_back(Segment::new(head, head_skin));

        let behind = direction.opposite();
        let mut position = head;
        for _ in 1..INITIAL_SNAKE_LENGTH {
            position = position.stepped(behind, field_size);
            segments.push_back(Segment::new(position, body_skin.clone()));
        }

        Self::with_segments(id, segments, direction)
    }

    /// Builds a snake from explicit cells, head first. Returns `None` for an empty body.
    pub fn from_positions(id: SnakeId, positions: &[Point], direction: Direction) -> Option<Self> {
        if positions.is_empty() {
            return None;
        }
        let segments = positions.iter().map(|p| Segment::new(*p, None)).collect();
        Some(Self::with_segments(id, segments, direction))
    }

    fn with_segments(id: SnakeId, segments: VecDeque<Segment>, direction: Direction) -> Self {
        Self {
            id,
            segments,
            direction,
            pending_direction: None,
            death_reason: None,
            score: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.death_reason.is_none()
    }

    pub fn head(&self) -> Point {
        self.segments.front().expect("Snake body should never be empty").position
    }

    pub fn tail(&self) -> Point {
        self.segments.back().expect("Snake body should never be empty").position
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().map(|s| s.position)
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.positions().any(|p| p == point)
    }

    /// True when `point` is one of the non-head cells.
    pub fn body_contains(&self, point: Point) -> bool {
        self.positions().skip(1).any(|p| p == point)
    }

    /// Buffers a turn unless it reverses the current heading.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(&self.direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    pub fn apply_pending_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take()
            && !direction.is_opposite(&self.direction)
        {
            self.direction = direction;
        }
    }

    /// Moves every segment one place towards the head, placing the head on
    /// `next_head`. Skins stay with their index. Returns the vacated tail cell.
    pub fn advance(&mut self, next_head: Point) -> Point {
        let mut carried = next_head;
        for segment in self.segments.iter_mut() {
            std::mem::swap(&mut segment.position, &mut carried);
        }
        carried
    }

    /// Re-attaches a tail segment on `position`, carrying `skin`.
    pub fn grow(&mut self, position: Point, skin: Option<SkinId>) {
        self.segments.push_back(Segment::new(position, skin));
        self.score += 1;
    }
}
