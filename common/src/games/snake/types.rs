use std::fmt;
use std::str::FromStr;

use crate::identifiers::SnakeId;

/// A cell on the game grid. Coordinates are always inside the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// One cell in `direction`, wrapping around the field edges.
    pub fn stepped(&self, direction: Direction, field_size: &FieldSize) -> Point {
        match direction {
            Direction::Up => Point::new(self.x, wrapping_dec(self.y, field_size.height)),
            Direction::Down => Point::new(self.x, wrapping_inc(self.y, field_size.height)),
            Direction::Left => Point::new(wrapping_dec(self.x, field_size.width), self.y),
            Direction::Right => Point::new(wrapping_inc(self.x, field_size.width), self.y),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub fn wrapping_inc(value: usize, max: usize) -> usize {
    if value + 1 >= max {
        0
    } else {
        value + 1
    }
}

pub fn wrapping_dec(value: usize, max: usize) -> usize {
    if value == 0 {
        max - 1
    } else {
        value - 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(format!("Unknown direction '{}'", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    SelfCollision,
    OtherSnakeCollision,
    HeadOnCollision,
}

impl fmt::Display for DeathReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DeathReason::SelfCollision => "ran into itself",
            DeathReason::OtherSnakeCollision => "ran into the other snake",
            DeathReason::HeadOnCollision => "collided head-on",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    SinglePlayer,
    TwoPlayer,
}

impl GameMode {
    pub fn snake_ids(&self) -> &'static [SnakeId] {
        match self {
            GameMode::SinglePlayer => &[SnakeId::Player1],
            GameMode::TwoPlayer => &[SnakeId::Player1, SnakeId::Player2],
        }
    }
}

/// Terminal state of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchResult {
    Winner(SnakeId),
    Draw,
    /// Single-player game over.
    NoWinner,
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Winner(id) => write!(f, "{} wins", id),
            MatchResult::Draw => f.write_str("draw"),
            MatchResult::NoWinner => f.write_str("game over"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSize {
    pub width: usize,
    pub height: usize,
}

impl FieldSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Grid dimensions for a pixel surface split into square blocks.
    pub fn from_pixels(surface_width: u32, surface_height: u32, block_size: u32) -> Self {
        let block = block_size.max(1);
        Self {
            width: (surface_width / block) as usize,
            height: (surface_height / block) as usize,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }
}
