use crate::games::SessionRng;
use crate::identifiers::SnakeId;
use super::game_state::SnakeMatch;
use super::types::{Direction, Point};

/// Autopilot that steers a snake towards the food.
pub struct BotController;

impl BotController {
    pub fn calculate_move(id: SnakeId, state: &SnakeMatch, rng: &mut SessionRng) -> Option<Direction> {
        let snake = state.snake(id)?;
        if !snake.is_alive() {
            return None;
        }

        let head = snake.head();
        let target = state.food.position;

        let mut best_dir = None;
        let mut best_distance = usize::MAX;
        for dir in Self::get_valid_directions(snake.direction) {
            let next_pos = head.stepped(dir, &state.field_size);
            if Self::is_safe_position(next_pos, id, state) {
                let distance = Self::wrapped_distance(next_pos, target, state);
                if distance < best_distance {
                    best_distance = distance;
                    best_dir = Some(dir);
                }
            }
        }

        best_dir.or_else(|| Self::random_valid_move(id, state, rng))
    }

    fn random_valid_move(id: SnakeId, state: &SnakeMatch, rng: &mut SessionRng) -> Option<Direction> {
        let snake = state.snake(id)?;
        let head = snake.head();
        let safe_directions: Vec<Direction> = Self::get_valid_directions(snake.direction)
            .into_iter()
            .filter(|&dir| Self::is_safe_position(head.stepped(dir, &state.field_size), id, state))
            .collect();

        rng.choose(&safe_directions).copied().or(Some(snake.direction))
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    fn wrapped_distance(a: Point, b: Point, state: &SnakeMatch) -> usize {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        dx.min(state.field_size.width - dx) + dy.min(state.field_size.height - dy)
    }

    /// The own tail cell counts as free since it moves away this tick.
    fn is_safe_position(pos: Point, id: SnakeId, state: &SnakeMatch) -> bool {
        state.snakes().iter().all(|snake| {
            if snake.id == id {
                !snake.occupies(pos) || pos == snake.tail()
            } else {
                !snake.occupies(pos)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::{Food, SkinRegistry, Snake};
    use crate::games::snake::types::{FieldSize, GameMode};

    fn state_with(snake: Snake, food: Point) -> SnakeMatch {
        SnakeMatch::with_snakes(
            FieldSize::new(10, 10),
            GameMode::SinglePlayer,
            vec![snake],
            Food { position: food, skin: None },
            SkinRegistry::empty(),
        )
        .unwrap()
    }

    #[test]
    fn test_heads_towards_food() {
        let snake = Snake::from_positions(
            SnakeId::Player1,
            &[Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)],
            Direction::Right,
        )
        .unwrap();
        let state = state_with(snake, Point::new(5, 1));
        let mut rng = SessionRng::new(1);

        assert_eq!(BotController::calculate_move(SnakeId::Player1, &state, &mut rng), Some(Direction::Up));
    }

    #[test]
    fn test_prefers_wrapped_route() {
        let snake = Snake::from_positions(
            SnakeId::Player1,
            &[Point::new(1, 5), Point::new(1, 6), Point::new(1, 7)],
            Direction::Up,
        )
        .unwrap();
        let state = state_with(snake, Point::new(9, 5));
        let mut rng = SessionRng::new(1);

        assert_eq!(BotController::calculate_move(SnakeId::Player1, &state, &mut rng), Some(Direction::Left));
    }

    #[test]
    fn test_never_reverses() {
        let snake = Snake::from_positions(
            SnakeId::Player1,
            &[Point::new(5, 5), Point::new(6, 5), Point::new(7, 5)],
            Direction::Left,
        )
        .unwrap();
        let state = state_with(snake, Point::new(8, 5));
        let mut rng = SessionRng::new(1);

        let dir = BotController::calculate_move(SnakeId::Player1, &state, &mut rng);
        assert_ne!(dir, Some(Direction::Right));
    }

    #[test]
    fn test_unknown_snake_has_no_move() {
        let snake = Snake::from_positions(SnakeId::Player1, &[Point::new(5, 5)], Direction::Left).unwrap();
        let state = state_with(snake, Point::new(8, 5));
        let mut rng = SessionRng::new(1);
        assert_eq!(BotController::calculate_move(SnakeId::Player2, &state, &mut rng), None);
    }
}
