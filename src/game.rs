use std::collections::HashSet;

use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::{self, Collision};
use crate::config::GameConfig;
use crate::error::{ConfigError, InvariantViolation};
use crate::food::FoodPlacer;
use crate::geometry::{Cell, GridGeometry};
use crate::input::{Direction, direction_change_is_valid};
use crate::snake::SnakeBody;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverReason {
    WallCollision,
    SelfCollision,
    /// No free cell was left for the next food.
    BoardFull,
}

impl From<Collision> for GameOverReason {
    fn from(collision: Collision) -> Self {
        match collision {
            Collision::Boundary => Self::WallCollision,
            Collision::SelfBody => Self::SelfCollision,
        }
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Moved,
    Ate,
    GameOver(GameOverReason),
    /// The game had already ended; nothing changed.
    Idle,
}

/// Read-only view of a session handed to displays.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub score: u32,
    pub status: GameStatus,
    pub game_over_reason: Option<GameOverReason>,
    pub direction: Direction,
}

/// Owns all mutable state of one game session.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    geometry: GridGeometry,
    snake: SnakeBody,
    /// Direction of the last executed move.
    heading: Direction,
    /// Direction used by the next tick.
    pending: Direction,
    food: Cell,
    score: u32,
    status: GameStatus,
    game_over_reason: Option<GameOverReason>,
    tick_count: u64,
    placer: FoodPlacer<StdRng>,
}

impl GameEngine {
    /// Starts a session from `config` after validating it.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self::start_session(config.clone(), FoodPlacer::new(config.geometry(), rng))
    }

    /// Discards the current session and starts a new one from the same config.
    ///
    /// The RNG carries over, so the new session draws fresh food.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        *self = Self::start_session(self.config.clone(), self.placer.clone())?;
        Ok(())
    }

    fn start_session(
        config: GameConfig,
        mut placer: FoodPlacer<StdRng>,
    ) -> Result<Self, ConfigError> {
        let geometry = config.geometry();
        let snake = config.initial_snake();
        let food = match config.initial_food {
            Some(food) => food,
            None => placer.place(&snake.occupied_cells()).ok_or(
                ConfigError::SnakeFillsBoard {
                    length: snake.len(),
                    total: geometry.total_cells(),
                },
            )?,
        };

        info!(
            "new session on {}x{} board, snake length {}, food at {:?}",
            geometry.width,
            geometry.height,
            snake.len(),
            food
        );

        let direction = config.initial_direction;
        Ok(Self {
            config,
            geometry,
            snake,
            heading: direction,
            pending: direction,
            food,
            score: 0,
            status: GameStatus::Running,
            game_over_reason: None,
            tick_count: 0,
            placer,
        })
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Collisions are checked against the pre-move head, then the snake
    /// either eats (head already on food) or moves. A collision produced by
    /// this tick's move is therefore reported on the following tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }

        if let Some(collision) = collision::detect(&self.snake, self.geometry) {
            let reason = GameOverReason::from(collision);
            self.end_game(reason);
            return TickOutcome::GameOver(reason);
        }

        debug_assert_eq!(self.check_invariants(), Ok(()));

        self.tick_count += 1;
        self.heading = self.pending;

        if self.snake.head() != self.food {
            self.snake.advance(self.heading);
            return TickOutcome::Moved;
        }

        self.score += 1;
        self.snake.grow(self.heading);

        match self.placer.place(&self.snake.occupied_cells()) {
            Some(food) => {
                debug!("food eaten, score {}, new food at {:?}", self.score, food);
                self.food = food;
                TickOutcome::Ate
            }
            None => {
                self.end_game(GameOverReason::BoardFull);
                TickOutcome::GameOver(GameOverReason::BoardFull)
            }
        }
    }

    /// Requests a new direction for the next tick.
    ///
    /// Reversing the current movement is ignored while the snake is longer
    /// than one cell. Returns whether the request was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }

        if self.snake.len() > 1 && !direction_change_is_valid(self.heading, requested) {
            trace!("ignored reversal to {requested:?} while heading {:?}", self.heading);
            return false;
        }

        self.pending = requested;
        true
    }

    /// Verifies the state a running game must satisfy between ticks.
    ///
    /// The head is exempt: it may sit outside the board or on the body until
    /// the next tick's collision check ends the game.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.snake.is_empty() {
            return Err(InvariantViolation::EmptyBody);
        }

        if self.status == GameStatus::GameOver {
            return Ok(());
        }

        let mut seen = HashSet::with_capacity(self.snake.len());
        for cell in self.snake.segments().skip(1).copied() {
            if !seen.insert(cell) {
                return Err(InvariantViolation::DuplicateCell(cell));
            }
            if !self.geometry.is_within_bounds(cell) {
                return Err(InvariantViolation::OutOfBounds(cell));
            }
        }

        if !self.geometry.is_within_bounds(self.food) {
            return Err(InvariantViolation::FoodOutOfBounds(self.food));
        }

        if seen.contains(&self.food) {
            return Err(InvariantViolation::FoodOnSnake(self.food));
        }

        Ok(())
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.status = GameStatus::GameOver;
        self.game_over_reason = Some(reason);
        info!(
            "game over ({reason:?}) after {} ticks with score {}",
            self.tick_count, self.score
        );
    }

    /// Copies the state a display needs.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score,
            status: self.status,
            game_over_reason: self.game_over_reason,
            direction: self.heading,
        }
    }

    /// Current snake segments, head first.
    #[must_use]
    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    /// Cell of the food waiting to be eaten.
    #[must_use]
    pub fn food(&self) -> Cell {
        self.food
    }

    /// Food eaten in the current session.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether the session is still running.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Why the session ended, once it has.
    #[must_use]
    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    /// Direction of the last executed move.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.heading
    }

    /// Direction the next tick will use.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    /// Board dimensions of this session.
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Configuration every session restarts from.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Ticks executed while running in the current session.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::geometry::Cell;
    use crate::input::Direction;

    use super::{GameEngine, GameOverReason, GameStatus, TickOutcome};

    fn engine(head: Cell, length: usize, direction: Direction, food: Cell) -> GameEngine {
        GameEngine::new(&GameConfig {
            initial_head: head,
            initial_length: length,
            initial_direction: direction,
            initial_food: Some(food),
            seed: Some(1),
            ..GameConfig::default()
        })
        .expect("test config is valid")
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut state = engine(Cell::new(5, 5), 4, Direction::Right, Cell::new(6, 5));

        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.snake().len(), 4);

        assert_eq!(state.tick(), TickOutcome::Ate);
        assert_eq!(state.snake().len(), 5);
        assert_eq!(state.snake().head(), Cell::new(7, 5));
        assert_eq!(state.snake().tail(), Cell::new(3, 5));
    }

    #[test]
    fn new_food_is_placed_off_the_grown_snake() {
        let mut state = engine(Cell::new(5, 5), 4, Direction::Right, Cell::new(6, 5));

        state.tick();
        state.tick();

        assert!(!state.snake().occupies(state.food()));
        assert!(state.geometry().is_within_bounds(state.food()));
    }

    #[test]
    fn score_increments_when_food_is_eaten() {
        let mut state = engine(Cell::new(5, 5), 2, Direction::Right, Cell::new(6, 5));

        state.tick();
        assert_eq!(state.score(), 0);

        state.tick();
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut state = engine(Cell::new(29, 5), 4, Direction::Right, Cell::new(0, 0));

        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.snake().head(), Cell::new(30, 5));

        assert_eq!(
            state.tick(),
            TickOutcome::GameOver(GameOverReason::WallCollision)
        );
        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn reversal_is_ignored_for_long_snake() {
        let mut state = engine(Cell::new(5, 5), 4, Direction::Right, Cell::new(0, 0));

        assert!(!state.set_direction(Direction::Left));
        assert_eq!(state.pending_direction(), Direction::Right);
    }

    #[test]
    fn quick_turns_cannot_reverse_between_ticks() {
        let mut state = engine(Cell::new(5, 5), 4, Direction::Right, Cell::new(0, 0));

        assert!(state.set_direction(Direction::Up));
        assert!(!state.set_direction(Direction::Left));

        state.tick();
        assert_eq!(state.snake().head(), Cell::new(5, 4));
    }

    #[test]
    fn single_cell_snake_may_reverse() {
        let mut state = engine(Cell::new(5, 5), 1, Direction::Right, Cell::new(0, 0));

        assert!(state.set_direction(Direction::Left));
        state.tick();

        assert_eq!(state.snake().head(), Cell::new(4, 5));
        assert_eq!(state.status(), GameStatus::Running);
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let mut state = GameEngine::new(&GameConfig {
            board_width: 2,
            board_height: 2,
            initial_head: Cell::new(0, 0),
            initial_length: 2,
            initial_direction: Direction::Left,
            initial_food: Some(Cell::new(0, 1)),
            seed: Some(4),
            ..GameConfig::default()
        })
        .expect("test config is valid");

        state.set_direction(Direction::Down);
        assert_eq!(state.tick(), TickOutcome::Moved);
        state.set_direction(Direction::Right);
        assert_eq!(state.tick(), TickOutcome::Ate);
        assert_eq!(state.food(), Cell::new(1, 0));
        state.set_direction(Direction::Up);
        assert_eq!(state.tick(), TickOutcome::Moved);
        state.set_direction(Direction::Left);

        assert_eq!(
            state.tick(),
            TickOutcome::GameOver(GameOverReason::BoardFull)
        );
        assert_eq!(state.score(), 2);
        assert_eq!(state.snake().len(), 4);
        assert_eq!(state.status(), GameStatus::GameOver);
    }

    #[test]
    fn reset_starts_a_fresh_session() {
        let mut state = engine(Cell::new(29, 5), 4, Direction::Right, Cell::new(0, 0));
        state.tick();
        state.tick();
        assert_eq!(state.status(), GameStatus::GameOver);

        state.reset().expect("validated config restarts");

        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.game_over_reason(), None);
        assert_eq!(state.tick_count(), 0);
        assert_eq!(state.snake().head(), Cell::new(29, 5));
        assert_eq!(state.food(), Cell::new(0, 0));
    }

    #[test]
    fn reset_draws_food_off_the_fresh_snake() {
        let config = GameConfig {
            board_width: 3,
            board_height: 2,
            initial_head: Cell::new(2, 0),
            initial_length: 3,
            initial_direction: Direction::Right,
            seed: Some(6),
            ..GameConfig::default()
        };
        let mut state = GameEngine::new(&config).expect("test config is valid");

        for _ in 0..10 {
            state.reset().expect("validated config restarts");
            assert!(!state.snake().occupies(state.food()));
            assert_eq!(state.food().row, 1);
            assert_eq!(state.check_invariants(), Ok(()));
        }
    }

    #[test]
    fn random_initial_food_avoids_the_snake() {
        for seed in 0..50 {
            let state = GameEngine::new(&GameConfig {
                board_width: 6,
                board_height: 6,
                initial_head: Cell::new(4, 2),
                seed: Some(seed),
                ..GameConfig::default()
            })
            .expect("test config is valid");

            assert!(!state.snake().occupies(state.food()));
            assert_eq!(state.check_invariants(), Ok(()));
        }
    }
}
