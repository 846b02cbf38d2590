use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::{Cell, GridGeometry};
use crate::input::Direction;
use crate::snake::SnakeBody;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board width in cells.
pub const DEFAULT_BOARD_WIDTH: u16 = 30;

/// Default board height in cells.
pub const DEFAULT_BOARD_HEIGHT: u16 = 30;

/// Pixel size of one cell for external renderers.
pub const DEFAULT_CELL_SIZE: u16 = 10;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Number of segments a new snake starts with.
pub const DEFAULT_INITIAL_LENGTH: usize = 4;

/// Head cell of a new snake.
pub const DEFAULT_INITIAL_HEAD: Cell = Cell::new(5, 5);

/// Tunable constants for one game session.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub board_width: u16,
    pub board_height: u16,
    pub cell_size: u16,
    pub tick_interval_ms: u64,
    pub initial_length: usize,
    pub initial_head: Cell,
    pub initial_direction: Direction,
    /// Fixed first food cell; drawn at random when absent.
    pub initial_food: Option<Cell>,
    /// RNG seed for reproducible games; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            initial_length: DEFAULT_INITIAL_LENGTH,
            initial_head: DEFAULT_INITIAL_HEAD,
            initial_direction: Direction::Right,
            initial_food: None,
            seed: None,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ConfigOverrides {
    pub board_width: Option<u16>,
    pub board_height: Option<u16>,
    pub tick_interval_ms: Option<u64>,
    pub initial_length: Option<usize>,
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Loads the config from `path`, or from the platform config directory
    /// when no path is given. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load_or_default(&config_path()),
        }
    }

    fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw, path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&raw, path)
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns a copy with every present override applied.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(width) = overrides.board_width {
            self.board_width = width;
        }
        if let Some(height) = overrides.board_height {
            self.board_height = height;
        }
        if let Some(ms) = overrides.tick_interval_ms {
            self.tick_interval_ms = ms;
        }
        if let Some(length) = overrides.initial_length {
            self.initial_length = length;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self
    }

    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.board_width, self.board_height, self.cell_size)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Snake a new session starts with.
    #[must_use]
    pub fn initial_snake(&self) -> SnakeBody {
        SnakeBody::straight(
            self.initial_head,
            self.initial_length,
            self.initial_direction,
        )
    }

    /// Checks that a game can start from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroInitialLength);
        }

        let geometry = self.geometry();
        if self.initial_length >= geometry.total_cells() {
            return Err(ConfigError::SnakeFillsBoard {
                length: self.initial_length,
                total: geometry.total_cells(),
            });
        }

        let head = self.initial_head;
        if !geometry.is_within_bounds(head) {
            return Err(ConfigError::SnakeOutOfBounds(head));
        }

        // Cells available behind the head before the trail leaves the board.
        let trail = self.initial_direction.opposite();
        let room = match trail {
            Direction::Left => head.col,
            Direction::Right => i32::from(geometry.width) - 1 - head.col,
            Direction::Up => head.row,
            Direction::Down => i32::from(geometry.height) - 1 - head.row,
        };
        if self.initial_length - 1 > usize::try_from(room).unwrap_or_default() {
            let (dc, dr) = trail.delta();
            let steps = room + 1;
            return Err(ConfigError::SnakeOutOfBounds(Cell::new(
                head.col + dc * steps,
                head.row + dr * steps,
            )));
        }

        let snake = self.initial_snake();
        if let Some(food) = self.initial_food {
            if !geometry.is_within_bounds(food) {
                return Err(ConfigError::FoodOutOfBounds(food));
            }
            if snake.occupies(food) {
                return Err(ConfigError::FoodOnSnake(food));
            }
        }

        Ok(())
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Returns the platform-correct default log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push("grid-snake.log");
    base
}
