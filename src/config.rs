//! Session configuration
//!
//! Read once at session start and immutable afterwards. Every field has a
//! default taken from the original game, so a JSON file only needs the
//! values it wants to change.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::rect::Rect;

/// Allowed gap between the ball's bottom and the platform's top at start
const DOCK_TOLERANCE: f32 = 0.5;

/// Reasons a configuration cannot start a session
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Block grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: u32, cols: u32 },

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("Block spacing ({step_x}, {step_y}) is smaller than the block size, blocks would overlap")]
    OverlappingBlocks { step_x: f32, step_y: f32 },

    #[error("{what} does not fit inside the {width}x{height} playfield")]
    OutOfBounds {
        what: &'static str,
        width: f32,
        height: f32,
    },

    #[error("Ball must start resting on top of the platform")]
    BallNotDocked,

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Playfield dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

/// Block grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    pub block_width: f32,
    pub block_height: f32,
    /// Horizontal distance between the left edges of neighbouring blocks
    pub step_x: f32,
    /// Vertical distance between the top edges of neighbouring rows
    pub step_y: f32,
    /// Top-left corner of the first block
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            step_x: BLOCK_STEP_X,
            step_y: BLOCK_STEP_Y,
            offset_x: GRID_OFFSET_X,
            offset_y: GRID_OFFSET_Y,
        }
    }
}

impl GridConfig {
    /// Number of blocks in the grid
    pub fn block_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Bounding box of the whole grid
    pub fn bounds(&self) -> Rect {
        let width = self.step_x * self.cols.saturating_sub(1) as f32 + self.block_width;
        let height = self.step_y * self.rows.saturating_sub(1) as f32 + self.block_height;
        Rect::new(self.offset_x, self.offset_y, width, height)
    }
}

/// Ball start state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub x: f32,
    pub y: f32,
    /// Side length of the (square) ball
    pub size: f32,
    /// Speed magnitude per tick
    pub speed: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            x: BALL_START_X,
            y: BALL_START_Y,
            size: BALL_SIZE,
            speed: BALL_SPEED,
        }
    }
}

/// Platform start state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Speed magnitude per tick while a direction is held
    pub speed: f32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            x: PLATFORM_START_X,
            y: PLATFORM_START_Y,
            width: PLATFORM_WIDTH,
            height: PLATFORM_HEIGHT,
            speed: PLATFORM_SPEED,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub world: WorldConfig,
    pub grid: GridConfig,
    pub ball: BallConfig,
    pub platform: PlatformConfig,
}

impl Config {
    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Initial ball rectangle
    pub fn ball_rect(&self) -> Rect {
        Rect::new(self.ball.x, self.ball.y, self.ball.size, self.ball.size)
    }

    /// Initial platform rectangle
    pub fn platform_rect(&self) -> Rect {
        Rect::new(
            self.platform.x,
            self.platform.y,
            self.platform.width,
            self.platform.height,
        )
    }

    /// Check the configuration can run a non-degenerate session
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("world.width", self.world.width),
            ("world.height", self.world.height),
            ("grid.block_width", self.grid.block_width),
            ("grid.block_height", self.grid.block_height),
            ("ball.size", self.ball.size),
            ("ball.speed", self.ball.speed),
            ("platform.width", self.platform.width),
            ("platform.height", self.platform.height),
            ("platform.speed", self.platform.speed),
        ];
        for (field, value) in positives {
            // Also rejects NaN
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.grid.rows,
                cols: self.grid.cols,
            });
        }

        if (self.grid.cols > 1 && self.grid.step_x < self.grid.block_width)
            || (self.grid.rows > 1 && self.grid.step_y < self.grid.block_height)
        {
            return Err(ConfigError::OverlappingBlocks {
                step_x: self.grid.step_x,
                step_y: self.grid.step_y,
            });
        }

        let (width, height) = (self.world.width, self.world.height);
        let checks = [
            ("Block grid", self.grid.bounds()),
            ("Ball", self.ball_rect()),
            ("Platform", self.platform_rect()),
        ];
        for (what, rect) in checks {
            if !rect.within(width, height) {
                return Err(ConfigError::OutOfBounds {
                    what,
                    width,
                    height,
                });
            }
        }

        let (ball, platform) = (self.ball_rect(), self.platform_rect());
        let resting = (ball.bottom() - platform.top()).abs() <= DOCK_TOLERANCE;
        let over = ball.left() >= platform.left() && ball.right() <= platform.right();
        if !resting || !over {
            return Err(ConfigError::BallNotDocked);
        }

        Ok(())
    }
}
