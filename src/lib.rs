//! Brick Arena - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, session state)
//! - `config`: Session configuration with validation
//! - `input`: Logical input events and key mapping
//! - `driver`: Frame loop and the host-facing traits it drives

pub mod config;
pub mod driver;
pub mod input;
pub mod sim;

pub use config::{Config, ConfigError};
pub use input::{Direction, InputEvent, ParseInputError};
pub use sim::{Arena, GamePhase, Outcome, Termination};

/// Default values of the original game, used by `Config::default()`
pub mod consts {
    /// Playfield dimensions
    pub const WORLD_WIDTH: f32 = 640.0;
    pub const WORLD_HEIGHT: f32 = 380.0;

    /// Block grid layout
    pub const GRID_ROWS: u32 = 4;
    pub const GRID_COLS: u32 = 8;
    pub const BLOCK_WIDTH: f32 = 60.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    /// Distance between the left edges of neighbouring blocks
    pub const BLOCK_STEP_X: f32 = 64.0;
    /// Distance between the top edges of neighbouring rows
    pub const BLOCK_STEP_Y: f32 = 24.0;
    pub const GRID_OFFSET_X: f32 = 65.0;
    pub const GRID_OFFSET_Y: f32 = 35.0;

    /// Ball defaults (starts docked on the platform)
    pub const BALL_SIZE: f32 = 20.0;
    pub const BALL_START_X: f32 = 320.0;
    pub const BALL_START_Y: f32 = 280.0;
    pub const BALL_SPEED: f32 = 3.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 14.0;
    pub const PLATFORM_START_X: f32 = 280.0;
    pub const PLATFORM_START_Y: f32 = 300.0;
    pub const PLATFORM_SPEED: f32 = 6.0;

    /// Frame cap for the headless driver (10 minutes at 60 Hz)
    pub const MAX_FRAMES: u64 = 60 * 60 * 10;
}
