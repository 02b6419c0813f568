//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One discrete step per frame, driven from outside
//! - Seeded RNG only
//! - Stable iteration order (blocks in row-major order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{BoundsContact, collides, world_breach};
pub use rect::Rect;
pub use state::{
    Arena, Ball, Block, GameEvent, GamePhase, HeldBall, Outcome, Platform, Snapshot, Termination,
};
pub use tick::{apply_input, generate_grid, tick};

#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;
