//! Logical input events
//!
//! The host maps whatever device it has onto three events. Anything it
//! cannot map is dropped here and never reaches the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A word that names no direction or event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown input '{0}'")]
pub struct ParseInputError(pub String);

/// Horizontal platform direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Unit sign of the direction along x
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseInputError;

    /// Case-insensitive, also accepts arrow key names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "arrowleft" => Ok(Direction::Left),
            "right" | "arrowright" => Ok(Direction::Right),
            _ => Err(ParseInputError(s.to_string())),
        }
    }
}

/// An input event applied to the session between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Start moving the platform
    DirectionStart(Direction),
    /// Stop moving the platform
    DirectionStop,
    /// Launch the docked ball
    Fire,
}

impl InputEvent {
    /// Map a browser-style key code to an event
    ///
    /// Arrow keys start movement, space fires, and releasing any key stops
    /// the platform. Unrecognised presses map to `None`.
    pub fn from_key(code: &str, pressed: bool) -> Option<Self> {
        if !pressed {
            return Some(InputEvent::DirectionStop);
        }
        match code {
            "Space" => Some(InputEvent::Fire),
            "ArrowLeft" => Some(InputEvent::DirectionStart(Direction::Left)),
            "ArrowRight" => Some(InputEvent::DirectionStart(Direction::Right)),
            _ => None,
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::DirectionStart(direction) => f.write_str(direction.as_str()),
            InputEvent::DirectionStop => f.write_str("stop"),
            InputEvent::Fire => f.write_str("fire"),
        }
    }
}

impl FromStr for InputEvent {
    type Err = ParseInputError;

    /// Parses the words written by `Display`: `fire`, `stop`, or a direction
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fire" | "space" => Ok(InputEvent::Fire),
            "stop" => Ok(InputEvent::DirectionStop),
            _ => s.parse().map(InputEvent::DirectionStart),
        }
    }
}
