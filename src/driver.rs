//! Frame driver and host-facing traits
//!
//! The simulation never schedules itself. A host supplies an input source
//! and a presenter, and `run_session` steps the arena once per frame until
//! the session ends.

use std::collections::VecDeque;
use std::path::Path;

use thiserror::Error;

use crate::input::{Direction, InputEvent, ParseInputError};
use crate::sim::{Arena, GameEvent, Termination, apply_input, tick};

/// Produces the input events to apply before the next tick
pub trait InputSource {
    fn poll(&mut self, arena: &Arena) -> Vec<InputEvent>;
}

/// Consumes session state after every tick. Read-only.
pub trait Presenter {
    fn present(&mut self, arena: &Arena, events: &[GameEvent]);

    /// Called exactly once when the session ends
    fn terminate(&mut self, termination: &Termination);
}

/// Run until the session ends or `max_frames` ticks have been processed
///
/// Returns the termination signal, or `None` if the frame cap was hit first
/// or the session had already ended.
pub fn run_session(
    arena: &mut Arena,
    input: &mut dyn InputSource,
    presenter: &mut dyn Presenter,
    max_frames: u64,
) -> Option<Termination> {
    while arena.is_running() && arena.frame() < max_frames {
        for event in input.poll(arena) {
            apply_input(arena, event);
        }

        let result = tick(arena);
        let events = arena.drain_events();
        presenter.present(arena, &events);

        if let Some(termination) = result {
            presenter.terminate(&termination);
            return Some(termination);
        }
    }

    if arena.is_running() {
        log::warn!("Frame cap of {} reached, session still running", max_frames);
    }
    None
}

/// Demo player: fires immediately, then keeps the platform under the ball
///
/// Aims slightly off-center with a slowly drifting offset so bounces vary
/// instead of settling into a vertical loop.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Distance from the aim point within which the platform stops
    pub dead_zone: f32,
    last: Option<InputEvent>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            dead_zone: 4.0,
            last: None,
        }
    }
}

impl Autopilot {
    fn steer(&self, arena: &Arena) -> InputEvent {
        let ball = arena.ball();
        let platform = arena.platform();

        let time_factor = arena.frame() as f32 * 0.013;
        let drift = time_factor.sin() * 0.35 + (time_factor * 0.7).sin() * 0.15;
        let aim = drift * platform.rect.width() / 2.0;

        // Lead the ball a little
        let target = ball.rect.center_x() + ball.vel.x * 4.0 - aim;
        let delta = target - platform.rect.center_x();

        if delta > self.dead_zone {
            InputEvent::DirectionStart(Direction::Right)
        } else if delta < -self.dead_zone {
            InputEvent::DirectionStart(Direction::Left)
        } else {
            InputEvent::DirectionStop
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, arena: &Arena) -> Vec<InputEvent> {
        let event = if arena.platform().is_holding_ball() {
            InputEvent::Fire
        } else {
            self.steer(arena)
        };

        // Only report changes, like a keyboard would
        if self.last == Some(event) {
            return Vec::new();
        }
        self.last = Some(event);
        vec![event]
    }
}

/// Reasons an input script cannot be read
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Line {line}: expected '<frame> <event>', got '{text}'")]
    Malformed { line: usize, text: String },

    #[error("Line {line}: invalid frame number: {source}")]
    Frame {
        line: usize,
        source: std::num::ParseIntError,
    },

    #[error("Line {line}: {source}")]
    Event { line: usize, source: ParseInputError },

    #[error("Line {line}: frame {frame} is earlier than the previous entry")]
    Unsorted { line: usize, frame: u64 },

    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

/// Replays events at fixed frame numbers
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<(u64, InputEvent)>,
}

impl ScriptedInput {
    /// `script` must be sorted by frame
    pub fn new(script: impl IntoIterator<Item = (u64, InputEvent)>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Parse a text script with one `<frame> <event>` entry per line
    ///
    /// Events are the words `fire`, `stop`, `left` and `right`. Blank lines
    /// and lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut script = VecDeque::new();
        let mut last = 0;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let entry = raw.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }

            let mut words = entry.split_whitespace();
            let (Some(frame), Some(event), None) = (words.next(), words.next(), words.next())
            else {
                return Err(ScriptError::Malformed {
                    line,
                    text: entry.to_string(),
                });
            };

            let frame: u64 = frame
                .parse()
                .map_err(|source| ScriptError::Frame { line, source })?;
            let event: InputEvent = event
                .parse()
                .map_err(|source| ScriptError::Event { line, source })?;
            if frame < last {
                return Err(ScriptError::Unsorted { line, frame });
            }
            last = frame;

            script.push_back((frame, event));
        }

        Ok(Self { script })
    }

    /// Load and parse a script file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let script = Self::parse(&std::fs::read_to_string(path)?)?;
        log::info!(
            "Loaded {} scripted inputs from {}",
            script.len(),
            path.display()
        );
        Ok(script)
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, arena: &Arena) -> Vec<InputEvent> {
        let mut due = Vec::new();
        while let Some(&(frame, event)) = self.script.front() {
            if frame > arena.frame() {
                break;
            }
            log::debug!("Frame {}: scripted {}", arena.frame(), event);
            due.push(event);
            self.script.pop_front();
        }
        due
    }
}

/// Presenter that reports progress through the log
#[derive(Debug, Clone)]
pub struct LogPresenter {
    /// Log the score every this many frames (0 disables)
    pub interval: u64,
    last_score: u32,
}

impl LogPresenter {
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            last_score: 0,
        }
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, arena: &Arena, events: &[GameEvent]) {
        for event in events {
            log::trace!("Frame {}: {:?}", arena.frame(), event);
        }

        let due = self.interval > 0 && arena.frame() % self.interval == 0;
        if due && arena.score() != self.last_score {
            log::info!(
                "Frame {}: score {}, {} blocks left",
                arena.frame(),
                arena.score(),
                arena.active_blocks().count()
            );
            self.last_score = arena.score();
        }
    }

    fn terminate(&mut self, termination: &Termination) {
        log::info!("Session over: {}", termination.message);
    }
}
