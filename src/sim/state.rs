//! Session state and the entities it owns
//!
//! The arena exclusively owns the ball, the platform and the block grid.
//! Each entity owns its own kinematic state and knows how to respond to
//! contact; deciding *when* contact happens is left to the tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{BoundsContact, collides, leaves_horizontal_span, world_breach};
use super::rect::Rect;
use super::tick::generate_grid;
use crate::config::{Config, ConfigError};
use crate::input::Direction;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks are being processed
    Running,
    /// Every block destroyed
    Won,
    /// Ball left through the bottom edge
    Lost,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    /// Message shown to the player
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Won => "You won!",
            Outcome::Lost => "You lose!",
        }
    }
}

/// Signal raised once when the session reaches a terminal phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Termination {
    pub outcome: Outcome,
    pub message: String,
    /// Always set; hosts use it to stop scheduling frames
    pub terminal: bool,
}

impl Termination {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            message: outcome.message().to_string(),
            terminal: true,
        }
    }
}

/// Things that happened since the host last drained events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball left the platform
    Launched { dx: f32 },
    BlockDestroyed { id: u32 },
    /// Ball bounced off the platform at the given touch offset
    PlatformBounce { offset: f32 },
    /// Ball hit a side or the top of the playfield
    WallBounce { edge: BoundsContact },
    Won,
    Lost,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Per-tick displacement. Zero while docked; once launched `vel.y` is
    /// never zero.
    pub vel: Vec2,
    /// Fixed speed magnitude
    pub speed: f32,
}

impl Ball {
    pub fn new(rect: Rect, speed: f32) -> Self {
        Self {
            rect,
            vel: Vec2::ZERO,
            speed,
        }
    }

    /// Start moving upward with a random integer horizontal component
    pub fn launch<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let bound = self.speed.floor() as i32;
        let dx = rng.random_range(-bound..=bound) as f32;
        self.vel = Vec2::new(dx, -self.speed);
    }

    /// Commit one tick of motion
    pub fn advance(&mut self) {
        self.rect.pos += self.vel;
    }

    /// Whether the ball's next position overlaps `target`
    #[inline]
    pub fn collides_with(&self, target: &Rect) -> bool {
        collides(&self.rect, self.vel, target)
    }

    /// Reflect vertically and destroy the block
    pub fn on_block_contact(&mut self, block: &mut Block) {
        self.vel.y = -self.vel.y;
        block.deactivate();
    }

    /// Respond to touching the platform
    ///
    /// A moving platform drags the ball along. A falling ball is sent back
    /// up at full speed, angled by where it touched the platform. Returns
    /// the touch offset when the ball bounced.
    pub fn on_platform_contact(&mut self, platform: &Platform) -> Option<f32> {
        if platform.dx != 0.0 {
            self.rect.pos.x += platform.dx;
        }

        if self.vel.y > 0.0 {
            let offset = platform.touch_offset(self.rect.center_x());
            self.vel.y = -self.speed;
            self.vel.x = self.speed * offset;
            Some(offset)
        } else {
            None
        }
    }

    /// Correct at most one world-edge breach of the next position
    ///
    /// Left, right and top breaches clamp the ball to the wall and send it
    /// back at full speed. A bottom breach is reported without correction;
    /// the arena treats it as a loss.
    pub fn resolve_world_bounds(&mut self, width: f32, height: f32) -> Option<BoundsContact> {
        let contact = world_breach(&self.rect, self.vel, width, height)?;
        match contact {
            BoundsContact::Left => {
                self.rect.pos.x = 0.0;
                self.vel.x = self.speed;
            }
            BoundsContact::Right => {
                self.rect.pos.x = width - self.rect.width();
                self.vel.x = -self.speed;
            }
            BoundsContact::Top => {
                self.rect.pos.y = 0.0;
                self.vel.y = self.speed;
            }
            BoundsContact::Bottom => {}
        }
        Some(contact)
    }
}

/// Marks the ball as docked on the platform
///
/// Present only between session start and the first fire. While present the
/// ball keeps its horizontal offset from the platform's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeldBall {
    pub offset_x: f32,
}

/// The player's platform (paddle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// Horizontal displacement per tick
    pub dx: f32,
    /// Fixed speed magnitude
    pub speed: f32,
    held_ball: Option<HeldBall>,
}

impl Platform {
    /// Create a platform carrying `ball`
    pub fn new(rect: Rect, speed: f32, ball: &Ball) -> Self {
        Self {
            rect,
            dx: 0.0,
            speed,
            held_ball: Some(HeldBall {
                offset_x: ball.rect.left() - rect.left(),
            }),
        }
    }

    pub fn held_ball(&self) -> Option<HeldBall> {
        self.held_ball
    }

    pub fn is_holding_ball(&self) -> bool {
        self.held_ball.is_some()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.dx = direction.sign() * self.speed;
    }

    pub fn stop(&mut self) {
        self.dx = 0.0;
    }

    /// Launch the held ball. Returns false if it was already launched.
    pub fn fire<R: Rng + ?Sized>(&mut self, ball: &mut Ball, rng: &mut R) -> bool {
        if self.held_ball.take().is_none() {
            return false;
        }
        ball.launch(rng);
        true
    }

    /// Commit one tick of motion, carrying a docked ball along
    pub fn advance(&mut self, ball: &mut Ball) {
        if self.dx == 0.0 {
            return;
        }
        self.rect.pos.x += self.dx;
        if let Some(held) = self.held_ball {
            ball.rect.pos.x = self.rect.left() + held.offset_x;
        }
    }

    /// Signed position of `x` along the platform: -1 at the left edge,
    /// 0 at the center, +1 at the right edge
    pub fn touch_offset(&self, x: f32) -> f32 {
        let offset = 2.0 * (x - self.rect.left()) / self.rect.width() - 1.0;
        offset.clamp(-1.0, 1.0)
    }

    /// Stop at the wall if the next position would leave `[0, width]`.
    /// Returns true if the platform was stopped.
    pub fn resolve_world_bounds(&mut self, width: f32) -> bool {
        if self.dx != 0.0 && leaves_horizontal_span(&self.rect, self.dx, width) {
            self.dx = 0.0;
            return true;
        }
        false
    }
}

/// A destructible block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub rect: Rect,
    pub active: bool,
}

impl Block {
    pub fn new(id: u32, rect: Rect) -> Self {
        Self {
            id,
            rect,
            active: true,
        }
    }

    /// Returns true only on the call that actually deactivated the block
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

/// Read-only view of the session for hosts that draw from plain data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub ball: Rect,
    pub platform: Rect,
    /// Active blocks only
    pub blocks: Vec<Rect>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Arena {
    config: Config,
    /// Seed of the launch RNG
    seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) ball: Ball,
    pub(crate) platform: Platform,
    /// Full grid in row-major order; destroyed blocks stay in place
    pub(crate) blocks: Vec<Block>,
    pub(crate) score: u32,
    pub(crate) phase: GamePhase,
    /// Ticks processed so far
    pub(crate) frame: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl Arena {
    /// Start a session, validating the configuration first
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let ball = Ball::new(config.ball_rect(), config.ball.speed);
        let platform = Platform::new(config.platform_rect(), config.platform.speed, &ball);
        let blocks = generate_grid(&config.grid);

        log::info!(
            "Session started: {}x{} blocks, seed {}",
            config.grid.rows,
            config.grid.cols,
            seed
        );

        Ok(Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ball,
            platform,
            blocks,
            score: 0,
            phase: GamePhase::Running,
            frame: 0,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Full grid, including destroyed blocks
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Termination signal for a finished session
    pub fn termination(&self) -> Option<Termination> {
        match self.phase {
            GamePhase::Running => None,
            GamePhase::Won => Some(Termination::new(Outcome::Won)),
            GamePhase::Lost => Some(Termination::new(Outcome::Lost)),
        }
    }

    pub fn active_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.active)
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            phase: self.phase,
            score: self.score,
            ball: self.ball.rect,
            platform: self.platform.rect,
            blocks: self.active_blocks().map(|b| b.rect).collect(),
        }
    }
}
