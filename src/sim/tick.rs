//! Per-frame simulation step
//!
//! Every collision decision in a tick is made against the positions the
//! entities had when the tick started. Motion is committed last.

use super::collision::BoundsContact;
use super::rect::Rect;
use super::state::{Arena, Block, GameEvent, GamePhase, Outcome, Termination};
use crate::config::GridConfig;
use crate::input::InputEvent;

/// Apply an input event between ticks
///
/// Input to a finished session is ignored.
pub fn apply_input(arena: &mut Arena, event: InputEvent) {
    if !arena.is_running() {
        return;
    }

    match event {
        InputEvent::DirectionStart(direction) => arena.platform.set_direction(direction),
        InputEvent::DirectionStop => arena.platform.stop(),
        InputEvent::Fire => {
            if arena.platform.fire(&mut arena.ball, &mut arena.rng) {
                log::info!("Ball launched with dx {}", arena.ball.vel.x);
                arena.events.push(GameEvent::Launched {
                    dx: arena.ball.vel.x,
                });
            }
        }
    }
}

/// Advance the session by one frame
///
/// Returns the termination signal on the tick that ends the session and
/// `None` otherwise. Ticking a finished session does nothing.
pub fn tick(arena: &mut Arena) -> Option<Termination> {
    if !arena.is_running() {
        return None;
    }
    arena.frame += 1;

    // 1. Blocks
    collide_blocks(arena);
    if arena.phase == GamePhase::Won {
        return finish(arena, Outcome::Won);
    }

    // 2. Platform
    if arena.ball.collides_with(&arena.platform.rect) {
        if let Some(offset) = arena.ball.on_platform_contact(&arena.platform) {
            log::debug!("Platform bounce at offset {:.2}", offset);
            arena.events.push(GameEvent::PlatformBounce { offset });
        }
    }

    // 3. World bounds
    let (width, height) = (arena.config().world.width, arena.config().world.height);
    match arena.ball.resolve_world_bounds(width, height) {
        Some(BoundsContact::Bottom) => return finish(arena, Outcome::Lost),
        Some(edge) => {
            log::trace!("Wall bounce: {:?}", edge);
            arena.events.push(GameEvent::WallBounce { edge });
        }
        None => {}
    }
    if arena.platform.resolve_world_bounds(width) {
        log::trace!("Platform stopped at wall");
    }

    // 4. Commit motion
    arena.platform.advance(&mut arena.ball);
    arena.ball.advance();

    None
}

/// Destroy every active block the ball will touch this tick
///
/// Blocks are tested in row-major order against the ball's current
/// velocity. A hit reflects the ball, so a neighbour it would have touched
/// on the old heading survives.
fn collide_blocks(arena: &mut Arena) {
    let total = arena.blocks.len();

    for block in arena.blocks.iter_mut().filter(|b| b.active) {
        if !arena.ball.collides_with(&block.rect) {
            continue;
        }

        arena.ball.on_block_contact(block);
        arena.score += 1;
        log::debug!("Block {} destroyed, score {}", block.id, arena.score);
        arena.events.push(GameEvent::BlockDestroyed { id: block.id });

        if arena.score as usize >= total {
            arena.phase = GamePhase::Won;
        }
    }
}

/// Enter a terminal phase and build the one-time signal
fn finish(arena: &mut Arena, outcome: Outcome) -> Option<Termination> {
    arena.phase = match outcome {
        Outcome::Won => GamePhase::Won,
        Outcome::Lost => GamePhase::Lost,
    };
    arena.events.push(match outcome {
        Outcome::Won => GameEvent::Won,
        Outcome::Lost => GameEvent::Lost,
    });

    let termination = Termination::new(outcome);
    log::info!(
        "{} Final score {} after {} frames",
        termination.message,
        arena.score(),
        arena.frame()
    );
    Some(termination)
}

/// Lay out the block grid in row-major order
pub fn generate_grid(grid: &GridConfig) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(grid.block_count());
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let rect = Rect::new(
                grid.offset_x + grid.step_x * col as f32,
                grid.offset_y + grid.step_y * row as f32,
                grid.block_width,
                grid.block_height,
            );
            blocks.push(Block::new(blocks.len() as u32, rect));
        }
    }
    blocks
}
