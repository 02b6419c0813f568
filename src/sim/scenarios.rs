//! End-to-end tick scenarios on the default layout

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{
    Arena, Ball, BoundsContact, GameEvent, GamePhase, Outcome, Platform, Rect, apply_input, tick,
};
use crate::{Config, Direction, InputEvent};

fn launched_arena(seed: u64) -> Arena {
    let mut arena = Arena::new(Config::default(), seed).expect("default config is valid");
    apply_input(&mut arena, InputEvent::Fire);
    arena
}

#[test]
fn test_center_hit_bounces_straight_up() {
    // Platform width 100 at x=280; contact at x=330 is its center
    let mut arena = launched_arena(1);
    assert_eq!(arena.platform.rect, Rect::new(280.0, 300.0, 100.0, 14.0));
    assert_eq!(arena.platform.touch_offset(330.0), 0.0);

    arena.ball.rect.pos = Vec2::new(320.0, 282.0);
    // Ball center at x=330 when contact is detected
    arena.ball.vel = Vec2::new(-1.0, 3.0);

    assert_eq!(tick(&mut arena), None);
    assert_eq!(arena.ball.vel.x, 0.0);
    assert_eq!(arena.ball.vel.y, -3.0);
}

#[test]
fn test_bottom_breach_loses() {
    let mut arena = launched_arena(2);
    arena.ball.rect.pos = Vec2::new(100.0, 360.0);
    arena.ball.vel = Vec2::new(0.0, 5.0);

    let termination = tick(&mut arena).expect("session ends");
    assert_eq!(termination.outcome, Outcome::Lost);
    assert_eq!(termination.message, "You lose!");
    assert!(termination.terminal);
    assert_eq!(arena.phase(), GamePhase::Lost);
    assert_eq!(arena.termination(), Some(termination));
}

#[test]
fn test_clearing_all_blocks_wins() {
    let mut arena = launched_arena(3);
    assert_eq!(arena.blocks.len(), 32);

    let cols = arena.config().grid.cols as usize;
    let rows = arena.config().grid.rows as usize;

    // Bottom row first so the ball never reaches into a live row below
    let order: Vec<usize> = (0..rows)
        .rev()
        .flat_map(|row| (0..cols).map(move |col| row * cols + col))
        .collect();

    let mut result = None;
    for (hits, &index) in order.iter().enumerate() {
        assert!(result.is_none(), "session ended early after {} hits", hits);

        let block = arena.blocks[index].rect;
        arena.ball.rect.pos = Vec2::new(block.left() + 20.0, block.bottom() + 1.0);
        arena.ball.vel = Vec2::new(0.0, -3.0);

        result = tick(&mut arena);
        assert!(!arena.blocks[index].active);
        assert_eq!(arena.score() as usize, hits + 1);
    }

    let termination = result.expect("last block wins");
    assert_eq!(termination.outcome, Outcome::Won);
    assert_eq!(termination.message, "You won!");
    assert_eq!(arena.score(), 32);
    assert_eq!(arena.phase(), GamePhase::Won);
    assert_eq!(arena.active_blocks().count(), 0);
    assert!(arena.drain_events().contains(&GameEvent::Won));
}

#[test]
fn test_left_breach_clamps() {
    let mut ball = Ball::new(Rect::new(0.0, 150.0, 20.0, 20.0), 3.0);
    ball.vel = Vec2::new(-3.0, 3.0);

    assert_eq!(ball.resolve_world_bounds(640.0, 380.0), Some(BoundsContact::Left));
    assert_eq!(ball.rect.left(), 0.0);
    assert_eq!(ball.vel.x, 3.0);
}

#[test]
fn test_corner_breach_corrects_left_only() {
    let mut ball = Ball::new(Rect::new(1.0, 1.0, 20.0, 20.0), 3.0);
    ball.vel = Vec2::new(-3.0, -3.0);

    assert_eq!(ball.resolve_world_bounds(640.0, 380.0), Some(BoundsContact::Left));
    assert_eq!(ball.rect.pos, Vec2::new(0.0, 1.0));
    assert_eq!(ball.vel, Vec2::new(3.0, -3.0));
}

#[test]
fn test_platform_stops_at_wall_with_docked_ball() {
    let mut arena = Arena::new(Config::default(), 4).expect("valid");
    apply_input(&mut arena, InputEvent::DirectionStart(Direction::Left));

    for _ in 0..100 {
        tick(&mut arena);
    }

    // 280 is not a multiple of 6: the platform stops 4 px short of the wall
    assert_eq!(arena.platform.rect.left(), 4.0);
    assert_eq!(arena.platform.dx, 0.0);
    assert_eq!(arena.ball.rect.left(), 44.0);
    assert!(arena.platform.is_holding_ball());
}

#[test]
fn test_fire_twice_launches_once() {
    let ball_rect = Rect::new(320.0, 280.0, 20.0, 20.0);
    let mut ball = Ball::new(ball_rect, 3.0);
    let mut platform = Platform::new(Rect::new(280.0, 300.0, 100.0, 14.0), 6.0, &ball);
    let mut rng = Pcg32::seed_from_u64(5);

    assert!(platform.fire(&mut ball, &mut rng));
    assert!(!platform.fire(&mut ball, &mut rng));
    assert!(platform.held_ball().is_none());
}
