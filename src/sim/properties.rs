//! Property tests for the collision and scoring invariants

use glam::Vec2;
use proptest::prelude::*;

use super::{Arena, Ball, BoundsContact, GamePhase, Platform, Rect, apply_input, tick};
use crate::driver::{Autopilot, InputSource};
use crate::{Config, Direction, InputEvent};

const WIDTH: f32 = 640.0;
const HEIGHT: f32 = 380.0;

fn nonzero_speed() -> impl Strategy<Value = f32> {
    prop_oneof![-6.0f32..-0.5, 0.5f32..6.0]
}

proptest! {
    #[test]
    fn touch_offset_stays_in_range(
        x in 0.0f32..540.0,
        width in 10.0f32..200.0,
        t in 0.0f32..=1.0,
    ) {
        let ball = Ball::new(Rect::new(x, 0.0, 5.0, 5.0), 3.0);
        let platform = Platform::new(Rect::new(x, 300.0, width, 14.0), 6.0, &ball);

        let offset = platform.touch_offset(x + width * t);
        prop_assert!((-1.0..=1.0).contains(&offset));
        prop_assert!((platform.touch_offset(x) + 1.0).abs() < 1e-5);
        prop_assert!(platform.touch_offset(x + width / 2.0).abs() < 1e-5);
        prop_assert!((platform.touch_offset(x + width) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn ball_bounds_contain_x(
        x in 0.0f32..=620.0,
        y in 0.0f32..=360.0,
        dx in -3.0f32..=3.0,
        dy in nonzero_speed(),
    ) {
        let mut ball = Ball::new(Rect::new(x, y, 20.0, 20.0), 3.0);
        ball.vel = Vec2::new(dx, dy);

        let contact = ball.resolve_world_bounds(WIDTH, HEIGHT);
        let next = ball.rect.translated(ball.vel);
        prop_assert!(next.left() >= 0.0);
        prop_assert!(next.right() <= WIDTH);
        if contact.is_none() {
            prop_assert!(next.bottom() <= HEIGHT);
            prop_assert!(next.top() >= 0.0);
        }
        if contact == Some(BoundsContact::Top) {
            prop_assert!(ball.vel.y > 0.0);
        }
    }

    #[test]
    fn platform_bounds_contain_x(
        x in 0.0f32..=540.0,
        direction in prop_oneof![Just(Direction::Left), Just(Direction::Right)],
    ) {
        let ball = Ball::new(Rect::new(x, 280.0, 20.0, 20.0), 3.0);
        let mut platform = Platform::new(Rect::new(x, 300.0, 100.0, 14.0), 6.0, &ball);
        platform.set_direction(direction);

        platform.resolve_world_bounds(WIDTH);
        let next = platform.rect.translated(Vec2::new(platform.dx, 0.0));
        prop_assert!(next.left() >= 0.0);
        prop_assert!(next.right() <= WIDTH);
    }

    #[test]
    fn block_contact_destroys_one_block_and_reflects(
        offset_x in -15.0f32..55.0,
        gap in 0.5f32..2.5,
        dx in -3.0f32..=3.0,
    ) {
        let mut arena = Arena::new(Config::default(), 1).expect("valid");
        apply_input(&mut arena, InputEvent::Fire);

        // Around block 27 in the bottom row, approached from below
        let block = arena.blocks[27].rect;
        arena.ball.rect.pos = Vec2::new(block.left() + offset_x, block.bottom() + gap);
        arena.ball.vel = Vec2::new(dx, -3.0);

        let row = 24..32;
        let hit = arena.blocks[row.clone()]
            .iter()
            .any(|b| arena.ball.collides_with(&b.rect));
        tick(&mut arena);

        let destroyed = arena.blocks[row].iter().filter(|b| !b.active).count();
        prop_assert_eq!(destroyed, hit as usize);
        prop_assert_eq!(arena.score(), hit as u32);
        if hit {
            prop_assert!(arena.ball.vel.y > 0.0);
        } else {
            prop_assert!(arena.ball.vel.y < 0.0);
        }
    }

    #[test]
    fn score_is_monotonic(seed in any::<u64>()) {
        let mut arena = Arena::new(Config::default(), seed).expect("valid");
        let mut pilot = Autopilot::default();
        let mut last = 0;

        for _ in 0..3_000 {
            for event in pilot.poll(&arena) {
                apply_input(&mut arena, event);
            }
            let launched = !arena.platform.is_holding_ball();
            let result = tick(&mut arena);

            let destroyed = arena.blocks.iter().filter(|b| !b.active).count() as u32;
            prop_assert!(arena.score() >= last);
            prop_assert_eq!(arena.score(), destroyed);
            prop_assert_eq!(
                arena.phase() == GamePhase::Won,
                arena.score() as usize == arena.blocks.len()
            );
            if launched && arena.is_running() {
                prop_assert!(arena.ball.vel.y != 0.0);
            }
            last = arena.score();

            if result.is_some() {
                break;
            }
        }
    }
}
