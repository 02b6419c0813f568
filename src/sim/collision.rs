//! Collision detection for the rectangle world
//!
//! Every test here is one-sided lookahead: the mover is checked at its
//! prospective position (current position + velocity) while the target stays
//! where it is. Contact is therefore seen one frame before the rectangles
//! would visibly overlap, so deflection can be decided before motion commits.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Which world edge a prospective position breached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsContact {
    Left,
    Right,
    Top,
    Bottom,
}

/// Check whether `mover`, advanced by `velocity`, overlaps `target`
#[inline]
pub fn collides(mover: &Rect, velocity: Vec2, target: &Rect) -> bool {
    mover.translated(velocity).overlaps(target)
}

/// First world edge breached by `mover` advanced by `velocity`
///
/// Edges are tested in fixed priority order left, right, top, bottom and
/// only the first breach is reported.
pub fn world_breach(mover: &Rect, velocity: Vec2, width: f32, height: f32) -> Option<BoundsContact> {
    let next = mover.translated(velocity);

    if next.left() < 0.0 {
        Some(BoundsContact::Left)
    } else if next.right() > width {
        Some(BoundsContact::Right)
    } else if next.top() < 0.0 {
        Some(BoundsContact::Top)
    } else if next.bottom() > height {
        Some(BoundsContact::Bottom)
    } else {
        None
    }
}

/// Whether a horizontal mover would leave `[0, width]` on either side
#[inline]
pub fn leaves_horizontal_span(mover: &Rect, dx: f32, width: f32) -> bool {
    let next = mover.translated(Vec2::new(dx, 0.0));
    next.left() < 0.0 || next.right() > width
}
