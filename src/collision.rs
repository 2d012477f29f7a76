//! Circular hit test shared by every entity pair.
//!
//! Each entity exposes a position anchor and a `width`.  Two entities collide
//! when the distance between their anchors is less than the sum of their half
//! widths.  This is deliberately the same loose circle approximation for
//! rectangles (bullets, ship), the boss sprite and round asteroids alike; it is
//! not an axis-aligned box test and must not be replaced by one.
//!
//! Anchors are whatever the entity stores as its position: top-left for the
//! ship and bullets, centre for asteroids and the boss.

use bevy::prelude::*;

/// Anything that can take part in a hit test.
pub trait Hitbox {
    /// Position anchor in arena coordinates.
    fn anchor(&self) -> Vec2;

    /// Collision width.  `None` while the entity's size is not known yet; such
    /// an entity never collides.
    fn hit_width(&self) -> Option<f32>;
}

/// Returns `true` if `a` and `b` overlap under the circular approximation.
///
/// Symmetric in its arguments.
pub fn hit_test(a: &impl Hitbox, b: &impl Hitbox) -> bool {
    let (Some(wa), Some(wb)) = (a.hit_width(), b.hit_width()) else {
        return false;
    };
    a.anchor().distance(b.anchor()) < wa / 2.0 + wb / 2.0
}
