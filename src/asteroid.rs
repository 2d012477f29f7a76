//! Level 1 asteroids.
//!
//! Asteroids are static collision targets.  Their position is their centre
//! and their collision width is derived from the fixed radius, independent of
//! how large the sprite is drawn.

use crate::collision::Hitbox;
use crate::sprite::SpriteState;
use bevy::prelude::*;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    /// Centre in arena coordinates.
    pub position: Vec2,
    pub radius: f32,
    /// Visual size only; collisions use `radius`.
    pub sprite: SpriteState,
}

impl Asteroid {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            sprite: SpriteState::Pending,
        }
    }
}

impl Hitbox for Asteroid {
    fn anchor(&self) -> Vec2 {
        self.position
    }

    fn hit_width(&self) -> Option<f32> {
        Some(self.radius * 2.0)
    }
}

/// Scatter `count` asteroids over the upper half of the arena.
///
/// Centres are drawn uniformly from `x ∈ [margin, width − margin)` and
/// `y ∈ [0, height / 2)`.  Overlaps are allowed.
pub fn spawn_field(
    count: usize,
    radius: f32,
    margin: f32,
    arena: Vec2,
    rng: &mut impl Rng,
) -> Vec<Asteroid> {
    (0..count)
        .map(|_| {
            let x = rng.gen_range(margin..arena.x - margin);
            let y = rng.gen_range(0.0..arena.y / 2.0);
            Asteroid::new(Vec2::new(x, y), radius)
        })
        .collect()
}
