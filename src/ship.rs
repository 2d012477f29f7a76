//! The player's ship.
//!
//! The ship only moves horizontally and its position is its top-left corner.
//! It has no position until its sprite is ready: readiness fixes the size and
//! parks the ship centred near the bottom edge.

use crate::collision::Hitbox;
use crate::sprite::SpriteState;
use bevy::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    /// Top-left corner in arena coordinates.  Meaningless while pending.
    pub position: Vec2,
    pub sprite: SpriteState,
    /// Horizontal distance covered per `move_left` / `move_right` call.
    pub step: f32,
}

impl Ship {
    pub fn new(step: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            sprite: SpriteState::Pending,
            step,
        }
    }

    /// Fix the ship size and place it at its starting position.
    ///
    /// Starting position: horizontally centred, bottom edge half a ship height
    /// above the arena floor.
    pub fn mark_ready(&mut self, size: Vec2, arena: Vec2) {
        self.sprite = SpriteState::Ready { size };
        self.position = Vec2::new(
            arena.x / 2.0 - size.x / 2.0,
            arena.y - size.y / 2.0 - size.y,
        );
    }

    #[inline]
    pub fn size(&self) -> Option<Vec2> {
        self.sprite.size()
    }

    /// Shift left by one step, clamped at the left arena edge.
    pub fn move_left(&mut self) {
        if !self.sprite.is_ready() {
            return;
        }
        self.position.x = (self.position.x - self.step).max(0.0);
    }

    /// Shift right by one step, clamped so the ship stays inside the arena.
    pub fn move_right(&mut self, arena_width: f32) {
        let Some(size) = self.size() else {
            return;
        };
        self.position.x = (self.position.x + self.step).min(arena_width - size.x);
    }

    /// Spawn point of a player bullet of `bullet_width`: horizontally centred
    /// on the ship, level with its top edge.
    pub fn muzzle(&self, bullet_width: f32) -> Option<Vec2> {
        let size = self.size()?;
        Some(Vec2::new(
            self.position.x + size.x / 2.0 - bullet_width / 2.0,
            self.position.y,
        ))
    }
}

impl Hitbox for Ship {
    fn anchor(&self) -> Vec2 {
        self.position
    }

    fn hit_width(&self) -> Option<f32> {
        self.size().map(|s| s.x)
    }
}
