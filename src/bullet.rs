//! Bullets fired by the ship and by the boss.
//!
//! A bullet has no owner field: player bullets live in
//! `Session::bullets` and move up, boss bullets live in
//! `Session::boss_bullets` and move down.

use crate::collision::Hitbox;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    /// Top-left corner in arena coordinates.
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
}

impl Bullet {
    pub fn new(position: Vec2, size: Vec2, velocity_y: f32) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::new(0.0, velocity_y),
        }
    }

    /// Advance by one frame of velocity.
    #[inline]
    pub fn update(&mut self) {
        self.position += self.velocity;
    }

    /// Entirely above the top edge.
    #[inline]
    pub fn exited_top(&self) -> bool {
        self.position.y + self.size.y < 0.0
    }

    /// Top edge below the bottom of the arena.
    #[inline]
    pub fn exited_bottom(&self, arena_height: f32) -> bool {
        self.position.y > arena_height
    }
}

impl Hitbox for Bullet {
    fn anchor(&self) -> Vec2 {
        self.position
    }

    fn hit_width(&self) -> Option<f32> {
        Some(self.size.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(5.0, 15.0);

    #[test]
    fn update_moves_by_velocity() {
        let mut b = Bullet::new(Vec2::new(10.0, 100.0), SIZE, -10.0);
        b.update();
        b.update();
        assert_eq!(b.position, Vec2::new(10.0, 80.0));
    }

    #[test]
    fn top_exit_waits_for_the_whole_bullet() {
        let mut b = Bullet::new(Vec2::new(0.0, -15.0), SIZE, -10.0);
        assert!(!b.exited_top(), "bottom edge still at y=0");
        b.position.y = -15.5;
        assert!(b.exited_top());
    }

    #[test]
    fn bottom_exit_uses_top_edge() {
        let b = Bullet::new(Vec2::new(0.0, 720.0), SIZE, 5.0);
        assert!(!b.exited_bottom(720.0));
        let b = Bullet::new(Vec2::new(0.0, 721.0), SIZE, 5.0);
        assert!(b.exited_bottom(720.0));
    }
}
