//! The level 2 boss.
//!
//! ## Per-frame behaviour ([`Boss::update`])
//!
//! | Facet    | Rule                                                                 |
//! |----------|----------------------------------------------------------------------|
//! | Motion   | `x += vx`; if `x < 0` or `x > arena_width`, `vx = −vx` (no clamping) |
//! | Shooting | `cooldown += 1`; when `cooldown > fire_threshold`, fire and reset    |
//!
//! The bound check is intentionally loose: the centre may overshoot an edge by
//! up to one step before the velocity flips.
//!
//! Damage is applied by the session through [`Boss::apply_hit`].  HP never
//! goes below zero and a defeated boss no longer takes hits.

use crate::bullet::Bullet;
use crate::collision::Hitbox;
use crate::sprite::SpriteState;
use bevy::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    /// Centre in arena coordinates.
    pub position: Vec2,
    pub velocity: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    /// Frames since the last shot.
    pub cooldown: u32,
    pub sprite: SpriteState,
}

/// Parameters the boss needs from the game config each frame.
#[derive(Debug, Clone, Copy)]
pub struct BossRules {
    pub arena_width: f32,
    pub fire_threshold: u32,
    pub bullet_size: Vec2,
    pub bullet_speed: f32,
}

impl Boss {
    pub fn new(position: Vec2, speed: f32, max_hp: u32) -> Self {
        Self {
            position,
            velocity: Vec2::new(speed, 0.0),
            hp: max_hp,
            max_hp,
            cooldown: 0,
            sprite: SpriteState::Pending,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Advance one frame.  Returns the bullet fired this frame, if any.
    pub fn update(&mut self, rules: &BossRules) -> Option<Bullet> {
        self.position.x += self.velocity.x;
        if self.position.x < 0.0 || self.position.x > rules.arena_width {
            self.velocity.x = -self.velocity.x;
        }

        self.cooldown += 1;
        if self.cooldown > rules.fire_threshold {
            self.cooldown = 0;
            return Some(self.shoot(rules));
        }
        None
    }

    /// Bullet spawned at the boss's horizontal centre, level with its lower edge.
    fn shoot(&self, rules: &BossRules) -> Bullet {
        let half_height = self.sprite.size().map_or(0.0, |s| s.y / 2.0);
        Bullet::new(
            Vec2::new(
                self.position.x - rules.bullet_size.x / 2.0,
                self.position.y + half_height,
            ),
            rules.bullet_size,
            rules.bullet_speed,
        )
    }

    /// Take one point of damage.  Returns `true` if this hit brought HP to zero.
    pub fn apply_hit(&mut self) -> bool {
        if self.hp == 0 {
            return false;
        }
        self.hp -= 1;
        self.hp == 0
    }
}

impl Hitbox for Boss {
    fn anchor(&self) -> Vec2 {
        self.position
    }

    fn hit_width(&self) -> Option<f32> {
        self.sprite.size().map(|s| s.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> BossRules {
        BossRules {
            arena_width: 1280.0,
            fire_threshold: 120,
            bullet_size: Vec2::new(5.0, 15.0),
            bullet_speed: 5.0,
        }
    }

    fn boss() -> Boss {
        Boss::new(Vec2::new(640.0, 150.0), 2.0, 4)
    }

    #[test]
    fn moves_horizontally_by_velocity() {
        let mut b = boss();
        b.update(&rules());
        assert_eq!(b.position, Vec2::new(642.0, 150.0));
    }

    #[test]
    fn bounces_after_crossing_right_edge() {
        let mut b = boss();
        b.position.x = 1279.0;
        b.update(&rules());
        assert_eq!(b.position.x, 1281.0, "overshoot is not clamped");
        assert_eq!(b.velocity.x, -2.0);
        b.update(&rules());
        assert_eq!(b.position.x, 1279.0);
        assert_eq!(b.velocity.x, -2.0, "back inside, no second flip");
    }

    #[test]
    fn bounces_after_crossing_left_edge() {
        let mut b = boss();
        b.position.x = 1.0;
        b.velocity.x = -2.0;
        b.update(&rules());
        assert_eq!(b.velocity.x, 2.0);
    }

    #[test]
    fn fires_once_cooldown_exceeds_threshold() {
        let mut b = boss();
        b.sprite = SpriteState::Ready {
            size: Vec2::new(200.0, 100.0),
        };
        for frame in 1..=120 {
            assert!(b.update(&rules()).is_none(), "fired early at frame {frame}");
        }
        let shot = b.update(&rules()).expect("fires on frame 121");
        assert_eq!(b.cooldown, 0);
        assert_eq!(shot.velocity, Vec2::new(0.0, 5.0));
        assert_eq!(shot.position.x, b.position.x - 2.5);
        assert_eq!(shot.position.y, 200.0);
    }

    #[test]
    fn hp_is_clamped_at_zero() {
        let mut b = boss();
        assert!(!b.apply_hit());
        assert!(!b.apply_hit());
        assert!(!b.apply_hit());
        assert!(b.apply_hit(), "fourth hit defeats");
        assert!(!b.apply_hit(), "already defeated");
        assert_eq!(b.hp, 0);
        assert!(!b.is_alive());
    }

    #[test]
    fn pending_boss_cannot_be_hit() {
        assert!(boss().hit_width().is_none());
    }
}
