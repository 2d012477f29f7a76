//! Sprite readiness lifecycle.
//!
//! Entities whose size depends on an image start out [`SpriteState::Pending`].
//! Once the host reports the image dimensions (or that the image failed to
//! load and a fallback size applies) the entity becomes
//! [`SpriteState::Ready`].  Pending entities are not drawn and never collide.

use bevy::prelude::*;

/// Two-state lifecycle of an image-backed entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SpriteState {
    /// Image still loading; size unknown.
    #[default]
    Pending,
    /// Image available (or substituted); the entity has a definite size.
    Ready {
        /// Display and collision size.
        size: Vec2,
    },
}

impl SpriteState {
    /// Size of a ready sprite.
    #[inline]
    pub fn size(&self) -> Option<Vec2> {
        match self {
            SpriteState::Pending => None,
            SpriteState::Ready { size } => Some(*size),
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, SpriteState::Ready { .. })
    }
}

/// Which image an entity is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Ship,
    Asteroid,
    Boss,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 3] = [SpriteKind::Ship, SpriteKind::Asteroid, SpriteKind::Boss];
}

/// Final display sizes learned so far, per sprite kind.
///
/// Kept so that entities created after their image finished loading (the boss)
/// start out ready.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpriteCatalog {
    ship: Option<Vec2>,
    asteroid: Option<Vec2>,
    boss: Option<Vec2>,
}

impl SpriteCatalog {
    pub fn get(&self, kind: SpriteKind) -> Option<Vec2> {
        match kind {
            SpriteKind::Ship => self.ship,
            SpriteKind::Asteroid => self.asteroid,
            SpriteKind::Boss => self.boss,
        }
    }

    pub fn set(&mut self, kind: SpriteKind, size: Vec2) {
        let slot = match kind {
            SpriteKind::Ship => &mut self.ship,
            SpriteKind::Asteroid => &mut self.asteroid,
            SpriteKind::Boss => &mut self.boss,
        };
        *slot = Some(size);
    }

    /// State a newly created entity of `kind` should start in.
    pub fn state_for(&self, kind: SpriteKind) -> SpriteState {
        match self.get(kind) {
            Some(size) => SpriteState::Ready { size },
            None => SpriteState::Pending,
        }
    }
}
