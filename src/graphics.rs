//! Camera, image handles, sprite readiness and arena ↔ world coordinates.
//!
//! The session works in arena coordinates (origin top-left, +y down).  Bevy's
//! default 2D camera looks at the world origin with +y up, so every drawn
//! position goes through [`arena_to_world`].

use crate::config::GameConfig;
use crate::session::Session;
use crate::sprite::SpriteKind;
use bevy::asset::LoadState;
use bevy::prelude::*;
use std::collections::HashSet;

/// Handles of every image the game draws.
#[derive(Resource, Default)]
pub struct GameSprites {
    pub background: Handle<Image>,
    pub ship: Handle<Image>,
    pub asteroid: Handle<Image>,
    pub boss: Handle<Image>,
}

impl GameSprites {
    pub fn handle(&self, kind: SpriteKind) -> &Handle<Image> {
        match kind {
            SpriteKind::Ship => &self.ship,
            SpriteKind::Asteroid => &self.asteroid,
            SpriteKind::Boss => &self.boss,
        }
    }
}

/// Sprite kinds whose image failed to load and are drawn as plain rectangles.
#[derive(Resource, Default, Debug)]
pub struct SpriteFallbacks(pub HashSet<SpriteKind>);

/// Setup camera for 2D rendering and size the window to the arena.
pub fn setup_camera(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut windows: Query<&mut Window>,
) {
    commands.spawn(Camera2d);
    for mut window in windows.iter_mut() {
        window
            .resolution
            .set(config.arena_width, config.arena_height);
    }
    eprintln!("[SETUP] Camera spawned");
}

/// Start loading every game image.
pub fn load_game_sprites(mut sprites: ResMut<GameSprites>, asset_server: Res<AssetServer>) {
    *sprites = GameSprites {
        background: asset_server.load("img/bg.png"),
        ship: asset_server.load("img/ship.png"),
        asteroid: asset_server.load("img/asteroid.png"),
        boss: asset_server.load("img/boss.png"),
    };
    eprintln!("[SETUP] Game sprites requested");
}

/// Promote pending sprite kinds once their image has loaded or failed.
///
/// Loaded images give their pixel size to [`GameConfig::sprite_size`]; failed
/// images fall back to the configured size and are drawn as rectangles.  Images
/// still in flight are left pending for a later frame.
pub fn sprite_readiness_system(
    sprites: Res<GameSprites>,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut fallbacks: ResMut<SpriteFallbacks>,
    mut session: ResMut<Session>,
) {
    if session.is_over() {
        return;
    }
    for kind in SpriteKind::ALL {
        if session.sprite_state(kind).is_ready() {
            continue;
        }
        let handle = sprites.handle(kind);
        let size = match asset_server.load_state(handle) {
            LoadState::Loaded => match images.get(handle) {
                Some(image) => session.config().sprite_size(kind, image.size_f32()),
                None => continue,
            },
            LoadState::Failed(err) => {
                warn!("{kind:?} image unavailable ({err}); drawing a placeholder");
                fallbacks.0.insert(kind);
                session.config().fallback_size(kind)
            }
            _ => continue,
        };
        session.sprite_ready(kind, size);
    }
}

/// Convert an arena position (origin top-left, +y down) to a world position
/// (origin at the arena centre, +y up).
#[inline]
pub fn arena_to_world(position: Vec2, arena: Vec2) -> Vec2 {
    Vec2::new(position.x - arena.x / 2.0, arena.y / 2.0 - position.y)
}

/// World-space centre of a rectangle given by its arena top-left corner.
#[inline]
pub fn rect_center_world(top_left: Vec2, size: Vec2, arena: Vec2) -> Vec2 {
    arena_to_world(top_left + size / 2.0, arena)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn arena_corners_map_to_world_corners() {
        assert_eq!(arena_to_world(Vec2::ZERO, ARENA), Vec2::new(-640.0, 360.0));
        assert_eq!(arena_to_world(ARENA, ARENA), Vec2::new(640.0, -360.0));
        assert_eq!(arena_to_world(ARENA / 2.0, ARENA), Vec2::ZERO);
    }

    #[test]
    fn rect_centre_accounts_for_downward_y() {
        let c = rect_center_world(Vec2::new(0.0, 0.0), Vec2::new(10.0, 20.0), ARENA);
        assert_eq!(c, Vec2::new(-635.0, 350.0));
    }
}
