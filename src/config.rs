//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{require_nonzero, require_positive, GameError, GameResult};
use crate::sprite::SpriteKind;
use bevy::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Path of the optional config override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena ────────────────────────────────────────────────────────────────
    pub arena_width: f32,
    pub arena_height: f32,

    // ── Ship ─────────────────────────────────────────────────────────────────
    pub ship_step: f32,
    pub ship_sprite_scale: f32,
    pub ship_fallback_size: [f32; 2],

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub player_bullet_speed: f32,
    pub boss_bullet_speed: f32,

    // ── Ammo / countdown ─────────────────────────────────────────────────────
    pub ammo_budget: u32,
    pub countdown_secs: u32,
    pub countdown_tick_secs: f32,

    // ── Asteroids ────────────────────────────────────────────────────────────
    pub asteroid_count: usize,
    pub asteroid_radius: f32,
    pub asteroid_sprite_divisor: f32,
    pub asteroid_fallback_size: [f32; 2],
    pub asteroid_spawn_margin: f32,

    // ── Boss ─────────────────────────────────────────────────────────────────
    pub boss_max_hp: u32,
    pub boss_start_y: f32,
    pub boss_speed: f32,
    pub boss_sprite_scale: f32,
    pub boss_fallback_size: [f32; 2],
    pub boss_fire_threshold: u32,
    pub win_delay_secs: f32,

    /// Fixed seed for the asteroid field.  `None` draws a fresh layout each run.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Arena
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            // Ship
            ship_step: SHIP_STEP,
            ship_sprite_scale: SHIP_SPRITE_SCALE,
            ship_fallback_size: SHIP_FALLBACK_SIZE,
            // Bullets
            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            player_bullet_speed: PLAYER_BULLET_SPEED,
            boss_bullet_speed: BOSS_BULLET_SPEED,
            // Ammo / countdown
            ammo_budget: AMMO_BUDGET,
            countdown_secs: COUNTDOWN_SECS,
            countdown_tick_secs: COUNTDOWN_TICK_SECS,
            // Asteroids
            asteroid_count: ASTEROID_COUNT,
            asteroid_radius: ASTEROID_RADIUS,
            asteroid_sprite_divisor: ASTEROID_SPRITE_DIVISOR,
            asteroid_fallback_size: ASTEROID_FALLBACK_SIZE,
            asteroid_spawn_margin: ASTEROID_SPAWN_MARGIN,
            // Boss
            boss_max_hp: BOSS_MAX_HP,
            boss_start_y: BOSS_START_Y,
            boss_speed: BOSS_SPEED,
            boss_sprite_scale: BOSS_SPRITE_SCALE,
            boss_fallback_size: BOSS_FALLBACK_SIZE,
            boss_fire_threshold: BOSS_FIRE_THRESHOLD,
            win_delay_secs: WIN_DELAY_SECS,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Arena dimensions as a vector.
    #[inline]
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Display size of a sprite whose image is `image_size` pixels.
    pub fn sprite_size(&self, kind: SpriteKind, image_size: Vec2) -> Vec2 {
        match kind {
            SpriteKind::Ship => image_size * self.ship_sprite_scale,
            SpriteKind::Asteroid => image_size / self.asteroid_sprite_divisor,
            SpriteKind::Boss => image_size * self.boss_sprite_scale,
        }
    }

    /// Display size used when the image for `kind` could not be loaded.
    pub fn fallback_size(&self, kind: SpriteKind) -> Vec2 {
        let [w, h] = match kind {
            SpriteKind::Ship => self.ship_fallback_size,
            SpriteKind::Asteroid => self.asteroid_fallback_size,
            SpriteKind::Boss => self.boss_fallback_size,
        };
        Vec2::new(w, h)
    }

    /// Bullet rectangle size.
    #[inline]
    pub fn bullet_size(&self) -> Vec2 {
        Vec2::new(self.bullet_width, self.bullet_height)
    }

    /// Check that every value is inside the range the simulation supports.
    pub fn validate(&self) -> GameResult<()> {
        require_positive("arena_width", self.arena_width)?;
        require_positive("arena_height", self.arena_height)?;
        require_positive("ship_step", self.ship_step)?;
        require_positive("ship_sprite_scale", self.ship_sprite_scale)?;
        require_positive("bullet_width", self.bullet_width)?;
        require_positive("bullet_height", self.bullet_height)?;
        require_positive("boss_bullet_speed", self.boss_bullet_speed)?;
        require_positive("countdown_tick_secs", self.countdown_tick_secs)?;
        require_positive("asteroid_radius", self.asteroid_radius)?;
        require_positive("asteroid_sprite_divisor", self.asteroid_sprite_divisor)?;
        require_positive("boss_sprite_scale", self.boss_sprite_scale)?;
        require_nonzero("ammo_budget", self.ammo_budget)?;
        require_nonzero("countdown_secs", self.countdown_secs)?;
        require_nonzero("boss_max_hp", self.boss_max_hp)?;

        // Player bullets must travel upwards or they never leave the arena.
        if !(self.player_bullet_speed.is_finite() && self.player_bullet_speed < 0.0) {
            return Err(GameError::InvalidValue {
                name: "player_bullet_speed",
                value: self.player_bullet_speed.to_string(),
                expected: "a finite value < 0",
            });
        }
        if self.win_delay_secs < 0.0 || !self.win_delay_secs.is_finite() {
            return Err(GameError::InvalidValue {
                name: "win_delay_secs",
                value: self.win_delay_secs.to_string(),
                expected: "a finite value ≥ 0",
            });
        }
        if self.asteroid_count == 0 {
            return Err(GameError::InvalidValue {
                name: "asteroid_count",
                value: "0".into(),
                expected: "an integer ≥ 1",
            });
        }
        if 2.0 * self.asteroid_spawn_margin >= self.arena_width {
            return Err(GameError::InvalidValue {
                name: "asteroid_spawn_margin",
                value: self.asteroid_spawn_margin.to_string(),
                expected: "less than half the arena width",
            });
        }
        Ok(())
    }

    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(path: &str, contents: &str) -> GameResult<Self> {
        let config: GameConfig =
            toml::from_str(contents).map_err(|e| GameError::ConfigParse {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn from_file(path: impl AsRef<Path>) -> GameResult<Option<Self>> {
        let path = path.as_ref();
        let display = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&display, &contents).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GameError::ConfigRead {
                path: display,
                source,
            }),
        }
    }
}

/// Where [`load_game_config`] looks for overrides.  `None` keeps whatever
/// `GameConfig` resource is already present.
#[derive(Resource, Debug, Clone, Default)]
pub struct ConfigPath(pub Option<PathBuf>);

/// Startup system: attempt to load the configured TOML file and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Read, parse and validation
/// errors are logged but do not abort the game.  A missing file is silently
/// ignored (defaults are already in place from `init_resource`).
pub fn load_game_config(path: Res<ConfigPath>, mut config: ResMut<GameConfig>) {
    let Some(path) = path.0.as_deref() else {
        return;
    };
    match GameConfig::from_file(path) {
        Ok(Some(loaded)) => {
            *config = loaded;
            info!("Loaded game config from {}", path.display());
        }
        Ok(None) => {
            info!("No {} found; using compiled defaults", path.display());
        }
        Err(e) => {
            warn!("{e}; using defaults");
        }
    }
}
