//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::GameConfig::default`] mirrors every
//! value below; `assets/game.toml` can override any subset at startup.
//!
//! All distances are in arena units (origin top-left, +y down) and all speeds
//! are per simulated frame unless stated otherwise.

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Width of the playing field.
pub const ARENA_WIDTH: f32 = 1280.0;

/// Height of the playing field.
pub const ARENA_HEIGHT: f32 = 720.0;

// ── Ship ──────────────────────────────────────────────────────────────────────

/// Horizontal distance the ship moves per frame while an arrow key is held.
pub const SHIP_STEP: f32 = 5.0;

/// Sprite scale applied to the ship image to derive its size.
pub const SHIP_SPRITE_SCALE: f32 = 0.07;

/// Ship size used when the ship image fails to load.
pub const SHIP_FALLBACK_SIZE: [f32; 2] = [60.0, 60.0];

// ── Bullets ───────────────────────────────────────────────────────────────────

/// Bullet rectangle width.
pub const BULLET_WIDTH: f32 = 5.0;

/// Bullet rectangle height.
pub const BULLET_HEIGHT: f32 = 15.0;

/// Vertical speed of a player bullet (negative = towards the top edge).
pub const PLAYER_BULLET_SPEED: f32 = -10.0;

/// Vertical speed of a boss bullet (positive = towards the bottom edge).
pub const BOSS_BULLET_SPEED: f32 = 5.0;

// ── Ammo / countdown ──────────────────────────────────────────────────────────

/// Total shots available per level.  Reset only on the level 1 → 2 transition.
pub const AMMO_BUDGET: u32 = 10;

/// Seconds on the countdown when the session starts.
pub const COUNTDOWN_SECS: u32 = 60;

/// Real-time interval between countdown ticks.
pub const COUNTDOWN_TICK_SECS: f32 = 1.0;

// ── Asteroids ─────────────────────────────────────────────────────────────────

/// Number of asteroids in the level 1 field.
pub const ASTEROID_COUNT: usize = 5;

/// Collision radius of an asteroid.  Collision width is twice this value.
pub const ASTEROID_RADIUS: f32 = 60.0;

/// Asteroid image dimensions are divided by this to get the visual size.
pub const ASTEROID_SPRITE_DIVISOR: f32 = 15.0;

/// Asteroid visual size used when the asteroid image fails to load.
pub const ASTEROID_FALLBACK_SIZE: [f32; 2] = [80.0, 80.0];

/// Horizontal margin kept clear of asteroid centres on both sides.
pub const ASTEROID_SPAWN_MARGIN: f32 = 20.0;

// ── Boss ──────────────────────────────────────────────────────────────────────

/// Hit points the boss spawns with.
pub const BOSS_MAX_HP: u32 = 4;

/// Vertical position of the boss centre.
pub const BOSS_START_Y: f32 = 150.0;

/// Initial horizontal speed of the boss.
pub const BOSS_SPEED: f32 = 2.0;

/// Sprite scale applied to the boss image to derive its size.
pub const BOSS_SPRITE_SCALE: f32 = 0.5;

/// Boss size used when the boss image fails to load.
pub const BOSS_FALLBACK_SIZE: [f32; 2] = [200.0, 200.0];

/// The boss fires once its cooldown counter exceeds this many frames.
pub const BOSS_FIRE_THRESHOLD: u32 = 120;

/// Delay between the fatal hit on the boss and the win being declared.
pub const WIN_DELAY_SECS: f32 = 0.1;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Width of the boss health bar.
pub const BOSS_BAR_WIDTH: f32 = 200.0;

/// Height of the boss health bar.
pub const BOSS_BAR_HEIGHT: f32 = 20.0;

/// Distance from the top edge to the boss health bar.
pub const BOSS_BAR_TOP: f32 = 20.0;

/// Font size of the HUD labels and boss bar text.
pub const HUD_FONT_SIZE: f32 = 20.0;

/// Font size of the final "YOU WIN" / "YOU LOSE" banner.
pub const OUTCOME_FONT_SIZE: f32 = 72.0;
