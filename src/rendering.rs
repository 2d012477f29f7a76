//! Rendering plugin: draws the session state with Bevy sprites and UI nodes.
//!
//! The session owns all game state; this module only mirrors it.  Each kind of
//! drawable keeps a pool of entities tagged with a marker component, resized
//! every frame to match the session's lists.
//!
//! ## Layer Model
//!
//! | Layer          | Technology | z   | Source                         |
//! |----------------|------------|-----|--------------------------------|
//! | Background     | `Sprite`   | 0   | `img/bg.png` over the arena    |
//! | Asteroids      | `Sprite`   | 1   | `Session::asteroids`           |
//! | Boss           | `Sprite`   | 2   | `Session::boss`                |
//! | Bullets        | `Sprite`   | 3   | white rectangles, both sides   |
//! | Ship           | `Sprite`   | 4   | `Session::ship`                |
//! | Ammo / time    | Bevy UI    | -   | top-left text                  |
//! | Boss bar       | Bevy UI    | -   | top centre, level 2 only       |
//! | Outcome banner | Bevy UI    | -   | centred, once the game is over |
//!
//! Images that failed to load are drawn as coloured rectangles of the
//! fallback size (see [`SpriteFallbacks`]).

use crate::config::{load_game_config, GameConfig};
use crate::constants::{
    BOSS_BAR_HEIGHT, BOSS_BAR_TOP, BOSS_BAR_WIDTH, HUD_FONT_SIZE, OUTCOME_FONT_SIZE,
};
use crate::graphics::{
    load_game_sprites, rect_center_world, setup_camera, sprite_readiness_system, GameSprites,
    SpriteFallbacks,
};
use crate::session::Session;
use crate::simulation::SimulationSet;
use crate::sprite::SpriteKind;
use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;

const Z_BACKGROUND: f32 = 0.0;
const Z_ASTEROID: f32 = 1.0;
const Z_BOSS: f32 = 2.0;
const Z_BULLET: f32 = 3.0;
const Z_SHIP: f32 = 4.0;

const BOSS_LABEL: &str = "DeathStar";

// ── Component markers ─────────────────────────────────────────────────────────

#[derive(Component)]
pub struct BackgroundSprite;

#[derive(Component)]
pub struct ShipSprite;

#[derive(Component)]
pub struct AsteroidSprite;

#[derive(Component)]
pub struct BossSprite;

#[derive(Component)]
pub struct PlayerBulletSprite;

#[derive(Component)]
pub struct BossBulletSprite;

/// Marker for the "Ammo: n/m" text.
#[derive(Component)]
pub struct AmmoText;

/// Marker for the "Time: ns" text.
#[derive(Component)]
pub struct TimeText;

/// Marker for the boss health bar root node.
#[derive(Component)]
pub struct BossBar;

/// Marker for the red fill inside the boss bar frame.
#[derive(Component)]
pub struct BossBarFill;

/// Marker for the "{hp}/{max}" text next to the boss bar.
#[derive(Component)]
pub struct BossHpText;

/// Marker for the full-screen outcome banner root node.
#[derive(Component)]
pub struct OutcomeBanner;

#[derive(Component)]
pub struct OutcomeText;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSprites>()
            .init_resource::<SpriteFallbacks>()
            .add_systems(
                Startup,
                (setup_camera, load_game_sprites, spawn_background, setup_hud)
                    .chain()
                    .after(load_game_config),
            )
            .add_systems(
                Update,
                sprite_readiness_system
                    .before(SimulationSet)
                    .run_if(resource_exists::<Session>),
            )
            .add_systems(
                Update,
                (
                    sync_ship_sprite_system,
                    sync_asteroid_sprites_system,
                    sync_boss_sprite_system,
                    sync_bullet_sprites_system,
                    hud_text_system,
                    boss_bar_system,
                    outcome_banner_system,
                )
                    .after(SimulationSet)
                    .run_if(resource_exists::<Session>),
            );
    }
}

// ── Labels ────────────────────────────────────────────────────────────────────

pub fn ammo_label(remaining: u32, budget: u32) -> String {
    format!("Ammo: {remaining}/{budget}")
}

pub fn time_label(seconds: u32) -> String {
    format!("Time: {seconds}s")
}

pub fn boss_hp_label(hp: u32, max_hp: u32) -> String {
    format!("{hp}/{max_hp}")
}

/// Width of the boss bar fill as a percentage of the frame.
pub fn boss_fill_percent(hp: u32, max_hp: u32) -> f32 {
    if max_hp == 0 {
        return 0.0;
    }
    (hp.min(max_hp) as f32 / max_hp as f32) * 100.0
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Stretch the background image over the whole arena.
pub fn spawn_background(
    mut commands: Commands,
    sprites: Res<GameSprites>,
    config: Res<GameConfig>,
) {
    commands.spawn((
        Sprite {
            image: sprites.background.clone(),
            custom_size: Some(config.arena()),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, Z_BACKGROUND),
        BackgroundSprite,
    ));
}

/// Spawn the ammo/time text, the boss bar (hidden) and the outcome banner (hidden).
pub fn setup_hud(mut commands: Commands, config: Res<GameConfig>) {
    let font_size = HUD_FONT_SIZE;

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(ammo_label(config.ammo_budget, config.ammo_budget)),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
                AmmoText,
            ));
            parent.spawn((
                Text::new(time_label(config.countdown_secs)),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
                TimeText,
            ));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(BOSS_BAR_TOP),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                column_gap: Val::Px(8.0),
                ..default()
            },
            BossBar,
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(BOSS_LABEL),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent
                .spawn((
                    Node {
                        width: Val::Px(BOSS_BAR_WIDTH),
                        height: Val::Px(BOSS_BAR_HEIGHT),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::BLACK),
                    BorderColor::all(Color::WHITE),
                ))
                .with_children(|frame| {
                    frame.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.85, 0.1, 0.1)),
                        BossBarFill,
                    ));
                });
            parent.spawn((
                Text::new(boss_hp_label(config.boss_max_hp, config.boss_max_hp)),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
                BossHpText,
            ));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            OutcomeBanner,
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: OUTCOME_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                OutcomeText,
            ));
        });

    eprintln!("[SETUP] HUD spawned");
}

// ── Update: sprite pools ──────────────────────────────────────────────────────

/// Resize a marker pool to `targets.len()` entities and move each one into place.
///
/// Surplus entities are despawned; missing ones are created by `spawn`.
fn sync_pool<F: QueryFilter>(
    commands: &mut Commands,
    pool: &mut Query<(Entity, &mut Transform), F>,
    targets: &[Transform],
    mut spawn: impl FnMut(&mut Commands, Transform),
) {
    let mut remaining = targets.iter();
    for (entity, mut transform) in pool.iter_mut() {
        match remaining.next() {
            Some(target) => *transform = *target,
            None => commands.entity(entity).despawn(),
        }
    }
    for target in remaining {
        spawn(commands, *target);
    }
}

/// Sprite for an image-backed kind, or a flat rectangle when its image failed.
fn kind_sprite(
    kind: SpriteKind,
    size: Vec2,
    sprites: &GameSprites,
    fallbacks: &SpriteFallbacks,
) -> Sprite {
    if fallbacks.0.contains(&kind) {
        let color = match kind {
            SpriteKind::Ship => Color::srgb(0.3, 0.6, 1.0),
            SpriteKind::Asteroid => Color::srgb(0.55, 0.5, 0.45),
            SpriteKind::Boss => Color::srgb(0.6, 0.6, 0.65),
        };
        Sprite::from_color(color, size)
    } else {
        Sprite {
            image: sprites.handle(kind).clone(),
            custom_size: Some(size),
            ..default()
        }
    }
}

fn placed(top_left: Vec2, size: Vec2, arena: Vec2, z: f32) -> Transform {
    Transform::from_translation(rect_center_world(top_left, size, arena).extend(z))
}

pub fn sync_ship_sprite_system(
    mut commands: Commands,
    session: Res<Session>,
    sprites: Res<GameSprites>,
    fallbacks: Res<SpriteFallbacks>,
    mut pool: Query<(Entity, &mut Transform), With<ShipSprite>>,
) {
    let arena = session.config().arena();
    let ship = &session.ship;
    let Some(size) = ship.size() else {
        return;
    };
    let targets = [placed(ship.position, size, arena, Z_SHIP)];
    sync_pool(&mut commands, &mut pool, &targets, |commands, transform| {
        commands.spawn((
            kind_sprite(SpriteKind::Ship, size, &sprites, &fallbacks),
            transform,
            ShipSprite,
        ));
    });
}

pub fn sync_asteroid_sprites_system(
    mut commands: Commands,
    session: Res<Session>,
    sprites: Res<GameSprites>,
    fallbacks: Res<SpriteFallbacks>,
    mut pool: Query<(Entity, &mut Transform), With<AsteroidSprite>>,
) {
    let arena = session.config().arena();
    let Some(size) = session.sprite_state(SpriteKind::Asteroid).size() else {
        return;
    };
    // Asteroid positions are centres; the sprite is drawn around them.
    let targets: Vec<Transform> = session
        .asteroids
        .iter()
        .filter(|a| a.sprite.is_ready())
        .map(|a| placed(a.position - size / 2.0, size, arena, Z_ASTEROID))
        .collect();
    sync_pool(&mut commands, &mut pool, &targets, |commands, transform| {
        commands.spawn((
            kind_sprite(SpriteKind::Asteroid, size, &sprites, &fallbacks),
            transform,
            AsteroidSprite,
        ));
    });
}

pub fn sync_boss_sprite_system(
    mut commands: Commands,
    session: Res<Session>,
    sprites: Res<GameSprites>,
    fallbacks: Res<SpriteFallbacks>,
    mut pool: Query<(Entity, &mut Transform), With<BossSprite>>,
) {
    let arena = session.config().arena();
    let drawn = session
        .boss
        .as_ref()
        .filter(|boss| boss.is_alive())
        .and_then(|boss| boss.sprite.size().map(|size| (boss.position, size)));
    let targets: Vec<Transform> = drawn
        .iter()
        .map(|(position, size)| placed(*position - *size / 2.0, *size, arena, Z_BOSS))
        .collect();
    let size = drawn.map(|(_, size)| size).unwrap_or_default();
    sync_pool(&mut commands, &mut pool, &targets, |commands, transform| {
        commands.spawn((
            kind_sprite(SpriteKind::Boss, size, &sprites, &fallbacks),
            transform,
            BossSprite,
        ));
    });
}

pub fn sync_bullet_sprites_system(
    mut commands: Commands,
    session: Res<Session>,
    mut player_pool: Query<
        (Entity, &mut Transform),
        (With<PlayerBulletSprite>, Without<BossBulletSprite>),
    >,
    mut boss_pool: Query<
        (Entity, &mut Transform),
        (With<BossBulletSprite>, Without<PlayerBulletSprite>),
    >,
) {
    let arena = session.config().arena();
    let size = session.config().bullet_size();

    let player: Vec<Transform> = session
        .bullets
        .iter()
        .map(|b| placed(b.position, b.size, arena, Z_BULLET))
        .collect();
    let boss: Vec<Transform> = session
        .boss_bullets
        .iter()
        .map(|b| placed(b.position, b.size, arena, Z_BULLET))
        .collect();

    sync_pool(&mut commands, &mut player_pool, &player, |commands, transform| {
        commands.spawn((
            Sprite::from_color(Color::WHITE, size),
            transform,
            PlayerBulletSprite,
        ));
    });
    sync_pool(&mut commands, &mut boss_pool, &boss, |commands, transform| {
        commands.spawn((
            Sprite::from_color(Color::WHITE, size),
            transform,
            BossBulletSprite,
        ));
    });
}

// ── Update: HUD ───────────────────────────────────────────────────────────────

pub fn hud_text_system(
    session: Res<Session>,
    mut ammo_query: Query<&mut Text, (With<AmmoText>, Without<TimeText>)>,
    mut time_query: Query<&mut Text, (With<TimeText>, Without<AmmoText>)>,
) {
    if !session.is_changed() {
        return;
    }
    for mut text in ammo_query.iter_mut() {
        *text = Text::new(ammo_label(session.ammo_remaining(), session.ammo_budget()));
    }
    for mut text in time_query.iter_mut() {
        *text = Text::new(time_label(session.time_left()));
    }
}

/// Show the boss bar while a boss exists and keep its fill and numbers current.
pub fn boss_bar_system(
    session: Res<Session>,
    mut bar_query: Query<&mut Visibility, With<BossBar>>,
    mut fill_query: Query<&mut Node, With<BossBarFill>>,
    mut hp_query: Query<&mut Text, With<BossHpText>>,
) {
    if !session.is_changed() {
        return;
    }
    let health = session.boss_health();
    let vis = if health.is_some() {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut v in bar_query.iter_mut() {
        *v = vis;
    }
    let Some((hp, max_hp)) = health else {
        return;
    };
    for mut node in fill_query.iter_mut() {
        node.width = Val::Percent(boss_fill_percent(hp, max_hp));
    }
    for mut text in hp_query.iter_mut() {
        *text = Text::new(boss_hp_label(hp, max_hp));
    }
}

pub fn outcome_banner_system(
    session: Res<Session>,
    mut banner_query: Query<&mut Visibility, With<OutcomeBanner>>,
    mut text_query: Query<&mut Text, With<OutcomeText>>,
) {
    let Some(message) = session.outcome_text() else {
        return;
    };
    for mut v in banner_query.iter_mut() {
        *v = Visibility::Visible;
    }
    for mut text in text_query.iter_mut() {
        if text.0 != message {
            *text = Text::new(message);
        }
    }
}
