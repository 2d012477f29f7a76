//! Headless tests for the full simulation plugin.
//!
//! These tests use [`MinimalPlugins`] with no window, no rendering and no asset
//! server, so sprite readiness is reported by hand through
//! [`Session::sprite_ready`].
//!
//! Covered scenarios:
//! 1. The countdown ends the game with a loss after 60 seconds of play.
//! 2. Shooting the only asteroid moves the session to the boss fight.
//! 3. The HUD-facing accessors report the boss once level 2 starts.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use deathstar::asteroid::Asteroid;
use deathstar::config::GameConfig;
use deathstar::session::{Level, LossReason, Outcome, Session};
use deathstar::simulation::SimulationPlugin;
use deathstar::sprite::SpriteKind;
use std::time::Duration;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a headless app whose clock advances a fixed quarter second per update.
fn headless_app(config: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.init_resource::<ButtonInput<KeyCode>>();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
        250,
    )));
    app.insert_resource(config);
    app.add_plugins(SimulationPlugin { config_path: None });
    app.update(); // Startup inserts the session
    app
}

fn seeded_config() -> GameConfig {
    GameConfig {
        rng_seed: Some(11),
        ..Default::default()
    }
}

fn session(app: &App) -> &Session {
    app.world().resource::<Session>()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// With nothing happening on screen the clock alone decides the game.
#[test]
fn countdown_runs_out_into_a_loss() {
    let mut app = headless_app(seeded_config());

    for _ in 0..100 {
        app.update();
    }
    let left = session(&app).time_left();
    assert!(
        (34..=36).contains(&left),
        "25 s of play should leave about 35 s, got {left}"
    );
    assert!(session(&app).outcome().is_none());

    for _ in 0..200 {
        app.update();
        if session(&app).is_over() {
            break;
        }
    }
    let s = session(&app);
    assert_eq!(s.time_left(), 0);
    assert_eq!(s.outcome(), Some(Outcome::Lose));
    assert_eq!(s.loss_reason(), Some(LossReason::TimeUp));
    assert_eq!(s.outcome_text(), Some("YOU LOSE"));
}

/// One asteroid straight above the ship: a single shot clears level 1.
#[test]
fn clearing_the_field_starts_the_boss_fight() {
    let config = seeded_config();
    let mut app = headless_app(config.clone());
    {
        let mut s = app.world_mut().resource_mut::<Session>();
        *s = Session::with_field(
            &config,
            vec![Asteroid::new(Vec2::new(640.0, 400.0), config.asteroid_radius)],
        );
        s.sprite_ready(SpriteKind::Ship, Vec2::new(40.0, 30.0));
        s.sprite_ready(SpriteKind::Asteroid, Vec2::new(80.0, 80.0));
    }

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Space);
    for _ in 0..40 {
        app.update();
        if session(&app).level() == Level::BossFight {
            break;
        }
    }

    let s = session(&app);
    assert_eq!(s.level(), Level::BossFight);
    assert!(s.asteroids.is_empty());
    assert!(s.outcome().is_none());
    // Shots reset for the boss fight.
    assert_eq!(s.ammo_remaining(), config.ammo_budget);
    assert_eq!(s.boss_health(), Some((config.boss_max_hp, config.boss_max_hp)));
}

/// Before level 2 there is no boss to report.
#[test]
fn boss_health_is_absent_during_the_asteroid_field() {
    let app = headless_app(seeded_config());
    let s = session(&app);
    assert_eq!(s.level(), Level::AsteroidField);
    assert_eq!(s.boss_health(), None);
    assert_eq!(s.asteroids.len(), 5);
}
