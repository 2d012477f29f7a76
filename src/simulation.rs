//! Simulation plugin: schedules the session's frame loop and timers on Bevy.
//!
//! ## Systems
//!
//! | System                 | Schedule | Purpose                                        |
//! |------------------------|----------|------------------------------------------------|
//! | `load_game_config`     | Startup  | Apply `assets/game.toml` overrides             |
//! | `start_session`        | Startup  | Build the `Session` and the countdown clock    |
//! | `read_controls_system` | Update   | Arrow keys / Space → `Controls`                |
//! | `frame_system`         | Update   | One `Session::step_frame` per rendered frame   |
//! | `deferred_win_system`  | Update   | Advance the delayed win by the frame delta     |
//! | `countdown_system`     | Update   | One `Session::tick_countdown` per elapsed tick |
//!
//! The Update systems are chained in the order above and all live in
//! [`SimulationSet`].  They stop running as soon as the session has an
//! outcome, which is how the loop "stops scheduling itself".

use crate::config::{load_game_config, ConfigPath, GameConfig, CONFIG_PATH};
use crate::input::Action;
use crate::session::{FrameStatus, Session, TickStatus};
use bevy::prelude::*;
use std::path::PathBuf;

/// Keyboard bindings for the three game actions.
pub const KEY_BINDINGS: [(Action, KeyCode); 3] = [
    (Action::Left, KeyCode::ArrowLeft),
    (Action::Right, KeyCode::ArrowRight),
    (Action::Fire, KeyCode::Space),
];

/// Label for every system that mutates the [`Session`] during `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationSet;

/// Repeating one-second clock driving [`Session::tick_countdown`].
#[derive(Resource, Debug, Clone)]
pub struct CountdownClock(pub Timer);

pub struct SimulationPlugin {
    /// Config override file.  `None` uses the `GameConfig` resource as inserted.
    pub config_path: Option<PathBuf>,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            config_path: Some(PathBuf::from(CONFIG_PATH)),
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .insert_resource(ConfigPath(self.config_path.clone()))
            .add_systems(Startup, (load_game_config, start_session).chain())
            .add_systems(
                Update,
                (
                    read_controls_system,
                    frame_system,
                    deferred_win_system,
                    countdown_system,
                )
                    .chain()
                    .in_set(SimulationSet)
                    .run_if(session_running),
            );
    }
}

/// Run condition: a session exists and has no outcome yet.
pub fn session_running(session: Option<Res<Session>>) -> bool {
    session.is_some_and(|s| !s.is_over())
}

/// Startup system: build the session from the (possibly overridden) config.
pub fn start_session(mut commands: Commands, config: Res<GameConfig>) {
    let session = Session::from_config(&config);
    info!(
        "Session started: {} asteroids, {} shots, {}s on the clock",
        session.asteroids.len(),
        session.ammo_budget(),
        session.time_left()
    );
    commands.insert_resource(session);
    commands.insert_resource(CountdownClock(Timer::from_seconds(
        config.countdown_tick_secs,
        TimerMode::Repeating,
    )));
}

/// Reconcile the keyboard state with the session's debounced controls.
pub fn read_controls_system(keys: Res<ButtonInput<KeyCode>>, mut session: ResMut<Session>) {
    for (action, key) in KEY_BINDINGS {
        if let Some(event) = session.controls.sync(action, keys.pressed(key)) {
            debug!("[input] {event:?}");
        }
    }
}

pub fn frame_system(mut session: ResMut<Session>) {
    if session.step_frame() == FrameStatus::Stopped {
        info!(
            "Frame loop stopped after {} frames: {}",
            session.frames(),
            session.outcome_text().unwrap_or_default()
        );
    }
}

pub fn deferred_win_system(time: Res<Time>, mut session: ResMut<Session>) {
    if session.pending_win().is_some() {
        session.advance_deferred(time.delta_secs());
    }
}

pub fn countdown_system(
    time: Res<Time>,
    mut clock: ResMut<CountdownClock>,
    mut session: ResMut<Session>,
) {
    clock.0.tick(time.delta());
    for _ in 0..clock.0.times_finished_this_tick() {
        if session.tick_countdown() == TickStatus::Stopped {
            clock.0.pause();
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::SpriteKind;

    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.insert_resource(GameConfig {
            rng_seed: Some(5),
            ..Default::default()
        });
        app.add_plugins(SimulationPlugin { config_path: None });
        app
    }

    #[test]
    fn startup_creates_session_from_inserted_config() {
        let mut app = build_test_app();
        app.update();
        let session = app.world().resource::<Session>();
        assert_eq!(session.asteroids.len(), 5);
        assert_eq!(session.ammo_remaining(), 10);
        assert_eq!(session.time_left(), 60);
        assert!(app.world().contains_resource::<CountdownClock>());
    }

    #[test]
    fn held_space_fires_a_single_shot() {
        let mut app = build_test_app();
        app.update();
        app.world_mut()
            .resource_mut::<Session>()
            .sprite_ready(SpriteKind::Ship, Vec2::new(40.0, 30.0));

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        for _ in 0..5 {
            app.update();
        }
        let session = app.world().resource::<Session>();
        assert_eq!(session.ammo_remaining(), 9);
    }

    #[test]
    fn arrow_keys_move_the_ship() {
        let mut app = build_test_app();
        app.update();
        app.world_mut()
            .resource_mut::<Session>()
            .sprite_ready(SpriteKind::Ship, Vec2::new(40.0, 30.0));
        let start = app.world().resource::<Session>().ship.position.x;

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowLeft);
        for _ in 0..3 {
            app.update();
        }
        let x = app.world().resource::<Session>().ship.position.x;
        assert_eq!(x, start - 15.0);
    }

    #[test]
    fn frame_systems_stop_once_the_session_is_over() {
        let mut app = build_test_app();
        app.update();
        {
            let mut session = app.world_mut().resource_mut::<Session>();
            for _ in 0..60 {
                session.tick_countdown();
            }
            assert!(session.is_over());
        }
        let frames = app.world().resource::<Session>().frames();
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(app.world().resource::<Session>().frames(), frames);
    }
}
