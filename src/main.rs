use bevy::prelude::*;
use bevy::window::WindowResolution;
use deathstar::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use deathstar::rendering::RenderingPlugin;
use deathstar::simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Deathstar Run".into(),
                resolution: WindowResolution::new(ARENA_WIDTH as u32, ARENA_HEIGHT as u32),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // SimulationPlugin inserts GameConfig with compiled defaults and
        // overwrites it from assets/game.toml (if present) during Startup.
        .add_plugins(SimulationPlugin::default())
        .add_plugins(RenderingPlugin)
        .run();
}
