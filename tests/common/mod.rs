#![allow(dead_code)]
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use sling_portfolio::physics::rapier_physics::PhysicsSetupPlugin;
use sling_portfolio::{GameConfig, GameplayPlugin};

/// Headless app running the game rules with a fixed 100 ms step.
pub fn gameplay_app(cfg: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .insert_resource(cfg)
        .add_plugins(GameplayPlugin);
    app.update();
    app
}

pub fn run_secs(app: &mut App, secs: f32) {
    let frames = (secs / 0.1).ceil() as usize + 1;
    for _ in 0..frames {
        app.update();
    }
}

pub fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<C>>()
        .iter(app.world())
        .count()
}

/// Like [`gameplay_app`] but with Rapier stepping the world at ~60 Hz.
pub fn physics_app(cfg: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        AssetPlugin::default(),
        bevy::scene::ScenePlugin,
    ))
    .init_asset::<Mesh>()
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
    .insert_resource(cfg)
    .add_plugins((PhysicsSetupPlugin, GameplayPlugin));
    app.update();
    app
}
