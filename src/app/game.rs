// This file is part of Sling Portfolio.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::core::level::LevelPlugin;
use crate::core::system::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use crate::debug::DebugPlugin;
use crate::gameplay::bird_queue::BirdQueuePlugin;
use crate::gameplay::damage::DamagePlugin;
use crate::gameplay::sling::SlingPlugin;
use crate::interaction::input::sling_drag::SlingDragPlugin;
use crate::interaction::navigation::NavigationPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::physics::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::hud::HudPlugin;
use crate::rendering::shapes::ShapeVisualsPlugin;
use crate::rendering::sling_band::SlingBandPlugin;

/// Outcome of config loading, kept so it can be logged once logging is up.
#[derive(Resource, Debug, Default, Clone)]
pub struct ConfigReport {
    pub used: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Game rules without windowing, rendering or the physics backend.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (PrePhysicsSet, PostPhysicsAdjustSet.after(PrePhysicsSet)),
        )
        .add_plugins((
            LevelPlugin,
            SlingPlugin,
            BirdQueuePlugin,
            SlingDragPlugin,
            DamagePlugin,
            NavigationPlugin,
        ));
    }
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConfigReport>()
            .add_plugins((
                CameraPlugin,
                PhysicsSetupPlugin,
                GameplayPlugin,
                ShapeVisualsPlugin,
                SlingBandPlugin,
                HudPlugin,
                DebugPlugin,
                ConfigHotReloadPlugin,
                AutoClosePlugin,
            ))
            .add_systems(Startup, log_config_report);
    }
}

fn log_config_report(report: Res<ConfigReport>, cfg: Res<crate::core::config::GameConfig>) {
    for e in &report.errors {
        warn!(target: "config", "config load issue: {e}");
    }
    for w in &report.warnings {
        warn!(target: "config", "config warning: {w}");
    }
    if report.used.is_empty() {
        info!(target: "config", "no config layers found; using defaults");
    } else {
        info!(target: "config", used = ?report.used, "config layers loaded");
    }
    info!(
        target: "config",
        birds = cfg.bird_queue.total_birds,
        structures = cfg.level.structures.len(),
        sections = cfg.level.portfolio_pigs.len(),
        gravity = cfg.gravity.y,
        "runtime summary"
    );
}
