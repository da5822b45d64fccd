use bevy::prelude::*;

use crate::core::config::{color_or, GameConfig};
use crate::core::level::{LayoutSpace, WorldBounds};
use crate::core::system::system_order::SetupSet;
use crate::gameplay::factories;

/// Counts of what the level spawned at startup.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    pub structures: usize,
    pub pigs: usize,
    pub portfolio_pigs: usize,
    pub walls: usize,
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Startup,
            (SetupSet::Scenery, SetupSet::Queue, SetupSet::Load).chain(),
        )
        .add_systems(PreStartup, init_layout)
        .add_systems(Startup, spawn_level.in_set(SetupSet::Scenery))
        .add_systems(Update, sync_bounds_with_config);
    }
}

fn init_layout(mut commands: Commands, cfg: Res<GameConfig>) {
    commands.insert_resource(LayoutSpace::from_config(&cfg));
    commands.insert_resource(WorldBounds::from_config(&cfg));
}

/// Layout space is fixed once bodies exist; only the bounds slack follows the config.
fn sync_bounds_with_config(cfg: Res<GameConfig>, mut bounds: ResMut<WorldBounds>) {
    if !cfg.is_changed() {
        return;
    }
    let margin = cfg.damage.bounds_margin.max(0.0);
    if bounds.margin != margin {
        bounds.margin = margin;
    }
}

fn spawn_level(mut commands: Commands, cfg: Res<GameConfig>, layout: Res<LayoutSpace>) {
    let ground = &cfg.structures;
    commands.spawn(factories::sling_ground(
        layout.to_world(ground.sling_ground.center()),
        ground.sling_ground.size(),
        &cfg,
    ));
    commands.spawn(factories::target_ground(
        layout.to_world(ground.target_ground.center()),
        ground.target_ground.size(),
        &cfg,
    ));

    let level = &cfg.level;
    for s in &level.structures {
        commands.spawn(factories::structure(
            s.kind,
            layout.to_world(Vec2::new(s.x, s.y)),
            &cfg,
        ));
    }
    for p in &level.pigs {
        commands.spawn(factories::pig_of_size(
            p.size,
            layout.to_world(Vec2::new(p.x, p.y)),
            &cfg,
        ));
    }
    for spec in &level.portfolio_pigs {
        commands.spawn(factories::portfolio_pig(
            spec,
            layout.to_world(Vec2::new(spec.x, spec.y)),
            &cfg,
        ));
    }
    let wall_color = color_or(&cfg.colors.sling_ground, Color::srgb(0.4, 0.26, 0.13));
    for w in &level.walls {
        commands.spawn(factories::wall(layout.to_world(w.center()), w.size(), wall_color));
    }

    let summary = LevelSummary {
        structures: level.structures.len(),
        pigs: level.pigs.len(),
        portfolio_pigs: level.portfolio_pigs.len(),
        walls: level.walls.len(),
    };
    info!(
        target: "level",
        structures = summary.structures,
        pigs = summary.pigs,
        portfolio_pigs = summary.portfolio_pigs,
        walls = summary.walls,
        "level spawned"
    );
    commands.insert_resource(summary);
}
