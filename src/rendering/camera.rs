use bevy::prelude::*;

use crate::core::config::{color_or, GameConfig};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, sync_clear_color);
    }
}

fn setup_camera(mut commands: Commands, cfg: Res<GameConfig>) {
    // Bevy 0.16+: spawn Camera2d component directly; Required Components supply defaults.
    commands.spawn(Camera2d);
    commands.insert_resource(ClearColor(background(&cfg)));
}

fn background(cfg: &GameConfig) -> Color {
    color_or(&cfg.colors.background, Color::srgb(0.53, 0.81, 0.92))
}

fn sync_clear_color(cfg: Res<GameConfig>, mut clear: ResMut<ClearColor>) {
    if !cfg.is_changed() {
        return;
    }
    let color = background(&cfg);
    if clear.0 != color {
        clear.0 = color;
    }
}
