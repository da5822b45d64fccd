use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;

/// Level geometry is authored in pixels.
pub const PIXELS_PER_METER: f32 = 100.0;

pub struct PhysicsSetupPlugin; // our wrapper to configure Rapier for the sling world

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(PIXELS_PER_METER))
            .add_systems(Update, sync_gravity);
    }
}

/// Keep every Rapier context's gravity in line with the config (also covers hot reload).
fn sync_gravity(game_cfg: Res<GameConfig>, mut rapier_cfgs: Query<&mut RapierConfiguration>) {
    let gravity = Vect::new(0.0, game_cfg.gravity.y);
    for mut rapier_cfg in rapier_cfgs.iter_mut() {
        if rapier_cfg.gravity != gravity {
            rapier_cfg.gravity = gravity;
            info!(target: "physics", y = gravity.y, "gravity applied");
        }
    }
}
