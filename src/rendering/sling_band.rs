use bevy::prelude::*;

use crate::core::config::{color_or, GameConfig};
use crate::gameplay::sling::{LoadedBird, SlingState};

pub struct SlingBandPlugin;

impl Plugin for SlingBandPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (sync_band_width, draw_sling_band));
    }
}

fn sync_band_width(cfg: Res<GameConfig>, mut store: ResMut<GizmoConfigStore>) {
    if !cfg.is_changed() {
        return;
    }
    let (config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = cfg.sling.line.width.max(0.5);
}

/// Band from the anchor to the bird while one is loaded.
fn draw_sling_band(
    cfg: Res<GameConfig>,
    sling: Res<SlingState>,
    q: Query<&Transform, With<LoadedBird>>,
    mut gizmos: Gizmos,
) {
    let color = color_or(&cfg.sling.line.color, Color::srgb(0.7, 0.07, 0.07));
    for tf in q.iter() {
        gizmos.line_2d(sling.anchor, tf.translation.truncate(), color);
    }
}
