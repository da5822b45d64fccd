use super::state::DebugState;
use bevy::prelude::*;

/// F1 toggles the Rapier wireframe, F2 dumps the bird queue on the next log pass.
pub fn debug_key_input_system(keys: Option<Res<ButtonInput<KeyCode>>>, mut state: ResMut<DebugState>) {
    let Some(keys) = keys else {
        return;
    };
    if keys.just_pressed(KeyCode::F1) {
        state.rapier_wireframe = !state.rapier_wireframe;
        info!(target: "debug", enabled = state.rapier_wireframe, "rapier wireframe toggled");
    }
    if keys.just_pressed(KeyCode::F2) {
        state.dump_queue = true;
        // Force the next logging pass.
        state.time_accum = state.log_interval;
    }
}
