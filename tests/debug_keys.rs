#![cfg(feature = "debug")]

use bevy::prelude::*;
use sling_portfolio::debug::keys::debug_key_input_system;
use sling_portfolio::debug::DebugState;

#[test]
fn f1_toggles_wireframe_and_f2_requests_queue_dump() {
    let mut app = App::new();
    app.init_resource::<DebugState>()
        .init_resource::<ButtonInput<KeyCode>>()
        .add_systems(Update, debug_key_input_system);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::F1);
    app.update();
    assert!(app.world().resource::<DebugState>().rapier_wireframe);

    {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.reset_all();
        keys.press(KeyCode::F2);
    }
    app.update();
    let state = app.world().resource::<DebugState>();
    assert!(state.rapier_wireframe);
    assert!(state.dump_queue);
    assert_eq!(state.time_accum, state.log_interval);
}
