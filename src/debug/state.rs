use bevy::prelude::*;

#[derive(Resource, Debug)]
pub struct DebugState {
    pub rapier_wireframe: bool,
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
    /// Set by the status key; consumed by the logging system.
    pub dump_queue: bool,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            rapier_wireframe: false,
            log_interval: 2.0,
            time_accum: 0.0,
            frame_counter: 0,
            dump_queue: false,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub birds: usize,
    pub pigs: usize,
    pub portfolio_pigs: usize,
    pub structures: usize,
    pub unlocked: usize,
}
