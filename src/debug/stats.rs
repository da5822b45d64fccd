use super::state::{DebugState, DebugStats};
use crate::core::components::{Bird, Pig, PortfolioPig, Structure};
use crate::gameplay::damage::UnlockedSections;
use bevy::prelude::*;

pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    q_birds: Query<(), With<Bird>>,
    q_pigs: Query<Option<&PortfolioPig>, With<Pig>>,
    q_structures: Query<(), With<Structure>>,
    unlocked: Option<Res<UnlockedSections>>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    stats.fps = if stats.fps == 0.0 {
        inst_fps
    } else {
        stats.fps * 0.9 + inst_fps * 0.1
    };
    let inst_ms = dt * 1000.0;
    stats.frame_time_ms = if stats.frame_time_ms == 0.0 {
        inst_ms
    } else {
        stats.frame_time_ms * 0.9 + inst_ms * 0.1
    };
    stats.birds = q_birds.iter().count();
    stats.pigs = q_pigs.iter().count();
    stats.portfolio_pigs = q_pigs.iter().filter(|p| p.is_some()).count();
    stats.structures = q_structures.iter().count();
    stats.unlocked = unlocked.map(|u| u.len()).unwrap_or(0);
}
