use super::state::{DebugState, DebugStats};
use crate::gameplay::bird_queue::BirdQueue;
use crate::gameplay::sling::SlingState;
use bevy::prelude::*;

pub fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    stats: Res<DebugStats>,
    sling: Option<Res<SlingState>>,
    queue: Option<Res<BirdQueue>>,
) {
    if state.dump_queue {
        state.dump_queue = false;
        if let Some(queue) = queue.as_deref() {
            for s in queue.status() {
                info!(
                    target: "debug",
                    index = s.index,
                    active = s.is_active,
                    used = s.is_used,
                    "bird status"
                );
            }
        }
    }
    state.time_accum += time.delta_secs();
    if state.time_accum < state.log_interval {
        return;
    }
    state.time_accum = 0.0;
    let phase = sling.map(|s| format!("{:?}", s.phase)).unwrap_or_default();
    let remaining = queue.map(|q| q.remaining()).unwrap_or(0);
    info!(
        target: "debug",
        "SIM frame={} t={:.3}s fps={:.1} ft_ms={:.1} birds={} left={} pigs={} portfolio={} structures={} unlocked={} phase={}",
        state.frame_counter,
        time.elapsed_secs(),
        stats.fps,
        stats.frame_time_ms,
        stats.birds,
        remaining,
        stats.pigs,
        stats.portfolio_pigs,
        stats.structures,
        stats.unlocked,
        phase
    );
}
