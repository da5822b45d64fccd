use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::Bird;
use crate::core::config::{color_or, BirdQueueConfig, GameConfig};
use crate::core::level::LayoutSpace;
use crate::core::system::system_order::{PostPhysicsAdjustSet, SetupSet};
use crate::gameplay::factories;
use crate::gameplay::sling::SlingState;

/// One bird body tracked by the queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedBird {
    pub entity: Entity,
    /// Layout-space slot the bird was created in.
    pub original_position: Vec2,
    pub is_active: bool,
    pub is_used: bool,
    pub queue_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirdStatus {
    pub index: usize,
    pub is_active: bool,
    pub is_used: bool,
    pub queue_index: usize,
}

/// Finite sequence of birds; at most one is active at a time.
#[derive(Resource, Debug, Default)]
pub struct BirdQueue {
    birds: Vec<QueuedBird>,
    current_index: usize,
    is_game_over: bool,
}

impl BirdQueue {
    /// Initial layout slot of bird `index`; bird 0 sits nearest the sling.
    pub fn slot_position(cfg: &BirdQueueConfig, index: usize, total: usize) -> Vec2 {
        let reverse = total.saturating_sub(1 + index) as f32;
        Vec2::new(cfg.start_x + reverse * cfg.spacing, cfg.start_y)
    }

    /// Slot of a waiting bird once the birds ahead of it have left; `rank` 0 flies next.
    pub fn waiting_position(cfg: &BirdQueueConfig, rank: usize, total: usize) -> Vec2 {
        let reverse = total as f32 - 2.0 - rank as f32;
        Vec2::new(cfg.start_x + reverse.max(0.0) * cfg.spacing, cfg.start_y)
    }

    /// Build from spawned bodies in flight order. The first bird becomes active.
    pub fn from_birds(birds: impl IntoIterator<Item = (Entity, Vec2)>) -> Self {
        let birds: Vec<QueuedBird> = birds
            .into_iter()
            .enumerate()
            .map(|(i, (entity, original_position))| QueuedBird {
                entity,
                original_position,
                is_active: i == 0,
                is_used: false,
                queue_index: i,
            })
            .collect();
        let is_game_over = birds.is_empty();
        Self {
            birds,
            current_index: 0,
            is_game_over,
        }
    }

    pub fn current(&self) -> Option<&QueuedBird> {
        if self.is_game_over {
            return None;
        }
        self.birds.get(self.current_index)
    }

    /// Retire the active bird and activate the next one.
    /// Returns `None` (and flags game over) once the queue is exhausted.
    pub fn advance(&mut self) -> Option<&QueuedBird> {
        if self.is_game_over {
            return None;
        }
        if let Some(bird) = self.birds.get_mut(self.current_index) {
            bird.is_used = true;
            bird.is_active = false;
        }
        self.current_index += 1;
        if self.current_index >= self.birds.len() {
            self.is_game_over = true;
            info!(target: "bird_queue", "no birds left; game over");
            return None;
        }
        let next = &mut self.birds[self.current_index];
        next.is_active = true;
        Some(&*next)
    }

    pub fn remaining(&self) -> usize {
        self.birds.len().saturating_sub(self.current_index)
    }

    pub fn total(&self) -> usize {
        self.birds.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_complete(&self) -> bool {
        self.is_game_over
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.birds.iter().any(|b| b.entity == entity)
    }

    /// Birds that have not flown yet, excluding the active one, with their rank.
    pub fn waiting(&self) -> impl Iterator<Item = (usize, &QueuedBird)> {
        self.birds
            .iter()
            .skip(self.current_index + 1)
            .enumerate()
    }

    pub fn status(&self) -> Vec<BirdStatus> {
        self.birds
            .iter()
            .enumerate()
            .map(|(index, b)| BirdStatus {
                index,
                is_active: b.is_active,
                is_used: b.is_used,
                queue_index: b.queue_index,
            })
            .collect()
    }

    /// Forget every bird; the caller despawns the bodies.
    pub fn clear(&mut self) {
        self.birds.clear();
        self.current_index = 0;
        self.is_game_over = false;
    }
}

/// Sent after the queue has been rebuilt from scratch.
#[derive(Event, Debug, Clone, Copy)]
pub struct BirdQueueReset;

pub struct BirdQueuePlugin;

impl Plugin for BirdQueuePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BirdQueue>()
            .add_event::<BirdQueueReset>()
            .configure_sets(
                Startup,
                (SetupSet::Scenery, SetupSet::Queue, SetupSet::Load).chain(),
            )
            .add_systems(Startup, spawn_bird_queue.in_set(SetupSet::Queue))
            .add_systems(
                Update,
                (reset_bird_queue_on_key, repack_waiting_birds)
                    .chain()
                    .before(PostPhysicsAdjustSet),
            );
    }
}

/// Spawn every queued bird body and return the queue describing them.
pub fn build_bird_queue(commands: &mut Commands, cfg: &GameConfig, layout: &LayoutSpace) -> BirdQueue {
    let qcfg = &cfg.bird_queue;
    let total = qcfg.total_birds;
    let fallback = color_or(&cfg.colors.projectile, Color::srgb(1.0, 0.27, 0.27));
    let birds = (0..total).map(|i| {
        let slot = BirdQueue::slot_position(qcfg, i, total);
        let color = qcfg
            .colors
            .get(i)
            .or_else(|| qcfg.colors.first())
            .map(|hex| color_or(hex, fallback))
            .unwrap_or(fallback);
        let entity = commands
            .spawn(factories::bird(
                i,
                layout.to_world(slot),
                qcfg.radius,
                color,
                &cfg.birds,
                RigidBody::Fixed,
            ))
            .id();
        (entity, slot)
    });
    let queue = BirdQueue::from_birds(birds.collect::<Vec<_>>());
    info!(target: "bird_queue", total, "bird queue ready");
    queue
}

fn spawn_bird_queue(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    layout: Res<LayoutSpace>,
    mut queue: ResMut<BirdQueue>,
) {
    *queue = build_bird_queue(&mut commands, &cfg, &layout);
}

/// `R` despawns every bird, rebuilds the queue and puts the sling back to `Ready`
/// so a pending reload cannot advance the new queue.
pub fn reset_bird_queue_on_key(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut commands: Commands,
    cfg: Res<GameConfig>,
    layout: Res<LayoutSpace>,
    mut queue: ResMut<BirdQueue>,
    sling: Option<ResMut<SlingState>>,
    birds: Query<Entity, With<Bird>>,
    mut ev_reset: EventWriter<BirdQueueReset>,
) {
    let Some(keys) = keys else {
        return;
    };
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    reset_bird_queue(&mut commands, &cfg, &layout, &mut queue, &birds);
    if let Some(mut sling) = sling {
        sling.reset();
    }
    ev_reset.write(BirdQueueReset);
}

pub fn reset_bird_queue(
    commands: &mut Commands,
    cfg: &GameConfig,
    layout: &LayoutSpace,
    queue: &mut BirdQueue,
    birds: &Query<Entity, With<Bird>>,
) {
    for e in birds.iter() {
        commands.entity(e).despawn();
    }
    queue.clear();
    *queue = build_bird_queue(commands, cfg, layout);
    info!(target: "bird_queue", "bird queue reset");
}

/// Slide the waiting birds forward whenever the active bird changes.
fn repack_waiting_birds(
    queue: Res<BirdQueue>,
    cfg: Res<GameConfig>,
    layout: Res<LayoutSpace>,
    mut q: Query<&mut Transform, With<Bird>>,
) {
    if !queue.is_changed() {
        return;
    }
    let total = queue.total();
    for (rank, bird) in queue.waiting() {
        let Ok(mut tf) = q.get_mut(bird.entity) else {
            continue;
        };
        let target = layout.to_world(BirdQueue::waiting_position(&cfg.bird_queue, rank, total));
        if tf.translation.truncate() != target {
            tf.translation = target.extend(tf.translation.z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(n: u32) -> BirdQueue {
        BirdQueue::from_birds((0..n).map(|i| (Entity::from_raw(i + 1), Vec2::new(i as f32, 0.0))))
    }

    #[test]
    fn first_bird_is_active() {
        let q = queue_of(3);
        let cur = q.current().expect("current");
        assert_eq!(cur.queue_index, 0);
        assert!(cur.is_active);
        assert_eq!(q.remaining(), 3);
        assert!(!q.is_complete());
    }

    #[test]
    fn advance_walks_until_exhausted() {
        let mut q = queue_of(3);
        assert_eq!(q.advance().map(|b| b.queue_index), Some(1));
        assert_eq!(q.remaining(), 2);
        assert_eq!(q.advance().map(|b| b.queue_index), Some(2));
        assert_eq!(q.remaining(), 1);
        assert!(q.advance().is_none());
        assert!(q.is_complete());
        assert_eq!(q.remaining(), 0);
        assert!(q.current().is_none());
        // Further calls stay exhausted.
        assert!(q.advance().is_none());
        assert_eq!(q.current_index(), 3);
        let status = q.status();
        assert!(status.iter().all(|s| s.is_used && !s.is_active));
    }

    #[test]
    fn empty_queue_is_game_over() {
        let q = queue_of(0);
        assert!(q.is_complete());
        assert!(q.current().is_none());
        assert_eq!(q.remaining(), 0);
    }

    #[test]
    fn slots_place_first_bird_nearest_sling() {
        let cfg = BirdQueueConfig {
            start_x: 100.0,
            spacing: 40.0,
            start_y: 450.0,
            ..Default::default()
        };
        assert_eq!(BirdQueue::slot_position(&cfg, 0, 3), Vec2::new(180.0, 450.0));
        assert_eq!(BirdQueue::slot_position(&cfg, 2, 3), Vec2::new(100.0, 450.0));
        // Waiting slots line up with the initial slots before anyone flies.
        assert_eq!(
            BirdQueue::waiting_position(&cfg, 0, 3),
            BirdQueue::slot_position(&cfg, 1, 3)
        );
        assert_eq!(
            BirdQueue::waiting_position(&cfg, 1, 3),
            BirdQueue::slot_position(&cfg, 2, 3)
        );
    }

    #[test]
    fn waiting_excludes_active_and_used() {
        let mut q = queue_of(4);
        q.advance();
        let ranks: Vec<(usize, usize)> = q.waiting().map(|(r, b)| (r, b.queue_index)).collect();
        assert_eq!(ranks, vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn clear_forgets_birds() {
        let mut q = queue_of(2);
        q.advance();
        q.clear();
        assert_eq!(q.total(), 0);
        assert_eq!(q.current_index(), 0);
    }
}
