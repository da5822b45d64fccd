use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::Bird;
use crate::core::config::{GameConfig, SlingConfig};
use crate::core::level::{LayoutSpace, WorldBounds};
use crate::core::system::system_order::{PostPhysicsAdjustSet, SetupSet};
use crate::gameplay::bird_queue::{reset_bird_queue_on_key, BirdQueue, BirdQueueReset};
use crate::gameplay::factories;

/// Where the sling is in its launch cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlingPhase {
    /// A bird hangs on the band and can be grabbed.
    Ready,
    Dragging,
    Flying { elapsed: f32, resting: f32 },
    /// Waiting `remaining` seconds before loading the next bird.
    Reloading { remaining: f32 },
    /// The queue is empty.
    Exhausted,
}

/// Why a flight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEnd {
    OutOfBounds,
    Settled,
    TimedOut,
}

#[derive(Resource, Debug, Clone)]
pub struct SlingState {
    pub phase: SlingPhase,
    pub base: Option<Entity>,
    /// World-space anchor of the band (center of the base).
    pub anchor: Vec2,
    /// Birds launched since startup.
    pub launches: u32,
}

impl Default for SlingState {
    fn default() -> Self {
        Self {
            phase: SlingPhase::Ready,
            base: None,
            anchor: Vec2::ZERO,
            launches: 0,
        }
    }
}

/// Launch velocity for a bird released at `bird` while the band is anchored at
/// `anchor`, or `None` when the pull is too short to count.
pub fn launch_velocity(anchor: Vec2, bird: Vec2, cfg: &SlingConfig) -> Option<Vec2> {
    let pull = anchor - bird;
    let dist = pull.length();
    if dist <= cfg.min_pull_distance || dist <= f32::EPSILON {
        return None;
    }
    let speed = (dist * cfg.speed_per_pixel).min(cfg.max_launch_speed);
    Some(pull / dist * speed)
}

impl SlingState {
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, SlingPhase::Dragging)
    }

    pub fn can_launch(&self) -> bool {
        matches!(self.phase, SlingPhase::Ready | SlingPhase::Dragging)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.phase, SlingPhase::Exhausted)
    }

    /// Returns true if a drag actually started.
    pub fn begin_drag(&mut self) -> bool {
        if self.phase != SlingPhase::Ready {
            return false;
        }
        self.phase = SlingPhase::Dragging;
        true
    }

    /// End a drag. A long enough pull moves to `Flying` and yields the launch
    /// velocity; a short pull goes back to `Ready`.
    pub fn release(&mut self, bird: Vec2, cfg: &SlingConfig) -> Option<Vec2> {
        if !self.is_dragging() {
            return None;
        }
        match launch_velocity(self.anchor, bird, cfg) {
            Some(v) => {
                self.phase = SlingPhase::Flying {
                    elapsed: 0.0,
                    resting: 0.0,
                };
                self.launches += 1;
                Some(v)
            }
            None => {
                self.phase = SlingPhase::Ready;
                None
            }
        }
    }

    /// Feed one tick of the flying bird's motion. Moves to `Reloading` and
    /// reports why once the flight is over.
    pub fn observe_flight(
        &mut self,
        dt: f32,
        speed: f32,
        out_of_bounds: bool,
        cfg: &SlingConfig,
    ) -> Option<FlightEnd> {
        let SlingPhase::Flying { elapsed, resting } = self.phase else {
            return None;
        };
        let elapsed = elapsed + dt;
        let resting = if speed < cfg.rest_speed { resting + dt } else { 0.0 };
        let end = if out_of_bounds {
            Some(FlightEnd::OutOfBounds)
        } else if resting >= cfg.rest_secs {
            Some(FlightEnd::Settled)
        } else if elapsed >= cfg.max_flight_secs {
            Some(FlightEnd::TimedOut)
        } else {
            None
        };
        self.phase = match end {
            Some(_) => SlingPhase::Reloading {
                remaining: cfg.reset_delay_secs.max(0.0),
            },
            None => SlingPhase::Flying { elapsed, resting },
        };
        end
    }

    /// Count down the reload delay; true exactly once, when the next bird is due.
    pub fn tick_reload(&mut self, dt: f32) -> bool {
        let SlingPhase::Reloading { remaining } = self.phase else {
            return false;
        };
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            self.phase = SlingPhase::Reloading { remaining: 0.0 };
            return true;
        }
        self.phase = SlingPhase::Reloading { remaining };
        false
    }

    pub fn finish_reload(&mut self, loaded: bool) {
        self.phase = if loaded {
            SlingPhase::Ready
        } else {
            SlingPhase::Exhausted
        };
    }

    pub fn reset(&mut self) {
        self.phase = SlingPhase::Ready;
    }
}

/// The bird currently hanging on the band.
#[derive(Component, Debug)]
pub struct LoadedBird;

/// Hang `bird` on the band: dynamic, at the projectile rest point, gravity off,
/// spring-jointed to the base.
pub fn load_bird(commands: &mut Commands, bird: Entity, base: Entity, cfg: &GameConfig, layout: &LayoutSpace) {
    let s = &cfg.sling;
    commands.entity(bird).insert((
        RigidBody::Dynamic,
        layout.world_transform(s.projectile.center()),
        Velocity::zero(),
        GravityScale(0.0),
        ImpulseJoint::new(base, SpringJointBuilder::new(s.length, s.stiffness, s.damping)),
        LoadedBird,
    ));
}

/// Cut the band and send the bird off with a single impulse.
pub fn launch_bird(commands: &mut Commands, bird: Entity, velocity: Vec2, mass: f32) {
    let mut ec = commands.entity(bird);
    ec.remove::<(ImpulseJoint, LoadedBird)>();
    ec.insert(GravityScale(1.0));
    if mass > 0.0 {
        ec.insert((
            Velocity::zero(),
            ExternalImpulse {
                impulse: velocity * mass,
                torque_impulse: 0.0,
            },
        ));
    } else {
        // Mass not computed yet (body created this frame).
        ec.insert(Velocity::linear(velocity));
    }
}

pub struct SlingPlugin;

impl Plugin for SlingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SlingState>()
            .configure_sets(
                Startup,
                (SetupSet::Scenery, SetupSet::Queue, SetupSet::Load).chain(),
            )
            .add_systems(Startup, spawn_sling_base.in_set(SetupSet::Scenery))
            .add_systems(Startup, load_first_bird.in_set(SetupSet::Load))
            .add_systems(
                Update,
                reload_after_queue_reset
                    .after(reset_bird_queue_on_key)
                    .before(PostPhysicsAdjustSet),
            )
            .add_systems(
                Update,
                (monitor_flight, reload_next_bird)
                    .chain()
                    .in_set(PostPhysicsAdjustSet),
            );
    }
}

fn spawn_sling_base(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    layout: Res<LayoutSpace>,
    mut state: ResMut<SlingState>,
) {
    let base = &cfg.sling.base;
    let pos = layout.to_world(base.center());
    let e = commands
        .spawn(factories::sling_base(pos, base.size(), &cfg))
        .id();
    state.base = Some(e);
    state.anchor = pos;
    state.phase = SlingPhase::Ready;
}

fn load_current(
    commands: &mut Commands,
    state: &mut SlingState,
    queue: &BirdQueue,
    cfg: &GameConfig,
    layout: &LayoutSpace,
) {
    let (Some(bird), Some(base)) = (queue.current(), state.base) else {
        state.finish_reload(false);
        return;
    };
    load_bird(commands, bird.entity, base, cfg, layout);
    state.finish_reload(true);
    info!(target: "sling", bird = bird.queue_index, remaining = queue.remaining(), "bird loaded");
}

fn load_first_bird(
    mut commands: Commands,
    mut state: ResMut<SlingState>,
    queue: Res<BirdQueue>,
    cfg: Res<GameConfig>,
    layout: Res<LayoutSpace>,
) {
    load_current(&mut commands, &mut state, &queue, &cfg, &layout);
}

fn reload_after_queue_reset(
    mut ev: EventReader<BirdQueueReset>,
    mut commands: Commands,
    mut state: ResMut<SlingState>,
    queue: Res<BirdQueue>,
    cfg: Res<GameConfig>,
    layout: Res<LayoutSpace>,
) {
    if ev.read().last().is_none() {
        return;
    }
    state.reset();
    load_current(&mut commands, &mut state, &queue, &cfg, &layout);
}

fn monitor_flight(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    bounds: Res<WorldBounds>,
    queue: Res<BirdQueue>,
    mut state: ResMut<SlingState>,
    q: Query<(&Transform, &Velocity), With<Bird>>,
    mut commands: Commands,
) {
    if !matches!(state.phase, SlingPhase::Flying { .. }) {
        return;
    }
    let body = queue
        .current()
        .and_then(|b| q.get(b.entity).ok().map(|(tf, vel)| (b.entity, tf, vel)));
    let Some((entity, tf, vel)) = body else {
        // Bird vanished mid-flight; treat as lost.
        state.observe_flight(0.0, 0.0, true, &cfg.sling);
        return;
    };
    let pos = tf.translation.truncate();
    let out = bounds.is_out(pos);
    let Some(end) = state.observe_flight(time.delta_secs(), vel.linvel.length(), out, &cfg.sling) else {
        return;
    };
    info!(target: "sling", ?end, x = pos.x, y = pos.y, "flight over");
    if end == FlightEnd::OutOfBounds {
        commands.entity(entity).despawn();
    }
}

fn reload_next_bird(
    time: Res<Time>,
    mut commands: Commands,
    mut state: ResMut<SlingState>,
    mut queue: ResMut<BirdQueue>,
    cfg: Res<GameConfig>,
    layout: Res<LayoutSpace>,
) {
    if !state.tick_reload(time.delta_secs()) {
        return;
    }
    if queue.advance().is_none() {
        state.finish_reload(false);
        info!(target: "sling", "out of birds; press R to reset");
        return;
    }
    load_current(&mut commands, &mut state, &queue, &cfg, &layout);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SlingConfig {
        SlingConfig::default()
    }

    fn ready_at(anchor: Vec2) -> SlingState {
        SlingState {
            anchor,
            ..Default::default()
        }
    }

    #[test]
    fn short_pull_is_cancelled() {
        let c = cfg();
        assert!(launch_velocity(Vec2::ZERO, Vec2::new(-c.min_pull_distance, 0.0), &c).is_none());
        assert!(launch_velocity(Vec2::ZERO, Vec2::new(-5.0, 3.0), &c).is_none());
    }

    #[test]
    fn launch_points_from_bird_toward_anchor() {
        let c = cfg();
        let v = launch_velocity(Vec2::ZERO, Vec2::new(-60.0, -30.0), &c).expect("launch");
        assert!(v.x > 0.0 && v.y > 0.0);
        let expected = (60.0f32.hypot(30.0) * c.speed_per_pixel).min(c.max_launch_speed);
        assert!((v.length() - expected).abs() < 1e-3);
    }

    #[test]
    fn launch_speed_is_capped() {
        let c = cfg();
        let v = launch_velocity(Vec2::ZERO, Vec2::new(-5000.0, 0.0), &c).expect("launch");
        assert!((v.length() - c.max_launch_speed).abs() < 1e-3);
        assert!((v.normalize() - Vec2::X).length() < 1e-5);
    }

    #[test]
    fn drag_release_cycle() {
        let c = cfg();
        let mut s = ready_at(Vec2::ZERO);
        assert!(s.can_launch());
        assert!(s.release(Vec2::new(-100.0, 0.0), &c).is_none(), "release without drag");
        assert!(s.begin_drag());
        assert!(s.is_dragging());
        assert!(!s.begin_drag(), "already dragging");
        // Tiny pull snaps back to ready.
        assert!(s.release(Vec2::new(-5.0, 0.0), &c).is_none());
        assert_eq!(s.phase, SlingPhase::Ready);
        assert!(s.begin_drag());
        assert_eq!(s.launches, 0);
        assert!(s.release(Vec2::new(-100.0, 0.0), &c).is_some());
        assert!(matches!(s.phase, SlingPhase::Flying { .. }));
        assert_eq!(s.launches, 1);
        assert!(!s.can_launch());
        assert!(!s.begin_drag());
    }

    #[test]
    fn flight_ends_on_bounds_rest_or_timeout() {
        let c = cfg();
        let flying = SlingPhase::Flying {
            elapsed: 0.0,
            resting: 0.0,
        };

        let mut s = SlingState { phase: flying, ..Default::default() };
        assert_eq!(s.observe_flight(0.1, 500.0, false, &c), None);
        assert_eq!(s.observe_flight(0.1, 500.0, true, &c), Some(FlightEnd::OutOfBounds));
        assert!(matches!(s.phase, SlingPhase::Reloading { .. }));

        let mut s = SlingState { phase: flying, ..Default::default() };
        let mut end = None;
        for _ in 0..100 {
            end = s.observe_flight(0.1, 0.0, false, &c);
            if end.is_some() {
                break;
            }
        }
        assert_eq!(end, Some(FlightEnd::Settled));

        let mut s = SlingState { phase: flying, ..Default::default() };
        let mut end = None;
        for _ in 0..200 {
            end = s.observe_flight(0.1, 300.0, false, &c);
            if end.is_some() {
                break;
            }
        }
        assert_eq!(end, Some(FlightEnd::TimedOut));
    }

    #[test]
    fn movement_resets_rest_timer() {
        let c = cfg();
        let mut s = SlingState {
            phase: SlingPhase::Flying { elapsed: 0.0, resting: 0.0 },
            ..Default::default()
        };
        s.observe_flight(1.0, 0.0, false, &c);
        s.observe_flight(0.1, 100.0, false, &c);
        assert!(matches!(s.phase, SlingPhase::Flying { resting, .. } if resting == 0.0));
    }

    #[test]
    fn reload_fires_once_after_delay() {
        let mut s = SlingState {
            phase: SlingPhase::Reloading { remaining: 0.25 },
            ..Default::default()
        };
        assert!(!s.tick_reload(0.1));
        assert!(!s.tick_reload(0.1));
        assert!(s.tick_reload(0.1));
        s.finish_reload(true);
        assert_eq!(s.phase, SlingPhase::Ready);
        assert!(!s.tick_reload(1.0));
        s.finish_reload(false);
        assert!(s.is_exhausted());
        assert!(!s.can_launch());
        s.reset();
        assert!(s.can_launch());
    }
}
