use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::BodyShape;
use crate::core::config::GameConfig;
use crate::core::system::system_order::PrePhysicsSet;
use crate::gameplay::bird_queue::BirdQueue;
use crate::gameplay::sling::{launch_bird, LoadedBird, SlingState};

pub struct SlingDragPlugin;

impl Plugin for SlingDragPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>()
            .init_resource::<ActiveDrag>()
            .add_systems(
                Update,
                (
                    track_pointer.run_if(any_with_component::<Window>),
                    begin_or_end_drag,
                    apply_drag_velocity,
                )
                    .chain()
                    .in_set(PrePhysicsSet),
            );
    }
}

/// Primary pointer (first touch, else mouse cursor) in world space, refreshed each frame.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PointerState {
    pub world: Option<Vec2>,
    pub just_pressed: bool,
    pub just_released: bool,
}

/// The bird being pulled back, if any.
#[derive(Resource, Default, Debug)]
pub struct ActiveDrag {
    pub entity: Option<Entity>,
    pub last_pos: Option<Vec2>,
}

fn cursor_world_pos(camera_q: &Query<(&Camera, &GlobalTransform)>, screen_pos: Vec2) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

fn primary_pointer_world_pos(
    window: &Window,
    touches: &Touches,
    camera_q: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    if let Some(touch) = touches.iter().next() {
        return cursor_world_pos(camera_q, touch.position());
    }
    let cursor = window.cursor_position()?;
    cursor_world_pos(camera_q, cursor)
}

fn track_pointer(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut pointer: ResMut<PointerState>,
) {
    let Ok(window) = windows_q.single() else {
        return;
    };
    let default_touches = Touches::default();
    let touches = touches.as_deref().unwrap_or(&default_touches);
    let (pressed, released) = match buttons.as_deref() {
        Some(b) => (b.just_pressed(MouseButton::Left), b.just_released(MouseButton::Left)),
        None => (false, false),
    };
    pointer.just_pressed = pressed || touches.iter_just_pressed().next().is_some();
    pointer.just_released = released || touches.iter_just_released().next().is_some();
    // A released touch has no live position; fall back to its last one.
    pointer.world = primary_pointer_world_pos(window, touches, &camera_q).or_else(|| {
        touches
            .iter_just_released()
            .next()
            .and_then(|t| cursor_world_pos(&camera_q, t.position()))
    });
}

/// True when `pointer` is close enough to a bird at `bird_pos` to grab it.
pub fn within_grab(pointer: Vec2, bird_pos: Vec2, bird_radius: f32, grab_radius: f32) -> bool {
    let r = grab_radius.max(bird_radius);
    pointer.distance_squared(bird_pos) <= r * r
}

fn begin_or_end_drag(
    pointer: Res<PointerState>,
    mut active: ResMut<ActiveDrag>,
    mut sling: ResMut<SlingState>,
    queue: Res<BirdQueue>,
    q: Query<(&Transform, &BodyShape, Option<&ReadMassProperties>), With<LoadedBird>>,
    cfg: Res<GameConfig>,
    mut commands: Commands,
) {
    if pointer.just_pressed && active.entity.is_none() && sling.can_launch() {
        if let (Some(world_pos), Some(bird)) = (pointer.world, queue.current()) {
            if let Ok((tf, shape, _)) = q.get(bird.entity) {
                let radius = match shape {
                    BodyShape::Circle { radius } => *radius,
                    BodyShape::Rect { size } => size.max_element() * 0.5,
                };
                if within_grab(world_pos, tf.translation.truncate(), radius, cfg.sling.grab_radius)
                    && sling.begin_drag()
                {
                    active.entity = Some(bird.entity);
                    active.last_pos = Some(world_pos);
                    debug!(target: "sling", bird = bird.queue_index, "drag started");
                }
            }
        }
    }

    if !pointer.just_released {
        if let (Some(_), Some(world_pos)) = (active.entity, pointer.world) {
            active.last_pos = Some(world_pos);
        }
        return;
    }
    let Some(entity) = active.entity.take() else {
        return;
    };
    active.last_pos = None;
    let Ok((tf, _, mass)) = q.get(entity) else {
        sling.reset();
        return;
    };
    let pos = tf.translation.truncate();
    match sling.release(pos, &cfg.sling) {
        Some(velocity) => {
            let mass = mass.map(|m| m.get().mass).unwrap_or(0.0);
            launch_bird(&mut commands, entity, velocity, mass);
            info!(
                target: "sling",
                pull = sling.anchor.distance(pos),
                speed = velocity.length(),
                "bird launched"
            );
        }
        None => debug!(target: "sling", "pull too short; bird snaps back"),
    }
}

/// Steer the dragged bird toward the pointer.
fn apply_drag_velocity(
    active: Res<ActiveDrag>,
    sling: Res<SlingState>,
    cfg: Res<GameConfig>,
    mut q: Query<(&Transform, &mut Velocity), With<LoadedBird>>,
) {
    if !sling.is_dragging() {
        return;
    }
    let (Some(entity), Some(target)) = (active.entity, active.last_pos) else {
        return;
    };
    let Ok((tf, mut vel)) = q.get_mut(entity) else {
        return;
    };
    let to_pointer = target - tf.translation.truncate();
    let mut v = to_pointer * cfg.sling.drag_follow_gain;
    if cfg.sling.drag_max_speed > 0.0 {
        v = v.clamp_length_max(cfg.sling.drag_max_speed);
    }
    vel.linvel = v;
    vel.angvel = 0.0;
}
