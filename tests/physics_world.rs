mod common;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use sling_portfolio::gameplay::sling::launch_velocity;
use sling_portfolio::interaction::input::sling_drag::PointerState;
use sling_portfolio::{BirdQueue, GameConfig, PortfolioPig, SlingPhase, SlingState, UnlockedSections};

use common::{count, physics_app};

fn step(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn set_pointer(app: &mut App, world: Vec2, pressed: bool, released: bool) {
    *app.world_mut().resource_mut::<PointerState>() = PointerState {
        world: Some(world),
        just_pressed: pressed,
        just_released: released,
    };
}

#[test]
fn idle_level_settles_without_unlocking_anything() {
    let mut app = physics_app(GameConfig::default());
    // ~6 s of simulated time with nobody touching the sling.
    step(&mut app, 375);

    assert!(app.world().resource::<UnlockedSections>().is_empty());
    assert_eq!(count::<PortfolioPig>(&mut app), 5, "no pig rolled out of the world");
    assert_eq!(app.world().resource::<SlingState>().launches, 0);

    let lowest = {
        let mut q = app
            .world_mut()
            .query_filtered::<&Transform, With<PortfolioPig>>();
        q.iter(app.world())
            .map(|tf| tf.translation.y)
            .fold(f32::INFINITY, f32::min)
    };
    // The target ground's top is at layout y 512.5, i.e. world y -152.5.
    assert!(lowest > -160.0, "pigs rest on the ground, lowest at {lowest}");
}

#[test]
fn released_bird_flies_at_launch_velocity() {
    let cfg = GameConfig::default();
    let mut app = physics_app(cfg.clone());
    // Let Rapier compute masses and the band settle.
    step(&mut app, 10);

    let bird = app
        .world()
        .resource::<BirdQueue>()
        .current()
        .expect("active bird")
        .entity;
    let mass = app
        .world()
        .get::<ReadMassProperties>(bird)
        .map(|m| m.get().mass)
        .unwrap_or(0.0);
    assert!(mass > 0.0, "mass is known before the shot");

    let pos = app.world().get::<Transform>(bird).expect("tf").translation.truncate();
    set_pointer(&mut app, pos, true, false);
    app.update();
    assert_eq!(app.world().resource::<SlingState>().phase, SlingPhase::Dragging);

    let anchor = app.world().resource::<SlingState>().anchor;
    // Slightly below the anchor but clear of the sling ground.
    let release_at = anchor + Vec2::new(-80.0, -5.0);
    {
        let mut tf = app.world_mut().get_mut::<Transform>(bird).expect("tf");
        tf.translation = release_at.extend(0.0);
    }
    set_pointer(&mut app, release_at, false, true);
    app.update();
    set_pointer(&mut app, release_at, false, false);

    let expected = launch_velocity(anchor, release_at, &cfg.sling).expect("long pull");
    let vel = app.world().get::<Velocity>(bird).expect("velocity").linvel;
    assert!(
        (vel.length() - expected.length()).abs() < expected.length() * 0.05,
        "speed {} vs {}",
        vel.length(),
        expected.length()
    );
    assert!(vel.normalize().dot(expected.normalize()) > 0.99, "{vel:?} vs {expected:?}");
    assert!(matches!(
        app.world().resource::<SlingState>().phase,
        SlingPhase::Flying { .. }
    ));
    assert!(app.world().get::<ImpulseJoint>(bird).is_none());
}
