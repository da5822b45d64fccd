//! Pig destruction heuristic.
//!
//! Pigs are not hit-tested against birds. Every tick after physics each pig is
//! judged from its own motion: a pig that moves fast, ends up far from where it
//! settled, or leaves the world counts as destroyed. Destroying a portfolio pig
//! unlocks its section, but only once the pig had settled and a bird has been
//! launched; until the first launch the baseline follows the pig.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{Pig, PortfolioPig};
use crate::core::config::{DamageConfig, GameConfig};
use crate::core::level::WorldBounds;
use crate::core::system::system_order::PostPhysicsAdjustSet;
use crate::gameplay::sling::SlingState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DestroyCause {
    Impact { speed: f32 },
    Displaced { distance: f32 },
    OutOfBounds,
}

/// Per-pig bookkeeping for the heuristic.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct PigMonitor {
    pub age: f32,
    /// Position once the grace period ended; displacement is measured from here.
    pub baseline: Option<Vec2>,
}

impl PigMonitor {
    /// `armed` is false until the first bird leaves the sling.
    pub fn observe(
        &mut self,
        dt: f32,
        position: Vec2,
        speed: f32,
        out_of_bounds: bool,
        armed: bool,
        cfg: &DamageConfig,
    ) -> Option<DestroyCause> {
        if out_of_bounds {
            return Some(DestroyCause::OutOfBounds);
        }
        self.age += dt;
        if self.age < cfg.grace_secs {
            return None;
        }
        let baseline = match self.baseline {
            Some(b) if armed => b,
            _ => {
                self.baseline = Some(position);
                return None;
            }
        };
        if speed > cfg.impact_speed {
            return Some(DestroyCause::Impact { speed });
        }
        let distance = position.distance(baseline);
        if distance > cfg.displacement {
            return Some(DestroyCause::Displaced { distance });
        }
        None
    }

    pub fn is_settling(&self) -> bool {
        self.baseline.is_none()
    }
}

#[derive(Event, Debug, Clone)]
pub struct PigDestroyed {
    pub entity: Entity,
    pub cause: DestroyCause,
    pub section: Option<String>,
    /// False when the pig was lost while settling or before any launch.
    pub credited: bool,
}

#[derive(Event, Debug, Clone)]
pub struct SectionUnlocked {
    pub section: String,
    pub title: String,
    pub cause: DestroyCause,
}

/// Sections unlocked so far, in unlock order.
#[derive(Resource, Debug, Default, Clone)]
pub struct UnlockedSections {
    order: Vec<String>,
}

impl UnlockedSections {
    /// Returns false if the section was already unlocked.
    pub fn unlock(&mut self, section: &str) -> bool {
        if self.is_unlocked(section) {
            return false;
        }
        self.order.push(section.to_owned());
        true
    }

    pub fn is_unlocked(&self, section: &str) -> bool {
        self.order.iter().any(|s| s == section)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

pub struct DamagePlugin;

impl Plugin for DamagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UnlockedSections>()
            .add_event::<PigDestroyed>()
            .add_event::<SectionUnlocked>()
            .add_systems(
                Update,
                (attach_pig_monitors, assess_pigs)
                    .chain()
                    .in_set(PostPhysicsAdjustSet),
            );
    }
}

fn attach_pig_monitors(mut commands: Commands, q: Query<Entity, (Added<Pig>, Without<PigMonitor>)>) {
    for e in &q {
        commands.entity(e).insert(PigMonitor::default());
    }
}

fn assess_pigs(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    bounds: Res<WorldBounds>,
    sling: Option<Res<SlingState>>,
    mut unlocked: ResMut<UnlockedSections>,
    mut q: Query<(Entity, &Transform, &Velocity, &mut PigMonitor, Option<&PortfolioPig>), With<Pig>>,
    mut commands: Commands,
    mut ev_destroyed: EventWriter<PigDestroyed>,
    mut ev_unlocked: EventWriter<SectionUnlocked>,
) {
    let dt = time.delta_secs();
    let armed = sling.is_some_and(|s| s.launches > 0);
    for (entity, tf, vel, mut monitor, portfolio) in q.iter_mut() {
        let pos = tf.translation.truncate();
        let settled = !monitor.is_settling();
        let Some(cause) =
            monitor.observe(dt, pos, vel.linvel.length(), bounds.is_out(pos), armed, &cfg.damage)
        else {
            continue;
        };
        commands.entity(entity).despawn();
        let section = portfolio.map(|p| p.section.clone());
        let credited = armed && settled;
        if credited {
            info!(target: "damage", ?cause, section = section.as_deref().unwrap_or("-"), "pig destroyed");
        } else {
            warn!(target: "damage", ?cause, section = section.as_deref().unwrap_or("-"), "pig lost without a shot; nothing unlocked");
        }
        ev_destroyed.write(PigDestroyed {
            entity,
            cause,
            section: section.clone(),
            credited,
        });
        let Some(p) = portfolio.filter(|_| credited) else {
            continue;
        };
        if unlocked.unlock(&p.section) {
            info!(target: "damage", section = %p.section, title = %p.title, "section unlocked");
            ev_unlocked.write(SectionUnlocked {
                section: p.section.clone(),
                title: p.title.clone(),
                cause,
            });
        }
    }
}
