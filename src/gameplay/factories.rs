//! Entity factories. Every function returns a bundle with the physics body,
//! collider, material and render tags for one kind of level object; callers
//! decide when to spawn it. Positions are world-space.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{
    Bird, BodyColor, BodyShape, BodyStroke, Ground, Pig, PortfolioPig, SlingBase, Structure, Wall,
};
use crate::core::config::{
    color_or, GameConfig, MaterialConfig, PigSize, PortfolioPigSpec, StructureKind,
};

/// Birds and the sling base share this group and never collide with each other.
pub const SLING_GROUP: Group = Group::GROUP_2;

const GROUND_FRICTION: f32 = 0.9;
const GROUND_RESTITUTION: f32 = 0.1;
const ANGULAR_DAMPING: f32 = 0.4;

pub fn sling_collision_groups() -> CollisionGroups {
    CollisionGroups::new(SLING_GROUP, Group::ALL.difference(SLING_GROUP))
}

fn ball_body(position: Vec2, radius: f32, material: &MaterialConfig, body: RigidBody) -> impl Bundle {
    (
        body,
        Collider::ball(radius),
        ColliderMassProperties::Density(material.density),
        Friction::coefficient(material.friction),
        Restitution::coefficient(material.restitution),
        Damping {
            linear_damping: material.air_friction,
            angular_damping: ANGULAR_DAMPING,
        },
        Velocity::zero(),
        ReadMassProperties::default(),
        Transform::from_translation(position.extend(0.0)),
        Visibility::default(),
        BodyShape::Circle { radius },
    )
}

fn fixed_box(position: Vec2, size: Vec2) -> impl Bundle {
    (
        RigidBody::Fixed,
        Collider::cuboid(size.x * 0.5, size.y * 0.5),
        Friction::coefficient(GROUND_FRICTION),
        Restitution::coefficient(GROUND_RESTITUTION),
        Transform::from_translation(position.extend(0.0)),
        Visibility::default(),
        BodyShape::Rect { size },
    )
}

/// Launchable bird. Waiting birds are created `Fixed` so they stay on the ground.
pub fn bird(
    index: usize,
    position: Vec2,
    radius: f32,
    color: Color,
    material: &MaterialConfig,
    body: RigidBody,
) -> impl Bundle {
    (
        Bird { index },
        Name::new(format!("bird-{index}")),
        ball_body(position, radius, material, body),
        sling_collision_groups(),
        ExternalImpulse::default(),
        GravityScale(1.0),
        BodyColor(color),
    )
}

/// Unnamed pig body; `sized_pig` and `portfolio_pig` add the `Name`.
pub fn pig(position: Vec2, radius: f32, color: Color, stroke: Color, material: &MaterialConfig) -> impl Bundle {
    (
        Pig,
        ball_body(position, radius, material, RigidBody::Dynamic),
        BodyColor(color),
        BodyStroke(stroke),
    )
}

pub fn pig_radius(size: PigSize, cfg: &GameConfig) -> f32 {
    match size {
        PigSize::Small => cfg.pigs.sizes.small,
        PigSize::Medium => cfg.pigs.sizes.medium,
        PigSize::Large => cfg.pigs.sizes.large,
    }
}

fn sized_pig(size: PigSize, position: Vec2, cfg: &GameConfig) -> impl Bundle {
    let hex = match size {
        PigSize::Small => &cfg.pigs.colors.small,
        PigSize::Medium => &cfg.pigs.colors.medium,
        PigSize::Large => &cfg.pigs.colors.large,
    };
    (
        Name::new(format!("{size:?}-pig").to_lowercase()),
        pig(
            position,
            pig_radius(size, cfg),
            color_or(hex, Color::srgb(0.56, 0.93, 0.56)),
            color_or(&cfg.pigs.stroke, Color::BLACK),
            &cfg.pigs.material,
        ),
    )
}

pub fn small_pig(position: Vec2, cfg: &GameConfig) -> impl Bundle {
    sized_pig(PigSize::Small, position, cfg)
}

pub fn medium_pig(position: Vec2, cfg: &GameConfig) -> impl Bundle {
    sized_pig(PigSize::Medium, position, cfg)
}

pub fn large_pig(position: Vec2, cfg: &GameConfig) -> impl Bundle {
    sized_pig(PigSize::Large, position, cfg)
}

pub fn pig_of_size(size: PigSize, position: Vec2, cfg: &GameConfig) -> impl Bundle {
    sized_pig(size, position, cfg)
}

/// Pig carrying a portfolio section; named `portfolio-pig-{section}`.
pub fn portfolio_pig(spec: &PortfolioPigSpec, position: Vec2, cfg: &GameConfig) -> impl Bundle {
    (
        PortfolioPig {
            section: spec.section.clone(),
            title: spec.title.clone(),
            label: spec.label.clone(),
        },
        Name::new(format!("portfolio-pig-{}", spec.section)),
        pig(
            position,
            cfg.pigs.portfolio_radius,
            color_or(&spec.color, Color::WHITE),
            color_or(&cfg.pigs.stroke, Color::BLACK),
            &cfg.pigs.portfolio_material,
        ),
    )
}

pub fn sling_ground(position: Vec2, size: Vec2, cfg: &GameConfig) -> impl Bundle {
    (
        Ground,
        Name::new("sling-ground"),
        fixed_box(position, size),
        BodyColor(color_or(&cfg.colors.sling_ground, Color::srgb(0.4, 0.26, 0.13))),
    )
}

pub fn target_ground(position: Vec2, size: Vec2, cfg: &GameConfig) -> impl Bundle {
    (
        Ground,
        Name::new("target-ground"),
        fixed_box(position, size),
        BodyColor(color_or(&cfg.colors.target_ground, Color::srgb(0.55, 0.45, 0.33))),
    )
}

pub fn wall(position: Vec2, size: Vec2, color: Color) -> impl Bundle {
    (Wall, Name::new("wall"), fixed_box(position, size), BodyColor(color))
}

/// Fixed post the band hangs from; shares the bird collision group.
pub fn sling_base(position: Vec2, size: Vec2, cfg: &GameConfig) -> impl Bundle {
    (
        SlingBase,
        Name::new("sling-base"),
        fixed_box(position, size),
        sling_collision_groups(),
        BodyColor(color_or(&cfg.colors.sling_base, Color::srgb(0.55, 0.38, 0.07))),
    )
}

pub fn wooden_beam(
    kind: StructureKind,
    position: Vec2,
    size: Vec2,
    color: Color,
    material: &MaterialConfig,
) -> impl Bundle {
    (
        Structure { kind },
        Name::new(format!("{kind:?}").to_lowercase()),
        RigidBody::Dynamic,
        Collider::cuboid(size.x * 0.5, size.y * 0.5),
        ColliderMassProperties::Density(material.density),
        Friction::coefficient(material.friction),
        Restitution::coefficient(material.restitution),
        Velocity::zero(),
        Transform::from_translation(position.extend(0.0)),
        Visibility::default(),
        BodyShape::Rect { size },
        BodyColor(color),
    )
}

/// Full size of a structure piece.
pub fn structure_size(kind: StructureKind, cfg: &GameConfig) -> Vec2 {
    let s = &cfg.wooden_structures.sizes;
    match kind {
        StructureKind::Plank => Vec2::new(s.plank_length, s.plank_thickness),
        StructureKind::Pillar => Vec2::new(s.pillar_thickness, s.pillar_height),
        StructureKind::Block => Vec2::splat(s.block_size),
    }
}

pub fn wooden_plank(position: Vec2, cfg: &GameConfig) -> impl Bundle {
    structure(StructureKind::Plank, position, cfg)
}

pub fn wooden_pillar(position: Vec2, cfg: &GameConfig) -> impl Bundle {
    structure(StructureKind::Pillar, position, cfg)
}

pub fn wooden_block(position: Vec2, cfg: &GameConfig) -> impl Bundle {
    structure(StructureKind::Block, position, cfg)
}

pub fn structure(kind: StructureKind, position: Vec2, cfg: &GameConfig) -> impl Bundle {
    let wood = &cfg.wooden_structures;
    let (hex, material) = match kind {
        StructureKind::Plank => (&wood.colors.plank, &wood.beam),
        StructureKind::Pillar => (&wood.colors.pillar, &wood.beam),
        StructureKind::Block => (&wood.colors.block, &wood.block),
    };
    wooden_beam(
        kind,
        position,
        structure_size(kind, cfg),
        color_or(hex, Color::srgb(0.63, 0.32, 0.18)),
        material,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_sizes_follow_config() {
        let cfg = GameConfig::default();
        assert_eq!(structure_size(StructureKind::Plank, &cfg), Vec2::new(80.0, 12.0));
        assert_eq!(structure_size(StructureKind::Pillar, &cfg), Vec2::new(12.0, 60.0));
        assert_eq!(structure_size(StructureKind::Block, &cfg), Vec2::splat(25.0));
    }

    #[test]
    fn portfolio_pig_carries_section() {
        let cfg = GameConfig::default();
        let spec = cfg.level.portfolio_pigs[0].clone();
        let mut world = World::new();
        let e = world.spawn(portfolio_pig(&spec, Vec2::new(1.0, 2.0), &cfg)).id();
        let pp = world.get::<PortfolioPig>(e).expect("portfolio pig");
        assert_eq!(pp.section, "proyectos");
        assert!(world.get::<Pig>(e).is_some());
        assert_eq!(world.get::<Name>(e).map(|n| n.as_str()), Some("portfolio-pig-proyectos"));
        assert_eq!(
            world.get::<BodyShape>(e),
            Some(&BodyShape::Circle { radius: 25.0 })
        );
        assert_eq!(world.get::<Restitution>(e).map(|r| r.coefficient), Some(0.4));
        assert_eq!(world.get::<RigidBody>(e), Some(&RigidBody::Dynamic));
    }

    #[test]
    fn pig_sizes_map_to_radii() {
        let cfg = GameConfig::default();
        let mut world = World::new();
        let small = world.spawn(small_pig(Vec2::ZERO, &cfg)).id();
        let large = world.spawn(large_pig(Vec2::ZERO, &cfg)).id();
        let medium = world.spawn(medium_pig(Vec2::ZERO, &cfg)).id();
        assert_eq!(world.get::<BodyShape>(small), Some(&BodyShape::Circle { radius: 15.0 }));
        assert_eq!(world.get::<BodyShape>(medium), Some(&BodyShape::Circle { radius: 20.0 }));
        assert_eq!(world.get::<BodyShape>(large), Some(&BodyShape::Circle { radius: 28.0 }));
        assert_eq!(world.get::<Name>(medium).map(|n| n.as_str()), Some("medium-pig"));
    }

    #[test]
    fn every_pig_bundle_spawns_with_one_name() {
        let cfg = GameConfig::default();
        let mut world = World::new();
        let plain = world
            .spawn(pig(Vec2::ZERO, 10.0, Color::WHITE, Color::BLACK, &cfg.pigs.material))
            .id();
        assert!(world.get::<Name>(plain).is_none());
        for spec in &cfg.level.portfolio_pigs {
            let e = world.spawn(portfolio_pig(spec, Vec2::ZERO, &cfg)).id();
            let expected = format!("portfolio-pig-{}", spec.section);
            assert_eq!(world.get::<Name>(e).map(|n| n.as_str()), Some(expected.as_str()));
        }
        let sized = world.spawn(pig_of_size(PigSize::Large, Vec2::ZERO, &cfg)).id();
        assert_eq!(world.get::<Name>(sized).map(|n| n.as_str()), Some("large-pig"));
    }

    #[test]
    fn grounds_and_base_are_fixed() {
        let cfg = GameConfig::default();
        let mut world = World::new();
        let g = world.spawn(sling_ground(Vec2::ZERO, Vec2::new(250.0, 25.0), &cfg)).id();
        let b = world.spawn(sling_base(Vec2::ZERO, Vec2::new(20.0, 80.0), &cfg)).id();
        assert_eq!(world.get::<RigidBody>(g), Some(&RigidBody::Fixed));
        assert_eq!(world.get::<RigidBody>(b), Some(&RigidBody::Fixed));
        assert_eq!(world.get::<CollisionGroups>(b), Some(&sling_collision_groups()));
    }

    #[test]
    fn bird_uses_requested_body_type() {
        let cfg = GameConfig::default();
        let mut world = World::new();
        let e = world
            .spawn(bird(2, Vec2::ZERO, 15.0, Color::WHITE, &cfg.birds, RigidBody::Fixed))
            .id();
        assert_eq!(world.get::<RigidBody>(e), Some(&RigidBody::Fixed));
        assert_eq!(world.get::<Bird>(e).map(|b| b.index), Some(2));
        assert_eq!(world.get::<Restitution>(e).map(|r| r.coefficient), Some(0.8));
    }
}
