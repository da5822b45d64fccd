//! Flat rendering for physics bodies.
//!
//! Every entity tagged with a `BodyShape` gets a mesh child: a unit circle or
//! unit square scaled to the collider, tinted with its `BodyColor`. Pigs with a
//! `BodyStroke` get a slightly larger disc behind them as an outline.

use bevy::prelude::*;
use bevy::sprite::{ColorMaterial, MeshMaterial2d};

use crate::core::components::{BodyColor, BodyShape, BodyStroke, BodyVisual};

const STROKE_WIDTH: f32 = 2.0;

/// Shared unit meshes.
#[derive(Resource)]
struct UnitMeshes {
    circle: Handle<Mesh>,
    square: Handle<Mesh>,
}

pub struct ShapeVisualsPlugin;

impl Plugin for ShapeVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, prepare_unit_meshes)
            .add_systems(Update, spawn_body_visuals);
    }
}

fn prepare_unit_meshes(mut meshes: ResMut<Assets<Mesh>>, mut commands: Commands) {
    commands.insert_resource(UnitMeshes {
        circle: meshes.add(Circle::new(1.0)),
        square: meshes.add(Rectangle::new(1.0, 1.0)),
    });
}

fn spawn_body_visuals(
    mut commands: Commands,
    unit: Option<Res<UnitMeshes>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    q_new: Query<(Entity, &BodyShape, &BodyColor, Option<&BodyStroke>), Added<BodyShape>>,
) {
    let Some(unit) = unit else {
        return;
    };
    for (entity, shape, color, stroke) in q_new.iter() {
        let (mesh, scale) = match *shape {
            BodyShape::Circle { radius } => (unit.circle.clone(), Vec2::splat(radius)),
            BodyShape::Rect { size } => (unit.square.clone(), size),
        };
        let fill = commands
            .spawn((
                Mesh2d(mesh.clone()),
                MeshMaterial2d(materials.add(ColorMaterial::from(color.0))),
                Transform::from_scale(scale.extend(1.0)),
                BodyVisual,
            ))
            .id();
        commands.entity(entity).add_child(fill);
        if let Some(stroke) = stroke {
            let outline = commands
                .spawn((
                    Mesh2d(mesh),
                    MeshMaterial2d(materials.add(ColorMaterial::from(stroke.0))),
                    Transform {
                        translation: Vec3::new(0.0, 0.0, -0.1),
                        scale: (scale + Vec2::splat(STROKE_WIDTH)).extend(1.0),
                        ..default()
                    },
                    BodyVisual,
                ))
                .id();
            commands.entity(entity).add_child(outline);
        }
    }
}
