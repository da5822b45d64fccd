use bevy::prelude::*;

/// Marker for a launchable bird body.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bird {
    /// Position in the queue, 0 flies first.
    pub index: usize,
}

/// Marker for any pig (regular or portfolio).
#[derive(Component, Debug)]
pub struct Pig;

/// A pig that unlocks a portfolio section when destroyed.
#[derive(Component, Debug, Clone)]
pub struct PortfolioPig {
    pub section: String,
    pub title: String,
    pub label: String,
}

/// Static ground slab (sling side or target side).
#[derive(Component, Debug)]
pub struct Ground;

#[derive(Component, Debug)]
pub struct Wall;

/// The fixed post the band is anchored to.
#[derive(Component, Debug)]
pub struct SlingBase;

/// Wooden structure piece.
#[derive(Component, Debug, Clone, Copy)]
pub struct Structure {
    pub kind: crate::core::config::StructureKind,
}

/// Collider geometry duplicated for the render layer.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Circle { radius: f32 },
    Rect { size: Vec2 },
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BodyColor(pub Color);

/// Optional outline color (pigs).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BodyStroke(pub Color);

/// Tag for the mesh child spawned for a body.
#[derive(Component)]
pub struct BodyVisual;
