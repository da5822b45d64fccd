use bevy::prelude::*;

use crate::core::config::GameConfig;

/// Maps between layout space (origin top-left, y down) and world space
/// (origin at the canvas center, y up).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LayoutSpace {
    pub width: f32,
    pub height: f32,
}

impl LayoutSpace {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_config(cfg: &GameConfig) -> Self {
        Self::new(cfg.window.width, cfg.window.height)
    }

    pub fn to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.width * 0.5, self.height * 0.5 - p.y)
    }

    pub fn to_layout(&self, w: Vec2) -> Vec2 {
        Vec2::new(w.x + self.width * 0.5, self.height * 0.5 - w.y)
    }

    pub fn world_transform(&self, p: Vec2) -> Transform {
        Transform::from_translation(self.to_world(p).extend(0.0))
    }
}

/// Region a body may occupy before it counts as lost. The top edge is open so
/// a steep shot may leave the screen and come back down.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub layout: LayoutSpace,
    pub margin: f32,
}

impl WorldBounds {
    pub fn new(layout: LayoutSpace, margin: f32) -> Self {
        Self { layout, margin }
    }

    pub fn from_config(cfg: &GameConfig) -> Self {
        Self::new(LayoutSpace::from_config(cfg), cfg.damage.bounds_margin.max(0.0))
    }

    /// `world` is a world-space position.
    pub fn is_out(&self, world: Vec2) -> bool {
        let p = self.layout.to_layout(world);
        p.x < -self.margin || p.x > self.layout.width + self.margin || p.y > self.layout.height + self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_world_round_trip_corners() {
        let space = LayoutSpace::new(1000.0, 600.0);
        assert_eq!(space.to_world(Vec2::ZERO), Vec2::new(-500.0, 300.0));
        assert_eq!(space.to_world(Vec2::new(1000.0, 600.0)), Vec2::new(500.0, -300.0));
        assert_eq!(space.to_world(Vec2::new(500.0, 300.0)), Vec2::ZERO);
        let p = Vec2::new(321.0, 45.0);
        assert_eq!(space.to_layout(space.to_world(p)), p);
    }

    #[test]
    fn bounds_open_at_top() {
        let space = LayoutSpace::new(1000.0, 600.0);
        let bounds = WorldBounds::new(space, 50.0);
        assert!(!bounds.is_out(space.to_world(Vec2::new(500.0, -400.0))));
        assert!(!bounds.is_out(space.to_world(Vec2::new(-49.0, 300.0))));
        assert!(bounds.is_out(space.to_world(Vec2::new(-51.0, 300.0))));
        assert!(bounds.is_out(space.to_world(Vec2::new(1051.0, 300.0))));
        assert!(bounds.is_out(space.to_world(Vec2::new(500.0, 651.0))));
        assert!(!bounds.is_out(space.to_world(Vec2::new(500.0, 649.0))));
    }
}
