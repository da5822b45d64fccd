pub mod camera;
pub mod hud;
pub mod shapes;
pub mod sling_band;
