pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use app::game::{ConfigReport, GamePlugin, GameplayPlugin};
pub use core::components::{Bird, BodyShape, Pig, PortfolioPig, SlingBase, Structure};
pub use core::config::{config::GameConfig, config::WindowConfig};
pub use core::level::{LayoutSpace, WorldBounds};
pub use gameplay::bird_queue::BirdQueue;
pub use gameplay::damage::{SectionUnlocked, UnlockedSections};
pub use gameplay::sling::{SlingPhase, SlingState};
