pub mod layout;
pub mod spawn;

// Re-export primary plugin & resources for convenience
pub use layout::{LayoutSpace, WorldBounds};
pub use spawn::{LevelPlugin, LevelSummary};
