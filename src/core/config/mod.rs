pub mod config;

pub use config::{
    color_or, parse_color, BirdMaterial, BirdQueueConfig, CircleSpec, ColorsConfig, DamageConfig,
    GameConfig, GravityConfig, LevelConfig, MaterialConfig, PigPlacement, PigSize, PigsConfig,
    PortfolioPigSpec, RectSpec, SlingConfig, StructureKind, StructurePlacement, StructuresConfig,
    WindowConfig, WoodenStructuresConfig,
};
