use bevy::prelude::*;
use serde::Deserialize;
use std::{collections::HashSet, fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 720.0,
            title: "Sling Portfolio".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GravityConfig {
    pub y: f32,
}
impl Default for GravityConfig {
    fn default() -> Self {
        Self { y: -1000.0 }
    }
}

/// Hex color strings for the fixed scenery.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ColorsConfig {
    pub sling_base: String,
    pub projectile: String,
    pub sling_ground: String,
    pub target_ground: String,
    pub background: String,
}
impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            sling_base: "#8b6113ff".into(),
            projectile: "#FF4444".into(),
            sling_ground: "#654321".into(),
            target_ground: "#8b7355".into(),
            background: "#87CEEB".into(),
        }
    }
}

/// Axis aligned box in layout space (center + full size).
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct RectSpec {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}
impl RectSpec {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct CircleSpec {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}
impl CircleSpec {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StructuresConfig {
    pub sling_ground: RectSpec,
    pub target_ground: RectSpec,
}
impl Default for StructuresConfig {
    fn default() -> Self {
        Self {
            sling_ground: RectSpec::new(200.0, 490.0, 250.0, 25.0),
            target_ground: RectSpec::new(1000.0, 525.0, 600.0, 25.0),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SlingLineConfig {
    pub width: f32,
    pub color: String,
}
impl Default for SlingLineConfig {
    fn default() -> Self {
        Self {
            width: 3.0,
            color: "#b31111ff".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SlingConfig {
    pub base: RectSpec,
    pub projectile: CircleSpec,
    /// Spring joint stiffness between the base and the loaded bird.
    pub stiffness: f32,
    pub damping: f32,
    /// Rest length of the band.
    pub length: f32,
    pub line: SlingLineConfig,
    /// Releases at or below this pull distance are cancelled.
    pub min_pull_distance: f32,
    /// Launch speed (px/s) gained per pixel of pull.
    pub speed_per_pixel: f32,
    pub max_launch_speed: f32,
    pub grab_radius: f32,
    pub drag_follow_gain: f32,
    pub drag_max_speed: f32,
    pub reset_delay_secs: f32,
    pub rest_speed: f32,
    pub rest_secs: f32,
    pub max_flight_secs: f32,
}
impl Default for SlingConfig {
    fn default() -> Self {
        Self {
            base: RectSpec::new(300.0, 450.0, 20.0, 80.0),
            projectile: CircleSpec {
                x: 300.0,
                y: 350.0,
                r: 15.0,
            },
            stiffness: 40.0,
            damping: 4.0,
            length: 80.0,
            line: SlingLineConfig::default(),
            min_pull_distance: 20.0,
            speed_per_pixel: 9.0,
            max_launch_speed: 1400.0,
            grab_radius: 40.0,
            drag_follow_gain: 12.0,
            drag_max_speed: 1500.0,
            reset_delay_secs: 1.0,
            rest_speed: 8.0,
            rest_secs: 1.5,
            max_flight_secs: 8.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BirdQueueConfig {
    pub total_birds: usize,
    pub start_x: f32,
    pub start_y: f32,
    pub spacing: f32,
    pub radius: f32,
    pub colors: Vec<String>,
}
impl Default for BirdQueueConfig {
    fn default() -> Self {
        Self {
            total_birds: 3,
            start_x: 120.0,
            start_y: 462.0,
            spacing: 35.0,
            radius: 15.0,
            colors: vec!["#FF4444".into(), "#FFB400".into(), "#3D9DF2".into()],
        }
    }
}

/// Physical material shared by a family of bodies.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct MaterialConfig {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    /// Linear damping applied while airborne.
    pub air_friction: f32,
}
impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: 0.5,
            restitution: 0.2,
            air_friction: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WoodenColors {
    pub plank: String,
    pub pillar: String,
    pub block: String,
}
impl Default for WoodenColors {
    fn default() -> Self {
        Self {
            plank: "#D2691E".into(),
            pillar: "#CD853F".into(),
            block: "#A0522D".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WoodenSizes {
    pub plank_length: f32,
    pub plank_thickness: f32,
    pub pillar_height: f32,
    pub pillar_thickness: f32,
    pub block_size: f32,
}
impl Default for WoodenSizes {
    fn default() -> Self {
        Self {
            plank_length: 80.0,
            plank_thickness: 12.0,
            pillar_height: 60.0,
            pillar_thickness: 12.0,
            block_size: 25.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WoodenStructuresConfig {
    pub colors: WoodenColors,
    pub sizes: WoodenSizes,
    pub beam: MaterialConfig,
    pub block: MaterialConfig,
}
impl Default for WoodenStructuresConfig {
    fn default() -> Self {
        Self {
            colors: WoodenColors::default(),
            sizes: WoodenSizes::default(),
            beam: MaterialConfig {
                density: 1.0,
                friction: 0.8,
                restitution: 0.2,
                air_friction: 0.0,
            },
            block: MaterialConfig {
                density: 2.0,
                friction: 0.9,
                restitution: 0.1,
                air_friction: 0.0,
            },
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PigColors {
    pub small: String,
    pub medium: String,
    pub large: String,
}
impl Default for PigColors {
    fn default() -> Self {
        Self {
            small: "#98FB98".into(),
            medium: "#90EE90".into(),
            large: "#7CFC00".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PigSizes {
    pub small: f32,
    pub medium: f32,
    pub large: f32,
}
impl Default for PigSizes {
    fn default() -> Self {
        Self {
            small: 15.0,
            medium: 20.0,
            large: 28.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PigsConfig {
    pub colors: PigColors,
    pub sizes: PigSizes,
    pub material: MaterialConfig,
    pub portfolio_radius: f32,
    pub portfolio_material: MaterialConfig,
    /// Outline color drawn around every pig.
    pub stroke: String,
}
impl Default for PigsConfig {
    fn default() -> Self {
        Self {
            colors: PigColors::default(),
            sizes: PigSizes::default(),
            material: MaterialConfig {
                density: 1.5,
                friction: 0.7,
                restitution: 0.3,
                air_friction: 0.0,
            },
            portfolio_radius: 25.0,
            portfolio_material: MaterialConfig {
                density: 2.0,
                friction: 0.8,
                restitution: 0.4,
                air_friction: 0.0,
            },
            stroke: "#2E5E2E".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Plank,
    Pillar,
    Block,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct StructurePlacement {
    pub kind: StructureKind,
    pub x: f32,
    pub y: f32,
}
impl StructurePlacement {
    pub const fn new(kind: StructureKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PigSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct PigPlacement {
    pub size: PigSize,
    pub x: f32,
    pub y: f32,
}

/// A pig carrying one portfolio section.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PortfolioPigSpec {
    pub section: String,
    pub title: String,
    pub x: f32,
    pub y: f32,
    pub color: String,
    #[serde(default)]
    pub label: String,
}
impl PortfolioPigSpec {
    fn new(section: &str, title: &str, x: f32, y: f32, color: &str, label: &str) -> Self {
        Self {
            section: section.into(),
            title: title.into(),
            x,
            y,
            color: color.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LevelConfig {
    pub structures: Vec<StructurePlacement>,
    pub portfolio_pigs: Vec<PortfolioPigSpec>,
    pub pigs: Vec<PigPlacement>,
    pub walls: Vec<RectSpec>,
}
impl Default for LevelConfig {
    fn default() -> Self {
        use StructureKind::*;
        Self {
            structures: vec![
                StructurePlacement::new(Pillar, 900.0, 495.0),
                StructurePlacement::new(Pillar, 950.0, 495.0),
                StructurePlacement::new(Plank, 925.0, 465.0),
                StructurePlacement::new(Block, 925.0, 440.0),
                StructurePlacement::new(Pillar, 1000.0, 485.0),
                StructurePlacement::new(Pillar, 1050.0, 485.0),
                StructurePlacement::new(Plank, 1025.0, 455.0),
                StructurePlacement::new(Pillar, 1025.0, 425.0),
                StructurePlacement::new(Block, 1025.0, 400.0),
                StructurePlacement::new(Pillar, 1100.0, 495.0),
                StructurePlacement::new(Pillar, 1150.0, 495.0),
                StructurePlacement::new(Plank, 1125.0, 465.0),
                StructurePlacement::new(Block, 1125.0, 440.0),
            ],
            portfolio_pigs: vec![
                PortfolioPigSpec::new("proyectos", "Mis Proyectos", 850.0, 500.0, "#FF6B6B", "💼"),
                PortfolioPigSpec::new("experiencia", "Mi Experiencia", 1050.0, 350.0, "#4ECDC4", "🏆"),
                PortfolioPigSpec::new("habilidades", "Mis Habilidades", 1205.0, 480.0, "#45B7D1", "⚡"),
                PortfolioPigSpec::new("sobre-mi", "Sobre Mí", 800.0, 450.0, "#96CEB4", "👨‍💻"),
                PortfolioPigSpec::new("contacto", "Contacto", 1265.0, 500.0, "#FFEAA7", "📧"),
            ],
            pigs: Vec::new(),
            walls: Vec::new(),
        }
    }
}

/// Thresholds for the pig destruction heuristic.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DamageConfig {
    /// Seconds after spawn during which a pig may settle without being judged.
    pub grace_secs: f32,
    /// Linear speed (px/s) above which a pig counts as hit.
    pub impact_speed: f32,
    /// Distance (px) from the settled position above which a pig counts as knocked over.
    pub displacement: f32,
    /// Slack around the canvas before a body counts as out of bounds.
    pub bounds_margin: f32,
}
impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            grace_secs: 1.5,
            impact_speed: 320.0,
            displacement: 45.0,
            bounds_margin: 50.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub gravity: GravityConfig,
    pub colors: ColorsConfig,
    pub structures: StructuresConfig,
    pub sling: SlingConfig,
    pub bird_queue: BirdQueueConfig,
    pub birds: BirdMaterial,
    pub wooden_structures: WoodenStructuresConfig,
    pub pigs: PigsConfig,
    pub level: LevelConfig,
    pub damage: DamageConfig,
    pub rapier_debug: bool,
}

/// Bird body material; restitution is high so shots bounce off the towers.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Deref)]
#[serde(transparent)]
pub struct BirdMaterial(pub MaterialConfig);
impl Default for BirdMaterial {
    fn default() -> Self {
        Self(MaterialConfig {
            density: 1.0,
            friction: 0.1,
            restitution: 0.8,
            air_friction: 0.3,
        })
    }
}

/// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` into a color.
pub fn parse_color(hex: &str) -> Result<Color, String> {
    Srgba::hex(hex.trim())
        .map(Color::from)
        .map_err(|e| format!("invalid color '{hex}': {e}"))
}

/// Like [`parse_color`] but never fails; bad input yields `fallback`.
pub fn color_or(hex: &str, fallback: Color) -> Color {
    parse_color(hex).unwrap_or(fallback)
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        Self::from_ron_str(&data)
    }
    pub fn from_ron_str(data: &str) -> Result<Self, String> {
        ron::from_str(data).map_err(|e| format!("parse RON: {e}"))
    }
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
    /// Merge every readable file in order (later maps override earlier keys).
    /// Returns the config, the files used and the per-file problems encountered.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let existing = bm.iter_mut().find(|(ek, _)| **ek == k).map(|(_, ev)| ev);
                        match existing {
                            Some(ev) => merge_value(ev, v),
                            None => {
                                bm.insert(k, v);
                            }
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (GameConfig::default(), used, errors)
            }
        }
    }

    /// Non-fatal sanity checks; each entry is a human readable warning.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.gravity.y.abs() < 1e-4 {
            w.push("gravity.y magnitude near zero; launched birds will not fall".into());
        }
        if self.gravity.y > 0.0 {
            w.push(format!(
                "gravity.y is positive ({}); the world is Y-up so bodies will fall upwards",
                self.gravity.y
            ));
        }

        let mut check_color = |label: &str, hex: &str| {
            if let Err(e) = parse_color(hex) {
                w.push(format!("{label}: {e}"));
            }
        };
        check_color("colors.sling_base", &self.colors.sling_base);
        check_color("colors.projectile", &self.colors.projectile);
        check_color("colors.sling_ground", &self.colors.sling_ground);
        check_color("colors.target_ground", &self.colors.target_ground);
        check_color("colors.background", &self.colors.background);
        check_color("sling.line.color", &self.sling.line.color);
        check_color("wooden_structures.colors.plank", &self.wooden_structures.colors.plank);
        check_color("wooden_structures.colors.pillar", &self.wooden_structures.colors.pillar);
        check_color("wooden_structures.colors.block", &self.wooden_structures.colors.block);
        check_color("pigs.colors.small", &self.pigs.colors.small);
        check_color("pigs.colors.medium", &self.pigs.colors.medium);
        check_color("pigs.colors.large", &self.pigs.colors.large);
        check_color("pigs.stroke", &self.pigs.stroke);
        for (i, hex) in self.bird_queue.colors.iter().enumerate() {
            check_color(&format!("bird_queue.colors[{i}]"), hex);
        }
        for pig in &self.level.portfolio_pigs {
            check_color(&format!("level.portfolio_pigs[{}].color", pig.section), &pig.color);
        }

        let check_rect = |w: &mut Vec<String>, label: &str, r: &RectSpec| {
            if r.w <= 0.0 || r.h <= 0.0 {
                w.push(format!("{label} size must be > 0 (got {}x{})", r.w, r.h));
            }
        };
        check_rect(&mut w, "structures.sling_ground", &self.structures.sling_ground);
        check_rect(&mut w, "structures.target_ground", &self.structures.target_ground);
        check_rect(&mut w, "sling.base", &self.sling.base);
        for (i, wall) in self.level.walls.iter().enumerate() {
            check_rect(&mut w, &format!("level.walls[{i}]"), wall);
        }

        let s = &self.sling;
        if s.projectile.r <= 0.0 {
            w.push("sling.projectile.r must be > 0".into());
        }
        if s.length <= 0.0 {
            w.push("sling.length must be > 0".into());
        }
        if s.min_pull_distance < 0.0 {
            w.push("sling.min_pull_distance negative".into());
        }
        if s.min_pull_distance >= s.length + s.grab_radius {
            w.push(format!(
                "sling.min_pull_distance {} unreachable with length {} and grab_radius {}",
                s.min_pull_distance, s.length, s.grab_radius
            ));
        }
        if s.speed_per_pixel <= 0.0 {
            w.push("sling.speed_per_pixel must be > 0".into());
        }
        if s.max_launch_speed <= 0.0 {
            w.push("sling.max_launch_speed must be > 0".into());
        }
        if s.grab_radius <= 0.0 {
            w.push("sling.grab_radius must be > 0".into());
        }
        if s.stiffness <= 0.0 {
            w.push("sling.stiffness must be > 0".into());
        }
        if s.reset_delay_secs < 0.0 {
            w.push("sling.reset_delay_secs negative -> treated as 0".into());
        }
        if s.max_flight_secs <= 0.0 {
            w.push("sling.max_flight_secs must be > 0".into());
        }

        let q = &self.bird_queue;
        if q.total_birds == 0 {
            w.push("bird_queue.total_birds is 0; nothing can be launched".into());
        }
        if q.radius <= 0.0 {
            w.push("bird_queue.radius must be > 0".into());
        }
        if q.colors.is_empty() {
            w.push("bird_queue.colors empty; projectile color used for every bird".into());
        }

        let sizes = &self.wooden_structures.sizes;
        for (label, v) in [
            ("plank_length", sizes.plank_length),
            ("plank_thickness", sizes.plank_thickness),
            ("pillar_height", sizes.pillar_height),
            ("pillar_thickness", sizes.pillar_thickness),
            ("block_size", sizes.block_size),
        ] {
            if v <= 0.0 {
                w.push(format!("wooden_structures.sizes.{label} must be > 0"));
            }
        }
        let pig_sizes = &self.pigs.sizes;
        if pig_sizes.small <= 0.0 || pig_sizes.medium <= 0.0 || pig_sizes.large <= 0.0 {
            w.push("pigs.sizes must all be > 0".into());
        }
        if self.pigs.portfolio_radius <= 0.0 {
            w.push("pigs.portfolio_radius must be > 0".into());
        }
        for (label, m) in [
            ("birds", *self.birds),
            ("wooden_structures.beam", self.wooden_structures.beam),
            ("wooden_structures.block", self.wooden_structures.block),
            ("pigs.material", self.pigs.material),
            ("pigs.portfolio_material", self.pigs.portfolio_material),
        ] {
            if m.density <= 0.0 {
                w.push(format!("{label}.density must be > 0"));
            }
            if m.restitution < 0.0 {
                w.push(format!("{label}.restitution negative"));
            }
            if m.friction < 0.0 {
                w.push(format!("{label}.friction negative"));
            }
        }

        let mut seen = HashSet::new();
        for pig in &self.level.portfolio_pigs {
            if pig.section.trim().is_empty() {
                w.push("level.portfolio_pigs entry with empty section".into());
            } else if !seen.insert(pig.section.as_str()) {
                w.push(format!("duplicate portfolio section '{}'", pig.section));
            }
        }
        let ground = &self.structures.target_ground;
        let (left, right) = (ground.x - ground.w * 0.5, ground.x + ground.w * 0.5);
        let r = self.pigs.portfolio_radius;
        for pig in &self.level.portfolio_pigs {
            if pig.x - r < left || pig.x + r > right {
                w.push(format!(
                    "portfolio pig '{}' at x={} overhangs the target ground ({left}..{right}); it will roll off",
                    pig.section, pig.x
                ));
            }
        }
        if self.level.portfolio_pigs.is_empty() {
            w.push("level.portfolio_pigs empty; no section can be unlocked".into());
        }

        let d = &self.damage;
        if d.grace_secs < 0.0 {
            w.push("damage.grace_secs negative".into());
        }
        if d.impact_speed <= 0.0 {
            w.push("damage.impact_speed must be > 0".into());
        }
        if d.displacement <= 0.0 {
            w.push("damage.displacement must be > 0".into());
        }
        if d.bounds_margin < 0.0 {
            w.push("damage.bounds_margin negative".into());
        }
        w
    }

    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window.width, self.window.height)
    }
}
