use bevy::prelude::*;
use bevy_rapier2d::prelude::RapierDebugRenderPlugin;

use sling_portfolio::{ConfigReport, GameConfig, GamePlugin};

#[cfg(any(target_arch = "wasm32", feature = "embedded_config"))]
fn load_config() -> (GameConfig, ConfigReport) {
    // Embed base config (no layered local override when embedded).
    const RAW: &str = include_str!("../assets/config/game.ron");
    let mut report = ConfigReport {
        used: vec!["<embedded>/assets/config/game.ron".into()],
        ..Default::default()
    };
    let cfg = GameConfig::from_ron_str(RAW).unwrap_or_else(|e| {
        report.errors.push(format!("embedded config: {e}; using defaults"));
        GameConfig::default()
    });
    (cfg, report)
}

#[cfg(not(any(target_arch = "wasm32", feature = "embedded_config")))]
fn load_config() -> (GameConfig, ConfigReport) {
    use sling_portfolio::interaction::session::config_hot_reload::CONFIG_LAYERS;
    let (cfg, used, errors) = GameConfig::load_layered(CONFIG_LAYERS);
    let report = ConfigReport {
        used,
        // The local override layer is optional.
        errors: errors
            .into_iter()
            .filter(|e| !(e.contains("game.local.ron") && e.contains("read error")))
            .collect(),
        ..Default::default()
    };
    (cfg, report)
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        // Better panic messages on wasm
        console_error_panic_hook::set_once();
    }

    let (cfg, mut report) = load_config();
    report.warnings = cfg.validate();

    let mut app = App::new();
    app.insert_resource(cfg.clone())
        .insert_resource(report)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GamePlugin);

    // Wireframe is available whenever debug tools are compiled in (toggled with F1),
    // otherwise only when the config asks for it.
    if cfg!(feature = "debug") || cfg.rapier_debug {
        app.add_plugins(RapierDebugRenderPlugin {
            enabled: cfg.rapier_debug,
            ..default()
        });
    }
    app.run();
}
