use bevy::prelude::*;

use crate::gameplay::bird_queue::BirdQueue;
use crate::gameplay::damage::{SectionUnlocked, UnlockedSections};
use crate::gameplay::sling::{SlingPhase, SlingState};
use crate::interaction::navigation::SectionNavigation;

const BANNER_SECS: f32 = 3.0;

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct BannerText;

/// Transient message shown at the top of the screen.
#[derive(Resource, Debug, Default)]
pub struct Banner {
    pub text: String,
    pub remaining: f32,
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Banner>()
            .add_event::<SectionUnlocked>()
            .add_event::<SectionNavigation>()
            .add_systems(Startup, spawn_hud)
            .add_systems(Update, (update_hud_text, queue_banner, show_banner).chain());
    }
}

/// Status line: birds left plus a hint for the current phase.
pub fn hud_line(remaining: usize, total: usize, unlocked: usize, sections: usize, phase: SlingPhase) -> String {
    let hint = match phase {
        SlingPhase::Ready => "drag the bird back and release",
        SlingPhase::Dragging => "release to launch",
        SlingPhase::Flying { .. } => "",
        SlingPhase::Reloading { .. } => "reloading",
        SlingPhase::Exhausted => "out of birds - press R to reset",
    };
    let mut line = format!("Birds {remaining}/{total}   Sections {unlocked}/{sections}");
    if !hint.is_empty() {
        line.push_str("   ");
        line.push_str(hint);
    }
    line
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        HudText,
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.1, 0.1, 0.15)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
    commands.spawn((
        BannerText,
        Text::new(""),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::WHITE),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(60.0),
            left: Val::Percent(35.0),
            padding: UiRect::all(Val::Px(10.0)),
            ..default()
        },
        Visibility::Hidden,
    ));
}

fn update_hud_text(
    queue: Res<BirdQueue>,
    sling: Res<SlingState>,
    unlocked: Res<UnlockedSections>,
    cfg: Res<crate::core::config::GameConfig>,
    mut q: Query<&mut Text, With<HudText>>,
) {
    if !(queue.is_changed() || sling.is_changed() || unlocked.is_changed()) {
        return;
    }
    let line = hud_line(
        queue.remaining(),
        queue.total(),
        unlocked.len(),
        cfg.level.portfolio_pigs.len(),
        sling.phase,
    );
    for mut text in q.iter_mut() {
        if text.0 != line {
            text.0 = line.clone();
        }
    }
}

fn queue_banner(
    mut ev_unlocked: EventReader<SectionUnlocked>,
    mut ev_nav: EventReader<SectionNavigation>,
    mut banner: ResMut<Banner>,
) {
    for u in ev_unlocked.read() {
        banner.text = format!("Unlocked \"{}\"!", u.title);
        banner.remaining = BANNER_SECS;
    }
    for n in ev_nav.read() {
        banner.text = format!("Section: {}", n.title);
        banner.remaining = BANNER_SECS;
    }
}

fn show_banner(
    time: Res<Time>,
    mut banner: ResMut<Banner>,
    mut q: Query<(&mut Text, &mut Visibility), With<BannerText>>,
) {
    let visible = banner.remaining > 0.0;
    if visible {
        banner.remaining -= time.delta_secs();
    }
    for (mut text, mut vis) in q.iter_mut() {
        if visible && text.0 != banner.text {
            text.0 = banner.text.clone();
        }
        vis.set_if_neq(if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        });
    }
}
