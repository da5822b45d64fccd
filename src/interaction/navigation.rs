use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::gameplay::damage::SectionUnlocked;

const LOCKED_BG: Color = Color::srgba(0.2, 0.2, 0.25, 0.6);
const UNLOCKED_BG: Color = Color::srgb(0.16, 0.5, 0.73);
const HOVER_BG: Color = Color::srgb(0.22, 0.6, 0.86);
const LOCKED_TEXT: Color = Color::srgba(1.0, 1.0, 1.0, 0.45);
const UNLOCKED_TEXT: Color = Color::WHITE;

/// Request to show a portfolio section.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SectionNavigation {
    pub section: String,
    pub title: String,
}

/// Section the visitor navigated to last.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct CurrentSection(pub Option<String>);

#[derive(Component, Debug)]
pub struct NavBar;

#[derive(Component, Debug, Clone)]
pub struct NavButton {
    pub section: String,
    pub title: String,
    pub unlocked: bool,
}

pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentSection>()
            .add_event::<SectionNavigation>()
            .add_event::<SectionUnlocked>()
            .add_systems(Startup, spawn_nav_bar)
            .add_systems(
                Update,
                (unlock_nav_buttons, nav_button_interact, follow_navigation).chain(),
            );
    }
}

fn spawn_nav_bar(mut commands: Commands, cfg: Res<GameConfig>) {
    commands
        .spawn((
            NavBar,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(6.0),
                ..default()
            },
        ))
        .with_children(|bar| {
            for spec in &cfg.level.portfolio_pigs {
                bar.spawn((
                    Button,
                    NavButton {
                        section: spec.section.clone(),
                        title: spec.title.clone(),
                        unlocked: false,
                    },
                    Node {
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                        ..default()
                    },
                    BackgroundColor(LOCKED_BG),
                ))
                .with_child((
                    Text::new(spec.title.clone()),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(LOCKED_TEXT),
                ));
            }
        });
}

fn unlock_nav_buttons(
    mut ev: EventReader<SectionUnlocked>,
    mut buttons: Query<(&mut NavButton, &mut BackgroundColor, Option<&Children>)>,
    mut texts: Query<&mut TextColor>,
) {
    for unlocked in ev.read() {
        let mut found = false;
        for (mut btn, mut bg, children) in buttons.iter_mut() {
            if btn.section != unlocked.section {
                continue;
            }
            found = true;
            btn.unlocked = true;
            bg.0 = UNLOCKED_BG;
            for child in children.into_iter().flatten() {
                if let Ok(mut color) = texts.get_mut(*child) {
                    color.0 = UNLOCKED_TEXT;
                }
            }
        }
        if !found {
            warn!(target: "navigation", section = %unlocked.section, "no nav button for unlocked section");
        }
    }
}

fn nav_button_interact(
    mut q: Query<(&Interaction, &NavButton, &mut BackgroundColor), Changed<Interaction>>,
    mut ev_nav: EventWriter<SectionNavigation>,
) {
    for (interaction, btn, mut bg) in q.iter_mut() {
        if !btn.unlocked {
            if *interaction == Interaction::Pressed {
                debug!(target: "navigation", section = %btn.section, "section still locked");
            }
            continue;
        }
        match interaction {
            Interaction::Pressed => {
                ev_nav.write(SectionNavigation {
                    section: btn.section.clone(),
                    title: btn.title.clone(),
                });
            }
            Interaction::Hovered => bg.0 = HOVER_BG,
            Interaction::None => bg.0 = UNLOCKED_BG,
        }
    }
}

fn follow_navigation(mut ev: EventReader<SectionNavigation>, mut current: ResMut<CurrentSection>) {
    for nav in ev.read() {
        info!(target: "navigation", section = %nav.section, title = %nav.title, "navigating to section");
        current.0 = Some(nav.section.clone());
    }
}
