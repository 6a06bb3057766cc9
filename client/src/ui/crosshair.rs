//! Centre dot marking the view ray used for panel focus.
//!
//! Visible only while walking; tinted with the accent colour over a panel.

use bevy::prelude::*;

use super::styles::ACCENT_COLOR;
use crate::panels::FocusedPanel;
use crate::states::PointerLock;

const DOT_IDLE: Color = Color::srgba(1.0, 1.0, 1.0, 0.85);

pub struct CrosshairPlugin;

impl Plugin for CrosshairPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_crosshair);
        app.add_systems(OnEnter(PointerLock::Locked), show_crosshair);
        app.add_systems(OnEnter(PointerLock::Unlocked), hide_crosshair);
        app.add_systems(Update, tint_crosshair);
    }
}

/// Marker component for the crosshair root
#[derive(Component)]
pub struct Crosshair;

#[derive(Component)]
pub struct CrosshairDot;

fn spawn_crosshair(mut commands: Commands) {
    commands
        .spawn((
            Crosshair,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Hidden,
            // Ensure it doesn't block mouse input
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                CrosshairDot,
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(DOT_IDLE),
                BorderRadius::all(Val::Px(2.0)),
            ));
        });
}

fn show_crosshair(mut roots: Query<&mut Visibility, With<Crosshair>>) {
    for mut visibility in roots.iter_mut() {
        *visibility = Visibility::Inherited;
    }
}

fn hide_crosshair(mut roots: Query<&mut Visibility, With<Crosshair>>) {
    for mut visibility in roots.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}

fn tint_crosshair(
    focused: Res<FocusedPanel>,
    mut dots: Query<&mut BackgroundColor, With<CrosshairDot>>,
) {
    if !focused.is_changed() {
        return;
    }
    let color = if focused.0.is_some() { ACCENT_COLOR } else { DOT_IDLE };
    for mut background in dots.iter_mut() {
        background.0 = color;
    }
}
