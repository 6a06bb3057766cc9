//! Instructions overlay shown while the pointer is free.
//!
//! Pressing "CLICK TO WALK" requests the lock; the overlay goes away with it.

use bevy::app::AppExit;
use bevy::prelude::*;

use super::styles::*;
use crate::states::PointerLock;

pub struct BlockerPlugin;

impl Plugin for BlockerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PointerLock::Unlocked), spawn_blocker);
        app.add_systems(OnExit(PointerLock::Unlocked), despawn_blocker);
        app.add_systems(
            Update,
            (button_interactions, handle_blocker_actions).run_if(in_state(PointerLock::Unlocked)),
        );
    }
}

/// Marker for the overlay root
#[derive(Component)]
struct BlockerRoot;

#[derive(Component, Clone, Copy)]
enum BlockerButton {
    Walk,
    Quit,
}

const CONTROLS: &[(&str, &str)] = &[
    ("Move", "W A S D / Arrow keys"),
    ("Jump", "Space"),
    ("Look", "Mouse"),
    ("Copy panel link", "E"),
    ("Release cursor", "Esc"),
];

fn spawn_blocker(mut commands: Commands) {
    commands
        .spawn((
            BlockerRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BLOCKER_BACKGROUND),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(32.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BackgroundColor(CARD_BACKGROUND),
                    BorderColor::from(BUTTON_BORDER),
                    BorderRadius::all(Val::Px(8.0)),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("SKYROOM"),
                        title_text_style(),
                        TextColor(ACCENT_COLOR),
                        Node {
                            margin: UiRect::bottom(Val::Px(24.0)),
                            ..default()
                        },
                    ));

                    spawn_button(card, "CLICK TO WALK", BlockerButton::Walk);

                    for (action, keys) in CONTROLS {
                        card.spawn((
                            Text::new(format!("{action}: {keys}")),
                            hint_text_style(),
                            TextColor(TEXT_MUTED),
                            Node {
                                margin: UiRect::top(Val::Px(6.0)),
                                ..default()
                            },
                        ));
                    }

                    spawn_button(card, "QUIT", BlockerButton::Quit);
                });
        });
}

fn spawn_button(parent: &mut ChildSpawnerCommands<'_>, text: &str, action: BlockerButton) {
    parent
        .spawn((
            Button,
            action,
            button_style(),
            BackgroundColor(BUTTON_NORMAL),
            BorderColor::from(BUTTON_BORDER),
            BorderRadius::all(Val::Px(4.0)),
        ))
        .with_children(|btn| {
            btn.spawn((Text::new(text), button_text_style(), TextColor(TEXT_COLOR)));
        });
}

fn despawn_blocker(mut commands: Commands, query: Query<Entity, With<BlockerRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

fn button_interactions(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut bg_color) in buttons.iter_mut() {
        *bg_color = match interaction {
            Interaction::Pressed => BackgroundColor(BUTTON_PRESSED),
            Interaction::Hovered => BackgroundColor(BUTTON_HOVERED),
            Interaction::None => BackgroundColor(BUTTON_NORMAL),
        };
    }
}

fn handle_blocker_actions(
    buttons: Query<(&Interaction, &BlockerButton), Changed<Interaction>>,
    mut next_state: ResMut<NextState<PointerLock>>,
    mut exit: MessageWriter<AppExit>,
) {
    for (interaction, action) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match action {
            BlockerButton::Walk => next_state.set(PointerLock::Locked),
            BlockerButton::Quit => {
                info!("Exiting...");
                exit.write(AppExit::Success);
            }
        }
    }
}
