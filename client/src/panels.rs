//! Web panels
//!
//! Panels are flat screens placed from the scene config. Looking at one shows
//! its title in the HUD, and `E` copies its link to the clipboard.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use skyroom_shared::{PanelSource, SceneConfig};

use crate::states::PointerLock;
use crate::systems::{hex_color, walk_rigs, MainCamera};
use crate::ui::styles::{TEXT_COLOR, hint_text_style};

/// How far the view ray reaches when picking a panel.
const PANEL_FOCUS_RANGE: f32 = 2000.0;

/// Thickness of the panel collider and frame.
const PANEL_DEPTH: f32 = 2.0;

/// Border of the accent frame around each screen.
const FRAME_MARGIN: f32 = 6.0;

/// Collision group of panel colliders. Panels block the view ray but are not ground.
pub const PANEL_GROUP: Group = Group::GROUP_2;

pub fn panel_collider(width: f32, height: f32) -> (Collider, CollisionGroups) {
    (
        Collider::cuboid(width * 0.5 + FRAME_MARGIN, height * 0.5 + FRAME_MARGIN, PANEL_DEPTH * 0.5),
        CollisionGroups::new(PANEL_GROUP, Group::ALL),
    )
}

pub struct PanelsPlugin;

impl Plugin for PanelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FocusedPanel>();
        app.add_systems(Startup, (spawn_panels, spawn_panel_hint));
        app.add_systems(
            Update,
            (update_focused_panel, copy_focused_panel_link)
                .chain()
                .after(walk_rigs)
                .run_if(in_state(PointerLock::Locked)),
        );
        app.add_systems(Update, update_panel_hint);
        app.add_systems(OnEnter(PointerLock::Unlocked), clear_focus);
    }
}

// =============================================================================
// COMPONENTS / RESOURCES
// =============================================================================

#[derive(Component)]
pub struct Panel {
    pub source: PanelSource,
}

/// Panel under the crosshair, if any.
#[derive(Resource, Default)]
pub struct FocusedPanel(pub Option<Entity>);

#[derive(Component)]
struct PanelHint;

// =============================================================================
// SPAWNING
// =============================================================================

fn spawn_panels(
    mut commands: Commands,
    config: Res<SceneConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let screen = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        perceptual_roughness: 0.6,
        ..default()
    });

    for spec in &config.panels {
        let [width, height] = spec.size;
        let frame = materials.add(StandardMaterial {
            base_color: hex_color(spec.source.accent()),
            perceptual_roughness: 0.5,
            ..default()
        });

        let screen_mesh = meshes.add(Rectangle::new(width, height));
        let face_offset = PANEL_DEPTH * 0.5 + 0.05;

        commands
            .spawn((
                Panel {
                    source: spec.source.clone(),
                },
                Mesh3d(meshes.add(Cuboid::new(
                    width + FRAME_MARGIN * 2.0,
                    height + FRAME_MARGIN * 2.0,
                    PANEL_DEPTH,
                ))),
                MeshMaterial3d(frame),
                spec.transform(),
                panel_collider(width, height),
            ))
            .with_children(|parent| {
                // Screens on both faces; the page is visible from either side.
                parent.spawn((
                    Mesh3d(screen_mesh.clone()),
                    MeshMaterial3d(screen.clone()),
                    Transform::from_xyz(0.0, 0.0, face_offset),
                ));
                parent.spawn((
                    Mesh3d(screen_mesh),
                    MeshMaterial3d(screen.clone()),
                    Transform::from_xyz(0.0, 0.0, -face_offset)
                        .with_rotation(Quat::from_rotation_y(std::f32::consts::PI)),
                ));
            });
    }

    info!("Spawned {} panels", config.panels.len());
}

fn spawn_panel_hint(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                bottom: Val::Px(48.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                PanelHint,
                Text::new(""),
                hint_text_style(),
                TextColor(TEXT_COLOR),
                Visibility::Hidden,
            ));
        });
}

// =============================================================================
// FOCUS
// =============================================================================

fn update_focused_panel(
    rapier_context: ReadRapierContext,
    cameras: Query<&GlobalTransform, With<MainCamera>>,
    panels: Query<(), With<Panel>>,
    mut focused: ResMut<FocusedPanel>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };
    let Ok(camera) = cameras.single() else {
        return;
    };

    let hit = context
        .cast_ray(
            camera.translation(),
            camera.forward().as_vec3(),
            PANEL_FOCUS_RANGE,
            true,
            QueryFilter::default(),
        )
        .map(|(entity, _)| entity)
        .filter(|entity| panels.contains(*entity));

    if focused.0 != hit {
        focused.0 = hit;
    }
}

fn clear_focus(mut focused: ResMut<FocusedPanel>) {
    focused.0 = None;
}

fn update_panel_hint(
    focused: Res<FocusedPanel>,
    panels: Query<&Panel>,
    mut hints: Query<(&mut Text, &mut Visibility), With<PanelHint>>,
) {
    if !focused.is_changed() {
        return;
    }
    let Ok((mut text, mut visibility)) = hints.single_mut() else {
        return;
    };

    match focused.0.and_then(|entity| panels.get(entity).ok()) {
        Some(panel) => {
            text.0 = format!("{}  [E] copy link", panel.source.title());
            *visibility = Visibility::Inherited;
        }
        None => *visibility = Visibility::Hidden,
    }
}

fn copy_focused_panel_link(
    keyboard: Res<ButtonInput<KeyCode>>,
    focused: Res<FocusedPanel>,
    panels: Query<&Panel>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }
    let Some(panel) = focused.0.and_then(|entity| panels.get(entity).ok()) else {
        return;
    };

    let url = panel.source.embed_url();
    if url.is_empty() {
        return;
    }

    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(url.as_str())) {
        Ok(()) => info!("Copied {url} to the clipboard"),
        Err(e) => warn!("Could not copy panel link: {e}"),
    }
}
