//! World systems
//!
//! Spawning the ground, sun, ambient fill and the optional box scatter.

use bevy::light::{light_consts::lux, SunDisk};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use skyroom_shared::{SceneConfig, BOX_SIZE};

use super::rendering::{sun_rotation, SunLight};

/// Half thickness of the ground collider slab.
const GROUND_HALF_THICKNESS: f32 = 0.5;

// =============================================================================
// COMPONENTS
// =============================================================================

/// Root entity for the static room geometry
#[derive(Component)]
pub struct RoomRoot;

#[derive(Component)]
pub struct Ground;

#[derive(Component)]
pub struct ScatteredBox;

/// Slab under a square ground plane, top face flush with the plane.
pub fn ground_collider(size: f32) -> Collider {
    Collider::compound(vec![(
        Vec3::new(0.0, -GROUND_HALF_THICKNESS, 0.0),
        Quat::IDENTITY,
        Collider::cuboid(size * 0.5, GROUND_HALF_THICKNESS, size * 0.5),
    )])
}

/// 0xRRGGBB to an sRGB colour.
pub fn hex_color(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

// =============================================================================
// SPAWNING
// =============================================================================

/// Spawn the static room
pub fn spawn_world(
    mut commands: Commands,
    config: Res<SceneConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let root = commands
        .spawn((RoomRoot, Transform::default(), Visibility::default()))
        .id();

    // --- Sun (direction follows the sky settings) ---
    let sun = commands
        .spawn((
            SunLight,
            DirectionalLight {
                illuminance: lux::RAW_SUNLIGHT,
                shadows_enabled: true,
                ..default()
            },
            SunDisk::EARTH,
            Transform::from_rotation(sun_rotation(&config.sky)),
        ))
        .id();
    commands.entity(root).add_child(sun);

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        affects_lightmapped_meshes: true,
    });

    // --- Ground ---
    let ground = &config.ground;
    let ground_entity = commands
        .spawn((
            Ground,
            Mesh3d(meshes.add(Plane3d::default().mesh().size(ground.size, ground.size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: hex_color(ground.color),
                perceptual_roughness: 0.9,
                reflectance: 0.2,
                ..default()
            })),
            Transform::from_xyz(0.0, ground.height, 0.0),
            ground_collider(ground.size),
        ))
        .id();
    commands.entity(root).add_child(ground_entity);

    // --- Box scatter ---
    let boxes = config.scatter.generate();
    if !boxes.is_empty() {
        let mesh = meshes.add(Cuboid::from_length(BOX_SIZE));
        let half = BOX_SIZE * 0.5;
        for scattered in &boxes {
            let entity = commands
                .spawn((
                    ScatteredBox,
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: scattered.color(),
                        perceptual_roughness: 0.4,
                        ..default()
                    })),
                    Transform::from_translation(scattered.position),
                    Collider::cuboid(half, half, half),
                ))
                .id();
            commands.entity(root).add_child(entity);
        }
        info!("Scattered {} boxes", boxes.len());
    }

    info!(
        "Room spawned: ground {:.0}x{:.0} at y={:.1}",
        ground.size, ground.size, ground.height
    );
}
