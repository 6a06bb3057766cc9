//! Rendering systems
//!
//! Camera rig setup and the sky (atmosphere, exposure, sun direction).

use bevy::camera::Exposure;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::AtmosphereEnvironmentMapLight;
use bevy::pbr::{Atmosphere, AtmosphereSettings};
use bevy::prelude::*;
use skyroom_shared::{SceneConfig, SkySettings, WalkController};

use crate::input::LookAngles;

// =============================================================================
// COMPONENTS
// =============================================================================

/// The first-person camera. Also the walk rig.
#[derive(Component)]
pub struct MainCamera;

/// Marker for the directional light that follows the sky's sun
#[derive(Component)]
pub struct SunLight;

// =============================================================================
// SKY MAPPING
// =============================================================================

/// Earth atmosphere scaled by the sky sliders.
pub fn atmosphere_for(sky: &SkySettings) -> Atmosphere {
    let scale = sky.scattering();
    let earth = Atmosphere::EARTH;
    Atmosphere {
        rayleigh_scattering: earth.rayleigh_scattering * scale.rayleigh,
        mie_scattering: earth.mie_scattering * scale.mie,
        mie_asymmetry: scale.mie_asymmetry,
        ..earth
    }
}

/// Directional lights shine along -Z; turn that onto the sun's rays.
pub fn sun_rotation(sky: &SkySettings) -> Quat {
    Quat::from_rotation_arc(Vec3::NEG_Z, sky.sun_rays())
}

// =============================================================================
// SETUP
// =============================================================================

/// Spawn the camera rig at the configured start point.
pub fn setup_camera_rig(mut commands: Commands, config: Res<SceneConfig>) {
    let (yaw, pitch) = config.camera.initial_look();
    let look = LookAngles::new(yaw, pitch);
    let start = Vec3::from_array(config.start_position);
    let sky = &config.sky;

    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.camera.fov_degrees.to_radians(),
            near: config.camera.near,
            far: config.camera.far,
            ..default()
        }),
        Tonemapping::AcesFitted,
        Exposure { ev100: sky.ev100() },
        atmosphere_for(sky),
        AtmosphereSettings::default(),
        // Sky-driven ambient lighting for the scene.
        AtmosphereEnvironmentMapLight {
            intensity: 1.0,
            affects_lightmapped_mesh_diffuse: true,
            size: UVec2::new(64, 64),
        },
        Transform::from_translation(start).with_rotation(look.rotation()),
        look,
        WalkController::new(config.movement),
    ));

    info!(
        "Camera rig at {:?} (yaw {:.2}, pitch {:.2})",
        start, yaw, pitch
    );
}

// =============================================================================
// SKY UPDATES
// =============================================================================

/// Push edited sky values into the atmosphere, exposure and sun light.
pub fn apply_sky_settings(
    sky: Res<SkySettings>,
    mut cameras: Query<(&mut Atmosphere, &mut Exposure), With<MainCamera>>,
    mut suns: Query<&mut Transform, With<SunLight>>,
) {
    for (mut atmosphere, mut exposure) in cameras.iter_mut() {
        *atmosphere = atmosphere_for(&sky);
        exposure.ev100 = sky.ev100();
    }

    for mut transform in suns.iter_mut() {
        transform.rotation = sun_rotation(&sky);
    }

    debug!(
        "Sky updated: elevation {:.1}, azimuth {:.1}, exposure {:.4}",
        sky.elevation, sky.azimuth, sky.exposure
    );
}
