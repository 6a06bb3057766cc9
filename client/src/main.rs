//! Skyroom client - first-person walk through a sky-lit room of web panels

mod input;
mod panels;
mod states;
mod systems;
mod ui;

use std::io::ErrorKind;
use std::path::Path;

use bevy::asset::AssetPlugin;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_egui::EguiPlugin;
use bevy_rapier3d::prelude::*;
use skyroom_shared::{
    load_scene_config_from_file, SceneConfig, SceneConfigError, SkySettings, SCENE_CONFIG_FILE,
};
use states::PointerLock;

/// Get the asset path - for bundled macOS apps, use path relative to executable
fn get_asset_path() -> String {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let bundled_assets = exe_dir.join("assets");
            if bundled_assets.exists() {
                return bundled_assets.to_string_lossy().to_string();
            }
        }
    }
    // Fall back to default "assets" folder (for development)
    "assets".to_string()
}

/// Read `scene.ron` from the asset folder, falling back to the stock room.
fn load_scene_config(asset_path: &str) -> SceneConfig {
    let path = Path::new(asset_path).join(SCENE_CONFIG_FILE);
    match load_scene_config_from_file(&path) {
        Ok(config) => {
            info!("Loaded scene config from {:?}", path);
            config
        }
        Err(SceneConfigError::Io { ref source, .. }) if source.kind() == ErrorKind::NotFound => {
            info!("No scene config at {:?}; using the stock room", path);
            SceneConfig::default()
        }
        Err(e) => {
            warn!("Ignoring scene config {:?}: {e}", path);
            SceneConfig::default()
        }
    }
}

fn main() {
    let asset_path = get_asset_path();

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Skyroom".into(),
                    resolution: WindowResolution::new(1280, 720),
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: asset_path.clone(),
                ..default()
            }),
    );
    app.add_plugins(FrameTimeDiagnosticsPlugin::default());

    // Colliders only: used for ground probes and view picking, nothing simulates.
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
    app.add_plugins(EguiPlugin::default());

    // Logging is up once DefaultPlugins are added.
    info!("Using assets at: {}", asset_path);
    let config = load_scene_config(&asset_path);
    app.insert_resource::<SkySettings>(config.sky.clone());
    app.insert_resource(config);

    app.init_state::<PointerLock>();

    app.add_plugins(panels::PanelsPlugin);
    app.add_plugins(ui::BlockerPlugin);
    app.add_plugins(ui::SkyPanelPlugin);
    app.add_plugins(ui::CrosshairPlugin);

    app.add_systems(Startup, (systems::setup_camera_rig, systems::spawn_world));

    app.add_systems(OnEnter(PointerLock::Locked), systems::enter_locked);
    app.add_systems(OnEnter(PointerLock::Unlocked), systems::enter_unlocked);

    // Input -> walk, every frame
    app.add_systems(
        Update,
        (
            input::handle_keyboard_input,
            input::handle_mouse_look,
            systems::walk_rigs,
        )
            .chain(),
    );
    app.add_systems(
        Update,
        (
            input::unlock_on_escape.run_if(in_state(PointerLock::Locked)),
            input::unlock_on_focus_loss,
        ),
    );
    app.add_systems(
        Update,
        systems::apply_sky_settings.run_if(resource_changed::<SkySettings>),
    );

    app.run();
}
