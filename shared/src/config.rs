//! Scene configuration (`assets/scene.ron`).
//!
//! Every section falls back to the stock scene, so a file only needs the
//! values it wants to change.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::MovementTuning;
use crate::panels::{default_gallery, PanelSpec};
use crate::scatter::ScatterConfig;
use crate::sky::SkySettings;
use crate::{LOOK_AT, LOOK_FROM, START_POSITION};

/// File name looked up inside the asset directory.
pub const SCENE_CONFIG_FILE: &str = "scene.ron";

/// Largest box scatter a config may ask for.
pub const MAX_SCATTER_COUNT: usize = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum SceneConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid scene config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            look_from: LOOK_FROM,
            look_at: LOOK_AT,
        }
    }
}

impl CameraConfig {
    /// Initial `(yaw, pitch)` in radians for the configured look direction.
    pub fn initial_look(&self) -> (f32, f32) {
        let from = Vec3::from_array(self.look_from);
        let to = Vec3::from_array(self.look_at);
        let dir = (to - from).normalize_or_zero();
        if dir == Vec3::ZERO {
            return (0.0, 0.0);
        }
        // Forward is -Z at zero yaw.
        let yaw = (-dir.x).atan2(-dir.z);
        let pitch = dir.y.clamp(-1.0, 1.0).asin();
        (yaw, pitch)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Edge length of the square ground plane.
    pub size: f32,
    pub height: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size: 10_000.0,
            height: -7.0,
            color: 0x0f5bb3,
        }
    }
}

/// Everything the client needs to build the room.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub movement: MovementTuning,
    pub start_position: [f32; 3],
    pub camera: CameraConfig,
    pub ground: GroundConfig,
    pub sky: SkySettings,
    pub panels: Vec<PanelSpec>,
    pub scatter: ScatterConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            movement: MovementTuning::default(),
            start_position: START_POSITION,
            camera: CameraConfig::default(),
            ground: GroundConfig::default(),
            sky: SkySettings::default(),
            panels: default_gallery(),
            scatter: ScatterConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Check values the engine would choke on. Sky values are clamped instead.
    pub fn validate(mut self) -> Result<Self, SceneConfigError> {
        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return Err(invalid(format!("camera.fov_degrees {} outside (0, 180)", cam.fov_degrees)));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(invalid(format!(
                "camera planes must satisfy 0 < near < far (near {}, far {})",
                cam.near, cam.far
            )));
        }
        if !(self.ground.size > 0.0 && self.ground.size.is_finite()) || !self.ground.height.is_finite() {
            return Err(invalid(format!(
                "ground size {} / height {} not usable",
                self.ground.size, self.ground.height
            )));
        }

        let m = &self.movement;
        for (name, value) in [
            ("damping", m.damping),
            ("gravity", m.gravity),
            ("move_accel", m.move_accel),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("movement.{name} must be finite and >= 0, got {value}")));
            }
        }
        if !m.jump_impulse.is_finite() || !m.fall_reset_y.is_finite() {
            return Err(invalid("movement.jump_impulse / fall_reset_y must be finite".to_string()));
        }

        let points = [
            ("start_position", self.start_position),
            ("movement.spawn_position", m.spawn_position),
            ("camera.look_from", cam.look_from),
            ("camera.look_at", cam.look_at),
        ];
        for (name, point) in points {
            if !point.iter().all(|v| v.is_finite()) {
                return Err(invalid(format!("{name} has a non-finite component")));
            }
        }

        for (index, panel) in self.panels.iter().enumerate() {
            let [w, h] = panel.size;
            if !(w > 0.0 && h > 0.0) {
                return Err(invalid(format!("panels[{index}] size {w}x{h} must be positive")));
            }
            if !panel.position.iter().all(|v| v.is_finite()) || !panel.rotation_y.is_finite() {
                return Err(invalid(format!("panels[{index}] has a non-finite placement")));
            }
        }

        if self.scatter.count > MAX_SCATTER_COUNT {
            return Err(invalid(format!(
                "scatter.count {} exceeds {MAX_SCATTER_COUNT}",
                self.scatter.count
            )));
        }

        self.sky = self.sky.clamped();
        Ok(self)
    }
}

fn invalid(message: String) -> SceneConfigError {
    SceneConfigError::Invalid(message)
}

/// Parse and validate a scene config from RON text.
pub fn load_scene_config_from_str(text: &str) -> Result<SceneConfig, SceneConfigError> {
    let config: SceneConfig = ron::from_str(text)?;
    config.validate()
}

/// Load a scene config from a file path.
pub fn load_scene_config_from_file(path: impl AsRef<Path>) -> Result<SceneConfig, SceneConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SceneConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_scene_config_from_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::PanelSource;

    #[test]
    fn test_shipped_scene_parses() {
        let text = include_str!("../../client/assets/scene.ron");
        let config = load_scene_config_from_str(text).expect("shipped scene.ron should load");
        assert_eq!(config.panels.len(), 5);
        assert_eq!(config.start_position, START_POSITION);
        assert_eq!(config.movement, MovementTuning::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = load_scene_config_from_str(
            "(sky: (elevation: 30.0), scatter: (enabled: true, seed: Some(9)))",
        )
        .expect("partial config");

        assert_eq!(config.sky.elevation, 30.0);
        assert_eq!(config.sky.turbidity, SkySettings::default().turbidity);
        assert!(config.scatter.enabled);
        assert_eq!(config.scatter.count, 500);
        assert_eq!(config.panels, default_gallery());
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_custom_panel_list_replaces_gallery() {
        let config = load_scene_config_from_str(
            r#"(panels: [(source: Url(url: "https://example.com"), size: (800.0, 600.0), position: (0.0, 50.0, -100.0))])"#,
        )
        .expect("panel config");

        assert_eq!(config.panels.len(), 1);
        assert_eq!(
            config.panels[0].source,
            PanelSource::Url {
                url: "https://example.com".into()
            }
        );
        assert_eq!(config.panels[0].rotation_y, 0.0);
    }

    #[test]
    fn test_bad_camera_planes_rejected() {
        let err = load_scene_config_from_str("(camera: (near: 10.0, far: 1.0))").unwrap_err();
        assert!(matches!(err, SceneConfigError::Invalid(_)));
    }

    #[test]
    fn test_negative_panel_size_rejected() {
        let err = load_scene_config_from_str(
            r#"(panels: [(source: Url(url: ""), size: (-1.0, 10.0), position: (0.0, 0.0, 0.0))])"#,
        )
        .unwrap_err();
        assert!(matches!(err, SceneConfigError::Invalid(_)));
    }

    #[test]
    fn test_huge_scatter_rejected() {
        let err = load_scene_config_from_str("(scatter: (count: 18446744073709551615))").unwrap_err();
        assert!(matches!(err, SceneConfigError::Invalid(_)));

        let config = load_scene_config_from_str("(scatter: (count: 10000))").expect("at the cap");
        assert_eq!(config.scatter.count, MAX_SCATTER_COUNT);
    }

    #[test]
    fn test_infinite_ground_rejected() {
        let mut config = SceneConfig::default();
        config.ground.size = f32::INFINITY;
        assert!(matches!(config.validate(), Err(SceneConfigError::Invalid(_))));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let err = load_scene_config_from_str("(movement: [1, 2").unwrap_err();
        assert!(matches!(err, SceneConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_scene_config_from_file("/definitely/not/here/scene.ron").unwrap_err();
        assert!(matches!(err, SceneConfigError::Io { .. }));
    }

    #[test]
    fn test_out_of_range_sky_is_clamped() {
        let config = load_scene_config_from_str("(sky: (elevation: 120.0, exposure: -3.0))").unwrap();
        assert_eq!(config.sky.elevation, 90.0);
        assert_eq!(config.sky.exposure, 0.0);
    }

    #[test]
    fn test_initial_look_points_at_origin() {
        let (yaw, pitch) = CameraConfig::default().initial_look();
        assert!((yaw - std::f32::consts::FRAC_PI_4).abs() < 1e-5);
        assert!((pitch - (-1.0f32 / 3.0f32.sqrt()).asin()).abs() < 1e-5);

        let rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
        let forward = rotation * Vec3::NEG_Z;
        let expected = Vec3::new(-1.0, -1.0, -1.0).normalize();
        assert!((forward - expected).length() < 1e-5);
    }
}
