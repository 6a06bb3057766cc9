//! Rig-related constants

/// Where the rig stands when the scene opens
pub const START_POSITION: [f32; 3] = [10.0, 0.0, 60.0];

/// Where the rig is put back after falling out of the world
pub const SPAWN_POSITION: [f32; 3] = [10.0, 100.0, 60.0];

/// World height below which the rig counts as fallen out of the world
pub const FALL_RESET_Y: f32 = -2000.0;

/// Maximum length of the downward ground probe
pub const GROUND_PROBE_RANGE: f32 = 10.0;

/// Radians of look rotation per pixel of mouse motion
pub const MOUSE_SENSITIVITY: f32 = 0.002;

/// Initial look direction: from this point toward `LOOK_AT`
pub const LOOK_FROM: [f32; 3] = [100.0, 100.0, 100.0];
pub const LOOK_AT: [f32; 3] = [0.0, 0.0, 0.0];
