//! UI module

pub mod blocker;
pub mod crosshair;
pub mod sky_panel;
pub mod styles;

pub use blocker::BlockerPlugin;
pub use crosshair::CrosshairPlugin;
pub use sky_panel::SkyPanelPlugin;
