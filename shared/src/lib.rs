//! Shared scene logic for the Skyroom client.
//!
//! Everything here is deterministic and engine-light so it can be unit tested
//! without a window: the walk controller, sky parameters, panel catalogue,
//! box scatter and the scene config loader.

pub mod config;
pub mod movement;
pub mod panels;
pub mod player;
pub mod scatter;
pub mod sky;

pub use config::*;
pub use movement::*;
pub use panels::*;
pub use player::*;
pub use scatter::*;
pub use sky::*;
