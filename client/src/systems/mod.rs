//! Client-side scene systems
//!
//! Organized into submodules for maintainability.

mod lock;
mod movement;
mod rendering;
mod world;

// Re-export everything for easy access from main.rs
pub use lock::*;
pub use movement::*;
pub use rendering::*;
pub use world::*;
