//! Pointer lock state machine

use bevy::prelude::*;

/// Whether the cursor is captured for walking.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerLock {
    /// Cursor free, instructions overlay shown, rig frozen.
    #[default]
    Unlocked,
    /// Cursor grabbed, rig walking.
    Locked,
}
