//! Pointer lock transitions
//!
//! Cursor grab and controller gating on entering/leaving `PointerLock::Locked`.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};
use skyroom_shared::WalkController;

fn set_cursor_grab(
    windows: &Query<Entity, With<PrimaryWindow>>,
    cursor_opts: &mut Query<&mut CursorOptions>,
    grab: bool,
) {
    let Ok(window_entity) = windows.single() else {
        return;
    };

    if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
        if grab {
            cursor.grab_mode = CursorGrabMode::Locked;
            cursor.visible = false;
        } else {
            cursor.grab_mode = CursorGrabMode::None;
            cursor.visible = true;
        }
    }
}

/// Grab the cursor and let the rigs walk
pub fn enter_locked(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mut controllers: Query<&mut WalkController>,
) {
    set_cursor_grab(&windows, &mut cursor_opts, true);
    for mut controller in controllers.iter_mut() {
        controller.lock();
    }
    info!("Pointer locked");
}

/// Release the cursor and freeze the rigs
pub fn enter_unlocked(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mut controllers: Query<&mut WalkController>,
) {
    set_cursor_grab(&windows, &mut cursor_opts, false);
    for mut controller in controllers.iter_mut() {
        controller.unlock();
    }
    info!("Pointer unlocked");
}
