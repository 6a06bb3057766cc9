//! Keyboard and mouse handling
//!
//! Keys only flip flags on the walk controller; the walk system consumes them
//! once per frame.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::WindowFocused;
use skyroom_shared::{MoveFlags, WalkController, MOUSE_SENSITIVITY};
use std::f32::consts::FRAC_PI_2;

use crate::states::PointerLock;

/// Keeps the camera just short of looking straight up or down.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Mouse-look angles of the rig (YXZ order, no roll).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Moving the mouse right turns right, moving it down looks down.
    pub fn apply_mouse_delta(&mut self, delta: Vec2) {
        self.yaw -= delta.x * MOUSE_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

/// WASD and arrow keys to direction flags.
pub fn walk_flags(keyboard: &ButtonInput<KeyCode>) -> MoveFlags {
    let held = |a: KeyCode, b: KeyCode| keyboard.pressed(a) || keyboard.pressed(b);
    MoveFlags {
        forward: held(KeyCode::KeyW, KeyCode::ArrowUp),
        backward: held(KeyCode::KeyS, KeyCode::ArrowDown),
        left: held(KeyCode::KeyA, KeyCode::ArrowLeft),
        right: held(KeyCode::KeyD, KeyCode::ArrowRight),
    }
}

/// Push held keys and jump presses into every walk controller
pub fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut controllers: Query<&mut WalkController>,
) {
    let flags = walk_flags(&keyboard);
    let jump = keyboard.just_pressed(KeyCode::Space);

    for mut controller in controllers.iter_mut() {
        if controller.flags() != flags {
            controller.set_flags(flags);
        }
        if jump {
            controller.request_jump();
        }
    }
}

/// Turn the rig with the mouse.
///
/// Runs every frame so motion made while unlocked (e.g. toward the walk button)
/// is consumed and never applied after locking.
pub fn handle_mouse_look(
    lock: Res<State<PointerLock>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut rigs: Query<(&mut LookAngles, &mut Transform)>,
) {
    let mut delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        delta += motion.delta;
    }

    if *lock.get() != PointerLock::Locked || delta == Vec2::ZERO {
        return;
    }

    for (mut look, mut transform) in rigs.iter_mut() {
        look.apply_mouse_delta(delta);
        transform.rotation = look.rotation();
    }
}

/// Escape gives the cursor back.
pub fn unlock_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<PointerLock>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(PointerLock::Unlocked);
    }
}

/// Losing window focus drops the lock, like a browser does.
///
/// Focus changes seen while unlocked are consumed and ignored.
pub fn unlock_on_focus_loss(
    lock: Res<State<PointerLock>>,
    mut focus_events: MessageReader<WindowFocused>,
    mut next_state: ResMut<NextState<PointerLock>>,
) {
    let lost_focus = focus_events.read().filter(|ev| !ev.focused).count() > 0;
    if lost_focus && *lock.get() == PointerLock::Locked {
        debug!("Window lost focus; releasing pointer lock");
        next_state.set(PointerLock::Unlocked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn test_wasd_and_arrows_map_to_flags() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::ArrowLeft);

        let flags = walk_flags(&keyboard);
        assert_eq!(
            flags,
            MoveFlags {
                forward: true,
                backward: false,
                left: true,
                right: false,
            }
        );

        keyboard.release(KeyCode::KeyW);
        keyboard.press(KeyCode::ArrowDown);
        keyboard.press(KeyCode::KeyD);
        let flags = walk_flags(&keyboard);
        assert!(!flags.forward);
        assert!(flags.backward);
        assert!(flags.left && flags.right);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut look = LookAngles::default();
        look.apply_mouse_delta(Vec2::new(0.0, -100_000.0));
        assert_eq!(look.pitch, PITCH_LIMIT);
        look.apply_mouse_delta(Vec2::new(0.0, 100_000.0));
        assert_eq!(look.pitch, -PITCH_LIMIT);
    }

    fn look_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.add_message::<MouseMotion>();
        app.add_message::<WindowFocused>();
        app.init_state::<PointerLock>();
        app.add_systems(Update, (handle_mouse_look, unlock_on_focus_loss));
        let rig = app
            .world_mut()
            .spawn((LookAngles::default(), Transform::default()))
            .id();
        app.update();
        (app, rig)
    }

    fn set_lock(app: &mut App, state: PointerLock) {
        app.world_mut()
            .resource_mut::<NextState<PointerLock>>()
            .set(state);
        app.update();
    }

    fn yaw(app: &App, rig: Entity) -> Option<f32> {
        app.world().get::<LookAngles>(rig).map(|look| look.yaw)
    }

    #[test]
    fn test_motion_while_unlocked_is_discarded() {
        let (mut app, rig) = look_app();

        app.world_mut().write_message(MouseMotion {
            delta: Vec2::new(300.0, 40.0),
        });
        app.update();
        set_lock(&mut app, PointerLock::Locked);
        app.update();
        assert_eq!(yaw(&app, rig), Some(0.0));

        app.world_mut().write_message(MouseMotion {
            delta: Vec2::new(100.0, 0.0),
        });
        app.update();
        let turned = yaw(&app, rig).unwrap_or(0.0);
        assert!((turned + 100.0 * MOUSE_SENSITIVITY).abs() < 1e-6);
    }

    #[test]
    fn test_focus_loss_while_unlocked_does_not_unlock_later() {
        let (mut app, _) = look_app();
        let window = app.world_mut().spawn_empty().id();

        app.world_mut().write_message(WindowFocused {
            window,
            focused: false,
        });
        app.update();
        set_lock(&mut app, PointerLock::Locked);
        app.update();
        assert_eq!(
            *app.world().resource::<State<PointerLock>>().get(),
            PointerLock::Locked
        );

        app.world_mut().write_message(WindowFocused {
            window,
            focused: false,
        });
        app.update();
        app.update();
        assert_eq!(
            *app.world().resource::<State<PointerLock>>().get(),
            PointerLock::Unlocked
        );
    }

    #[test]
    fn test_mouse_right_turns_right() {
        let mut look = LookAngles::default();
        look.apply_mouse_delta(Vec2::new(100.0, 0.0));
        let forward = look.rotation() * Vec3::NEG_Z;
        assert!(forward.x > 0.0);
    }
}
