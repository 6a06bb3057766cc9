//! Walk systems
//!
//! Probes the ground under each rig and advances its controller one frame.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use skyroom_shared::{WalkController, GROUND_PROBE_RANGE};

use crate::panels::PANEL_GROUP;

/// Every collider except panels; panels are screens, not floors.
fn ground_filter() -> QueryFilter<'static> {
    QueryFilter::default().groups(CollisionGroups::new(
        Group::ALL,
        Group::ALL.difference(PANEL_GROUP),
    ))
}

/// True when ground lies within `GROUND_PROBE_RANGE` below `origin`.
pub fn probe_ground(context: &RapierContext<'_>, origin: Vec3) -> bool {
    context
        .cast_ray(origin, Vec3::NEG_Y, GROUND_PROBE_RANGE, true, ground_filter())
        .is_some()
}

/// Advance every walk rig by the frame time.
pub fn walk_rigs(
    time: Res<Time>,
    rapier_context: ReadRapierContext,
    mut rigs: Query<(&mut Transform, &mut WalkController)>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };
    let dt = time.delta_secs();

    for (mut transform, mut controller) in rigs.iter_mut() {
        // Unlocked rigs still tick so stale jump requests are dropped.
        let ground_contact = controller.is_locked() && probe_ground(&context, transform.translation);
        let report = controller.update(dt, ground_contact, &mut *transform);

        if report.jumped {
            debug!("Jump from {:?}", transform.translation);
        }
        if report.respawned {
            info!(
                "Rig fell below {:.0}; respawned at {:?}",
                controller.tuning.fall_reset_y, transform.translation
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::panel_collider;
    use crate::systems::ground_collider;
    use bevy::asset::AssetPlugin;
    use bevy::ecs::system::SystemState;
    use bevy::scene::ScenePlugin;
    use bevy::time::TimeUpdateStrategy;
    use bevy::transform::TransformPlugin;
    use std::time::Duration;

    const GROUND_Y: f32 = -7.0;

    /// Headless app with the stock ground and one panel at (310, 0, 0).
    fn room_app() -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            TransformPlugin,
            AssetPlugin::default(),
            ScenePlugin,
            RapierPhysicsPlugin::<NoUserData>::default(),
        ));
        app.init_asset::<Mesh>();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            1.0 / 60.0,
        )));

        app.world_mut()
            .spawn((Transform::from_xyz(0.0, GROUND_Y, 0.0), ground_collider(10_000.0)));
        app.world_mut().spawn((
            Transform::from_xyz(310.0, 0.0, 0.0)
                .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
            panel_collider(620.0, 378.0),
        ));

        for _ in 0..4 {
            app.update();
        }
        app
    }

    fn probe(app: &mut App, origin: Vec3) -> bool {
        let mut state: SystemState<ReadRapierContext> = SystemState::new(app.world_mut());
        let rapier = state.get(app.world());
        let context = rapier.single().expect("default rapier context");
        probe_ground(&context, origin)
    }

    fn unfiltered_hit(app: &mut App, origin: Vec3) -> bool {
        let mut state: SystemState<ReadRapierContext> = SystemState::new(app.world_mut());
        let rapier = state.get(app.world());
        let context = rapier.single().expect("default rapier context");
        context
            .cast_ray(origin, Vec3::NEG_Y, GROUND_PROBE_RANGE, true, QueryFilter::default())
            .is_some()
    }

    #[test]
    fn test_probe_reaches_ground_within_range() {
        let mut app = room_app();
        // 7 units above the ground.
        assert!(probe(&mut app, Vec3::new(10.0, 0.0, 60.0)));
        // 11 units above the ground.
        assert!(!probe(&mut app, Vec3::new(10.0, 4.0, 60.0)));
    }

    #[test]
    fn test_panels_are_not_ground() {
        let mut app = room_app();
        let inside_panel = Vec3::new(310.0, 50.0, 0.0);
        // The collider is there (the view ray uses it)...
        assert!(unfiltered_hit(&mut app, inside_panel));
        // ...but the ground probe ignores it.
        assert!(!probe(&mut app, inside_panel));
    }

    #[test]
    fn test_locked_rig_stands_on_ground() {
        let mut app = room_app();
        app.add_systems(Update, walk_rigs);

        let mut controller = WalkController::default();
        controller.lock();
        let rig = app
            .world_mut()
            .spawn((Transform::from_xyz(10.0, 0.0, 60.0), controller))
            .id();

        for _ in 0..30 {
            app.update();
        }

        let y = app.world().get::<Transform>(rig).map(|t| t.translation.y);
        assert_eq!(y, Some(0.0));
    }

    #[test]
    fn test_locked_rig_inside_panel_falls() {
        let mut app = room_app();
        app.add_systems(Update, walk_rigs);

        let mut controller = WalkController::default();
        controller.lock();
        controller.request_jump();
        let rig = app
            .world_mut()
            .spawn((Transform::from_xyz(310.0, 100.0, 0.0), controller))
            .id();

        for _ in 0..5 {
            app.update();
        }

        let world = app.world();
        let y = world.get::<Transform>(rig).map(|t| t.translation.y).unwrap_or(f32::MAX);
        assert!(y < 100.0, "rig stayed at y = {y}");
        let controller = world.get::<WalkController>(rig).expect("rig controller");
        assert!(!controller.can_jump());
    }
}
