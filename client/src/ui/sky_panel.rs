//! Sky debug window (egui)

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use skyroom_shared::{
    ParamRange, SceneConfig, SkySettings, WalkController, AZIMUTH_RANGE, ELEVATION_RANGE, EXPOSURE_RANGE,
    MIE_COEFFICIENT_RANGE, MIE_DIRECTIONAL_G_RANGE, RAYLEIGH_RANGE, TURBIDITY_RANGE,
};

use crate::states::PointerLock;

pub struct SkyPanelPlugin;

impl Plugin for SkyPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, sky_panel_ui);
    }
}

fn slider(ui: &mut egui::Ui, value: &mut f32, range: &ParamRange, label: &str) {
    ui.add(
        egui::Slider::new(value, range.range.clone())
            .step_by(range.step)
            .text(label),
    );
}

/// Sky the room was loaded with.
fn reset_sky(config: &SceneConfig) -> SkySettings {
    config.sky.clone()
}

fn sky_panel_ui(
    mut contexts: EguiContexts,
    mut sky: ResMut<SkySettings>,
    config: Res<SceneConfig>,
    diagnostics: Res<DiagnosticsStore>,
    rigs: Query<(&Transform, &WalkController)>,
    lock: Res<State<PointerLock>>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    // Edit a copy so the resource only reports a change when a value moved.
    let mut draft = sky.clone();

    egui::Window::new("Sky")
        .default_width(280.0)
        .show(ctx, |ui| {
            slider(ui, &mut draft.turbidity, &TURBIDITY_RANGE, "turbidity");
            slider(ui, &mut draft.rayleigh, &RAYLEIGH_RANGE, "rayleigh");
            slider(ui, &mut draft.mie_coefficient, &MIE_COEFFICIENT_RANGE, "mieCoefficient");
            slider(ui, &mut draft.mie_directional_g, &MIE_DIRECTIONAL_G_RANGE, "mieDirectionalG");
            slider(ui, &mut draft.elevation, &ELEVATION_RANGE, "elevation");
            slider(ui, &mut draft.azimuth, &AZIMUTH_RANGE, "azimuth");
            slider(ui, &mut draft.exposure, &EXPOSURE_RANGE, "exposure");

            if ui.button("Reset").clicked() {
                draft = reset_sky(&config);
            }

            ui.separator();
            ui.collapsing("Diagnostics", |ui| {
                if let Some(fps) = diagnostics
                    .get(&FrameTimeDiagnosticsPlugin::FPS)
                    .and_then(|fps| fps.smoothed())
                {
                    ui.label(format!("FPS: {fps:.1}"));
                }
                ui.label(format!("Pointer: {:?}", lock.get()));

                for (transform, controller) in rigs.iter() {
                    let p = transform.translation;
                    let v = controller.velocity();
                    ui.label(format!("Position: ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z));
                    ui.label(format!("Velocity: ({:.1}, {:.1}, {:.1})", v.x, v.y, v.z));
                    ui.label(format!("Grounded: {}", controller.last_step().grounded));
                    ui.label(format!("Can jump: {}", controller.can_jump()));
                }
            });
        });

    if draft != *sky {
        *sky = draft;
    }
    Ok(())
}
