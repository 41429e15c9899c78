use bevy::prelude::*;
use bevy_egui::egui::{DragValue, Ui};
use bevy_egui::{egui, EguiContexts};
use solar_system::BodyKind;

use crate::body::{OrbitCamera, Solar};
use crate::State;

#[derive(Resource, Debug, Clone, Default)]
pub struct UiState {
    selected: Option<String>,
    settings_visible: bool,
}

pub fn render(
    mut ui_state: ResMut<UiState>,
    mut egui_context: EguiContexts,
    mut state: ResMut<State>,
    solar: Res<Solar>,
    camera: Res<OrbitCamera>,
) {
    let ctx = egui_context.ctx_mut();
    let scene = &solar.0;

    egui::TopBottomPanel::top("Top").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let label = if state.paused { "Resume" } else { "Pause" };
            if ui.button(label).clicked() {
                state.paused = !state.paused;
            }

            if ui.button("Settings").clicked() {
                ui_state.settings_visible = !ui_state.settings_visible;
            }

            ui.checkbox(&mut state.draw_orbits, "Orbits");
            value_slider_min_max(ui, "Days per second", &mut state.time_scale, -1000.0, 1000.0);
        });
    });

    egui::TopBottomPanel::bottom("Bottom").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let camera_state = camera.0.state();
            ui.label(format!(
                "Camera: distance {:.0}, yaw {:.2}, pitch {:.2}",
                camera_state.distance, camera_state.yaw, camera_state.pitch
            ));

            if let Some(star) = scene.handles().next() {
                ui.label(format!("Day {:.1}", star.elapsed_time));
            }
        });
    });

    egui::SidePanel::left("Left").show(ctx, |ui| {
        ui.heading("Bodies:");

        for handle in scene.handles() {
            let indent = match handle.kind {
                BodyKind::Star => "",
                BodyKind::Planet => "  ",
                BodyKind::Moon => "    ",
            };
            let selected = ui_state.selected.as_deref() == Some(handle.name.as_str());

            if ui
                .selectable_label(selected, format!("{indent}{}", handle.name))
                .clicked()
            {
                ui_state.selected = if selected {
                    None
                } else {
                    Some(handle.name.clone())
                };
            }
        }

        ui.separator();

        let Some(handle) = ui_state.selected.as_deref().and_then(|name| scene.handle(name)) else {
            return;
        };

        ui.heading(handle.name.as_str());
        ui.label(format!("Kind: {:?}", handle.kind));

        if let Some(position) = scene.body_position(&handle.name) {
            ui.label(format!("Distance from star: {:.1}", position.length()));
        }

        if let Some(curve) = &handle.orbit_curve {
            let params = curve.params();
            ui.label(format!("Semi-major axis: {:.1}", params.semi_major));
            ui.label(format!("Eccentricity: {:.4}", params.eccentricity));
            ui.label(format!("Inclination: {:.2}°", curve.inclination()));
        }

        ui.label(format!("Orbit period: {} d", handle.orbit_period));
        ui.label(format!("Rotation period: {} d", handle.rotation_period));
    });

    egui::Window::new("Settings")
        .open(&mut ui_state.settings_visible)
        .show(ctx, |ui| {
            ui.checkbox(&mut state.draw_axis, "Draw axis");
            if state.draw_axis {
                value_slider_min_max(ui, "Axis scale", &mut state.axis_scale, 0.0, 100_000.0);
            }

            ui.heading("Controls");
            ui.label("Drag with the left mouse button to rotate");
            ui.label("Scroll to zoom in & out");
            ui.label("Space pauses the clock");
        });
}

fn value_slider_min_max(ui: &mut Ui, name: &str, value: &mut f32, min: f32, max: f32) {
    ui.horizontal(|ui| {
        ui.label(name);
        ui.add(DragValue::new(value).speed(0.1).clamp_range(min..=max));
    });
}
