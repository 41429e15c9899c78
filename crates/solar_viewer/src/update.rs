use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow, WindowResized};
use bevy_egui::EguiContexts;
use smooth_bevy_cameras::LookTransform;
use solar_system::{InputEvent, NodeId, Response, TransformSink};

use crate::body::{NodeEntities, OrbitCamera, Solar};
use crate::State;

pub fn clock(time: Res<Time>, keys: Res<Input<KeyCode>>, mut state: ResMut<State>, mut solar: ResMut<Solar>) {
    if keys.just_pressed(KeyCode::Space) {
        state.paused = !state.paused;
        info!(paused = state.paused, "Toggled clock");
    }

    if state.paused {
        return;
    }

    solar.0.advance(state.time_scale * time.delta_seconds());
}

struct TransformWriter<'a, 'w, 's> {
    entities: &'a NodeEntities,
    transforms: &'a mut Query<'w, 's, &'static mut Transform>,
}

impl TransformSink for TransformWriter<'_, '_, '_> {
    fn set_transform(&mut self, id: NodeId, translation: Vec3, rotation: Quat) {
        let Some(entity) = self.entities.get(id) else {
            return;
        };

        if let Ok(mut transform) = self.transforms.get_mut(entity) {
            transform.translation = translation;
            transform.rotation = rotation;
        }
    }
}

pub fn scene_transforms(
    solar: Res<Solar>,
    entities: Res<NodeEntities>,
    mut transforms: Query<&mut Transform>,
) {
    if !solar.is_changed() {
        return;
    }

    solar.0.sync(&mut TransformWriter {
        entities: &entities,
        transforms: &mut transforms,
    });
}

/// Browser convention: scrolling up is a negative delta
pub fn wheel_delta(event: &MouseWheel) -> f32 {
    -event.y
}

pub fn camera_input(
    mut egui: EguiContexts,
    buttons: Res<Input<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cursor: EventReader<CursorMoved>,
    mut wheel: EventReader<MouseWheel>,
    mut resized: EventReader<WindowResized>,
    mut camera: ResMut<OrbitCamera>,
) {
    let mut events = Vec::new();

    for event in resized.read() {
        events.push(InputEvent::Resize {
            width: event.width as u32,
            height: event.height as u32,
        });
    }

    if buttons.just_released(MouseButton::Left) {
        events.push(InputEvent::PointerUp);
    }

    // Let egui keep drags and scrolls that start over its panels
    let over_ui = egui.ctx_mut().wants_pointer_input();

    if !over_ui {
        if buttons.just_pressed(MouseButton::Left) {
            if let Some(position) = windows.get_single().ok().and_then(Window::cursor_position) {
                events.push(InputEvent::PointerDown {
                    x: position.x,
                    y: position.y,
                });
            }
        }

        for event in wheel.read() {
            events.push(InputEvent::Wheel {
                delta_y: wheel_delta(event),
            });
        }
    } else {
        wheel.clear();
    }

    for event in cursor.read() {
        events.push(InputEvent::PointerMove {
            x: event.position.x,
            y: event.position.y,
        });
    }

    for event in events {
        if let Response::Resize { width, height } = camera.0.handle(event) {
            info!(width, height, "Viewport resized");
        }
    }
}

pub fn camera_pose(camera: Res<OrbitCamera>, mut look: Query<&mut LookTransform>) {
    if !camera.is_changed() {
        return;
    }

    let pose = camera.0.pose();

    for mut look in look.iter_mut() {
        look.eye = pose.eye;
        look.target = pose.target;
    }
}
