use bevy::core_pipeline::bloom::BloomSettings;
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use bevy_egui::EguiPlugin;
use smooth_bevy_cameras::{LookTransform, LookTransformBundle, LookTransformPlugin, Smoother};
use solar_system::{CameraController, Scene};

use crate::body::{NodeEntities, OrbitCamera, Solar};
use crate::config::ViewerConfig;
use crate::spawn::Spawner;

mod body;
mod config;
mod draw;
mod spawn;
mod ui;
mod update;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = ViewerConfig::load()?;
    let catalog = config.catalog()?;
    let scene = Scene::compose(&catalog, config.scene.clone())?;
    let camera = CameraController::new(config.camera.clone());

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(LookTransformPlugin)
        .add_plugins(EguiPlugin)
        .insert_resource(State::from(&config))
        .insert_resource(Solar(scene))
        .insert_resource(OrbitCamera(camera))
        .init_resource::<NodeEntities>()
        .init_resource::<ui::UiState>()
        .add_systems(Startup, setup)
        .add_systems(Update, ui::render)
        .add_systems(Update, (update::clock, update::scene_transforms).chain())
        .add_systems(Update, (update::camera_input, update::camera_pose).chain())
        .add_systems(Update, draw::orbits)
        .add_systems(Update, draw::axis)
        .run();

    Ok(())
}

#[derive(Resource)]
struct State {
    paused: bool,
    /// Simulated days per real second
    time_scale: f32,

    draw_orbits: bool,
    draw_axis: bool,
    axis_scale: f32,
}

impl From<&ViewerConfig> for State {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            paused: false,
            time_scale: config.time_scale,
            draw_orbits: config.show_orbits,
            draw_axis: false,
            axis_scale: 10000.0,
        }
    }
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    solar: Res<Solar>,
    camera: Res<OrbitCamera>,
) {
    commands.insert_resource(ClearColor(Color::BLACK));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.02,
    });

    let scene = &solar.0;
    let sky_radius = scene.config().sky_radius;

    let mut spawner = Spawner {
        commands: &mut commands,
        meshes: meshes.as_mut(),
        materials: materials.as_mut(),
        asset_server: &asset_server,
        light_range: sky_radius,
        entities: Vec::with_capacity(scene.graph().len()),
    };
    scene.realize(&mut spawner);

    let entities = spawner.entities;
    info!(nodes = entities.len(), "Spawned scene");
    commands.insert_resource(NodeEntities(entities));

    let pose = camera.0.pose();

    commands
        .spawn(Camera3dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            projection: Projection::Perspective(PerspectiveProjection {
                near: 1.0,
                far: sky_radius * 2.0,
                ..default()
            }),
            ..default()
        })
        .insert(BloomSettings::OLD_SCHOOL)
        .insert(LookTransformBundle {
            transform: LookTransform::new(pose.eye, pose.target, Vec3::Y),
            smoother: Smoother::new(0.8),
        });
}
