//! Orbit a small scene. Left drag orbits, right or middle drag pans, the wheel dollies, and the
//! arrow keys pan in steps. `R` resets the view, `F` frames the whole scene, `D` toggles damping.

use bevy::prelude::*;
use bevy_orbit_cam::prelude::*;

const SCENE_RADIUS: f32 = 3.0;

fn main() {
    App::new()
        .add_plugins((DefaultPlugins, DefaultOrbitCamPlugins))
        .add_systems(Startup, (setup_camera, setup_scene))
        .add_systems(Update, (view_shortcuts, log_gestures))
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(4.0, 3.0, 8.0),
        OrbitCam {
            damping: Damping {
                enabled: true,
                ..default()
            },
            zoom_limits: ZoomLimits {
                min_distance: 1.0,
                max_distance: 40.0,
                ..default()
            },
            orbit_limits: OrbitLimits {
                max_polar_angle: std::f32::consts::FRAC_PI_2,
                ..default()
            },
            ..OrbitCam::new(Vec3::ZERO)
        },
    ));
}

fn view_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut cameras: Query<(Entity, &mut OrbitCam, &mut Transform, &mut Projection)>,
    mut focus: EventWriter<FocusOn>,
) {
    for (camera, mut controller, mut transform, mut projection) in &mut cameras {
        if keys.just_pressed(KeyCode::KeyR) {
            controller.reset(&mut transform, &mut projection);
        }
        if keys.just_pressed(KeyCode::KeyF) {
            focus.write(FocusOn {
                camera,
                point: Vec3::ZERO,
                distance: FocusDistance::FitSphere {
                    radius: SCENE_RADIUS,
                },
            });
        }
        if keys.just_pressed(KeyCode::KeyD) {
            controller.damping.enabled = !controller.damping.enabled;
        }
    }
}

fn log_gestures(mut events: EventReader<OrbitCamEvent>) {
    for event in events.read() {
        if event.kind != ControlEvent::Change {
            info!("{:?}: {:?}", event.camera, event.kind);
        }
    }
}

//
// --- The below code is not important for the example ---
//

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Circle::new(SCENE_RADIUS))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
    ));
    let cube = meshes.add(Cuboid::new(0.8, 0.8, 0.8));
    for (i, color) in [
        Color::srgb(0.8, 0.3, 0.3),
        Color::srgb(0.3, 0.3, 0.8),
        Color::srgb(0.8, 0.7, 0.2),
    ]
    .into_iter()
    .enumerate()
    {
        let angle = i as f32 * std::f32::consts::TAU / 3.0;
        commands.spawn((
            Mesh3d(cube.clone()),
            MeshMaterial3d(materials.add(color)),
            Transform::from_xyz(1.5 * angle.cos(), 0.4, 1.5 * angle.sin()),
        ));
    }
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
