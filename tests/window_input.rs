//! Drives the plugins headlessly through window events.

use bevy::{
    ecs::event::Events,
    input::{
        mouse::{MouseButtonInput, MouseScrollUnit, MouseWheel},
        ButtonState,
    },
    prelude::*,
    window::{CursorMoved, RequestRedraw, WindowEvent},
};
use bevy_orbit_cam::{
    controller::OrbitCamControllerPlugin, input::OrbitCamInputPlugin, prelude::*,
};

/// Camera transforms flagged as changed during the last frame.
#[derive(Resource, Default)]
struct ChangedTransforms(usize);

fn count_changed(
    mut changed: ResMut<ChangedTransforms>,
    cameras: Query<(), (Changed<Transform>, With<OrbitCam>)>,
) {
    changed.0 = cameras.iter().count();
}

fn spawn_camera(app: &mut App, controller: OrbitCam) -> Entity {
    app.world_mut()
        .spawn((
            OrbitCam {
                viewport: Vec2::new(800.0, 600.0),
                ..controller
            },
            Transform::from_xyz(0.0, 0.0, 10.0),
            Projection::Perspective(default()),
        ))
        .id()
}

fn app(controller: OrbitCam) -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins((OrbitCamInputPlugin, OrbitCamControllerPlugin))
        .init_resource::<ChangedTransforms>()
        .add_systems(PostUpdate, count_changed);
    let camera = spawn_camera(&mut app, controller);
    app.update();
    (app, camera)
}

fn wheel() -> WindowEvent {
    WindowEvent::MouseWheel(MouseWheel {
        unit: MouseScrollUnit::Line,
        x: 0.0,
        y: 1.0,
        window: Entity::PLACEHOLDER,
    })
}

fn radius(app: &App, camera: Entity) -> f32 {
    let entity = app.world().entity(camera);
    let target = entity.get::<OrbitCam>().unwrap().target;
    entity.get::<Transform>().unwrap().translation.distance(target)
}

fn send(app: &mut App, events: impl IntoIterator<Item = WindowEvent>) {
    for event in events {
        app.world_mut().send_event(event);
    }
    app.update();
}

fn published(app: &App, camera: Entity) -> Vec<ControlEvent> {
    app.world()
        .resource::<Events<OrbitCamEvent>>()
        .iter_current_update_events()
        .filter(|event| event.camera == camera)
        .map(|event| event.kind)
        .collect()
}

fn cursor(x: f32, y: f32) -> WindowEvent {
    WindowEvent::CursorMoved(CursorMoved {
        window: Entity::PLACEHOLDER,
        position: Vec2::new(x, y),
        delta: None,
    })
}

fn button(state: ButtonState) -> WindowEvent {
    WindowEvent::MouseButtonInput(MouseButtonInput {
        button: MouseButton::Left,
        state,
        window: Entity::PLACEHOLDER,
    })
}

#[test]
fn wheel_dollies_and_publishes() {
    let (mut app, camera) = app(OrbitCam::default());
    send(&mut app, [wheel()]);

    assert!((radius(&app, camera) - 9.5).abs() < 1e-4);
    assert_eq!(
        published(&app, camera),
        vec![ControlEvent::Start, ControlEvent::Change, ControlEvent::End]
    );
    let redraws = app.world().resource::<Events<RequestRedraw>>();
    assert!(redraws.iter_current_update_events().count() > 0);
}

#[test]
fn drag_within_one_frame_orbits() {
    let (mut app, camera) = app(OrbitCam::default());
    send(
        &mut app,
        [
            cursor(100.0, 100.0),
            button(ButtonState::Pressed),
            cursor(160.0, 100.0),
            button(ButtonState::Released),
        ],
    );

    let controller = app.world().entity(camera).get::<OrbitCam>().unwrap();
    assert!(controller.azimuthal_angle() < -0.5);
    assert_eq!(controller.gesture(), Gesture::None);
    assert_eq!(
        published(&app, camera),
        vec![ControlEvent::Start, ControlEvent::Change, ControlEvent::End]
    );
}

#[test]
fn settled_camera_is_quiet() {
    let (mut app, camera) = app(OrbitCam::default());
    app.update();
    assert!(published(&app, camera).is_empty());
    let redraws = app.world().resource::<Events<RequestRedraw>>();
    assert_eq!(redraws.iter_current_update_events().count(), 0);
}

#[test]
fn disabled_rotation_ignores_drags() {
    let (mut app, camera) = app(OrbitCam {
        enabled_motion: EnabledMotion {
            rotate: false,
            ..default()
        },
        ..default()
    });
    send(
        &mut app,
        [
            cursor(100.0, 100.0),
            button(ButtonState::Pressed),
            cursor(160.0, 100.0),
        ],
    );

    let transform = app.world().entity(camera).get::<Transform>().unwrap();
    assert!((transform.translation - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
    assert!(published(&app, camera).is_empty());
}

#[test]
fn transform_changes_only_when_the_camera_moves() {
    let (mut app, _) = app(OrbitCam::default());
    app.update();
    assert_eq!(app.world().resource::<ChangedTransforms>().0, 0);

    send(&mut app, [wheel()]);
    assert_eq!(app.world().resource::<ChangedTransforms>().0, 1);

    app.update();
    assert_eq!(app.world().resource::<ChangedTransforms>().0, 0);
}

#[test]
fn captured_wheel_reaches_one_camera() {
    let (mut app, first) = app(OrbitCam::default());
    let second = spawn_camera(&mut app, OrbitCam::default());
    app.update();

    send(&mut app, [wheel()]);
    let mut radii = [radius(&app, first), radius(&app, second)];
    radii.sort_by(f32::total_cmp);
    assert!((radii[0] - 9.5).abs() < 1e-4);
    assert!((radii[1] - 10.0).abs() < 1e-4);
}

#[test]
fn ignored_wheel_passes_to_the_next_camera() {
    let (mut app, first) = app(OrbitCam {
        enabled: false,
        ..default()
    });
    let second = spawn_camera(&mut app, OrbitCam::default());
    app.update();

    send(&mut app, [wheel()]);
    assert!((radius(&app, first) - 10.0).abs() < 1e-4);
    assert!((radius(&app, second) - 9.5).abs() < 1e-4);
}
