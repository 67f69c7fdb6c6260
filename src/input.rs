//! Bridges bevy window input to [`OrbitCam::handle_input`].
//!
//! Window events are read in the order the windowing backend produced them, so a press, the moves
//! that follow it, and the release are seen by the controller exactly as the user performed them,
//! even when they all land in the same frame.

use std::collections::BTreeMap;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_input::{
    keyboard::{KeyCode, KeyboardInput},
    mouse::MouseButtonInput,
    touch::{TouchInput, TouchPhase},
    ButtonInput, ButtonState, InputSystem,
};
use bevy_math::prelude::*;
use bevy_render::prelude::*;
use bevy_transform::prelude::*;
use bevy_window::WindowEvent;

use crate::controller::{
    component::OrbitCam,
    inputs::{Modifiers, PointerPress, SurfaceEvent, TouchPoints},
};

/// See the [module](self) docs.
pub struct OrbitCamInputPlugin;

impl Plugin for OrbitCamInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>()
            .add_event::<WindowEvent>()
            .add_systems(
                PreUpdate,
                (sync_viewports, forward_surface_events)
                    .chain()
                    .after(InputSystem)
                    .before(OrbitCam::update_cameras),
            );
    }
}

/// Pointer and touch positions, tracked across frames so every [`SurfaceEvent`] can carry the
/// full picture.
#[derive(Debug, Default, Resource)]
pub struct PointerState {
    cursor: Option<Vec2>,
    /// Active touches by id. Ordered so the first two fingers stay the first two.
    touches: BTreeMap<u64, Vec2>,
}

impl PointerState {
    /// The last known cursor position.
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Translate one window event, updating the tracked positions. Returns `None` for events the
    /// controller has no use for.
    pub fn translate(&mut self, event: &WindowEvent, modifiers: Modifiers) -> Option<SurfaceEvent> {
        match event {
            WindowEvent::MouseButtonInput(MouseButtonInput { button, state, .. }) => match state {
                ButtonState::Pressed => Some(SurfaceEvent::PointerDown(PointerPress {
                    position: self.cursor.unwrap_or_default(),
                    button: *button,
                    modifiers,
                })),
                ButtonState::Released => Some(SurfaceEvent::PointerUp),
            },
            WindowEvent::CursorMoved(moved) => {
                self.cursor = Some(moved.position);
                Some(SurfaceEvent::PointerMove(moved.position))
            }
            // Scrolling up is positive here and negative on the surface.
            WindowEvent::MouseWheel(wheel) if wheel.y != 0.0 => {
                Some(SurfaceEvent::Wheel { delta_y: -wheel.y })
            }
            WindowEvent::TouchInput(TouchInput {
                phase,
                position,
                id,
                ..
            }) => match phase {
                TouchPhase::Started => {
                    self.touches.insert(*id, *position);
                    Some(SurfaceEvent::TouchStart(self.touch_points()))
                }
                TouchPhase::Moved => {
                    self.touches.insert(*id, *position);
                    Some(SurfaceEvent::TouchMove(self.touch_points()))
                }
                TouchPhase::Ended | TouchPhase::Canceled => {
                    self.touches.remove(id);
                    Some(SurfaceEvent::TouchEnd(self.touch_points()))
                }
            },
            WindowEvent::KeyboardInput(KeyboardInput {
                key_code,
                state: ButtonState::Pressed,
                ..
            }) => Some(SurfaceEvent::KeyDown(*key_code)),
            _ => None,
        }
    }

    fn touch_points(&self) -> TouchPoints {
        TouchPoints(self.touches.values().copied().collect())
    }
}

/// Read the held modifier keys.
pub fn modifiers(keys: &ButtonInput<KeyCode>) -> Modifiers {
    Modifiers {
        ctrl: keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]),
        meta: keys.any_pressed([KeyCode::SuperLeft, KeyCode::SuperRight]),
        shift: keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
    }
}

/// Keep [`OrbitCam::viewport`] in sync with the camera's logical viewport.
pub fn sync_viewports(mut cameras: Query<(&Camera, &mut OrbitCam)>) {
    for (camera, mut controller) in &mut cameras {
        let Some(size) = camera.logical_viewport_size() else {
            continue;
        };
        if controller.viewport != size {
            controller.viewport = size;
        }
    }
}

/// Deliver window input to each [`OrbitCam`] in turn. A camera that captures an event, e.g. a wheel
/// dolly, stops it from reaching the cameras after it.
pub fn forward_surface_events(
    mut window_events: EventReader<WindowEvent>,
    mut pointer: ResMut<PointerState>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut cameras: Query<(&mut OrbitCam, &mut Transform, &mut Projection)>,
) {
    let modifiers = keys.map(|keys| modifiers(&keys)).unwrap_or_default();
    for window_event in window_events.read() {
        let Some(event) = pointer.translate(window_event, modifiers) else {
            continue;
        };
        for (mut controller, mut transform, mut projection) in &mut cameras {
            // Native windows have no default action to suppress, only propagation matters here.
            if controller
                .handle_input(&event, &mut transform, &mut projection)
                .stop_propagation
            {
                break;
            }
        }
    }
}
