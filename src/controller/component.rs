//! The primary [`Component`] of the controller, [`OrbitCam`].

use std::f64::consts::TAU;

use bevy_ecs::prelude::*;
use bevy_input::keyboard::KeyCode;
use bevy_log::prelude::*;
use bevy_math::{prelude::*, DQuat, DVec3};
use bevy_reflect::prelude::*;
use bevy_render::prelude::*;
use bevy_transform::prelude::*;
use bevy_window::RequestRedraw;

use super::{
    inputs::{InputBindings, InputResponse, Listeners, PointerPress, SurfaceEvent, TouchPoints},
    motion::{resolve_mouse, resolve_one_touch, resolve_two_touch, Capability, Gesture},
    projections::{self, DollyOutcome},
    smoothing::Damping,
    spherical::{clamp_azimuth, clamp_polar, wrap_angle, Spherical},
    zoom::{pinch_scale, zoom_scale, ZoomLimits},
};

/// Squared displacement, and small-angle rotation measure, above which a pose counts as changed.
const CHANGE_EPSILON: f64 = 1e-6;

/// Notifications raised by an [`OrbitCam`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ControlEvent {
    /// A gesture began.
    Start,
    /// A gesture ended.
    End,
    /// An update moved the camera or changed its zoom.
    Change,
}

/// A [`ControlEvent`] published for a camera entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Event)]
pub struct OrbitCamEvent {
    /// The camera that raised the event.
    pub camera: Entity,
    /// What happened.
    pub kind: ControlEvent,
}

/// Orbits a camera around a target point in response to pointer, wheel, touch, and keyboard input.
///
/// Configuration lives in the public fields and can be changed at any time. Control state, such as
/// the active gesture and pending motion, is private and only changes through input and the
/// methods below.
///
/// # Moving the camera
///
/// With [`DefaultOrbitCamPlugins`](crate::DefaultOrbitCamPlugins) installed, input is forwarded and
/// [`OrbitCam::update`] runs every frame. To drive the controller yourself:
///
/// 1. Forward input with [`OrbitCam::handle_input`], or queue motion directly with
///    [`OrbitCam::rotate_left`], [`OrbitCam::pan`], [`OrbitCam::dolly_in`] and friends.
/// 2. Call [`OrbitCam::update`] once per frame. It returns `true` if the camera moved.
/// 3. Read notifications with [`OrbitCam::drain_events`].
#[derive(Debug, Clone, Reflect, Component)]
pub struct OrbitCam {
    /// Master switch for all input handling.
    pub enabled: bool,
    /// The point the camera orbits. Moved by panning.
    pub target: Vec3,
    /// The orbit axis, and the up direction of the camera.
    pub up: Vec3,
    /// What input motions are currently allowed?
    pub enabled_motion: EnabledMotion,
    /// Polar and azimuth windows.
    pub orbit_limits: OrbitLimits,
    /// Distance and orthographic zoom windows.
    pub zoom_limits: ZoomLimits,
    /// Inertia applied to rotation and pan.
    pub damping: Damping,
    /// Input sensitivity of the camera.
    pub sensitivity: Sensitivity,
    /// When true, vertical panning moves along the camera's up axis. When false it moves along the
    /// plane orthogonal to [`OrbitCam::up`], which keeps the target at a constant height.
    pub screen_space_panning: bool,
    /// Idle orbiting.
    pub auto_rotate: AutoRotate,
    /// Button, touch, and key remapping.
    pub bindings: InputBindings,
    /// Logical size of the input surface in pixels. Kept in sync with the camera viewport by the
    /// input plugin.
    pub viewport: Vec2,
    /// Gesture, pending motion, and notification state. Opaque; fill it with
    /// `..Default::default()` when building an [`OrbitCam`].
    #[reflect(ignore)]
    pub state: ControlState,
}

impl Default for OrbitCam {
    fn default() -> Self {
        Self {
            enabled: true,
            target: Vec3::ZERO,
            up: Vec3::Y,
            enabled_motion: Default::default(),
            orbit_limits: Default::default(),
            zoom_limits: Default::default(),
            damping: Default::default(),
            sensitivity: Default::default(),
            screen_space_panning: true,
            auto_rotate: Default::default(),
            bindings: Default::default(),
            viewport: Vec2::ZERO,
            state: Default::default(),
        }
    }
}

/// Target, position, and zoom captured by [`OrbitCam::save_state`].
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SavedState {
    /// The orbit target.
    pub target: Vec3,
    /// The camera position.
    pub position: Vec3,
    /// The projection zoom.
    pub zoom: f32,
}

/// Pending rotation, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct RotationDelta {
    theta: f64,
    phi: f64,
}

/// The private control state of an [`OrbitCam`]. It only changes through input and the methods on
/// [`OrbitCam`].
#[derive(Debug, Clone)]
pub struct ControlState {
    gesture: Gesture,
    grabbing: bool,
    listeners: Listeners,
    spherical: Spherical,
    rotation_delta: RotationDelta,
    pan_offset: DVec3,
    /// Radius multiplier, consumed by the next update.
    scale: f64,
    zoom_changed: bool,
    rotate_start: Vec2,
    pan_start: Vec2,
    dolly_start: Vec2,
    pinch_start: f32,
    last_pose: Option<(Vec3, Quat)>,
    saved: Option<SavedState>,
    events: Vec<ControlEvent>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            gesture: Gesture::None,
            grabbing: false,
            listeners: Listeners::SURFACE,
            spherical: Spherical::default(),
            rotation_delta: RotationDelta::default(),
            pan_offset: DVec3::ZERO,
            scale: 1.0,
            zoom_changed: false,
            rotate_start: Vec2::ZERO,
            pan_start: Vec2::ZERO,
            dolly_start: Vec2::ZERO,
            pinch_start: 0.0,
            last_pose: None,
            saved: None,
            events: Vec::new(),
        }
    }
}

impl OrbitCam {
    /// Create a controller orbiting `target`.
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    /// The active gesture.
    pub fn gesture(&self) -> Gesture {
        self.state.gesture
    }

    /// Is a pointer currently holding the surface?
    pub fn is_grabbing(&self) -> bool {
        self.state.grabbing
    }

    /// Is the controller registered for surface input?
    pub fn is_attached(&self) -> bool {
        !self.state.listeners.is_empty()
    }

    /// The polar angle computed by the last update, measured from [`OrbitCam::up`].
    pub fn polar_angle(&self) -> f64 {
        self.state.spherical.phi
    }

    /// The azimuth computed by the last update, measured around [`OrbitCam::up`].
    pub fn azimuthal_angle(&self) -> f64 {
        self.state.spherical.theta
    }

    /// The last snapshot taken by [`OrbitCam::save_state`].
    pub fn saved_state(&self) -> Option<SavedState> {
        self.state.saved
    }

    /// Take the notifications raised since the last drain, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = ControlEvent> + '_ {
        self.state.events.drain(..)
    }

    /// Register for surface input again after [`OrbitCam::dispose`].
    pub fn attach(&mut self) {
        self.state.listeners = Listeners::SURFACE;
    }

    /// Stop listening to the surface. Any gesture in flight and its pending motion are discarded.
    /// Calling this more than once has no further effect.
    pub fn dispose(&mut self) {
        if !self.is_attached() {
            return;
        }
        self.state.listeners = Listeners::NONE;
        self.state.gesture = Gesture::None;
        self.state.grabbing = false;
        self.state.rotation_delta = RotationDelta::default();
        self.state.pan_offset = DVec3::ZERO;
        self.state.scale = 1.0;
    }

    /// Overwrite the snapshot used by [`OrbitCam::reset`] with the current target, position, and
    /// zoom.
    pub fn save_state(&mut self, transform: &Transform, projection: &Projection) {
        self.state.saved = Some(SavedState {
            target: self.target,
            position: transform.translation,
            zoom: projections::zoom(projection),
        });
    }

    /// Restore the target, position, and zoom saved by [`OrbitCam::save_state`], discard pending
    /// motion, and end any gesture. Raises exactly one [`ControlEvent::Change`].
    ///
    /// If no snapshot exists yet, only the gesture is cleared. One is taken automatically by the
    /// first [`OrbitCam::update`].
    pub fn reset(&mut self, transform: &mut Transform, projection: &mut Projection) {
        self.state.gesture = Gesture::None;
        self.state.grabbing = false;
        self.state.listeners.remove(Listeners::DRAG);
        let Some(saved) = self.state.saved else {
            return;
        };

        self.target = saved.target;
        transform.translation = saved.position;
        transform.look_at(self.target, self.up_axis().as_vec3());
        projections::set_zoom(projection, saved.zoom, self.viewport);

        self.state.rotation_delta = RotationDelta::default();
        self.state.pan_offset = DVec3::ZERO;
        self.state.scale = 1.0;
        self.state.zoom_changed = false;
        self.state.spherical = Spherical::from_offset(
            self.to_y_up() * (transform.translation - self.target).as_dvec3(),
        );
        self.state.last_pose = Some((transform.translation, transform.rotation));
        self.state.events.push(ControlEvent::Change);
    }

    /// Move the orbit target. The camera keeps its position and turns to face the new target on
    /// the next update.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Queue an orbit around the up axis. Positive angles move the camera clockwise when viewed
    /// from above.
    pub fn rotate_left(&mut self, angle: f64) {
        self.state.rotation_delta.theta -= angle;
    }

    /// Queue an orbit toward the top pole. Positive angles raise the camera.
    pub fn rotate_up(&mut self, angle: f64) {
        self.state.rotation_delta.phi -= angle;
    }

    /// Queue a dolly toward the target by `dolly_scale`, e.g. `0.95` moves 5% closer. Orthographic
    /// cameras zoom in instead.
    pub fn dolly_in(&mut self, dolly_scale: f64, projection: &mut Projection) {
        self.dolly(dolly_scale, projection);
    }

    /// Queue a dolly away from the target by `dolly_scale`. Orthographic cameras zoom out instead.
    pub fn dolly_out(&mut self, dolly_scale: f64, projection: &mut Projection) {
        self.dolly(dolly_scale.recip(), projection);
    }

    /// Queue a dolly that places the camera `distance` from the target on the next update, replacing
    /// any dolly already pending.
    pub fn dolly_to(&mut self, distance: f32, transform: &Transform) {
        let radius = transform.translation.distance(self.target) as f64;
        if radius > 0.0 && distance.is_finite() && distance > 0.0 {
            self.state.scale = distance as f64 / radius;
        }
    }

    /// Queue a pan by a screen-space delta in pixels, right and down positive.
    pub fn pan(&mut self, delta: Vec2, transform: &Transform, projection: &Projection) {
        if !self.has_valid_viewport() {
            return;
        }
        let target_distance = (transform.translation - self.target).length() as f64;
        let Some(distance) =
            projections::pan_distances(projection, delta, target_distance, self.viewport)
        else {
            warn!("OrbitCam encountered an unsupported projection; panning disabled.");
            self.enabled_motion.pan = false;
            return;
        };

        let camera_x = (transform.rotation * Vec3::X).as_dvec3();
        let vertical = if self.screen_space_panning {
            (transform.rotation * Vec3::Y).as_dvec3()
        } else {
            self.up_axis().cross(camera_x)
        };
        self.state.pan_offset += camera_x * -distance.x + vertical * distance.y;
    }

    /// Deliver an input event from the surface. Returns how the host should treat the event.
    ///
    /// Events of a kind the controller isn't registered for are ignored, so this is always safe to
    /// call, even after [`OrbitCam::dispose`].
    pub fn handle_input(
        &mut self,
        event: &SurfaceEvent,
        transform: &mut Transform,
        projection: &mut Projection,
    ) -> InputResponse {
        if !self.state.listeners.contains(event.kind()) {
            return InputResponse::IGNORED;
        }
        match event {
            SurfaceEvent::ContextMenu => self.on_context_menu(),
            SurfaceEvent::PointerDown(press) => self.on_pointer_down(press),
            SurfaceEvent::PointerMove(position) => {
                self.on_pointer_move(*position, transform, projection)
            }
            SurfaceEvent::PointerUp => self.on_pointer_up(),
            SurfaceEvent::Wheel { delta_y } => self.on_wheel(*delta_y, transform, projection),
            SurfaceEvent::TouchStart(touches) => self.on_touch_start(touches),
            SurfaceEvent::TouchMove(touches) => self.on_touch_move(touches, transform, projection),
            SurfaceEvent::TouchEnd(_) => self.on_touch_end(),
            SurfaceEvent::KeyDown(key) => self.on_key_down(*key, transform, projection),
        }
    }

    /// Apply pending motion to the camera, enforce all limits, and point the camera at the target.
    ///
    /// Returns `true` and raises [`ControlEvent::Change`] if the camera moved, turned, or zoomed
    /// noticeably since the last reported change.
    pub fn update(&mut self, transform: &mut Transform, projection: &Projection) -> bool {
        if self.state.saved.is_none() {
            self.save_state(transform, projection);
        }

        let to_y_up = self.to_y_up();
        let target = self.target.as_dvec3();
        let offset = to_y_up * (transform.translation.as_dvec3() - target);
        let mut spherical = Spherical::from_offset(offset);

        if self.auto_rotate.enabled && self.state.gesture == Gesture::None {
            self.rotate_left(self.auto_rotate.angle_per_update());
        }

        let applied = self.damping.applied_fraction();
        spherical.theta += self.state.rotation_delta.theta * applied;
        spherical.phi += self.state.rotation_delta.phi * applied;

        let limits = &self.orbit_limits;
        spherical.theta = clamp_azimuth(
            wrap_angle(spherical.theta),
            limits.min_azimuth_angle as f64,
            limits.max_azimuth_angle as f64,
        );
        spherical.phi = clamp_polar(
            spherical.phi,
            limits.min_polar_angle as f64,
            limits.max_polar_angle as f64,
        );
        spherical.make_safe();
        spherical.radius = self
            .zoom_limits
            .clamp_distance(spherical.radius * self.state.scale);

        let target = target + self.state.pan_offset * applied;
        self.target = target.as_vec3();

        let offset = to_y_up.inverse() * spherical.to_offset();
        transform.translation = (target + offset).as_vec3();
        transform.look_at(self.target, self.up_axis().as_vec3());

        let retained = self.damping.retained_fraction();
        self.state.rotation_delta.theta *= retained;
        self.state.rotation_delta.phi *= retained;
        self.state.pan_offset *= retained;
        self.state.scale = 1.0;
        self.state.spherical = spherical;

        if self.state.zoom_changed || self.pose_changed(transform) {
            self.state.last_pose = Some((transform.translation, transform.rotation));
            self.state.zoom_changed = false;
            self.state.events.push(ControlEvent::Change);
            true
        } else {
            false
        }
    }

    /// Update transforms for all cameras and publish their notifications. Called once per frame.
    ///
    /// A camera's [`Transform`] is only flagged as changed when the update reports a change.
    pub fn update_cameras(
        mut cameras: Query<(Entity, &mut OrbitCam, &mut Transform, &Projection)>,
        mut events: EventWriter<OrbitCamEvent>,
        mut redraw: EventWriter<RequestRedraw>,
    ) {
        for (camera, mut controller, mut transform, projection) in &mut cameras {
            if controller.update(transform.bypass_change_detection(), projection) {
                transform.set_changed();
            }
            for kind in controller.drain_events() {
                if kind == ControlEvent::Change {
                    redraw.write(RequestRedraw);
                }
                events.write(OrbitCamEvent { camera, kind });
            }
        }
    }

    fn up_axis(&self) -> DVec3 {
        self.up.try_normalize().unwrap_or(Vec3::Y).as_dvec3()
    }

    /// Rotation taking the up axis onto +Y, where the spherical math happens.
    fn to_y_up(&self) -> DQuat {
        DQuat::from_rotation_arc(self.up_axis(), DVec3::Y)
    }

    fn pose_changed(&self, transform: &Transform) -> bool {
        let Some((last_position, last_rotation)) = self.state.last_pose else {
            return true;
        };
        let displacement = last_position
            .as_dvec3()
            .distance_squared(transform.translation.as_dvec3());
        // Small-angle approximation: cos(x / 2) ~ 1 - x^2 / 8.
        let (a, b) = (last_rotation.as_dquat(), transform.rotation.as_dquat());
        let alignment = (a.dot(b) / (a.length() * b.length())).abs();
        displacement > CHANGE_EPSILON || 8.0 * (1.0 - alignment) > CHANGE_EPSILON
    }

    fn has_valid_viewport(&self) -> bool {
        let valid = self.viewport.x > 0.0 && self.viewport.y > 0.0 && self.viewport.is_finite();
        if !valid {
            warn_once!(
                "OrbitCam viewport is {:?}; rotate and pan input ignored.",
                self.viewport
            );
        }
        valid
    }

    fn dolly(&mut self, radius_factor: f64, projection: &mut Projection) {
        match projections::dolly(projection, radius_factor, &self.zoom_limits, self.viewport) {
            DollyOutcome::Radius(factor) => self.state.scale *= factor,
            DollyOutcome::Zoom => self.state.zoom_changed = true,
            DollyOutcome::Unsupported => {
                warn!("OrbitCam encountered an unsupported projection; dolly and zoom disabled.");
                self.enabled_motion.zoom = false;
            }
        }
    }

    /// Queue an orbit from a pixel delta. A full viewport height is one revolution.
    fn rotate_by_pixels(&mut self, delta: Vec2) {
        if !self.has_valid_viewport() {
            return;
        }
        let delta = delta.as_dvec2() * self.sensitivity.rotate as f64;
        let height = self.viewport.y as f64;
        self.rotate_left(TAU * delta.x / height);
        self.rotate_up(TAU * delta.y / height);
    }

    /// Switch to `gesture`. Any active gesture is ended first, so every `Start` is matched by
    /// exactly one `End`.
    fn begin(&mut self, gesture: Gesture) -> bool {
        if !gesture.is_permitted(&self.enabled_motion) {
            self.end_gesture();
            return false;
        }
        debug!("OrbitCam gesture {:?} -> {:?}", self.state.gesture, gesture);
        self.end_gesture();
        self.state.gesture = gesture;
        self.state.events.push(ControlEvent::Start);
        true
    }

    fn end_gesture(&mut self) {
        if self.state.gesture.is_active() {
            self.state.events.push(ControlEvent::End);
        }
        self.state.gesture = Gesture::None;
    }

    fn on_context_menu(&mut self) -> InputResponse {
        if self.enabled {
            InputResponse::PREVENT_DEFAULT
        } else {
            InputResponse::IGNORED
        }
    }

    fn on_pointer_down(&mut self, press: &PointerPress) -> InputResponse {
        if !self.enabled {
            return InputResponse::IGNORED;
        }
        let Some(action) = self.bindings.mouse.action(press.button) else {
            self.end_gesture();
            return InputResponse::PREVENT_DEFAULT;
        };
        let gesture = resolve_mouse(action, press.modifiers.any());
        if !self.begin(gesture) {
            return InputResponse::PREVENT_DEFAULT;
        }
        match gesture {
            Gesture::Rotate => self.state.rotate_start = press.position,
            Gesture::Pan => self.state.pan_start = press.position,
            Gesture::Dolly => self.state.dolly_start = press.position,
            _ => (),
        }
        self.state.grabbing = true;
        self.state.listeners.insert(Listeners::DRAG);
        InputResponse::PREVENT_DEFAULT
    }

    fn on_pointer_move(
        &mut self,
        position: Vec2,
        transform: &mut Transform,
        projection: &mut Projection,
    ) -> InputResponse {
        if !self.enabled {
            return InputResponse::IGNORED;
        }
        match self.state.gesture {
            Gesture::Rotate if self.enabled_motion.rotate => {
                self.rotate_by_pixels(position - self.state.rotate_start);
                self.state.rotate_start = position;
            }
            Gesture::Dolly if self.enabled_motion.zoom => {
                let dy = position.y - self.state.dolly_start.y;
                let scale = zoom_scale(self.sensitivity.zoom);
                if dy > 0.0 {
                    self.dolly_out(scale, projection);
                } else if dy < 0.0 {
                    self.dolly_in(scale, projection);
                }
                self.state.dolly_start = position;
            }
            Gesture::Pan if self.enabled_motion.pan => {
                let delta = (position - self.state.pan_start) * self.sensitivity.pan;
                self.pan(delta, transform, projection);
                self.state.pan_start = position;
            }
            _ => return InputResponse::IGNORED,
        }
        self.update(transform, projection);
        InputResponse::PREVENT_DEFAULT
    }

    fn on_pointer_up(&mut self) -> InputResponse {
        self.state.grabbing = false;
        self.state.listeners.remove(Listeners::DRAG);
        self.end_gesture();
        InputResponse::HANDLED
    }

    fn on_wheel(
        &mut self,
        delta_y: f32,
        transform: &mut Transform,
        projection: &mut Projection,
    ) -> InputResponse {
        if !self.enabled
            || !self.enabled_motion.zoom
            || !matches!(self.state.gesture, Gesture::None | Gesture::Rotate)
        {
            return InputResponse::IGNORED;
        }
        self.state.events.push(ControlEvent::Start);
        let scale = zoom_scale(self.sensitivity.zoom);
        if delta_y < 0.0 {
            self.dolly_in(scale, projection);
        } else if delta_y > 0.0 {
            self.dolly_out(scale, projection);
        }
        self.update(transform, projection);
        self.state.events.push(ControlEvent::End);
        InputResponse::CAPTURED
    }

    fn on_key_down(
        &mut self,
        key: KeyCode,
        transform: &mut Transform,
        projection: &mut Projection,
    ) -> InputResponse {
        if !self.enabled || !self.enabled_motion.keys || !self.enabled_motion.pan {
            return InputResponse::IGNORED;
        }
        let Some(delta) = self
            .bindings
            .keys
            .pan_direction(key, self.sensitivity.key_pan)
        else {
            return InputResponse::IGNORED;
        };
        self.pan(delta, transform, projection);
        self.update(transform, projection);
        // Arrow keys would otherwise scroll the host.
        InputResponse::PREVENT_DEFAULT
    }

    fn on_touch_start(&mut self, touches: &TouchPoints) -> InputResponse {
        if !self.enabled {
            return InputResponse::IGNORED;
        }
        let touch_bindings = self.bindings.touches;
        let gesture = match touches.len() {
            1 => touch_bindings.one.map(resolve_one_touch),
            2 => touch_bindings.two.map(resolve_two_touch),
            _ => None,
        };
        let Some(gesture) = gesture else {
            self.end_gesture();
            return InputResponse::PREVENT_DEFAULT;
        };
        if !self.begin(gesture) {
            return InputResponse::PREVENT_DEFAULT;
        }

        let focus = touches.focus().unwrap_or_default();
        if self.drives(gesture, Capability::Rotate) {
            self.state.rotate_start = focus;
        }
        if self.drives(gesture, Capability::Pan) {
            self.state.pan_start = focus;
        }
        if self.drives(gesture, Capability::Zoom) {
            self.state.pinch_start = touches.pinch_distance().unwrap_or_default();
        }
        InputResponse::PREVENT_DEFAULT
    }

    fn on_touch_move(
        &mut self,
        touches: &TouchPoints,
        transform: &mut Transform,
        projection: &mut Projection,
    ) -> InputResponse {
        let gesture = self.state.gesture;
        if !self.enabled || !gesture.is_touch() || !gesture.is_permitted(&self.enabled_motion) {
            return InputResponse::IGNORED;
        }

        // Dolly first: pan reads the camera distance, which a pinch doesn't change until update.
        if self.drives(gesture, Capability::Zoom) {
            if let Some(distance) = touches.pinch_distance() {
                if let Some(factor) =
                    pinch_scale(self.state.pinch_start, distance, self.sensitivity.zoom)
                {
                    self.dolly_out(factor, projection);
                }
                self.state.pinch_start = distance;
            }
        }
        if let Some(focus) = touches.focus() {
            if self.drives(gesture, Capability::Rotate) {
                self.rotate_by_pixels(focus - self.state.rotate_start);
                self.state.rotate_start = focus;
            }
            if self.drives(gesture, Capability::Pan) {
                let delta = (focus - self.state.pan_start) * self.sensitivity.pan;
                self.pan(delta, transform, projection);
                self.state.pan_start = focus;
            }
        }
        self.update(transform, projection);
        InputResponse::CAPTURED
    }

    fn on_touch_end(&mut self) -> InputResponse {
        self.end_gesture();
        InputResponse::HANDLED
    }

    /// Does `gesture` use `capability`, and is that capability enabled?
    fn drives(&self, gesture: Gesture, capability: Capability) -> bool {
        gesture.capabilities().contains(&capability) && self.enabled_motion.allows(capability)
    }
}

/// Polar and azimuth windows, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct OrbitLimits {
    /// How close to the top pole the camera may orbit.
    pub min_polar_angle: f32,
    /// How close to the bottom pole the camera may orbit.
    pub max_polar_angle: f32,
    /// Lower azimuth bound. Unbounded unless both azimuth bounds are finite.
    pub min_azimuth_angle: f32,
    /// Upper azimuth bound. If it wraps below the lower bound the window crosses the back of the
    /// orbit, e.g. `[3.0, -3.0]` only allows angles near `PI`.
    pub max_azimuth_angle: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_polar_angle: 0.0,
            max_polar_angle: std::f32::consts::PI,
            min_azimuth_angle: f32::NEG_INFINITY,
            max_azimuth_angle: f32::INFINITY,
        }
    }
}

/// The sensitivity of the camera controller to inputs.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Sensitivity {
    /// Rotation multiplier.
    pub rotate: f32,
    /// Pan multiplier.
    pub pan: f32,
    /// Exponent applied to every dolly step.
    pub zoom: f32,
    /// Pixels panned per key press.
    pub key_pan: f32,
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self {
            rotate: 1.0,
            pan: 1.0,
            zoom: 1.0,
            key_pan: 7.0,
        }
    }
}

/// Controls what kinds of motions are allowed to initiate, and whether active gestures keep
/// receiving moves.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct EnabledMotion {
    /// Should rotate be enabled?
    pub rotate: bool,
    /// Should pan be enabled?
    pub pan: bool,
    /// Should dolly and zoom be enabled?
    pub zoom: bool,
    /// Should the pan keys be enabled? Keys also require `pan`.
    pub keys: bool,
}

impl Default for EnabledMotion {
    fn default() -> Self {
        Self {
            rotate: true,
            pan: true,
            zoom: true,
            keys: true,
        }
    }
}

impl EnabledMotion {
    /// Is `capability` enabled?
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Rotate => self.rotate,
            Capability::Pan => self.pan,
            Capability::Zoom => self.zoom,
        }
    }
}

/// Idle orbiting around the up axis while no gesture is active.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct AutoRotate {
    /// Should the camera orbit on its own?
    pub enabled: bool,
    /// Revolutions per 30 seconds at 60 updates per second.
    pub speed: f32,
}

impl Default for AutoRotate {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: 2.0,
        }
    }
}

impl AutoRotate {
    /// The azimuth increment of one update.
    pub fn angle_per_update(&self) -> f64 {
        TAU / 60.0 / 60.0 * self.speed as f64
    }
}
