//! A `bevy_orbit_cam` extension that smoothly moves the orbit target to a point, optionally
//! changing how far the camera sits from it. Useful for "focus on what I double-clicked" and
//! "frame the whole model" actions.

use std::time::Duration;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::{cubic_splines::CubicSegment, prelude::*};
use bevy_platform::collections::HashMap;
use bevy_reflect::prelude::*;
use bevy_render::prelude::*;
use bevy_time::prelude::*;
use bevy_transform::prelude::*;
use bevy_window::RequestRedraw;

use crate::controller::{component::OrbitCam, projections};

/// See the [module](self) docs.
pub struct FocusPlugin;

impl Plugin for FocusPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Focus>()
            .add_event::<FocusOn>()
            .add_event::<RequestRedraw>()
            .add_systems(PreUpdate, Focus::update.before(OrbitCam::update_cameras))
            // Late, so requests sent anywhere in Update are picked up next frame.
            .add_systems(PostUpdate, FocusOn::receive)
            .register_type::<Focus>();
    }
}

/// How far the camera should end up from the new target.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum FocusDistance {
    /// Keep the current orbit radius.
    Keep,
    /// This exact distance.
    Exact(f32),
    /// A fraction of the camera's current distance to the new target. `0.5` halves it.
    Fraction(f32),
    /// Close enough that a sphere of this radius around the new target fills the view. Only
    /// perspective cameras can be fitted; others keep their radius.
    FitSphere {
        /// Radius of the sphere to frame.
        radius: f32,
    },
}

impl FocusDistance {
    /// The final camera distance for a camera `to_target` from its current target and `to_point`
    /// from the new one.
    pub fn resolve(&self, to_target: f32, to_point: f32, projection: &Projection) -> f32 {
        match *self {
            FocusDistance::Keep => to_target,
            FocusDistance::Exact(distance) => distance,
            FocusDistance::Fraction(fraction) => to_point * fraction,
            FocusDistance::FitSphere { radius } => projections::fit_distance(projection, radius)
                .unwrap_or_else(|| {
                    warn!("FitSphere focus needs a perspective projection; keeping the distance.");
                    to_target
                }),
        }
    }
}

/// Send this event to move a camera's orbit target to `point`. Animation speed is configured
/// with the [`Focus`] resource.
#[derive(Debug, Clone, Event)]
pub struct FocusOn {
    /// The camera to move.
    pub camera: Entity,
    /// The new orbit target.
    pub point: Vec3,
    /// Where the camera should end up relative to `point`.
    pub distance: FocusDistance,
}

impl FocusOn {
    fn receive(
        mut events: EventReader<Self>,
        mut state: ResMut<Focus>,
        time: Res<Time>,
        cameras: Query<(&OrbitCam, &Transform, &Projection)>,
    ) {
        for event in events.read() {
            let Ok((controller, transform, projection)) = cameras.get(event.camera) else {
                continue;
            };
            let to_target = transform.translation.distance(controller.target);
            let to_point = transform.translation.distance(event.point);
            let final_distance = event.distance.resolve(to_target, to_point, projection);
            if !final_distance.is_finite() || final_distance <= 0.0 {
                warn!("Ignoring FocusOn with distance {final_distance}");
                continue;
            }

            state.map.insert(
                event.camera,
                FocusEntry {
                    start: time.elapsed(),
                    initial_target: controller.target,
                    initial_distance: to_target,
                    final_target: event.point,
                    final_distance,
                    complete: false,
                },
            );
        }
    }
}

struct FocusEntry {
    start: Duration,
    initial_target: Vec3,
    initial_distance: f32,
    final_target: Vec3,
    final_distance: f32,
    complete: bool,
}

/// Stores settings and state for the focus plugin.
#[derive(Resource, Reflect)]
pub struct Focus {
    /// The duration of the focus animation. Zero jumps straight to the end.
    pub animation_duration: Duration,
    /// The easing curve of the focus animation.
    #[reflect(ignore)]
    pub animation_curve: CubicSegment<Vec2>,
    #[reflect(ignore)]
    map: HashMap<Entity, FocusEntry>,
}

impl Default for Focus {
    fn default() -> Self {
        Self {
            animation_duration: Duration::from_millis(400),
            animation_curve: CubicSegment::new_bezier_easing((0.42, 0.0), (0.58, 1.0)),
            map: Default::default(),
        }
    }
}

impl Focus {
    /// Is a focus animation running for `camera`?
    pub fn is_animating(&self, camera: Entity) -> bool {
        self.map.contains_key(&camera)
    }

    fn update(
        mut state: ResMut<Self>,
        time: Res<Time>,
        mut cameras: Query<(&mut OrbitCam, &Transform)>,
        mut redraw: EventWriter<RequestRedraw>,
    ) {
        let now = time.elapsed();
        let animation_duration = state.animation_duration;
        let animation_curve = state.animation_curve.clone();

        for (camera, entry) in state.map.iter_mut() {
            let Ok((mut controller, transform)) = cameras.get_mut(*camera) else {
                entry.complete = true;
                continue;
            };
            let progress_t = if animation_duration.is_zero() {
                1.0
            } else {
                (now.saturating_sub(entry.start).as_secs_f32() / animation_duration.as_secs_f32())
                    .clamp(0.0, 1.0)
            };
            let progress = animation_curve.ease(progress_t);

            controller.set_target(entry.initial_target.lerp(entry.final_target, progress));
            let distance =
                entry.initial_distance + (entry.final_distance - entry.initial_distance) * progress;
            controller.dolly_to(distance, transform);

            if progress_t >= 1.0 {
                entry.complete = true;
            }
            redraw.write(RequestRedraw);
        }
        state.map.retain(|_, entry| !entry.complete);
    }
}
