//! A `bevy_orbit_cam` extension that draws a marker at the orbit target while a gesture is in
//! progress, so users can see what the camera is turning around.

use bevy_app::prelude::*;
use bevy_color::Color;
use bevy_ecs::prelude::*;
use bevy_gizmos::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_render::prelude::*;
use bevy_transform::{prelude::*, TransformSystem};

use crate::controller::component::OrbitCam;

/// See the [module](self) docs.
pub struct TargetIndicatorPlugin;

impl Plugin for TargetIndicatorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            draw_target.after(TransformSystem::TransformPropagate),
        )
        .register_type::<TargetIndicator>();
    }
}

/// Optional. Configures the target marker of an [`OrbitCam`]. Cameras without this component get
/// the default marker.
#[derive(Debug, Clone, Component, Reflect)]
pub struct TargetIndicator {
    /// Should the marker be drawn for this camera?
    pub enabled: bool,
    /// Marker color.
    pub color: Color,
}

impl Default for TargetIndicator {
    fn default() -> Self {
        Self {
            enabled: true,
            color: Color::WHITE,
        }
    }
}

/// Marker radius for a target `distance` away from the camera, roughly constant on screen.
pub fn indicator_size(projection: &Projection, distance: f32) -> Option<f32> {
    let size = match projection {
        Projection::Perspective(perspective) => distance * perspective.fov,
        Projection::Orthographic(ortho) => ortho.scale * 750.0,
        Projection::Custom(_) => return None,
    };
    Some(size * 0.01)
}

/// Use gizmos to draw the orbit target in world space.
pub fn draw_target(
    cameras: Query<(
        &OrbitCam,
        &Projection,
        &GlobalTransform,
        Option<&TargetIndicator>,
    )>,
    mut gizmos: Gizmos,
) {
    for (controller, projection, cam_transform, indicator) in &cameras {
        let indicator = indicator.cloned().unwrap_or_default();
        if !indicator.enabled || !controller.gesture().is_active() {
            continue;
        }
        let eye = cam_transform.translation();
        let Some(size) = indicator_size(projection, eye.distance(controller.target)) else {
            continue;
        };

        // Pull the marker toward the camera so it doesn't clip into the surface it sits on.
        let center = controller.target + (eye - controller.target).normalize_or_zero() * size;
        let rotation = cam_transform.compute_transform().rotation;
        gizmos.circle(Isometry3d::new(center, rotation), size, indicator.color);

        let offset = 1.5 * size;
        let arm_length = 0.4;
        for direction in [
            cam_transform.left(),
            cam_transform.right(),
            cam_transform.up(),
            cam_transform.down(),
        ] {
            gizmos.ray(
                center + offset * *direction,
                offset * arm_length * *direction,
                indicator.color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_grows_with_distance() {
        let perspective = Projection::Perspective(Default::default());
        let near = indicator_size(&perspective, 1.0).unwrap();
        let far = indicator_size(&perspective, 10.0).unwrap();
        assert!((far - near * 10.0).abs() < 1e-6);
    }

    #[test]
    fn orthographic_marker_follows_scale() {
        let mut ortho = OrthographicProjection::default_3d();
        ortho.scale = 2.0;
        let size = indicator_size(&Projection::Orthographic(ortho), 123.0).unwrap();
        assert!((size - 15.0).abs() < 1e-5);
    }
}
