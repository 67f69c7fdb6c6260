//! Projection-specific pan and dolly math.
//!
//! Perspective cameras dolly by changing their distance to the target; orthographic cameras zoom
//! by changing their projection scale, with `zoom = 1 / scale`. Custom projections are reported
//! as unsupported so the caller can switch the capability off.

use bevy_math::{prelude::*, DVec2};
use bevy_render::camera::CameraProjection;
use bevy_render::prelude::*;

use super::zoom::ZoomLimits;

/// Result of applying a dolly factor to a projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DollyOutcome {
    /// Multiply the orbit radius by this on the next update.
    Radius(f64),
    /// The orthographic zoom was changed in place and the projection refreshed.
    Zoom,
    /// The projection can't be dollied.
    Unsupported,
}

/// World-space pan distances along the camera's X and Y axes for a pixel delta.
///
/// `target_distance` is the distance from the camera to its target. The perspective result uses
/// only the viewport height so the aspect ratio doesn't distort pan speed. Returns `None` for
/// projections that can't be panned.
pub fn pan_distances(
    projection: &Projection,
    delta: Vec2,
    target_distance: f64,
    viewport: Vec2,
) -> Option<DVec2> {
    let delta = delta.as_dvec2();
    let viewport = viewport.as_dvec2();
    match projection {
        Projection::Perspective(perspective) => {
            // Half the vertical fov spans center to top of screen.
            let half_height = target_distance * (perspective.fov as f64 / 2.0).tan();
            Some(2.0 * delta * half_height / viewport.y)
        }
        Projection::Orthographic(ortho) => {
            let visible = ortho.area.size().as_dvec2();
            Some(delta * visible / viewport)
        }
        Projection::Custom(_) => None,
    }
}

/// Dolly by `factor`: values below one move closer, above one move away.
pub fn dolly(
    projection: &mut Projection,
    factor: f64,
    limits: &ZoomLimits,
    viewport: Vec2,
) -> DollyOutcome {
    match projection {
        Projection::Perspective(_) => DollyOutcome::Radius(factor),
        Projection::Orthographic(ortho) => {
            let zoom = limits.clamp_zoom(orthographic_zoom(ortho) as f64 / factor);
            set_orthographic_zoom(ortho, zoom as f32, viewport);
            DollyOutcome::Zoom
        }
        Projection::Custom(_) => DollyOutcome::Unsupported,
    }
}

/// The zoom factor of a projection. Only orthographic projections zoom; everything else reports
/// `1.0`.
pub fn zoom(projection: &Projection) -> f32 {
    match projection {
        Projection::Orthographic(ortho) => orthographic_zoom(ortho),
        Projection::Perspective(_) | Projection::Custom(_) => 1.0,
    }
}

/// Set the zoom factor of an orthographic projection and refresh it. Other projections are left
/// untouched.
pub fn set_zoom(projection: &mut Projection, zoom: f32, viewport: Vec2) {
    if let Projection::Orthographic(ortho) = projection {
        set_orthographic_zoom(ortho, zoom, viewport);
    }
}

/// Camera distance at which a sphere of `radius` fills the narrower axis of a perspective view.
pub fn fit_distance(projection: &Projection, radius: f32) -> Option<f32> {
    let Projection::Perspective(perspective) = projection else {
        return None;
    };
    let half_vertical = perspective.fov / 2.0;
    let half_horizontal = (half_vertical.tan() * perspective.aspect_ratio).atan();
    let half_fov = half_vertical.min(half_horizontal);
    let distance = radius / half_fov.sin();
    distance.is_finite().then_some(distance)
}

fn orthographic_zoom(ortho: &OrthographicProjection) -> f32 {
    ortho.scale.recip()
}

fn set_orthographic_zoom(ortho: &mut OrthographicProjection, zoom: f32, viewport: Vec2) {
    ortho.scale = zoom.recip();
    // The visible area is derived from the scale, so it has to be recomputed.
    if viewport.x > 0.0 && viewport.y > 0.0 {
        ortho.update(viewport.x, viewport.y);
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn orthographic(viewport: Vec2) -> Projection {
        let mut ortho = OrthographicProjection::default_3d();
        ortho.update(viewport.x, viewport.y);
        Projection::Orthographic(ortho)
    }

    #[test]
    fn perspective_pan_scales_with_distance() {
        let projection = Projection::Perspective(PerspectiveProjection {
            fov: FRAC_PI_2,
            ..Default::default()
        });
        let viewport = Vec2::new(800.0, 600.0);
        let near = pan_distances(&projection, Vec2::new(30.0, 60.0), 1.0, viewport).unwrap();
        let far = pan_distances(&projection, Vec2::new(30.0, 60.0), 10.0, viewport).unwrap();
        // tan(45deg) == 1, so one screen height spans two units at distance one.
        assert!((near - DVec2::new(0.1, 0.2)).length() < 1e-6);
        assert!((far - near * 10.0).length() < 1e-6);
    }

    #[test]
    fn orthographic_pan_follows_visible_area() {
        let viewport = Vec2::new(800.0, 600.0);
        let projection = orthographic(viewport);
        let pan = pan_distances(&projection, Vec2::new(8.0, 6.0), 123.0, viewport).unwrap();
        let Projection::Orthographic(ortho) = &projection else {
            unreachable!()
        };
        let expected = DVec2::new(
            8.0 * ortho.area.width() as f64 / 800.0,
            6.0 * ortho.area.height() as f64 / 600.0,
        );
        assert!((pan - expected).length() < 1e-9);
    }

    #[test]
    fn orthographic_dolly_changes_zoom_within_limits() {
        let viewport = Vec2::new(800.0, 600.0);
        let mut projection = orthographic(viewport);
        let limits = ZoomLimits {
            max_zoom: 1.5,
            ..Default::default()
        };

        assert_eq!(
            dolly(&mut projection, 0.5, &limits, viewport),
            DollyOutcome::Zoom
        );
        assert!((zoom(&projection) - 1.5).abs() < 1e-6);

        dolly(&mut projection, 2.0, &limits, viewport);
        assert!((zoom(&projection) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn perspective_dolly_defers_to_radius() {
        let mut projection = Projection::Perspective(Default::default());
        assert_eq!(
            dolly(&mut projection, 0.95, &ZoomLimits::default(), Vec2::ONE),
            DollyOutcome::Radius(0.95)
        );
        assert_eq!(zoom(&projection), 1.0);
    }

    #[test]
    fn fit_distance_uses_narrower_axis() {
        let wide = Projection::Perspective(PerspectiveProjection {
            fov: FRAC_PI_2,
            aspect_ratio: 2.0,
            ..Default::default()
        });
        let expected = 1.0 / (FRAC_PI_2 / 2.0).sin();
        assert!((fit_distance(&wide, 1.0).unwrap() - expected).abs() < 1e-5);
        assert_eq!(fit_distance(&orthographic(Vec2::ONE), 1.0), None);
    }
}
