//! Provides [`ZoomLimits`] settings and the dolly scale factors.

use bevy_reflect::Reflect;

/// The radius never shrinks below this, even with `min_distance` at zero, so the camera can't
/// land on its target.
pub const MIN_RADIUS: f64 = 1e-6;

/// Bound dolly distance for perspective cameras and zoom for orthographic ones.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ZoomLimits {
    /// How close a perspective camera may dolly to its target.
    pub min_distance: f32,
    /// How far a perspective camera may dolly from its target.
    pub max_distance: f32,
    /// The smallest orthographic zoom, i.e. how far out an orthographic camera may zoom.
    pub min_zoom: f32,
    /// The largest orthographic zoom.
    pub max_zoom: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_zoom: 0.0,
            max_zoom: f32::INFINITY,
        }
    }
}

impl ZoomLimits {
    /// Clamp a camera radius. An inverted window resolves to `min_distance`.
    pub fn clamp_distance(&self, radius: f64) -> f64 {
        (self.min_distance as f64)
            .max((self.max_distance as f64).min(radius))
            .max(MIN_RADIUS)
    }

    /// Clamp an orthographic zoom. An inverted window resolves to `min_zoom`.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        (self.min_zoom as f64)
            .max((self.max_zoom as f64).min(zoom))
            .max(f32::MIN_POSITIVE as f64)
    }
}

/// The dolly factor of one wheel notch or one dolly-drag step.
pub fn zoom_scale(zoom_speed: f32) -> f64 {
    0.95_f64.powf(zoom_speed as f64)
}

/// The dolly factor of a pinch that went from `start` to `end` finger distance.
///
/// Returns `None` if the start distance can't be divided by, e.g. two fingers touching down on the
/// same pixel.
pub fn pinch_scale(start: f32, end: f32, zoom_speed: f32) -> Option<f64> {
    let ratio = end as f64 / start as f64;
    (start > 0.0 && ratio.is_finite() && ratio > 0.0).then(|| ratio.powf(zoom_speed as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_notch_is_five_percent() {
        assert!((zoom_scale(1.0) - 0.95).abs() < 1e-12);
        assert!((zoom_scale(2.0) - 0.9025).abs() < 1e-12);
        assert_eq!(zoom_scale(0.0), 1.0);
    }

    #[test]
    fn pinch_ratio_follows_finger_distance() {
        assert_eq!(pinch_scale(10.0, 20.0, 1.0), Some(2.0));
        assert_eq!(pinch_scale(10.0, 20.0, 2.0), Some(4.0));
        assert_eq!(pinch_scale(0.0, 20.0, 1.0), None);
        assert_eq!(pinch_scale(10.0, 0.0, 1.0), None);
    }

    #[test]
    fn radius_never_reaches_zero() {
        let limits = ZoomLimits::default();
        assert_eq!(limits.clamp_distance(0.0), MIN_RADIUS);
        assert_eq!(limits.clamp_distance(-5.0), MIN_RADIUS);
        assert_eq!(limits.clamp_distance(5.0), 5.0);
    }

    #[test]
    fn distance_and_zoom_windows_clamp() {
        let limits = ZoomLimits {
            min_distance: 2.0,
            max_distance: 8.0,
            min_zoom: 0.5,
            max_zoom: 4.0,
        };
        assert_eq!(limits.clamp_distance(1.0), 2.0);
        assert_eq!(limits.clamp_distance(9.0), 8.0);
        assert_eq!(limits.clamp_zoom(0.1), 0.5);
        assert_eq!(limits.clamp_zoom(10.0), 4.0);
    }
}
