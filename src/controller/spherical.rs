//! Spherical coordinates of the camera around its target, and the angle windows that constrain
//! them.
//!
//! Angles follow the "Y is up" convention: `phi` is measured from the +Y axis and `theta` is
//! measured around +Y, starting at +Z.

use std::f64::consts::{PI, TAU};

use bevy_math::DVec3;
use bevy_reflect::Reflect;

/// How far the polar angle is kept from either pole. At exactly `0` or `PI` the azimuth is
/// undefined and the camera orientation degenerates.
pub const POLE_EPSILON: f64 = 1e-6;

/// A camera offset from its target, as `(radius, phi, theta)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct Spherical {
    /// Distance from the target.
    pub radius: f64,
    /// Polar angle from the up axis, in radians.
    pub phi: f64,
    /// Azimuth around the up axis, in radians.
    pub theta: f64,
}

impl Spherical {
    /// Create a new spherical coordinate.
    pub fn new(radius: f64, phi: f64, theta: f64) -> Self {
        Self { radius, phi, theta }
    }

    /// Convert a cartesian offset in "Y is up" space.
    pub fn from_offset(offset: DVec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    /// The cartesian offset in "Y is up" space.
    pub fn to_offset(self) -> DVec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        DVec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keep the polar angle strictly inside `(0, PI)`.
    pub fn make_safe(&mut self) {
        self.phi = self.phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);
    }
}

/// Wrap an angle into `[-PI, PI]`. Angles already in that range are returned untouched, so both
/// `-PI` and `PI` survive as written.
pub fn wrap_angle(angle: f64) -> f64 {
    if (-PI..=PI).contains(&angle) {
        angle
    } else {
        (angle + PI).rem_euclid(TAU) - PI
    }
}

/// Constrain `theta` to the azimuth window `[min, max]`.
///
/// The window is skipped entirely unless both bounds are finite. Both bounds are wrapped into
/// `[-PI, PI]` first; if the wrapped lower bound ends up greater than the upper one, the window
/// passes through the `-PI`/`PI` seam and `theta` snaps to whichever bound is nearer.
pub fn clamp_azimuth(theta: f64, min: f64, max: f64) -> f64 {
    if !min.is_finite() || !max.is_finite() {
        return theta;
    }
    let (min, max) = (wrap_angle(min), wrap_angle(max));
    if min <= max {
        theta.clamp(min, max)
    } else if theta > (min + max) / 2.0 {
        theta.max(min)
    } else {
        theta.min(max)
    }
}

/// Constrain `phi` to `[min, max]`. An inverted window resolves to `min`.
pub fn clamp_polar(phi: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(phi))
}
