//! Provides [`Damping`], the inertia applied to pending camera motion.

use bevy_reflect::Reflect;

/// Inertia settings. With damping on, each update applies only `factor` of the pending rotation
/// and pan, and carries the rest forward, so motion eases out after input stops.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Damping {
    /// Should pending motion be spread over several updates?
    pub enabled: bool,
    /// Fraction of the pending motion applied per update, in `(0, 1]`.
    pub factor: f32,
}

impl Default for Damping {
    fn default() -> Self {
        Self {
            enabled: false,
            factor: 0.05,
        }
    }
}

impl Damping {
    /// The fraction of a pending delta one update applies.
    pub fn applied_fraction(&self) -> f64 {
        if self.enabled {
            self.factor as f64
        } else {
            1.0
        }
    }

    /// The fraction of a pending delta left over after one update.
    pub fn retained_fraction(&self) -> f64 {
        if self.enabled {
            1.0 - self.factor as f64
        } else {
            0.0
        }
    }
}
