//! An orbit camera controller for Bevy.
//!
//! The camera circles a target point. Drag to orbit, scroll or pinch to dolly, drag with the other
//! buttons or two fingers to pan, and use the arrow keys to pan in steps.
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_orbit_cam::prelude::*;
//!
//! App::new()
//!     .add_plugins((DefaultPlugins, DefaultOrbitCamPlugins))
//!     .add_systems(Startup, |mut commands: Commands| {
//!         commands.spawn((
//!             Camera3d::default(),
//!             Transform::from_xyz(0.0, 2.0, 10.0),
//!             OrbitCam::new(Vec3::ZERO),
//!         ));
//!     })
//!     .run();
//! ```
//!
//! [`OrbitCam`](controller::component::OrbitCam) can also be driven by hand, without any plugin:
//! feed it [`SurfaceEvent`](controller::inputs::SurfaceEvent)s and call `update` once per frame.

#![warn(missing_docs)]

pub mod controller;
pub mod extensions;
pub mod input;

/// Common imports.
pub mod prelude {
    pub use crate::{
        controller::{
            component::{
                AutoRotate, ControlEvent, EnabledMotion, OrbitCam, OrbitCamEvent, OrbitLimits,
                Sensitivity,
            },
            inputs::{InputBindings, InputResponse, SurfaceEvent},
            motion::Gesture,
            smoothing::Damping,
            zoom::ZoomLimits,
        },
        extensions::focus::{FocusDistance, FocusOn},
        DefaultOrbitCamPlugins,
    };
}

use bevy_app::{PluginGroup, PluginGroupBuilder};

/// Adds [`OrbitCam`](controller::component::OrbitCam) input handling, updates, and the enabled
/// extensions.
pub struct DefaultOrbitCamPlugins;

impl PluginGroup for DefaultOrbitCamPlugins {
    fn build(self) -> PluginGroupBuilder {
        let group = PluginGroupBuilder::start::<Self>()
            .add(input::OrbitCamInputPlugin)
            .add(controller::OrbitCamControllerPlugin)
            .add(extensions::focus::FocusPlugin);

        #[cfg(feature = "extension_target_indicator")]
        let group = group.add(extensions::target_indicator::TargetIndicatorPlugin);

        group
    }
}
