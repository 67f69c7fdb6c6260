//! The orbit camera controller and the math it is built from.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_window::RequestRedraw;

pub mod component;
pub mod inputs;
pub mod motion;
pub mod projections;
pub mod smoothing;
pub mod spherical;
pub mod zoom;

use component::{OrbitCam, OrbitCamEvent};

/// Runs [`OrbitCam::update`] for every camera once per frame and publishes [`OrbitCamEvent`]s.
pub struct OrbitCamControllerPlugin;

impl Plugin for OrbitCamControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<OrbitCamEvent>()
            .add_event::<RequestRedraw>()
            .add_systems(PreUpdate, OrbitCam::update_cameras)
            .register_type::<OrbitCam>();
    }
}
