//! Optional extensions to the base camera controller.

pub mod focus;
#[cfg(feature = "extension_target_indicator")]
pub mod target_indicator;
