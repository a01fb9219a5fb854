//! Domain model: local device identity and the derived display state.

pub mod device_id;
pub mod display;

pub use device_id::DeviceId;
pub use display::{GrillDisplay, GrillState};
