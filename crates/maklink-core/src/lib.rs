//! Reconciliation engine for MAK cloud-connected grills.
//!
//! Maintains a live local mirror of the grills on a MAK Mobile account
//! and a command path for setpoint changes. The [`PlatformProtocol`]
//! runs the periodic cycle — authenticate, fetch the grill list, diff,
//! reconcile the device registry, apply queued setpoints, refresh each
//! device's reading — and pushes everything it observes to a [`Host`].

pub mod device;
pub mod diff;
pub mod error;
pub mod host;
pub mod model;
pub mod protocol;
pub mod queue;
pub mod registry;

pub use device::GrillHandle;
pub use diff::{ChangedEntry, ListDiff};
pub use error::CoreError;
pub use host::{DeviceDescriptor, Host};
pub use model::{DeviceId, GrillDisplay, GrillState};
pub use protocol::{DEFAULT_POLL_INTERVAL, PlatformProtocol};
pub use queue::{SetpointCommand, SetpointQueue};
pub use registry::DeviceRegistry;
