// ── Host integration surface ──
//
// The protocol pushes state outward through this trait and never reads
// anything back. Callbacks are infallible and expected to return
// quickly; a host that needs to do real work should hand off
// internally.

use crate::model::{DeviceId, GrillDisplay};

/// Static pairing metadata for one mirrored grill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub device_id: DeviceId,
    pub name: String,
    pub manufacturer: &'static str,
    pub model: &'static str,
    pub device_type: &'static str,
}

impl DeviceDescriptor {
    pub fn new(device_id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            device_id,
            name: name.into(),
            manufacturer: "MAK",
            model: "2 Star",
            device_type: "Grill",
        }
    }
}

/// Receiver of everything the protocol observes.
///
/// All methods have empty default bodies so hosts implement only what
/// they care about.
pub trait Host: Send + Sync + 'static {
    /// Platform-level reachability: whether the last reconciliation
    /// cycle authenticated with the cloud service. Reported every
    /// cycle, not just on transitions.
    fn notify_connection_status(&self, connected: bool) {
        let _ = connected;
    }

    /// A grill new to the account appeared; mirror it as a device.
    fn pair_device(&self, descriptor: &DeviceDescriptor) {
        let _ = descriptor;
    }

    /// A grill left the account; forget its device.
    fn unpair_device(&self, device_id: &DeviceId) {
        let _ = device_id;
    }

    /// An already-paired grill changed its static metadata (rename).
    fn update_paired_device(&self, descriptor: &DeviceDescriptor) {
        let _ = descriptor;
    }

    /// Per-device reachability, reported on transitions.
    fn device_connectivity(&self, device_id: &DeviceId, connected: bool) {
        let _ = (device_id, connected);
    }

    /// A device's display state changed; `display` is the full new state.
    fn device_update(&self, device_id: &DeviceId, display: &GrillDisplay) {
        let _ = (device_id, display);
    }
}
