// ── Device registry ──
//
// The set of grills currently mirrored as devices, keyed by local
// DeviceId. One mutex guards the whole map; reconciliation applies a
// list diff under a single acquisition so the host never observes a
// half-applied snapshot.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use maklink_api::GrillId;

use crate::device::GrillHandle;
use crate::diff::ListDiff;
use crate::host::{DeviceDescriptor, Host};
use crate::model::DeviceId;

#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Mutex<HashMap<DeviceId, Arc<GrillHandle>>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one list diff: pair additions, unpair removals, push
    /// renames. The host is told about each change as it lands.
    ///
    /// Newly paired handles start with `platform_connected` as their
    /// connectivity assumption until their first refresh reports the
    /// grill's actual state.
    pub fn apply_diff(&self, diff: &ListDiff, platform_connected: bool, host: &dyn Host) {
        let mut devices = self.devices.lock().expect("device registry lock poisoned");

        for entry in &diff.added {
            let device_id = DeviceId::from_grill(&entry.grill_id);
            if devices.contains_key(&device_id) {
                warn!(device_id = %device_id, "duplicate grill id in list, keeping existing device");
                continue;
            }
            let handle = Arc::new(GrillHandle::new(entry.grill_id.clone(), &entry.name));
            let descriptor = DeviceDescriptor::new(device_id.clone(), &entry.name);
            info!(device_id = %device_id, name = %entry.name, "pairing grill");
            handle.assume_connected(platform_connected);
            devices.insert(device_id.clone(), Arc::clone(&handle));
            host.pair_device(&descriptor);
            host.device_connectivity(&device_id, platform_connected);
        }

        for entry in &diff.removed {
            let device_id = DeviceId::from_grill(&entry.grill_id);
            if devices.remove(&device_id).is_some() {
                info!(device_id = %device_id, "unpairing grill");
                host.unpair_device(&device_id);
            }
        }

        for change in &diff.changed {
            let device_id = DeviceId::from_grill(&change.after.grill_id);
            if let Some(handle) = devices.get(&device_id) {
                info!(
                    device_id = %device_id,
                    from = %change.before.name,
                    to = %change.after.name,
                    "grill renamed"
                );
                handle.set_name(&change.after.name);
                host.update_paired_device(&DeviceDescriptor::new(
                    device_id.clone(),
                    &change.after.name,
                ));
            }
        }
    }

    /// Snapshot of every registered handle.
    pub fn handles(&self) -> Vec<Arc<GrillHandle>> {
        self.devices
            .lock()
            .expect("device registry lock poisoned")
            .values()
            .map(Arc::clone)
            .collect()
    }

    pub fn get(&self, device_id: &DeviceId) -> Option<Arc<GrillHandle>> {
        self.devices
            .lock()
            .expect("device registry lock poisoned")
            .get(device_id)
            .map(Arc::clone)
    }

    pub fn get_by_grill(&self, grill_id: &GrillId) -> Option<Arc<GrillHandle>> {
        self.get(&DeviceId::from_grill(grill_id))
    }

    pub fn len(&self) -> usize {
        self.devices
            .lock()
            .expect("device registry lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push every mirrored device into the disconnected placeholder.
    pub fn mark_all_disconnected(&self, host: &dyn Host) {
        for handle in self.handles() {
            handle.mark_disconnected(host);
        }
    }
}
