// ── Per-grill device handle ──
//
// One handle per mirrored grill, shared between the reconciliation
// loop and spawned refresh tasks. Display state is recomputed from
// each reading and pushed to the host only when it actually changed.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use maklink_api::{GrillId, GrillInfo};

use crate::host::Host;
use crate::model::{DeviceId, GrillDisplay};

/// The live local mirror of one grill.
#[derive(Debug)]
pub struct GrillHandle {
    device_id: DeviceId,
    grill_id: GrillId,
    name: Mutex<String>,
    connected: AtomicBool,
    display: Mutex<GrillDisplay>,
}

impl GrillHandle {
    pub fn new(grill_id: GrillId, name: impl Into<String>) -> Self {
        Self {
            device_id: DeviceId::from_grill(&grill_id),
            grill_id,
            name: Mutex::new(name.into()),
            connected: AtomicBool::new(false),
            display: Mutex::new(GrillDisplay::disconnected()),
        }
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn grill_id(&self) -> &GrillId {
        &self.grill_id
    }

    pub fn name(&self) -> String {
        self.name.lock().expect("device name lock poisoned").clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.lock().expect("device name lock poisoned") = name.into();
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Seed the connectivity flag at pair time from the platform's own
    /// reachability. The first refresh replaces the assumption with the
    /// grill's actual state.
    pub fn assume_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
    }

    /// Snapshot of the current display state.
    pub fn display(&self) -> GrillDisplay {
        self.display
            .lock()
            .expect("device display lock poisoned")
            .clone()
    }

    /// Fold one reading into the mirror and notify the host of any
    /// connectivity transition and display change.
    pub fn apply_reading(&self, info: &GrillInfo, host: &dyn Host) {
        let was_connected = self.connected.swap(info.connected, Ordering::AcqRel);
        if was_connected != info.connected {
            debug!(
                device_id = %self.device_id,
                connected = info.connected,
                "grill connectivity changed"
            );
            host.device_connectivity(&self.device_id, info.connected);
        }

        let changed = {
            let mut display = self.display.lock().expect("device display lock poisoned");
            let before = display.clone();
            display.apply_reading(info);
            if *display == before {
                None
            } else {
                Some(display.clone())
            }
        };
        if let Some(display) = changed {
            host.device_update(&self.device_id, &display);
        }
    }

    /// Force the mirror into the disconnected placeholder, notifying
    /// the host if anything changed. Used when the platform itself
    /// loses the cloud service.
    pub fn mark_disconnected(&self, host: &dyn Host) {
        self.apply_reading(&GrillInfo::default(), host);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use maklink_api::{GrillData, PowerState, SessionData};

    #[derive(Debug, Default)]
    struct Recorder {
        connectivity: Mutex<Vec<bool>>,
        updates: Mutex<Vec<GrillDisplay>>,
    }

    impl Host for Recorder {
        fn device_connectivity(&self, _device_id: &DeviceId, connected: bool) {
            self.connectivity.lock().unwrap().push(connected);
        }

        fn device_update(&self, _device_id: &DeviceId, display: &GrillDisplay) {
            self.updates.lock().unwrap().push(display.clone());
        }
    }

    fn cooking(temp: i64, set_point: i64) -> GrillInfo {
        GrillInfo {
            connected: true,
            grill_data: Some(GrillData {
                power: Some(PowerState::On),
                temp,
                ..GrillData::default()
            }),
            session_data: Some(SessionData {
                set_point,
                ..SessionData::default()
            }),
            timers: Vec::new(),
        }
    }

    #[test]
    fn connectivity_is_reported_only_on_transition() {
        let handle = GrillHandle::new(GrillId::from("g1"), "Kitchen");
        let host = Recorder::default();

        handle.apply_reading(&cooking(200, 250), &host);
        handle.apply_reading(&cooking(210, 250), &host);
        handle.apply_reading(&GrillInfo::default(), &host);

        assert_eq!(*host.connectivity.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn identical_reading_produces_no_update() {
        let handle = GrillHandle::new(GrillId::from("g1"), "Kitchen");
        let host = Recorder::default();

        handle.apply_reading(&cooking(200, 250), &host);
        handle.apply_reading(&cooking(200, 250), &host);

        assert_eq!(host.updates.lock().unwrap().len(), 1);
    }

    #[test]
    fn changed_reading_pushes_the_full_new_display() {
        let handle = GrillHandle::new(GrillId::from("g1"), "Kitchen");
        let host = Recorder::default();

        handle.apply_reading(&cooking(200, 250), &host);
        handle.apply_reading(&cooking(225, 250), &host);

        let updates = host.updates.lock().unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].current_temp, "225°F");
        assert_eq!(updates[1], handle.display());
    }

    #[test]
    fn mark_disconnected_resets_to_placeholder() {
        let handle = GrillHandle::new(GrillId::from("g1"), "Kitchen");
        let host = Recorder::default();

        handle.apply_reading(&cooking(200, 250), &host);
        handle.mark_disconnected(&host);

        assert!(!handle.is_connected());
        assert_eq!(handle.display(), GrillDisplay::disconnected());

        // Marking again is a no-op.
        let updates_before = host.updates.lock().unwrap().len();
        handle.mark_disconnected(&host);
        assert_eq!(host.updates.lock().unwrap().len(), updates_before);
    }
}
