//! A `Host` that narrates everything the bridge observes via tracing.
//!
//! Stand-in for a real automation-system integration; `maklink run`
//! uses it so the bridge's behavior is visible from the terminal.

use tracing::info;

use maklink_core::{DeviceDescriptor, DeviceId, GrillDisplay, Host};

#[derive(Debug, Default)]
pub struct TracingHost;

impl Host for TracingHost {
    fn notify_connection_status(&self, connected: bool) {
        info!(connected, "cloud service status");
    }

    fn pair_device(&self, descriptor: &DeviceDescriptor) {
        info!(
            device_id = %descriptor.device_id,
            name = %descriptor.name,
            model = descriptor.model,
            "paired grill"
        );
    }

    fn unpair_device(&self, device_id: &DeviceId) {
        info!(device_id = %device_id, "unpaired grill");
    }

    fn update_paired_device(&self, descriptor: &DeviceDescriptor) {
        info!(
            device_id = %descriptor.device_id,
            name = %descriptor.name,
            "grill metadata updated"
        );
    }

    fn device_connectivity(&self, device_id: &DeviceId, connected: bool) {
        info!(device_id = %device_id, connected, "grill connectivity");
    }

    fn device_update(&self, device_id: &DeviceId, grill_display: &GrillDisplay) {
        info!(
            device_id = %device_id,
            state = ?grill_display.state,
            temp = %grill_display.current_temp,
            set_point = %grill_display.set_point_text,
            progress = grill_display.progress,
            "grill state"
        );
    }
}
