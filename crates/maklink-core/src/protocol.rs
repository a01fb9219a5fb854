// ── Platform protocol ──
//
// The reconciliation loop. One cycle: authenticate, fetch the grill
// list, diff against the last successful snapshot, reconcile the
// registry, apply queued setpoints, then dispatch a fire-and-forget
// reading refresh per device. Cycle failures are logged and reported as
// platform disconnection; the loop itself only ends via `stop()`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use maklink_api::{GrillClient, GrillListEntry};

use crate::device::GrillHandle;
use crate::diff::diff;
use crate::error::CoreError;
use crate::host::Host;
use crate::model::DeviceId;
use crate::queue::SetpointQueue;
use crate::registry::DeviceRegistry;

/// Default cadence of the reconciliation loop.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// The long-lived bridge between the cloud service and the host.
///
/// Cheap to clone; all clones share one loop, one registry, and one
/// setpoint queue.
#[derive(Clone)]
pub struct PlatformProtocol {
    inner: Arc<Inner>,
}

struct Inner {
    client: GrillClient,
    host: Arc<dyn Host>,
    registry: DeviceRegistry,
    queue: SetpointQueue,
    /// Grill list as of the last cycle that reconciled without error.
    baseline: Mutex<Option<Vec<GrillListEntry>>>,
    platform_connected: AtomicBool,
    poll_interval: Duration,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PlatformProtocol {
    pub fn new(client: GrillClient, host: Arc<dyn Host>, poll_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                host,
                registry: DeviceRegistry::new(),
                queue: SetpointQueue::new(),
                baseline: Mutex::new(None),
                platform_connected: AtomicBool::new(false),
                poll_interval,
                cancel: CancellationToken::new(),
                task: Mutex::new(None),
            }),
        }
    }

    /// Whether the last cycle held a session with the cloud service.
    pub fn is_connected(&self) -> bool {
        self.inner.platform_connected.load(Ordering::Acquire)
    }

    /// Snapshot of every mirrored device.
    pub fn devices(&self) -> Vec<Arc<GrillHandle>> {
        self.inner.registry.handles()
    }

    pub fn device(&self, device_id: &DeviceId) -> Option<Arc<GrillHandle>> {
        self.inner.registry.get(device_id)
    }

    /// Queue a setpoint for a mirrored device.
    ///
    /// Delivered on the next cycle, newest request per device winning.
    /// Requests for devices that are not (or no longer) mirrored are
    /// dropped.
    pub fn queue_set_point(&self, device_id: &DeviceId, set_point: i64) -> Result<(), CoreError> {
        if self.inner.cancel.is_cancelled() {
            return Err(CoreError::Stopped);
        }
        match self.inner.registry.get(device_id) {
            Some(handle) => {
                self.inner.queue.enqueue(handle.grill_id().clone(), set_point);
                Ok(())
            }
            None => {
                debug!(device_id = %device_id, "dropping setpoint for unknown device");
                Ok(())
            }
        }
    }

    /// Run one reconciliation cycle and report connection status.
    ///
    /// The loop calls this on its interval; it is public so one-shot
    /// callers can drive the protocol manually.
    pub async fn poll_once(&self) -> Result<(), CoreError> {
        run_cycle(&self.inner).await
    }

    /// Spawn the reconciliation loop. A second call is a no-op.
    pub fn start(&self) {
        let mut task = self.inner.task.lock().expect("protocol task lock poisoned");
        if task.is_some() || self.inner.cancel.is_cancelled() {
            return;
        }
        info!(interval = ?self.inner.poll_interval, "starting reconciliation loop");

        let inner = Arc::clone(&self.inner);
        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(inner.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = inner.cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        // Failures are logged inside; the loop keeps going.
                        let _ = run_cycle(&inner).await;
                    }
                }
            }
        }));
    }

    /// Stop the loop, forget the session, and push every device into
    /// the disconnected placeholder. In-flight refresh tasks are
    /// abandoned, not awaited.
    pub async fn stop(&self) {
        info!("stopping reconciliation loop");
        self.inner.cancel.cancel();
        let task = self
            .inner
            .task
            .lock()
            .expect("protocol task lock poisoned")
            .take();
        if let Some(task) = task {
            let _ = task.await;
        }

        self.inner.client.invalidate_session();
        if self.inner.platform_connected.swap(false, Ordering::AcqRel) {
            self.inner.host.notify_connection_status(false);
        }
        self.inner.registry.mark_all_disconnected(&*self.inner.host);
    }
}

/// One full cycle plus connection-status accounting.
///
/// Platform connectivity tracks authentication, not the whole cycle: a
/// transient list-fetch failure after a successful auth leaves the
/// platform connected and every device display intact. Only an auth
/// failure (or `stop()`) pushes the disconnected state outward.
async fn run_cycle(inner: &Arc<Inner>) -> Result<(), CoreError> {
    if !inner.client.ensure_authenticated().await {
        let was_connected = inner.platform_connected.swap(false, Ordering::AcqRel);
        // Status is reported every cycle, not just on transitions.
        inner.host.notify_connection_status(false);
        if was_connected {
            inner.registry.mark_all_disconnected(&*inner.host);
        }
        warn!("reconciliation cycle failed: no session with the cloud service");
        return Err(CoreError::NotAuthenticated);
    }
    inner.platform_connected.store(true, Ordering::Release);
    inner.host.notify_connection_status(true);

    let result = reconcile(inner).await;
    if let Err(e) = &result {
        warn!(error = %e, "reconciliation cycle failed");
    }
    result
}

/// Fetch, diff, reconcile, apply setpoints, refresh.
///
/// The baseline snapshot is replaced only after the registry has been
/// reconciled, so a failed cycle retries against the same accounting.
async fn reconcile(inner: &Arc<Inner>) -> Result<(), CoreError> {
    let current = inner.client.list_grills().await?;

    let changes = {
        let baseline = inner.baseline.lock().expect("baseline lock poisoned");
        diff(baseline.as_deref(), &current)
    };
    if !changes.is_empty() {
        debug!(
            added = changes.added.len(),
            removed = changes.removed.len(),
            changed = changes.changed.len(),
            "grill list changed"
        );
    }
    let platform_connected = inner.platform_connected.load(Ordering::Acquire);
    inner.registry.apply_diff(&changes, platform_connected, &*inner.host);
    *inner.baseline.lock().expect("baseline lock poisoned") = Some(current);

    apply_set_points(inner).await;

    for handle in inner.registry.handles() {
        let inner = Arc::clone(inner);
        tokio::spawn(async move {
            refresh_device(&inner, &handle).await;
        });
    }

    Ok(())
}

/// Drain the queue and push each consolidated setpoint to the service.
///
/// Failures are per-request: logged, never fatal to the cycle.
async fn apply_set_points(inner: &Arc<Inner>) {
    for command in inner.queue.drain_consolidated() {
        if inner.registry.get_by_grill(&command.grill_id).is_none() {
            debug!(grill_id = %command.grill_id, "dropping setpoint for unmirrored grill");
            continue;
        }
        match inner
            .client
            .set_grill_temp(&command.grill_id, command.set_point)
            .await
        {
            Ok(status) if status.is_success() => {
                info!(
                    grill_id = %command.grill_id,
                    set_point = command.set_point,
                    "setpoint applied"
                );
            }
            Ok(status) => {
                warn!(
                    grill_id = %command.grill_id,
                    set_point = command.set_point,
                    %status,
                    "setpoint not accepted"
                );
            }
            Err(e) => {
                warn!(
                    grill_id = %command.grill_id,
                    set_point = command.set_point,
                    error = %e,
                    "setpoint push failed"
                );
            }
        }
    }
}

/// Fetch one grill's reading and fold it into its mirror.
async fn refresh_device(inner: &Arc<Inner>, handle: &Arc<GrillHandle>) {
    match inner.client.grill_data(handle.grill_id()).await {
        Ok(info) => handle.apply_reading(&info, &*inner.host),
        // Keep the last known display either way; the next cycle retries.
        Err(e) if e.is_transient() => {
            debug!(
                device_id = %handle.device_id(),
                error = %e,
                "reading refresh failed, retrying next cycle"
            );
        }
        Err(e) => {
            warn!(device_id = %handle.device_id(), error = %e, "reading refresh failed");
        }
    }
}
