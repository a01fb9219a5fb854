// ── Setpoint command queue ──
//
// Callers enqueue from any task; the reconciliation loop drains once
// per cycle. Draining consolidates: several setpoints queued for one
// grill between cycles collapse to the newest, so a slow poll never
// replays stale temperatures at the service.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::debug;

use maklink_api::GrillId;

/// One pending "set this grill to this temperature" request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetpointCommand {
    pub grill_id: GrillId,
    pub set_point: i64,
}

/// Unbounded queue of setpoint commands with drain-time consolidation.
#[derive(Debug)]
pub struct SetpointQueue {
    tx: mpsc::UnboundedSender<SetpointCommand>,
    rx: Mutex<mpsc::UnboundedReceiver<SetpointCommand>>,
}

impl SetpointQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Queue a setpoint for delivery on the next reconciliation cycle.
    ///
    /// Never blocks and never fails: the queue lives as long as the
    /// protocol that owns it.
    pub fn enqueue(&self, grill_id: GrillId, set_point: i64) {
        debug!(grill_id = %grill_id, set_point, "queueing setpoint");
        let command = SetpointCommand {
            grill_id,
            set_point,
        };
        // The receiver is owned by self, so the channel cannot be closed.
        let _ = self.tx.send(command);
    }

    /// Drain everything queued so far, newest setpoint per grill winning.
    ///
    /// Grills keep the relative order in which they first appeared in
    /// the queue. Returns an empty vec when nothing is pending.
    pub fn drain_consolidated(&self) -> Vec<SetpointCommand> {
        let mut rx = self.rx.lock().expect("setpoint queue lock poisoned");

        let mut order: Vec<GrillId> = Vec::new();
        let mut latest: HashMap<GrillId, i64> = HashMap::new();
        while let Ok(command) = rx.try_recv() {
            if !latest.contains_key(&command.grill_id) {
                order.push(command.grill_id.clone());
            }
            latest.insert(command.grill_id, command.set_point);
        }

        order
            .into_iter()
            .filter_map(|grill_id| {
                latest.remove(&grill_id).map(|set_point| SetpointCommand {
                    grill_id,
                    set_point,
                })
            })
            .collect()
    }
}

impl Default for SetpointQueue {
    fn default() -> Self {
        Self::new()
    }
}
