// ── Local device identity ──
//
// The host pairs devices by a local identifier that must stay stable
// across polls and deduplicate remote grills. It is derived
// deterministically from the remote GrillId and never parsed back.

use std::fmt;

use serde::{Deserialize, Serialize};

use maklink_api::GrillId;

/// Local, derived, stable identifier used for pairing with the host.
///
/// One `DeviceId` per remote [`GrillId`], identical on every poll.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Derive the local identifier for a remote grill.
    pub fn from_grill(grill_id: &GrillId) -> Self {
        Self(format!("mak-{grill_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
