// Wire models for the MAK Mobile service.
//
// Field names mirror the service's PascalCase JSON. These types are
// transport-shaped; `maklink-core` derives its display state from them
// without reshaping.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Identity ────────────────────────────────────────────────────────

/// Identifier for a grill as assigned by the MAK Mobile service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrillId(String);

impl GrillId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GrillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GrillId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for GrillId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── Grill list ──────────────────────────────────────────────────────

/// One row of the account's grill list, fresh from `GrillsRead`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrillListEntry {
    #[serde(rename = "GrillId")]
    pub grill_id: GrillId,
    #[serde(rename = "Name")]
    pub name: String,
}

/// The `GrillsRead` response page: a grid envelope with `Data` + `Total`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrillListPage {
    #[serde(rename = "Data")]
    pub data: Vec<GrillListEntry>,
    #[serde(rename = "Total", default)]
    pub total: i64,
}

// ── Power state ─────────────────────────────────────────────────────

/// The grill's reported power state.
///
/// The service sends free-form strings; the canonical set is below and
/// anything else passes through as [`PowerState::Other`] so new firmware
/// states never break decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PowerState {
    Start,
    On,
    Off,
    Cooldown,
    Grill,
    Other(String),
}

impl PowerState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Start => "START",
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Cooldown => "COOLDOWN",
            Self::Grill => "GRILL",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for PowerState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "START" => Self::Start,
            "ON" => Self::On,
            "OFF" => Self::Off,
            "COOLDOWN" => Self::Cooldown,
            "GRILL" => Self::Grill,
            _ => Self::Other(s),
        }
    }
}

impl From<PowerState> for String {
    fn from(p: PowerState) -> Self {
        p.as_str().to_owned()
    }
}

// ── Grill data envelope ─────────────────────────────────────────────

/// Live hardware readings for one grill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrillData {
    #[serde(rename = "Date", default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "GrillId", default)]
    pub grill_id: Option<GrillId>,
    #[serde(rename = "Power", default)]
    pub power: Option<PowerState>,
    #[serde(rename = "Probe1", default)]
    pub probe1: Option<String>,
    #[serde(rename = "Probe2", default)]
    pub probe2: Option<String>,
    #[serde(rename = "Probe3", default)]
    pub probe3: Option<String>,
    #[serde(rename = "SessionId", default)]
    pub session_id: Option<Uuid>,
    #[serde(rename = "Temp", default)]
    pub temp: i64,
}

impl GrillData {
    /// Number of probe slots the hardware exposes.
    pub const PROBE_COUNT: usize = 3;

    /// Raw probe value for the 1-based slot `n`, if present and non-empty.
    pub fn probe(&self, n: usize) -> Option<&str> {
        let raw = match n {
            1 => self.probe1.as_deref(),
            2 => self.probe2.as_deref(),
            3 => self.probe3.as_deref(),
            _ => None,
        }?;
        let trimmed = raw.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }
}

/// Cook-session state for one grill (setpoint lives here, not in
/// [`GrillData`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(rename = "SetPoint", default)]
    pub set_point: i64,
    #[serde(rename = "SessionId", default)]
    pub session_id: Option<Uuid>,
    #[serde(rename = "CookMode", default)]
    pub cook_mode: i64,
    #[serde(rename = "ElapsedPaused", default)]
    pub elapsed_paused: bool,
    #[serde(rename = "StartTime", default)]
    pub start_time: i64,
}

/// A running cook timer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timer {
    #[serde(rename = "Duration", default)]
    pub duration: i64,
    #[serde(rename = "Paused", default)]
    pub paused: bool,
    #[serde(rename = "StartTime", default)]
    pub start_time: i64,
}

/// The `GetAjaxGrillData` envelope: one full reading for one grill.
///
/// `Connected = false` readings usually arrive with `GrillData` and
/// `SessionData` missing — every field besides `Connected` is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrillInfo {
    #[serde(rename = "Connected", default)]
    pub connected: bool,
    #[serde(rename = "GrillData", default)]
    pub grill_data: Option<GrillData>,
    #[serde(rename = "SessionData", default)]
    pub session_data: Option<SessionData>,
    #[serde(rename = "Timers", default)]
    pub timers: Vec<Timer>,
}
