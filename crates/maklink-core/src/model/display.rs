// ── Grill display state machine ──
//
// Interprets one raw reading into the observable state for a device:
// a small set of operating states plus derived display values
// (temperature progress, probe text, setpoint label). Every field is
// fully recomputed from its own reading — never merged with a previous
// reading — so overlapping refreshes are idempotent and last-write-wins.

use serde::{Deserialize, Serialize};

use maklink_api::{GrillData, GrillInfo, PowerState};

/// Setpoints at or below this render as the symbolic smoke label.
pub const SMOKE_CEILING_F: i64 = 175;
/// Setpoints at or above this render as the symbolic high label.
pub const HIGH_FLOOR_F: i64 = 450;

pub const SMOKE_LABEL: &str = "SMOKE";
pub const HIGH_LABEL: &str = "HIGH";
pub const NOT_AVAILABLE: &str = "N/A";

const ICON_FIRE_ON: &str = "icFireOn";
const ICON_FIRE_OFF: &str = "icFireOff";

/// The operating state derived from a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrillState {
    Disconnected,
    Off,
    Cooldown,
    Igniting,
    Cooking,
}

/// The full set of display fields pushed to the host for one grill.
///
/// Mirrors the UI property set: tile summary, state text and icon,
/// current temperature, setpoint label, a 0–100 progress value for the
/// radial, the setpoint control (enabled + value), and three probe
/// readouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrillDisplay {
    pub state: GrillState,
    pub tile_status: String,
    pub state_text: String,
    pub state_icon: String,
    pub current_temp: String,
    pub set_point_text: String,
    /// Percentage of the way to the setpoint, clamped to 0..=100.
    pub progress: u8,
    pub set_point_control_enabled: bool,
    pub set_point_value: i64,
    pub probes: [String; GrillData::PROBE_COUNT],
}

impl GrillDisplay {
    /// The initial / not-reachable placeholder display.
    pub fn disconnected() -> Self {
        Self {
            state: GrillState::Disconnected,
            tile_status: "Connecting to Grill".into(),
            state_text: "CONNECTING".into(),
            state_icon: ICON_FIRE_OFF.into(),
            current_temp: NOT_AVAILABLE.into(),
            set_point_text: NOT_AVAILABLE.into(),
            progress: 0,
            set_point_control_enabled: false,
            set_point_value: SMOKE_CEILING_F,
            probes: std::array::from_fn(|i| probe_text(i + 1, None)),
        }
    }

    /// Re-derive every display field from one reading.
    ///
    /// Unknown power states leave the state-specific fields untouched;
    /// probe text is refreshed regardless.
    pub fn apply_reading(&mut self, info: &GrillInfo) {
        if info.connected {
            let set_point = info.session_data.as_ref().map_or(0, |s| s.set_point);
            let power = info
                .grill_data
                .as_ref()
                .and_then(|d| d.power.clone());
            let temp = info.grill_data.as_ref().map_or(0, |d| d.temp);

            match power {
                Some(PowerState::Cooldown) => self.set_cooldown(temp, set_point),
                Some(PowerState::Off) => self.set_off(),
                Some(PowerState::Start) => self.set_active(GrillState::Igniting, temp, set_point),
                Some(PowerState::On) => self.set_active(GrillState::Cooking, temp, set_point),
                // Unknown or missing power: retain whatever was last set.
                Some(PowerState::Grill | PowerState::Other(_)) | None => {}
            }
        } else {
            *self = Self::disconnected();
        }

        for (i, slot) in self.probes.iter_mut().enumerate() {
            let raw = info.grill_data.as_ref().and_then(|d| d.probe(i + 1));
            *slot = probe_text(i + 1, raw);
        }
    }

    fn set_off(&mut self) {
        self.state = GrillState::Off;
        self.tile_status = "Off".into();
        self.state_text = "OFF".into();
        self.state_icon = ICON_FIRE_OFF.into();
        self.current_temp = NOT_AVAILABLE.into();
        self.set_point_text = NOT_AVAILABLE.into();
        self.set_point_control_enabled = false;
        self.progress = 0;
    }

    fn set_cooldown(&mut self, temp: i64, set_point: i64) {
        self.state = GrillState::Cooldown;
        self.tile_status = "Cooling down".into();
        self.state_text = "COOLING DOWN".into();
        self.state_icon = ICON_FIRE_OFF.into();
        self.set_point_text = NOT_AVAILABLE.into();
        self.set_point_control_enabled = false;
        self.progress = progress_value(temp, set_point);
    }

    fn set_active(&mut self, state: GrillState, temp: i64, set_point: i64) {
        debug_assert!(matches!(state, GrillState::Igniting | GrillState::Cooking));
        let (state_text, tile_prefix) = match state {
            GrillState::Cooking => ("COOKING", "On"),
            _ => ("IGNITING", "Igniting"),
        };
        self.state = state;
        self.tile_status = format!("{tile_prefix}:\tTemp={temp}°F");
        self.state_text = state_text.into();
        self.state_icon = ICON_FIRE_ON.into();
        self.current_temp = format!("{temp}°F");
        self.set_point_text = set_point_label(set_point);
        self.set_point_control_enabled = true;
        self.set_point_value = set_point;
        self.progress = progress_value(temp, set_point);
    }
}

/// Percentage the current temperature is of the setpoint, 0..=100.
///
/// Past the setpoint (or with no setpoint to divide by) the grill is
/// "there": 100.
#[allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn progress_value(temp: i64, set_point: i64) -> u8 {
    if temp > set_point || set_point == 0 {
        return 100;
    }
    let pct = (temp as f64 / set_point as f64) * 100.0;
    pct.round().clamp(0.0, 100.0) as u8
}

/// Setpoint display label: symbolic below the smoke ceiling and above
/// the high floor, numeric in between.
pub fn set_point_label(temperature: i64) -> String {
    if temperature <= SMOKE_CEILING_F {
        SMOKE_LABEL.into()
    } else if temperature >= HIGH_FLOOR_F {
        HIGH_LABEL.into()
    } else {
        format!("{temperature}°F")
    }
}

/// Probe readout for the 1-based slot `n`.
pub fn probe_text(n: usize, raw: Option<&str>) -> String {
    match raw {
        Some(value) => format!("Probe {n}: {value}°F"),
        None => format!("Probe {n}: {NOT_AVAILABLE}"),
    }
}
