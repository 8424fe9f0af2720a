//! AC setpoint planning.
//!
//! Corrections are applied to the profile's target temperature, never to the
//! measured air temperature, and are bounded by a cap that grows with the
//! comfort state. The result is rounded to a whole degree and clamped to what
//! the central unit accepts.

use serde::Serialize;

use super::domain::ComfortState;
use super::reference::ReferenceProfile;

pub const SETPOINT_MIN: i32 = 16;
pub const SETPOINT_MAX: i32 = 30;

/// |PMV| at or below this is the neutral zone: no correction.
pub const NEUTRAL_PMV: f64 = 0.5;

/// Approximate PMV change per °C of air temperature.
const PMV_PER_DEGREE: f64 = 0.4;

/// Mild discomfort up to this |PMV| keeps the fan on auto.
const MILD_AUTO_FAN_LIMIT: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcMode {
    Cool,
    Auto,
    Dry,
    Fan,
    Off,
}

impl AcMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cool => "cool",
            Self::Auto => "auto",
            Self::Dry => "dry",
            Self::Fan => "fan",
            Self::Off => "off",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FanSpeed {
    Auto,
    Low,
    Medium,
    High,
}

impl FanSpeed {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Magnitude bucket of |PMV|.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalSeverity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl ThermalSeverity {
    pub fn from_pmv(pmv: f64) -> Self {
        const BANDS: [(f64, ThermalSeverity); 3] = [
            (NEUTRAL_PMV, ThermalSeverity::None),
            (1.0, ThermalSeverity::Mild),
            (1.5, ThermalSeverity::Moderate),
        ];

        let magnitude = pmv.abs();
        BANDS
            .iter()
            .find(|(upper, _)| magnitude <= *upper)
            .map(|(_, severity)| *severity)
            .unwrap_or(Self::Severe)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

/// How the narration layer is allowed to frame the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionFraming {
    /// Room is empty; the unit is switched off.
    Standby,
    /// Conditions are right; hold the target.
    Maintain,
    /// Small, gentle nudge before discomfort builds.
    Preventive,
    /// Active correction of noticeable discomfort.
    Corrective,
    /// Maximum allowed correction, needed now.
    Urgent,
}

impl ActionFraming {
    pub const fn for_state(state: ComfortState) -> Self {
        match state {
            ComfortState::BorosEnergi => Self::Standby,
            ComfortState::Ideal => Self::Maintain,
            ComfortState::Optimalisasi => Self::Preventive,
            ComfortState::Peringatan => Self::Corrective,
            ComfortState::Kritis => Self::Urgent,
        }
    }

    pub const fn is_gradual(self) -> bool {
        matches!(self, Self::Maintain | Self::Preventive)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionDirection {
    Hold,
    Cool,
    Warm,
}

/// Structured explanation of a plan, consumed by narration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlReason {
    pub status: ComfortState,
    pub unoccupied: bool,
    pub pmv: f64,
    pub severity: ThermalSeverity,
    pub framing: ActionFraming,
    pub gradual: bool,
    pub direction: CorrectionDirection,
    pub target_temperature: f64,
    pub setpoint: i32,
    /// Signed correction applied to the target, before rounding.
    pub correction: f64,
    /// Signed difference between the applied setpoint and the target.
    pub setpoint_delta: f64,
    pub correction_cap: f64,
    pub cap_hit: bool,
    pub actuator_limited: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcControlPlan {
    pub setpoint: i32,
    pub mode: AcMode,
    pub fan_speed: FanSpeed,
    pub severity: ThermalSeverity,
    pub reason: ControlReason,
}

/// Largest allowed distance between setpoint and target, in °C.
pub const fn correction_cap(state: ComfortState) -> f64 {
    match state {
        ComfortState::Ideal | ComfortState::BorosEnergi => 0.0,
        ComfortState::Optimalisasi => 1.5,
        ComfortState::Peringatan => 2.5,
        ComfortState::Kritis => 3.0,
    }
}

fn fan_speed(severity: ThermalSeverity, pmv: f64) -> FanSpeed {
    match severity {
        ThermalSeverity::None => FanSpeed::Auto,
        ThermalSeverity::Mild if pmv.abs() <= MILD_AUTO_FAN_LIMIT => FanSpeed::Auto,
        ThermalSeverity::Mild => FanSpeed::Low,
        ThermalSeverity::Moderate => FanSpeed::Medium,
        ThermalSeverity::Severe => FanSpeed::High,
    }
}

/// Nearest whole degree that stays within the cap window. When the window
/// holds no integer (zero cap on a fractional target) the target is rounded.
/// Half degrees round to the even neighbour.
fn quantize(corrected: f64, target: f64, cap: f64) -> i32 {
    let lowest = (target - cap).ceil();
    let highest = (target + cap).floor();
    let value = if lowest <= highest {
        corrected.round_ties_even().clamp(lowest, highest)
    } else {
        target.round_ties_even()
    };
    value as i32
}

fn standby_plan(pmv: f64, profile: &ReferenceProfile) -> AcControlPlan {
    let target = profile.target_temperature;
    let setpoint = (target.round_ties_even() as i32).clamp(SETPOINT_MIN, SETPOINT_MAX);

    AcControlPlan {
        setpoint,
        mode: AcMode::Off,
        fan_speed: FanSpeed::Auto,
        severity: ThermalSeverity::None,
        reason: ControlReason {
            status: ComfortState::BorosEnergi,
            unoccupied: true,
            pmv,
            severity: ThermalSeverity::None,
            framing: ActionFraming::Standby,
            gradual: false,
            direction: CorrectionDirection::Hold,
            target_temperature: target,
            setpoint,
            correction: 0.0,
            setpoint_delta: f64::from(setpoint) - target,
            correction_cap: 0.0,
            cap_hit: false,
            actuator_limited: false,
        },
    }
}

/// Plan the AC action for one evaluation.
///
/// `humidity` only breaks the tie between `dry` and `fan` when the room is too
/// cold: above the profile's band the unit dries, otherwise it just circulates.
pub fn plan(
    pmv: f64,
    status: ComfortState,
    profile: &ReferenceProfile,
    occupancy: u32,
    humidity: f64,
) -> AcControlPlan {
    if status == ComfortState::BorosEnergi || occupancy == 0 {
        return standby_plan(pmv, profile);
    }

    let severity = ThermalSeverity::from_pmv(pmv);
    let cap = correction_cap(status);
    let target = profile.target_temperature;

    let direction = match severity {
        ThermalSeverity::None => CorrectionDirection::Hold,
        _ if pmv > 0.0 => CorrectionDirection::Cool,
        _ => CorrectionDirection::Warm,
    };

    let uncapped = match direction {
        CorrectionDirection::Hold => 0.0,
        _ => pmv.abs() / PMV_PER_DEGREE,
    };
    let magnitude = uncapped.min(cap);
    let correction = match direction {
        CorrectionDirection::Hold => 0.0,
        CorrectionDirection::Cool => -magnitude,
        CorrectionDirection::Warm => magnitude,
    };

    let quantized = quantize(target + correction, target, cap);
    let setpoint = quantized.clamp(SETPOINT_MIN, SETPOINT_MAX);

    let mode = match direction {
        CorrectionDirection::Hold => AcMode::Auto,
        CorrectionDirection::Cool => AcMode::Cool,
        CorrectionDirection::Warm if humidity > profile.humidity_range.max => AcMode::Dry,
        CorrectionDirection::Warm => AcMode::Fan,
    };

    let framing = ActionFraming::for_state(status);

    AcControlPlan {
        setpoint,
        mode,
        fan_speed: fan_speed(severity, pmv),
        severity,
        reason: ControlReason {
            status,
            unoccupied: false,
            pmv,
            severity,
            framing,
            gradual: framing.is_gradual(),
            direction,
            target_temperature: target,
            setpoint,
            correction,
            setpoint_delta: f64::from(setpoint) - target,
            correction_cap: cap,
            cap_hit: uncapped > cap,
            actuator_limited: setpoint != quantized,
        },
    }
}
