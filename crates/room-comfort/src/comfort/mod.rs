//! Deterministic comfort rule engine.
//!
//! Two independent paths meet only at assembly: air temperature and humidity
//! feed PMV/PPD and the comfort state, while humidity, noise, and illuminance
//! feed the environment score. The state and the score never read each other.

pub mod control;
pub mod domain;
pub mod environment;
pub mod reference;
pub mod status;
pub mod thermal;

#[cfg(test)]
mod tests;

pub use control::{
    plan, AcControlPlan, AcMode, ActionFraming, ControlReason, CorrectionDirection, FanSpeed,
    ThermalSeverity,
};
pub use domain::{
    ComfortState, InvalidReading, PrimaryConcern, SensorReading, ThermalSensation,
    ValidatedReading,
};
pub use environment::{
    assess_environment, compute_env_score, EnvFactor, EnvIssue, EnvironmentReport,
    EnvironmentTargets, EnvironmentalReading, IssueKind, IssueSeverity, ScoreBreakdown,
};
pub use reference::{profile_for, HumidityBand, OccupancyBand, ReferenceProfile};
pub use status::classify;
pub use thermal::{compute_pmv, compute_ppd, ModelAssumptions};

use serde::Serialize;
use tracing::debug;

/// Physiological verdict plus the independent environment score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComfortResult {
    pub pmv: f64,
    pub ppd: f64,
    #[serde(rename = "score")]
    pub env_score: f64,
    pub state: ComfortState,
}

/// Everything the transport and narration layers need from one reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub comfort: ComfortResult,
    pub plan: AcControlPlan,
    pub profile: ReferenceProfile,
    pub environment: EnvironmentReport,
    pub sensation: ThermalSensation,
    pub primary_concern: PrimaryConcern,
    pub model: ModelAssumptions,
    pub air_temperature: f64,
    pub humidity: f64,
    pub occupancy: u32,
    /// Air temperature minus target, °C.
    pub temperature_deviation: f64,
    /// Signed distance outside the humidity band, zero inside.
    pub humidity_deviation: f64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// PMV at two decimals and PPD at one, as reported to callers.
pub fn thermal_comfort(air_temperature: f64, humidity: f64) -> (f64, f64) {
    let pmv = round_to(compute_pmv(air_temperature, humidity), 2);
    let ppd = round_to(compute_ppd(pmv), 1);
    (pmv, ppd)
}

pub fn evaluate(reading: &SensorReading) -> Result<Evaluation, InvalidReading> {
    let validated = reading.validate()?;
    Ok(evaluate_validated(&validated))
}

pub fn evaluate_validated(reading: &ValidatedReading) -> Evaluation {
    let occupancy = reading.occupancy();
    let profile = profile_for(occupancy);

    let (pmv, ppd) = thermal_comfort(reading.air_temperature(), reading.humidity());
    let state = classify(ppd, occupancy);

    let environment = assess_environment(&reading.environmental(), &profile.environment_targets());

    let plan = plan(pmv, state, &profile, occupancy, reading.humidity());

    let primary_concern = PrimaryConcern::from_flags(
        plan.severity != ThermalSeverity::None,
        environment.has_issues(),
    );

    debug!(
        occupancy,
        pmv,
        ppd,
        state = state.label(),
        env_score = environment.score,
        setpoint = plan.setpoint,
        "comfort evaluated"
    );

    Evaluation {
        comfort: ComfortResult {
            pmv,
            ppd,
            env_score: environment.score,
            state,
        },
        plan,
        profile,
        sensation: ThermalSensation::from_pmv(pmv),
        primary_concern,
        model: ModelAssumptions::for_reading(reading.air_temperature(), reading.humidity()),
        air_temperature: reading.air_temperature(),
        humidity: reading.humidity(),
        occupancy,
        temperature_deviation: round_to(
            reading.air_temperature() - profile.target_temperature,
            1,
        ),
        humidity_deviation: round_to(profile.humidity_range.deviation(reading.humidity()), 1),
        environment,
    }
}
