//! Fanger PMV/PPD under a fixed office-work reference condition.
//!
//! The occupant model is pinned: seated light work (1.2 met), indoor clothing
//! (0.5 clo), still air (0.1 m/s), and a mean radiant temperature equal to the
//! air temperature. Only air temperature and humidity vary per reading.

use serde::Serialize;

pub const METABOLIC_RATE_MET: f64 = 1.2;
pub const CLOTHING_INSULATION_CLO: f64 = 0.5;
pub const AIR_VELOCITY: f64 = 0.1;

const WATTS_PER_MET: f64 = 58.15;
const EXTERNAL_WORK: f64 = 0.0;
const KELVIN_OFFSET: f64 = 273.0;
const STEFAN_BOLTZMANN_TERM: f64 = 3.96e-8;

const SURFACE_TOLERANCE: f64 = 1e-4;
const SURFACE_MAX_ITERATIONS: usize = 150;

/// The inputs PMV was actually computed with, for callers that need to see
/// which occupant model sits behind the number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelAssumptions {
    pub air_temperature: f64,
    pub radiant_temperature: f64,
    pub air_velocity: f64,
    pub relative_humidity: f64,
    pub metabolic_rate: f64,
    pub clothing_insulation: f64,
    pub note: &'static str,
}

impl ModelAssumptions {
    pub fn for_reading(air_temperature: f64, humidity: f64) -> Self {
        Self {
            air_temperature,
            radiant_temperature: air_temperature,
            air_velocity: AIR_VELOCITY,
            relative_humidity: humidity,
            metabolic_rate: METABOLIC_RATE_MET,
            clothing_insulation: CLOTHING_INSULATION_CLO,
            note: "assumes light office work (1.2 met), indoor clothing (0.5 clo), \
                   still air (0.1 m/s), radiant temperature equal to air temperature",
        }
    }
}

/// Heat-loss terms of the body's energy balance, all in W/m².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatLosses {
    pub skin_diffusion: f64,
    pub sweating: f64,
    pub latent_respiration: f64,
    pub dry_respiration: f64,
    pub radiation: f64,
    pub convection: f64,
}

impl HeatLosses {
    pub fn total(&self) -> f64 {
        self.skin_diffusion
            + self.sweating
            + self.latent_respiration
            + self.dry_respiration
            + self.radiation
            + self.convection
    }
}

fn metabolic_rate() -> f64 {
    METABOLIC_RATE_MET * WATTS_PER_MET
}

fn clothing_area_factor() -> f64 {
    if CLOTHING_INSULATION_CLO <= 0.078 {
        1.0 + 1.290 * CLOTHING_INSULATION_CLO
    } else {
        1.05 + 0.645 * CLOTHING_INSULATION_CLO
    }
}

/// Partial water vapour pressure in Pa. This is the only place humidity enters
/// the thermal model: it throttles evaporative loss through skin and breath.
fn vapour_pressure(air_temperature: f64, humidity: f64) -> f64 {
    humidity * 10.0 * (16.6536 - 4030.183 / (air_temperature + 235.0)).exp()
}

fn convective_coefficient(air_temperature: f64, net_metabolism: f64) -> f64 {
    let natural = 2.38 * (35.7 - 0.028 * net_metabolism - air_temperature).abs().powf(0.25);
    let forced = 12.1 * AIR_VELOCITY.sqrt();
    natural.max(forced)
}

fn radiative_exchange(area_factor: f64, surface: f64, radiant: f64) -> f64 {
    STEFAN_BOLTZMANN_TERM
        * area_factor
        * ((surface + KELVIN_OFFSET).powi(4) - (radiant + KELVIN_OFFSET).powi(4))
}

/// Clothing surface temperature by damped fixed-point iteration. Averaging
/// successive iterates keeps cold rooms from oscillating.
fn clothing_surface_temperature(
    air_temperature: f64,
    radiant_temperature: f64,
    net_metabolism: f64,
    area_factor: f64,
    convective: f64,
) -> f64 {
    let insulation = 0.155 * CLOTHING_INSULATION_CLO;
    let skin = 35.7 - 0.028 * net_metabolism;

    let mut surface = skin;
    for _ in 0..SURFACE_MAX_ITERATIONS {
        let next = skin
            - insulation
                * (radiative_exchange(area_factor, surface, radiant_temperature)
                    + area_factor * convective * (surface - air_temperature));
        let damped = 0.5 * (surface + next);
        if (damped - surface).abs() < SURFACE_TOLERANCE {
            return damped;
        }
        surface = damped;
    }
    surface
}

pub fn heat_losses(air_temperature: f64, humidity: f64) -> HeatLosses {
    let radiant_temperature = air_temperature;
    let metabolism = metabolic_rate();
    let net_metabolism = metabolism - EXTERNAL_WORK;
    let area_factor = clothing_area_factor();
    let pa = vapour_pressure(air_temperature, humidity);
    let convective = convective_coefficient(air_temperature, net_metabolism);
    let surface = clothing_surface_temperature(
        air_temperature,
        radiant_temperature,
        net_metabolism,
        area_factor,
        convective,
    );

    HeatLosses {
        skin_diffusion: 3.05e-3 * (5733.0 - 6.99 * net_metabolism - pa),
        sweating: if net_metabolism > WATTS_PER_MET {
            0.42 * (net_metabolism - WATTS_PER_MET)
        } else {
            0.0
        },
        latent_respiration: 1.7e-5 * metabolism * (5867.0 - pa),
        dry_respiration: 0.0014 * metabolism * (34.0 - air_temperature),
        radiation: radiative_exchange(area_factor, surface, radiant_temperature),
        convection: area_factor * convective * (surface - air_temperature),
    }
}

/// Net heat imbalance of the body (W/m²); positive means heat is being stored.
pub fn thermal_load(air_temperature: f64, humidity: f64) -> f64 {
    let net_metabolism = metabolic_rate() - EXTERNAL_WORK;
    net_metabolism - heat_losses(air_temperature, humidity).total()
}

/// Predicted Mean Vote, unrounded and unclamped.
pub fn compute_pmv(air_temperature: f64, humidity: f64) -> f64 {
    let sensitivity = 0.303 * (-0.036 * metabolic_rate()).exp() + 0.028;
    sensitivity * thermal_load(air_temperature, humidity)
}

/// Predicted Percentage Dissatisfied. Even in PMV, minimum 5 at PMV = 0.
pub fn compute_ppd(pmv: f64) -> f64 {
    let ppd = 100.0 - 95.0 * (-0.03353 * pmv.powi(4) - 0.2179 * pmv.powi(2)).exp();
    ppd.clamp(5.0, 100.0)
}
