use serde::{Deserialize, Serialize};

use super::environment::EnvironmentalReading;

/// Raw sensor payload as supplied by the caller. Nothing here is trusted until
/// [`SensorReading::validate`] has run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Relative humidity in percent.
    #[serde(alias = "hum")]
    pub humidity: f64,
    /// Air temperature in °C.
    #[serde(alias = "temp")]
    pub air_temperature: f64,
    /// Sound pressure level in dB.
    pub noise: f64,
    /// Illuminance in lux.
    #[serde(alias = "light_level")]
    pub illuminance: f64,
    /// Number of people in the room.
    pub occupancy: i64,
}

/// Air temperatures the comfort model is evaluated over, in °C.
pub const AIR_TEMPERATURE_MIN: f64 = -50.0;
pub const AIR_TEMPERATURE_MAX: f64 = 100.0;

impl SensorReading {
    pub fn validate(&self) -> Result<ValidatedReading, InvalidReading> {
        let finite_checks = [
            ("humidity", self.humidity),
            ("air_temperature", self.air_temperature),
            ("noise", self.noise),
            ("illuminance", self.illuminance),
        ];
        for (field, value) in finite_checks {
            if !value.is_finite() {
                return Err(InvalidReading::NonFinite { field });
            }
        }

        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(InvalidReading::HumidityOutOfRange(self.humidity));
        }
        if !(AIR_TEMPERATURE_MIN..=AIR_TEMPERATURE_MAX).contains(&self.air_temperature) {
            return Err(InvalidReading::AirTemperatureOutOfRange(self.air_temperature));
        }
        if self.noise < 0.0 {
            return Err(InvalidReading::Negative {
                field: "noise",
                value: self.noise,
            });
        }
        if self.illuminance < 0.0 {
            return Err(InvalidReading::Negative {
                field: "illuminance",
                value: self.illuminance,
            });
        }

        if self.occupancy < 0 {
            return Err(InvalidReading::NegativeOccupancy(self.occupancy));
        }
        let occupancy = u32::try_from(self.occupancy)
            .map_err(|_| InvalidReading::OccupancyTooLarge(self.occupancy))?;

        Ok(ValidatedReading {
            humidity: self.humidity,
            air_temperature: self.air_temperature,
            noise: self.noise,
            illuminance: self.illuminance,
            occupancy,
        })
    }
}

/// A reading that passed validation. Only constructible through
/// [`SensorReading::validate`], so every value is finite and in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedReading {
    humidity: f64,
    air_temperature: f64,
    noise: f64,
    illuminance: f64,
    occupancy: u32,
}

impl ValidatedReading {
    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn air_temperature(&self) -> f64 {
        self.air_temperature
    }

    pub fn occupancy(&self) -> u32 {
        self.occupancy
    }

    /// The non-thermal subset consumed by the environment score.
    pub fn environmental(&self) -> EnvironmentalReading {
        EnvironmentalReading {
            humidity: self.humidity,
            noise: self.noise,
            illuminance: self.illuminance,
        }
    }
}

/// Rejection raised when a reading cannot be evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidReading {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("humidity {0} is outside 0-100%")]
    HumidityOutOfRange(f64),
    #[error("air temperature {0} is outside -50 to 100 °C")]
    AirTemperatureOutOfRange(f64),
    #[error("{field} cannot be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("occupancy cannot be negative (got {0})")]
    NegativeOccupancy(i64),
    #[error("occupancy {0} exceeds the supported range")]
    OccupancyTooLarge(i64),
}

/// Physiological comfort state derived from PPD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComfortState {
    Ideal,
    Optimalisasi,
    Peringatan,
    Kritis,
    #[serde(rename = "Boros Energi")]
    BorosEnergi,
}

impl ComfortState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ideal => "Ideal",
            Self::Optimalisasi => "Optimalisasi",
            Self::Peringatan => "Peringatan",
            Self::Kritis => "Kritis",
            Self::BorosEnergi => "Boros Energi",
        }
    }
}

/// Thermal sensation on the seven-point PMV scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalSensation {
    Cold,
    Cool,
    SlightlyCool,
    Neutral,
    SlightlyWarm,
    Warm,
    Hot,
}

impl ThermalSensation {
    pub fn from_pmv(pmv: f64) -> Self {
        const SCALE: [(f64, ThermalSensation); 6] = [
            (-2.5, ThermalSensation::Cold),
            (-1.5, ThermalSensation::Cool),
            (-0.5, ThermalSensation::SlightlyCool),
            (0.5, ThermalSensation::Neutral),
            (1.5, ThermalSensation::SlightlyWarm),
            (2.5, ThermalSensation::Warm),
        ];

        SCALE
            .iter()
            .find(|(upper, _)| pmv <= *upper)
            .map(|(_, sensation)| *sensation)
            .unwrap_or(Self::Hot)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Cool => "cool",
            Self::SlightlyCool => "slightly cool",
            Self::Neutral => "neutral",
            Self::SlightlyWarm => "slightly warm",
            Self::Warm => "warm",
            Self::Hot => "hot",
        }
    }
}

/// Which side of the room's condition deserves the narration's attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryConcern {
    Thermal,
    Environmental,
    Both,
    None,
}

impl PrimaryConcern {
    pub fn from_flags(thermal_problem: bool, environmental_problem: bool) -> Self {
        match (thermal_problem, environmental_problem) {
            (true, true) => Self::Both,
            (true, false) => Self::Thermal,
            (false, true) => Self::Environmental,
            (false, false) => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> SensorReading {
        SensorReading {
            humidity: 55.0,
            air_temperature: 24.0,
            noise: 40.0,
            illuminance: 400.0,
            occupancy: 4,
        }
    }

    #[test]
    fn validate_accepts_plausible_reading() {
        let validated = reading().validate().expect("reading is valid");
        assert_eq!(validated.occupancy(), 4);
        assert_eq!(validated.environmental().illuminance, 400.0);
    }

    #[test]
    fn validate_rejects_negative_occupancy() {
        let mut raw = reading();
        raw.occupancy = -1;
        assert_eq!(raw.validate(), Err(InvalidReading::NegativeOccupancy(-1)));
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let mut raw = reading();
        raw.air_temperature = f64::NAN;
        assert_eq!(
            raw.validate(),
            Err(InvalidReading::NonFinite {
                field: "air_temperature"
            })
        );

        let mut raw = reading();
        raw.illuminance = f64::INFINITY;
        assert!(matches!(
            raw.validate(),
            Err(InvalidReading::NonFinite {
                field: "illuminance"
            })
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_humidity() {
        let mut raw = reading();
        raw.humidity = 100.5;
        assert!(matches!(
            raw.validate(),
            Err(InvalidReading::HumidityOutOfRange(_))
        ));
    }

    #[test]
    fn validate_bounds_air_temperature() {
        for temperature in [-235.0, -300.0, -50.5, 100.5, 1e80, 1e300] {
            let mut raw = reading();
            raw.air_temperature = temperature;
            assert_eq!(
                raw.validate(),
                Err(InvalidReading::AirTemperatureOutOfRange(temperature))
            );
        }

        for temperature in [AIR_TEMPERATURE_MIN, AIR_TEMPERATURE_MAX] {
            let mut raw = reading();
            raw.air_temperature = temperature;
            assert!(raw.validate().is_ok());
        }
    }

    #[test]
    fn validate_rejects_occupancy_beyond_u32() {
        let mut raw = reading();
        raw.occupancy = i64::from(u32::MAX) + 1;
        assert!(matches!(
            raw.validate(),
            Err(InvalidReading::OccupancyTooLarge(_))
        ));
    }

    #[test]
    fn reading_accepts_short_wire_names() {
        let raw: SensorReading = serde_json::from_str(
            r#"{"hum":65.0,"temp":27.5,"noise":40.0,"light_level":420.0,"occupancy":8}"#,
        )
        .expect("aliases deserialize");
        assert_eq!(raw.humidity, 65.0);
        assert_eq!(raw.air_temperature, 27.5);
        assert_eq!(raw.illuminance, 420.0);
    }

    #[test]
    fn sensation_follows_pmv_scale() {
        assert_eq!(ThermalSensation::from_pmv(0.0), ThermalSensation::Neutral);
        assert_eq!(ThermalSensation::from_pmv(0.5), ThermalSensation::Neutral);
        assert_eq!(
            ThermalSensation::from_pmv(0.73),
            ThermalSensation::SlightlyWarm
        );
        assert_eq!(ThermalSensation::from_pmv(-1.6), ThermalSensation::Cool);
        assert_eq!(ThermalSensation::from_pmv(2.8), ThermalSensation::Hot);
        assert_eq!(ThermalSensation::from_pmv(-3.0), ThermalSensation::Cold);
    }

    #[test]
    fn boros_energi_serializes_with_space() {
        let json = serde_json::to_string(&ComfortState::BorosEnergi).expect("serializes");
        assert_eq!(json, "\"Boros Energi\"");
    }
}
