use serde::Serialize;

use super::environment::EnvironmentTargets;

/// Inclusive humidity band in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HumidityBand {
    pub min: f64,
    pub max: f64,
}

impl HumidityBand {
    pub fn contains(self, humidity: f64) -> bool {
        (self.min..=self.max).contains(&humidity)
    }

    /// Signed distance outside the band; zero inside it.
    pub fn deviation(self, humidity: f64) -> f64 {
        if self.contains(humidity) {
            0.0
        } else if humidity < self.min {
            humidity - self.min
        } else {
            humidity - self.max
        }
    }
}

/// Target conditions for a room at a given headcount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceProfile {
    pub target_temperature: f64,
    pub humidity_range: HumidityBand,
    pub target_illuminance: f64,
    pub max_noise: f64,
}

impl ReferenceProfile {
    /// The non-thermal targets. Temperature is deliberately left out.
    pub fn environment_targets(&self) -> EnvironmentTargets {
        EnvironmentTargets {
            humidity_range: self.humidity_range,
            illuminance: self.target_illuminance,
            max_noise: self.max_noise,
        }
    }
}

/// Inclusive occupancy range; `max == None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupancyBand {
    pub min: u32,
    pub max: Option<u32>,
}

impl OccupancyBand {
    pub const fn contains(self, occupancy: u32) -> bool {
        if occupancy < self.min {
            return false;
        }
        match self.max {
            Some(max) => occupancy <= max,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReferenceEntry {
    pub band: OccupancyBand,
    pub profile: ReferenceProfile,
}

const fn entry(
    min: u32,
    max: Option<u32>,
    target_temperature: f64,
    humidity: (f64, f64),
    target_illuminance: f64,
    max_noise: f64,
) -> ReferenceEntry {
    ReferenceEntry {
        band: OccupancyBand { min, max },
        profile: ReferenceProfile {
            target_temperature,
            humidity_range: HumidityBand {
                min: humidity.0,
                max: humidity.1,
            },
            target_illuminance,
            max_noise,
        },
    }
}

/// Contiguous, ascending bands covering every occupancy from zero upwards.
pub const REFERENCE_TABLE: [ReferenceEntry; 6] = [
    entry(0, Some(0), 24.0, (50.0, 50.0), 450.0, 45.0),
    entry(1, Some(10), 23.5, (45.0, 55.0), 400.0, 45.0),
    entry(11, Some(18), 25.0, (45.0, 55.0), 420.0, 45.0),
    entry(19, Some(25), 26.5, (56.0, 65.0), 380.0, 55.0),
    entry(26, Some(30), 27.1, (66.0, 70.0), 550.0, 55.0),
    entry(31, None, 28.5, (71.0, 75.0), 600.0, 60.0),
];

pub fn entry_for(occupancy: u32) -> &'static ReferenceEntry {
    REFERENCE_TABLE
        .iter()
        .find(|entry| entry.band.contains(occupancy))
        .unwrap_or(&REFERENCE_TABLE[REFERENCE_TABLE.len() - 1])
}

pub fn profile_for(occupancy: u32) -> ReferenceProfile {
    entry_for(occupancy).profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_occupancy_matches_exactly_one_band() {
        for occupancy in 0..=40 {
            let matches = REFERENCE_TABLE
                .iter()
                .filter(|entry| entry.band.contains(occupancy))
                .count();
            assert_eq!(matches, 1, "occupancy {occupancy} matched {matches} bands");
        }
    }

    #[test]
    fn bands_are_contiguous_and_start_at_zero() {
        assert_eq!(REFERENCE_TABLE[0].band.min, 0);
        for pair in REFERENCE_TABLE.windows(2) {
            let upper = pair[0].band.max.expect("only the last band is open");
            assert_eq!(pair[1].band.min, upper + 1);
        }
        assert_eq!(REFERENCE_TABLE[REFERENCE_TABLE.len() - 1].band.max, None);
    }

    #[test]
    fn boundaries_resolve_to_expected_targets() {
        let cases = [
            (0, 24.0),
            (1, 23.5),
            (10, 23.5),
            (11, 25.0),
            (18, 25.0),
            (19, 26.5),
            (25, 26.5),
            (26, 27.1),
            (30, 27.1),
            (31, 28.5),
        ];
        for (occupancy, target) in cases {
            assert_eq!(
                profile_for(occupancy).target_temperature,
                target,
                "occupancy {occupancy}"
            );
        }
    }

    #[test]
    fn last_band_is_open_ended() {
        assert_eq!(profile_for(500), profile_for(31));
        assert_eq!(profile_for(u32::MAX), profile_for(31));
    }

    #[test]
    fn humidity_band_reports_signed_deviation() {
        let band = HumidityBand {
            min: 45.0,
            max: 55.0,
        };
        assert_eq!(band.deviation(50.0), 0.0);
        assert_eq!(band.deviation(65.0), 10.0);
        assert_eq!(band.deviation(40.0), -5.0);
        assert!(band.contains(45.0));
        assert!(!band.contains(55.5));
    }

    #[test]
    fn environment_targets_mirror_profile() {
        let profile = profile_for(8);
        let targets = profile.environment_targets();
        assert_eq!(targets.illuminance, 400.0);
        assert_eq!(targets.max_noise, 45.0);
        assert_eq!(targets.humidity_range, profile.humidity_range);
    }
}
