//! Non-thermal environment quality: lighting, noise, and humidity as an
//! air-quality signal. Temperature never reaches this module.

use serde::Serialize;

use super::reference::HumidityBand;

const LIGHTING_WEIGHT: f64 = 0.35;
const NOISE_WEIGHT: f64 = 0.35;
const HUMIDITY_WEIGHT: f64 = 0.30;

/// The non-thermal subset of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentalReading {
    pub humidity: f64,
    pub noise: f64,
    pub illuminance: f64,
}

/// The non-thermal subset of a reference profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentTargets {
    pub humidity_range: HumidityBand,
    pub illuminance: f64,
    pub max_noise: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub lighting: f64,
    pub noise: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvFactor {
    Lighting,
    Noise,
    Humidity,
}

impl EnvFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lighting => "lighting",
            Self::Noise => "noise",
            Self::Humidity => "humidity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    TooDim,
    Glare,
    TooLoud,
    TooDry,
    Stuffy,
}

/// A non-thermal problem worth surfacing alongside the AC recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvIssue {
    pub factor: EnvFactor,
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub observed: f64,
    pub target: String,
    pub recommendation: &'static str,
}

impl EnvIssue {
    pub fn description(&self) -> String {
        match self.kind {
            IssueKind::TooDim => format!(
                "lighting is too dim ({} lux, target {})",
                self.observed, self.target
            ),
            IssueKind::Glare => format!(
                "lighting is excessive ({} lux, target {})",
                self.observed, self.target
            ),
            IssueKind::TooLoud => format!(
                "noise is above the comfortable limit ({} dB, limit {})",
                self.observed, self.target
            ),
            IssueKind::TooDry => format!(
                "air is too dry ({}%, target {})",
                self.observed, self.target
            ),
            IssueKind::Stuffy => format!(
                "air is humid and stuffy ({}%, target {})",
                self.observed, self.target
            ),
        }
    }
}

/// Score, per-factor breakdown, and detected issues.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentReport {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub issues: Vec<EnvIssue>,
}

impl EnvironmentReport {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Step scores by deviation, then a linear tail capped at the last step.
struct TierScale {
    tiers: &'static [(f64, f64)],
    tail_slope: f64,
    tail_cap: f64,
}

impl TierScale {
    fn score(&self, deviation: f64) -> f64 {
        self.tiers
            .iter()
            .find(|(limit, _)| deviation <= *limit)
            .map(|(_, score)| *score)
            .unwrap_or_else(|| (100.0 - deviation * self.tail_slope).clamp(0.0, self.tail_cap))
    }
}

const LIGHTING_SCALE: TierScale = TierScale {
    tiers: &[(50.0, 100.0), (100.0, 80.0), (200.0, 60.0)],
    tail_slope: 0.2,
    tail_cap: 60.0,
};

const NOISE_SCALE: TierScale = TierScale {
    tiers: &[(0.0, 100.0), (5.0, 80.0), (10.0, 60.0)],
    tail_slope: 5.0,
    tail_cap: 60.0,
};

const HUMIDITY_SCALE: TierScale = TierScale {
    tiers: &[(0.0, 100.0), (5.0, 90.0), (10.0, 70.0), (15.0, 50.0)],
    tail_slope: 3.0,
    tail_cap: 50.0,
};

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn score_breakdown(
    reading: &EnvironmentalReading,
    targets: &EnvironmentTargets,
) -> ScoreBreakdown {
    let lux_deviation = (reading.illuminance - targets.illuminance).abs();
    let noise_over = (reading.noise - targets.max_noise).max(0.0);
    let humidity_deviation = targets.humidity_range.deviation(reading.humidity).abs();

    ScoreBreakdown {
        lighting: round_tenth(LIGHTING_SCALE.score(lux_deviation)),
        noise: round_tenth(NOISE_SCALE.score(noise_over)),
        humidity: round_tenth(HUMIDITY_SCALE.score(humidity_deviation)),
    }
}

/// Weighted 0-100 environment score; 100 when every factor is on target.
pub fn compute_env_score(reading: &EnvironmentalReading, targets: &EnvironmentTargets) -> f64 {
    weighted_score(&score_breakdown(reading, targets))
}

fn weighted_score(breakdown: &ScoreBreakdown) -> f64 {
    round_tenth(
        breakdown.lighting * LIGHTING_WEIGHT
            + breakdown.noise * NOISE_WEIGHT
            + breakdown.humidity * HUMIDITY_WEIGHT,
    )
}

pub fn detect_issues(reading: &EnvironmentalReading, targets: &EnvironmentTargets) -> Vec<EnvIssue> {
    let mut issues = Vec::new();

    let lux = reading.illuminance;
    let lux_target = targets.illuminance;
    if lux < lux_target - 100.0 {
        issues.push(EnvIssue {
            factor: EnvFactor::Lighting,
            kind: IssueKind::TooDim,
            severity: if lux < lux_target - 200.0 {
                IssueSeverity::Severe
            } else {
                IssueSeverity::Moderate
            },
            observed: lux,
            target: format!("{lux_target} lux"),
            recommendation: "add light sources or open the blinds",
        });
    } else if lux > lux_target + 200.0 {
        issues.push(EnvIssue {
            factor: EnvFactor::Lighting,
            kind: IssueKind::Glare,
            severity: if lux > lux_target + 400.0 {
                IssueSeverity::Severe
            } else {
                IssueSeverity::Moderate
            },
            observed: lux,
            target: format!("{lux_target} lux"),
            recommendation: "dim the lighting or use anti-glare blinds",
        });
    }

    let noise_over = reading.noise - targets.max_noise;
    if noise_over > 5.0 {
        let severe = noise_over > 15.0;
        issues.push(EnvIssue {
            factor: EnvFactor::Noise,
            kind: IssueKind::TooLoud,
            severity: if severe {
                IssueSeverity::Severe
            } else {
                IssueSeverity::Moderate
            },
            observed: reading.noise,
            target: format!("{} dB", targets.max_noise),
            recommendation: if severe {
                "find and remove the noise source, consider acoustic dampening"
            } else {
                "reduce noisy activity or add background masking sound"
            },
        });
    }

    let band = targets.humidity_range;
    let band_label = format!("{}-{}%", band.min, band.max);
    if reading.humidity < band.min - 10.0 {
        issues.push(EnvIssue {
            factor: EnvFactor::Humidity,
            kind: IssueKind::TooDry,
            severity: IssueSeverity::Moderate,
            observed: reading.humidity,
            target: band_label,
            recommendation: "run a humidifier or ease off the air conditioning",
        });
    } else if reading.humidity > band.max + 10.0 {
        issues.push(EnvIssue {
            factor: EnvFactor::Humidity,
            kind: IssueKind::Stuffy,
            severity: if reading.humidity > band.max + 20.0 {
                IssueSeverity::Severe
            } else {
                IssueSeverity::Moderate
            },
            observed: reading.humidity,
            target: band_label,
            recommendation: "increase ventilation or run a dehumidifier",
        });
    }

    issues
}

pub fn assess_environment(
    reading: &EnvironmentalReading,
    targets: &EnvironmentTargets,
) -> EnvironmentReport {
    let breakdown = score_breakdown(reading, targets);
    EnvironmentReport {
        score: weighted_score(&breakdown),
        breakdown,
        issues: detect_issues(reading, targets),
    }
}
