use crate::comfort::{ComfortState, EnvIssue, Evaluation, PrimaryConcern};

use super::{NarrationError, Narrator};

/// Environment score at or above which a non-ideal status needs explaining.
const HIGH_ENV_SCORE: f64 = 80.0;

/// Deterministic prose built from the evaluation alone. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn render(&self, evaluation: &Evaluation) -> String {
        let comfort = &evaluation.comfort;
        if comfort.state == ComfortState::BorosEnergi {
            return unoccupied();
        }

        let main_issue = evaluation.environment.issues.first();
        let mut text = match (evaluation.primary_concern, main_issue) {
            (PrimaryConcern::Environmental, Some(issue)) => environmental(evaluation, issue),
            (PrimaryConcern::Both, Some(issue)) => combined(evaluation, issue),
            _ => by_state(evaluation),
        };

        if comfort.env_score >= HIGH_ENV_SCORE
            && matches!(
                comfort.state,
                ComfortState::Optimalisasi | ComfortState::Peringatan
            )
        {
            text.push_str(&format!(
                " Although the non-thermal environment scores well ({}%), the status follows \
                 physiological comfort (PPD), not the environment score.",
                comfort.env_score
            ));
        }

        text
    }
}

impl Narrator for TemplateNarrator {
    fn narrate(&self, evaluation: &Evaluation) -> Result<String, NarrationError> {
        Ok(self.render(evaluation))
    }
}

fn unoccupied() -> String {
    "The room is empty, so there is no thermal comfort demand. The AC is switched off to \
     save energy and will resume when occupants are detected."
        .to_string()
}

fn environmental(evaluation: &Evaluation, issue: &EnvIssue) -> String {
    let comfort = &evaluation.comfort;
    let plan = &evaluation.plan;
    format!(
        "Thermal conditions are {} (PMV {}, PPD {}%), but the main problem is {}: {}. \
         Suggested action: {}. The AC holds {}°C in {} mode.",
        evaluation.sensation.label(),
        comfort.pmv,
        comfort.ppd,
        issue.factor.label(),
        issue.description(),
        issue.recommendation,
        plan.setpoint,
        plan.mode.label(),
    )
}

fn combined(evaluation: &Evaluation, issue: &EnvIssue) -> String {
    let comfort = &evaluation.comfort;
    let plan = &evaluation.plan;
    format!(
        "Two problems were found: the room feels {} (PMV {}, {}% dissatisfied) and {}. \
         The AC is set to {}°C in {} mode for the thermal side. For {}, {}.",
        evaluation.sensation.label(),
        comfort.pmv,
        comfort.ppd,
        issue.description(),
        plan.setpoint,
        plan.mode.label(),
        issue.factor.label(),
        lowercase_first(issue.recommendation),
    )
}

fn by_state(evaluation: &Evaluation) -> String {
    let comfort = &evaluation.comfort;
    let plan = &evaluation.plan;
    let reason = &plan.reason;
    let sensation = evaluation.sensation.label();

    match comfort.state {
        ComfortState::Ideal => format!(
            "The room is comfortable with PMV {} ({sensation}). Only {}% of occupants are \
             expected to be dissatisfied under ISO 7730. The AC holds {}°C in {} mode.",
            comfort.pmv,
            comfort.ppd,
            plan.setpoint,
            plan.mode.label(),
        ),
        ComfortState::Optimalisasi => {
            let toward = if reason.setpoint_delta < 0.0 {
                "lower"
            } else {
                "raise"
            };
            if reason.setpoint_delta == 0.0 {
                format!(
                    "The room feels {sensation} (PMV {}, severity {}). As a preventive step \
                     the AC keeps a gentle {}°C in {} mode. Any further adjustment stays \
                     gradual.",
                    comfort.pmv,
                    reason.severity.label(),
                    plan.setpoint,
                    plan.mode.label(),
                )
            } else {
                format!(
                    "The room feels {sensation} (PMV {}, severity {}). As a preventive step \
                     the setpoint gets a gentle nudge from the {}°C target to {}°C ({:.1}°C). \
                     This gradual change is meant to {toward} PMV smoothly toward 0.",
                    comfort.pmv,
                    reason.severity.label(),
                    reason.target_temperature,
                    plan.setpoint,
                    reason.setpoint_delta.abs(),
                )
            }
        }
        ComfortState::Peringatan => format!(
            "The room feels {sensation} with PMV {} (severity {}), and {}% of occupants are \
             expected to be dissatisfied. This calls for active correction: the AC is set \
             to {}°C in {} mode with {} fan to bring PMV back to neutral.",
            comfort.pmv,
            reason.severity.label(),
            comfort.ppd,
            plan.setpoint,
            plan.mode.label(),
            plan.fan_speed.label(),
        ),
        ComfortState::Kritis => format!(
            "Attention: thermal conditions are critical with PMV {} ({sensation}). {}% of \
             occupants are expected to be dissatisfied, beyond the tolerance limit. \
             Immediate action is needed: the AC is set to {}°C in {} mode with {} fan for \
             maximum correction.",
            comfort.pmv,
            comfort.ppd,
            plan.setpoint,
            plan.mode.label(),
            plan.fan_speed.label(),
        ),
        ComfortState::BorosEnergi => unoccupied(),
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comfort::{evaluate, SensorReading};

    fn narrate(
        humidity: f64,
        air_temperature: f64,
        noise: f64,
        illuminance: f64,
        occupancy: i64,
    ) -> (Evaluation, String) {
        let evaluation = evaluate(&SensorReading {
            humidity,
            air_temperature,
            noise,
            illuminance,
            occupancy,
        })
        .expect("reading is valid");
        let text = TemplateNarrator.render(&evaluation);
        (evaluation, text)
    }

    #[test]
    fn optimalisasi_uses_preventive_language_only() {
        let (evaluation, text) = narrate(65.0, 27.5, 40.0, 420.0, 8);
        assert_eq!(evaluation.comfort.state, ComfortState::Optimalisasi);

        let lower = text.to_lowercase();
        for required in ["preventive", "gentle", "gradual"] {
            assert!(lower.contains(required), "missing '{required}' in: {text}");
        }
        for banned in ["aggressive", "drastic", "significant"] {
            assert!(!lower.contains(banned), "found '{banned}' in: {text}");
        }
    }

    #[test]
    fn high_env_score_explains_that_status_follows_ppd() {
        let (evaluation, text) = narrate(65.0, 27.5, 40.0, 420.0, 8);
        assert!(evaluation.comfort.env_score >= HIGH_ENV_SCORE);
        assert!(text.contains("physiological comfort (PPD)"));
    }

    #[test]
    fn ideal_room_gets_no_score_explanation() {
        let (evaluation, text) = narrate(50.0, 25.5, 40.0, 420.0, 14);
        assert_eq!(evaluation.comfort.state, ComfortState::Ideal);
        assert!(!text.contains("physiological comfort (PPD)"));
        assert!(text.contains("comfortable"));
    }

    #[test]
    fn empty_room_mentions_ac_off() {
        let (_, text) = narrate(60.0, 29.0, 40.0, 420.0, 0);
        assert!(text.contains("empty"));
        assert!(text.contains("switched off"));
    }

    #[test]
    fn kritis_calls_for_immediate_action() {
        let (evaluation, text) = narrate(75.0, 33.0, 50.0, 600.0, 35);
        assert_eq!(evaluation.comfort.state, ComfortState::Kritis);
        assert!(text.contains("Immediate action"));
        assert!(text.contains("26°C"));
    }

    #[test]
    fn environmental_concern_leads_the_narrative() {
        let (evaluation, text) = narrate(50.0, 25.5, 70.0, 420.0, 14);
        assert_eq!(evaluation.primary_concern, PrimaryConcern::Environmental);
        assert!(text.contains("main problem is noise"));
    }

    #[test]
    fn template_narrator_never_fails() {
        let (evaluation, _) = narrate(30.0, 18.0, 80.0, 50.0, 40);
        assert!(TemplateNarrator.narrate(&evaluation).is_ok());
    }
}
