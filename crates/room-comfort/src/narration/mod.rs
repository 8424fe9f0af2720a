//! Human-readable explanation of an [`Evaluation`].
//!
//! Narration only describes decisions already made by the comfort engine;
//! nothing here feeds back into the numbers.

mod template;

pub use template::TemplateNarrator;

use std::fmt::Debug;

use tracing::warn;

use crate::comfort::Evaluation;

#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    #[error("narrator unavailable: {0}")]
    Unavailable(String),
}

pub trait Narrator: Debug + Send + Sync {
    fn narrate(&self, evaluation: &Evaluation) -> Result<String, NarrationError>;
}

/// Primary narrator's text, or the template text when the primary fails.
pub fn narrate_with_fallback(primary: &dyn Narrator, evaluation: &Evaluation) -> String {
    match primary.narrate(evaluation) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "narrator failed, using template");
            TemplateNarrator.render(evaluation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comfort::{evaluate, SensorReading};

    #[derive(Debug)]
    struct Offline;

    impl Narrator for Offline {
        fn narrate(&self, _evaluation: &Evaluation) -> Result<String, NarrationError> {
            Err(NarrationError::Unavailable("no connection".to_string()))
        }
    }

    #[derive(Debug)]
    struct Fixed;

    impl Narrator for Fixed {
        fn narrate(&self, _evaluation: &Evaluation) -> Result<String, NarrationError> {
            Ok("fixed text".to_string())
        }
    }

    fn office() -> Evaluation {
        evaluate(&SensorReading {
            humidity: 65.0,
            air_temperature: 27.5,
            noise: 40.0,
            illuminance: 420.0,
            occupancy: 8,
        })
        .expect("reading is valid")
    }

    #[test]
    fn failing_narrator_falls_back_to_template() {
        let evaluation = office();
        let text = narrate_with_fallback(&Offline, &evaluation);
        assert_eq!(text, TemplateNarrator.render(&evaluation));
    }

    #[test]
    fn working_narrator_is_used_verbatim() {
        assert_eq!(narrate_with_fallback(&Fixed, &office()), "fixed text");
    }
}
