pub mod comfort;
pub mod config;
pub mod error;
pub mod narration;
pub mod telemetry;

pub use comfort::{evaluate, evaluate_validated, ComfortResult, Evaluation, SensorReading};
