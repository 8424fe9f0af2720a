use crate::comfort::{evaluate, Evaluation, SensorReading};

pub(super) fn reading(
    humidity: f64,
    air_temperature: f64,
    noise: f64,
    illuminance: f64,
    occupancy: i64,
) -> SensorReading {
    SensorReading {
        humidity,
        air_temperature,
        noise,
        illuminance,
        occupancy,
    }
}

pub(super) fn office_reading() -> SensorReading {
    reading(65.0, 27.5, 40.0, 420.0, 8)
}

pub(super) fn evaluated(reading: SensorReading) -> Evaluation {
    evaluate(&reading).expect("reading is valid")
}

pub(super) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
