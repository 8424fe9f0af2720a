use super::common::*;

#[test]
fn air_temperature_never_moves_the_environment_score() {
    let baseline = evaluated(reading(60.0, 24.0, 52.0, 300.0, 20));
    for tenth in 140..=360 {
        let temperature = tenth as f64 / 10.0;
        let other = evaluated(reading(60.0, temperature, 52.0, 300.0, 20));
        assert_eq!(other.comfort.env_score, baseline.comfort.env_score);
        assert_eq!(other.environment, baseline.environment);
    }
}

#[test]
fn noise_and_lighting_never_move_the_state() {
    let baseline = evaluated(reading(60.0, 28.0, 40.0, 380.0, 22));
    for noise in [20.0, 45.0, 60.0, 90.0] {
        for illuminance in [0.0, 200.0, 380.0, 1500.0] {
            let other = evaluated(reading(60.0, 28.0, noise, illuminance, 22));
            assert_eq!(other.comfort.state, baseline.comfort.state);
            assert_eq!(other.comfort.pmv, baseline.comfort.pmv);
            assert_eq!(other.plan, baseline.plan);
        }
    }
}

#[test]
fn humidity_within_band_leaves_environment_score_untouched() {
    let baseline = evaluated(reading(45.0, 24.0, 40.0, 400.0, 6));
    for humidity in [46.0, 50.0, 55.0] {
        let other = evaluated(reading(humidity, 24.0, 40.0, 400.0, 6));
        assert_eq!(other.comfort.env_score, baseline.comfort.env_score);
    }
}

#[test]
fn setpoint_stays_on_the_actuator_for_any_reading() {
    for occupancy in [1, 12, 20, 28, 45] {
        for tenth in (100..=400).step_by(5) {
            let temperature = tenth as f64 / 10.0;
            for humidity in [10.0, 50.0, 95.0] {
                let evaluation = evaluated(reading(humidity, temperature, 40.0, 400.0, occupancy));
                assert!((16..=30).contains(&evaluation.plan.setpoint));
            }
        }
    }
}
