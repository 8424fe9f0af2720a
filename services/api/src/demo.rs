use crate::routes::AnalyzeResponse;
use clap::Args;
use room_comfort::comfort::{evaluate, Evaluation, SensorReading};
use room_comfort::error::AppError;
use room_comfort::narration::{narrate_with_fallback, TemplateNarrator};

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Relative humidity in percent
    #[arg(long)]
    pub(crate) humidity: f64,
    /// Air temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) temperature: f64,
    /// Sound level in dB
    #[arg(long)]
    pub(crate) noise: f64,
    /// Illuminance in lux
    #[arg(long)]
    pub(crate) illuminance: f64,
    /// Number of people in the room
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) occupancy: i64,
    /// Print the HTTP response payload instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let reading = SensorReading {
        humidity: args.humidity,
        air_temperature: args.temperature,
        noise: args.noise,
        illuminance: args.illuminance,
        occupancy: args.occupancy,
    };

    let evaluation = evaluate(&reading)?;
    let reason = narrate_with_fallback(&TemplateNarrator, &evaluation);

    if args.json {
        match serde_json::to_string_pretty(&AnalyzeResponse::new(evaluation, reason)) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Response payload unavailable: {}", err),
        }
    } else {
        render_evaluation(&evaluation, &reason);
    }

    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let scenarios = [
        (
            "Office afternoon",
            SensorReading {
                humidity: 65.0,
                air_temperature: 27.5,
                noise: 40.0,
                illuminance: 420.0,
                occupancy: 8,
            },
        ),
        (
            "Empty meeting room",
            SensorReading {
                humidity: 60.0,
                air_temperature: 29.0,
                noise: 35.0,
                illuminance: 300.0,
                occupancy: 0,
            },
        ),
        (
            "Crowded lecture hall",
            SensorReading {
                humidity: 75.0,
                air_temperature: 33.0,
                noise: 50.0,
                illuminance: 600.0,
                occupancy: 35,
            },
        ),
    ];

    println!("Room comfort demo");
    for (title, reading) in scenarios {
        let evaluation = evaluate(&reading)?;
        let reason = narrate_with_fallback(&TemplateNarrator, &evaluation);
        println!("\n== {} ==", title);
        println!(
            "Reading: {}% RH, {}°C, {} dB, {} lux, {} occupants",
            reading.humidity,
            reading.air_temperature,
            reading.noise,
            reading.illuminance,
            reading.occupancy
        );
        render_evaluation(&evaluation, &reason);
    }

    Ok(())
}

fn render_evaluation(evaluation: &Evaluation, reason: &str) {
    let comfort = &evaluation.comfort;
    let plan = &evaluation.plan;
    let profile = &evaluation.profile;

    println!(
        "Comfort: {} (PMV {}, PPD {}%, {})",
        comfort.state.label(),
        comfort.pmv,
        comfort.ppd,
        evaluation.sensation.label()
    );
    println!(
        "Reference: target {}°C, humidity {}-{}%, {} lux, max {} dB",
        profile.target_temperature,
        profile.humidity_range.min,
        profile.humidity_range.max,
        profile.target_illuminance,
        profile.max_noise
    );
    println!(
        "AC: {}°C, mode {}, fan {} (delta {:+.1}°C, cap {}°C{})",
        plan.setpoint,
        plan.mode.label(),
        plan.fan_speed.label(),
        plan.reason.setpoint_delta,
        plan.reason.correction_cap,
        if plan.reason.cap_hit { ", capped" } else { "" }
    );

    let breakdown = &evaluation.environment.breakdown;
    println!(
        "Environment score: {} (lighting {}, noise {}, humidity {})",
        comfort.env_score, breakdown.lighting, breakdown.noise, breakdown.humidity
    );
    if evaluation.environment.issues.is_empty() {
        println!("Environment issues: none");
    } else {
        println!("Environment issues:");
        for issue in &evaluation.environment.issues {
            println!("- {} -> {}", issue.description(), issue.recommendation);
        }
    }

    if !reason.is_empty() {
        println!("Reason: {}", reason);
    }
}
