//! citygen - generate a city plan from the command line.
//!
//! Usage: `citygen [size] [terrain] [population] [eco_priority] [seed]`
//!
//! Runs the plan plugin headless for a single frame, then prints an ASCII
//! preview followed by the JSON plan.

use std::process::ExitCode;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use citygen::plan::{render_ascii, CityPlanPlugin, GeneratePlanEvent, LatestPlan, PlanRequest};

const USAGE: &str = "usage: citygen [size] [terrain] [population] [eco_priority] [seed]";

fn parse_arg<T: std::str::FromStr>(value: Option<&String>, name: &str, fallback: T) -> Result<T, String> {
    match value {
        None => Ok(fallback),
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("invalid {name}: '{raw}'")),
    }
}

fn parse_request(args: &[String]) -> Result<PlanRequest, String> {
    let defaults = PlanRequest::default();
    Ok(PlanRequest {
        city_name: Some("TerraNova".to_string()),
        size: parse_arg(args.first(), "size", defaults.size)?,
        terrain: args.get(1).cloned().unwrap_or(defaults.terrain),
        population: parse_arg(args.get(2), "population", defaults.population)?,
        eco_priority: parse_arg(args.get(3), "eco_priority", defaults.eco_priority)?,
        seed: match args.get(4) {
            Some(raw) => Some(raw.parse().map_err(|_| format!("invalid seed: '{raw}'"))?),
            None => None,
        },
    })
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    let request = match parse_request(&args) {
        Ok(request) => request,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let mut app = App::new();
    app.add_plugins(LogPlugin::default())
        .add_plugins(CityPlanPlugin);
    app.world_mut().send_event(GeneratePlanEvent(request));
    app.update();

    let Some(plan) = app.world_mut().resource_mut::<LatestPlan>().0.take() else {
        // Rejection has already been logged.
        return ExitCode::FAILURE;
    };

    println!("{}\n", render_ascii(&plan.plan_grid));
    for note in &plan.notes {
        println!("- {note}");
    }
    println!();
    match plan.to_json_pretty() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize plan: {}", e);
            ExitCode::FAILURE
        }
    }
}
