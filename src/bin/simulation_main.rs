// simulation_main.rs
//
// Usage: simulation_main [config.json] [seconds]
use intersection_sim::{SimulationConfig, Statistics, TrafficController};
use log::info;
use std::time::Duration;

fn print_statistics(controller: &TrafficController, stats: &Statistics) {
    let lights: Vec<String> = controller
        .lights()
        .iter()
        .map(|light| format!("{}={:?}", light.direction, light.phase))
        .collect();
    println!(
        "[{}] generated: {} | crossed safely: {} | accidents prevented: {} | inside: {}/{} | max concurrent: {} | violations: {}",
        lights.join(" "),
        stats.total_vehicles_generated,
        stats.vehicles_crossed_safely,
        stats.accidents_prevented,
        controller.crossing_count(),
        controller.capacity(),
        stats.max_concurrent_in_intersection,
        stats.safety_violations,
    );
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match SimulationConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };
    let run_for = match args.next() {
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(e) => {
                eprintln!("Invalid run length '{}': {}", raw, e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let controller = match TrafficController::new(config) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("Controller error: {}", e);
            std::process::exit(1);
        }
    };

    let mut changes = controller.subscribe();
    controller.start();
    info!("Intersection simulation running; press Ctrl-C to stop");

    let report = async {
        let mut last: Option<Statistics> = None;
        while changes.changed().await.is_some() {
            let stats = controller.statistics();
            if last != Some(stats) {
                print_statistics(&controller, &stats);
                last = Some(stats);
            }
        }
    };
    let deadline = async {
        match run_for {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = report => {}
        _ = deadline => info!("Run length reached"),
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                eprintln!("Could not listen for Ctrl-C: {}", e);
            }
        }
    }

    controller.shutdown().await;
    match serde_json::to_string_pretty(&controller.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("ERROR serializing snapshot: {}", e),
    }
}
