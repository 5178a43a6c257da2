//! `run` command: load a route, enrich it, print the results.

use serde::Deserialize;
use std::path::Path;

use crate::cli::{output, RunArgs};
use crate::config::{ConfigError, TourConfig};
use crate::model::{Coordinates, QuerySet, TransactionContext, Waypoint};
use crate::scheduler::BatchScheduler;
use crate::stats::aggregate_route;

const DEFAULT_CONFIG_PATH: &str = "tourguide.toml";

/// Route input file: origin, destination, and the waypoint list.
#[derive(Debug, Deserialize)]
struct RouteFile {
    origin: String,
    destination: String,
    waypoints: Vec<Waypoint>,
}

/// Handle `tourguide run`.
pub async fn run_enrich(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?.with_env_overrides();

    if let Some(batch_size) = args.batch_size {
        config.engine.batch_size = batch_size;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;

    crate::logging::init_tracing(&config.logging)?;

    let (origin, destination, waypoints) = match &args.route {
        Some(path) => load_route(path)?,
        None => sample_route(),
    };

    let ctx = TransactionContext::new(&origin, &destination);
    tracing::info!(
        transaction_id = %ctx.transaction_id,
        origin = %origin,
        destination = %destination,
        waypoint_count = waypoints.len(),
        "Starting route enrichment"
    );

    let scheduler = BatchScheduler::from_config(&config)?;
    let enriched = scheduler.enrich_route(&ctx, waypoints).await;
    let stats = aggregate_route(&enriched);

    if args.json {
        println!("{}", output::format_route_json(&ctx, &enriched, &stats));
    } else {
        println!("{}", output::format_route_table(&enriched));
        println!("{}", output::format_stats_summary(&stats));
    }

    Ok(())
}

/// Load configuration, treating an absent default-path file as "use
/// defaults". An explicitly provided path that does not exist is an error.
fn load_config(path: &Path) -> Result<TourConfig, ConfigError> {
    if path == Path::new(DEFAULT_CONFIG_PATH) && !path.exists() {
        return Ok(TourConfig::default());
    }
    TourConfig::load(Some(path))
}

fn load_route(path: &Path) -> Result<(String, String, Vec<Waypoint>), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let route: RouteFile = serde_json::from_str(&content)?;
    Ok((route.origin, route.destination, route.waypoints))
}

/// Built-in demo route through Manhattan, with pre-built search queries
/// for the standard agent fan-out.
fn sample_route() -> (String, String, Vec<Waypoint>) {
    let stops = [
        ("Times Square", 40.7580, -73.9855, "Head north on 7th Ave"),
        ("Columbus Circle", 40.7681, -73.9819, "Continue onto Central Park West"),
        ("Lincoln Center", 40.7725, -73.9835, "Turn left onto W 65th St"),
        ("American Museum of Natural History", 40.7813, -73.9740, "Continue north"),
        ("Central Park", 40.7829, -73.9654, "Arrive at destination"),
    ];

    let waypoints = stops
        .iter()
        .enumerate()
        .map(|(i, (name, lat, lng, instruction))| {
            let mut wp = Waypoint::new(i as u32, *name, Coordinates::new(*lat, *lng), *instruction);
            wp.step_index = i as u32;
            wp.distance_from_start = i as f64 * 450.0;

            let mut queries = QuerySet::new();
            queries.insert("video", format!("{} walking tour", name));
            queries.insert("music", format!("songs about {}", name));
            queries.insert("history", format!("history of {}", name));
            wp.queries = Some(queries);
            wp
        })
        .collect();

    (
        "Times Square".to_string(),
        "Central Park".to_string(),
        waypoints,
    )
}
