//! Output formatting helpers for CLI commands

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

use crate::model::{ContentType, TransactionContext, Waypoint};
use crate::stats::RouteStatistics;

/// Format the enriched route as a table
pub fn format_route_table(waypoints: &[Waypoint]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "#", "Location", "Content", "Title", "Score", "Winner", "Time",
    ]);

    for wp in waypoints {
        match &wp.enrichment {
            Some(enrichment) => {
                let content = &enrichment.selected_content;
                let type_str = match content.content_type {
                    ContentType::Fallback => content.content_type.to_string().yellow().to_string(),
                    _ => content.content_type.to_string().green().to_string(),
                };

                table.add_row(vec![
                    Cell::new(wp.id),
                    Cell::new(&wp.location_name),
                    Cell::new(type_str),
                    Cell::new(&content.title),
                    Cell::new(format!("{:.2}", content.relevance_score)),
                    Cell::new(&enrichment.decision.winner),
                    Cell::new(format!("{}ms", enrichment.processing_time_ms)),
                ]);
            }
            None => {
                table.add_row(vec![
                    Cell::new(wp.id),
                    Cell::new(&wp.location_name),
                    Cell::new("failed".red().to_string()),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                ]);
            }
        }
    }

    table.to_string()
}

/// Format run statistics as a summary table
pub fn format_stats_summary(stats: &RouteStatistics) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);

    table.add_row(vec![
        Cell::new("Waypoints"),
        Cell::new(stats.total_waypoints),
    ]);
    table.add_row(vec![
        Cell::new("Enriched"),
        Cell::new(stats.enriched_waypoints.to_string().green().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Failed"),
        Cell::new(if stats.failed_waypoints > 0 {
            stats.failed_waypoints.to_string().red().to_string()
        } else {
            stats.failed_waypoints.to_string()
        }),
    ]);
    table.add_row(vec![
        Cell::new("Success rate"),
        Cell::new(format!("{:.0}%", stats.success_rate * 100.0)),
    ]);
    table.add_row(vec![
        Cell::new("Avg time"),
        Cell::new(format!("{:.0}ms", stats.average_processing_time_ms)),
    ]);

    for (content_type, count) in &stats.content_breakdown {
        table.add_row(vec![
            Cell::new(format!("  {}", content_type)),
            Cell::new(*count),
        ]);
    }

    table.to_string()
}

/// Format the full run result as JSON
pub fn format_route_json(
    ctx: &TransactionContext,
    waypoints: &[Waypoint],
    stats: &RouteStatistics,
) -> String {
    serde_json::to_string_pretty(&json!({
        "transaction_id": ctx.transaction_id,
        "origin": ctx.origin,
        "destination": ctx.destination,
        "waypoints": waypoints,
        "statistics": stats,
    }))
    .unwrap()
}
