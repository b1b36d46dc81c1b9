//! Observability utilities
//!
//! Tracing initialization for the consuming service layer plus metrics
//! registration and recording helpers with standardized naming.

use crate::config::ObservabilitySettings;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use tracing_subscriber::EnvFilter;

/// Metrics prefix for all ShelfRank metrics
pub const METRICS_PREFIX: &str = "shelfrank";

/// Initialize the tracing subscriber from observability settings
///
/// `RUST_LOG` takes precedence over the configured log level. Safe to
/// call more than once; later calls are no-ops.
pub fn init_tracing(settings: &ObservabilitySettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if settings.json_logging {
        builder.json().try_init().ok();
    } else {
        builder.try_init().ok();
    }
}

/// Register all metric descriptions
pub fn register_metrics() {
    // Recommendation metrics
    describe_counter!(
        format!("{}_recommendations_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of recommendation requests"
    );

    describe_histogram!(
        format!("{}_recommend_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Recommendation request latency in seconds"
    );

    describe_gauge!(
        format!("{}_recommend_results_count", METRICS_PREFIX),
        Unit::Count,
        "Number of suggestions returned"
    );

    // Rank batch metrics
    describe_counter!(
        format!("{}_rank_runs_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of PageRank batch runs"
    );

    describe_histogram!(
        format!("{}_rank_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "PageRank batch latency in seconds"
    );

    describe_histogram!(
        format!("{}_rank_iterations", METRICS_PREFIX),
        Unit::Count,
        "Power iterations per PageRank batch run"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record recommendation metrics
pub fn record_recommendation(duration_secs: f64, reason: &str, result_count: usize) {
    counter!(
        format!("{}_recommendations_total", METRICS_PREFIX),
        "reason" => reason.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_recommend_duration_seconds", METRICS_PREFIX),
        "reason" => reason.to_string()
    )
    .record(duration_secs);

    gauge!(
        format!("{}_recommend_results_count", METRICS_PREFIX),
        "reason" => reason.to_string()
    )
    .set(result_count as f64);
}

/// Helper to record rank batch metrics
pub fn record_rank_run(duration_secs: f64, iterations: usize, converged: bool) {
    let status = if converged { "converged" } else { "capped" };

    counter!(
        format!("{}_rank_runs_total", METRICS_PREFIX),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(format!("{}_rank_duration_seconds", METRICS_PREFIX)).record(duration_secs);

    histogram!(format!("{}_rank_iterations", METRICS_PREFIX)).record(iterations as f64);
}
