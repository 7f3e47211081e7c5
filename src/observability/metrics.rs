//! Metrics collection for the roulette service.
//!
//! Prometheus-compatible counters and histograms. Channel and user names are
//! chat-controlled and never become labels; HTTP routes are bucketed against
//! the known route list.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::engine::Mode;
use crate::error::ServerError;

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Routes served by the HTTP layer, used for label cardinality protection.
const KNOWN_ROUTES: [&str; 7] = [
    "/",
    "/roulette",
    "/roulette/limited",
    "/roulette/record",
    "/roleta",
    "/roletaLimitada",
    "/roletaRecorde",
];

/// Returns `route` when it is a known route, `"__unknown__"` otherwise.
#[must_use]
pub fn sanitize_route_label(route: &str) -> &str {
    if KNOWN_ROUTES.contains(&route) {
        route
    } else {
        "__unknown__"
    }
}

/// Initializes the global metrics recorder.
///
/// When `port` is `Some`, a Prometheus HTTP listener is started on
/// `127.0.0.1:<port>`. When `None`, the recorder is installed without an
/// endpoint.
///
/// # Errors
///
/// Returns [`ServerError::Metrics`] if the recorder or listener cannot be
/// installed (e.g. port already in use).
pub fn init_metrics(port: Option<u16>) -> Result<(), ServerError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    port.map_or_else(
        || PrometheusBuilder::new().install_recorder().map(|_| ()),
        |p| {
            PrometheusBuilder::new()
                .with_http_listener(([127, 0, 0, 1], p))
                .install()
        },
    )
    .map_err(|e| ServerError::Metrics(e.to_string()))?;

    describe_metrics();
    Ok(())
}

fn describe_metrics() {
    describe_counter!("roulette_plays_total", "Plays by mode and outcome");
    describe_counter!(
        "roulette_records_broken_total",
        "Number of times a channel record was set"
    );
    describe_counter!(
        "roulette_daily_resets_total",
        "Daily counter resets by mode"
    );
    describe_counter!(
        "roulette_store_errors_total",
        "Failed document loads and saves"
    );
    describe_counter!("roulette_http_requests_total", "HTTP requests by route");
    describe_histogram!(
        "roulette_http_request_duration_ms",
        "HTTP request handling time in milliseconds"
    );
}

/// Records a finished play.
pub fn record_play(mode: Mode, outcome: &'static str) {
    counter!("roulette_plays_total", "mode" => mode.as_str(), "outcome" => outcome).increment(1);
}

/// Records a new channel record.
pub fn record_record_broken() {
    counter!("roulette_records_broken_total").increment(1);
}

/// Records a daily reset.
pub fn record_reset(mode: Mode) {
    counter!("roulette_daily_resets_total", "mode" => mode.as_str()).increment(1);
}

/// Records a failed store operation (`"load"` or `"save"`).
pub fn record_store_error(op: &'static str) {
    counter!("roulette_store_errors_total", "op" => op).increment(1);
}

/// Records an HTTP request and its handling time.
pub fn record_request(route: &str, duration: Duration) {
    let label = sanitize_route_label(route).to_owned();
    counter!("roulette_http_requests_total", "route" => label.clone()).increment(1);
    histogram!("roulette_http_request_duration_ms", "route" => label)
        .record(duration.as_secs_f64() * 1000.0);
}
