use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static METRICS_ENABLED: OnceLock<bool> = OnceLock::new();

fn parse_enabled(raw: Option<&str>) -> bool {
    raw.map(|v| {
        let v = v.trim();
        !(v.eq_ignore_ascii_case("false") || v == "0")
    })
    .unwrap_or(true)
}

/// Check if metrics are enabled via METRICS_ENABLED env var (default: on)
pub fn is_metrics_enabled() -> bool {
    *METRICS_ENABLED.get_or_init(|| parse_enabled(std::env::var("METRICS_ENABLED").ok().as_deref()))
}

/// Install the Prometheus recorder and spawn its upkeep task.
/// Returns `None` when metrics are disabled.
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_metrics_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
            ],
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Label for the `path` dimension. Requests no route matched share one
/// label so arbitrary URLs cannot create new series.
fn path_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_PATH.to_owned())
}

const UNMATCHED_PATH: &str = "unmatched";

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_metrics_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = path_label(&req);

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router serving the Prometheus scrape endpoint
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Authentication metrics

pub fn track_login_success() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_login_success_total").increment(1);
}

pub fn track_login_failure(reason: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_login_failure_total", "reason" => reason).increment(1);
}

pub fn track_token_issued(token_type: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_tokens_issued_total", "type" => token_type).increment(1);
}

pub fn track_token_rejected(reason: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_token_rejected_total", "reason" => reason).increment(1);
}
