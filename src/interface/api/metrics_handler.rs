//! Prometheus metrics handler

use crate::application::{InviteOutcome, ResponseOutcome};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize the Prometheus metrics exporter and install it as the global recorder
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("invitation_batch_duration_seconds".to_string()),
            &[0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0],
        )?
        .install_recorder()?;

    describe_counter!(
        "invitations_batches_total",
        "Total number of invitation batches dispatched"
    );
    describe_counter!(
        "invitations_rejected_batches_total",
        "Total number of invitation batches rejected before dispatch"
    );
    describe_counter!(
        "invitations_calls_queued_total",
        "Total number of invitation calls queued by the provider"
    );
    describe_counter!(
        "invitations_calls_failed_total",
        "Total number of invitation calls that failed to dispatch"
    );
    describe_counter!(
        "invitation_responses_total",
        "Total number of response notifications by outcome"
    );
    describe_histogram!(
        "invitation_batch_duration_seconds",
        "Time taken to dispatch one invitation batch"
    );

    Ok(handle)
}

/// HTTP metrics handler
pub async fn metrics_handler(State(prometheus_handle): State<PrometheusHandle>) -> Response {
    let metrics = prometheus_handle.render();
    (StatusCode::OK, metrics).into_response()
}

/// Record a dispatched batch
pub fn record_batch(outcome: &InviteOutcome, duration: Duration) {
    counter!("invitations_batches_total").increment(1);
    counter!("invitations_calls_queued_total").increment(outcome.queued.len() as u64);
    counter!("invitations_calls_failed_total").increment(outcome.failed.len() as u64);
    histogram!("invitation_batch_duration_seconds").record(duration.as_secs_f64());
}

/// Record a batch rejected by validation
pub fn record_rejected_batch() {
    counter!("invitations_rejected_batches_total").increment(1);
}

/// Record a response notification
pub fn record_response(outcome: ResponseOutcome) {
    counter!("invitation_responses_total", "outcome" => outcome.as_str()).increment(1);
}
