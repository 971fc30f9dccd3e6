//! Liveness and readiness probe endpoints.
//!
//! Bodies are plain text. A failing liveness check is held back for the
//! configured delay before it is answered, so callers measuring probe latency
//! see a slow failure rather than a fast one.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::probe::evaluator::{evaluate_liveness, evaluate_readiness};
use crate::probe::{LivenessOutcome, ReadinessOutcome};
use crate::state::AppState;

impl IntoResponse for LivenessOutcome {
    fn into_response(self) -> Response {
        let status = match self {
            LivenessOutcome::Up => StatusCode::OK,
            LivenessOutcome::Down => StatusCode::INTERNAL_SERVER_ERROR,
            LivenessOutcome::Starting => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, self.body()).into_response()
    }
}

impl IntoResponse for ReadinessOutcome {
    fn into_response(self) -> Response {
        let status = match self {
            ReadinessOutcome::Ready => StatusCode::OK,
            ReadinessOutcome::NotReady => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, self.body()).into_response()
    }
}

/// `GET /liveness-health`
#[instrument(name = "probes::liveness", skip(state))]
pub async fn liveness(State(state): State<AppState>) -> LivenessOutcome {
    let outcome = evaluate_liveness(&state.probes);
    if outcome == LivenessOutcome::Down {
        tracing::debug!(
            delay_ms = state.liveness_failure_delay.as_millis() as u64,
            "Simulated liveness failure, delaying response"
        );
        tokio::time::sleep(state.liveness_failure_delay).await;
    }
    outcome
}

/// `GET /readiness-health`
#[instrument(name = "probes::readiness", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> ReadinessOutcome {
    evaluate_readiness(&state.probes)
}
