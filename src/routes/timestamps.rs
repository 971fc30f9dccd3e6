//! First-occurrence timestamps as JSON.

use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// `GET /timestamps`
///
/// Returns `{"probeName": "YYYY-MM-DDTHH:MM:SS", ...}` for every probe event
/// seen so far. A serialization failure only fails this request.
#[instrument(name = "timestamps::timestamps", skip(state))]
pub async fn timestamps(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot = state.probes.clock().snapshot();
    let body = serde_json::to_string(&snapshot)?;
    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}
