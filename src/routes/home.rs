//! Dashboard page.

use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::error::AppError;
use crate::probe::evaluator::{peek_liveness, peek_readiness};
use crate::probe::Probe;
use crate::state::AppState;
use crate::templates::DASHBOARD_TEMPLATE;

/// `GET /`
///
/// Initial indicators are computed without recording timestamps; the page
/// then polls the real probe endpoints.
#[instrument(name = "home::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let probes = &state.probes;

    let mut context = tera::Context::new();
    context.insert(
        "liveness_failure",
        &probes.toggles().is_active(Probe::Liveness),
    );
    context.insert(
        "readiness_failure",
        &probes.toggles().is_active(Probe::Readiness),
    );
    context.insert("liveness", peek_liveness(probes).indicator());
    context.insert("readiness", peek_readiness(probes).body());

    let html = state.tera.render(DASHBOARD_TEMPLATE, &context)?;
    Ok(Html(html))
}
