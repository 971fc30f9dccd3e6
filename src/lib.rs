//! Valkyrie - probe simulation server
//!
//! An HTTP service that answers liveness, readiness and startup probes the way
//! an orchestrator expects, with switches to simulate failures. Useful for
//! exercising deployment tooling and health-check configuration.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod probe;
pub mod routes;
pub mod startup;
pub mod state;
pub mod templates;

pub use error::AppError;
pub use probe::ProbeState;
pub use state::AppState;
