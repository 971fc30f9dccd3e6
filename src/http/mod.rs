//! HTTP server module.
//!
//! Serves plain HTTP and shuts down gracefully on SIGTERM/SIGINT, draining
//! in-flight requests (including deliberately delayed liveness checks).

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
