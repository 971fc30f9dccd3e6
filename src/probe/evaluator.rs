//! Liveness and readiness decisions.
//!
//! Decisions are made in priority order: the failure toggle first, then the
//! startup flag, then success. Only a successful liveness check has a side
//! effect (recording `livenessProbe` in the clock). Readiness is never
//! time-stamped.

use super::{Probe, ProbeState};
use crate::config::LIVENESS_PROBE;

/// Result of a liveness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivenessOutcome {
    /// Startup finished and no failure is simulated
    Up,
    /// The liveness failure toggle is on
    Down,
    /// Startup has not finished yet
    Starting,
}

impl LivenessOutcome {
    /// Response body. A starting process answers `down` like a failed one;
    /// only the status code tells them apart.
    pub fn body(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down | Self::Starting => "down",
        }
    }

    /// Label shown on the dashboard.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Starting => "starting",
        }
    }

    pub fn is_healthy(self) -> bool {
        self == Self::Up
    }
}

/// Result of a readiness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessOutcome {
    Ready,
    NotReady,
}

impl ReadinessOutcome {
    pub fn body(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::NotReady => "not ready",
        }
    }

    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }
}

/// Decide liveness without touching the probe clock.
pub fn peek_liveness(state: &ProbeState) -> LivenessOutcome {
    if state.toggles().is_active(Probe::Liveness) {
        LivenessOutcome::Down
    } else if !state.is_startup_complete() {
        LivenessOutcome::Starting
    } else {
        LivenessOutcome::Up
    }
}

/// Decide liveness, recording the first successful check.
pub fn evaluate_liveness(state: &ProbeState) -> LivenessOutcome {
    let outcome = peek_liveness(state);
    if outcome.is_healthy() {
        state.clock().record_first_occurrence(LIVENESS_PROBE);
    }
    outcome
}

/// Decide readiness. Has no side effects.
pub fn evaluate_readiness(state: &ProbeState) -> ReadinessOutcome {
    if state.toggles().is_active(Probe::Readiness) || !state.is_startup_complete() {
        ReadinessOutcome::NotReady
    } else {
        ReadinessOutcome::Ready
    }
}

/// Same decision as [`evaluate_readiness`]; named for symmetry with [`peek_liveness`].
pub fn peek_readiness(state: &ProbeState) -> ReadinessOutcome {
    evaluate_readiness(state)
}
