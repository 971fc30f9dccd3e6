//! Probe state shared by request handlers and the startup task.
//!
//! `ProbeState` bundles the three pieces of mutable state behind the probe
//! endpoints: the one-way startup flag, the failure toggles and the
//! first-occurrence clock. Each field is synchronized on its own; no operation
//! spans more than one of them, so a reader may see a toggle flipped while
//! startup is still running.

pub mod clock;
pub mod evaluator;
pub mod toggles;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

pub use clock::ProbeClock;
pub use evaluator::{LivenessOutcome, ReadinessOutcome};
pub use toggles::{FailureToggles, ToggleState};

use crate::config::STARTUP_PROBE;

/// Probe kinds that can be forced to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Liveness,
    Readiness,
}

impl Probe {
    pub fn as_str(self) -> &'static str {
        match self {
            Probe::Liveness => "liveness",
            Probe::Readiness => "readiness",
        }
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide probe state. Construct one per process (or per test) and
/// share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct ProbeState {
    startup_complete: AtomicBool,
    toggles: FailureToggles,
    clock: ProbeClock,
}

impl ProbeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_startup_complete(&self) -> bool {
        self.startup_complete.load(Ordering::SeqCst)
    }

    /// Mark startup as finished and record the `startupProbe` timestamp.
    ///
    /// Only the first call has any effect; it returns `true`.
    pub fn mark_startup_complete(&self) -> bool {
        let transitioned = self
            .startup_complete
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if transitioned {
            self.clock.record_first_occurrence(STARTUP_PROBE);
        }
        transitioned
    }

    pub fn toggles(&self) -> &FailureToggles {
        &self.toggles
    }

    pub fn clock(&self) -> &ProbeClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_completes_once() {
        let state = ProbeState::new();
        assert!(!state.is_startup_complete());
        assert!(state.clock().snapshot().is_empty());

        assert!(state.mark_startup_complete());
        let first = state.clock().get(STARTUP_PROBE);
        assert!(first.is_some());

        assert!(!state.mark_startup_complete());
        assert!(state.is_startup_complete());
        assert_eq!(state.clock().get(STARTUP_PROBE), first);
    }
}
