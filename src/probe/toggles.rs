//! Simulated-failure switches for the liveness and readiness probes.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use super::Probe;

/// State of a failure toggle after it was flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Activated,
    Deactivated,
}

impl ToggleState {
    fn from_active(active: bool) -> Self {
        if active {
            Self::Activated
        } else {
            Self::Deactivated
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Activated
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activated => "activated",
            Self::Deactivated => "deactivated",
        }
    }

    /// Human-readable message returned by the toggle endpoints.
    pub fn message(self) -> String {
        format!("Simulated failure mode {}.", self.as_str())
    }
}

impl fmt::Display for ToggleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two independent lock-free failure switches.
///
/// There is no invariant across the flags, so each is a plain atomic and
/// flips use a single read-modify-write.
#[derive(Debug, Default)]
pub struct FailureToggles {
    liveness: AtomicBool,
    readiness: AtomicBool,
}

impl FailureToggles {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self, probe: Probe) -> &AtomicBool {
        match probe {
            Probe::Liveness => &self.liveness,
            Probe::Readiness => &self.readiness,
        }
    }

    /// Flip the failure switch for `probe` and return its new state.
    pub fn toggle(&self, probe: Probe) -> ToggleState {
        let previous = self.flag(probe).fetch_xor(true, Ordering::SeqCst);
        ToggleState::from_active(!previous)
    }

    pub fn is_active(&self, probe: Probe) -> bool {
        self.flag(probe).load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_inactive() {
        let toggles = FailureToggles::new();
        assert!(!toggles.is_active(Probe::Liveness));
        assert!(!toggles.is_active(Probe::Readiness));
    }

    #[test]
    fn value_follows_toggle_parity() {
        let toggles = FailureToggles::new();
        for n in 1..=7 {
            let state = toggles.toggle(Probe::Liveness);
            let expected = n % 2 == 1;
            assert_eq!(state.is_active(), expected);
            assert_eq!(toggles.is_active(Probe::Liveness), expected);
        }
    }

    #[test]
    fn flags_are_independent() {
        let toggles = FailureToggles::new();
        assert_eq!(toggles.toggle(Probe::Readiness), ToggleState::Activated);
        assert!(!toggles.is_active(Probe::Liveness));
        assert_eq!(toggles.toggle(Probe::Liveness), ToggleState::Activated);
        assert_eq!(toggles.toggle(Probe::Readiness), ToggleState::Deactivated);
        assert!(toggles.is_active(Probe::Liveness));
    }

    #[test]
    fn messages() {
        assert_eq!(
            ToggleState::Activated.message(),
            "Simulated failure mode activated."
        );
        assert_eq!(
            ToggleState::Deactivated.message(),
            "Simulated failure mode deactivated."
        );
    }

    #[test]
    fn concurrent_flips_lose_no_updates() {
        let toggles = Arc::new(FailureToggles::new());
        let threads = 8;
        let flips_per_thread = 1001;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let toggles = Arc::clone(&toggles);
                thread::spawn(move || {
                    let mut activations = 0usize;
                    for _ in 0..flips_per_thread {
                        if toggles.toggle(Probe::Readiness).is_active() {
                            activations += 1;
                        }
                    }
                    activations
                })
            })
            .collect();

        let activations: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        let total = threads * flips_per_thread;

        // 8 * 1001 flips is even, so the flag returns to its initial value
        assert!(!toggles.is_active(Probe::Readiness));
        // Every flip observed a distinct previous value
        assert_eq!(activations, total / 2);
    }
}
