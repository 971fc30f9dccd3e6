//! Simulated slow startup.
//!
//! The startup task runs exactly once in the background. It either burns CPU
//! counting primes or sleeps, then marks the probe state as started, records
//! the `startupProbe` timestamp and writes a marker file for external
//! observers. Its progress is published on a watch channel:
//! `NotStarted -> Running -> Complete`.
//!
//! A marker that cannot be written is reported as an error through the join
//! handle; the caller is expected to treat it as fatal.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::{StartupMode, PRIME_SEARCH_BUDGET, TIMESTAMP_FORMAT};
use crate::probe::ProbeState;

/// How the startup task spends its time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStrategy {
    /// Find `count` primes, giving up once `budget` has elapsed
    Primes { count: u64, budget: Duration },
    /// Sleep for a fixed duration
    Sleep(Duration),
}

impl StartupStrategy {
    /// Build the strategy for `mode`, reading `count` as a prime count or as seconds.
    pub fn from_mode(mode: StartupMode, count: u64) -> Self {
        match mode {
            StartupMode::Primes => Self::Primes {
                count,
                budget: PRIME_SEARCH_BUDGET,
            },
            StartupMode::Sleep => Self::Sleep(Duration::from_secs(count)),
        }
    }
}

/// Lifecycle of the startup task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupPhase {
    NotStarted,
    Running,
    Complete,
}

/// Outcome of the prime search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeSearch {
    pub found: u64,
    pub largest: Option<u64>,
    pub elapsed: Duration,
    /// The search stopped on the time budget before reaching the requested count
    pub budget_exhausted: bool,
}

/// What the startup task did before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupWork {
    Primes(PrimeSearch),
    Slept(Duration),
}

#[derive(Debug, Clone)]
pub struct StartupReport {
    pub work: StartupWork,
    pub elapsed: Duration,
    pub completed_at: DateTime<Local>,
    pub marker_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to write startup marker {}: {source}", path.display())]
    Marker {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Startup task did not run to completion: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

/// One-shot background startup simulation.
pub struct StartupTask {
    strategy: StartupStrategy,
    marker_path: PathBuf,
    probes: Arc<ProbeState>,
}

impl StartupTask {
    pub fn new(strategy: StartupStrategy, marker_path: PathBuf, probes: Arc<ProbeState>) -> Self {
        Self {
            strategy,
            marker_path,
            probes,
        }
    }

    /// Spawn the task on the Tokio runtime. Consumes the task so it can only run once.
    pub fn spawn(self) -> StartupHandle {
        let (phase_tx, phase_rx) = watch::channel(StartupPhase::NotStarted);
        let join = tokio::spawn(self.run(phase_tx));
        StartupHandle {
            phase: phase_rx,
            join,
        }
    }

    async fn run(
        self,
        phase: watch::Sender<StartupPhase>,
    ) -> Result<StartupReport, StartupError> {
        phase.send_replace(StartupPhase::Running);
        let started = Instant::now();
        tracing::info!(strategy = ?self.strategy, "Startup simulation running");

        let work = match self.strategy {
            StartupStrategy::Primes { count, budget } => {
                let search =
                    tokio::task::spawn_blocking(move || count_primes(count, budget)).await?;
                if search.budget_exhausted {
                    tracing::warn!(
                        requested = count,
                        found = search.found,
                        budget_secs = budget.as_secs(),
                        "Prime search stopped on its time budget"
                    );
                }
                StartupWork::Primes(search)
            }
            StartupStrategy::Sleep(duration) => {
                tokio::time::sleep(duration).await;
                StartupWork::Slept(duration)
            }
        };

        self.probes.mark_startup_complete();

        let completed_at = Local::now();
        write_marker(&self.marker_path, completed_at).await?;

        phase.send_replace(StartupPhase::Complete);

        let report = StartupReport {
            work,
            elapsed: started.elapsed(),
            completed_at,
            marker_path: self.marker_path,
        };
        tracing::info!(
            elapsed_ms = report.elapsed.as_millis() as u64,
            marker = %report.marker_path.display(),
            "Startup complete"
        );
        Ok(report)
    }
}

/// Handle to a spawned startup task. Dropping it does not cancel the task.
pub struct StartupHandle {
    phase: watch::Receiver<StartupPhase>,
    join: JoinHandle<Result<StartupReport, StartupError>>,
}

impl StartupHandle {
    pub fn phase(&self) -> StartupPhase {
        *self.phase.borrow()
    }

    /// Receiver for phase changes, for observers that outlive the handle.
    pub fn subscribe(&self) -> watch::Receiver<StartupPhase> {
        self.phase.clone()
    }

    /// Wait for the task to finish and return its report or error.
    pub async fn wait(self) -> Result<StartupReport, StartupError> {
        self.join.await?
    }
}

async fn write_marker(path: &Path, at: DateTime<Local>) -> Result<(), StartupError> {
    let contents = format!("Startup complete at {}", at.format(TIMESTAMP_FORMAT));
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| StartupError::Marker {
            path: path.to_path_buf(),
            source,
        })
}

/// Count primes by trial division until `limit` are found or `budget` elapses.
pub fn count_primes(limit: u64, budget: Duration) -> PrimeSearch {
    let start = Instant::now();
    let mut found = 0;
    let mut largest = None;
    let mut candidate = 2u64;

    while found < limit {
        if is_prime(candidate) {
            found += 1;
            largest = Some(candidate);
            tracing::trace!(count = found, prime = candidate, "Prime found");
        }
        if start.elapsed() > budget {
            break;
        }
        candidate += 1;
    }

    PrimeSearch {
        found,
        largest,
        elapsed: start.elapsed(),
        budget_exhausted: found < limit,
    }
}

pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2u64;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}
