//! Background job scheduler for Sexton.
//!
//! This module provides the scheduled decay sweep over company records.
//! Requires the `background-jobs` feature to be enabled.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sexton::jobs::{JobScheduler, JobConfig};
//! use sexton::server::{CompanyRepository, Database};
//!
//! let db = Database::new().await?;
//! let repo = Arc::new(CompanyRepository::new(db));
//! let scheduler = JobScheduler::new(repo, JobConfig::default()).await?;
//! scheduler.start().await?;
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler as TokioJobScheduler};
use tracing::{error, info, warn};

use crate::server::repository::CompanyRepository;

mod decay_sweep;

pub use decay_sweep::run_decay_sweep;

/// Configuration for background jobs.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Cron expression for the decay sweep (default: daily at 2 AM)
    pub decay_cron: String,
    /// Skip a tick while a previous sweep is still running (default: true).
    /// Set to false to allow overlapping sweeps, at the cost of possible
    /// double-decrements when a sweep outlives the tick interval.
    pub prevent_overlap: bool,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            // Daily at 2 AM
            decay_cron: "0 0 2 * * *".to_string(),
            prevent_overlap: true,
        }
    }
}

/// Background job scheduler for Sexton.
pub struct JobScheduler {
    scheduler: TokioJobScheduler,
    repo: Arc<CompanyRepository>,
    config: JobConfig,
    sweep_guard: Arc<Mutex<()>>,
}

impl JobScheduler {
    /// Create a new job scheduler.
    pub async fn new(repo: Arc<CompanyRepository>, config: JobConfig) -> Result<Self, JobError> {
        let scheduler = TokioJobScheduler::new()
            .await
            .map_err(|e| JobError::SchedulerError(e.to_string()))?;

        Ok(Self {
            scheduler,
            repo,
            config,
            sweep_guard: Arc::new(Mutex::new(())),
        })
    }

    /// Start the job scheduler with all configured jobs.
    pub async fn start(&self) -> Result<(), JobError> {
        info!("Starting Sexton job scheduler");

        self.add_decay_job().await?;

        self.scheduler
            .start()
            .await
            .map_err(|e| JobError::SchedulerError(e.to_string()))?;

        info!("Sexton job scheduler started successfully");

        Ok(())
    }

    /// Stop the job scheduler.
    pub async fn shutdown(&mut self) -> Result<(), JobError> {
        info!("Shutting down Sexton job scheduler");
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| JobError::SchedulerError(e.to_string()))?;
        Ok(())
    }

    /// Add the decay sweep job.
    async fn add_decay_job(&self) -> Result<(), JobError> {
        let repo = Arc::clone(&self.repo);
        let guard = Arc::clone(&self.sweep_guard);
        let prevent_overlap = self.config.prevent_overlap;

        let job = Job::new_async(self.config.decay_cron.as_str(), move |_uuid, _l| {
            let repo = Arc::clone(&repo);
            let guard = Arc::clone(&guard);
            Box::pin(async move {
                info!("Running decay sweep");

                match try_run_guarded(&repo, &guard, prevent_overlap).await {
                    None => {
                        warn!("Previous decay sweep still running, skipping this tick");
                    }
                    Some(Ok(count)) => {
                        if count > 0 {
                            info!("Decay sweep: {} companies updated", count);
                        }
                    }
                    Some(Err(e)) => {
                        error!("Decay sweep failed: {}", e);
                    }
                }
            })
        })
        .map_err(|e| JobError::SchedulerError(e.to_string()))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| JobError::SchedulerError(e.to_string()))?;

        info!(
            "Added decay sweep job (schedule: {}, prevent_overlap: {})",
            self.config.decay_cron, self.config.prevent_overlap
        );

        Ok(())
    }

    /// Run the decay sweep immediately (useful for testing or manual
    /// triggers). Waits for any in-flight sweep instead of skipping.
    pub async fn run_decay_sweep_now(&self) -> Result<u32, JobError> {
        let _lock = self.sweep_guard.lock().await;
        run_decay_sweep(&self.repo).await
    }
}

/// Run one sweep under the overlap guard.
///
/// Returns `None` when `prevent_overlap` is set and a sweep already holds
/// the guard; the caller decides whether that is worth a warning.
pub async fn try_run_guarded(
    repo: &CompanyRepository,
    guard: &Mutex<()>,
    prevent_overlap: bool,
) -> Option<Result<u32, JobError>> {
    let _held = if prevent_overlap {
        match guard.try_lock() {
            Ok(lock) => Some(lock),
            Err(_) => return None,
        }
    } else {
        None
    };

    Some(run_decay_sweep(repo).await)
}

/// Errors that can occur in the job scheduler.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Scheduler error: {0}")]
    SchedulerError(String),

    #[error("Store error: {0}")]
    StoreError(String),
}

impl From<crate::errors::SextonError> for JobError {
    fn from(err: crate::errors::SextonError) -> Self {
        JobError::StoreError(err.to_string())
    }
}
