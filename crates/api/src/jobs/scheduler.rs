//! Interval scheduler for background jobs.
//!
//! Each registered job gets its own task driven by a tokio interval; a shared
//! watch channel tells all of them to stop. Job failures are logged and the
//! interval keeps ticking, so one bad pass never kills the schedule.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// How often a job runs.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)] // not every cadence has a registered job at all times
pub enum JobFrequency {
    Seconds(u64),
    Minutes(u64),
    Hourly,
    Daily,
}

impl JobFrequency {
    pub fn duration(&self) -> Duration {
        match self {
            JobFrequency::Seconds(secs) => Duration::from_secs(*secs),
            JobFrequency::Minutes(mins) => Duration::from_secs(*mins * 60),
            JobFrequency::Hourly => Duration::from_secs(3600),
            JobFrequency::Daily => Duration::from_secs(86400),
        }
    }
}

/// A unit of periodic work.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    /// Stable name, used in log fields.
    fn name(&self) -> &'static str;

    fn frequency(&self) -> JobFrequency;

    /// One pass. An `Err` is logged; the schedule continues.
    async fn execute(&self) -> Result<(), String>;
}

/// Owns the job tasks and their shutdown signal.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            shutdown_tx,
            shutdown_rx,
            handles: Vec::new(),
        }
    }

    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Spawn one task per registered job.
    pub fn start(&mut self) {
        info!(jobs = self.jobs.len(), "Job scheduler starting");

        for job in &self.jobs {
            let job = Arc::clone(job);
            let shutdown_rx = self.shutdown_rx.clone();
            self.handles.push(tokio::spawn(run_job(job, shutdown_rx)));
        }
    }

    /// Signal every job task to stop after its current pass.
    pub fn shutdown(&self) {
        info!("Stopping background jobs");
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for the job tasks to finish, up to `timeout`.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        let drain = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!("Job task panicked: {}", e);
                }
            }
        };

        match tokio::time::timeout(timeout, drain).await {
            Ok(()) => info!("Background jobs stopped"),
            Err(_) => warn!(?timeout, "Background jobs still running at timeout"),
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_job(job: Arc<dyn Job>, mut shutdown_rx: watch::Receiver<bool>) {
    let name = job.name();
    let frequency = job.frequency();
    let mut interval = tokio::time::interval(frequency.duration());

    // The first tick fires immediately; consume it so the job waits a full
    // period before its first pass.
    interval.tick().await;

    info!(job = name, frequency = ?frequency, "Job registered");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let start = std::time::Instant::now();

                match job.execute().await {
                    Ok(()) => {
                        info!(
                            job = name,
                            elapsed_ms = start.elapsed().as_millis(),
                            "Job pass finished"
                        );
                    }
                    Err(e) => {
                        error!(
                            job = name,
                            elapsed_ms = start.elapsed().as_millis(),
                            error = %e,
                            "Job pass failed"
                        );
                    }
                }
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    info!(job = name, "Job stopped");
                    break;
                }
            }
        }
    }
}
