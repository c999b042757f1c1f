//! Background jobs.

pub mod expiry_recompute;
pub mod pool_metrics;
pub mod scheduler;

pub use expiry_recompute::ExpiryRecomputeJob;
pub use pool_metrics::PoolMetricsJob;
pub use scheduler::JobScheduler;
