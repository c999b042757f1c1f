//! Connection pool gauge export job.

use persistence::metrics::record_pool_metrics;
use sqlx::PgPool;

use super::scheduler::{Job, JobFrequency};

/// Background job that exports database pool gauges for Prometheus.
pub struct PoolMetricsJob {
    pool: PgPool,
}

impl PoolMetricsJob {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Job for PoolMetricsJob {
    fn name(&self) -> &'static str {
        "pool_metrics"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(30)
    }

    async fn execute(&self) -> Result<(), String> {
        record_pool_metrics(&self.pool);
        Ok(())
    }
}
