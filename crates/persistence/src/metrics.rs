//! Connection pool gauges.

use metrics::gauge;
use sqlx::PgPool;

/// Export current pool occupancy as Prometheus gauges, labeled by state.
/// Intended to be called periodically by a background job.
pub fn record_pool_metrics(pool: &PgPool) {
    let total = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("db_pool_connections", "state" => "active").set(total.saturating_sub(idle) as f64);
    gauge!("db_pool_connections", "state" => "idle").set(idle as f64);
    gauge!("db_pool_connections", "state" => "total").set(total as f64);
}
