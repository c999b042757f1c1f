//! HTTP middleware components.

pub mod logging;
pub mod metrics;
pub mod trace_id;

pub use metrics::{metrics_handler, metrics_middleware};
pub use trace_id::trace_id;
