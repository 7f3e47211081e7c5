//! Observability module
//!
//! Logging and metrics for the roulette service.

pub mod logging;
pub mod metrics;

pub use logging::{LogFormat, init_logging};
pub use metrics::init_metrics;
