//! Observability: per-thread operation counters and the sink abstraction.
//!
//! Operations report through `sink::record`; nothing else in the crate reads
//! or writes the counters.

pub(crate) mod metrics;
pub(crate) mod sink;

#[cfg(test)]
mod tests;

// re-exports
pub use metrics::{EventOps, EventReport, EventState};
pub use sink::{
    MetricsEvent, MetricsSink, OpKind, metrics_report, metrics_reset_all, with_metrics_sink,
};
