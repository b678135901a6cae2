//! Metrics sink boundary.
//!
//! Sequence operations MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{error::ErrorKind, obs::metrics};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// OpKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpKind {
    Canonicalize,
    Sort,
    Collect,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Canonicalize {
        keys: u64,
    },
    Sort {
        rows: u64,
    },
    SortNoop,
    Collect {
        rows: u64,
        skipped: u64,
        groups: u64,
    },
    Failure {
        op: OpKind,
        kind: ErrorKind,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the metrics counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::Canonicalize { keys } => {
                m.ops.canonicalize_calls = m.ops.canonicalize_calls.saturating_add(1);
                m.ops.keys_canonicalized = m.ops.keys_canonicalized.saturating_add(keys);
            }

            MetricsEvent::Sort { rows } => {
                m.ops.sort_calls = m.ops.sort_calls.saturating_add(1);
                m.ops.rows_sorted = m.ops.rows_sorted.saturating_add(rows);
            }

            MetricsEvent::SortNoop => {
                m.ops.sort_calls = m.ops.sort_calls.saturating_add(1);
                m.ops.sort_noop_calls = m.ops.sort_noop_calls.saturating_add(1);
            }

            MetricsEvent::Collect {
                rows,
                skipped,
                groups,
            } => {
                m.ops.collect_calls = m.ops.collect_calls.saturating_add(1);
                m.ops.rows_collected = m.ops.rows_collected.saturating_add(rows);
                m.ops.rows_skipped = m.ops.rows_skipped.saturating_add(skipped);
                m.ops.groups_emitted = m.ops.groups_emitted.saturating_add(groups);
            }

            MetricsEvent::Failure { op: _, kind } => {
                m.ops.failures = m.ops.failures.saturating_add(1);
                let entry = m.failures.entry(kind.to_string()).or_default();
                *entry = entry.saturating_add(1);
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - Only a shared reference is materialized, matching the shared borrow
        //   used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Record `Failure` for an error result and pass the result through.
pub(crate) fn record_failure<T>(
    op: OpKind,
    result: Result<T, crate::error::Error>,
) -> Result<T, crate::error::Error> {
    result.inspect_err(|err| record(MetricsEvent::Failure {
        op,
        kind: err.kind(),
    }))
}

/// Snapshot the current thread's metrics counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset the current thread's metrics counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // Preconditions:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    //
    // What would break this:
    // - Any deferred use of `sink_ptr` beyond this scope.
    // - Any path that bypasses Guard restoration.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}
