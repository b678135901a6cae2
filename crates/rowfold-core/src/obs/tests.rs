use crate::{
    collect::collect_groups,
    error::ErrorKind,
    key::canonicalize,
    obs::{MetricsEvent, MetricsSink, OpKind, metrics_report, metrics_reset_all, with_metrics_sink},
    sort::sort_by_keys,
    value::Value,
};
use serde_json::json;
use std::cell::RefCell;

#[derive(Default)]
struct CaptureSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CaptureSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

fn rows(json: serde_json::Value) -> Vec<Value> {
    match Value::from(json) {
        Value::List(items) => items,
        other => vec![other],
    }
}

#[test]
fn global_sink_counts_operations() {
    metrics_reset_all();

    let mut data = rows(json!([{ "g": "b" }, null, { "g": "a" }, { "g": "a" }]));
    collect_groups(&data, "items", "g", false).expect("collect should succeed");
    data.retain(|value| !value.is_null());
    sort_by_keys(&mut data, "g").expect("sort should succeed");
    sort_by_keys(&mut data, &Value::from(json!([]))).expect("empty spec");

    let report = metrics_report();
    assert_eq!(report.ops.collect_calls, 1);
    assert_eq!(report.ops.rows_collected, 4);
    assert_eq!(report.ops.rows_skipped, 1);
    assert_eq!(report.ops.groups_emitted, 2);
    assert_eq!(report.ops.sort_calls, 2);
    assert_eq!(report.ops.sort_noop_calls, 1);
    assert_eq!(report.ops.rows_sorted, 3);
    assert_eq!(report.ops.canonicalize_calls, 3);
    assert_eq!(report.ops.failures, 0);
}

#[test]
fn failures_are_counted_by_kind() {
    metrics_reset_all();

    let data = rows(json!([{ "g": "a" }, { "h": 1 }]));
    collect_groups(&data, "items", "g", true).expect_err("missing key should fail");

    let report = metrics_report();
    assert_eq!(report.ops.failures, 1);
    assert_eq!(
        report
            .failures
            .get(&ErrorKind::MissingKeyAttribute.to_string()),
        Some(&1)
    );
}

#[test]
fn scoped_sink_receives_events_instead_of_global_state() {
    metrics_reset_all();
    let sink = CaptureSink::default();

    let data = rows(json!([{ "g": "a", "v": 1 }]));
    with_metrics_sink(&sink, || {
        collect_groups(&data, "items", "g", true).expect("collect should succeed");
        collect_groups(&data, "items", &Value::from(json!([{}])), true)
            .expect_err("descriptor without name should fail");
    });

    assert_eq!(
        *sink.events.borrow(),
        vec![
            MetricsEvent::Canonicalize { keys: 1 },
            MetricsEvent::Collect {
                rows: 1,
                skipped: 0,
                groups: 1,
            },
            MetricsEvent::Failure {
                op: OpKind::Collect,
                kind: ErrorKind::MissingFieldName,
            },
        ]
    );
    assert_eq!(metrics_report().ops.collect_calls, 0);
}

#[test]
fn direct_canonicalize_failures_are_recorded_once() {
    let sink = CaptureSink::default();

    with_metrics_sink(&sink, || {
        canonicalize(&Value::from(json!([{ "order": "asc" }]))).expect_err("missing name");
        sort_by_keys(&mut rows(json!([{ "g": 1 }])), &Value::from(json!([null])))
            .expect_err("null key item");
    });

    assert_eq!(
        *sink.events.borrow(),
        vec![
            MetricsEvent::Failure {
                op: OpKind::Canonicalize,
                kind: ErrorKind::MissingFieldName,
            },
            MetricsEvent::Failure {
                op: OpKind::Sort,
                kind: ErrorKind::InvalidKeyShape,
            },
        ]
    );
}

#[test]
fn sort_events_carry_the_row_count() {
    let sink = CaptureSink::default();

    let mut data = rows(json!([{ "g": 2 }, { "g": 1 }]));
    with_metrics_sink(&sink, || {
        sort_by_keys(&mut data, "g").expect("sort");
        sort_by_keys(&mut data, &Value::Bool(true)).expect("no keys");
    });

    assert_eq!(
        *sink.events.borrow(),
        vec![
            MetricsEvent::Canonicalize { keys: 1 },
            MetricsEvent::Sort { rows: 2 },
            MetricsEvent::Canonicalize { keys: 0 },
            MetricsEvent::SortNoop,
        ]
    );
}
