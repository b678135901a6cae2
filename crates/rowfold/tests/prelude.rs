use rowfold::prelude::*;
use serde_json::json;

#[test]
fn prelude_covers_sort_and_collect() {
    let mut rows = Rows::from(json!([
        { "dept": "ops", "name": "kim" },
        { "dept": "dev", "name": "ada" },
        { "dept": "ops", "name": "lee" },
    ]));

    rows.sort_by_keys(["dept", "name"]).expect("sort should succeed");
    let grouped = rows
        .collect_groups("staff", "dept", true)
        .expect("collect should succeed");

    assert_eq!(grouped.group_count(), 2);
    assert!(metrics_report().ops.collect_calls >= 1);
}

#[test]
fn version_matches_the_package() {
    assert_eq!(rowfold::VERSION, env!("CARGO_PKG_VERSION"));
}
