//! Single-pass group-collect (`GROUP BY` with `COLLECT` semantics).
//!
//! Records sharing equal key values are merged into one group record holding
//! the key fields plus a caller-named list of the remaining fields of every
//! member. Grouping is a linear scan over key-ordered input: a new group
//! starts exactly when the comparator reports the current keys differ from
//! the last group's keys.

mod config;


use crate::{
    compare::RecordComparator,
    error::{Error, ErrorKind},
    key::{IntoKeySpec, KeySpec},
    obs::sink::{self, MetricsEvent, OpKind},
    sort,
    value::{Record, Value},
};
use std::cmp::Ordering;
use thiserror::Error as ThisError;

// re-exports
pub use config::CollectConfig;

///
/// CollectError
///
/// Group-collect failures not already covered by key-spec or comparison
/// errors. Element indexes refer to positions in the caller's input.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CollectError {
    #[error("aggregation key at index {index} must be a non-empty text field name")]
    InvalidKeyName { index: usize },

    #[error("element #{element} lacks key attribute '{field}'")]
    MissingKeyAttribute { element: usize, field: String },

    #[error("element #{element} breaks the declared key order of presorted input")]
    UnsortedInput { element: usize },

    #[error("group-collect exceeded the limit of {limit} groups")]
    GroupLimitExceeded { limit: u64 },
}

impl CollectError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidKeyName { .. } => ErrorKind::InvalidKeyName,
            Self::MissingKeyAttribute { .. } => ErrorKind::MissingKeyAttribute,
            Self::UnsortedInput { .. } => ErrorKind::UnsortedInput,
            Self::GroupLimitExceeded { .. } => ErrorKind::GroupLimitExceeded,
        }
    }
}

///
/// Collected
///
/// Whole  → the key spec was empty; the entire input is wrapped unchanged as
///          `{ to: [input] }`.
/// Groups → one record per group, in scan order.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Collected {
    Whole(Record),
    Groups(Vec<Record>),
}

impl Collected {
    #[must_use]
    pub const fn group_count(&self) -> usize {
        match self {
            Self::Whole(_) => 1,
            Self::Groups(groups) => groups.len(),
        }
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::Whole(record) => vec![record],
            Self::Groups(groups) => groups,
        }
    }
}

/// Group `rows` by `keys`, collecting non-key fields under `to`.
///
/// `presorted` skips the sort; the caller then guarantees key order.
pub fn collect_groups(
    rows: &[Value],
    to: &str,
    keys: impl IntoKeySpec,
    presorted: bool,
) -> Result<Collected, Error> {
    collect_groups_with(
        rows,
        to,
        keys,
        &CollectConfig::new().with_presorted(presorted),
    )
}

/// Group `rows` by `keys` under an explicit policy.
pub fn collect_groups_with(
    rows: &[Value],
    to: &str,
    keys: impl IntoKeySpec,
    config: &CollectConfig,
) -> Result<Collected, Error> {
    sink::record_failure(OpKind::Collect, collect_rows(rows, to, keys, config))
}

fn collect_rows(
    rows: &[Value],
    to: &str,
    keys: impl IntoKeySpec,
    config: &CollectConfig,
) -> Result<Collected, Error> {
    let spec = keys.into_key_spec()?;
    if spec.is_empty() {
        let whole = Record::from([(to, Value::List(vec![Value::List(rows.to_vec())]))]);
        sink::record(MetricsEvent::Collect {
            rows: rows.len() as u64,
            skipped: 0,
            groups: 1,
        });

        return Ok(Collected::Whole(whole));
    }

    validate_key_names(&spec)?;
    if config.reject_duplicate_keys() {
        spec.reject_duplicates()?;
    }

    let comparator = RecordComparator::new(&spec, config.collation().collation());
    let mut candidates = split_candidates(rows, &spec)?;
    let skipped = rows.len() - candidates.len();

    if !config.presorted() {
        sort::stable_sort(
            &mut candidates,
            |candidate: &Candidate| &candidate.keys,
            &comparator,
        )?;
    } else if config.verify_presorted() {
        verify_order(&candidates, &comparator)?;
    }

    let groups = fold_groups(candidates, &comparator, config.max_groups())?;
    sink::record(MetricsEvent::Collect {
        rows: rows.len() as u64,
        skipped: skipped as u64,
        groups: groups.len() as u64,
    });

    Ok(Collected::Groups(
        groups
            .into_iter()
            .map(|group| group.into_record(to))
            .collect(),
    ))
}

fn validate_key_names(spec: &KeySpec) -> Result<(), CollectError> {
    match spec
        .iter()
        .position(|key| !key.name.is_text() || key.field().is_empty())
    {
        Some(index) => Err(CollectError::InvalidKeyName { index }),
        None => Ok(()),
    }
}

///
/// Candidate
///
/// One non-null input element split into its key fields and the remaining
/// fields. Built from clones; the caller's records are never modified.
///

struct Candidate {
    element: usize,
    keys: Record,
    item: Record,
}

impl Candidate {
    fn split(element: usize, value: &Value, spec: &KeySpec) -> Result<Self, CollectError> {
        let record = value.as_record();

        let mut keys = Record::with_capacity(spec.len());
        for key in spec.iter() {
            let field = key.field();
            let key_value = record.and_then(|record| record.get(field)).ok_or_else(|| {
                CollectError::MissingKeyAttribute {
                    element,
                    field: field.to_string(),
                }
            })?;
            keys.insert(field, key_value.clone());
        }

        let item = record
            .into_iter()
            .flat_map(Record::iter)
            .filter(|(name, _)| !keys.contains(name))
            .map(|(name, value)| (name, value.clone()))
            .collect();

        Ok(Self {
            element,
            keys,
            item,
        })
    }
}

// Null elements carry nothing to group and are dropped before the scan.
fn split_candidates(rows: &[Value], spec: &KeySpec) -> Result<Vec<Candidate>, CollectError> {
    rows.iter()
        .enumerate()
        .filter(|(_, value)| !value.is_null())
        .map(|(element, value)| Candidate::split(element, value, spec))
        .collect()
}

fn verify_order(
    candidates: &[Candidate],
    comparator: &RecordComparator<'_>,
) -> Result<(), Error> {
    for pair in candidates.windows(2) {
        if comparator.compare(&pair[0].keys, &pair[1].keys)? == Ordering::Greater {
            return Err(CollectError::UnsortedInput {
                element: pair[1].element,
            }
            .into());
        }
    }

    Ok(())
}

///
/// Group
///

struct Group {
    keys: Record,
    items: Vec<Value>,
}

impl Group {
    fn into_record(self, to: &str) -> Record {
        let mut record = self.keys;
        record.insert(to, Value::List(self.items));

        record
    }
}

fn fold_groups(
    candidates: Vec<Candidate>,
    comparator: &RecordComparator<'_>,
    max_groups: Option<u64>,
) -> Result<Vec<Group>, Error> {
    let mut groups: Vec<Group> = Vec::new();

    for candidate in candidates {
        let joins_last = match groups.last() {
            Some(last) => comparator.compare(&candidate.keys, &last.keys)?.is_eq(),
            None => false,
        };

        if joins_last {
            if let Some(last) = groups.last_mut() {
                last.items.push(Value::Record(candidate.item));
            }
            continue;
        }

        if let Some(limit) = max_groups
            && groups.len() as u64 >= limit
        {
            return Err(CollectError::GroupLimitExceeded { limit }.into());
        }

        groups.push(Group {
            keys: candidate.keys,
            items: vec![Value::Record(candidate.item)],
        });
    }

    Ok(groups)
}
