//! Declarative multi-key sort.
//!
//! Ordering is computed over a permutation and only applied once every
//! comparison has succeeded, so a failed sort leaves the sequence as it was.


use crate::{
    compare::{Collation, CompareError, LocaleCollation, Operand, RecordComparator},
    error::Error,
    key::IntoKeySpec,
    obs::sink::{self, MetricsEvent, OpKind},
    value::{Record, Value},
};
use std::cmp::Ordering;

///
/// SortOutcome
///
/// NoKeys → the canonical spec was empty; nothing was reordered.
/// Sorted → the sequence is now ordered by the spec.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortOutcome {
    NoKeys,
    Sorted,
}

/// Stably sort `rows` in place by a declarative key spec, comparing text with
/// the default locale collation.
pub fn sort_by_keys(rows: &mut [Value], keys: impl IntoKeySpec) -> Result<SortOutcome, Error> {
    sort_by_keys_with(rows, keys, &LocaleCollation)
}

/// Stably sort `rows` in place by a declarative key spec.
pub fn sort_by_keys_with(
    rows: &mut [Value],
    keys: impl IntoKeySpec,
    collation: &dyn Collation,
) -> Result<SortOutcome, Error> {
    sink::record_failure(OpKind::Sort, sort_rows(rows, keys, collation))
}

fn sort_rows(
    rows: &mut [Value],
    keys: impl IntoKeySpec,
    collation: &dyn Collation,
) -> Result<SortOutcome, Error> {
    let spec = keys.into_key_spec()?;
    if spec.is_empty() {
        sink::record(MetricsEvent::SortNoop);

        return Ok(SortOutcome::NoKeys);
    }

    let comparator = RecordComparator::new(&spec, collation);
    let mut indexed = rows
        .iter()
        .enumerate()
        .map(|(position, value)| {
            element_record(&comparator, position, value).map(|record| (position, record))
        })
        .collect::<Result<Vec<_>, _>>()?;
    stable_sort(
        &mut indexed,
        |entry: &(usize, &Record)| entry.1,
        &comparator,
    )?;

    let positions: Vec<usize> = indexed.into_iter().map(|(position, _)| position).collect();
    apply_permutation(rows, &positions);

    sink::record(MetricsEvent::Sort {
        rows: rows.len() as u64,
    });

    Ok(SortOutcome::Sorted)
}

/// Stable sort of arbitrary items by the record each one projects to.
///
/// Every item is checked against the first one before sorting, so the
/// comparator cannot fail partway through and the order handed to
/// `sort_by` is always total.
pub(crate) fn stable_sort<T>(
    items: &mut [T],
    record: impl Fn(&T) -> &Record,
    comparator: &RecordComparator<'_>,
) -> Result<(), CompareError> {
    let Some((first, rest)) = items.split_first() else {
        return Ok(());
    };
    let pivot = record(first);
    for item in rest {
        comparator.check(pivot, record(item))?;
    }

    let mut failure = None;
    items.sort_by(|left, right| {
        if failure.is_some() {
            return Ordering::Equal;
        }
        comparator
            .compare(record(left), record(right))
            .unwrap_or_else(|err| {
                failure = Some(err);
                Ordering::Equal
            })
    });

    failure.map_or(Ok(()), Err)
}

fn element_record<'v>(
    comparator: &RecordComparator<'_>,
    position: usize,
    value: &'v Value,
) -> Result<&'v Record, CompareError> {
    value.as_record().ok_or_else(|| {
        let field = comparator
            .spec()
            .first()
            .map(|key| key.field().to_string())
            .unwrap_or_default();

        CompareError::MissingAttribute {
            field,
            operand: if position == 0 {
                Operand::Left
            } else {
                Operand::Right
            },
        }
    })
}

fn apply_permutation(rows: &mut [Value], positions: &[usize]) {
    let mut staged: Vec<Value> = rows.iter_mut().map(std::mem::take).collect();
    for (slot, &position) in rows.iter_mut().zip(positions) {
        *slot = std::mem::take(&mut staged[position]);
    }
}
