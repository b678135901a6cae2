//! Multi-key record comparison.
//!
//! One comparator serves both sorting (as a total order over records) and
//! grouping (as the equality test between adjacent records), so "sorted by
//! these keys" and "grouped by these keys" can never disagree.

mod collation;


use crate::{
    error::ErrorKind,
    key::KeySpec,
    value::{Record, Value, ValueKind},
};
use derive_more::Display;
use std::cmp::Ordering;
use thiserror::Error as ThisError;

// re-exports
pub use collation::{BinaryCollation, Collation, CollationKind, LocaleCollation};

///
/// Operand
/// Which side of a comparison a failure refers to.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Operand {
    #[display("left")]
    Left,
    #[display("right")]
    Right,
}

///
/// CompareError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompareError {
    #[error("cannot read attribute '{field}' from the {operand} record")]
    MissingAttribute { field: String, operand: Operand },

    #[error("cannot compare attribute '{field}': {left} and {right} are different kinds")]
    TypeMismatch {
        field: String,
        left: ValueKind,
        right: ValueKind,
    },

    #[error("cannot compare attribute '{field}': values of kind {kind} are not orderable")]
    UnsupportedComparisonType { field: String, kind: ValueKind },
}

impl CompareError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingAttribute { .. } => ErrorKind::MissingAttribute,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::UnsupportedComparisonType { .. } => ErrorKind::UnsupportedComparisonType,
        }
    }
}

///
/// RecordComparator
///
/// Compares records field by field in key-spec order and stops at the first
/// non-equal field. An empty spec makes every pair equal.
///

#[derive(Clone, Copy)]
pub struct RecordComparator<'a> {
    spec: &'a KeySpec,
    collation: &'a dyn Collation,
}

impl<'a> RecordComparator<'a> {
    #[must_use]
    pub const fn new(spec: &'a KeySpec, collation: &'a dyn Collation) -> Self {
        Self { spec, collation }
    }

    #[must_use]
    pub const fn spec(&self) -> &'a KeySpec {
        self.spec
    }

    pub fn compare(&self, left: &Record, right: &Record) -> Result<Ordering, CompareError> {
        for key in self.spec.iter() {
            let field = key.field();
            let (left, right) = read_pair(field, left, right)?;

            let ordering = key.order.apply(compare_field(field, left, right, self.collation)?);
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }

        Ok(Ordering::Equal)
    }

    /// Compare two sequence elements; a non-record element has no fields.
    pub fn compare_values(&self, left: &Value, right: &Value) -> Result<Ordering, CompareError> {
        let (left, right) = self.records(left, right)?;

        self.compare(left, right)
    }

    /// Check every key of the pair without short-circuiting.
    ///
    /// Passing this for one fixed record against every other record of a
    /// sequence means any pair from that sequence compares without error.
    pub fn check(&self, left: &Record, right: &Record) -> Result<(), CompareError> {
        for key in self.spec.iter() {
            let field = key.field();
            let (left, right) = read_pair(field, left, right)?;

            check_kinds(field, left, right)?;
        }

        Ok(())
    }

    fn records<'v>(
        &self,
        left: &'v Value,
        right: &'v Value,
    ) -> Result<(&'v Record, &'v Record), CompareError> {
        let missing = |operand| CompareError::MissingAttribute {
            field: self
                .spec
                .first()
                .map(|key| key.field().to_string())
                .unwrap_or_default(),
            operand,
        };

        let left = left.as_record().ok_or_else(|| missing(Operand::Left))?;
        let right = right.as_record().ok_or_else(|| missing(Operand::Right))?;

        Ok((left, right))
    }
}

/// Compare two records under `spec` using the default locale collation.
pub fn compare(left: &Record, right: &Record, spec: &KeySpec) -> Result<Ordering, CompareError> {
    RecordComparator::new(spec, &LocaleCollation).compare(left, right)
}

fn read_pair<'v>(
    field: &str,
    left: &'v Record,
    right: &'v Record,
) -> Result<(&'v Value, &'v Value), CompareError> {
    let read = |record: &'v Record, operand| {
        record
            .get(field)
            .ok_or_else(|| CompareError::MissingAttribute {
                field: field.to_string(),
                operand,
            })
    };

    Ok((read(left, Operand::Left)?, read(right, Operand::Right)?))
}

fn check_kinds(field: &str, left: &Value, right: &Value) -> Result<ValueKind, CompareError> {
    let (left, right) = (left.kind(), right.kind());
    if left != right {
        return Err(CompareError::TypeMismatch {
            field: field.to_string(),
            left,
            right,
        });
    }
    if !left.is_orderable() {
        return Err(CompareError::UnsupportedComparisonType {
            field: field.to_string(),
            kind: left,
        });
    }

    Ok(left)
}

// Ascending comparison of one field; direction is applied by the caller.
fn compare_field(
    field: &str,
    left: &Value,
    right: &Value,
    collation: &dyn Collation,
) -> Result<Ordering, CompareError> {
    check_kinds(field, left, right)?;

    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => compare_floats(*a, *b),
        (Value::Int(a), Value::Float(b)) => compare_int_float(*a, *b),
        (Value::Float(a), Value::Int(b)) => compare_int_float(*b, *a).reverse(),
        (Value::Text(a), Value::Text(b)) => collation.compare(a, b),
        _ => Ordering::Equal,
    };

    Ok(ordering)
}

// Numeric order with -0.0 == 0.0; NaN sorts past the infinity of its sign.
fn compare_floats(left: f64, right: f64) -> Ordering {
    left.partial_cmp(&right).unwrap_or_else(|| left.total_cmp(&right))
}

// Exact comparison of an integer against a float, without rounding the
// integer through f64.
#[expect(clippy::cast_possible_truncation)]
fn compare_int_float(int: i64, float: f64) -> Ordering {
    // 2^63; every float at or beyond it lies outside the i64 range
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= BOUND {
        return Ordering::Less;
    }
    if float < -BOUND {
        return Ordering::Greater;
    }

    // in range, so the truncation is exact
    let whole = float.trunc();
    int.cmp(&(whole as i64)).then_with(|| {
        if float > whole {
            Ordering::Less
        } else if float < whole {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}
