//! Key specifications: the canonical `(name, direction)` list that drives both
//! ordering and grouping, and the canonicalizer that produces it from loosely
//! shaped caller input.

mod canonical;


use crate::{
    error::ErrorKind,
    value::{Record, Value},
};
use derive_more::{Deref, IntoIterator};
use std::{cmp::Ordering, collections::BTreeSet, fmt};
use thiserror::Error as ThisError;

// re-exports
pub use canonical::canonicalize;

///
/// KeySpecError
///
/// Failures raised while canonicalizing a raw key specification.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum KeySpecError {
    #[error("key at index {index} does not contain attribute \"name\"")]
    MissingFieldName { index: usize },

    #[error("key at index {index} has invalid order {value}")]
    InvalidOrderValue { index: usize, value: Value },

    #[error("key at index {index} is neither a field name nor a key descriptor")]
    InvalidKeyShape { index: usize },

    #[error("key at index {index} repeats field '{name}'")]
    DuplicateKeyName { index: usize, name: String },
}

impl KeySpecError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFieldName { .. } => ErrorKind::MissingFieldName,
            Self::InvalidOrderValue { .. } => ErrorKind::InvalidOrderValue,
            Self::InvalidKeyShape { .. } => ErrorKind::InvalidKeyShape,
            Self::DuplicateKeyName { .. } => ErrorKind::DuplicateKeyName,
        }
    }
}

///
/// Direction
///
/// Sort direction of one key. Ascending is the default for bare names and for
/// descriptors without an explicit order.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Signed multiplier form (`1` / `-1`).
    #[must_use]
    pub const fn sign(self) -> i64 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }

    /// Apply this direction to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Parse a descriptor `order` value.
    ///
    /// Accepts the tokens `asc`/`ascending`/`desc`/`descending` and any
    /// strictly positive or negative number. Zero, NaN and every other value
    /// are rejected.
    #[must_use]
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::Text(token) => match token.as_str() {
                "asc" | "ascending" => Some(Self::Asc),
                "desc" | "descending" => Some(Self::Desc),
                _ => None,
            },
            Value::Int(n) => match n.signum() {
                1 => Some(Self::Asc),
                -1 => Some(Self::Desc),
                _ => None,
            },
            Value::Float(f) if *f > 0.0 => Some(Self::Asc),
            Value::Float(f) if *f < 0.0 => Some(Self::Desc),
            _ => None,
        }
    }
}

///
/// KeyName
///
/// Field name of one key.
///
/// Text   → the caller named the field with text.
/// Coerced→ the caller used a non-text scalar (number, bool, null); the field
///          looked up is its rendered form. Grouping rejects coerced names.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum KeyName {
    Text(String),
    Coerced(String),
}

impl KeyName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(name) | Self::Coerced(name) => name,
        }
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Text(name) => Value::Text(name.clone()),
            Self::Coerced(rendered) => canonical::parse_coerced(rendered),
        }
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// SortKey
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SortKey {
    pub name: KeyName,
    pub order: Direction,
}

impl SortKey {
    #[must_use]
    pub const fn new(name: KeyName, order: Direction) -> Self {
        Self { name, order }
    }

    #[must_use]
    pub fn asc(name: impl Into<String>) -> Self {
        Self::new(KeyName::Text(name.into()), Direction::Asc)
    }

    #[must_use]
    pub fn desc(name: impl Into<String>) -> Self {
        Self::new(KeyName::Text(name.into()), Direction::Desc)
    }

    #[must_use]
    pub fn field(&self) -> &str {
        self.name.as_str()
    }

    /// Render as a `{name, order}` descriptor record.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Record(Record::from([
            ("name", self.name.to_value()),
            ("order", Value::Int(self.order.sign())),
        ]))
    }
}

///
/// KeySpec
///
/// Canonical key specification. Entry order defines tie-break precedence.
/// Duplicate names are allowed and unchecked unless a caller opts into
/// `reject_duplicates`.
///

#[derive(Clone, Debug, Default, Deref, Eq, Hash, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct KeySpec(Vec<SortKey>);

impl KeySpec {
    #[must_use]
    pub const fn new(keys: Vec<SortKey>) -> Self {
        Self(keys)
    }

    #[must_use]
    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    /// Render as a list of descriptor records; canonicalizing the result
    /// yields an equal spec.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::List(self.0.iter().map(SortKey::to_value).collect())
    }

    /// Fail on the first key whose field name already appeared earlier.
    pub fn reject_duplicates(&self) -> Result<(), KeySpecError> {
        let mut seen = BTreeSet::new();
        for (index, key) in self.0.iter().enumerate() {
            if !seen.insert(key.field()) {
                return Err(KeySpecError::DuplicateKeyName {
                    index,
                    name: key.field().to_string(),
                });
            }
        }

        Ok(())
    }
}

///
/// IntoKeySpec
///
/// Anything a caller may pass where a key specification is expected.
/// Already-canonical specs pass through unchanged; loosely shaped values go
/// through `canonicalize`.
///

pub trait IntoKeySpec {
    fn into_key_spec(self) -> Result<KeySpec, KeySpecError>;
}

impl IntoKeySpec for KeySpec {
    fn into_key_spec(self) -> Result<KeySpec, KeySpecError> {
        Ok(self)
    }
}

impl IntoKeySpec for &KeySpec {
    fn into_key_spec(self) -> Result<KeySpec, KeySpecError> {
        Ok(self.clone())
    }
}

impl IntoKeySpec for SortKey {
    fn into_key_spec(self) -> Result<KeySpec, KeySpecError> {
        Ok(KeySpec::new(vec![self]))
    }
}

impl IntoKeySpec for Vec<SortKey> {
    fn into_key_spec(self) -> Result<KeySpec, KeySpecError> {
        Ok(KeySpec::new(self))
    }
}

impl IntoKeySpec for &Value {
    fn into_key_spec(self) -> Result<KeySpec, KeySpecError> {
        canonical::canonicalize_raw(self)
    }
}

impl IntoKeySpec for Value {
    fn into_key_spec(self) -> Result<KeySpec, KeySpecError> {
        canonical::canonicalize_raw(&self)
    }
}

impl IntoKeySpec for &str {
    fn into_key_spec(self) -> Result<KeySpec, KeySpecError> {
        canonical::canonicalize_raw(&Value::from(self))
    }
}

impl IntoKeySpec for &[&str] {
    fn into_key_spec(self) -> Result<KeySpec, KeySpecError> {
        canonical::canonicalize_raw(&Value::from(self.to_vec()))
    }
}

impl<const N: usize> IntoKeySpec for [&str; N] {
    fn into_key_spec(self) -> Result<KeySpec, KeySpecError> {
        canonical::canonicalize_raw(&Value::from(self.to_vec()))
    }
}
