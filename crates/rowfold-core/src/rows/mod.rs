
use crate::{
    collect::{self, CollectConfig, Collected},
    compare::Collation,
    error::Error,
    key::IntoKeySpec,
    sort::{self, SortOutcome},
    value::Value,
};
use derive_more::{Deref, DerefMut, IntoIterator};
use serde::Serialize;

///
/// Rows
///
/// Owned sequence of values with the sorting and grouping operations
/// attached. Plain composition over `Vec<Value>`; derefs to the vector for
/// everything else.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, IntoIterator, PartialEq, Serialize)]
#[into_iterator(owned, ref, ref_mut)]
#[serde(transparent)]
pub struct Rows(Vec<Value>);

impl Rows {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    /// Append one value and return the sequence for further chaining.
    pub fn push_chained(&mut self, value: impl Into<Value>) -> &mut Self {
        self.0.push(value.into());
        self
    }

    /// Replace every element with `f(element)`, in place.
    pub fn map_in_place(&mut self, mut f: impl FnMut(Value) -> Value) -> &mut Self {
        for slot in &mut self.0 {
            *slot = f(std::mem::take(slot));
        }

        self
    }

    /// Stably reorder the sequence by a declarative key spec.
    pub fn sort_by_keys(&mut self, keys: impl IntoKeySpec) -> Result<SortOutcome, Error> {
        sort::sort_by_keys(&mut self.0, keys)
    }

    pub fn sort_by_keys_with(
        &mut self,
        keys: impl IntoKeySpec,
        collation: &dyn Collation,
    ) -> Result<SortOutcome, Error> {
        sort::sort_by_keys_with(&mut self.0, keys, collation)
    }

    /// Group by `keys`, collecting non-key fields under `to`.
    /// The sequence itself is left untouched.
    pub fn collect_groups(
        &self,
        to: &str,
        keys: impl IntoKeySpec,
        presorted: bool,
    ) -> Result<Collected, Error> {
        collect::collect_groups(&self.0, to, keys, presorted)
    }

    pub fn collect_groups_with(
        &self,
        to: &str,
        keys: impl IntoKeySpec,
        config: &CollectConfig,
    ) -> Result<Collected, Error> {
        collect::collect_groups_with(&self.0, to, keys, config)
    }
}

impl From<Vec<Value>> for Rows {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl From<Collected> for Rows {
    fn from(collected: Collected) -> Self {
        collected
            .into_records()
            .into_iter()
            .map(Value::Record)
            .collect()
    }
}

impl FromIterator<Value> for Rows {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<serde_json::Value> for Rows {
    fn from(json: serde_json::Value) -> Self {
        match Value::from(json) {
            Value::List(items) => Self(items),
            Value::Null => Self::new(),
            other => Self(vec![other]),
        }
    }
}
