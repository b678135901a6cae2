use serde::{Deserialize, Serialize};
use std::{borrow::Cow, cmp::Ordering};

///
/// Collation
///
/// Text ordering provider used by the comparator. Implementations must be a
/// total order: the sort relies on it.
///

pub trait Collation {
    fn compare(&self, left: &str, right: &str) -> Ordering;
}

///
/// LocaleCollation
///
/// Case-insensitive primary ordering with a case tie-break that puts
/// lowercase ahead of uppercase ("a" < "A" < "b").
///

#[derive(Clone, Copy, Debug, Default)]
pub struct LocaleCollation;

impl LocaleCollation {
    fn fold(s: &str) -> Cow<'_, str> {
        if s.is_ascii() {
            return Cow::Owned(s.to_ascii_lowercase());
        }

        // NOTE: lowercase mapping only; no accent folding or NFKC.
        Cow::Owned(s.to_lowercase())
    }
}

impl Collation for LocaleCollation {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        Self::fold(left)
            .cmp(&Self::fold(right))
            .then_with(|| right.cmp(left))
    }
}

///
/// BinaryCollation
/// Plain byte-wise ordering.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryCollation;

impl Collation for BinaryCollation {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        left.cmp(right)
    }
}

///
/// CollationKind
///
/// Configuration-facing selector for the built-in collations.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollationKind {
    #[default]
    Locale,
    Binary,
}

impl CollationKind {
    #[must_use]
    pub const fn collation(self) -> &'static dyn Collation {
        match self {
            Self::Locale => &LocaleCollation,
            Self::Binary => &BinaryCollation,
        }
    }
}
