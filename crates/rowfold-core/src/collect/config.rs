use crate::compare::CollationKind;
use serde::{Deserialize, Serialize};

///
/// CollectConfig
///
/// Caller policy for one group-collect call.
///
/// `presorted` trusts the caller: unsorted input then fragments into several
/// groups per key. `verify_presorted` turns that contract into a checked
/// failure instead. `max_groups` is a hard limit on emitted groups.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct CollectConfig {
    presorted: bool,
    verify_presorted: bool,
    reject_duplicate_keys: bool,
    max_groups: Option<u64>,
    collation: CollationKind,
}

impl CollectConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            presorted: false,
            verify_presorted: false,
            reject_duplicate_keys: false,
            max_groups: None,
            collation: CollationKind::Locale,
        }
    }

    #[must_use]
    pub const fn with_presorted(mut self, presorted: bool) -> Self {
        self.presorted = presorted;
        self
    }

    #[must_use]
    pub const fn with_verify_presorted(mut self, verify: bool) -> Self {
        self.verify_presorted = verify;
        self
    }

    #[must_use]
    pub const fn with_reject_duplicate_keys(mut self, reject: bool) -> Self {
        self.reject_duplicate_keys = reject;
        self
    }

    #[must_use]
    pub const fn with_max_groups(mut self, max_groups: u64) -> Self {
        self.max_groups = Some(max_groups);
        self
    }

    #[must_use]
    pub const fn with_collation(mut self, collation: CollationKind) -> Self {
        self.collation = collation;
        self
    }

    #[must_use]
    pub const fn presorted(&self) -> bool {
        self.presorted
    }

    #[must_use]
    pub const fn verify_presorted(&self) -> bool {
        self.verify_presorted
    }

    #[must_use]
    pub const fn reject_duplicate_keys(&self) -> bool {
        self.reject_duplicate_keys
    }

    #[must_use]
    pub const fn max_groups(&self) -> Option<u64> {
        self.max_groups
    }

    #[must_use]
    pub const fn collation(&self) -> CollationKind {
        self.collation
    }
}
