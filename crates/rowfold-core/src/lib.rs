//! Core runtime for rowfold: the value model, key-spec canonicalization,
//! the multi-key comparator, declarative sort, single-pass group-collect, and
//! the observability sink they report through.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod collect;
pub mod compare;
pub mod error;
pub mod key;
pub mod obs;
pub mod rows;
pub mod sort;
pub mod value;

pub use error::{Error, ErrorKind};

///
/// Prelude
///
/// Prelude contains only domain vocabulary and the entry points.
/// Error payload enums and sinks are reached through their modules.
///

pub mod prelude {
    pub use crate::{
        collect::{CollectConfig, Collected, collect_groups, collect_groups_with},
        compare::{Collation, CollationKind, compare},
        key::{Direction, IntoKeySpec, KeyName, KeySpec, SortKey, canonicalize},
        rows::Rows,
        sort::{SortOutcome, sort_by_keys, sort_by_keys_with},
        value::{Record, Value, ValueKind},
    };
}
