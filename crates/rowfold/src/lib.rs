//! ## Crate layout
//! - `core`: value model, key specs, comparator, sort, group-collect, and
//!   observability.
//!
//! The `prelude` module carries the vocabulary most callers need in one
//! import.

pub use rowfold_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{Error, ErrorKind};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{obs::metrics_report, prelude::*};
    pub use serde::{Deserialize, Serialize};
}
