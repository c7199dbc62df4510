//! OKR Core
//!
//! Objectives, key results and check-ins, with progress derived through
//! [`okr_progress::ProgressEngine`].
//!
//! # Core Concepts
//!
//! - [`Objective`]: owns key results; progress is computed on read
//! - [`KeyResult`]: numeric state plus append-only check-in history
//! - [`CheckIn`]: one recorded value, attributed and timestamped
//! - [`ObjectiveDetail`]: payload with `progress_percentage` for route handlers
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use okr_core::{KeyResult, Objective, UserId};
//! use okr_progress::{KeyResultType, ProgressEngine};
//!
//! let mut objective = Objective::new("Grow the community")?;
//! let signups = objective.add_key_result(
//!     KeyResult::new("Signups", KeyResultType::IncreaseTo, 0.0, 100.0)?,
//! );
//! objective.record_check_in(signups, UserId::new(), 40.0, None, Utc::now())?;
//!
//! assert_eq!(objective.progress_percentage(&ProgressEngine::default()), 40);
//! # Ok::<(), okr_core::ModelError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod check_in;
mod detail;
mod error;
mod ids;
mod key_result;
mod objective;

// Re-exports
pub use check_in::CheckIn;
pub use detail::{
    KeyResultDetail, ObjectiveDetail, ObjectiveDocument, ObjectiveRecord, StoredKeyResult,
};
pub use error::{ModelError, ModelResult};
pub use ids::{KeyResultId, ObjectiveId, UserId};
pub use key_result::{KeyResult, KeyResultEdit};
pub use objective::Objective;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
