//! OKR Progress Engine
//!
//! Completion percentages for key results and objectives.
//!
//! # Overview
//!
//! - **KeyResultType**: closed set of measurement styles
//! - **KeyResultSnapshot**: typed numeric state of one key result
//! - **KeyResultRecord**: string-typed row as stored
//! - **ProgressEngine**: per key result and per objective computation
//!
//! # Example
//!
//! ```rust
//! use okr_progress::{compute_key_result_progress, compute_objective_progress};
//! use okr_progress::{KeyResultSnapshot, KeyResultType};
//!
//! let signups = KeyResultSnapshot::new(KeyResultType::IncreaseTo, 0.0, 50.0, 100.0);
//! assert_eq!(compute_key_result_progress(&signups), 50.0);
//!
//! let churn = KeyResultSnapshot::new(KeyResultType::StayBelow, 0.0, 2.0, 5.0);
//! assert_eq!(compute_objective_progress(&[signups, churn]), 75);
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod kind;
mod record;

// Re-exports
pub use config::{AggregationPolicy, ProgressConfig};
pub use engine::{
    compute_key_result_progress, compute_objective_progress, KeyResultSnapshot, Measurable,
    ProgressEngine,
};
pub use kind::{KeyResultType, ParseKeyResultTypeError};
pub use record::KeyResultRecord;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for progress computation
    pub use crate::{
        compute_key_result_progress, compute_objective_progress, KeyResultRecord,
        KeyResultSnapshot, KeyResultType, Measurable, ProgressEngine,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
