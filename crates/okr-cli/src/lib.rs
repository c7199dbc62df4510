//! OKR CLI
//!
//! Library side of the `okr` binary: configuration, tracing setup and the
//! report commands.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod config;
pub mod logging;

pub use commands::{
    key_result_progress, load_document, objective_report, parse_document, render_json,
    render_summary, DocumentError, DocumentFormat,
};
pub use config::{CliConfig, ConfigError, LogFormat};
pub use logging::init_tracing;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
