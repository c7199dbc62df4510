//! Report commands
//!
//! The work behind each `okr` subcommand, kept out of `main` so it can be
//! tested without spawning the binary.

use okr_core::{ObjectiveDetail, ObjectiveDocument};
use okr_progress::{KeyResultSnapshot, KeyResultType, ParseKeyResultTypeError, ProgressEngine};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Objective document loading errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// File could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Document path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// JSON document is malformed
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML document is malformed
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Document encoding, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json` and anything unrecognized
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl DocumentFormat {
    /// Format for a path
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }
}

/// Parse an objective document
///
/// # Errors
/// Returns `DocumentError::Json` or `DocumentError::Yaml` on malformed input
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<ObjectiveDocument, DocumentError> {
    Ok(match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    })
}

/// Read and parse an objective document
///
/// # Errors
/// Returns `DocumentError::Read` if the file can't be read, otherwise any
/// error from [`parse_document`]
pub fn load_document(path: &Path) -> Result<ObjectiveDocument, DocumentError> {
    let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_document(&text, DocumentFormat::from_path(path))?;
    tracing::debug!(
        path = %path.display(),
        key_results = document.key_results.len(),
        "loaded objective document"
    );
    Ok(document)
}

/// Progress of a key result given on the command line
///
/// Unlike stored rows, a mistyped name here is the caller's error.
///
/// # Errors
/// Returns [`ParseKeyResultTypeError`] for unknown type names
pub fn key_result_progress(
    engine: &ProgressEngine,
    kind: &str,
    initial: f64,
    current: f64,
    target: f64,
) -> Result<f64, ParseKeyResultTypeError> {
    let kind: KeyResultType = kind.parse()?;
    Ok(engine.key_result_progress(&KeyResultSnapshot::new(kind, initial, current, target)))
}

/// Detail payload for a document
#[must_use]
pub fn objective_report(engine: &ProgressEngine, document: &ObjectiveDocument) -> ObjectiveDetail {
    let detail = ObjectiveDetail::from_document(document, engine);
    tracing::info!(
        objective = %detail.id,
        progress = detail.progress_percentage,
        "computed objective progress"
    );
    detail
}

/// Plain-text summary of a detail payload
#[must_use]
pub fn render_summary(detail: &ObjectiveDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}%", detail.title, detail.progress_percentage);
    if let Some(description) = &detail.description {
        let _ = writeln!(out, "  {description}");
    }
    for kr in &detail.key_results {
        let unit = kr.unit.as_deref().map(|u| format!(" {u}")).unwrap_or_default();
        let _ = writeln!(
            out,
            "  [{:>6.2}%] {} ({}: {}{unit} -> {}{unit}, now {}{unit})",
            kr.progress_percentage,
            kr.title,
            kr.key_result_type,
            kr.initial_value,
            kr.target_value,
            kr.current_value,
        );
    }
    out
}

/// Pretty JSON for a detail payload
///
/// # Errors
/// Returns the serializer error, which only happens for non-string map keys
pub fn render_json(detail: &ObjectiveDetail) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(detail)
}
