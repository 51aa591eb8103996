use std::path::PathBuf;
use thiserror::Error;

/// Per-file failures surfaced by the analysis engine.
///
/// The directory orchestrator logs these and moves on to the next file; none
/// of them abort a run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse code in file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("failed to initialize JavaScript grammar")]
    Language(#[from] tree_sitter::LanguageError),
}
