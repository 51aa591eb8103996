use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The categories of code smells the engine reports.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    UnusedVariable,
    UnusedFunction,
    MissingArguments,
    WeakEquality,
    RedundantConditional,
    PotentialInfiniteLoop,
    DeepNesting,
    UnresolvedBinding,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiagnosticKind::UnusedVariable => "unused-variable",
            DiagnosticKind::UnusedFunction => "unused-function",
            DiagnosticKind::MissingArguments => "missing-arguments",
            DiagnosticKind::WeakEquality => "weak-equality",
            DiagnosticKind::RedundantConditional => "redundant-conditional",
            DiagnosticKind::PotentialInfiniteLoop => "potential-infinite-loop",
            DiagnosticKind::DeepNesting => "deep-nesting",
            DiagnosticKind::UnresolvedBinding => "unresolved-binding",
        };
        write!(f, "{label}")
    }
}

/// A human-readable warning about a specific source location. Diagnostics are
/// never hard errors and never affect exit status.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub file: PathBuf,
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, file: &Path, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            file: file.to_path_buf(),
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file.display(), self.line, self.message)
    }
}

/// How a value flows into a named target.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    DeclarationInit,
    Assignment,
    ArgumentToParameter,
    ParameterReference,
}

/// Category tag inferred from the node kind that produced an edge endpoint.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    Literal,
    Variable,
    FunctionCall,
    Function,
    Expression,
    Unknown,
}

/// A recorded relationship stating that the value of `source` flows into
/// `target`. Edges are append-only and never mutated after creation.
///
/// File and line are optional at the type level so the exporters can degrade
/// gracefully on malformed edges instead of failing a whole export.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DataFlowEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub source_kind: ValueKind,
    pub target_kind: ValueKind,
    pub file: Option<PathBuf>,
    pub line: Option<usize>,
}

/// Bookkeeping for one named function within a single file's analysis pass.
#[derive(Clone, Debug)]
pub struct FunctionRecord {
    pub name: String,
    /// Positional parameter names; `None` where the parameter is a
    /// destructuring or default pattern rather than a plain identifier.
    pub params: Vec<Option<String>>,
    pub used: bool,
    pub line: usize,
}

impl FunctionRecord {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// One file's contribution: its diagnostics and data-flow edges.
#[derive(Clone, Debug, Default)]
pub struct FileAnalysis {
    pub diagnostics: Vec<Diagnostic>,
    pub edges: Vec<DataFlowEdge>,
}

/// Cross-file aggregate owned by the directory orchestrator. Appended to
/// monotonically; per-file engine state never outlives the file it analyzed.
#[derive(Clone, Debug, Default)]
pub struct AnalysisReport {
    pub diagnostics: Vec<Diagnostic>,
    pub edges: Vec<DataFlowEdge>,
    pub files_analyzed: usize,
}

impl AnalysisReport {
    pub fn merge(&mut self, analysis: FileAnalysis) {
        self.diagnostics.extend(analysis.diagnostics);
        self.edges.extend(analysis.edges);
        self.files_analyzed += 1;
    }
}

/// The extensions sharing the JSX-capable parse path.
pub fn is_source_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("js") | Some("jsx") | Some("cjs")
    )
}
