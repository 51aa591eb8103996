// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod core;
pub mod errors;
pub mod graph;
pub mod io;

// Re-export commonly used types
pub use crate::analyzers::{analyze_file, analyze_source};
pub use crate::core::{
    AnalysisReport, DataFlowEdge, Diagnostic, DiagnosticKind, EdgeKind, FileAnalysis, ValueKind,
};
pub use crate::errors::AnalysisError;
pub use crate::graph::{build_graph, render_dot, FlowGraph, GraphLink, GraphNode};
pub use crate::io::walker::{default_ignore_list, walk_directory};
