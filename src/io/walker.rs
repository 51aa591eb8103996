//! Directory orchestration: walks a file tree, filters ignored paths, feeds
//! each source file to the analysis engine, and aggregates results.
//!
//! Files are processed strictly one at a time; each file's engine state is
//! discarded before the next file begins. An unreadable directory abandons
//! its subtree with a log line but never aborts the run, and a file that
//! fails to parse simply contributes nothing.

use crate::analyzers;
use crate::core::{is_source_file, AnalysisReport};
use crate::io::output;
use log::error;
use std::path::Path;
use walkdir::WalkDir;

/// Path substrings excluded from traversal: package manifests, lockfiles,
/// version-control and build directories, and previously generated graph
/// artifacts.
pub const DEFAULT_IGNORES: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "package-lock.json",
    "package.json",
    ".gitignore",
    "README.md",
    ".git",
    "target",
    "data_flow.json",
    "data_flow.dot",
];

pub fn default_ignore_list() -> Vec<String> {
    DEFAULT_IGNORES.iter().map(|s| s.to_string()).collect()
}

/// Recursively analyzes every `.js`/`.jsx`/`.cjs` file under `root`, printing
/// each file's diagnostics as it completes and merging everything into one
/// report.
pub fn walk_directory(root: &Path, ignore: &[String]) -> AnalysisReport {
    let mut report = AnalysisReport::default();

    let entries = WalkDir::new(root).into_iter().filter_entry(|entry| {
        let path = entry.path().to_string_lossy();
        let ignored = ignore.iter().any(|needle| path.contains(needle.as_str()));
        if ignored {
            println!("Ignoring: {}", entry.path().display());
        }
        !ignored
    });

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                error!("failed to read directory entry: {err}");
                continue;
            }
        };
        if entry.file_type().is_file() && is_source_file(entry.path()) {
            analyze_into(entry.path(), &mut report);
        }
    }

    report
}

/// Analyzes a single file into the report, absorbing per-file failures.
pub fn analyze_into(path: &Path, report: &mut AnalysisReport) {
    println!("Analyzing file: {}", path.display());
    match analyzers::analyze_file(path) {
        Ok(analysis) => {
            output::print_diagnostics(&analysis.diagnostics);
            report.merge(analysis);
        }
        Err(err) => error!("{err}"),
    }
}
