//! Console rendering of diagnostics, one color-highlighted line each.

use crate::core::{Diagnostic, DiagnosticKind};
use colored::{ColoredString, Colorize};

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        print_diagnostic(diagnostic);
    }
}

pub fn print_diagnostic(diagnostic: &Diagnostic) {
    println!("{} {}", tag(diagnostic.kind), diagnostic);
}

fn tag(kind: DiagnosticKind) -> ColoredString {
    let label = format!("[{kind}]");
    match kind {
        DiagnosticKind::UnusedVariable | DiagnosticKind::UnusedFunction => label.as_str().yellow(),
        DiagnosticKind::MissingArguments => label.as_str().red(),
        DiagnosticKind::WeakEquality => label.as_str().magenta(),
        DiagnosticKind::RedundantConditional | DiagnosticKind::PotentialInfiniteLoop => {
            label.as_str().cyan()
        }
        DiagnosticKind::DeepNesting => label.as_str().blue(),
        DiagnosticKind::UnresolvedBinding => label.as_str().bright_yellow(),
    }
}
