//! Per-file analysis engine.
//!
//! Drives the tree walker over one parsed file, consulting the pattern
//! extractor and scope tracker to build the diagnostics list and the
//! data-flow edge list. All state here is file-local and discarded once the
//! file's results are merged into the run-wide report.

pub mod patterns;
pub mod scope;
pub mod walker;

use crate::core::{
    DataFlowEdge, Diagnostic, DiagnosticKind, EdgeKind, FileAnalysis, FunctionRecord, ValueKind,
};
use crate::errors::AnalysisError;
use scope::ScopeTracker;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};
use walker::{walk, Visit};

/// Property-access chains deeper than this are reported.
const MAX_ACCESS_DEPTH: usize = 3;

/// Descriptor strings longer than this are cut for graph readability.
const MAX_DESCRIPTOR_LEN: usize = 60;

const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "function",
    "generator_function",
    "arrow_function",
    "method_definition",
];

fn is_function_kind(kind: &str) -> bool {
    FUNCTION_KINDS.contains(&kind)
}

/// Reads and analyzes one source file.
pub fn analyze_file(path: &Path) -> Result<FileAnalysis, AnalysisError> {
    let source = fs::read_to_string(path).map_err(|source| AnalysisError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    analyze_source(&source, path)
}

/// Analyzes source text as if it lived at `path`. The JSX-capable grammar is
/// always enabled so `.js`, `.jsx`, and `.cjs` share one parse path.
pub fn analyze_source(source: &str, path: &Path) -> Result<FileAnalysis, AnalysisError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_javascript::LANGUAGE.into())?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AnalysisError::Parse {
            path: path.to_path_buf(),
            reason: "parser produced no tree".to_string(),
        })?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(AnalysisError::Parse {
            path: path.to_path_buf(),
            reason: "syntax error".to_string(),
        });
    }

    let mut visitor = FileVisitor::new(source, path);
    walk(root, &mut visitor);
    Ok(visitor.finish())
}

struct FileVisitor<'s> {
    source: &'s str,
    path: PathBuf,
    scopes: ScopeTracker,
    functions: HashMap<String, FunctionRecord>,
    /// Flattened parameter names of each enclosing function, innermost last.
    param_stack: Vec<Vec<String>>,
    /// Display names parallel to `param_stack`.
    fn_name_stack: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    edges: Vec<DataFlowEdge>,
}

impl<'s> FileVisitor<'s> {
    fn new(source: &'s str, path: &Path) -> Self {
        Self {
            source,
            path: path.to_path_buf(),
            scopes: ScopeTracker::new(),
            functions: HashMap::new(),
            param_stack: Vec::new(),
            fn_name_stack: Vec::new(),
            diagnostics: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn line(node: Node<'_>) -> usize {
        node.start_position().row + 1
    }

    fn diag(&mut self, kind: DiagnosticKind, line: usize, message: String) {
        self.diagnostics
            .push(Diagnostic::new(kind, &self.path, line, message));
    }

    fn edge(
        &mut self,
        source: String,
        source_kind: ValueKind,
        target: String,
        target_kind: ValueKind,
        kind: EdgeKind,
        line: usize,
    ) {
        self.edges.push(DataFlowEdge {
            source,
            target,
            kind,
            source_kind,
            target_kind,
            file: Some(self.path.clone()),
            line: Some(line),
        });
    }

    /// Renders an expression as a stable descriptor string plus the category
    /// tag the graph exporter attaches to its node.
    fn describe(&self, node: Node<'_>) -> (String, ValueKind) {
        match node.kind() {
            "identifier" | "shorthand_property_identifier" | "this" | "super" => {
                (self.text(node).to_string(), ValueKind::Variable)
            }
            "member_expression" | "subscript_expression" => {
                (collapse(self.text(node)), ValueKind::Variable)
            }
            "call_expression" | "new_expression" => {
                let callee = node
                    .child_by_field_name("function")
                    .or_else(|| node.child_by_field_name("constructor"))
                    .map(|c| collapse(self.text(c)))
                    .unwrap_or_else(|| "<unknown>".to_string());
                (format!("{callee}()"), ValueKind::FunctionCall)
            }
            "number" | "string" | "template_string" | "regex" | "true" | "false" | "null"
            | "undefined" => (collapse(self.text(node)), ValueKind::Literal),
            kind if is_function_kind(kind) || kind == "class" => {
                let name = node
                    .child_by_field_name("name")
                    .map(|n| self.text(n).to_string())
                    .unwrap_or_else(|| "<function>".to_string());
                (name, ValueKind::Function)
            }
            _ => (collapse(self.text(node)), ValueKind::Expression),
        }
    }

    fn on_variable_declarator(&mut self, node: Node<'_>) {
        let Some(target) = node.child_by_field_name("name") else {
            return;
        };
        let line = Self::line(node);
        let names = patterns::extract_declared_names(target, self.source);
        if names.is_empty() {
            log::warn!(
                "{}:{}: destructuring pattern binds no name",
                self.path.display(),
                line
            );
            self.diag(
                DiagnosticKind::UnresolvedBinding,
                line,
                "destructuring pattern binds no name".to_string(),
            );
            return;
        }
        for name in &names {
            self.scopes.declare(name, line);
        }
        if let Some(value) = node.child_by_field_name("value") {
            let (source_desc, source_kind) = self.describe(value);
            self.edge(
                source_desc,
                source_kind,
                names.join(", "),
                ValueKind::Variable,
                EdgeKind::DeclarationInit,
                line,
            );
        }
    }

    fn on_assignment(&mut self, node: Node<'_>) {
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return;
        };
        let (source_desc, source_kind) = self.describe(right);
        let (target_desc, target_kind) = self.describe(left);
        self.edge(
            source_desc,
            source_kind,
            target_desc,
            target_kind,
            EdgeKind::Assignment,
            Self::line(node),
        );
    }

    fn on_function(&mut self, node: Node<'_>) {
        self.scopes.enter();

        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string());
        let (positional, flat) = self.extract_params(node);

        if let Some(name) = &name {
            // redeclaration overwrites; last one wins, like the runtime
            self.functions.insert(
                name.clone(),
                FunctionRecord {
                    name: name.clone(),
                    params: positional,
                    used: false,
                    line: Self::line(node),
                },
            );
        }
        self.param_stack.push(flat);
        self.fn_name_stack
            .push(name.unwrap_or_else(|| "<function>".to_string()));
    }

    /// Positional plain-identifier parameter names (None for pattern
    /// parameters) plus the flattened list of every name the parameters
    /// declare.
    fn extract_params(&self, node: Node<'_>) -> (Vec<Option<String>>, Vec<String>) {
        let mut positional = Vec::new();
        let mut flat = Vec::new();

        if let Some(params) = node.child_by_field_name("parameters") {
            let mut cursor = params.walk();
            for child in params.named_children(&mut cursor) {
                if child.kind() == "comment" {
                    continue;
                }
                if child.kind() == "identifier" {
                    positional.push(Some(self.text(child).to_string()));
                } else {
                    positional.push(None);
                }
                flat.extend(patterns::extract_declared_names(child, self.source));
            }
        } else if let Some(param) = node.child_by_field_name("parameter") {
            // bare single-parameter arrow function
            let name = self.text(param).to_string();
            positional.push(Some(name.clone()));
            flat.push(name);
        }

        (positional, flat)
    }

    fn on_call(&mut self, node: Node<'_>) {
        let Some(callee) = node.child_by_field_name("function") else {
            return;
        };
        let line = Self::line(node);
        let display = match callee.kind() {
            "identifier" => self.text(callee).to_string(),
            // `object.property` chains and anything more exotic render as
            // their collapsed source text
            _ => collapse(self.text(callee)),
        };

        let args: Vec<Node<'_>> = node
            .child_by_field_name("arguments")
            .map(|arguments| {
                let mut cursor = arguments.walk();
                arguments
                    .named_children(&mut cursor)
                    .filter(|c| c.kind() != "comment")
                    .collect()
            })
            .unwrap_or_default();

        // Argument-to-parameter edges only for plain-identifier callees that
        // resolve to a function already declared in this file. Reassigned,
        // imported, and method callees stay unmatched.
        if callee.kind() == "identifier" {
            let known_params = self.functions.get(&display).map(|r| r.params.clone());
            if let Some(params) = known_params {
                for (position, arg) in args.iter().enumerate() {
                    if let Some(Some(param)) = params.get(position) {
                        let (source_desc, source_kind) = self.describe(*arg);
                        self.edge(
                            source_desc,
                            source_kind,
                            param.clone(),
                            ValueKind::Variable,
                            EdgeKind::ArgumentToParameter,
                            line,
                        );
                    }
                }
            }
        }

        let expected = self.functions.get_mut(&display).map(|record| {
            record.used = true;
            record.arity()
        });
        if let Some(expected) = expected {
            if args.len() < expected {
                self.diag(
                    DiagnosticKind::MissingArguments,
                    line,
                    format!(
                        "call to `{display}` may be missing arguments: expected {expected}, got {}",
                        args.len()
                    ),
                );
            }
        }
    }

    fn on_identifier(&mut self, node: Node<'_>, ancestors: &[Node<'_>]) {
        if is_declaration_target(node, ancestors) {
            return;
        }
        let name = self.text(node).to_string();
        self.scopes.mark_used(&name);

        let in_params = self
            .param_stack
            .last()
            .is_some_and(|params| params.iter().any(|p| p == &name));
        if in_params {
            let function = self
                .fn_name_stack
                .last()
                .cloned()
                .unwrap_or_else(|| "<function>".to_string());
            self.edge(
                name,
                ValueKind::Variable,
                function,
                ValueKind::Function,
                EdgeKind::ParameterReference,
                Self::line(node),
            );
        }
    }

    fn on_binary(&mut self, node: Node<'_>) {
        let Some(operator) = node.child_by_field_name("operator") else {
            return;
        };
        let op = self.text(operator);
        if op == "==" || op == "!=" {
            self.diag(
                DiagnosticKind::WeakEquality,
                Self::line(node),
                format!("weak equality comparison using `{op}`"),
            );
        }
    }

    fn on_if(&mut self, node: Node<'_>) {
        let Some(condition) = node.child_by_field_name("condition") else {
            return;
        };
        // condition is a parenthesized_expression; inspect what it wraps
        let mut cursor = condition.walk();
        let inner = condition
            .named_children(&mut cursor)
            .find(|c| c.kind() != "comment");
        if let Some(test) = inner {
            if matches!(
                test.kind(),
                "true" | "false" | "number" | "string" | "null" | "undefined"
            ) {
                self.diag(
                    DiagnosticKind::RedundantConditional,
                    Self::line(node),
                    format!(
                        "redundant conditional: test is the constant `{}`",
                        collapse(self.text(test))
                    ),
                );
            }
        }
    }

    fn on_for(&mut self, node: Node<'_>) {
        let absent = match node.child_by_field_name("condition") {
            None => true,
            Some(condition) => condition.kind() == "empty_statement",
        };
        if absent {
            self.diag(
                DiagnosticKind::PotentialInfiniteLoop,
                Self::line(node),
                "for loop has no termination condition; potential infinite loop".to_string(),
            );
        }
    }

    fn on_member(&mut self, node: Node<'_>, ancestors: &[Node<'_>]) {
        // only report once per chain, at its outermost node
        if let Some(parent) = ancestors.last() {
            if matches!(parent.kind(), "member_expression" | "subscript_expression")
                && parent
                    .child_by_field_name("object")
                    .is_some_and(|object| object.id() == node.id())
            {
                return;
            }
        }

        let mut depth = 1usize;
        let mut current = node;
        while matches!(current.kind(), "member_expression" | "subscript_expression") {
            depth += 1;
            match current.child_by_field_name("object") {
                Some(object) => current = object,
                None => break,
            }
        }

        if depth > MAX_ACCESS_DEPTH {
            self.diag(
                DiagnosticKind::DeepNesting,
                Self::line(node),
                format!(
                    "deeply nested property access `{}` (depth {depth})",
                    collapse(self.text(node))
                ),
            );
        }
    }

    fn flush_frame(&mut self, frame: scope::ScopeFrame) {
        let unused: Vec<(String, usize)> = frame
            .unused()
            .map(|(name, line)| (name.to_string(), line))
            .collect();
        for (name, line) in unused {
            self.diag(
                DiagnosticKind::UnusedVariable,
                line,
                format!("unused variable `{name}`"),
            );
        }
    }

    fn finish(mut self) -> FileAnalysis {
        let global = std::mem::take(&mut self.scopes).into_global();
        self.flush_frame(global);

        let mut leftover: Vec<FunctionRecord> = self
            .functions
            .drain()
            .map(|(_, record)| record)
            .filter(|record| !record.used)
            .collect();
        leftover.sort_by_key(|record| record.line);
        for record in leftover {
            self.diag(
                DiagnosticKind::UnusedFunction,
                record.line,
                format!("unused function `{}`", record.name),
            );
        }

        FileAnalysis {
            diagnostics: self.diagnostics,
            edges: self.edges,
        }
    }
}

impl<'s, 't> Visit<'t> for FileVisitor<'s> {
    fn enter(&mut self, node: Node<'t>, ancestors: &[Node<'t>]) {
        match node.kind() {
            "variable_declarator" => self.on_variable_declarator(node),
            "assignment_expression" | "augmented_assignment_expression" => {
                self.on_assignment(node)
            }
            kind if is_function_kind(kind) => self.on_function(node),
            "statement_block" => self.scopes.enter(),
            "call_expression" => self.on_call(node),
            "identifier" | "shorthand_property_identifier" => self.on_identifier(node, ancestors),
            "binary_expression" => self.on_binary(node),
            "if_statement" => self.on_if(node),
            "for_statement" => self.on_for(node),
            "member_expression" => self.on_member(node, ancestors),
            _ => {}
        }
    }

    fn leave(&mut self, node: Node<'t>) {
        match node.kind() {
            kind if is_function_kind(kind) => {
                let frame = self.scopes.exit();
                self.flush_frame(frame);
                self.param_stack.pop();
                self.fn_name_stack.pop();
            }
            "statement_block" => {
                let frame = self.scopes.exit();
                self.flush_frame(frame);
            }
            _ => {}
        }
    }
}

/// True when the identifier is being declared rather than referenced: the
/// name pattern of a declarator, a function/class name, or a formal
/// parameter. Default-value expressions inside patterns still count as uses.
fn is_declaration_target(node: Node<'_>, ancestors: &[Node<'_>]) -> bool {
    for ancestor in ancestors.iter().rev() {
        match ancestor.kind() {
            "variable_declarator" => {
                return ancestor
                    .child_by_field_name("name")
                    .is_some_and(|name| contains(name, node));
            }
            "formal_parameters" => return true,
            "arrow_function" => {
                return ancestor
                    .child_by_field_name("parameter")
                    .is_some_and(|param| contains(param, node));
            }
            "function_declaration"
            | "generator_function_declaration"
            | "function_expression"
            | "function"
            | "generator_function"
            | "method_definition"
            | "class_declaration"
            | "class" => {
                return ancestor
                    .child_by_field_name("name")
                    .is_some_and(|name| contains(name, node));
            }
            "assignment_pattern" | "object_assignment_pattern" => {
                // `= default` expressions are ordinary uses
                if ancestor
                    .child_by_field_name("right")
                    .is_some_and(|right| contains(right, node))
                {
                    return false;
                }
            }
            "computed_property_name" => return false,
            "object_pattern" | "array_pattern" | "rest_pattern" | "pair_pattern" => {}
            _ => return false,
        }
    }
    false
}

fn contains(outer: Node<'_>, inner: Node<'_>) -> bool {
    outer.start_byte() <= inner.start_byte() && inner.end_byte() <= outer.end_byte()
}

/// Collapses whitespace and truncates so multi-line expressions stay readable
/// as graph node descriptors.
fn collapse(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_DESCRIPTOR_LEN {
        let cut: String = collapsed.chars().take(MAX_DESCRIPTOR_LEN).collect();
        format!("{cut}...")
    } else {
        collapsed
    }
}
