use flowmap::core::{DiagnosticKind, EdgeKind, FileAnalysis, ValueKind};
use flowmap::{analyze_source, build_graph, render_dot};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::path::Path;

fn analyze(source: &str) -> FileAnalysis {
    analyze_source(source, Path::new("test.js")).expect("analysis failed")
}

fn count(analysis: &FileAnalysis, kind: DiagnosticKind) -> usize {
    analysis
        .diagnostics
        .iter()
        .filter(|d| d.kind == kind)
        .count()
}

#[test]
fn used_variable_is_not_reported() {
    let analysis = analyze("let a = 1;\nconsole.log(a);\n");
    assert_eq!(count(&analysis, DiagnosticKind::UnusedVariable), 0);
}

#[test]
fn unused_variable_is_reported_exactly_once() {
    let analysis = analyze("let b = 1;\n");
    let unused: Vec<_> = analysis
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::UnusedVariable)
        .collect();
    assert_eq!(unused.len(), 1);
    assert!(unused[0].message.contains("`b`"));
    assert_eq!(unused[0].file, Path::new("test.js"));
    assert_eq!(unused[0].line, 1);
}

#[test]
fn under_supplied_call_reports_expected_and_got() {
    let analysis = analyze("function f(x, y) {}\nf(1);\n");
    let missing: Vec<_> = analysis
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::MissingArguments)
        .collect();
    assert_eq!(missing.len(), 1);
    assert!(missing[0].message.contains("expected 2, got 1"));
    assert_eq!(missing[0].line, 2);
}

#[test]
fn exact_arity_call_is_clean() {
    let analysis = analyze("function f(x, y) {}\nf(1, 2);\n");
    assert_eq!(count(&analysis, DiagnosticKind::MissingArguments), 0);
}

#[test]
fn weak_equality_per_occurrence() {
    let analysis = analyze("if (x == 1) {}\n");
    let weak: Vec<_> = analysis
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::WeakEquality)
        .collect();
    assert_eq!(weak.len(), 1);
    assert!(weak[0].message.contains("`==`"));
    assert_eq!(weak[0].line, 1);
}

#[test]
fn weak_inequality_is_reported_too() {
    let analysis = analyze("let ok = a != b;\nconsole.log(ok);\n");
    assert_eq!(count(&analysis, DiagnosticKind::WeakEquality), 1);
}

#[test]
fn strict_equality_is_clean() {
    let analysis = analyze("if (x === 1) {}\nif (x !== 2) {}\n");
    assert_eq!(count(&analysis, DiagnosticKind::WeakEquality), 0);
}

#[test]
fn constant_conditional_is_redundant() {
    let analysis = analyze("if (true) {\n  console.log(\"hi\");\n}\n");
    assert_eq!(count(&analysis, DiagnosticKind::RedundantConditional), 1);
}

#[test]
fn for_without_test_is_a_potential_infinite_loop() {
    let analysis = analyze("for (;;) {}\n");
    assert_eq!(count(&analysis, DiagnosticKind::PotentialInfiniteLoop), 1);
}

#[test]
fn bounded_for_is_clean() {
    let analysis = analyze("for (let i = 0; i < 3; i++) {\n  console.log(i);\n}\n");
    assert_eq!(count(&analysis, DiagnosticKind::PotentialInfiniteLoop), 0);
}

#[test]
fn deep_access_chain_reports_once_with_depth() {
    let analysis = analyze("a.b.c.d.e;\n");
    let deep: Vec<_> = analysis
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::DeepNesting)
        .collect();
    assert_eq!(deep.len(), 1);
    assert!(deep[0].message.contains("depth 5"));
}

#[test]
fn shallow_access_chain_is_clean() {
    let analysis = analyze("a.b.c;\n");
    assert_eq!(count(&analysis, DiagnosticKind::DeepNesting), 0);
}

#[test]
fn never_called_function_is_reported_at_its_line() {
    let analysis = analyze("function orphan(v) {\n  return v;\n}\n");
    let unused: Vec<_> = analysis
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::UnusedFunction)
        .collect();
    assert_eq!(unused.len(), 1);
    assert!(unused[0].message.contains("`orphan`"));
    assert_eq!(unused[0].line, 1);
}

#[test]
fn called_function_is_not_reported() {
    let analysis = analyze("function f() {}\nf();\n");
    assert_eq!(count(&analysis, DiagnosticKind::UnusedFunction), 0);
}

#[test]
fn inner_shadow_use_leaves_outer_unused() {
    let source = indoc! {"
        let a = 1;
        function wrap() {
          let a = 2;
          console.log(a);
        }
        wrap();
    "};
    let analysis = analyze(source);
    let unused: Vec<_> = analysis
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::UnusedVariable)
        .collect();
    assert_eq!(unused.len(), 1);
    assert_eq!(unused[0].line, 1);
}

#[test]
fn reference_after_inner_scope_resolves_outer() {
    let source = indoc! {"
        let a = 1;
        {
          let a = 2;
          console.log(a);
        }
        console.log(a);
    "};
    let analysis = analyze(source);
    assert_eq!(count(&analysis, DiagnosticKind::UnusedVariable), 0);
}

#[test]
fn destructured_names_are_tracked_individually() {
    let analysis = analyze("let { a, b } = obj;\nconsole.log(a);\n");
    let unused: Vec<_> = analysis
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::UnusedVariable)
        .collect();
    assert_eq!(unused.len(), 1);
    assert!(unused[0].message.contains("`b`"));
}

#[test]
fn declaration_initializer_produces_an_edge() {
    let analysis = analyze("let a = 1;\nconsole.log(a);\n");
    let edge = &analysis.edges[0];
    assert_eq!(edge.kind, EdgeKind::DeclarationInit);
    assert_eq!(edge.source, "1");
    assert_eq!(edge.target, "a");
    assert_eq!(edge.source_kind, ValueKind::Literal);
    assert_eq!(edge.line, Some(1));
}

#[test]
fn assignment_produces_an_edge_to_the_target_text() {
    let analysis = analyze("x = a.b;\n");
    let assignment: Vec<_> = analysis
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::Assignment)
        .collect();
    assert_eq!(assignment.len(), 1);
    assert_eq!(assignment[0].source, "a.b");
    assert_eq!(assignment[0].target, "x");
}

#[test]
fn call_arguments_flow_into_same_position_parameters() {
    let analysis = analyze("function f(x, y) {}\nf(42, value);\n");
    let arg_edges: Vec<_> = analysis
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::ArgumentToParameter)
        .collect();
    assert_eq!(arg_edges.len(), 2);
    assert_eq!(arg_edges[0].source, "42");
    assert_eq!(arg_edges[0].target, "x");
    assert_eq!(arg_edges[1].source, "value");
    assert_eq!(arg_edges[1].target, "y");
}

#[test]
fn pattern_parameters_get_no_positional_edge() {
    let analysis = analyze("function f({ x }, y) {}\nf(obj, 2);\n");
    let arg_edges: Vec<_> = analysis
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::ArgumentToParameter)
        .collect();
    assert_eq!(arg_edges.len(), 1);
    assert_eq!(arg_edges[0].target, "y");
}

#[test]
fn parameter_reference_inside_body_produces_an_edge() {
    let analysis = analyze("function double(n) {\n  return n * 2;\n}\ndouble(3);\n");
    let refs: Vec<_> = analysis
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::ParameterReference)
        .collect();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].source, "n");
    assert_eq!(refs[0].target, "double");
}

#[test]
fn jsx_references_count_as_uses() {
    let source = indoc! {"
        function App() {
          let label = \"hi\";
          return <div title={label}>{label}</div>;
        }
        App();
    "};
    let analysis = analyze(source);
    assert_eq!(analysis.diagnostics, vec![]);
}

#[test]
fn member_call_on_undeclared_object_is_untracked() {
    let analysis = analyze("console.log(\"hello\");\n");
    assert_eq!(analysis.diagnostics, vec![]);
}

#[test]
fn both_exports_derive_from_the_same_edges() {
    let source = indoc! {"
        let total = 0;
        function add(amount) {
          total = total + amount;
          return total;
        }
        add(5);
    "};
    let analysis = analyze(source);
    assert!(!analysis.edges.is_empty());

    let graph = build_graph(&analysis.edges);
    let dot = render_dot(&analysis.edges);

    // every edge in the clustered diagram also appears in the structured
    // graph, under the same file and line
    let dot_edges = dot.matches(" -> ").count();
    assert_eq!(dot_edges, graph.links.len());
    for link in &graph.links {
        assert!(dot.contains(&format!("[label=\"L{}\"]", link.line)));
        assert_eq!(link.file, Path::new("test.js"));
    }
}
