//! Pre-order AST traversal with an explicit registry of traversable node
//! kinds.
//!
//! The JS grammar embeds JSX in ordinary expression and statement positions,
//! so the registry lists the JSX kinds alongside every standard kind. A kind
//! missing from the registry is a grammar shape we have not catalogued yet:
//! it is logged with its line number and then descended into generically
//! through its named children, so traversal never silently truncates.

use log::warn;
use tree_sitter::Node;

/// Callbacks driven by [`walk`]. `enter` fires before a node's children,
/// `leave` after them.
pub trait Visit<'t> {
    fn enter(&mut self, node: Node<'t>, ancestors: &[Node<'t>]);

    fn leave(&mut self, _node: Node<'t>) {}
}

/// Node kinds with a registered traversal rule. Everything tree-sitter's
/// JavaScript grammar can produce in the programs we analyze should be here;
/// the default path for an absent kind warns and falls back to generic
/// descent.
const KNOWN_KINDS: &[&str] = &[
    "program",
    "hash_bang_line",
    "comment",
    // Statements
    "expression_statement",
    "statement_block",
    "if_statement",
    "else_clause",
    "switch_statement",
    "switch_body",
    "switch_case",
    "switch_default",
    "for_statement",
    "for_in_statement",
    "while_statement",
    "do_statement",
    "try_statement",
    "catch_clause",
    "finally_clause",
    "with_statement",
    "break_statement",
    "continue_statement",
    "debugger_statement",
    "return_statement",
    "throw_statement",
    "empty_statement",
    "labeled_statement",
    "statement_identifier",
    // Declarations
    "variable_declaration",
    "lexical_declaration",
    "variable_declarator",
    "function_declaration",
    "generator_function_declaration",
    "class_declaration",
    // Modules
    "import_statement",
    "import",
    "import_clause",
    "namespace_import",
    "named_imports",
    "import_specifier",
    "export_statement",
    "export_clause",
    "export_specifier",
    "namespace_export",
    // Expressions
    "identifier",
    "property_identifier",
    "private_property_identifier",
    "shorthand_property_identifier",
    "shorthand_property_identifier_pattern",
    "this",
    "super",
    "number",
    "string",
    "string_fragment",
    "escape_sequence",
    "template_string",
    "template_substitution",
    "regex",
    "regex_pattern",
    "regex_flags",
    "true",
    "false",
    "null",
    "undefined",
    "object",
    "pair",
    "array",
    "spread_element",
    "function_expression",
    "function",
    "generator_function",
    "arrow_function",
    "class",
    "class_body",
    "class_heritage",
    "field_definition",
    "method_definition",
    "computed_property_name",
    "call_expression",
    "arguments",
    "new_expression",
    "member_expression",
    "subscript_expression",
    "optional_chain",
    "assignment_expression",
    "augmented_assignment_expression",
    "await_expression",
    "yield_expression",
    "unary_expression",
    "binary_expression",
    "ternary_expression",
    "update_expression",
    "sequence_expression",
    "parenthesized_expression",
    "meta_property",
    // Binding patterns
    "formal_parameters",
    "object_pattern",
    "array_pattern",
    "rest_pattern",
    "pair_pattern",
    "object_assignment_pattern",
    "assignment_pattern",
    // JSX
    "jsx_element",
    "jsx_fragment",
    "jsx_self_closing_element",
    "jsx_opening_element",
    "jsx_closing_element",
    "jsx_expression",
    "jsx_attribute",
    "jsx_text",
    "jsx_namespace_name",
    // Produced on recoverable syntax errors
    "ERROR",
];

fn is_known(kind: &str) -> bool {
    KNOWN_KINDS.contains(&kind)
}

/// Visits every named node reachable from `root` exactly once, parents before
/// children, handing `enter` the ancestor chain from root to the node's
/// parent.
pub fn walk<'t, V: Visit<'t>>(root: Node<'t>, visitor: &mut V) {
    let mut ancestors = Vec::new();
    walk_node(root, &mut ancestors, visitor);
}

fn walk_node<'t, V: Visit<'t>>(node: Node<'t>, ancestors: &mut Vec<Node<'t>>, visitor: &mut V) {
    if !is_known(node.kind()) {
        warn!(
            "no traversal rule for node kind `{}` at line {}; descending generically",
            node.kind(),
            node.start_position().row + 1
        );
    }

    visitor.enter(node, ancestors);

    ancestors.push(node);
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        walk_node(child, ancestors, visitor);
    }
    ancestors.pop();

    visitor.leave(node);
}
