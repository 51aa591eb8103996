//! Extraction of declared identifier names from binding targets.
//!
//! Handles plain identifiers, object/array destructuring, rest elements, and
//! default-value patterns. This is a best-effort extractor, not a validator:
//! node kinds it does not recognize yield nothing. The caller decides what an
//! empty result means (for a declarator it is a warning diagnostic).

use tree_sitter::Node;

/// Returns every identifier name the binding target declares, in source
/// order.
pub fn extract_declared_names(node: Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();
    collect(node, source, &mut names);
    names
}

fn collect(node: Node, source: &str, names: &mut Vec<String>) {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            if let Ok(text) = node.utf8_text(source.as_bytes()) {
                names.push(text.to_string());
            }
        }
        "object_pattern" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    // `{ key: target }` declares the target, not the key
                    "pair_pattern" => {
                        if let Some(value) = child.child_by_field_name("value") {
                            collect(value, source, names);
                        }
                    }
                    "rest_pattern"
                    | "object_assignment_pattern"
                    | "shorthand_property_identifier_pattern" => collect(child, source, names),
                    _ => {}
                }
            }
        }
        "array_pattern" => {
            // holes from elided positions are not named children, so they
            // are skipped for free
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect(child, source, names);
            }
        }
        "rest_pattern" => {
            let mut cursor = node.walk();
            let target = node.named_children(&mut cursor).next();
            if let Some(target) = target {
                collect(target, source, names);
            }
        }
        // `target = default` declares the target; the default expression is
        // not a binding
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = node.child_by_field_name("left") {
                collect(left, source, names);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::{Parser, Tree};

    fn parse(source: &str) -> Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    fn declarator_target(tree: &Tree) -> Node<'_> {
        fn find<'t>(node: Node<'t>) -> Option<Node<'t>> {
            if node.kind() == "variable_declarator" {
                return node.child_by_field_name("name");
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            children.into_iter().find_map(find)
        }
        find(tree.root_node()).expect("no declarator in source")
    }

    fn names_of(source: &str) -> Vec<String> {
        let tree = parse(source);
        extract_declared_names(declarator_target(&tree), source)
    }

    #[test]
    fn plain_identifier() {
        assert_eq!(names_of("let a = 1;"), vec!["a"]);
    }

    #[test]
    fn object_pattern_with_rename_and_rest() {
        assert_eq!(
            names_of("let { a, b: c, ...rest } = obj;"),
            vec!["a", "c", "rest"]
        );
    }

    #[test]
    fn nested_array_in_object() {
        assert_eq!(names_of("let { a: [b, , c] } = obj;"), vec!["b", "c"]);
    }

    #[test]
    fn array_pattern_skips_holes() {
        assert_eq!(names_of("let [, x, ...ys] = arr;"), vec!["x", "ys"]);
    }

    #[test]
    fn default_values_bind_left_target_only() {
        assert_eq!(names_of("let { a = 1, b: c = d } = obj;"), vec!["a", "c"]);
    }

    #[test]
    fn empty_pattern_yields_nothing() {
        assert_eq!(names_of("let {} = obj;"), Vec::<String>::new());
    }
}
