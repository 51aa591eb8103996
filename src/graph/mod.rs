//! Graph export: two serializations of the aggregated data-flow edge list.
//!
//! The structured graph (node/link JSON) feeds structured-data consumers and
//! the force-directed renderer; the clustered DOT diagram groups edges by
//! owning file for visual inspection. Both are pure functions of the edge
//! list, and both warn and skip any edge missing file or line metadata
//! instead of failing the export.

use crate::core::{DataFlowEdge, EdgeKind, ValueKind};
use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GraphNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub file: PathBuf,
    pub line: usize,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Deduplicates edge endpoints into a node set (first-seen category wins) and
/// flattens the edges into links referencing node descriptors.
pub fn build_graph(edges: &[DataFlowEdge]) -> FlowGraph {
    let mut graph = FlowGraph::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for edge in edges {
        let Some((file, line)) = edge_location(edge) else {
            continue;
        };
        if seen.insert(&edge.source) {
            graph.nodes.push(GraphNode {
                name: edge.source.clone(),
                kind: edge.source_kind,
            });
        }
        if seen.insert(&edge.target) {
            graph.nodes.push(GraphNode {
                name: edge.target.clone(),
                kind: edge.target_kind,
            });
        }
        graph.links.push(GraphLink {
            source: edge.source.clone(),
            target: edge.target.clone(),
            kind: edge.kind,
            file: file.to_path_buf(),
            line,
        });
    }

    graph
}

/// Renders the edges as a Graphviz digraph with one cluster per owning file,
/// each edge labeled with its source line.
pub fn render_dot(edges: &[DataFlowEdge]) -> String {
    // group by file, preserving first-seen file order
    let mut clusters: Vec<(&Path, Vec<&DataFlowEdge>)> = Vec::new();
    for edge in edges {
        let Some((file, _)) = edge_location(edge) else {
            continue;
        };
        match clusters.iter_mut().find(|(f, _)| *f == file) {
            Some((_, bucket)) => bucket.push(edge),
            None => clusters.push((file, vec![edge])),
        }
    }

    let mut out = String::from("digraph data_flow {\n");
    out.push_str("    rankdir=LR;\n");
    out.push_str("    node [shape=box, fontsize=10];\n");
    for (index, (file, bucket)) in clusters.iter().enumerate() {
        out.push_str(&format!("    subgraph cluster_{index} {{\n"));
        out.push_str(&format!(
            "        label=\"{}\";\n",
            escape(&file.display().to_string())
        ));
        for edge in bucket {
            let line = edge.line.unwrap_or(0);
            out.push_str(&format!(
                "        \"{}\" -> \"{}\" [label=\"L{line}\"];\n",
                escape(&edge.source),
                escape(&edge.target)
            ));
        }
        out.push_str("    }\n");
    }
    out.push_str("}\n");
    out
}

pub fn write_json(edges: &[DataFlowEdge], path: &Path) -> Result<()> {
    let graph = build_graph(edges);
    let json = serde_json::to_string_pretty(&graph).context("failed to serialize flow graph")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

pub fn write_dot(edges: &[DataFlowEdge], path: &Path) -> Result<()> {
    fs::write(path, render_dot(edges))
        .with_context(|| format!("failed to write {}", path.display()))
}

fn edge_location(edge: &DataFlowEdge) -> Option<(&Path, usize)> {
    match (edge.file.as_deref(), edge.line) {
        (Some(file), Some(line)) => Some((file, line)),
        _ => {
            warn!(
                "skipping data-flow edge `{}` -> `{}`: missing location metadata",
                edge.source, edge.target
            );
            None
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edge(source: &str, target: &str, line: usize) -> DataFlowEdge {
        DataFlowEdge {
            source: source.to_string(),
            target: target.to_string(),
            kind: EdgeKind::DeclarationInit,
            source_kind: ValueKind::Literal,
            target_kind: ValueKind::Variable,
            file: Some(PathBuf::from("src/app.js")),
            line: Some(line),
        }
    }

    #[test]
    fn endpoints_are_deduplicated() {
        let edges = vec![edge("1", "a", 1), edge("a", "b", 2)];
        let graph = build_graph(&edges);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.links.len(), 2);
        assert_eq!(graph.nodes[0].kind, ValueKind::Literal);
    }

    #[test]
    fn malformed_edge_is_dropped_from_both_exports() {
        let mut bad = edge("x", "y", 4);
        bad.file = None;
        let edges = vec![edge("1", "a", 1), bad];

        let graph = build_graph(&edges);
        assert_eq!(graph.links.len(), 1);

        let dot = render_dot(&edges);
        assert!(!dot.contains("\"x\""));
        assert!(dot.contains("\"a\""));
    }

    #[test]
    fn dot_clusters_by_file() {
        let mut other = edge("c", "d", 9);
        other.file = Some(PathBuf::from("src/lib.js"));
        let edges = vec![edge("1", "a", 1), other];

        let dot = render_dot(&edges);
        assert!(dot.contains("subgraph cluster_0"));
        assert!(dot.contains("subgraph cluster_1"));
        assert!(dot.contains("label=\"src/app.js\""));
        assert!(dot.contains("\"c\" -> \"d\" [label=\"L9\"];"));
    }

    #[test]
    fn dot_escapes_quotes_in_descriptors() {
        let quoted = edge("\"hi\"", "greeting", 3);
        let dot = render_dot(&[quoted]);
        assert!(dot.contains("\"\\\"hi\\\"\" -> \"greeting\""));
    }

    #[test]
    fn serialized_tags_are_kebab_case() {
        let graph = build_graph(&[edge("1", "a", 1)]);
        let value = serde_json::to_value(&graph).unwrap();
        assert_eq!(value["nodes"][0]["type"], "literal");
        assert_eq!(value["links"][0]["type"], "declaration-init");
    }
}
