use anyhow::{bail, Result};
use clap::Parser;
use flowmap::cli::Cli;
use flowmap::core::AnalysisReport;
use flowmap::graph;
use flowmap::io::walker::{analyze_into, default_ignore_list, walk_directory};
use std::path::Path;

const EXAMPLE_FILE: &str = "fixtures/example-test-file.js";
const JSON_ARTIFACT: &str = "data_flow.json";
const DOT_ARTIFACT: &str = "data_flow.dot";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let report = if cli.test {
        let example = Path::new(EXAMPLE_FILE);
        if !example.exists() {
            bail!("test file not found: {}", example.display());
        }
        println!("Running analysis on example test file: {}", example.display());
        let mut report = AnalysisReport::default();
        analyze_into(example, &mut report);
        report
    } else {
        println!("Analyzing directory: {}", cli.path.display());
        let mut ignore = default_ignore_list();
        ignore.extend(cli.ignore.iter().cloned());
        walk_directory(&cli.path, &ignore)
    };

    // both artifacts are overwritten on every run
    graph::write_json(&report.edges, Path::new(JSON_ARTIFACT))?;
    graph::write_dot(&report.edges, Path::new(DOT_ARTIFACT))?;

    println!(
        "Analyzed {} file(s): {} diagnostic(s), {} data-flow edge(s)",
        report.files_analyzed,
        report.diagnostics.len(),
        report.edges.len()
    );
    println!("Graph artifacts written: {JSON_ARTIFACT}, {DOT_ARTIFACT}");
    Ok(())
}
