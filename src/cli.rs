use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "flowmap",
    version,
    about = "Analyze a JavaScript/JSX tree for correctness smells and extract its data-flow graph"
)]
pub struct Cli {
    /// Root directory to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Analyze the bundled example file instead of a directory
    #[arg(long)]
    pub test: bool,

    /// Additional path substrings to ignore during traversal
    #[arg(long, value_delimiter = ',')]
    pub ignore: Vec<String>,
}
