//! AST command implementation

use anyhow::{Context, Result};
use clap::Args;
use sentsplit_core::TxtNode;
use std::io::Write;
use std::path::PathBuf;

use super::{LogArgs, SplitterArgs};
use crate::input::{InputSource, STDIN_MARKER};
use crate::output::open_output;

/// Arguments for the ast command
#[derive(Debug, Args)]
pub struct AstArgs {
    /// TxtAST parent node as JSON (`-` reads stdin)
    #[arg(short, long, value_name = "FILE", default_value = STDIN_MARKER)]
    pub input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub splitter: SplitterArgs,

    #[command(flatten)]
    pub logging: LogArgs,
}

impl AstArgs {
    /// Execute the ast command
    pub fn execute(&self) -> Result<()> {
        self.logging.init_logging();

        let source = if self.input == STDIN_MARKER {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(&self.input))
        };

        let splitter = self.splitter.build()?;
        let json = source.read_text()?;
        let node: TxtNode = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse TxtAST node from {source}"))?;
        log::debug!("Parsed {} node with {} children", node.node_type, node.children().len());

        let result = splitter
            .split_ast(&node)
            .with_context(|| format!("Failed to split {source}"))?;

        let mut writer = open_output(self.output.as_deref())?;
        serde_json::to_writer_pretty(&mut writer, &result)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
