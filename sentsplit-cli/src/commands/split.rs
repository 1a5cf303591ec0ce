//! Split command implementation

use anyhow::Result;
use clap::Args;
use rayon::prelude::*;
use sentsplit_core::{sentences, Node};
use std::path::PathBuf;

use super::{LogArgs, SplitterArgs};
use crate::input::resolve_inputs;
use crate::output::{create_formatter, open_output, OutputFormat};

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Input files or patterns (supports glob, `-` reads stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub splitter: SplitterArgs,

    #[command(flatten)]
    pub logging: LogArgs,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        self.logging.init_logging();

        log::info!("Starting sentence splitting");
        log::debug!("Arguments: {:?}", self);

        let splitter = self.splitter.build()?;
        let sources = resolve_inputs(&self.input)?;

        let documents = sources
            .par_iter()
            .map(|source| {
                let text = source.read_text()?;
                let nodes = splitter.split(&text);
                log::debug!(
                    "{}: {} sentence(s) in {} bytes",
                    source,
                    sentences(&nodes).count(),
                    text.len()
                );
                Ok((source.to_string(), nodes))
            })
            .collect::<Result<Vec<(String, Vec<Node>)>>>()?;

        let writer = open_output(self.output.as_deref())?;
        let mut formatter = create_formatter(self.format, writer, documents.len() > 1);
        for (name, nodes) in &documents {
            formatter.format_document(name, nodes)?;
        }
        formatter.finish()?;

        log::info!("Finished {} input(s)", documents.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: Vec<String>, output: PathBuf, format: OutputFormat) -> SplitArgs {
        SplitArgs {
            input,
            output: Some(output),
            format,
            splitter: SplitterArgs {
                preset: "en".to_string(),
                config: None,
            },
            logging: LogArgs {
                quiet: true,
                verbose: 0,
            },
        }
    }

    #[test]
    fn test_split_to_output_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "Mr. Smith went home. He slept.").unwrap();

        args(
            vec![input.to_string_lossy().into_owned()],
            output.clone(),
            OutputFormat::Text,
        )
        .execute()
        .unwrap();

        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "Sentence 0: Mr. Smith went home.\nSentence 1: He slept.\n"
        );
    }

    #[test]
    fn test_documents_keep_input_order() {
        let dir = TempDir::new().unwrap();
        for (name, text) in [("a.txt", "First."), ("b.txt", "Second."), ("c.txt", "Third.")] {
            fs::write(dir.path().join(name), text).unwrap();
        }
        let output = dir.path().join("out.json");

        args(
            vec![dir.path().join("*.txt").to_string_lossy().into_owned()],
            output.clone(),
            OutputFormat::Json,
        )
        .execute()
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        let raws: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|document| document["children"][0]["raw"].as_str().unwrap())
            .collect();
        assert_eq!(raws, vec!["First.", "Second.", "Third."]);
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = TempDir::new().unwrap();
        let result = args(
            vec![dir.path().join("*.none").to_string_lossy().into_owned()],
            dir.path().join("out.txt"),
            OutputFormat::Text,
        )
        .execute();
        assert!(result.is_err());
    }
}
