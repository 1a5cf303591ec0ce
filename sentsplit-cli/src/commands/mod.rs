//! CLI command implementations

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use sentsplit_core::{list_presets, Splitter};
use std::path::PathBuf;

use crate::output::OutputFormat;

pub mod ast;
pub mod split;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text files into sentences
    Split(split::SplitArgs),

    /// Split a TxtAST parent node read as JSON
    Ast(ast::AstArgs),

    /// Check a splitter configuration file
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List built-in configuration presets
    Presets,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Split(args) => args.execute(),
            Commands::Ast(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::List { subcommand } => {
                for line in subcommand.entries() {
                    println!("{line}");
                }
                Ok(())
            }
        }
    }
}

impl ListCommands {
    /// Lines printed by `list`
    pub fn entries(self) -> Vec<String> {
        match self {
            ListCommands::Presets => list_presets().into_iter().map(str::to_string).collect(),
            ListCommands::Formats => OutputFormat::value_variants()
                .iter()
                .filter_map(|format| format.to_possible_value())
                .map(|value| value.get_name().to_string())
                .collect(),
        }
    }
}

/// Options selecting the splitter rules
#[derive(Debug, Clone, Args)]
pub struct SplitterArgs {
    /// Built-in preset (see `sentsplit list presets`)
    #[arg(long, value_name = "NAME", default_value = sentsplit_core::api::defaults::PRESET)]
    pub preset: String,

    /// Configuration file (TOML); replaces the preset
    #[arg(short, long, value_name = "FILE", conflicts_with = "preset")]
    pub config: Option<PathBuf>,
}

impl SplitterArgs {
    /// Build the splitter from the config file, or from the preset
    pub fn build(&self) -> Result<Splitter> {
        let splitter = match &self.config {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Splitter::from_file(path)?
            }
            None => {
                log::info!("Using preset: {}", self.preset);
                Splitter::with_preset(&self.preset)?
            }
        };
        Ok(splitter)
    }
}

/// Verbosity options shared by the processing commands
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl LogArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        // A logger may already be installed when commands run in-process
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_presets() {
        let presets = ListCommands::Presets.entries();
        assert!(presets.contains(&"default".to_string()));
        assert!(presets.contains(&"en".to_string()));
    }

    #[test]
    fn test_list_formats() {
        assert_eq!(
            ListCommands::Formats.entries(),
            vec!["text", "json", "markdown"]
        );
    }

    #[test]
    fn test_splitter_args_preset() {
        let args = SplitterArgs {
            preset: "en".to_string(),
            config: None,
        };
        let splitter = args.build().unwrap();
        assert_eq!(splitter.split("Mr. Smith left.").len(), 1);
    }

    #[test]
    fn test_splitter_args_unknown_preset() {
        let args = SplitterArgs {
            preset: "klingon".to_string(),
            config: None,
        };
        let err = args.build().unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }
}
