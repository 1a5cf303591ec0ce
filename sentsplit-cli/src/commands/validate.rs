//! Validate command implementation

use anyhow::Result;
use clap::Args;
use sentsplit_core::domain::{default_pair_marks, Marker};
use sentsplit_core::{Splitter, SplitterConfig};
use std::path::PathBuf;

use crate::error::CliError;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to splitter configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let checked = SplitterConfig::from_file(&self.config)
            .and_then(|config| Splitter::new(config.clone()).map(|splitter| (config, splitter)));

        match checked {
            Ok((config, splitter)) => {
                println!("✓ Configuration is valid!");
                for line in summarize(&config, &splitter) {
                    println!("  {line}");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::Error::new(e).context(CliError::InvalidConfig(self.config.clone())))
            }
        }
    }
}

/// Human-readable overview of a valid configuration
fn summarize(config: &SplitterConfig, splitter: &Splitter) -> Vec<String> {
    let separators = match (&config.separators.characters, &config.separators.pattern) {
        (Some(characters), _) => characters.iter().collect::<String>(),
        (None, Some(pattern)) => format!("pattern {pattern}"),
        (None, None) => "built-in".to_string(),
    };
    let pairs = config
        .pairs
        .as_ref()
        .map_or_else(|| default_pair_marks().len(), Vec::len);
    let abbreviations = &config.abbreviations;
    let markers: Vec<&str> = splitter.rules().markers.iter().map(Marker::name).collect();

    vec![
        format!("Separators: {separators}"),
        format!("Pairs: {pairs}"),
        format!(
            "Abbreviations: {} prepositive, {} listed, multi-period {}",
            abbreviations.prepositive.len(),
            abbreviations.abbreviations.len(),
            if abbreviations.multi_period { "on" } else { "off" }
        ),
        format!("Markers: {}", markers.join(", ")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_validate_valid_config() {
        let temp_file = config_file(
            r#"
[separators]
characters = [".", "!"]

[abbreviations]
prepositive = ["Dr"]
"#,
        );

        let args = ValidateArgs {
            config: temp_file.path().to_path_buf(),
        };
        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_exclusive_separators() {
        let temp_file = config_file(
            r#"
[separators]
characters = ["."]
pattern = "[.]"
"#,
        );

        let args = ValidateArgs {
            config: temp_file.path().to_path_buf(),
        };
        let err = args.execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_unknown_section() {
        let temp_file = config_file("[metadata]\ncode = \"en\"\n");
        let args = ValidateArgs {
            config: temp_file.path().to_path_buf(),
        };
        assert!(args.execute().is_err());
    }

    #[test]
    fn test_summary() {
        let config = SplitterConfig::from_toml_str(
            r#"
[separators]
characters = [".", "?"]

[abbreviations]
prepositive = ["Mr", "Dr"]
multi_period = true
"#,
        )
        .unwrap();
        let splitter = Splitter::new(config.clone()).unwrap();

        assert_eq!(
            summarize(&config, &splitter),
            vec![
                "Separators: .?".to_string(),
                format!("Pairs: {}", default_pair_marks().len()),
                "Abbreviations: 2 prepositive, 0 listed, multi-period on".to_string(),
                "Markers: abbreviation, pair".to_string(),
            ]
        );
    }
}
