//! TOML-backed splitter options and built-in presets.

mod loader;
mod types;

pub use loader::{get_preset, list_presets};
pub use types::{AbbreviationConfig, PairConfig, SeparatorConfig, SplitterConfig};

use std::path::Path;

use regex::Regex;

use crate::api::{Result, SplitError};
use crate::domain::abbreviation::AbbreviationMarker;
use crate::domain::boundary::{Rules, SeparatorSet};
use crate::domain::enclosure::{default_pair_marks, PairMark, PairMarker};
use crate::domain::marker::Marker;

impl SplitterConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SplitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Copy of a built-in preset
    pub fn preset(name: &str) -> Result<Self> {
        get_preset(name).cloned()
    }

    /// Check the options without keeping the compiled rules
    pub fn validate(&self) -> Result<()> {
        self.compile().map(|_| ())
    }

    /// Turn the options into the rules used while scanning
    pub fn compile(&self) -> Result<Rules> {
        let separators = self.separators.compile()?;

        let marks: Vec<PairMark> = match &self.pairs {
            Some(pairs) => pairs.iter().map(PairMark::from).collect(),
            None => default_pair_marks(),
        };
        let pair_marker = PairMarker::new(marks)?;

        let abbreviations = &self.abbreviations;
        for word in abbreviations
            .prepositive
            .iter()
            .chain(&abbreviations.abbreviations)
        {
            if word.trim().trim_end_matches('.').is_empty() {
                return Err(SplitError::Configuration(
                    "abbreviation entries must not be empty".into(),
                ));
            }
        }
        let abbreviation_marker = AbbreviationMarker::new(
            &abbreviations.prepositive,
            &abbreviations.abbreviations,
            abbreviations.multi_period,
            abbreviations.case_sensitive,
        );

        let mut markers = Vec::with_capacity(2);
        if !abbreviation_marker.is_empty() {
            markers.push(Marker::Abbreviation(abbreviation_marker));
        }
        if !pair_marker.marks().is_empty() {
            markers.push(Marker::Pair(pair_marker));
        }

        Ok(Rules {
            separators,
            markers,
        })
    }
}

impl SeparatorConfig {
    fn compile(&self) -> Result<SeparatorSet> {
        match (&self.characters, &self.pattern) {
            (Some(_), Some(_)) => Err(SplitError::Configuration(
                "separators.characters and separators.pattern are mutually exclusive".into(),
            )),
            (Some(characters), None) => {
                if characters.is_empty() {
                    return Err(SplitError::Configuration(
                        "separators.characters must not be empty".into(),
                    ));
                }
                if let Some(ch) = characters.iter().find(|ch| ch.is_whitespace()) {
                    return Err(SplitError::Configuration(format!(
                        "separator {ch:?} is whitespace"
                    )));
                }
                Ok(SeparatorSet::Characters(characters.iter().copied().collect()))
            }
            (None, Some(pattern)) => {
                let regex = Regex::new(pattern).map_err(|e| {
                    SplitError::Configuration(format!("invalid separator pattern: {e}"))
                })?;
                if regex.is_match("") {
                    return Err(SplitError::Configuration(format!(
                        "separator pattern {pattern:?} matches empty text"
                    )));
                }
                Ok(SeparatorSet::Pattern(regex))
            }
            (None, None) => Ok(SeparatorSet::standard()),
        }
    }
}
