//! Fluent construction of splitter options

use crate::api::Result;
use crate::domain::config::{PairConfig, SeparatorConfig, SplitterConfig};
use crate::domain::enclosure::default_pair_marks;

/// Default configuration constants
pub mod defaults {
    /// Preset a builder starts from
    pub const PRESET: &str = "default";
}

impl SplitterConfig {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Fluent builder for [`SplitterConfig`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    preset: Option<String>,
    characters: Option<Vec<char>>,
    pattern: Option<String>,
    pairs: Option<Vec<PairConfig>>,
    extra_pairs: Vec<PairConfig>,
    prepositive: Vec<String>,
    abbreviations: Vec<String>,
    multi_period: Option<bool>,
    case_sensitive: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a built-in preset instead of the default one
    pub fn preset(mut self, name: impl Into<String>) -> Self {
        self.preset = Some(name.into());
        self
    }

    /// Replace the separator characters
    pub fn separators(mut self, characters: impl IntoIterator<Item = char>) -> Self {
        self.characters = Some(characters.into_iter().collect());
        self
    }

    /// Use a legacy character-class pattern such as `[.!?]`
    pub fn separator_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Replace the pair list
    pub fn pairs(mut self, pairs: impl IntoIterator<Item = PairConfig>) -> Self {
        self.pairs = Some(pairs.into_iter().collect());
        self
    }

    /// Add one pair on top of the current list
    pub fn pair(mut self, name: impl Into<String>, open: char, close: char) -> Self {
        self.extra_pairs.push(PairConfig {
            name: name.into(),
            open,
            close,
        });
        self
    }

    /// Add words whose period never ends a sentence
    pub fn prepositive<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prepositive.extend(words.into_iter().map(Into::into));
        self
    }

    /// Add words whose period is ignored before a lower-case word
    pub fn abbreviations<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abbreviations.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn multi_period(mut self, enabled: bool) -> Self {
        self.multi_period = Some(enabled);
        self
    }

    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = Some(enabled);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SplitterConfig> {
        let preset = self.preset.as_deref().unwrap_or(defaults::PRESET);
        let mut config = SplitterConfig::preset(preset)?;

        if self.characters.is_some() || self.pattern.is_some() {
            config.separators = SeparatorConfig {
                characters: self.characters,
                pattern: self.pattern,
            };
        }

        if let Some(pairs) = self.pairs {
            config.pairs = Some(pairs);
        }
        if !self.extra_pairs.is_empty() {
            let pairs = config.pairs.get_or_insert_with(|| {
                default_pair_marks()
                    .into_iter()
                    .map(|mark| PairConfig {
                        name: mark.name,
                        open: mark.open,
                        close: mark.close,
                    })
                    .collect()
            });
            pairs.extend(self.extra_pairs);
        }

        let abbreviations = &mut config.abbreviations;
        abbreviations.prepositive.extend(self.prepositive);
        abbreviations.abbreviations.extend(self.abbreviations);
        if let Some(enabled) = self.multi_period {
            abbreviations.multi_period = enabled;
        }
        if let Some(enabled) = self.case_sensitive {
            abbreviations.case_sensitive = enabled;
        }

        config.validate()?;
        Ok(config)
    }
}
