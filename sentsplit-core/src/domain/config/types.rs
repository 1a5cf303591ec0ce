use serde::{Deserialize, Serialize};

use crate::domain::enclosure::PairMark;

/// Splitter options as read from TOML. Every section may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitterConfig {
    pub separators: SeparatorConfig,
    /// `None` keeps the built-in pairs; an empty list disables pair contexts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairs: Option<Vec<PairConfig>>,
    pub abbreviations: AbbreviationConfig,
}

/// Either an explicit character set or a legacy character-class pattern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeparatorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<char>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PairConfig {
    pub name: String,
    pub open: char,
    pub close: char,
}

impl From<&PairConfig> for PairMark {
    fn from(pair: &PairConfig) -> Self {
        PairMark::new(pair.name.clone(), pair.open, pair.close)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AbbreviationConfig {
    /// Words whose period never ends a sentence (`Mr`, `Mt`)
    pub prepositive: Vec<String>,
    /// Words whose period is ignored before a lower-case word (`co`, `p`)
    pub abbreviations: Vec<String>,
    /// Treat letter-dot runs like `U.S.A.` as abbreviations
    pub multi_period: bool,
    pub case_sensitive: bool,
}
