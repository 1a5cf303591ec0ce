//! Paired delimiters (quotes, brackets) that keep a sentence open.
//!
//! While a pair context is active the separator boundary never fires, so
//! `I hear "I'm back to home." from radio.` stays a single sentence. Pair
//! contexts do not nest: a second opening mark inside an active context is
//! ignored, and only the active pair's own closing mark ends it.

use std::collections::HashMap;

use log::trace;

use crate::api::{Result, SplitError};
use crate::domain::source::SourceCursor;
use crate::domain::state::ScanState;

/// An opening/closing delimiter pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairMark {
    /// Name reported in `PairMarkContext::kind`
    pub name: String,
    pub open: char,
    pub close: char,
}

impl PairMark {
    pub fn new(name: impl Into<String>, open: char, close: char) -> Self {
        Self {
            name: name.into(),
            open,
            close,
        }
    }

    /// Same character opens and closes, like `"`
    pub fn is_symmetric(&self) -> bool {
        self.open == self.close
    }
}

/// Built-in pairs.
pub fn default_pair_marks() -> Vec<PairMark> {
    [
        ("double quote", '"', '"'),
        ("angled bracket", '[', ']'),
        ("round bracket", '(', ')'),
        ("curly brace", '{', '}'),
        ("かぎ括弧", '「', '」'),
        ("丸括弧", '（', '）'),
        ("二重かぎ括弧", '『', '』'),
        ("波括弧", '｛', '｝'),
        ("角括弧", '［', '］'),
        ("重角括弧", '〚', '〛'),
        ("隅付き括弧", '【', '】'),
        ("二重隅付き括弧", '《', '》'),
        ("山括弧", '〈', '〉'),
        ("亀甲括弧", '〔', '〕'),
        ("guillemet", '«', '»'),
        ("curly double quote", '\u{201C}', '\u{201D}'),
    ]
    .into_iter()
    .map(|(name, open, close)| PairMark::new(name, open, close))
    .collect()
}

/// Marker entering and leaving pair contexts.
#[derive(Debug, Clone)]
pub struct PairMarker {
    marks: Vec<PairMark>,
    /// Opening character to index into `marks`
    openers: HashMap<char, usize>,
}

impl PairMarker {
    /// Build a marker, rejecting marks that share a character.
    ///
    /// A character may belong to one pair only; a symmetric pair uses its
    /// character for both roles.
    pub fn new(marks: Vec<PairMark>) -> Result<Self> {
        let mut owners: HashMap<char, &str> = HashMap::new();

        for mark in &marks {
            if mark.name.trim().is_empty() {
                return Err(SplitError::Configuration(format!(
                    "pair {}{} has an empty name",
                    mark.open, mark.close
                )));
            }

            let chars: &[char] = if mark.is_symmetric() {
                &[mark.open]
            } else {
                &[mark.open, mark.close]
            };
            for &ch in chars {
                if let Some(owner) = owners.insert(ch, &mark.name) {
                    return Err(SplitError::Configuration(format!(
                        "pair mark '{ch}' is used by both \"{owner}\" and \"{}\"",
                        mark.name
                    )));
                }
            }
        }

        let openers = marks
            .iter()
            .enumerate()
            .map(|(index, mark)| (mark.open, index))
            .collect();

        Ok(Self { marks, openers })
    }

    pub fn marks(&self) -> &[PairMark] {
        &self.marks
    }

    fn opening(&self, ch: char) -> Option<&PairMark> {
        self.openers.get(&ch).map(|&index| &self.marks[index])
    }

    /// Inspect the character under the cursor
    pub fn mark(&self, cursor: &SourceCursor<'_>, state: &mut ScanState) {
        let Some(ch) = cursor.read(0) else {
            return;
        };

        match state.active_pair() {
            Some(active) if active.close == ch => {
                trace!("closing mark '{ch}' at {}", cursor.offset());
                state.leave_pair(cursor.offset() + ch.len_utf8());
            }
            Some(_) => {}
            None => {
                if let Some(mark) = self.opening(ch) {
                    trace!("opening mark '{ch}' at {}", cursor.offset());
                    state.enter_pair(&mark.name, mark.close, cursor.offset());
                }
            }
        }
    }
}

impl Default for PairMarker {
    fn default() -> Self {
        let marks = default_pair_marks();
        let openers = marks
            .iter()
            .enumerate()
            .map(|(index, mark)| (mark.open, index))
            .collect();
        Self { marks, openers }
    }
}
