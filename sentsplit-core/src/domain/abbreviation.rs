//! Abbreviation marker.
//!
//! Runs at the start of every word while the value boundary consumes text.
//! When the word ends with a period that belongs to a known abbreviation, the
//! period's offset is recorded as suppressed so the separator boundary skips
//! it.

use std::collections::HashSet;

use log::trace;

use crate::domain::node::Span;
use crate::domain::source::SourceCursor;
use crate::domain::state::ScanState;

/// Why a period was suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbbreviationKind {
    /// Title-like word that always precedes a name (`Mr.`, `Mt.`)
    Prepositive,
    /// Listed abbreviation followed by a lower-case word (`co.`, `p.`)
    Listed,
    /// Letter-dot sequence such as `U.S.A.`
    MultiPeriod,
}

#[derive(Debug, Clone, Default)]
pub struct AbbreviationMarker {
    prepositive: HashSet<String>,
    abbreviations: HashSet<String>,
    multi_period: bool,
    case_sensitive: bool,
}

impl AbbreviationMarker {
    pub fn new<P, A>(prepositive: P, abbreviations: A, multi_period: bool, case_sensitive: bool) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        let normalize = |word: &str| {
            let word = word.trim().trim_end_matches('.');
            if case_sensitive {
                word.to_string()
            } else {
                word.to_lowercase()
            }
        };

        Self {
            prepositive: prepositive
                .into_iter()
                .map(|word| normalize(word.as_ref()))
                .collect(),
            abbreviations: abbreviations
                .into_iter()
                .map(|word| normalize(word.as_ref()))
                .collect(),
            multi_period,
            case_sensitive,
        }
    }

    /// True when the marker can never suppress anything
    pub fn is_empty(&self) -> bool {
        self.prepositive.is_empty() && self.abbreviations.is_empty() && !self.multi_period
    }

    /// Classify `stem` (the word without its final period)
    pub fn classify(&self, stem: &str, next_is_capitalized: bool) -> Option<AbbreviationKind> {
        let key = if self.case_sensitive {
            stem.to_string()
        } else {
            stem.to_lowercase()
        };

        if self.prepositive.contains(&key) {
            return Some(AbbreviationKind::Prepositive);
        }
        if next_is_capitalized {
            return None;
        }
        if self.abbreviations.contains(&key) {
            return Some(AbbreviationKind::Listed);
        }
        if self.multi_period && is_multi_period(stem) {
            return Some(AbbreviationKind::MultiPeriod);
        }
        None
    }

    /// Inspect the word starting under the cursor
    pub fn mark(&self, cursor: &SourceCursor<'_>, state: &mut ScanState) {
        if self.is_empty() {
            return;
        }
        if cursor.read_behind(1).is_some_and(is_word_char) {
            return;
        }
        if !cursor.read(0).is_some_and(char::is_alphanumeric) {
            return;
        }

        let mut word = String::new();
        let mut ahead = 0;
        while let Some(ch) = cursor.read(ahead).filter(|&ch| is_word_char(ch)) {
            word.push(ch);
            ahead += 1;
        }

        let Some(stem) = word.strip_suffix('.') else {
            return;
        };
        if stem.ends_with('.') {
            return;
        }

        while cursor.read(ahead).is_some_and(char::is_whitespace) {
            ahead += 1;
        }
        let next_is_capitalized = cursor.read(ahead).map_or(true, char::is_uppercase);

        if let Some(kind) = self.classify(stem, next_is_capitalized) {
            let period = cursor.offset() + stem.len();
            trace!("{kind:?} abbreviation \"{word}\" at {}", cursor.offset());
            state.suppress(Span::new(period, period + 1));
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '.'
}

/// `U.S` or `e.g`: at least two single-letter segments
fn is_multi_period(stem: &str) -> bool {
    let mut segments = 0;
    for segment in stem.split('.') {
        let mut chars = segment.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_alphabetic() => segments += 1,
            _ => return false,
        }
    }
    segments >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> AbbreviationMarker {
        AbbreviationMarker::new(["Mr", "Mt", "St"], ["co", "p", "etc"], true, false)
    }

    fn suppressed(marker: &AbbreviationMarker, text: &str) -> Vec<usize> {
        let mut cursor = SourceCursor::from_text(text);
        let mut state = ScanState::new();
        while !cursor.at_end() {
            marker.mark(&cursor, &mut state);
            cursor.advance();
        }
        (0..text.len())
            .filter(|&offset| state.is_suppressed(offset))
            .collect()
    }

    #[test]
    fn test_prepositive_always_suppressed() {
        assert_eq!(suppressed(&english(), "I see Mt. Fuji"), vec![8]);
    }

    #[test]
    fn test_listed_needs_lower_case_follower() {
        let marker = english();
        assert_eq!(suppressed(&marker, "Jane and co. at the party"), vec![11]);
        assert!(suppressed(&marker, "Briggs & Co. It closed").is_empty());
    }

    #[test]
    fn test_digit_follower_is_not_capitalized() {
        assert_eq!(suppressed(&english(), "turn to p. 55."), vec![9]);
    }

    #[test]
    fn test_end_of_input_counts_as_capitalized() {
        assert!(suppressed(&english(), "and co.").is_empty());
    }

    #[test]
    fn test_multi_period() {
        let marker = english();
        assert_eq!(suppressed(&marker, "the U.S.A. last year"), vec![9]);
        assert!(suppressed(&marker, "the E.U. How").is_empty());
        assert!(suppressed(&marker, "Jane.Doe@example.com. I").is_empty());
    }

    #[test]
    fn test_case_sensitive_lookup() {
        let marker = AbbreviationMarker::new(["Mr"], Vec::<String>::new(), false, true);
        assert_eq!(suppressed(&marker, "Mr. Smith"), vec![2]);
        assert!(suppressed(&marker, "mr. Smith").is_empty());
    }

    #[test]
    fn test_mid_word_is_ignored() {
        assert!(suppressed(&english(), "disco. at").is_empty());
    }

    #[test]
    fn test_empty_marker() {
        let marker = AbbreviationMarker::default();
        assert!(marker.is_empty());
        assert!(suppressed(&marker, "Mr. Smith").is_empty());
    }

    #[test]
    fn test_is_multi_period() {
        assert!(is_multi_period("U.S"));
        assert!(is_multi_period("e.g"));
        assert!(!is_multi_period("U"));
        assert!(!is_multi_period("example.com"));
    }
}
