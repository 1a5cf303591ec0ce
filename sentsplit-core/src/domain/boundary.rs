//! Boundary predicates driving the scan loop.
//!
//! Each [`Boundary`] answers whether the character under the cursor starts a
//! run of its kind (`test`, never moves the cursor) and eats that run
//! (`consume`). The scan loop tries them in priority order: new line, space,
//! separator, then any other value.

use regex::Regex;
use smallvec::SmallVec;

use crate::domain::enclosure::PairMarker;
use crate::domain::marker::Marker;
use crate::domain::source::SourceCursor;
use crate::domain::state::ScanState;

/// Sentence-terminating characters used when nothing is configured.
pub const DEFAULT_SEPARATORS: [char; 8] = ['.', '。', '?', '!', '？', '！', '．', '｡'];

/// Characters that can end a sentence.
#[derive(Debug, Clone)]
pub enum SeparatorSet {
    Characters(SmallVec<[char; 8]>),
    /// Legacy single-character class such as `[.!?♪]`
    Pattern(Regex),
}

impl SeparatorSet {
    pub fn standard() -> Self {
        SeparatorSet::Characters(SmallVec::from_buf(DEFAULT_SEPARATORS))
    }

    pub fn matches(&self, ch: char) -> bool {
        match self {
            SeparatorSet::Characters(chars) => chars.contains(&ch),
            SeparatorSet::Pattern(regex) => {
                let mut buf = [0; 4];
                regex.is_match(ch.encode_utf8(&mut buf))
            }
        }
    }
}

/// Compiled options shared by every boundary.
#[derive(Debug, Clone)]
pub struct Rules {
    pub separators: SeparatorSet,
    /// Invoked in order for each consumed value character
    pub markers: Vec<Marker>,
}

impl Rules {
    /// Default separators and pairs, no abbreviations
    pub fn standard() -> Self {
        Self {
            separators: SeparatorSet::standard(),
            markers: vec![Marker::Pair(PairMarker::default())],
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// CR or LF
    NewLine,
    /// Whitespace other than CR and LF
    Space,
    /// Sentence-terminating punctuation
    Separator,
    /// Anything not claimed by `NewLine` or `Separator`
    AnyValue,
}

impl Boundary {
    pub fn test(self, rules: &Rules, cursor: &SourceCursor<'_>, state: &ScanState) -> bool {
        match self {
            Boundary::NewLine => cursor.read(0).is_some_and(is_line_break),
            Boundary::Space => cursor.read(0).is_some_and(is_space),
            Boundary::Separator => is_separator(rules, cursor, state),
            Boundary::AnyValue => {
                cursor.read(0).is_some()
                    && !Boundary::NewLine.test(rules, cursor, state)
                    && !Boundary::Separator.test(rules, cursor, state)
            }
        }
    }

    /// Advance past every consecutive character matching this boundary.
    ///
    /// `AnyValue` runs the markers on each character before stepping over it.
    pub fn consume(self, rules: &Rules, cursor: &mut SourceCursor<'_>, state: &mut ScanState) {
        while self.test(rules, cursor, state) {
            if self == Boundary::AnyValue {
                for marker in &rules.markers {
                    marker.mark(cursor, state);
                }
            }
            cursor.advance();
        }
    }
}

fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

fn is_space(ch: char) -> bool {
    ch.is_whitespace() && !is_line_break(ch)
}

fn is_separator(rules: &Rules, cursor: &SourceCursor<'_>, state: &ScanState) -> bool {
    let Some(ch) = cursor.read(0) else {
        return false;
    };
    if !rules.separators.matches(ch) || state.in_pair() || state.is_suppressed(cursor.offset()) {
        return false;
    }

    // `1.5` and `example.com` are not boundaries; `that....` is
    if ch == '.' {
        let mut ahead = 1;
        while cursor.peek_raw(ahead) == Some('.') {
            ahead += 1;
        }
        return cursor.peek_raw(ahead).map_or(true, char::is_whitespace);
    }

    true
}
