//! Context markers invoked for every character the value boundary consumes.

use crate::domain::abbreviation::AbbreviationMarker;
use crate::domain::enclosure::PairMarker;
use crate::domain::source::SourceCursor;
use crate::domain::state::ScanState;

#[derive(Debug, Clone)]
pub enum Marker {
    Abbreviation(AbbreviationMarker),
    Pair(PairMarker),
}

impl Marker {
    /// Observe the character under the cursor and update `state`
    pub fn mark(&self, cursor: &SourceCursor<'_>, state: &mut ScanState) {
        match self {
            Marker::Abbreviation(marker) => marker.mark(cursor, state),
            Marker::Pair(marker) => marker.mark(cursor, state),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Marker::Abbreviation(_) => "abbreviation",
            Marker::Pair(_) => "pair",
        }
    }
}
