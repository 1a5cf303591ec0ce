//! Per-call scan state.
//!
//! A fresh [`ScanState`] is created for every `split` call and threaded by
//! reference through boundaries and markers. It records the pair context
//! currently open, pair contexts already resolved, and the separator offsets
//! an abbreviation marker has switched off.

use log::debug;
use smallvec::SmallVec;

use crate::domain::node::{PairMarkContext, Span};

/// Pair context entered but not yet left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePair {
    pub kind: String,
    pub close: char,
    pub entered_at: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScanState {
    active: Option<ActivePair>,
    resolved: Vec<PairMarkContext>,
    suppressed: Vec<Span>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pair context is open
    pub fn in_pair(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_pair(&self) -> Option<&ActivePair> {
        self.active.as_ref()
    }

    /// Open a pair context. Ignored while another one is open.
    pub fn enter_pair(&mut self, kind: &str, close: char, offset: usize) {
        if self.active.is_some() {
            return;
        }
        debug!("entering {kind} context at {offset}");
        self.active = Some(ActivePair {
            kind: kind.to_string(),
            close,
            entered_at: offset,
        });
    }

    /// Close the open pair context; `end` is the offset just past the closing mark
    pub fn leave_pair(&mut self, end: usize) {
        if let Some(active) = self.active.take() {
            debug!(
                "leaving {} context {}..{}",
                active.kind, active.entered_at, end
            );
            self.resolved.push(PairMarkContext {
                kind: active.kind,
                range: Span::new(active.entered_at, end),
            });
        }
    }

    /// Disable separator matching inside `span` for the rest of the scan
    pub fn suppress(&mut self, span: Span) {
        if span.is_empty() || self.suppressed.contains(&span) {
            return;
        }
        debug!("suppressing separator at {}..{}", span.start, span.end);
        self.suppressed.push(span);
    }

    pub fn is_suppressed(&self, offset: usize) -> bool {
        self.suppressed.iter().any(|span| span.contains(offset))
    }

    /// Remove and return the resolved contexts lying inside `span`, sorted by start
    pub fn take_contexts_within(&mut self, span: Span) -> SmallVec<[PairMarkContext; 2]> {
        let mut taken = SmallVec::new();
        let mut kept = Vec::with_capacity(self.resolved.len());

        for context in self.resolved.drain(..) {
            if span.encloses(&context.range) {
                taken.push(context);
            } else {
                kept.push(context);
            }
        }
        self.resolved = kept;

        taken.sort_by_key(|context: &PairMarkContext| context.range.start);
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_contexts_do_not_nest() {
        let mut state = ScanState::new();
        state.enter_pair("double quote", '"', 3);
        state.enter_pair("round bracket", ')', 5);

        let active = state.active_pair().unwrap();
        assert_eq!(active.kind, "double quote");
        assert_eq!(active.entered_at, 3);

        state.leave_pair(10);
        assert!(!state.in_pair());
    }

    #[test]
    fn test_take_contexts_within_span() {
        let mut state = ScanState::new();
        state.enter_pair("round bracket", ')', 2);
        state.leave_pair(6);
        state.enter_pair("double quote", '"', 20);
        state.leave_pair(25);

        let taken = state.take_contexts_within(Span::new(0, 10));
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].range, Span::new(2, 6));

        let rest = state.take_contexts_within(Span::new(10, 30));
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].kind, "double quote");
        assert!(state.take_contexts_within(Span::new(0, 30)).is_empty());
    }

    #[test]
    fn test_suppressed_offsets() {
        let mut state = ScanState::new();
        state.suppress(Span::new(4, 5));
        state.suppress(Span::new(4, 5));

        assert!(state.is_suppressed(4));
        assert!(!state.is_suppressed(5));
        assert!(!state.is_suppressed(3));
    }
}
